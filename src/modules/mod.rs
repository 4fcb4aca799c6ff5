pub mod input;
pub mod threshold;
pub mod filter;
pub mod output;

use image::{GrayImage, RgbImage};

use crate::error::Result;
use crate::geometry::{Contour, Point};
use crate::pipeline::CycleReport;

pub type Frame = RgbImage;

/// Contour sets pulled from one frame. Edge contours decorate the preview,
/// mask contours drive shape counting.
pub struct ExtractedContours {
	pub edges: Vec<Contour>,
	pub mask: Vec<Contour>,
	pub edge_image: GrayImage,
}

pub trait InputModule {
	fn is_available(&self) -> bool;
	fn next_frame(&mut self) -> Result<Option<Frame>>;
}

pub trait ExtractModule {
	fn run(&mut self, frame: &Frame) -> ExtractedContours;
}

pub trait FilterModule {
	fn run(&self, points: &[Point]) -> bool;
}

pub trait DisplayModule {
	fn show(&mut self, report: &CycleReport) -> Result<()>;
}
