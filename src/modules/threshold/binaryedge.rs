use crate::config::ThresholdSettings;
use crate::geometry::{Contour, Point};
use crate::modules::{ExtractModule, ExtractedContours, Frame};

use image::imageops;
use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

use tracing::trace;

/// Runs a fixed binary threshold and, separately, blur plus Canny edges over
/// each frame, tracing every border in both images.
pub struct BinaryEdge {
	cutoff: u8,
	sigma: f32,
	canny_low: f32,
	canny_high: f32,
}

impl ExtractModule for BinaryEdge {
	fn run(&mut self, frame: &Frame) -> ExtractedContours {
		let gray = imageops::grayscale(frame);
		let mask = threshold(&gray, self.cutoff, ThresholdType::Binary);

		let blurred = gaussian_blur_f32(frame, self.sigma);
		let blurred_gray = imageops::grayscale(&blurred);
		let edge_image = canny(&blurred_gray, self.canny_low, self.canny_high);

		let edges = trace_contours(&edge_image);
		let mask = trace_contours(&mask);
		trace!(edges = edges.len(), mask = mask.len(), "extracted contours");

		ExtractedContours {
			edges,
			mask,
			edge_image,
		}
	}
}

impl BinaryEdge {
	pub fn new(settings: &ThresholdSettings) -> Self {
		Self {
			cutoff: settings.binary_cutoff,
			sigma: kernel_sigma(settings.blur_kernel),
			canny_low: settings.canny_low,
			canny_high: settings.canny_high,
		}
	}
}

// Sigma OpenCV derives for a square kernel when none is given.
fn kernel_sigma(kernel: u32) -> f32 {
	0.3 * ((kernel as f32 - 1.) * 0.5 - 1.) + 0.8
}

fn trace_contours(image: &GrayImage) -> Vec<Contour> {
	find_contours::<i32>(image)
		.into_iter()
		.map(|c| Contour::new(c.points.into_iter().map(|p| Point::new(p.x, p.y)).collect()).simplify_chain())
		.collect()
}
