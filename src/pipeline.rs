//! The per-frame cycle: extract, track, transmit, annotate, report.

use crate::annotate::{self, Annotation};
use crate::error::Result;
use crate::modules::{ExtractModule, Frame, InputModule};
use crate::modules::output::transmitter::{Transmission, Transmitter};
use crate::tracker::{DetectedObject, ShapeCounts, Tracker};

use crossbeam_channel::{Sender, TrySendError};
use image::{DynamicImage, RgbImage};

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
	On,
	Off,
	Error,
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Status::On => "On",
			Status::Off => "Off",
			Status::Error => "Error",
		};
		f.write_str(label)
	}
}

/// Everything the presentation layer needs from one cycle.
pub struct CycleReport {
	pub frame_number: u64,
	pub marked: RgbImage,
	pub decorated: RgbImage,
	pub detections: Vec<DetectedObject>,
	pub transmissions: Vec<Transmission>,
	pub counts: ShapeCounts,
	pub status: Status,
}

impl CycleReport {
	pub fn triangle_label(&self) -> String {
		format!("{} triangles detected", self.counts.triangles)
	}

	pub fn square_label(&self) -> String {
		format!("{} squares detected", self.counts.squares)
	}

	pub fn sent(&self) -> usize {
		self.transmissions.iter().filter(|t| matches!(t, Transmission::Sent(_))).count()
	}
}

pub struct Pipeline<W: Write> {
	extractor: Box<dyn ExtractModule + Send>,
	tracker: Tracker,
	transmitter: Transmitter<W>,
	frame_number: u64,
}

impl<W: Write> Pipeline<W> {
	pub fn new(extractor: Box<dyn ExtractModule + Send>, tracker: Tracker, transmitter: Transmitter<W>) -> Self {
		Self {
			extractor,
			tracker,
			transmitter,
			frame_number: 0,
		}
	}

	pub fn transmitter(&self) -> &Transmitter<W> {
		&self.transmitter
	}

	pub fn cycle(&mut self, frame: Frame) -> CycleReport {
		self.frame_number += 1;
		let (width, height) = frame.dimensions();
		let extracted = self.extractor.run(&frame);

		let detections = self.tracker.detect(&extracted.edges);
		let counts = self.tracker.count(&extracted.mask);

		let mut transmissions = Vec::with_capacity(detections.len());
		let mut marks = Vec::<Annotation>::new();
		let mut decorations = Vec::<Annotation>::new();
		for object in detections.iter() {
			marks.extend(annotate::mark(object, width, height));
			decorations.extend(annotate::decorate(object));
			match self.transmitter.transmit(object) {
				Ok(outcome) => transmissions.push(outcome),
				// No retry; the next cycle offers a fresh detection.
				Err(e) => warn!("transmit failed: {}", e),
			}
		}

		let status = if !self.transmitter.run_mode().is_active() {
			Status::Off
		} else if transmissions.iter().any(|t| matches!(t, Transmission::OutOfRange(_))) {
			Status::Error
		} else {
			Status::On
		};

		let mut marked = frame;
		annotate::render(&mut marked, &marks);
		let mut decorated = DynamicImage::ImageLuma8(extracted.edge_image).to_rgb8();
		annotate::render(&mut decorated, &decorations);

		debug!(
			frame = self.frame_number,
			detections = detections.len(),
			triangles = counts.triangles,
			squares = counts.squares,
			%status,
			"cycle complete"
		);

		CycleReport {
			frame_number: self.frame_number,
			marked,
			decorated,
			detections,
			transmissions,
			counts,
			status,
		}
	}

	/// Pulls frames until the source runs dry or `shutdown` is raised.
	/// Reports are offered to `reports` without waiting; a slow presenter
	/// simply misses cycles. Returns the number of cycles run.
	pub fn run<I: InputModule>(&mut self, input: &mut I, reports: &Sender<CycleReport>, shutdown: &AtomicBool) -> Result<u64> {
		let mut cycles = 0;
		while input.is_available() && !shutdown.load(Ordering::Acquire) {
			let frame = match input.next_frame()? {
				Some(frame) => frame,
				None => break,
			};
			let report = self.cycle(frame);
			cycles += 1;
			match reports.try_send(report) {
				Ok(()) => {}
				Err(TrySendError::Full(_)) => debug!("presenter busy, report dropped"),
				Err(TrySendError::Disconnected(_)) => {}
			}
		}
		if shutdown.load(Ordering::Acquire) {
			info!(cycles, "pipeline stopped");
		} else {
			info!(cycles, "frame source exhausted");
		}
		Ok(cycles)
	}
}
