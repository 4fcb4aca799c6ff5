mod imagesequence;
mod queue;
#[cfg(feature = "camera")]
mod camera;

pub use imagesequence::ImageSequenceInput;
pub use queue::FrameQueue;
#[cfg(feature = "camera")]
pub use camera::CameraInput;

use crate::modules::Frame;

use image::imageops::{self, FilterType};

/// Scales `frame` to `width`, keeping its aspect ratio.
pub fn fit_width(frame: Frame, width: Option<u32>) -> Frame {
	match width {
		Some(width) if width != frame.width() && frame.width() > 0 => {
			let height = ((frame.height() as u64 * width as u64) / frame.width() as u64).max(1) as u32;
			imageops::resize(&frame, width, height, FilterType::Triangle)
		}
		_ => frame,
	}
}
