use crate::config::InputSettings;
use crate::error::{LocatorError, Result};
use crate::modules::input::fit_width;
use crate::modules::{Frame, InputModule};

use opencv::core::{Mat, CV_8UC3};
use opencv::prelude::*;
use opencv::videoio::{VideoCapture, CAP_ANY, CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH};

use tracing::{info, warn};

pub struct CameraInput {
	cap: VideoCapture,
	resize_width: Option<u32>,
}

impl InputModule for CameraInput {
	fn is_available(&self) -> bool {
		self.cap.is_opened().unwrap_or(false)
	}

	fn next_frame(&mut self) -> Result<Option<Frame>> {
		let mut frame = Mat::default();
		if !self.cap.read(&mut frame)? || frame.empty() {
			warn!("camera returned no frame");
			return Ok(None);
		}
		Ok(Some(fit_width(mat_to_rgb(&frame)?, self.resize_width)))
	}
}

impl CameraInput {
	pub fn new(settings: &InputSettings) -> Result<Self> {
		let mut cap = VideoCapture::new(settings.device, CAP_ANY)?;
		if !cap.is_opened()? {
			return Err(LocatorError::Camera(format!("camera {} failed to open", settings.device)));
		}
		cap.set(CAP_PROP_FRAME_HEIGHT, settings.height as f64)?;
		cap.set(CAP_PROP_FRAME_WIDTH, settings.width as f64)?;
		cap.set(CAP_PROP_FPS, settings.fps as f64)?;
		info!(device = settings.device, width = settings.width, height = settings.height, fps = settings.fps, "camera open");
		Ok(Self {
			cap,
			resize_width: settings.resize_width,
		})
	}
}

fn mat_to_rgb(mat: &Mat) -> Result<Frame> {
	if mat.typ() != CV_8UC3 {
		return Err(LocatorError::Camera(format!("unsupported frame type {}", mat.typ())));
	}
	let size = mat.size()?;
	let continuous;
	let mat = if mat.is_continuous() {
		mat
	} else {
		continuous = mat.try_clone()?;
		&continuous
	};
	let rgb = mat
		.data_bytes()?
		.chunks_exact(3)
		.flat_map(|bgr| [bgr[2], bgr[1], bgr[0]])
		.collect::<Vec<u8>>();
	Frame::from_raw(size.width as u32, size.height as u32, rgb)
		.ok_or_else(|| LocatorError::Camera("frame buffer does not match its size".to_string()))
}
