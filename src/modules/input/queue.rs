use crate::error::Result;
use crate::modules::{Frame, InputModule};

use std::collections::VecDeque;

/// Frames already in memory, handed out in order.
#[derive(Default)]
pub struct FrameQueue {
	frames: VecDeque<Frame>,
}

impl InputModule for FrameQueue {
	fn is_available(&self) -> bool {
		!self.frames.is_empty()
	}

	fn next_frame(&mut self) -> Result<Option<Frame>> {
		Ok(self.frames.pop_front())
	}
}

impl FrameQueue {
	pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
		Self {
			frames: frames.into_iter().collect(),
		}
	}
}
