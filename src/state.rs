use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether the controller currently accepts coordinates. Written only by the
/// flow-control monitor, read by the transmitter before every send.
#[derive(Debug, Clone)]
pub struct FlowControlState {
	sending_enabled: Arc<AtomicBool>,
}

impl FlowControlState {
	pub fn new() -> Self {
		Self {
			sending_enabled: Arc::new(AtomicBool::new(true)),
		}
	}

	pub fn sending_enabled(&self) -> bool {
		self.sending_enabled.load(Ordering::Acquire)
	}

	pub fn set_sending_enabled(&self, enabled: bool) {
		self.sending_enabled.store(enabled, Ordering::Release);
	}
}

impl Default for FlowControlState {
	fn default() -> Self {
		Self::new()
	}
}

/// Operator switch gating whether detections are transmitted at all.
#[derive(Debug, Clone, Default)]
pub struct RunMode {
	active: Arc<AtomicBool>,
}

impl RunMode {
	pub fn new(active: bool) -> Self {
		Self {
			active: Arc::new(AtomicBool::new(active)),
		}
	}

	pub fn is_active(&self) -> bool {
		self.active.load(Ordering::Acquire)
	}

	pub fn set_active(&self, active: bool) {
		self.active.store(active, Ordering::Release);
	}
}
