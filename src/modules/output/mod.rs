pub mod display;
pub mod flowcontrol;
pub mod serial;
pub mod transmitter;

pub use display::{spawn_display, LogDisplay, SnapshotDisplay};
pub use flowcontrol::FlowControlMonitor;
pub use serial::{QueuedWriter, SerialLink};
pub use transmitter::{SkipReason, Transmission, Transmitter};
