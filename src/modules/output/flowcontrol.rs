use crate::error::Result;
use crate::protocol::InboundCommand;
use crate::state::FlowControlState;

use std::io::{BufRead, ErrorKind};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace};

/// Reads controller lines and applies suspend/resume commands to the shared
/// flow-control flag.
pub struct FlowControlMonitor<R: BufRead> {
	reader: R,
	flow: FlowControlState,
}

impl<R: BufRead> FlowControlMonitor<R> {
	pub fn new(reader: R, flow: FlowControlState) -> Self {
		Self { reader, flow }
	}

	pub fn apply(&self, line: &str) -> Option<InboundCommand> {
		let command = match InboundCommand::parse(line) {
			Some(command) => command,
			None => {
				trace!(line = line.trim_end(), "ignored inbound line");
				return None;
			}
		};
		match command {
			InboundCommand::Suspend { active } => {
				let enabled = !active;
				if self.flow.sending_enabled() != enabled {
					info!(sending_enabled = enabled, "controller flow control changed");
				}
				self.flow.set_sending_enabled(enabled);
			}
		}
		Some(command)
	}

	/// Blocks on the inbound stream until it closes or `shutdown` is raised.
	/// Read timeouts only return control so the shutdown flag can be seen;
	/// a partially received line is kept across them.
	pub fn run(mut self, shutdown: &AtomicBool) -> Result<()> {
		let mut pending = Vec::new();
		while !shutdown.load(Ordering::Acquire) {
			match self.reader.read_until(b'\n', &mut pending) {
				Ok(0) => {
					if !pending.is_empty() {
						self.apply(&String::from_utf8_lossy(&pending));
					}
					info!("inbound stream closed");
					return Ok(());
				}
				Ok(_) => {
					self.apply(&String::from_utf8_lossy(&pending));
					pending.clear();
				}
				Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
					continue;
				}
				Err(e) => return Err(e.into()),
			}
		}
		debug!("flow control monitor stopping");
		Ok(())
	}
}
