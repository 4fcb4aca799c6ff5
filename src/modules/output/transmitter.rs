use crate::classify::ShapeKind;
use crate::error::Result;
use crate::protocol::{OutboundCommand, Position};
use crate::state::{FlowControlState, RunMode};
use crate::tracker::DetectedObject;

use std::io::Write;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	Inactive,
	Suspended,
	Unclassified,
}

/// Outcome of offering one detection to the controller. `Skipped` is normal
/// backpressure; `OutOfRange` is the error the operator should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transmission {
	Sent(OutboundCommand),
	Skipped(SkipReason),
	OutOfRange(Position),
}

pub struct Transmitter<W: Write> {
	sink: W,
	flow: FlowControlState,
	run_mode: RunMode,
}

impl<W: Write> Transmitter<W> {
	pub fn new(sink: W, flow: FlowControlState, run_mode: RunMode) -> Self {
		Self { sink, flow, run_mode }
	}

	pub fn run_mode(&self) -> &RunMode {
		&self.run_mode
	}

	pub fn sink(&self) -> &W {
		&self.sink
	}

	pub fn into_inner(self) -> W {
		self.sink
	}

	/// Writes one frame for `object` if the operator has started the run, the
	/// controller has not suspended us and the position fits its range.
	pub fn transmit(&mut self, object: &DetectedObject) -> Result<Transmission> {
		if !self.run_mode.is_active() {
			return Ok(Transmission::Skipped(SkipReason::Inactive));
		}
		if !self.flow.sending_enabled() {
			return Ok(Transmission::Skipped(SkipReason::Suspended));
		}
		if object.kind == ShapeKind::Unclassified {
			return Ok(Transmission::Skipped(SkipReason::Unclassified));
		}

		let position = object.position();
		let command = match OutboundCommand::new(position, object.kind) {
			Some(command) => command,
			None => {
				warn!(x = position.x, y = position.y, "position outside controller range, not sent");
				return Ok(Transmission::OutOfRange(position));
			}
		};

		self.sink.write_all(&command.encode())?;
		debug!(x = command.x_pos(), y = command.y_pos(), shape = command.shape_code(), "sent position");
		Ok(Transmission::Sent(command))
	}
}
