//! Wire formats exchanged with the controller.
//!
//! Outbound frames are five raw bytes: `<`, x, y, shape code, `>`. Inbound
//! commands are text lines such as `<S1>`.

use crate::classify::ShapeKind;
use crate::geometry::Point;

pub const START_MARKER: u8 = b'<';
pub const END_MARKER: u8 = b'>';
pub const FRAME_LEN: usize = 5;

/// Pixel-to-controller scale applied to both axes.
pub const POSITION_SCALE: i32 = 3;
pub const X_LIMIT: i32 = 58;
pub const Y_LIMIT: i32 = 44;

/// Controller-space position derived from a pixel centroid. May lie outside
/// the controller's range; see [`OutboundCommand::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
	pub x: i32,
	pub y: i32,
}

impl Position {
	pub fn from_centroid(centroid: Point) -> Self {
		Self {
			x: centroid.x / POSITION_SCALE,
			y: centroid.y / POSITION_SCALE,
		}
	}

	pub fn in_range(&self) -> bool {
		(0..X_LIMIT).contains(&self.x) && (0..Y_LIMIT).contains(&self.y)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundCommand {
	x_pos: u8,
	y_pos: u8,
	shape_code: u8,
}

impl OutboundCommand {
	/// Builds a command only for transmittable shapes inside the controller
	/// range.
	pub fn new(position: Position, kind: ShapeKind) -> Option<Self> {
		let shape_code = kind.code()?;
		if !position.in_range() {
			return None;
		}
		Some(Self {
			x_pos: position.x as u8,
			y_pos: position.y as u8,
			shape_code,
		})
	}

	pub fn x_pos(&self) -> u8 {
		self.x_pos
	}

	pub fn y_pos(&self) -> u8 {
		self.y_pos
	}

	pub fn shape_code(&self) -> u8 {
		self.shape_code
	}

	pub fn encode(&self) -> [u8; FRAME_LEN] {
		[START_MARKER, self.x_pos, self.y_pos, self.shape_code, END_MARKER]
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundCommand {
	Suspend { active: bool },
}

impl InboundCommand {
	/// Parses one inbound line. Returns `None` for noise, empty payloads and
	/// command letters that are not understood.
	pub fn parse(line: &str) -> Option<Self> {
		let line = line.trim_end_matches(&['\r', '\n'][..]);
		let open = line.find('<')?;
		let rest = &line[open + 1..];
		let close = rest.find('>')?;
		let mut payload = rest[..close].chars();
		match payload.next()? {
			'S' => Some(InboundCommand::Suspend {
				active: payload.next() == Some('1'),
			}),
			_ => None,
		}
	}
}
