use crate::geometry::{ApproxPolygon, Contour};

/// Polygon approximation tolerance as a fraction of the contour perimeter.
pub const APPROX_EPSILON_RATIO: f64 = 0.10;

pub const RIGHT_ANGLE_MIN: f64 = 80.;
pub const RIGHT_ANGLE_MAX: f64 = 100.;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
	Triangle,
	Square,
	Unclassified,
}

impl ShapeKind {
	/// Wire code sent to the controller, or `None` for shapes that are never
	/// transmitted.
	pub fn code(self) -> Option<u8> {
		match self {
			ShapeKind::Triangle => Some(1),
			ShapeKind::Square => Some(2),
			ShapeKind::Unclassified => None,
		}
	}
}

pub fn approximate(contour: &Contour) -> ApproxPolygon {
	contour.approximate(contour.arc_length() * APPROX_EPSILON_RATIO)
}

/// Three vertices is always a triangle. Four vertices is a square only when
/// every corner turns by a near-right angle; side lengths are not compared.
pub fn classify(polygon: &ApproxPolygon) -> ShapeKind {
	match polygon.vertex_count() {
		3 => ShapeKind::Triangle,
		4 => {
			let square = polygon
				.exterior_angles()
				.iter()
				.all(|angle| (RIGHT_ANGLE_MIN..=RIGHT_ANGLE_MAX).contains(angle));
			if square {
				ShapeKind::Square
			} else {
				ShapeKind::Unclassified
			}
		}
		_ => ShapeKind::Unclassified,
	}
}

pub fn classify_contour(contour: &Contour) -> (ApproxPolygon, ShapeKind) {
	let polygon = approximate(contour);
	let kind = classify(&polygon);
	(polygon, kind)
}
