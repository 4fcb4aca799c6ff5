//! Integer contour geometry: areas, perimeters, bounding boxes and
//! Douglas-Peucker polygon approximation on closed curves.

use imageproc::geometry::{approximate_polygon_dp, arc_length, contour_area};
use imageproc::point::Point as ImPoint;
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
	pub x: i32,
	pub y: i32,
}

impl Point {
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// Axis-aligned box in pixel units. Width and height count pixels, so a box
/// spanning columns 10..=19 has `width == 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
	pub x: i32,
	pub y: i32,
	pub width: i32,
	pub height: i32,
}

impl BoundingBox {
	pub fn bottom(&self) -> i32 {
		self.y + self.height
	}

	/// Center of the box, truncated to whole pixels.
	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2, self.y + self.height / 2)
	}
}

/// Closed boundary of a connected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
	points: Vec<Point>,
}

impl Contour {
	pub fn new(points: Vec<Point>) -> Self {
		Self { points }
	}

	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn area(&self) -> f64 {
		polygon_area(&self.points)
	}

	pub fn arc_length(&self) -> f64 {
		closed_arc_length(&self.points)
	}

	pub fn bounding_box(&self) -> BoundingBox {
		let (min_x, max_x) = match self.points.iter().map(|p| p.x).minmax().into_option() {
			Some(range) => range,
			None => return BoundingBox { x: 0, y: 0, width: 0, height: 0 },
		};
		let (min_y, max_y) = self.points.iter().map(|p| p.y).minmax().into_option().unwrap_or((0, 0));
		BoundingBox {
			x: min_x,
			y: min_y,
			width: max_x - min_x + 1,
			height: max_y - min_y + 1,
		}
	}

	/// Simplifies the contour so no dropped point lies farther than
	/// `epsilon` pixels from the resulting polygon.
	pub fn approximate(&self, epsilon: f64) -> ApproxPolygon {
		ApproxPolygon::new(approximate_closed(&self.points, epsilon))
	}

	/// Removes repeated points and points that continue the previous step in
	/// the same direction, keeping only the ends of every straight run.
	pub fn simplify_chain(&self) -> Contour {
		let n = self.points.len();
		if n < 3 {
			return self.clone();
		}
		let points = (0..n)
			.filter(|&i| {
				let prev = self.points[(i + n - 1) % n];
				let cur = self.points[i];
				let next = self.points[(i + 1) % n];
				let a = (cur.x - prev.x, cur.y - prev.y);
				let b = (next.x - cur.x, next.y - cur.y);
				a != (0, 0) && a != b
			})
			.map(|i| self.points[i])
			.collect::<Vec<_>>();
		if points.is_empty() {
			// A degenerate run of identical steps still needs a representative.
			return Contour::new(vec![self.points[0]]);
		}
		Contour::new(points)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproxPolygon {
	vertices: Vec<Point>,
}

impl ApproxPolygon {
	pub fn new(vertices: Vec<Point>) -> Self {
		Self { vertices }
	}

	pub fn vertices(&self) -> &[Point] {
		&self.vertices
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn area(&self) -> f64 {
		polygon_area(&self.vertices)
	}

	/// Absolute turning angle, in degrees, between each edge and the one
	/// after it, wrapping from the last edge back to the first.
	pub fn exterior_angles(&self) -> Vec<f64> {
		if self.vertices.len() < 3 {
			return Vec::new();
		}
		let edges = self
			.vertices
			.iter()
			.circular_tuple_windows::<(_, _)>()
			.map(|(a, b)| ((b.x - a.x) as f64, (b.y - a.y) as f64))
			.collect::<Vec<_>>();
		edges
			.iter()
			.circular_tuple_windows::<(_, _)>()
			.map(|(first, second)| turning_angle(*first, *second).abs())
			.collect()
	}
}

fn turning_angle(first: (f64, f64), second: (f64, f64)) -> f64 {
	let degrees = (second.1.atan2(second.0) - first.1.atan2(first.0)).to_degrees();
	if degrees <= -180. {
		degrees + 360.
	} else if degrees > 180. {
		degrees - 360.
	} else {
		degrees
	}
}

fn to_imageproc(points: &[Point]) -> Vec<ImPoint<i32>> {
	points.iter().map(|p| ImPoint::new(p.x, p.y)).collect()
}

fn from_imageproc(points: Vec<ImPoint<i32>>) -> Vec<Point> {
	points.into_iter().map(|p| Point::new(p.x, p.y)).collect()
}

pub fn polygon_area(points: &[Point]) -> f64 {
	if points.len() < 3 {
		return 0.;
	}
	contour_area(&to_imageproc(points))
}

pub fn closed_arc_length(points: &[Point]) -> f64 {
	if points.len() < 2 {
		return 0.;
	}
	arc_length(&to_imageproc(points), true)
}

fn farthest_from(points: &[Point], origin: usize) -> usize {
	let from = points[origin];
	points
		.iter()
		.enumerate()
		.map(|(i, p)| (i, ((p.x - from.x) as f64).hypot((p.y - from.y) as f64)))
		.fold((origin, 0.), |best, cur| if cur.1 > best.1 { cur } else { best })
		.0
}

fn approximate_closed(points: &[Point], epsilon: f64) -> Vec<Point> {
	let n = points.len();
	if n < 3 || epsilon <= 0. {
		return points.to_vec();
	}

	// Anchor the split on two mutually distant points so the result does not
	// depend on where the contour tracer happened to start.
	let start = farthest_from(points, farthest_from(points, 0));
	let opposite = farthest_from(points, start);
	if opposite == start {
		return vec![points[start]];
	}

	let mut ring = to_imageproc(points);
	ring.rotate_left(start);
	ring.push(ring[0]);
	let split = (opposite + n - start) % n;

	let mut first = approximate_polygon_dp(&ring[..=split], epsilon, false);
	let mut second = approximate_polygon_dp(&ring[split..], epsilon, false);
	first.pop();
	second.pop();
	first.extend(second);
	from_imageproc(first)
}
