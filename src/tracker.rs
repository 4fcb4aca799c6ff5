use crate::classify::{self, ShapeKind};
use crate::config::FilterSettings;
use crate::geometry::{ApproxPolygon, BoundingBox, Contour, Point};
use crate::modules::filter::{ContourSize, CountArea};
use crate::modules::FilterModule;
use crate::protocol::Position;

use tracing::debug;

#[derive(Debug, Clone)]
pub struct DetectedObject {
	pub contour: Contour,
	pub polygon: ApproxPolygon,
	pub bounding_box: BoundingBox,
	pub area: f64,
	pub centroid: Point,
	pub kind: ShapeKind,
}

impl DetectedObject {
	pub fn position(&self) -> Position {
		Position::from_centroid(self.centroid)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeCounts {
	pub triangles: usize,
	pub squares: usize,
}

pub struct Tracker {
	detect_filters: Vec<Box<dyn FilterModule + Send>>,
	count_filters: Vec<Box<dyn FilterModule + Send>>,
}

impl Tracker {
	pub fn new(settings: &FilterSettings) -> Self {
		Self {
			detect_filters: vec![Box::new(ContourSize::new(settings))],
			count_filters: vec![Box::new(CountArea::new(settings))],
		}
	}

	/// One `DetectedObject` per contour that survives the size filters, in
	/// contour order.
	pub fn detect(&self, contours: &[Contour]) -> Vec<DetectedObject> {
		contours
			.iter()
			.filter(|cnt| self.detect_filters.iter().all(|module| module.run(cnt.points())))
			.map(|cnt| {
				let bounding_box = cnt.bounding_box();
				let (polygon, kind) = classify::classify_contour(cnt);
				let object = DetectedObject {
					contour: cnt.clone(),
					polygon,
					bounding_box,
					area: cnt.area(),
					centroid: bounding_box.center(),
					kind,
				};
				debug!(kind = ?object.kind, area = object.area, x = object.centroid.x, y = object.centroid.y, "detected object");
				object
			})
			.collect()
	}

	/// Counts triangles and squares among contours whose approximated polygon
	/// falls inside the counting area band.
	pub fn count(&self, contours: &[Contour]) -> ShapeCounts {
		contours
			.iter()
			.map(classify::approximate)
			.filter(|poly| self.count_filters.iter().all(|module| module.run(poly.vertices())))
			.fold(ShapeCounts::default(), |mut counts, poly| {
				match classify::classify(&poly) {
					ShapeKind::Triangle => counts.triangles += 1,
					ShapeKind::Square => counts.squares += 1,
					ShapeKind::Unclassified => {}
				}
				counts
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geometry::tests::outline;

	fn square(x: i32, y: i32, side: i32) -> Vec<Point> {
		vec![Point::new(x, y), Point::new(x + side, y), Point::new(x + side, y + side), Point::new(x, y + side)]
	}

	fn triangle(x: i32, y: i32, size: i32) -> Vec<Point> {
		vec![Point::new(x + size / 2, y), Point::new(x + size, y + size), Point::new(x, y + size)]
	}

	#[test]
	fn square_contour_becomes_detection() {
		let tracker = Tracker::new(&FilterSettings::default());
		let contour = outline(&square(123, 63, 54), 6);
		assert!(contour.len() > 20);
		let found = tracker.detect(&[contour]);
		assert_eq!(found.len(), 1);
		let obj = &found[0];
		assert_eq!(obj.kind, ShapeKind::Square);
		assert_eq!(obj.area, 2916.);
		assert_eq!(obj.centroid, Point::new(150, 90));
		assert_eq!(obj.position(), Position { x: 50, y: 30 });
	}

	#[test]
	fn oversized_contour_is_dropped_before_classification() {
		let tracker = Tracker::new(&FilterSettings::default());
		// 78x78 = 6084 px
		let contour = outline(&square(111, 51, 78), 6);
		assert!(tracker.detect(&[contour]).is_empty());
	}

	#[test]
	fn sparse_contour_is_dropped() {
		let tracker = Tracker::new(&FilterSettings::default());
		let contour = Contour::new(square(10, 10, 30));
		assert!(tracker.detect(&[contour]).is_empty());
	}

	#[test]
	fn detections_keep_contour_order() {
		let tracker = Tracker::new(&FilterSettings::default());
		let contours = vec![outline(&triangle(10, 10, 40), 8), outline(&square(100, 20, 40), 6)];
		let kinds = tracker.detect(&contours).iter().map(|o| o.kind).collect::<Vec<_>>();
		assert_eq!(kinds, vec![ShapeKind::Triangle, ShapeKind::Square]);
	}

	#[test]
	fn counting_uses_polygon_area_band() {
		let tracker = Tracker::new(&FilterSettings::default());
		let contours = vec![
			Contour::new(square(0, 0, 30)),
			Contour::new(square(50, 0, 40)),
			Contour::new(triangle(0, 60, 40)),
			// too small
			Contour::new(square(100, 100, 10)),
			// too large
			Contour::new(square(200, 0, 80)),
		];
		assert_eq!(tracker.count(&contours), ShapeCounts { triangles: 1, squares: 2 });
	}

	#[test]
	fn counting_skips_skewed_quads() {
		let tracker = Tracker::new(&FilterSettings::default());
		let rhombus = Contour::new(vec![Point::new(0, 0), Point::new(40, 0), Point::new(60, 35), Point::new(20, 35)]);
		assert_eq!(tracker.count(&[rhombus]), ShapeCounts::default());
	}
}
