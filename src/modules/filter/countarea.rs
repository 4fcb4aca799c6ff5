use crate::config::FilterSettings;
use crate::geometry::{polygon_area, Point};
use crate::modules::FilterModule;

/// Area band applied to approximated polygons in the counting pass.
pub struct CountArea {
	min: f64,
	max: f64,
}

impl FilterModule for CountArea {
	fn run(&self, points: &[Point]) -> bool {
		let area = polygon_area(points);
		area > self.min && area < self.max
	}
}

impl CountArea {
	pub fn new(settings: &FilterSettings) -> Self {
		Self {
			min: settings.count_area_min,
			max: settings.count_area_max,
		}
	}
}
