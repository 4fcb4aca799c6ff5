use crate::config::FilterSettings;
use crate::geometry::{polygon_area, Point};
use crate::modules::FilterModule;

/// Keeps contours with enough boundary points to be a real outline but
/// smaller than a background artifact.
pub struct ContourSize {
	min_points: usize,
	max_area: f64,
}

impl FilterModule for ContourSize {
	fn run(&self, points: &[Point]) -> bool {
		points.len() > self.min_points && polygon_area(points) < self.max_area
	}
}

impl ContourSize {
	pub fn new(settings: &FilterSettings) -> Self {
		Self {
			min_points: settings.min_points,
			max_area: settings.max_area,
		}
	}
}
