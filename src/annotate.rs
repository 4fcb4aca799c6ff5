//! Drawing instructions for the two preview views, and a renderer that
//! applies them to an RGB canvas. Label text is carried as data only.

use crate::classify::ShapeKind;
use crate::geometry::{BoundingBox, Point};
use crate::protocol::POSITION_SCALE;
use crate::tracker::DetectedObject;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use itertools::Itertools;

const LABEL_OFFSET: i32 = 12;
const LABEL_LINE_SPACING: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
	Green,
	Red,
	Cyan,
	Orange,
	Fuchsia,
}

impl Color {
	pub fn rgb(self) -> Rgb<u8> {
		match self {
			Color::Green => Rgb([0, 128, 0]),
			Color::Red => Rgb([255, 0, 0]),
			Color::Cyan => Rgb([0, 255, 255]),
			Color::Orange => Rgb([255, 165, 0]),
			Color::Fuchsia => Rgb([255, 0, 255]),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
	Outline { points: Vec<Point>, color: Color },
	Rectangle { bounds: BoundingBox, color: Color },
	Marker { center: Point, radius: i32, color: Color },
	Label { origin: Point, lines: Vec<String>, line_spacing: i32, color: Color },
}

fn outline_color(kind: ShapeKind) -> Option<Color> {
	match kind {
		ShapeKind::Triangle => Some(Color::Green),
		ShapeKind::Square => Some(Color::Red),
		ShapeKind::Unclassified => None,
	}
}

/// The three label lines: area, then X and Y in controller units out of the
/// frame's extent in the same units.
pub fn label_lines(object: &DetectedObject, frame_width: u32, frame_height: u32) -> Vec<String> {
	let position = object.position();
	vec![
		format!("Area: {}", object.area),
		format!("X Pos: {} of {}", position.x, frame_width as i32 / POSITION_SCALE),
		format!("Y Pos: {} of {}", position.y, frame_height as i32 / POSITION_SCALE),
	]
}

fn centroid_marker(object: &DetectedObject) -> Annotation {
	Annotation::Marker {
		center: object.centroid,
		radius: 2,
		color: Color::Orange,
	}
}

/// Annotations for the source-frame view: outline and box for recognised
/// shapes, plus label and centroid for every detection.
pub fn mark(object: &DetectedObject, frame_width: u32, frame_height: u32) -> Vec<Annotation> {
	let mut out = Vec::with_capacity(4);
	if let Some(color) = outline_color(object.kind) {
		out.push(Annotation::Outline {
			points: object.contour.points().to_vec(),
			color,
		});
		out.push(Annotation::Rectangle {
			bounds: object.bounding_box,
			color: Color::Cyan,
		});
	}
	out.push(Annotation::Label {
		origin: Point::new(object.centroid.x, object.bounding_box.bottom() - LABEL_OFFSET),
		lines: label_lines(object, frame_width, frame_height),
		line_spacing: LABEL_LINE_SPACING,
		color: Color::Fuchsia,
	});
	out.push(centroid_marker(object));
	out
}

/// Annotations for the edge-image view: outline for recognised shapes and a
/// centroid for every detection.
pub fn decorate(object: &DetectedObject) -> Vec<Annotation> {
	let mut out = Vec::with_capacity(2);
	if let Some(color) = outline_color(object.kind) {
		out.push(Annotation::Outline {
			points: object.contour.points().to_vec(),
			color,
		});
	}
	out.push(centroid_marker(object));
	out
}

pub fn render(canvas: &mut RgbImage, annotations: &[Annotation]) {
	for annotation in annotations {
		match annotation {
			Annotation::Outline { points, color } => {
				if points.len() < 2 {
					continue;
				}
				for (a, b) in points.iter().circular_tuple_windows::<(_, _)>() {
					draw_line_segment_mut(canvas, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), color.rgb());
				}
			}
			Annotation::Rectangle { bounds, color } => {
				if bounds.width > 0 && bounds.height > 0 {
					let rect = Rect::at(bounds.x, bounds.y).of_size(bounds.width as u32, bounds.height as u32);
					draw_hollow_rect_mut(canvas, rect, color.rgb());
				}
			}
			Annotation::Marker { center, radius, color } => {
				draw_filled_circle_mut(canvas, (center.x, center.y), *radius, color.rgb());
			}
			// Labels are carried as data only.
			Annotation::Label { .. } => {}
		}
	}
}
