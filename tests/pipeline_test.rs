use shapelocator::classify::ShapeKind;
use shapelocator::config::{FilterSettings, ThresholdSettings};
use shapelocator::geometry::{Contour, Point};
use shapelocator::modules::input::FrameQueue;
use shapelocator::modules::output::{FlowControlMonitor, SkipReason, Transmission, Transmitter};
use shapelocator::modules::threshold::BinaryEdge;
use shapelocator::modules::{ExtractModule, ExtractedContours, Frame};
use shapelocator::pipeline::{Pipeline, Status};
use shapelocator::state::{FlowControlState, RunMode};
use shapelocator::tracker::Tracker;

use image::{GrayImage, Rgb};

use std::io::Cursor;
use std::sync::atomic::AtomicBool;

/// Hands back the same contours for every frame.
struct FixedContours {
	edges: Vec<Contour>,
	mask: Vec<Contour>,
}

impl ExtractModule for FixedContours {
	fn run(&mut self, frame: &Frame) -> ExtractedContours {
		ExtractedContours {
			edges: self.edges.clone(),
			mask: self.mask.clone(),
			edge_image: GrayImage::new(frame.width(), frame.height()),
		}
	}
}

// Rectangle outline with five points per side plus one extra point on the
// top edge: 21 points in all.
fn rect_contour(x: i32, y: i32, w: i32, h: i32) -> Contour {
	let corners = [Point::new(x, y), Point::new(x + w, y), Point::new(x + w, y + h), Point::new(x, y + h)];
	let mut points = Vec::new();
	for i in 0..4 {
		let a = corners[i];
		let b = corners[(i + 1) % 4];
		for step in 0..5 {
			points.push(Point::new(a.x + (b.x - a.x) * step / 5, a.y + (b.y - a.y) * step / 5));
		}
	}
	points.insert(1, Point::new(x + 5, y));
	Contour::new(points)
}

fn pipeline(edges: Vec<Contour>, active: bool, flow: FlowControlState) -> Pipeline<Vec<u8>> {
	let extractor = FixedContours {
		mask: edges.clone(),
		edges,
	};
	Pipeline::new(
		Box::new(extractor),
		Tracker::new(&FilterSettings::default()),
		Transmitter::new(Vec::new(), flow, RunMode::new(active)),
	)
}

#[test]
fn square_scenario_sends_exact_frame() {
	let contour = rect_contour(123, 63, 54, 54);
	assert_eq!(contour.len(), 21);
	assert_eq!(contour.area(), 2916.);

	let mut pipeline = pipeline(vec![contour], true, FlowControlState::new());
	let report = pipeline.cycle(Frame::new(320, 240));

	assert_eq!(report.detections.len(), 1);
	assert_eq!(report.detections[0].kind, ShapeKind::Square);
	assert_eq!(report.detections[0].centroid, Point::new(150, 90));
	assert_eq!(report.status, Status::On);
	assert_eq!(report.sent(), 1);
	assert_eq!(report.counts.squares, 1);
	assert_eq!(report.square_label(), "1 squares detected");
	assert_eq!(pipeline.transmitter().sink(), &vec![0x3C, 50, 30, 2, 0x3E]);
}

#[test]
fn oversized_contour_produces_nothing() {
	let contour = rect_contour(100, 60, 100, 60);
	assert_eq!(contour.area(), 6000.);

	let mut pipeline = pipeline(vec![contour], true, FlowControlState::new());
	let report = pipeline.cycle(Frame::new(320, 240));

	assert!(report.detections.is_empty());
	assert!(report.transmissions.is_empty());
	assert!(pipeline.transmitter().sink().is_empty());
}

#[test]
fn inactive_run_reports_off_and_stays_quiet() {
	let mut pipeline = pipeline(vec![rect_contour(123, 63, 54, 54)], false, FlowControlState::new());
	let report = pipeline.cycle(Frame::new(320, 240));

	assert_eq!(report.status, Status::Off);
	assert_eq!(report.transmissions, vec![Transmission::Skipped(SkipReason::Inactive)]);
	assert!(pipeline.transmitter().sink().is_empty());
}

#[test]
fn out_of_range_reports_error_and_writes_nothing() {
	// Centroid (200, 90) maps to x = 66.
	let mut pipeline = pipeline(vec![rect_contour(173, 63, 54, 54)], true, FlowControlState::new());
	let report = pipeline.cycle(Frame::new(320, 240));

	assert_eq!(report.status, Status::Error);
	assert!(matches!(report.transmissions.as_slice(), [Transmission::OutOfRange(_)]));
	assert!(pipeline.transmitter().sink().is_empty());
}

#[test]
fn controller_suspend_gates_sending() {
	let flow = FlowControlState::new();
	let mut pipeline = pipeline(vec![rect_contour(123, 63, 54, 54)], true, flow.clone());

	let shutdown = AtomicBool::new(false);
	FlowControlMonitor::new(Cursor::new(b"<S1>\n".to_vec()), flow.clone()).run(&shutdown).unwrap();
	let report = pipeline.cycle(Frame::new(320, 240));
	assert_eq!(report.transmissions, vec![Transmission::Skipped(SkipReason::Suspended)]);
	assert_eq!(report.status, Status::On);
	assert!(pipeline.transmitter().sink().is_empty());

	FlowControlMonitor::new(Cursor::new(b"<S0>\n".to_vec()), flow.clone()).run(&shutdown).unwrap();
	pipeline.cycle(Frame::new(320, 240));
	assert_eq!(pipeline.transmitter().sink().len(), 5);
}

#[test]
fn run_drains_source_and_publishes_reports() {
	let mut pipeline = pipeline(vec![rect_contour(123, 63, 54, 54)], true, FlowControlState::new());
	let mut input = FrameQueue::new(vec![Frame::new(320, 240), Frame::new(320, 240), Frame::new(320, 240)]);
	let (tx, rx) = crossbeam_channel::bounded(8);
	let shutdown = AtomicBool::new(false);

	let cycles = pipeline.run(&mut input, &tx, &shutdown).unwrap();

	assert_eq!(cycles, 3);
	let numbers = rx.try_iter().map(|r| r.frame_number).collect::<Vec<_>>();
	assert_eq!(numbers, vec![1, 2, 3]);
	assert_eq!(pipeline.transmitter().sink().len(), 15);
}

// Parallelogram with 60 and 120 degree corners, six points per side.
fn rhombus_contour(x: i32, y: i32) -> Contour {
	let corners = [Point::new(x, y), Point::new(x + 40, y), Point::new(x + 60, y + 35), Point::new(x + 20, y + 35)];
	let mut points = Vec::new();
	for i in 0..4 {
		let a = corners[i];
		let b = corners[(i + 1) % 4];
		for step in 0..6 {
			points.push(Point::new(a.x + (b.x - a.x) * step / 6, a.y + (b.y - a.y) * step / 6));
		}
	}
	Contour::new(points)
}

#[test]
fn unclassified_detection_is_skipped_by_transmitter() {
	let contour = rhombus_contour(100, 60);
	assert_eq!(contour.len(), 24);

	let mut pipeline = pipeline(vec![contour], true, FlowControlState::new());
	let report = pipeline.cycle(Frame::new(320, 240));

	assert_eq!(report.detections.len(), 1);
	assert_eq!(report.detections[0].kind, ShapeKind::Unclassified);
	assert_eq!(report.transmissions, vec![Transmission::Skipped(SkipReason::Unclassified)]);
	assert_eq!(report.status, Status::On);
	assert_eq!(report.sent(), 0);
	assert!(pipeline.transmitter().sink().is_empty());
}

fn bright_triangle() -> Frame {
	Frame::from_fn(200, 160, |x, y| {
		// Filled triangle with apex (100, 40) and base from (60, 110) to (140, 110).
		let (x, y) = (x as i32, y as i32);
		let inside = y <= 110 && y >= 40 && (x - 100).abs() * 70 <= (y - 40) * 40;
		if inside {
			Rgb([255, 255, 255])
		} else {
			Rgb([0, 0, 0])
		}
	})
}

fn binary_edge_pipeline(active: bool) -> Pipeline<Vec<u8>> {
	Pipeline::new(
		Box::new(BinaryEdge::new(&ThresholdSettings::default())),
		Tracker::new(&FilterSettings::default()),
		Transmitter::new(Vec::new(), FlowControlState::new(), RunMode::new(active)),
	)
}

#[test]
fn real_extractor_counts_bright_triangle() {
	let mut pipeline = binary_edge_pipeline(false);

	let report = pipeline.cycle(bright_triangle());

	assert_eq!(report.counts.triangles, 1);
	assert_eq!(report.counts.squares, 0);
	assert_eq!(report.triangle_label(), "1 triangles detected");
	assert_eq!(report.marked.dimensions(), (200, 160));
	assert_eq!(report.decorated.dimensions(), (200, 160));
}

#[test]
fn real_extractor_sends_bright_triangle() {
	let mut pipeline = binary_edge_pipeline(true);

	let report = pipeline.cycle(bright_triangle());

	// Canny traces both sides of the edge band, giving an outer and an inner border.
	assert_eq!(report.detections.len(), 2);
	for object in &report.detections {
		assert_eq!(object.kind, ShapeKind::Triangle);
		assert_eq!(object.centroid, Point::new(100, 77));
	}
	assert_eq!(report.status, Status::On);
	assert_eq!(report.sent(), 2);
	assert_eq!(pipeline.transmitter().sink(), &vec![b'<', 33, 25, 1, b'>', b'<', 33, 25, 1, b'>']);
}
