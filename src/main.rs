use shapelocator::config::{Settings, SourceKind, DEFAULT_SETTINGS_PATH};
use shapelocator::modules::input::ImageSequenceInput;
use shapelocator::modules::output::{serial, spawn_display, FlowControlMonitor, LogDisplay, QueuedWriter, SnapshotDisplay, Transmitter};
use shapelocator::modules::threshold::BinaryEdge;
use shapelocator::modules::DisplayModule;
use shapelocator::pipeline::{CycleReport, Pipeline};
use shapelocator::state::{FlowControlState, RunMode};
use shapelocator::tracker::Tracker;

use anyhow::{Context, Result};
use crossbeam_channel::Sender;

use std::env;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::{error, info, warn, Level};

// Main
fn main() -> Result<()> {
	tracing_subscriber::fmt().with_max_level(Level::INFO).init();

	//Load Vision Settings
	let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
	let settings = Settings::load(&path).with_context(|| format!("failed to load settings from {}", path))?;

	let flow = FlowControlState::new();
	let run_mode = RunMode::new(settings.display.start_active);
	let shutdown = Arc::new(AtomicBool::new(false));

	//Serial Link
	let link = serial::open(&settings.output).with_context(|| format!("error initializing serial port {}", settings.output.port))?;
	let (queued, frames) = serial::queue(settings.output.queue_depth);
	let writer = serial::spawn_writer(link.writer, frames);

	let monitor = FlowControlMonitor::new(link.reader, flow.clone());
	let monitor_shutdown = shutdown.clone();
	let monitor = thread::spawn(move || monitor.run(&monitor_shutdown));

	//Display
	let mut displays: Vec<Box<dyn DisplayModule + Send>> = vec![Box::new(LogDisplay::default())];
	if let Some(dir) = &settings.display.snapshot_dir {
		displays.push(Box::new(SnapshotDisplay::new(dir.clone(), settings.display.snapshot_every)?));
	}
	let (reports, report_rx) = crossbeam_channel::bounded(2);
	let display = spawn_display(report_rx, displays);

	spawn_control(run_mode.clone(), shutdown.clone());

	let mut pipeline = Pipeline::new(
		Box::new(BinaryEdge::new(&settings.threshold)),
		Tracker::new(&settings.filter),
		Transmitter::new(queued, flow, run_mode),
	);

	//Main Vision Loop
	let result = run_source(&settings, &mut pipeline, &reports, &shutdown);

	shutdown.store(true, Ordering::Release);
	drop(reports);
	drop(pipeline);
	if display.join().is_err() {
		error!("display thread panicked");
	}
	if writer.join().is_err() {
		error!("serial writer thread panicked");
	}
	match monitor.join() {
		Ok(Ok(())) => {}
		Ok(Err(e)) => warn!("flow control monitor ended with error: {}", e),
		Err(_) => error!("flow control monitor panicked"),
	}

	let cycles = result?;
	info!(cycles, "shut down");
	Ok(())
}

fn run_source(settings: &Settings, pipeline: &mut Pipeline<QueuedWriter>, reports: &Sender<CycleReport>, shutdown: &AtomicBool) -> Result<u64> {
	match settings.input.source {
		SourceKind::Images => {
			let mut input = ImageSequenceInput::new(&settings.input.directory, settings.input.resize_width)
				.context("failed to open frame directory")?;
			Ok(pipeline.run(&mut input, reports, shutdown)?)
		}
		SourceKind::Camera => run_camera(settings, pipeline, reports, shutdown),
	}
}

#[cfg(feature = "camera")]
fn run_camera(settings: &Settings, pipeline: &mut Pipeline<QueuedWriter>, reports: &Sender<CycleReport>, shutdown: &AtomicBool) -> Result<u64> {
	use shapelocator::modules::input::CameraInput;

	let mut input = CameraInput::new(&settings.input).context("failed to open camera")?;
	Ok(pipeline.run(&mut input, reports, shutdown)?)
}

#[cfg(not(feature = "camera"))]
fn run_camera(_settings: &Settings, _pipeline: &mut Pipeline<QueuedWriter>, _reports: &Sender<CycleReport>, _shutdown: &AtomicBool) -> Result<u64> {
	anyhow::bail!("camera input requires building with `--features camera`")
}

// Operator console standing in for the start button.
fn spawn_control(run_mode: RunMode, shutdown: Arc<AtomicBool>) {
	thread::spawn(move || {
		for line in io::stdin().lock().lines() {
			let Ok(line) = line else { break };
			match line.trim() {
				"start" => {
					run_mode.set_active(true);
					info!("transmission started");
				}
				"stop" => {
					run_mode.set_active(false);
					info!("transmission stopped");
				}
				"quit" => {
					shutdown.store(true, Ordering::Release);
					break;
				}
				"" => {}
				other => warn!("unknown command {:?}, expected start, stop or quit", other),
			}
		}
	});
}
