use crate::error::Result;
use crate::modules::DisplayModule;
use crate::pipeline::{CycleReport, Status};

use crossbeam_channel::Receiver;

use std::fs;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use tracing::{error, info};

/// Logs the count labels and status whenever they change.
#[derive(Default)]
pub struct LogDisplay {
	last: Option<(usize, usize, Status)>,
}

impl DisplayModule for LogDisplay {
	fn show(&mut self, report: &CycleReport) -> Result<()> {
		let current = (report.counts.triangles, report.counts.squares, report.status);
		if self.last != Some(current) {
			info!(
				frame = report.frame_number,
				status = %report.status,
				"{}, {}",
				report.triangle_label(),
				report.square_label()
			);
			self.last = Some(current);
		}
		Ok(())
	}
}

/// Writes the marked and decorated views to disk every `every` cycles.
pub struct SnapshotDisplay {
	dir: PathBuf,
	every: u64,
}

impl DisplayModule for SnapshotDisplay {
	fn show(&mut self, report: &CycleReport) -> Result<()> {
		if report.frame_number % self.every != 0 {
			return Ok(());
		}
		report.marked.save(self.dir.join(format!("marked_{:06}.png", report.frame_number)))?;
		report.decorated.save(self.dir.join(format!("decorated_{:06}.png", report.frame_number)))?;
		Ok(())
	}
}

impl SnapshotDisplay {
	pub fn new(dir: PathBuf, every: u64) -> Result<Self> {
		fs::create_dir_all(&dir)?;
		Ok(Self { dir, every: every.max(1) })
	}
}

pub fn spawn_display(rx: Receiver<CycleReport>, mut modules: Vec<Box<dyn DisplayModule + Send>>) -> JoinHandle<()> {
	thread::spawn(move || {
		for report in rx {
			for module in modules.iter_mut() {
				if let Err(e) = module.show(&report) {
					error!("display failed: {}", e);
				}
			}
		}
	})
}
