use serde::Deserialize;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LocatorError, Result};

pub const DEFAULT_SETTINGS_PATH: &str = "vset.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
	Camera,
	Images,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputSettings {
	pub source: SourceKind,
	pub device: i32,
	pub width: u32,
	pub height: u32,
	pub fps: u32,
	pub directory: PathBuf,
	pub resize_width: Option<u32>,
}

impl Default for InputSettings {
	fn default() -> Self {
		Self {
			source: SourceKind::Images,
			device: 1,
			width: 640,
			height: 480,
			fps: 30,
			directory: PathBuf::from("frames"),
			resize_width: None,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
	pub binary_cutoff: u8,
	pub blur_kernel: u32,
	pub canny_low: f32,
	pub canny_high: f32,
}

impl Default for ThresholdSettings {
	fn default() -> Self {
		Self {
			binary_cutoff: 125,
			blur_kernel: 9,
			canny_low: 150.,
			canny_high: 255.,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
	pub min_points: usize,
	pub max_area: f64,
	pub count_area_min: f64,
	pub count_area_max: f64,
}

impl Default for FilterSettings {
	fn default() -> Self {
		Self {
			min_points: 20,
			max_area: 5000.,
			count_area_min: 200.,
			count_area_max: 4500.,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
	pub port: String,
	pub baud_rate: u32,
	pub read_timeout_ms: u64,
	pub queue_depth: usize,
}

impl Default for OutputSettings {
	fn default() -> Self {
		Self {
			port: String::from("/dev/ttyACM0"),
			baud_rate: 115200,
			read_timeout_ms: 500,
			queue_depth: 16,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
	pub start_active: bool,
	pub snapshot_dir: Option<PathBuf>,
	pub snapshot_every: u64,
}

impl Default for DisplaySettings {
	fn default() -> Self {
		Self {
			start_active: false,
			snapshot_dir: None,
			snapshot_every: 30,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub input: InputSettings,
	pub threshold: ThresholdSettings,
	pub filter: FilterSettings,
	pub output: OutputSettings,
	pub display: DisplaySettings,
}

impl Settings {
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let content = fs::read_to_string(path.as_ref())?;
		Self::from_toml(&content)
	}

	pub fn from_toml(content: &str) -> Result<Self> {
		let settings: Settings = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	fn validate(&self) -> Result<()> {
		let kernel = self.threshold.blur_kernel;
		if kernel == 0 || kernel % 2 == 0 {
			return Err(LocatorError::Config(format!("threshold.blur_kernel must be odd and positive, got {}", kernel)));
		}
		if self.threshold.canny_low > self.threshold.canny_high {
			return Err(LocatorError::Config("threshold.canny_low exceeds threshold.canny_high".to_string()));
		}
		if self.filter.count_area_min >= self.filter.count_area_max {
			return Err(LocatorError::Config("filter.count_area_min must be below filter.count_area_max".to_string()));
		}
		if self.output.queue_depth == 0 {
			return Err(LocatorError::Config("output.queue_depth must be at least 1".to_string()));
		}
		if self.output.baud_rate == 0 {
			return Err(LocatorError::Config("output.baud_rate must be positive".to_string()));
		}
		if self.input.resize_width == Some(0) {
			return Err(LocatorError::Config("input.resize_width must be positive".to_string()));
		}
		Ok(())
	}
}
