use crate::error::{LocatorError, Result};
use crate::modules::input::fit_width;
use crate::modules::{Frame, InputModule};

use itertools::Itertools;

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Still images from a directory, replayed once in file-name order.
pub struct ImageSequenceInput {
	paths: VecDeque<PathBuf>,
	resize_width: Option<u32>,
}

impl InputModule for ImageSequenceInput {
	fn is_available(&self) -> bool {
		!self.paths.is_empty()
	}

	fn next_frame(&mut self) -> Result<Option<Frame>> {
		let path = match self.paths.pop_front() {
			Some(path) => path,
			None => return Ok(None),
		};
		debug!(path = %path.display(), "loading frame");
		let frame = image::open(&path)?.to_rgb8();
		Ok(Some(fit_width(frame, self.resize_width)))
	}
}

impl ImageSequenceInput {
	pub fn new(dir: impl AsRef<Path>, resize_width: Option<u32>) -> Result<Self> {
		let dir = dir.as_ref();
		if !dir.is_dir() {
			return Err(LocatorError::Config(format!("frame directory {} does not exist", dir.display())));
		}
		let mut paths = Vec::new();
		for entry in fs::read_dir(dir)? {
			let path = entry?.path();
			if is_image(&path) {
				paths.push(path);
			}
		}
		let paths = paths.into_iter().sorted().collect::<VecDeque<_>>();
		info!(count = paths.len(), dir = %dir.display(), "image sequence ready");
		Ok(Self { paths, resize_width })
	}

	pub fn remaining(&self) -> usize {
		self.paths.len()
	}
}

fn is_image(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.map(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
		.unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;

	use image::RgbImage;

	#[test]
	fn replays_images_in_name_order() {
		let dir = tempfile::tempdir().unwrap();
		RgbImage::new(20, 10).save(dir.path().join("b.png")).unwrap();
		RgbImage::new(40, 10).save(dir.path().join("a.png")).unwrap();
		fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

		let mut input = ImageSequenceInput::new(dir.path(), None).unwrap();
		assert_eq!(input.remaining(), 2);
		assert_eq!(input.next_frame().unwrap().unwrap().width(), 40);
		assert_eq!(input.next_frame().unwrap().unwrap().width(), 20);
		assert!(!input.is_available());
		assert!(input.next_frame().unwrap().is_none());
	}

	#[test]
	fn applies_resize() {
		let dir = tempfile::tempdir().unwrap();
		RgbImage::new(100, 50).save(dir.path().join("f.png")).unwrap();
		let mut input = ImageSequenceInput::new(dir.path(), Some(50)).unwrap();
		assert_eq!(input.next_frame().unwrap().unwrap().dimensions(), (50, 25));
	}

	#[test]
	fn missing_directory_is_config_error() {
		let err = ImageSequenceInput::new("/nonexistent/frames", None).err().unwrap();
		assert!(matches!(err, LocatorError::Config(_)));
	}
}
