use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
	#[error("config error: {0}")]
	Config(String),

	#[error("failed to parse settings: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("image error: {0}")]
	Image(#[from] image::ImageError),

	#[error("serial port error: {0}")]
	Serial(#[from] serialport::Error),

	#[error("camera error: {0}")]
	Camera(String),

	#[error("stream closed: {0}")]
	Stream(String),
}

#[cfg(feature = "camera")]
impl From<opencv::Error> for LocatorError {
	fn from(err: opencv::Error) -> Self {
		LocatorError::Camera(err.message)
	}
}

pub type Result<T> = std::result::Result<T, LocatorError>;
