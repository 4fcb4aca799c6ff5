use crate::config::OutputSettings;
use crate::error::Result;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serialport::SerialPort;

use std::io::{self, BufReader, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{error, info, warn};

/// Both directions of an opened controller link.
pub struct SerialLink {
	pub reader: BufReader<Box<dyn SerialPort>>,
	pub writer: Box<dyn SerialPort>,
}

pub fn open(settings: &OutputSettings) -> Result<SerialLink> {
	let port = serialport::new(settings.port.as_str(), settings.baud_rate)
		.timeout(Duration::from_millis(settings.read_timeout_ms))
		.open()?;
	let reader = port.try_clone()?;
	info!(port = %settings.port, baud = settings.baud_rate, "serial link open");
	Ok(SerialLink {
		reader: BufReader::new(reader),
		writer: port,
	})
}

/// `Write` handle that never blocks the caller: each write is queued whole
/// for the writer thread, or refused with `WouldBlock` when the queue is full.
#[derive(Clone)]
pub struct QueuedWriter {
	tx: Sender<Vec<u8>>,
}

impl Write for QueuedWriter {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		match self.tx.try_send(buf.to_vec()) {
			Ok(()) => Ok(buf.len()),
			Err(TrySendError::Full(_)) => {
				warn!(len = buf.len(), "outbound queue full, frame dropped");
				Err(io::Error::new(io::ErrorKind::WouldBlock, "outbound queue full"))
			}
			Err(TrySendError::Disconnected(_)) => Err(io::Error::new(io::ErrorKind::BrokenPipe, "serial writer stopped")),
		}
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

pub fn queue(depth: usize) -> (QueuedWriter, Receiver<Vec<u8>>) {
	let (tx, rx) = bounded(depth);
	(QueuedWriter { tx }, rx)
}

/// Drains queued frames into `port` until every `QueuedWriter` is dropped.
pub fn spawn_writer<W: Write + Send + 'static>(mut port: W, rx: Receiver<Vec<u8>>) -> JoinHandle<()> {
	thread::spawn(move || {
		for frame in rx {
			if let Err(e) = port.write_all(&frame).and_then(|_| port.flush()) {
				error!("serial write failed: {}", e);
			}
		}
		info!("serial writer stopped");
	})
}
