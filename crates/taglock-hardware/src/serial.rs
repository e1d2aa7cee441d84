//! Serial transport backed by the `serialport` crate.
//!
//! The VM-5F speaks 115200 8N1 with no flow control. Reads use the port's
//! blocking timeout; a timeout with no data is reported as a zero-length
//! read, matching the [`Transport`] contract.

use crate::{
    error::{HardwareError, Result},
    traits::Transport,
};
use serialport::SerialPort;
use std::io::{Read, Write};
use std::time::Duration;
use tracing::info;

/// Serial link to the reader.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialTransport {
    /// Open `path` at `baud`, 8 data bits, no parity, one stop bit.
    ///
    /// # Errors
    /// Returns [`HardwareError::InitializationFailed`] when the port cannot
    /// be opened or configured.
    pub fn open(path: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(path, baud)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(Duration::from_millis(1000))
            .open()
            .map_err(|e| HardwareError::initialization(format!("{path}: {e}")))?;

        info!(path, baud, "serial port open");

        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    /// Device path this transport was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Transport for SerialTransport {
    async fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let n = self.port.write(bytes)?;
        self.port.flush()?;
        Ok(n)
    }

    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        self.port
            .set_timeout(timeout)
            .map_err(|e| HardwareError::communication(e.to_string()))?;

        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // A quiet line is not a failure; the reader simply has nothing
            // to say between inventory rounds.
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}
