//! Mock serial transport.
//!
//! Reads are scripted through the handle; writes are recorded for later
//! assertion. An unscripted read returns zero bytes, which is exactly what
//! a serial read timeout looks like to the reader loop.

use crate::{
    error::{HardwareError, Result},
    traits::Transport,
};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;

/// One scripted outcome for a future `read` call.
#[derive(Debug, Clone)]
enum ScriptedRead {
    Chunk(Vec<u8>),
    Error(String),
}

/// Mock transport for driving the reader loop without hardware.
///
/// # Examples
///
/// ```
/// use taglock_hardware::mock::MockTransport;
/// use taglock_hardware::traits::Transport;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> taglock_hardware::Result<()> {
/// let (mut transport, handle) = MockTransport::new();
/// handle.push_chunk(vec![0xA0, 0x03, 0x01, 0x70, 0xEB]);
///
/// let mut buf = [0u8; 64];
/// let n = transport.read(&mut buf, Duration::from_millis(100)).await?;
/// assert_eq!(n, 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MockTransport {
    script_rx: mpsc::UnboundedReceiver<ScriptedRead>,
    /// Remainder of a scripted chunk larger than the caller's buffer.
    pending: Vec<u8>,
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockTransport {
    /// Create a mock transport plus its control handle.
    pub fn new() -> (Self, MockTransportHandle) {
        let (script_tx, script_rx) = mpsc::unbounded_channel();
        let writes = Arc::new(Mutex::new(Vec::new()));

        let transport = Self {
            script_rx,
            pending: Vec::new(),
            writes: Arc::clone(&writes),
        };
        let handle = MockTransportHandle { script_tx, writes };

        (transport, handle)
    }
}

impl Transport for MockTransport {
    async fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(bytes.to_vec());
        Ok(bytes.len())
    }

    async fn read(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        if self.pending.is_empty() {
            match self.script_rx.try_recv() {
                Ok(ScriptedRead::Chunk(chunk)) => self.pending = chunk,
                Ok(ScriptedRead::Error(message)) => {
                    return Err(HardwareError::communication(message));
                }
                Err(_) => return Ok(0),
            }
        }

        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

/// Control handle for a [`MockTransport`].
#[derive(Debug, Clone)]
pub struct MockTransportHandle {
    script_tx: mpsc::UnboundedSender<ScriptedRead>,
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockTransportHandle {
    /// Script the next read to deliver `bytes`.
    pub fn push_chunk(&self, bytes: Vec<u8>) {
        let _ = self.script_tx.send(ScriptedRead::Chunk(bytes));
    }

    /// Script the next read to fail with a communication error.
    pub fn push_error(&self, message: impl Into<String>) {
        let _ = self.script_tx.send(ScriptedRead::Error(message.into()));
    }

    /// All writes recorded so far, oldest first.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget recorded writes.
    pub fn clear_writes(&self) {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unscripted_read_returns_zero() {
        let (mut transport, _handle) = MockTransport::new();
        let mut buf = [0u8; 16];
        let n = transport
            .read(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn scripted_chunk_is_delivered() {
        let (mut transport, handle) = MockTransport::new();
        handle.push_chunk(vec![1, 2, 3]);

        let mut buf = [0u8; 16];
        let n = transport
            .read(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[1, 2, 3]);
    }

    #[tokio::test]
    async fn oversized_chunk_spans_reads() {
        let (mut transport, handle) = MockTransport::new();
        handle.push_chunk(vec![1, 2, 3, 4, 5]);

        let mut buf = [0u8; 3];
        let n = transport
            .read(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[1, 2, 3]);

        let n = transport
            .read(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[4, 5]);
    }

    #[tokio::test]
    async fn scripted_error_surfaces_once() {
        let (mut transport, handle) = MockTransport::new();
        handle.push_error("line noise");
        handle.push_chunk(vec![9]);

        let mut buf = [0u8; 16];
        assert!(
            transport
                .read(&mut buf, Duration::from_millis(10))
                .await
                .is_err()
        );
        let n = transport
            .read(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[9]);
    }

    #[tokio::test]
    async fn writes_are_recorded_in_order() {
        let (mut transport, handle) = MockTransport::new();
        transport.write(&[0xA0, 0x01]).await.unwrap();
        transport.write(&[0xA0, 0x02]).await.unwrap();

        assert_eq!(handle.writes(), vec![vec![0xA0, 0x01], vec![0xA0, 0x02]]);

        handle.clear_writes();
        assert!(handle.writes().is_empty());
    }
}
