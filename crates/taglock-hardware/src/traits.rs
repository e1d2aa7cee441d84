//! Device trait definitions.
//!
//! These traits are the contract between the taglock core loops and the
//! physical world: a byte transport to the reader and two digital I/O pins.
//! Pin identities (which GPIO is the relay, which is the override switch)
//! are wiring configuration held by the daemon, not part of these types.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use std::time::Duration;

/// Byte transport to the UHF reader (a serial link in production).
///
/// Owned exclusively by the reader loop; implementations need `Send` but
/// not `Sync`.
pub trait Transport: Send {
    /// Write raw bytes, returning how many were accepted.
    async fn write(&mut self, bytes: &[u8]) -> Result<usize>;

    /// Read available bytes into `buf`, waiting at most `timeout`.
    ///
    /// A successful zero-length read means "no frame available" and is the
    /// expected steady state between inventory replies — it is never an
    /// error.
    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;
}

/// A digital output (relay driver, reader enable).
pub trait OutputPin: Send {
    /// Drive the pin high (`true`) or low (`false`).
    async fn set_level(&mut self, level: bool) -> Result<()>;
}

/// A digital input (override switch).
///
/// Readable through a shared reference so a supervisor can observe the same
/// pin the controller polls.
pub trait InputPin: Send + Sync {
    /// Sample the current level: high (`true`) or low (`false`).
    async fn read_level(&self) -> Result<bool>;
}
