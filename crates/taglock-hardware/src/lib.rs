//! Hardware abstraction layer for the taglock access controller.
//!
//! This crate defines the three device seams the core logic runs against —
//! the serial [`Transport`] to the UHF reader, the relay [`OutputPin`], and
//! the override [`InputPin`] — together with mock implementations for
//! development and testing, and a `serialport`-backed transport behind the
//! `hardware-serial` feature.
//!
//! All traits use native `async fn` methods (Edition 2024 RPITIT), so no
//! `async_trait` macro is involved. Devices are owned exclusively by the
//! loop that drives them; only the override input is readable through a
//! shared reference.

pub mod error;
pub mod mock;
#[cfg(feature = "hardware-serial")]
pub mod serial;
pub mod traits;

pub use error::{HardwareError, Result};
#[cfg(feature = "hardware-serial")]
pub use serial::SerialTransport;
pub use traits::{InputPin, OutputPin, Transport};
