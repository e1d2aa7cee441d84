//! Daemon configuration.
//!
//! Wiring facts that are deployment-specific and outside the core model:
//! serial port path and rate, GPIO pin numbers, and the re-lock hold time.
//! Loaded from a JSON file; every field has a default matching the
//! reference installation, so a partial (or absent) file is fine.

use serde::Deserialize;
use std::path::Path;
use taglock_core::constants::{DEFAULT_BAUD_RATE, RELOCK_DELAY_MS};
use taglock_core::{Error, Result};
use taglock_reader::ReaderSettings;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub serial: SerialConfig,
    pub pins: PinConfig,
    /// Delay between the override press and re-securing the relay.
    pub relock_delay_ms: u64,
    pub reader: ReaderSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud: u32,
}

/// GPIO numbers from the installation wiring plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    /// Enable pin powering the UHF reader.
    pub reader_enable: u8,
    /// Relay driving the electromagnetic lock (active-low).
    pub relay: u8,
    /// STOP switch input (pull-up, active-low).
    pub override_input: u8,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            pins: PinConfig::default(),
            relock_delay_ms: RELOCK_DELAY_MS,
            reader: ReaderSettings::default(),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud: DEFAULT_BAUD_RATE,
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            reader_enable: 5,
            relay: 18,
            override_input: 19,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    /// Returns `Error::Io` when the file cannot be read and `Error::Config`
    /// when it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}
