//! Reader configuration applied during the start-up sequence.

use serde::{Deserialize, Serialize};
use taglock_protocol::{AntennaDetectMode, BaudRate, DrmMode, FrequencyRegion};

/// RF and link settings pushed to the reader before inventory starts.
///
/// The defaults reproduce the deployed installation: ETSI spectrum from
/// 865.00 MHz (channel 0x00) to 868.00 MHz (channel 0x06), 115200 bps,
/// DRM open, antenna detection on, antenna 1, 26 dBm, one hopping channel
/// per inventory round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Spectrum regulation domain.
    pub region: FrequencyRegion,

    /// First frequency channel of the scan range.
    pub start_channel: u8,

    /// Last frequency channel of the scan range.
    pub stop_channel: u8,

    /// Serial rate to configure on the reader.
    pub baud_rate: BaudRate,

    /// Dense-reader-mode flag.
    pub drm: DrmMode,

    /// Antenna-connection detection flag.
    pub antenna_detect: AntennaDetectMode,

    /// Working antenna index (0 = antenna 1).
    pub antenna: u8,

    /// RF output power code (dBm value, 0x14-0x21).
    pub power: u8,

    /// Frequency-hopping channels per inventory round.
    pub hop_channels: u8,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            region: FrequencyRegion::Etsi,
            start_channel: 0x00,
            stop_channel: 0x06,
            baud_rate: BaudRate::Baud115200,
            drm: DrmMode::Open,
            antenna_detect: AntennaDetectMode::Enabled,
            antenna: 0x00,
            power: 0x1A,
            hop_channels: 0x01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_installed_reader() {
        let settings = ReaderSettings::default();
        assert_eq!(settings.region, FrequencyRegion::Etsi);
        assert_eq!(settings.stop_channel, 0x06);
        assert_eq!(settings.power, 0x1A);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: ReaderSettings = serde_json::from_str(r#"{"antenna": 1}"#).unwrap();
        assert_eq!(settings.antenna, 1);
        assert_eq!(settings.baud_rate, BaudRate::Baud115200);
    }
}
