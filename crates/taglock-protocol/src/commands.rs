//! Command catalog for the VM-5F reader.
//!
//! One pure constructor per protocol operation. Constructors only produce
//! values — transmission belongs to the transport layer — and never fail:
//! every parameter that could be out of range is a validated type.
//!
//! All catalog constructors broadcast (`0xFF`), which is how the firmware
//! addresses a single reader on a point-to-point serial link. To target a
//! specific configured address, build the packet directly with
//! [`CommandPacket::new`].

use crate::frame::CommandPacket;
use serde::{Deserialize, Serialize};
use taglock_core::ReaderAddress;
use taglock_core::constants::BROADCAST_ADDRESS;

/// Command code bytes understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandCode {
    Reset = 0x70,
    SetBaudRate = 0x71,
    GetFirmwareVersion = 0x72,
    SetReaderAddress = 0x73,
    SetWorkingAntenna = 0x74,
    GetWorkingAntenna = 0x75,
    SetOutputPower = 0x76,
    GetOutputPower = 0x77,
    SetFrequencyRegion = 0x78,
    GetFrequencyRegion = 0x79,
    SetDrmMode = 0x7C,
    GetDrmMode = 0x7D,
    SetAntennaDetect = 0x62,
    GetAntennaDetect = 0x63,
    StartNamedInventory = 0x80,
    StartRealtimeInventory = 0x89,
}

impl CommandCode {
    /// The wire byte for this command.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Serial rate codes accepted by the set-baud-rate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BaudRate {
    Baud38400 = 0x03,
    /// 115200 bps, the rate the firmware configures at start-up.
    Baud115200 = 0x04,
}

impl BaudRate {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Spectrum regulation domains selectable via set-frequency-region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FrequencyRegion {
    Fcc = 0x01,
    /// ETSI band: channel 0x00 = 865.00 MHz through 0x06 = 868.00 MHz.
    Etsi = 0x02,
    Chn = 0x03,
}

impl FrequencyRegion {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Dense-reader-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DrmMode {
    Closed = 0x00,
    Open = 0x01,
}

impl DrmMode {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Antenna-detector connection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AntennaDetectMode {
    Disabled = 0x00,
    Enabled = 0x01,
}

impl AntennaDetectMode {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Reset the reader.
#[must_use]
pub fn reset() -> CommandPacket {
    CommandPacket::new(CommandCode::Reset.code(), &[], BROADCAST_ADDRESS)
}

/// Query the firmware version.
#[must_use]
pub fn get_firmware_version() -> CommandPacket {
    CommandPacket::new(CommandCode::GetFirmwareVersion.code(), &[], BROADCAST_ADDRESS)
}

/// Switch the serial link to a new rate.
#[must_use]
pub fn set_baud_rate(rate: BaudRate) -> CommandPacket {
    CommandPacket::new(
        CommandCode::SetBaudRate.code(),
        &[rate.code()],
        BROADCAST_ADDRESS,
    )
}

/// Configure the RF spectrum: regulation domain plus start/stop channel.
#[must_use]
pub fn set_frequency_region(
    region: FrequencyRegion,
    start_channel: u8,
    stop_channel: u8,
) -> CommandPacket {
    CommandPacket::new(
        CommandCode::SetFrequencyRegion.code(),
        &[region.code(), start_channel, stop_channel],
        BROADCAST_ADDRESS,
    )
}

/// Query the configured spectrum.
#[must_use]
pub fn get_frequency_region() -> CommandPacket {
    CommandPacket::new(CommandCode::GetFrequencyRegion.code(), &[], BROADCAST_ADDRESS)
}

/// Select the working antenna (0-based index).
#[must_use]
pub fn set_working_antenna(antenna: u8) -> CommandPacket {
    CommandPacket::new(
        CommandCode::SetWorkingAntenna.code(),
        &[antenna],
        BROADCAST_ADDRESS,
    )
}

/// Query the working antenna.
#[must_use]
pub fn get_working_antenna() -> CommandPacket {
    CommandPacket::new(CommandCode::GetWorkingAntenna.code(), &[], BROADCAST_ADDRESS)
}

/// Set RF output power. The code is the dBm value (0x14-0x21, 20-33 dBm).
#[must_use]
pub fn set_output_power(dbm_code: u8) -> CommandPacket {
    CommandPacket::new(
        CommandCode::SetOutputPower.code(),
        &[dbm_code],
        BROADCAST_ADDRESS,
    )
}

/// Query RF output power.
#[must_use]
pub fn get_output_power() -> CommandPacket {
    CommandPacket::new(CommandCode::GetOutputPower.code(), &[], BROADCAST_ADDRESS)
}

/// Switch dense reader mode on or off.
#[must_use]
pub fn set_drm_mode(mode: DrmMode) -> CommandPacket {
    CommandPacket::new(
        CommandCode::SetDrmMode.code(),
        &[mode.code()],
        BROADCAST_ADDRESS,
    )
}

/// Query dense reader mode.
#[must_use]
pub fn get_drm_mode() -> CommandPacket {
    CommandPacket::new(CommandCode::GetDrmMode.code(), &[], BROADCAST_ADDRESS)
}

/// Switch antenna-connection detection on or off.
#[must_use]
pub fn set_antenna_detect(mode: AntennaDetectMode) -> CommandPacket {
    CommandPacket::new(
        CommandCode::SetAntennaDetect.code(),
        &[mode.code()],
        BROADCAST_ADDRESS,
    )
}

/// Query antenna-connection detection.
#[must_use]
pub fn get_antenna_detect() -> CommandPacket {
    CommandPacket::new(CommandCode::GetAntennaDetect.code(), &[], BROADCAST_ADDRESS)
}

/// Assign the reader a bus address (0-254).
#[must_use]
pub fn set_reader_address(address: ReaderAddress) -> CommandPacket {
    CommandPacket::new(
        CommandCode::SetReaderAddress.code(),
        &[address.as_u8()],
        BROADCAST_ADDRESS,
    )
}

/// Start a real-time inventory round over `hop_channels` hopping channels.
///
/// Tag reports stream back as they are read; this is the poll command the
/// reader loop issues continuously.
#[must_use]
pub fn start_realtime_inventory(hop_channels: u8) -> CommandPacket {
    CommandPacket::new(
        CommandCode::StartRealtimeInventory.code(),
        &[hop_channels],
        BROADCAST_ADDRESS,
    )
}

/// Start a buffered ("named") inventory round.
#[must_use]
pub fn start_named_inventory(hop_channels: u8) -> CommandPacket {
    CommandPacket::new(
        CommandCode::StartNamedInventory.code(),
        &[hop_channels],
        BROADCAST_ADDRESS,
    )
}
