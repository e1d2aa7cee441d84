//! Wire images of every catalog command.
//!
//! Expected bytes are computed by hand against the reader's framing rules;
//! the set-working-antenna image additionally matches a capture from the
//! physical reader. Any change here is a wire-compatibility break.

use rstest::rstest;
use taglock_core::ReaderAddress;
use taglock_protocol::commands::{
    self, AntennaDetectMode, BaudRate, DrmMode, FrequencyRegion,
};
use taglock_protocol::{CommandPacket, ResponseFrame};

#[rstest]
#[case::reset(commands::reset(), vec![0xA0, 0x03, 0xFF, 0x70, 0xEE])]
#[case::get_firmware(commands::get_firmware_version(), vec![0xA0, 0x03, 0xFF, 0x72, 0xEC])]
#[case::set_baud(
    commands::set_baud_rate(BaudRate::Baud115200),
    vec![0xA0, 0x04, 0xFF, 0x71, 0x04, 0xE8]
)]
#[case::set_region(
    commands::set_frequency_region(FrequencyRegion::Etsi, 0x00, 0x06),
    vec![0xA0, 0x06, 0xFF, 0x78, 0x02, 0x00, 0x06, 0xDB]
)]
#[case::get_region(commands::get_frequency_region(), vec![0xA0, 0x03, 0xFF, 0x79, 0xE5])]
#[case::set_antenna(commands::set_working_antenna(0x00), vec![0xA0, 0x04, 0xFF, 0x74, 0x00, 0xEF])]
#[case::get_antenna(commands::get_working_antenna(), vec![0xA0, 0x03, 0xFF, 0x75, 0xE9])]
#[case::set_power(commands::set_output_power(0x1A), vec![0xA0, 0x04, 0xFF, 0x76, 0x1A, 0xCD])]
#[case::get_power(commands::get_output_power(), vec![0xA0, 0x03, 0xFF, 0x77, 0xE7])]
#[case::set_drm(commands::set_drm_mode(DrmMode::Open), vec![0xA0, 0x04, 0xFF, 0x7C, 0x01, 0xE0])]
#[case::get_drm(commands::get_drm_mode(), vec![0xA0, 0x03, 0xFF, 0x7D, 0xE1])]
#[case::set_ant_detect(
    commands::set_antenna_detect(AntennaDetectMode::Enabled),
    vec![0xA0, 0x04, 0xFF, 0x62, 0x01, 0xFA]
)]
#[case::get_ant_detect(commands::get_antenna_detect(), vec![0xA0, 0x03, 0xFF, 0x63, 0xFB])]
#[case::set_address(
    commands::set_reader_address(ReaderAddress::new(0).unwrap()),
    vec![0xA0, 0x04, 0xFF, 0x73, 0x00, 0xEA]
)]
#[case::realtime_inventory(
    commands::start_realtime_inventory(0x01),
    vec![0xA0, 0x04, 0xFF, 0x89, 0x01, 0xD3]
)]
#[case::named_inventory(
    commands::start_named_inventory(0x01),
    vec![0xA0, 0x04, 0xFF, 0x80, 0x01, 0xDC]
)]
fn catalog_produces_expected_wire_bytes(#[case] packet: CommandPacket, #[case] expected: Vec<u8>) {
    assert_eq!(packet.to_bytes().as_ref(), expected.as_slice());
}

#[rstest]
#[case::reset(commands::reset())]
#[case::set_region(commands::set_frequency_region(FrequencyRegion::Fcc, 0x07, 0x3B))]
#[case::realtime_inventory(commands::start_realtime_inventory(0x04))]
fn catalog_packets_decode_back(#[case] packet: CommandPacket) {
    let frame = ResponseFrame::decode(&packet.to_bytes()).unwrap();
    assert_eq!(frame.command, packet.command());
    assert_eq!(frame.address, packet.address());
    assert_eq!(frame.data.as_slice(), packet.payload());
    assert!(frame.verify_checksum().is_ok());
}
