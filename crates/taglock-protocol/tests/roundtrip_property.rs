//! Property-based tests for the frame codec.
//!
//! For every valid (command, payload, address) combination the encoded
//! packet must decode back to the same fields, and the checksum must follow
//! the reader's `(sum * 0xFF) & 0xFF` formula.

use proptest::prelude::*;
use taglock_core::constants::MAX_PAYLOAD_LEN;
use taglock_protocol::{CommandPacket, FrameBuffer, ResponseFrame, extract_tag};

/// Strategy for arbitrary command payloads within the frame limit.
fn any_payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_LEN)
}

proptest! {
    #[test]
    fn encode_decode_round_trip(
        command in any::<u8>(),
        payload in any_payload(),
        address in any::<u8>(),
    ) {
        let packet = CommandPacket::new(command, &payload, address);
        let bytes = packet.to_bytes();

        prop_assert_eq!(bytes.len(), payload.len() + 5);
        prop_assert_eq!(bytes[1] as usize, payload.len() + 3);

        let frame = ResponseFrame::decode(&bytes).unwrap();
        prop_assert_eq!(frame.head, 0xA0);
        prop_assert_eq!(frame.address, address);
        prop_assert_eq!(frame.command, command);
        prop_assert_eq!(&frame.data, &payload);
    }

    #[test]
    fn checksum_follows_reader_formula(
        command in any::<u8>(),
        payload in any_payload(),
        address in any::<u8>(),
    ) {
        let packet = CommandPacket::new(command, &payload, address);
        let bytes = packet.to_bytes();

        let sum: u32 = bytes[..bytes.len() - 1].iter().map(|&b| u32::from(b)).sum();
        let expected = ((sum * 0xFF) & 0xFF) as u8;
        prop_assert_eq!(bytes[bytes.len() - 1], expected);
    }

    #[test]
    fn frame_buffer_reassembles_any_split(
        payload in any_payload(),
        split in any::<prop::sample::Index>(),
    ) {
        let bytes = CommandPacket::new(0x89, &payload, 0x01).to_bytes();
        let at = split.index(bytes.len());

        let mut frames = FrameBuffer::new();
        frames.feed(&bytes[..at]);
        frames.feed(&bytes[at..]);

        let frame = frames.next_frame().unwrap();
        prop_assert_eq!(frame.command, 0x89);
        prop_assert_eq!(&frame.data, &payload);
    }

    #[test]
    fn tag_extraction_copies_epc(data in prop::collection::vec(any::<u8>(), 15..=26)) {
        let bytes = CommandPacket::new(0x89, &data, 0x01).to_bytes();
        let frame = ResponseFrame::decode(&bytes).unwrap();

        let event = extract_tag(&frame).unwrap();
        prop_assert_eq!(&event.epc[..], &data[3..15]);
        prop_assert_eq!(event.freq_ant, data[0]);
        prop_assert_eq!(event.pc, [data[1], data[2]]);
        prop_assert_eq!(&event.trailing, &data[15..]);
    }
}
