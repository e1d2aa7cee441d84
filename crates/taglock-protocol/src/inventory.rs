//! Tag-inventory response decoding.
//!
//! Inventory replies reuse the common frame layout; what distinguishes a tag
//! report from a status/ack reply is the data length. Status replies carry at
//! most [`NO_TAG_DATA_THRESHOLD`] bytes, a tag report always carries more:
//!
//! ```text
//! data[0]      frequency-hop / antenna indicator
//! data[1..3]   PC bytes
//! data[3..15]  EPC (12 bytes)
//! data[15..]   vendor trailing data (RSSI/phase), uninterpreted
//! ```

use crate::frame::ResponseFrame;
use taglock_core::TagEvent;
use taglock_core::constants::{EPC_LENGTH, MIN_TAG_DATA_LEN, NO_TAG_DATA_THRESHOLD};
use tracing::debug;

/// Extract a tag detection from a decoded frame, if it carries one.
///
/// Returns `None` for status/ack replies (data length at or below the no-tag
/// threshold) and for frames above the threshold that are nonetheless too
/// short to hold a full EPC — truncated reports are logged and skipped, never
/// surfaced as errors.
#[must_use]
pub fn extract_tag(frame: &ResponseFrame) -> Option<TagEvent> {
    let data = &frame.data;

    if data.len() <= NO_TAG_DATA_THRESHOLD {
        return None;
    }
    if data.len() < MIN_TAG_DATA_LEN {
        debug!(
            command = format_args!("{:#04X}", frame.command),
            data_len = data.len(),
            "truncated tag report, skipping"
        );
        return None;
    }

    let mut epc = [0u8; EPC_LENGTH];
    epc.copy_from_slice(&data[3..3 + EPC_LENGTH]);

    Some(TagEvent::new(
        epc,
        data[0],
        [data[1], data[2]],
        data[MIN_TAG_DATA_LEN..].to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CommandPacket;

    fn inventory_frame(data: &[u8]) -> ResponseFrame {
        // A reader reply has the same wire shape as a host packet.
        let bytes = CommandPacket::new(0x89, data, 0x01).to_bytes();
        ResponseFrame::decode(&bytes).unwrap()
    }

    #[test]
    fn status_reply_is_not_a_tag() {
        let frame = inventory_frame(&[0u8; 10]);
        assert!(extract_tag(&frame).is_none());
    }

    #[test]
    fn minimal_tag_report_yields_event() {
        let mut data = vec![0u8; 15];
        data[0] = 0x01; // antenna/freq
        data[1] = 0x30; // PC hi
        data[2] = 0x00; // PC lo
        for (i, byte) in data[3..15].iter_mut().enumerate() {
            *byte = i as u8;
        }

        let event = extract_tag(&inventory_frame(&data)).unwrap();
        assert_eq!(event.freq_ant, 0x01);
        assert_eq!(event.pc, [0x30, 0x00]);
        assert_eq!(&event.epc[..], &data[3..15]);
        assert!(event.trailing.is_empty());
    }

    #[test]
    fn trailing_vendor_bytes_are_preserved() {
        let mut data = vec![0u8; 18];
        data[15] = 0xC8;
        data[16] = 0x01;
        data[17] = 0x7F;

        let event = extract_tag(&inventory_frame(&data)).unwrap();
        assert_eq!(event.trailing, vec![0xC8, 0x01, 0x7F]);
    }

    #[test]
    fn truncated_report_above_threshold_is_skipped() {
        for len in 11..15 {
            let frame = inventory_frame(&vec![0u8; len]);
            assert!(extract_tag(&frame).is_none(), "data length {len}");
        }
    }

    #[test]
    fn event_epc_matches_source_bytes() {
        let mut data = vec![0u8; 15];
        data[3..15].copy_from_slice(&[
            0xE2, 0x00, 0x00, 0x19, 0x06, 0x0C, 0x01, 0x66, 0x15, 0x10, 0x7E, 0x3F,
        ]);
        let event = extract_tag(&inventory_frame(&data)).unwrap();
        assert_eq!(event.epc_hex(), "E2000019060C016615107E3F");
    }
}
