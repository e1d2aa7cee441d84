use crate::{
    Result,
    constants::{EPC_LENGTH, MAX_READER_ADDRESS},
    error::Error,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a single reader on the serial bus (0-254).
///
/// `0xFF` is the broadcast address and is deliberately not representable
/// here: broadcast is a property of an outgoing packet, not an identity a
/// reader can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReaderAddress(u8);

impl ReaderAddress {
    /// Create a new reader address with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidReaderAddress` if the address is above 254.
    pub fn new(address: u8) -> Result<Self> {
        if address > MAX_READER_ADDRESS {
            return Err(Error::InvalidReaderAddress(address));
        }
        Ok(ReaderAddress(address))
    }

    /// Get the raw address as u8.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ReaderAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#04X}", self.0)
    }
}

impl TryFrom<u8> for ReaderAddress {
    type Error = Error;

    fn try_from(address: u8) -> Result<Self> {
        ReaderAddress::new(address)
    }
}

/// One tag detection reported by the reader.
///
/// The EPC is copied out of the receive buffer into an owned array before
/// the event crosses the channel to the lock controller; nothing in this
/// type borrows from transport memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEvent {
    /// Electronic Product Code of the detected tag.
    pub epc: [u8; EPC_LENGTH],

    /// Frequency-hop/antenna indicator byte reported with the detection.
    pub freq_ant: u8,

    /// Protocol-control bytes preceding the EPC.
    pub pc: [u8; 2],

    /// Trailing vendor data (RSSI/phase), not interpreted further.
    pub trailing: Vec<u8>,

    /// When the detection was decoded.
    pub timestamp: DateTime<Utc>,
}

impl TagEvent {
    /// Create a tag event stamped with the current time.
    pub fn new(epc: [u8; EPC_LENGTH], freq_ant: u8, pc: [u8; 2], trailing: Vec<u8>) -> Self {
        Self {
            epc,
            freq_ant,
            pc,
            trailing,
            timestamp: Utc::now(),
        }
    }

    /// Replace the timestamp, for replaying recorded detections in tests.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Get the EPC as an uppercase hexadecimal string.
    #[must_use]
    pub fn epc_hex(&self) -> String {
        self.epc
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join("")
    }
}

impl fmt::Display for TagEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TagEvent[epc={}, ant={:#04X}]", self.epc_hex(), self.freq_ant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(254)]
    fn reader_address_accepts_valid_range(#[case] address: u8) {
        assert_eq!(ReaderAddress::new(address).unwrap().as_u8(), address);
    }

    #[test]
    fn reader_address_rejects_broadcast() {
        assert!(ReaderAddress::new(0xFF).is_err());
    }

    #[test]
    fn tag_event_epc_hex() {
        let epc = [
            0xE2, 0x00, 0x00, 0x19, 0x06, 0x0C, 0x01, 0x66, 0x15, 0x10, 0x7E, 0x3F,
        ];
        let event = TagEvent::new(epc, 0x01, [0x30, 0x00], vec![]);
        assert_eq!(event.epc_hex(), "E2000019060C016615107E3F");
    }

    #[test]
    fn tag_event_owns_its_bytes() {
        let mut source = vec![0u8; 15];
        source[3] = 0xAA;
        let mut epc = [0u8; EPC_LENGTH];
        epc.copy_from_slice(&source[3..15]);
        let event = TagEvent::new(epc, source[0], [source[1], source[2]], vec![]);

        // Mutating the receive buffer must not reach the event.
        source[3] = 0x00;
        assert_eq!(event.epc[0], 0xAA);
    }

    #[test]
    fn tag_event_serializes() {
        let event = TagEvent::new([0x11; EPC_LENGTH], 0x02, [0x30, 0x00], vec![0xC8]);
        let json = serde_json::to_string(&event).unwrap();
        let back: TagEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
