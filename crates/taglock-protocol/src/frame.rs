//! Frame-level encoding and decoding.
//!
//! A [`CommandPacket`] is built once, immutable afterwards, and serialized
//! with [`CommandPacket::to_bytes`]. A [`ResponseFrame`] is parsed from a
//! caller-owned buffer with [`ResponseFrame::decode`]; every call returns a
//! fresh value, nothing is mutated in place.

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use taglock_core::constants::{FRAME_HEAD, LENGTH_FIELD_BASE, MAX_PAYLOAD_LEN, MIN_FRAME_LEN};
use thiserror::Error;

/// Errors produced while decoding an inbound frame.
///
/// All of these are non-fatal: the decode loop logs them, discards the
/// offending bytes, and resumes on the next read.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer bytes than the smallest possible frame.
    #[error("frame too short: got {0} bytes, need at least {MIN_FRAME_LEN}")]
    TooShort(usize),

    /// First byte is not the frame marker.
    #[error("bad frame header: expected {FRAME_HEAD:#04X}, got {0:#04X}")]
    BadHeader(u8),

    /// The declared length byte does not match the buffer received.
    #[error("length mismatch: length byte {declared:#04X} implies {expected} bytes, buffer has {actual}")]
    LengthMismatch {
        declared: u8,
        expected: usize,
        actual: usize,
    },

    /// Reported checksum differs from the recomputed one.
    ///
    /// Only produced by the opt-in [`ResponseFrame::verify_checksum`]; the
    /// decode path never rejects on checksum, matching the reader's observed
    /// behavior.
    #[error("checksum mismatch: computed {expected:#04X}, frame carries {actual:#04X}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

/// Checksum over the framed bytes (head, length, address, command, payload).
///
/// The reader's firmware computes `(sum * 0xFF) & 0xFF` — arithmetically the
/// negated 8-bit sum. Wire compatibility requires this exact formula; do not
/// substitute a conventional checksum.
#[must_use]
pub fn checksum(bytes: &[u8]) -> u8 {
    let sum: u32 = bytes.iter().map(|&b| u32::from(b)).sum();
    ((sum * 0xFF) & 0xFF) as u8
}

/// A host-to-reader command packet.
///
/// Constructed immediately before transmission and immutable afterwards;
/// the checksum is computed exactly once, at construction, so it can never
/// drift out of sync with the other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPacket {
    head: u8,
    length: u8,
    address: u8,
    command: u8,
    payload: Vec<u8>,
    checksum: u8,
}

impl CommandPacket {
    /// Build a packet for `command` with the given payload and target
    /// address.
    ///
    /// The length byte is `payload.len() + 3` (address + command + payload +
    /// checksum), matching the reader firmware for both payload-bearing
    /// commands and bare queries.
    pub fn new(command: u8, payload: &[u8], address: u8) -> Self {
        debug_assert!(
            payload.len() <= MAX_PAYLOAD_LEN,
            "payload must fit a single frame"
        );

        let length = LENGTH_FIELD_BASE + payload.len() as u8;

        let mut summed = BytesMut::with_capacity(4 + payload.len());
        summed.put_u8(FRAME_HEAD);
        summed.put_u8(length);
        summed.put_u8(address);
        summed.put_u8(command);
        summed.put_slice(payload);

        Self {
            head: FRAME_HEAD,
            length,
            address,
            command,
            payload: payload.to_vec(),
            checksum: checksum(&summed),
        }
    }

    /// Serialize to the wire image: `payload.len() + 5` bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.payload.len() + 5);
        buf.put_u8(self.head);
        buf.put_u8(self.length);
        buf.put_u8(self.address);
        buf.put_u8(self.command);
        buf.put_slice(&self.payload);
        buf.put_u8(self.checksum);
        buf.freeze()
    }

    /// Command code byte.
    #[must_use]
    pub fn command(&self) -> u8 {
        self.command
    }

    /// Target address byte (`0xFF` = broadcast).
    #[must_use]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Declared length byte.
    #[must_use]
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Trailing checksum byte.
    #[must_use]
    pub fn checksum_byte(&self) -> u8 {
        self.checksum
    }
}

impl fmt::Display for CommandPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CommandPacket[cmd={:#04X}, addr={:#04X}, payload={} bytes]",
            self.command,
            self.address,
            self.payload.len()
        )
    }
}

/// A reader-to-host frame: a command response or an inventory report.
///
/// Same layout as [`CommandPacket`] with a variable trailing data section
/// sized by the length byte (`data.len() == length - 3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    pub head: u8,
    pub length: u8,
    pub address: u8,
    pub command: u8,
    pub data: Vec<u8>,
    pub checksum: u8,
}

impl ResponseFrame {
    /// Parse one complete frame from `bytes`.
    ///
    /// The buffer must hold exactly the frame: `length + 2` bytes. The
    /// trailing checksum is captured but deliberately not verified here —
    /// the reader's host-side behavior is to deliver frames regardless, and
    /// callers that want strictness use [`verify_checksum`].
    ///
    /// # Errors
    /// - [`FrameError::TooShort`] for buffers under 5 bytes
    /// - [`FrameError::BadHeader`] when byte 0 is not `0xA0`
    /// - [`FrameError::LengthMismatch`] when the length byte disagrees with
    ///   the buffer
    ///
    /// [`verify_checksum`]: ResponseFrame::verify_checksum
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < MIN_FRAME_LEN {
            return Err(FrameError::TooShort(bytes.len()));
        }
        if bytes[0] != FRAME_HEAD {
            return Err(FrameError::BadHeader(bytes[0]));
        }

        let declared = bytes[1];
        let expected = declared as usize + 2;
        if expected != bytes.len() {
            return Err(FrameError::LengthMismatch {
                declared,
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            head: bytes[0],
            length: declared,
            address: bytes[2],
            command: bytes[3],
            data: bytes[4..bytes.len() - 1].to_vec(),
            checksum: bytes[bytes.len() - 1],
        })
    }

    /// Recompute the checksum this frame should carry.
    #[must_use]
    pub fn expected_checksum(&self) -> u8 {
        let mut summed = BytesMut::with_capacity(4 + self.data.len());
        summed.put_u8(self.head);
        summed.put_u8(self.length);
        summed.put_u8(self.address);
        summed.put_u8(self.command);
        summed.put_slice(&self.data);
        checksum(&summed)
    }

    /// Opt-in strict validation of the carried checksum.
    ///
    /// The stock receive path does not gate on this (the device's true
    /// checksum algorithm is unconfirmed against hardware); callers that
    /// enable it should treat a mismatch as a discard-and-resume condition
    /// like every other [`FrameError`].
    pub fn verify_checksum(&self) -> Result<(), FrameError> {
        let expected = self.expected_checksum();
        if expected == self.checksum {
            Ok(())
        } else {
            Err(FrameError::ChecksumMismatch {
                expected,
                actual: self.checksum,
            })
        }
    }
}

impl fmt::Display for ResponseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResponseFrame[cmd={:#04X}, addr={:#04X}, data={} bytes]",
            self.command,
            self.address,
            self.data.len()
        )
    }
}
