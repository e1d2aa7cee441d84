//! Binary wire protocol of the VM-5F UHF RFID reader.
//!
//! Everything here is pure byte manipulation: building host command packets,
//! parsing reader responses, and extracting tag detections from inventory
//! replies. Transport (serial I/O) and actuation live in other crates.
//!
//! # Wire format
//!
//! ```text
//! [head][length][address][command][payload...][checksum]
//!  0xA0   n+3     0xFF      cmd     n bytes      1 byte
//! ```
//!
//! The `length` byte counts address + command + payload + checksum; a frame
//! occupies `length + 2` bytes on the wire. The checksum is the observed
//! `(sum * 0xFF) & 0xFF` over head, length, address, command, and payload —
//! an unconventional formula the physical reader expects, so it is
//! reproduced verbatim rather than replaced.

pub mod commands;
pub mod frame;
pub mod inventory;
pub mod stream;

pub use commands::{AntennaDetectMode, BaudRate, CommandCode, DrmMode, FrequencyRegion};
pub use frame::{CommandPacket, FrameError, ResponseFrame, checksum};
pub use inventory::extract_tag;
pub use stream::FrameBuffer;
