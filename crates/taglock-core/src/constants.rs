//! Protocol and timing constants shared across the taglock workspace.
//!
//! The wire constants describe the VM-5F reader's binary framing:
//!
//! ```text
//! [head][length][address][command][payload...][checksum]
//!  0xA0   n+3     0xFF      cmd     n bytes      1 byte
//! ```
//!
//! The `length` byte counts address + command + payload + checksum, so a
//! complete frame occupies `length + 2` bytes on the wire. These values must
//! match the physical reader exactly; changing them breaks compatibility.

// ============================================================================
// Wire framing
// ============================================================================

/// Frame marker byte opening every packet in both directions.
pub const FRAME_HEAD: u8 = 0xA0;

/// Wire address that targets every reader on the bus.
///
/// Individual readers answer to their configured address (0-254); `0xFF`
/// is reserved for broadcast and is what the original firmware uses for
/// all host commands.
pub const BROADCAST_ADDRESS: u8 = 0xFF;

/// Highest address assignable to a reader via the set-address command.
pub const MAX_READER_ADDRESS: u8 = 254;

/// Number of framing bytes around the payload: head, length, address,
/// command, and trailing checksum.
pub const FRAME_OVERHEAD: usize = 5;

/// Smallest parseable frame (all framing bytes, empty payload).
pub const MIN_FRAME_LEN: usize = FRAME_OVERHEAD;

/// Maximum command payload carried in one packet.
pub const MAX_PAYLOAD_LEN: usize = 26;

/// Maximum data section of a response frame.
pub const MAX_RESPONSE_DATA_LEN: usize = 27;

/// Value of the `length` byte for a frame with `n` payload bytes.
///
/// The reader counts address + command + payload + checksum, never the
/// head or the length byte itself.
pub const LENGTH_FIELD_BASE: u8 = 3;

// ============================================================================
// Inventory payload layout
// ============================================================================

/// Bytes of EPC identifier reported per tag.
pub const EPC_LENGTH: usize = 12;

/// Largest response data length that still means "no tag in field".
///
/// Status and ack replies carry at most 10 data bytes; anything longer is
/// a tag report.
pub const NO_TAG_DATA_THRESHOLD: usize = 10;

/// Minimum data length of a well-formed tag report:
/// frequency/antenna byte + 2 PC bytes + 12 EPC bytes.
pub const MIN_TAG_DATA_LEN: usize = EPC_LENGTH + 3;

// ============================================================================
// Timing
// ============================================================================

/// Delay before the relay is returned to its secured level once the
/// override has been pressed (milliseconds).
pub const RELOCK_DELAY_MS: u64 = 4000;

/// Period of the override-input poll inside the lock controller
/// (milliseconds).
pub const OVERRIDE_POLL_INTERVAL_MS: u64 = 100;

/// Pacing between consecutive commands in the reader loop (milliseconds).
pub const COMMAND_PACING_MS: u64 = 100;

/// Serial read timeout used by the reader loop (milliseconds). A timeout
/// with zero bytes is "no frame available", not an error.
pub const READ_TIMEOUT_MS: u64 = 1000;

// ============================================================================
// Pipeline
// ============================================================================

/// Capacity of the tag-event channel between reader loop and lock
/// controller. A full channel suspends the producer until the controller
/// drains an event; nothing is dropped.
pub const EVENT_CHANNEL_CAPACITY: usize = 10;

/// Serial line rate of the VM-5F after configuration (bits per second).
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
