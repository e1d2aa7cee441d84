//! Frame accumulation over a chunked byte stream.
//!
//! Serial reads have no message boundaries: one `read` may return a partial
//! frame, several frames, or noise picked up before the reader settled. The
//! [`FrameBuffer`] buffers incoming chunks, scans to the `0xA0` frame marker
//! (discarding garbage), and uses the length byte to split off complete
//! frames for decoding.
//!
//! ```
//! use taglock_protocol::FrameBuffer;
//!
//! let mut frames = FrameBuffer::new();
//! frames.feed(&[0xA0, 0x04, 0xFF]);          // partial
//! assert!(frames.next_frame().is_none());
//! frames.feed(&[0x74, 0x00, 0xEF]);          // remainder
//! let frame = frames.next_frame().unwrap();
//! assert_eq!(frame.command, 0x74);
//! ```

use crate::frame::ResponseFrame;
use bytes::{Buf, BytesMut};
use std::collections::VecDeque;
use taglock_core::constants::{FRAME_HEAD, MAX_RESPONSE_DATA_LEN, MIN_FRAME_LEN};
use tracing::debug;

/// Largest wire frame the reader can emit: full data section plus framing.
const MAX_WIRE_FRAME: usize = MAX_RESPONSE_DATA_LEN + 5;

/// Upper bound on buffered bytes; a stream that accumulates this much
/// without yielding a frame is desynchronized and gets reset.
const MAX_BUFFER_SIZE: usize = 1024;

/// Stateful accumulator turning raw read chunks into [`ResponseFrame`]s.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: BytesMut,
    frames: VecDeque<ResponseFrame>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(MAX_WIRE_FRAME * 2),
            frames: VecDeque::new(),
        }
    }

    /// Append bytes from the transport and extract any completed frames.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
        self.extract();

        if self.buffer.len() > MAX_BUFFER_SIZE {
            debug!(
                buffered = self.buffer.len(),
                "frame buffer overflow, resynchronizing"
            );
            self.buffer.clear();
        }
    }

    /// Pop the oldest completed frame, if any.
    pub fn next_frame(&mut self) -> Option<ResponseFrame> {
        self.frames.pop_front()
    }

    /// Number of completed frames waiting to be popped.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.frames.len()
    }

    fn extract(&mut self) {
        loop {
            // Discard anything ahead of the frame marker.
            match self.buffer.iter().position(|&b| b == FRAME_HEAD) {
                Some(0) => {}
                Some(pos) => self.buffer.advance(pos),
                None => {
                    self.buffer.clear();
                    return;
                }
            }

            if self.buffer.len() < 2 {
                return;
            }

            let total = self.buffer[1] as usize + 2;
            if !(MIN_FRAME_LEN..=MAX_WIRE_FRAME).contains(&total) {
                // The marker was noise, not a frame start. Skip it and rescan.
                self.buffer.advance(1);
                continue;
            }

            if self.buffer.len() < total {
                return;
            }

            let frame_bytes = self.buffer.split_to(total);
            match ResponseFrame::decode(&frame_bytes) {
                Ok(frame) => self.frames.push_back(frame),
                Err(error) => debug!(%error, "discarding undecodable frame"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CommandPacket;

    #[test]
    fn assembles_frame_across_partial_feeds() {
        let mut frames = FrameBuffer::new();

        frames.feed(&[0xA0, 0x04]);
        assert!(frames.next_frame().is_none());
        frames.feed(&[0xFF, 0x74]);
        assert!(frames.next_frame().is_none());
        frames.feed(&[0x00, 0xEF]);

        let frame = frames.next_frame().unwrap();
        assert_eq!(frame.command, 0x74);
        assert_eq!(frame.data, vec![0x00]);
    }

    #[test]
    fn discards_garbage_before_head() {
        let mut frames = FrameBuffer::new();
        frames.feed(&[0x00, 0x13, 0x37, 0xA0, 0x03, 0xFF, 0x70, 0xEE]);

        let frame = frames.next_frame().unwrap();
        assert_eq!(frame.command, 0x70);
        assert!(frames.next_frame().is_none());
    }

    #[test]
    fn extracts_two_frames_from_one_chunk() {
        let mut chunk = Vec::new();
        chunk.extend_from_slice(&CommandPacket::new(0x74, &[0x10], 0x01).to_bytes());
        chunk.extend_from_slice(&CommandPacket::new(0x89, &[0u8; 15], 0x01).to_bytes());

        let mut frames = FrameBuffer::new();
        frames.feed(&chunk);

        assert_eq!(frames.pending(), 2);
        assert_eq!(frames.next_frame().unwrap().command, 0x74);
        assert_eq!(frames.next_frame().unwrap().command, 0x89);
    }

    #[test]
    fn spurious_marker_with_bogus_length_is_skipped() {
        let mut frames = FrameBuffer::new();
        // 0xA0 followed by an impossible length byte, then a real frame.
        frames.feed(&[0xA0, 0xFE]);
        frames.feed(&[0xA0, 0x03, 0xFF, 0x70, 0xEE]);

        let frame = frames.next_frame().unwrap();
        assert_eq!(frame.command, 0x70);
    }

    #[test]
    fn pure_noise_leaves_buffer_empty() {
        let mut frames = FrameBuffer::new();
        frames.feed(&[0x01, 0x02, 0x03]);
        assert!(frames.next_frame().is_none());
        assert_eq!(frames.pending(), 0);
    }
}
