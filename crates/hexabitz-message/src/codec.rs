//! Streaming frame decoder for bytes read off a serial link.
//!
//! Bytes arrive in arbitrary chunks. [`FrameCodec`] buffers them, hunts for
//! the `H Z` marker pair, reads the length byte and yields each complete frame
//! once its checksum verifies.
//!
//! Bytes that cannot start a frame are dropped on every [`FrameCodec::decode`]
//! call, so once `decode` returns `Ok(None)` the buffer holds at most one
//! partial frame. Complete frames are never dropped, however much is pushed
//! at once.
//!
//! A body longer than 255 bytes wraps the length byte, so such frames cannot
//! be delimited from the stream and will be reported as checksum failures.

use bytes::{Buf, Bytes, BytesMut};
use tracing::{trace, warn};

use crate::constants::*;
use crate::error::{FrameError, FrameResult};
use crate::frame::Frame;

/// Largest frame the length byte can delimit.
pub const MAX_DELIMITED_FRAME: usize = HEADER_LEN + u8::MAX as usize + CHECKSUM_LEN;

/// A codec that extracts frames from a byte stream.
#[derive(Debug, Default)]
pub struct FrameCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl FrameCodec {
    /// Create a new frame codec.
    pub fn new() -> Self {
        FrameCodec {
            buffer: BytesMut::with_capacity(MAX_DELIMITED_FRAME),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete frame from the buffer.
    ///
    /// Returns `Ok(Some(frame))` when a verified frame is available and
    /// `Ok(None)` when more data is needed. A candidate that fails
    /// verification is reported as `Err` after its first byte has been
    /// discarded, so calling again resumes the search at the next marker pair.
    pub fn decode(&mut self) -> FrameResult<Option<Bytes>> {
        self.sync();

        if self.buffer.len() < HEADER_LEN {
            return Ok(None);
        }

        let total = usize::from(self.buffer[OFFSET_LENGTH]) + HEADER_LEN + CHECKSUM_LEN;
        if total < MIN_FRAME_LEN {
            warn!(total, "length byte below minimum frame size, resyncing");
            self.buffer.advance(1);
            return Err(FrameError::FrameTooShort {
                expected: MIN_FRAME_LEN,
                actual: total,
            });
        }

        if self.buffer.len() < total {
            return Ok(None);
        }

        match Frame::verify(&self.buffer[..total]) {
            Ok(()) => {
                trace!(len = total, "frame received");
                Ok(Some(self.buffer.split_to(total).freeze()))
            }
            Err(err) => {
                warn!(%err, "discarding invalid frame candidate");
                self.buffer.advance(1);
                Err(err)
            }
        }
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Drop bytes ahead of the first marker pair.
    fn sync(&mut self) {
        match self.buffer.windows(2).position(|w| w == FRAME_MARKERS) {
            Some(0) => {}
            Some(start) => {
                trace!(skipped = start, "skipping bytes before frame marker");
                self.buffer.advance(start);
            }
            None => {
                // A trailing 'H' may be the first half of a split marker pair.
                let keep = usize::from(self.buffer.last() == Some(&FRAME_MARKER_H));
                let skipped = self.buffer.len() - keep;
                if skipped > 0 {
                    trace!(skipped, "no frame marker in buffer");
                    self.buffer.advance(skipped);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_frame;

    #[test]
    fn test_decode_single_frame() {
        let mut codec = FrameCodec::new();
        let frame = build_frame(2, 1, 0, 1, &[]);

        codec.push(frame.as_bytes());
        let decoded = codec.decode().unwrap().expect("should decode frame");
        assert_eq!(&decoded[..], frame.as_bytes());
        assert_eq!(codec.buffered_len(), 0);
        assert_eq!(codec.decode(), Ok(None));
    }

    #[test]
    fn test_decode_partial() {
        let mut codec = FrameCodec::new();
        let frame = build_frame(7, 1, 0, 0x0304, b"payload");
        let bytes = frame.as_bytes();

        codec.push(&bytes[..1]);
        assert_eq!(codec.decode(), Ok(None));
        codec.push(&bytes[1..5]);
        assert_eq!(codec.decode(), Ok(None));
        codec.push(&bytes[5..]);
        let decoded = codec.decode().unwrap().expect("should decode frame");
        assert_eq!(&decoded[..], bytes);
    }

    #[test]
    fn test_decode_multiple_with_garbage() {
        let mut codec = FrameCodec::new();
        let first = build_frame(2, 1, 0, 0x10, &[1]);
        let second = build_frame(3, 1, 0, 0x0210, &[2, 3]);

        codec.push(&[0x00, 0xFF, b'H']);
        codec.push(first.as_bytes());
        codec.push(&[0x5A, 0x13]);
        codec.push(second.as_bytes());

        let decoded = codec.decode().unwrap().expect("first frame");
        assert_eq!(&decoded[..], first.as_bytes());
        let decoded = codec.decode().unwrap().expect("second frame");
        assert_eq!(&decoded[..], second.as_bytes());
        assert_eq!(codec.decode(), Ok(None));
    }

    #[test]
    fn test_decode_resyncs_after_corruption() {
        let mut codec = FrameCodec::new();
        let mut corrupt = build_frame(2, 1, 0, 1, &[0xAA]).as_bytes().to_vec();
        let last = corrupt.len() - 1;
        corrupt[last] ^= 0xFF;
        let good = build_frame(4, 1, 0, 2, &[0xBB]);

        codec.push(&corrupt);
        codec.push(good.as_bytes());

        assert!(matches!(
            codec.decode(),
            Err(FrameError::ChecksumMismatch { .. })
        ));
        let decoded = codec.decode().unwrap().expect("good frame after resync");
        assert_eq!(&decoded[..], good.as_bytes());
    }

    #[test]
    fn test_decode_rejects_tiny_length() {
        let mut codec = FrameCodec::new();
        codec.push(&[0x48, 0x5A, 0x01, 0x00]);
        assert_eq!(
            codec.decode(),
            Err(FrameError::FrameTooShort {
                expected: MIN_FRAME_LEN,
                actual: 5
            })
        );
        assert_eq!(codec.decode(), Ok(None));
    }

    #[test]
    fn test_split_marker_is_kept() {
        let mut codec = FrameCodec::new();
        codec.push(&[0x01, 0x02, 0x48]);
        assert_eq!(codec.decode(), Ok(None));
        assert_eq!(codec.buffered_len(), 1);
    }

    #[test]
    fn test_large_push_keeps_every_frame() {
        let mut codec = FrameCodec::new();
        let frames: Vec<Bytes> = (0..200u8)
            .map(|i| build_frame(i, 1, 0, 0x10, &[i; 20]).into_bytes())
            .collect();
        let stream: Vec<u8> = frames.iter().flat_map(|f| f.to_vec()).collect();
        assert_eq!(stream.len(), 200 * 28);

        codec.push(&stream);
        let mut decoded = Vec::new();
        while let Some(frame) = codec.decode().expect("valid stream") {
            decoded.push(frame);
        }

        assert_eq!(decoded, frames);
        assert_eq!(codec.buffered_len(), 0);
    }

    #[test]
    fn test_junk_does_not_accumulate() {
        let mut codec = FrameCodec::new();
        codec.push(&vec![0x48; 5000]);
        assert_eq!(codec.decode(), Ok(None));
        assert_eq!(codec.buffered_len(), 1);

        // A partial frame behind junk is all that stays buffered.
        let frame = build_frame(2, 1, 0, 1, &[0x33; 200]);
        codec.push(&vec![0x00; 5000]);
        codec.push(&frame.as_bytes()[..100]);
        assert_eq!(codec.decode(), Ok(None));
        assert_eq!(codec.buffered_len(), 100);
        assert!(codec.buffered_len() < MAX_DELIMITED_FRAME);

        codec.push(&frame.as_bytes()[100..]);
        let decoded = codec.decode().unwrap().expect("frame after junk");
        assert_eq!(&decoded[..], frame.as_bytes());

        codec.clear();
        assert_eq!(codec.buffered_len(), 0);
    }
}
