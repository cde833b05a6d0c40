//! Array-message frame construction and verification.
//!
//! ```text
//! +----+----+-----+------+-----+------+--------+---------+-----------+-----+
//! | H  | Z  | len | dest | src | opts | code_lo | code_hi? | payload.. | crc |
//! +----+----+-----+------+-----+------+--------+---------+-----------+-----+
//! ```
//!
//! `len` counts the bytes from `dest` through the last payload byte. `code_hi`
//! is only transmitted when it is non-zero, so codes up to `0xFF` produce a
//! frame one byte shorter than larger codes. `crc` is the low byte of the
//! CRC32B of every preceding byte (see [`crate::checksum`]).

use bytes::Bytes;
use tracing::{debug, trace};

use crate::checksum::{checksum_of, crc32_of};
use crate::constants::*;
use crate::error::{FrameError, FrameResult};

/// Number of bytes the command code occupies on the wire.
///
/// The sender picks the width from the code value. A receiver cannot tell a
/// one-byte code followed by payload from a two-byte code, so it has to supply
/// the width itself when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeWidth {
    /// Low byte only (codes `0x0000..=0x00FF`).
    Narrow,
    /// Low and high byte (codes `0x0100..=0xFFFF`).
    Wide,
}

impl CodeWidth {
    /// Width a sender uses for `code`.
    pub fn for_code(code: u16) -> Self {
        if code >> 8 == 0 {
            CodeWidth::Narrow
        } else {
            CodeWidth::Wide
        }
    }

    /// Size in bytes.
    pub fn len(self) -> usize {
        match self {
            CodeWidth::Narrow => 1,
            CodeWidth::Wide => 2,
        }
    }
}

/// A complete, checksummed frame.
///
/// Frames are immutable once built. Cloning is cheap, the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
    code_width: CodeWidth,
}

/// Build a frame from its fields.
///
/// Never fails. A body longer than 255 bytes wraps the length byte modulo 256.
pub fn build_frame(destination: u8, source: u8, options: u8, code: u16, payload: &[u8]) -> Frame {
    let [code_low, code_high] = code.to_le_bytes();
    let code_width = CodeWidth::for_code(code);

    let mut buf =
        Vec::with_capacity(HEADER_LEN + MIN_BODY_LEN + 1 + payload.len() + CHECKSUM_LEN);
    buf.extend_from_slice(&FRAME_MARKERS);
    buf.push(0); // length, patched below
    buf.push(destination);
    buf.push(source);
    buf.push(options);
    buf.push(code_low);
    if code_width == CodeWidth::Wide {
        buf.push(code_high);
    }
    buf.extend_from_slice(payload);

    // Truncating to one byte is the wire format for oversized bodies.
    buf[OFFSET_LENGTH] = (buf.len() - HEADER_LEN) as u8;

    let checksum = checksum_of(&buf);
    buf.push(checksum);

    trace!(
        destination,
        source,
        code,
        payload_len = payload.len(),
        checksum,
        "built frame"
    );

    Frame {
        bytes: Bytes::from(buf),
        code_width,
    }
}

impl Frame {
    /// Start building a frame field by field.
    pub fn builder() -> FrameBuilder {
        FrameBuilder::default()
    }

    /// Check that `data` is a well-formed frame.
    ///
    /// Checks the minimum size, both markers, the length byte and the
    /// trailing checksum, in that order.
    pub fn verify(data: &[u8]) -> FrameResult<()> {
        if data.len() < MIN_FRAME_LEN {
            return Err(FrameError::FrameTooShort {
                expected: MIN_FRAME_LEN,
                actual: data.len(),
            });
        }

        for (offset, &marker) in FRAME_MARKERS.iter().enumerate() {
            if data[offset] != marker {
                return Err(FrameError::BadMarker {
                    offset,
                    found: data[offset],
                });
            }
        }

        let declared = data[OFFSET_LENGTH];
        let actual = (data.len() - HEADER_LEN - CHECKSUM_LEN) as u8;
        if declared != actual {
            return Err(FrameError::LengthMismatch { declared, actual });
        }

        let (body, trailer) = data.split_at(data.len() - CHECKSUM_LEN);
        let expected = checksum_of(body);
        if trailer[0] != expected {
            return Err(FrameError::ChecksumMismatch {
                expected,
                actual: trailer[0],
            });
        }

        Ok(())
    }

    /// Verify `data` and interpret its command code as `code_width` bytes.
    pub fn decode(data: &[u8], code_width: CodeWidth) -> FrameResult<Frame> {
        Self::verify(data)?;

        if code_width == CodeWidth::Wide {
            // The checksum sits at OFFSET_CODE_HIGH in a minimum-size frame.
            if data.len() <= OFFSET_CODE_HIGH + CHECKSUM_LEN {
                return Err(FrameError::MissingCodeHigh);
            }
            if data[OFFSET_CODE_HIGH] == 0 {
                return Err(FrameError::ZeroCodeHigh);
            }
        }

        let frame = Frame {
            bytes: Bytes::copy_from_slice(data),
            code_width,
        };
        debug!(
            destination = frame.destination(),
            source = frame.source(),
            code = frame.code(),
            payload_len = frame.payload().len(),
            "decoded frame"
        );
        Ok(frame)
    }

    /// The frame as sent on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total size in bytes, checksum included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a frame has at least [`MIN_FRAME_LEN`] bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Value of the length byte.
    pub fn declared_length(&self) -> u8 {
        self.bytes[OFFSET_LENGTH]
    }

    /// Target module address.
    pub fn destination(&self) -> u8 {
        self.bytes[OFFSET_DESTINATION]
    }

    /// Originating module address.
    pub fn source(&self) -> u8 {
        self.bytes[OFFSET_SOURCE]
    }

    /// Options byte.
    pub fn options(&self) -> u8 {
        self.bytes[OFFSET_OPTIONS]
    }

    /// The 16-bit command code.
    pub fn code(&self) -> u16 {
        let low = self.bytes[OFFSET_CODE_LOW];
        let high = match self.code_width {
            CodeWidth::Narrow => 0,
            CodeWidth::Wide => self.bytes[OFFSET_CODE_HIGH],
        };
        u16::from_le_bytes([low, high])
    }

    /// How many bytes the command code occupies.
    pub fn code_width(&self) -> CodeWidth {
        self.code_width
    }

    /// Payload bytes, in the order given to the builder.
    pub fn payload(&self) -> &[u8] {
        let start = OFFSET_CODE_LOW + self.code_width.len();
        &self.bytes[start..self.bytes.len() - CHECKSUM_LEN]
    }

    /// Trailing checksum byte.
    pub fn checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - CHECKSUM_LEN]
    }

    /// Full 32-bit CRC the checksum byte was truncated from.
    pub fn crc32(&self) -> u32 {
        crc32_of(&self.bytes[..self.bytes.len() - CHECKSUM_LEN])
    }

    /// Consume the frame, returning the shared wire bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Frame> for Vec<u8> {
    fn from(frame: Frame) -> Self {
        frame.bytes.to_vec()
    }
}

impl From<Frame> for Bytes {
    fn from(frame: Frame) -> Self {
        frame.bytes
    }
}

/// Field-by-field construction of a [`Frame`].
///
/// Unset fields default to zero and an empty payload.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    destination: u8,
    source: u8,
    options: u8,
    code: u16,
    payload: Vec<u8>,
}

impl FrameBuilder {
    /// Set the target module address.
    pub fn destination(mut self, destination: u8) -> Self {
        self.destination = destination;
        self
    }

    /// Set the originating module address.
    pub fn source(mut self, source: u8) -> Self {
        self.source = source;
        self
    }

    /// Set the options byte.
    pub fn options(mut self, options: u8) -> Self {
        self.options = options;
        self
    }

    /// Set the command code.
    pub fn code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Replace the payload.
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Append bytes to the payload.
    pub fn push_payload(mut self, bytes: &[u8]) -> Self {
        self.payload.extend_from_slice(bytes);
        self
    }

    /// Assemble and checksum the frame.
    pub fn build(&self) -> Frame {
        build_frame(
            self.destination,
            self.source,
            self.options,
            self.code,
            &self.payload,
        )
    }
}
