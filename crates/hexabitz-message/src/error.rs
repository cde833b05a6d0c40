//! Frame error types.
//!
//! Building a frame never fails. These errors only come from the receive side,
//! when bytes read off the link are checked against the frame layout.

use thiserror::Error;

/// Errors that can occur when verifying or decoding a received frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Frame is too short to be valid.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// A start-of-frame marker has the wrong value.
    #[error("bad frame marker at offset {offset}: 0x{found:02X}")]
    BadMarker {
        /// Offset of the marker byte (0 or 1).
        offset: usize,
        /// Byte found at that offset.
        found: u8,
    },

    /// The length byte does not match the number of bytes received.
    #[error("length mismatch: header declares {declared}, frame carries {actual}")]
    LengthMismatch {
        /// Value of the length byte.
        declared: u8,
        /// Length implied by the received byte count, truncated to a byte.
        actual: u8,
    },

    /// The trailing checksum does not match the recomputed one.
    #[error("checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch {
        /// Checksum recomputed over the received bytes.
        expected: u8,
        /// Checksum carried by the frame.
        actual: u8,
    },

    /// A two-byte code was requested but the frame ends before the high byte.
    #[error("frame has no command code high byte")]
    MissingCodeHigh,

    /// A two-byte code was requested but the high byte is zero, which a
    /// conforming sender never transmits.
    #[error("command code high byte is zero")]
    ZeroCodeHigh,
}

/// Result type alias for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;
