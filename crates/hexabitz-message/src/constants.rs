//! Wire constants for the array-message frame.

// ============================================================================
// Markers
// ============================================================================

/// First start-of-frame marker (`'H'`).
pub const FRAME_MARKER_H: u8 = 0x48;
/// Second start-of-frame marker (`'Z'`).
pub const FRAME_MARKER_Z: u8 = 0x5A;
/// Both start-of-frame markers in wire order.
pub const FRAME_MARKERS: [u8; 2] = [FRAME_MARKER_H, FRAME_MARKER_Z];

// ============================================================================
// Offsets
// ============================================================================

/// Offset of the length byte.
pub const OFFSET_LENGTH: usize = 2;
/// Offset of the destination module address.
pub const OFFSET_DESTINATION: usize = 3;
/// Offset of the source module address.
pub const OFFSET_SOURCE: usize = 4;
/// Offset of the options byte.
pub const OFFSET_OPTIONS: usize = 5;
/// Offset of the low byte of the command code.
pub const OFFSET_CODE_LOW: usize = 6;
/// Offset of the high byte of the command code, when present.
pub const OFFSET_CODE_HIGH: usize = 7;

// ============================================================================
// Sizes
// ============================================================================

/// Bytes not counted by the length field ahead of the body: two markers plus
/// the length byte itself.
pub const HEADER_LEN: usize = 3;
/// Size of the trailing checksum.
pub const CHECKSUM_LEN: usize = 1;
/// Smallest body: destination, source, options and code low byte.
pub const MIN_BODY_LEN: usize = 4;
/// Smallest complete frame (one-byte code, empty payload).
pub const MIN_FRAME_LEN: usize = HEADER_LEN + MIN_BODY_LEN + CHECKSUM_LEN;

// ============================================================================
// CRC32B
// ============================================================================

/// Generator polynomial of the module CRC unit.
pub const CRC32B_POLY: u32 = 0x04C1_1DB7;
/// Initial accumulator value.
pub const CRC32B_INIT: u32 = 0xFFFF_FFFF;
/// Word size the CRC unit consumes; the frame is regrouped into words of this
/// size before checksumming.
pub const CRC_WORD_SIZE: usize = 4;
