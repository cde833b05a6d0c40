//! CRC32B checksum engine.
//!
//! The module hardware computes its CRC over 32-bit words, so the byte stream
//! is regrouped before checksumming:
//!
//! ```text
//! input:      H  Z  L  D | S  O  C
//! organized:  D  L  Z  H | 00 C  O  S
//! ```
//!
//! Each complete 4-byte group is reversed (a little-endian word swap). A short
//! trailing group is zero-padded to 4 bytes first and then reversed, so the
//! padding zeros are part of the checksummed data.
//!
//! The CRC itself is the MSB-first variant with polynomial `0x04C11DB7`,
//! initial value `0xFFFFFFFF`, no reflection and no final XOR. Frames carry
//! only the low byte of the result.

use crate::constants::{CRC32B_INIT, CRC32B_POLY, CRC_WORD_SIZE};

/// Length of the organized buffer for an input of `len` bytes.
pub fn organized_len(len: usize) -> usize {
    len.div_ceil(CRC_WORD_SIZE) * CRC_WORD_SIZE
}

/// Apply the 4-byte little-endian word swap with zero padding.
///
/// The output length is always a multiple of four.
pub fn organize(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(organized_len(data.len()));

    let mut words = data.chunks_exact(CRC_WORD_SIZE);
    for word in &mut words {
        buf.extend(word.iter().rev());
    }

    let tail = words.remainder();
    if !tail.is_empty() {
        let mut word = [0u8; CRC_WORD_SIZE];
        word[..tail.len()].copy_from_slice(tail);
        buf.extend(word.iter().rev());
    }

    buf
}

/// Bit-serial CRC32B over `data` as given, without regrouping.
pub fn crc32b(data: &[u8]) -> u32 {
    let mut crc = CRC32B_INIT;
    for &byte in data {
        crc ^= u32::from(byte) << 24;
        for _ in 0..8 {
            let msb = crc & 0x8000_0000 != 0;
            crc <<= 1;
            if msb {
                crc ^= CRC32B_POLY;
            }
        }
    }
    crc
}

/// Full 32-bit CRC of `data` after organizing it.
///
/// Frames only carry the low byte (see [`checksum_of`]); this exposes the
/// whole value for hardware that checks all 32 bits.
pub fn crc32_of(data: &[u8]) -> u32 {
    crc32b(&organize(data))
}

/// Frame checksum of `data`: the low byte of [`crc32_of`].
///
/// A receiver calls this over every byte of a frame except the trailing one
/// and compares the result with that trailing byte.
pub fn checksum_of(data: &[u8]) -> u8 {
    // Truncation is part of the wire format.
    (crc32_of(data) & 0xFF) as u8
}
