//! Hexabitz array-message framing
//!
//! This crate builds the framed messages exchanged between Hexabitz modules
//! over their point-to-point serial links, and computes the CRC32B checksum
//! the module hardware uses to check them.
//!
//! # Frame Overview
//!
//! Every frame starts with the markers `H Z`, a length byte, the destination
//! and source module addresses, an options byte and a 16-bit command code
//! (high byte elided when zero), followed by the payload and a one-byte
//! checksum. See [`frame`] for the exact layout and [`checksum`] for the
//! word-swapped CRC.
//!
//! Building a frame is a pure function of its fields; frames are immutable and
//! may be built concurrently from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use hexabitz_message::{build_frame, checksum_of, CodeWidth, Frame, FrameCodec};
//!
//! // Build a frame for module 2 from module 1
//! let frame = build_frame(2, 1, 0, 0x0001, &[]);
//! assert_eq!(frame.as_bytes(), &[0x48, 0x5A, 0x04, 0x02, 0x01, 0x00, 0x01, 0xE3]);
//!
//! // Verify it on the receiving side
//! let (body, crc) = frame.as_bytes().split_at(frame.len() - 1);
//! assert_eq!(checksum_of(body), crc[0]);
//!
//! // Or pull frames out of a byte stream
//! let mut codec = FrameCodec::new();
//! codec.push(frame.as_bytes());
//! let raw = codec.decode()?.expect("complete frame");
//! let decoded = Frame::decode(&raw, CodeWidth::Narrow)?;
//! assert_eq!(decoded.code(), 0x0001);
//! # Ok::<(), hexabitz_message::FrameError>(())
//! ```

pub mod checksum;
pub mod codec;
pub mod constants;
mod error;
pub mod frame;

pub use checksum::{checksum_of, crc32_of, organize};
pub use codec::FrameCodec;
pub use constants::*;
pub use error::*;
pub use frame::{build_frame, CodeWidth, Frame, FrameBuilder};
