//! Rendering frames for stdout.

use clap::ValueEnum;
use hexabitz_message::Frame;
use serde::Serialize;

use crate::error::CliResult;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Frame bytes as a hex string, one frame per line.
    #[default]
    Hex,
    /// One JSON object per line with every field broken out.
    Json,
}

/// Field-level view of a frame, for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Label from the batch file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target module address.
    pub destination: u8,
    /// Originating module address.
    pub source: u8,
    /// Options byte.
    pub options: u8,
    /// Command code.
    pub code: u16,
    /// Payload as hex.
    pub payload: String,
    /// Value of the length byte.
    pub length: u8,
    /// Checksum byte.
    pub checksum: u8,
    /// Full CRC the checksum was truncated from.
    pub crc32: u32,
    /// Whole frame as hex.
    pub frame: String,
}

impl FrameReport {
    /// Break `frame` out into its fields.
    pub fn new(frame: &Frame, name: Option<String>) -> Self {
        FrameReport {
            name,
            destination: frame.destination(),
            source: frame.source(),
            options: frame.options(),
            code: frame.code(),
            payload: hex::encode(frame.payload()),
            length: frame.declared_length(),
            checksum: frame.checksum(),
            crc32: frame.crc32(),
            frame: hex::encode_upper(frame.as_bytes()),
        }
    }
}

/// Render one frame as a single output line.
pub fn render_frame(frame: &Frame, name: Option<&str>, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Hex => {
            let bytes = hex::encode_upper(frame.as_bytes());
            Ok(match name {
                Some(name) => format!("{} {}", name, bytes),
                None => bytes,
            })
        }
        OutputFormat::Json => Ok(serde_json::to_string(&FrameReport::new(
            frame,
            name.map(str::to_string),
        ))?),
    }
}

/// Render a verified frame's fields as a single human-readable line.
pub fn render_fields(frame: &Frame) -> String {
    format!(
        "ok dest={} src={} options=0x{:02X} code=0x{:04X} payload={} checksum=0x{:02X}",
        frame.destination(),
        frame.source(),
        frame.options(),
        frame.code(),
        hex::encode_upper(frame.payload()),
        frame.checksum()
    )
}
