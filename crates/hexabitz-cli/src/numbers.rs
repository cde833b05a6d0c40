//! Parsing of numeric and byte-string arguments.
//!
//! Numbers are decimal unless prefixed with `0x`. Byte strings are hex, with
//! optional `0x` prefix and any spaces, `:` or `-` separators ignored.

use crate::error::{CliError, CliResult};

fn parse_number(value: &str, max: u64) -> CliResult<u64> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => trimmed.parse::<u64>(),
    };

    let number = parsed.map_err(|e| CliError::InvalidNumber {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if number > max {
        return Err(CliError::InvalidNumber {
            value: value.to_string(),
            reason: format!("exceeds maximum {}", max),
        });
    }
    Ok(number)
}

/// Parse a byte value such as `12` or `0x0C`.
pub fn parse_u8(value: &str) -> CliResult<u8> {
    parse_number(value, u64::from(u8::MAX)).map(|n| n as u8)
}

/// Parse a 16-bit value such as `4660` or `0x1234`.
pub fn parse_u16(value: &str) -> CliResult<u16> {
    parse_number(value, u64::from(u16::MAX)).map(|n| n as u16)
}

/// Parse a hex byte string such as `48 5A 04` or `0x485a04`.
pub fn parse_hex_bytes(value: &str) -> CliResult<Vec<u8>> {
    let trimmed = value.trim();
    let digits: String = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !matches!(c, ' ' | ':' | '-'))
        .collect();
    Ok(hex::decode(digits)?)
}

/// Adapter for clap `value_parser`.
pub fn arg_u8(value: &str) -> Result<u8, String> {
    parse_u8(value).map_err(|e| e.to_string())
}

/// Adapter for clap `value_parser`.
pub fn arg_u16(value: &str) -> Result<u16, String> {
    parse_u16(value).map_err(|e| e.to_string())
}

/// Parsed hex byte-string argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

/// Adapter for clap `value_parser`.
pub fn arg_hex_bytes(value: &str) -> Result<HexBytes, String> {
    parse_hex_bytes(value).map(HexBytes).map_err(|e| e.to_string())
}
