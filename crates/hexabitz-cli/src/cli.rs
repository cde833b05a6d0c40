//! Command-line arguments and command dispatch.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use hexabitz_message::{build_frame, checksum_of, crc32_of, CodeWidth, Frame};
use tracing::debug;

use crate::batch::BatchFile;
use crate::error::CliResult;
use crate::numbers::{arg_hex_bytes, arg_u16, arg_u8, parse_hex_bytes, HexBytes};
use crate::output::{render_fields, render_frame, FrameReport, OutputFormat};

/// Build and check Hexabitz array messages.
#[derive(Parser, Debug)]
#[command(name = "hxmsg", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Hex, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build one frame from its fields.
    Build {
        /// Target module address.
        #[arg(short, long, value_parser = arg_u8)]
        dest: u8,
        /// Originating module address.
        #[arg(short, long, value_parser = arg_u8)]
        src: u8,
        /// Options byte.
        #[arg(short, long, value_parser = arg_u8, default_value = "0")]
        options: u8,
        /// Command code.
        #[arg(short, long, value_parser = arg_u16)]
        code: u16,
        /// Payload as hex.
        #[arg(short, long, value_parser = arg_hex_bytes, default_value = "")]
        payload: HexBytes,
    },

    /// Compute the checksum of a byte string.
    Checksum {
        /// Bytes as hex, excluding any trailing checksum.
        data: String,
        /// Print the full 32-bit CRC instead of the checksum byte.
        #[arg(long)]
        full: bool,
    },

    /// Verify a received frame and print its fields.
    Verify {
        /// Frame bytes as hex.
        data: String,
        /// Interpret the command code as two bytes.
        #[arg(long)]
        wide: bool,
    },

    /// Build every message in a YAML or JSON batch file.
    Batch {
        /// Path to the batch file.
        file: PathBuf,
        /// Worker threads (defaults to one per core).
        #[arg(short, long)]
        jobs: Option<usize>,
    },
}

/// Run a parsed command line, returning the lines to print.
pub fn run(cli: &Cli) -> CliResult<Vec<String>> {
    match &cli.command {
        Command::Build {
            dest,
            src,
            options,
            code,
            payload,
        } => {
            let frame = build_frame(*dest, *src, *options, *code, &payload.0);
            Ok(vec![render_frame(&frame, None, cli.format)?])
        }

        Command::Checksum { data, full } => {
            let bytes = parse_hex_bytes(data)?;
            let line = match (cli.format, full) {
                (OutputFormat::Json, _) => serde_json::json!({
                    "checksum": checksum_of(&bytes),
                    "crc32": crc32_of(&bytes),
                })
                .to_string(),
                (OutputFormat::Hex, true) => format!("0x{:08X}", crc32_of(&bytes)),
                (OutputFormat::Hex, false) => format!("0x{:02X}", checksum_of(&bytes)),
            };
            Ok(vec![line])
        }

        Command::Verify { data, wide } => {
            let bytes = parse_hex_bytes(data)?;
            let width = if *wide {
                CodeWidth::Wide
            } else {
                CodeWidth::Narrow
            };
            let frame = Frame::decode(&bytes, width)?;
            let line = match cli.format {
                OutputFormat::Hex => render_fields(&frame),
                OutputFormat::Json => serde_json::to_string(&FrameReport::new(&frame, None))?,
            };
            Ok(vec![line])
        }

        Command::Batch { file, jobs } => {
            let batch = BatchFile::load(file)?;
            let frames = batch.build_all(*jobs)?;
            debug!(frames = frames.len(), "batch built");

            frames
                .iter()
                .zip(&batch.messages)
                .map(|(frame, spec)| render_frame(frame, spec.name.as_deref(), cli.format))
                .collect()
        }
    }
}
