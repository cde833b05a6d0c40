//! # hexabitz-cli
//!
//! Command-line front end for [`hexabitz_message`]: build frames from
//! arguments or batch files, compute checksums, and verify captured frames.
//!
//! ```text
//! $ hxmsg build --dest 2 --src 1 --code 1
//! 485A0402010001E3
//! $ hxmsg verify 485A0402010001E3
//! ok dest=2 src=1 options=0x00 code=0x0001 payload= checksum=0xE3
//! ```

pub mod batch;
pub mod cli;
pub mod error;
pub mod numbers;
pub mod output;

pub use batch::{BatchDefaults, BatchFile, MessageSpec};
pub use cli::{run, Cli, Command};
pub use error::{CliError, CliResult};
pub use output::OutputFormat;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects warn, debug or
/// trace. Logs go to stderr so stdout carries only results.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
