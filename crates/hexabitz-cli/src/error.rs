//! Error types for the command-line tool.

use std::path::PathBuf;

use hexabitz_message::FrameError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A frame failed verification.
    #[error("invalid frame: {0}")]
    Frame(#[from] FrameError),

    /// A hex byte string could not be parsed.
    #[error("invalid hex data: {0}")]
    Hex(#[from] hex::FromHexError),

    /// A numeric argument could not be parsed or does not fit.
    #[error("invalid number '{value}': {reason}")]
    InvalidNumber {
        /// The text that was given.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Reading a batch file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// YAML batch file could not be parsed.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON batch file could not be parsed, or output could not be rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool for batch building could not be created.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
