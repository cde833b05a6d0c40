//! Batch files: many messages built in one run.
//!
//! A batch file is YAML (`.yaml`/`.yml`) or JSON (anything else):
//!
//! ```yaml
//! defaults:
//!   source: 1
//! messages:
//!   - name: ping-module-2
//!     destination: 2
//!     code: 1
//!   - destination: 3
//!     code: 0x0110   # YAML accepts hex integers
//!     payload: "0a0b"
//! ```
//!
//! Fields omitted from a message fall back to `defaults`, then to zero.

use std::path::Path;

use hexabitz_message::{build_frame, Frame};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Values applied to messages that leave a field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchDefaults {
    /// Originating module address.
    pub source: u8,
    /// Options byte.
    pub options: u8,
}

/// One message to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSpec {
    /// Label echoed in the output.
    #[serde(default)]
    pub name: Option<String>,
    /// Target module address.
    pub destination: u8,
    /// Originating module address.
    #[serde(default)]
    pub source: Option<u8>,
    /// Options byte.
    #[serde(default)]
    pub options: Option<u8>,
    /// Command code.
    pub code: u16,
    /// Payload as a hex string.
    #[serde(default, with = "hex::serde")]
    pub payload: Vec<u8>,
}

/// A parsed batch file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFile {
    /// Defaults for unset message fields.
    #[serde(default)]
    pub defaults: BatchDefaults,
    /// Messages, built and reported in this order.
    pub messages: Vec<MessageSpec>,
}

impl MessageSpec {
    /// Build this message, filling unset fields from `defaults`.
    pub fn build(&self, defaults: &BatchDefaults) -> Frame {
        build_frame(
            self.destination,
            self.source.unwrap_or(defaults.source),
            self.options.unwrap_or(defaults.options),
            self.code,
            &self.payload,
        )
    }
}

impl BatchFile {
    /// Load a batch file, picking the format from the extension.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let batch = if is_yaml {
            Self::from_yaml_str(&text)?
        } else {
            Self::from_json_str(&text)?
        };

        info!(
            path = %path.display(),
            messages = batch.messages.len(),
            "loaded batch file"
        );
        Ok(batch)
    }

    /// Parse a YAML batch.
    pub fn from_yaml_str(text: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a JSON batch.
    pub fn from_json_str(text: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build every message in parallel, preserving order.
    ///
    /// `jobs` limits the worker count; `None` uses one worker per core.
    pub fn build_all(&self, jobs: Option<usize>) -> CliResult<Vec<Frame>> {
        let mut pool = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = jobs {
            pool = pool.num_threads(jobs);
        }
        let pool = pool.build()?;

        debug!(
            messages = self.messages.len(),
            workers = pool.current_num_threads(),
            "building batch"
        );

        Ok(pool.install(|| {
            self.messages
                .par_iter()
                .map(|spec| spec.build(&self.defaults))
                .collect()
        }))
    }
}
