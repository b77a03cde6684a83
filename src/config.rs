//! Run configuration.
//!
//! A run is fully described by its command line; there is no config file.
//! [`TrimConfig`] is the parsed form the pipeline consumes, and
//! [`TrimConfig::validate`] holds the cross-flag rules so they are enforced
//! the same way whether the config came from `clap` or was built in code.
//!
//! ## Options
//!
//! | Field | Flag | Meaning |
//! |---|---|---|
//! | `inputs` | positional | Image files, processed in the given order |
//! | `crop_threshold` | `-c <alpha>` | Trim borders whose alpha is ≤ threshold |
//! | `dest_dir` | `-D <dir>` | Write results as PNG here |
//! | `sort` | `-s` | Order the report by pixel count |
//! | `debug` | `-d` | Log skipped files and per-stage detail |

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything one batch run needs to know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimConfig {
    pub inputs: Vec<PathBuf>,
    /// Alpha threshold; `Some` enables the trim stage.
    pub crop_threshold: Option<u8>,
    /// Export destination; `Some` enables the export stage.
    pub dest_dir: Option<PathBuf>,
    pub sort: bool,
    pub debug: bool,
}

impl TrimConfig {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    pub fn with_crop(mut self, threshold: u8) -> Self {
        self.crop_threshold = Some(threshold);
        self
    }

    pub fn with_dest(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = Some(dir.into());
        self
    }

    pub fn sorted(mut self) -> Self {
        self.sort = true;
        self
    }

    /// Reject flag combinations that cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inputs.is_empty() {
            return Err(ConfigError::Validation("no input files given".into()));
        }
        if self.crop_threshold.is_some() && self.dest_dir.is_none() {
            return Err(ConfigError::Validation(
                "the -c option requires -D".into(),
            ));
        }
        Ok(())
    }
}
