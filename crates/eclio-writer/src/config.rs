//! Output configuration and its validation errors.
//!
//! [`OutputConfig`] decides where files go and which of them are
//! produced. [`validate()`](OutputConfig::validate) runs when the
//! session is created, before any directory or file is touched.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use crate::state::IoConfig;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`OutputConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base name is empty.
    EmptyBaseName,
    /// The base name contains a path separator or a NUL byte.
    InvalidBaseName {
        /// The rejected name.
        name: String,
    },
    /// The output directory path is empty.
    EmptyOutputDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBaseName => write!(f, "base name must not be empty"),
            Self::InvalidBaseName { name } => {
                write!(f, "base name {name:?} must be a plain file stem")
            }
            Self::EmptyOutputDir => write!(f, "output directory must not be empty"),
        }
    }
}

impl Error for ConfigError {}

// ── OutputConfig ───────────────────────────────────────────────────

/// Where and what the session writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory for all output files. Created if missing. Default: `.`.
    pub output_dir: PathBuf,
    /// File stem; files are `<base_name>.EGRID`, `.INIT`, `.UNRST`.
    pub base_name: String,
    /// Produce the INIT file. Default: true.
    pub write_init: bool,
    /// Produce the EGRID file. Default: true.
    pub write_egrid: bool,
    /// Produce the unified restart file. Default: true.
    pub write_restart: bool,
}

impl OutputConfig {
    /// Default output directory.
    pub const DEFAULT_OUTPUT_DIR: &'static str = ".";
    /// Default file stem.
    pub const DEFAULT_BASE_NAME: &'static str = "ECLIPSE";

    /// Output to `output_dir` under `base_name`, all files enabled.
    pub fn new(output_dir: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_name: base_name.into(),
            ..Self::default()
        }
    }

    /// Take every option from the deck's output settings.
    pub fn from_io_config(io: &IoConfig) -> Self {
        Self {
            output_dir: io.output_dir.clone(),
            base_name: io.base_name.clone(),
            write_init: io.write_init,
            write_egrid: io.write_egrid,
            write_restart: io.write_restart,
        }
    }

    /// Check that the configuration names a usable file location.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_name.is_empty() {
            return Err(ConfigError::EmptyBaseName);
        }
        if self
            .base_name
            .chars()
            .any(|c| std::path::is_separator(c) || c == '\0')
            || self.base_name == "."
            || self.base_name == ".."
        {
            return Err(ConfigError::InvalidBaseName {
                name: self.base_name.clone(),
            });
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }
        Ok(())
    }

    /// Path of the output file with extension `ext`.
    pub fn file_path(&self, ext: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{ext}", self.base_name))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(Self::DEFAULT_OUTPUT_DIR),
            base_name: Self::DEFAULT_BASE_NAME.to_string(),
            write_init: true,
            write_egrid: true,
            write_restart: true,
        }
    }
}
