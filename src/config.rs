//! Configuration loading for namemark.
//!
//! Settings come from a TOML file. An explicit path must exist; otherwise the
//! per-user config directory is consulted and built-in defaults are used when
//! nothing is found there.

use crate::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension of candidate documents, without the dot
    pub extension: String,
    /// Skip, and report, files that already carry the output suffix
    pub skip_marked_outputs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Inserted between the file stem and the extension
    pub suffix: String,
    /// Spaces per indentation level
    pub indent: usize,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "json".to_string(),
            skip_marked_outputs: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_marked".to_string(),
            indent: 2,
            dry_run: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from an explicit file, the user config directory, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "namemark").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Validate config settings
    pub fn validate(&self) -> Result<()> {
        if self.scan.extension.is_empty() || self.scan.extension.contains('.') {
            return Err(Error::Config(format!(
                "Scan extension must be a bare extension like \"json\", got {:?}",
                self.scan.extension
            )));
        }

        if self.output.suffix.is_empty() {
            return Err(Error::Config(
                "Output suffix must not be empty, source files would be overwritten".to_string(),
            ));
        }

        if self.output.suffix.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "Output suffix must not contain path separators: {:?}",
                self.output.suffix
            )));
        }

        Ok(())
    }
}
