//! Error types for namemark

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for namemark operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} is not a JSON array (found {found})", path.display())]
    Shape { path: PathBuf, found: &'static str },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Name '{name}' occurs {count} times, more than the {max} two-digit suffixes available")]
    SuffixExhausted {
        name: String,
        count: usize,
        max: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Directory walk error: {0}")]
    Walkdir(#[from] walkdir::Error),
}

/// Result type alias for namemark operations
pub type Result<T> = std::result::Result<T, Error>;
