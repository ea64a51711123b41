//! Discovery of candidate JSON documents in a single directory.

use crate::config::ScanConfig;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists candidate documents directly inside one directory
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    root: PathBuf,
    extension: String,
    skip_suffix: Option<String>,
}

impl DocumentScanner {
    pub fn new(root: &Path, config: &ScanConfig, output_suffix: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            extension: config.extension.clone(),
            skip_suffix: config
                .skip_marked_outputs
                .then(|| output_suffix.to_string()),
        }
    }

    /// Matching files and walk errors, sorted by file name
    pub fn entries(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.has_extension(entry.path()) {
                        Some(Ok(entry.into_path()))
                    } else {
                        None
                    }
                }
                Err(e) => Some(Err(e.into())),
            })
    }

    /// Matching files to process; walk errors and previous outputs are logged and dropped
    pub fn scan(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.entries().filter_map(|entry| match entry {
            Ok(path) if self.is_previous_output(&path) => {
                debug!("Skipping previous output {}", path.display());
                None
            }
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", self.root.display(), e);
                None
            }
        })
    }

    /// True when skipping outputs is enabled and the stem ends with the output suffix
    pub fn is_previous_output(&self, path: &Path) -> bool {
        let Some(suffix) = &self.skip_suffix else {
            return false;
        };

        path.file_stem()
            .and_then(|s| s.to_str())
            .map(|stem| stem.ends_with(suffix.as_str()))
            .unwrap_or(false)
    }

    // Case-sensitive, like a `*.json` shell glob.
    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }
}
