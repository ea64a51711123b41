//! Persisting marked documents next to their source.

use crate::config::OutputConfig;
use crate::document::Document;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes modified documents to `<stem><suffix>.<ext>` in the same directory
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    suffix: String,
    indent: Vec<u8>,
}

impl DocumentWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            suffix: config.suffix.clone(),
            indent: vec![b' '; config.indent],
        }
    }

    pub fn marked_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file_name = match source.extension() {
            Some(ext) => format!("{}{}.{}", stem, self.suffix, ext.to_string_lossy()),
            None => format!("{}{}", stem, self.suffix),
        };

        source.with_file_name(file_name)
    }

    /// Pretty JSON with literal non-ASCII text
    pub fn render(&self, document: &Document) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        document.elements.serialize(&mut serializer)?;
        Ok(buffer)
    }

    /// Replace the marked file as a whole: write a sibling temp file, then rename
    pub fn write(&self, document: &Document) -> Result<PathBuf> {
        let target = self.marked_path(&document.path);
        let content = self.render(document)?;

        let mut staging = target.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        let to_write_error = |source| Error::Write {
            path: target.clone(),
            source,
        };

        if let Err(e) = fs::write(&staging, &content) {
            let _ = fs::remove_file(&staging);
            return Err(to_write_error(e));
        }
        if let Err(e) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(to_write_error(e));
        }

        debug!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_marked_path() {
        let writer = DocumentWriter::new(&OutputConfig::default());
        assert_eq!(
            writer.marked_path(Path::new("/data/moves.json")),
            PathBuf::from("/data/moves_marked.json")
        );
        assert_eq!(
            writer.marked_path(Path::new("/data/v1.json.json")),
            PathBuf::from("/data/v1.json_marked.json")
        );
    }

    #[test]
    fn test_render_two_space_indent_and_literal_unicode() -> Result<()> {
        let writer = DocumentWriter::new(&OutputConfig::default());
        let doc = Document::new(
            "moves.json",
            vec![json!({"name": "でんき.99", "power": 40}), json!(null)],
        );

        let text = String::from_utf8(writer.render(&doc)?).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"name\": \"でんき.99\",\n    \"power\": 40\n  },\n  null\n]"
        );
        Ok(())
    }

    #[test]
    fn test_write_replaces_whole_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let source = temp_dir.path().join("moves.json");
        let writer = DocumentWriter::new(&OutputConfig::default());
        fs::write(
            writer.marked_path(&source),
            "stale content that is much longer than the new one",
        )?;

        let doc = Document::new(&source, vec![json!({"name": "A.99"})]);
        let written = writer.write(&doc)?;

        assert_eq!(written, temp_dir.path().join("moves_marked.json"));
        let reread: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written)?)?;
        assert_eq!(reread, json!([{"name": "A.99"}]));
        assert!(!temp_dir.path().join("moves_marked.json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let writer = DocumentWriter::new(&OutputConfig::default());
        let doc = Document::new("/definitely/not/a/dir/moves.json", vec![]);
        assert!(matches!(writer.write(&doc), Err(Error::Write { .. })));
    }
}
