//! Loading of JSON documents into an owned, index-addressable record list.

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed JSON array, identified by the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    pub elements: Vec<Value>,
}

/// An array element that is not an object and is left out of name matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedElement {
    pub index: usize,
    pub found: &'static str,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, elements: Vec<Value>) -> Self {
        Self {
            path: path.into(),
            elements,
        }
    }

    /// Read and parse a document; the top level must be an array
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Array(elements) => Ok(Self::new(path, elements)),
            other => Err(Error::Shape {
                path: path.to_path_buf(),
                found: json_type_name(&other),
            }),
        }
    }

    /// Object elements with their original index
    pub fn records(&self) -> impl Iterator<Item = (usize, &Map<String, Value>)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(index, element)| element.as_object().map(|record| (index, record)))
    }

    pub fn record_mut(&mut self, index: usize) -> Option<&mut Map<String, Value>> {
        self.elements.get_mut(index).and_then(Value::as_object_mut)
    }

    pub fn skipped_elements(&self) -> Vec<SkippedElement> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.is_object())
            .map(|(index, element)| SkippedElement {
                index,
                found: json_type_name(element),
            })
            .collect()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    #[rstest]
    #[case(json!(null), "null")]
    #[case(json!(true), "boolean")]
    #[case(json!(1.5), "number")]
    #[case(json!("x"), "string")]
    #[case(json!([]), "array")]
    #[case(json!({}), "object")]
    fn test_json_type_name(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(json_type_name(&value), expected);
    }

    #[test]
    fn test_parse_array() -> Result<()> {
        let doc = Document::parse(Path::new("a.json"), r#"[{"name":"Fox"}, 3]"#)?;
        assert_eq!(doc.elements.len(), 2);
        assert_eq!(doc.records().count(), 1);
        assert_eq!(
            doc.skipped_elements(),
            vec![SkippedElement {
                index: 1,
                found: "number"
            }]
        );
        Ok(())
    }

    #[test]
    fn test_parse_object_is_shape_error() {
        let result = Document::parse(Path::new("a.json"), r#"{"name":"Fox"}"#);
        assert!(matches!(result, Err(Error::Shape { found: "object", .. })));
    }

    #[test]
    fn test_parse_malformed_is_parse_error() {
        let result = Document::parse(Path::new("a.json"), "[{\"name\":");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_records_keep_original_indices() -> Result<()> {
        let doc = Document::parse(
            Path::new("a.json"),
            r#"["skip", {"name":"A"}, null, {"name":"B"}]"#,
        )?;
        let indices: Vec<usize> = doc.records().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn test_load_from_disk() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("moves.json");
        fs::write(&path, r#"[{"name":"ひのこ","power":40}]"#)?;

        let doc = Document::load(&path)?;
        assert_eq!(doc.file_name(), "moves.json");
        assert_eq!(doc.elements[0]["name"], "ひのこ");
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Document::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
