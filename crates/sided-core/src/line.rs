//! Classified diff lines and the compare payload that carries them

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid compare payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classification of a line relative to the other side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Equal,
    Delete,
    Insert,
    Replace,
    /// Padding opposite a line that only exists on the other side
    Empty,
}

impl LineType {
    /// True for lines that differ from the other side (padding included)
    pub fn is_change(self) -> bool {
        self != LineType::Equal
    }

    /// Marker used in merged and unified exports
    pub fn marker(self) -> char {
        match self {
            LineType::Delete => '-',
            LineType::Insert | LineType::Replace => '+',
            LineType::Equal | LineType::Empty => ' ',
        }
    }
}

/// A single line of one side of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// 1-based position in the originating file, `None` for padding
    pub line_number: Option<usize>,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub kind: LineType,
}

impl DiffLine {
    pub fn new(kind: LineType, line_number: usize, content: impl Into<String>) -> Self {
        Self {
            line_number: Some(line_number),
            content: content.into(),
            kind,
        }
    }

    /// Padding line (no number, no content)
    pub fn empty() -> Self {
        Self {
            line_number: None,
            content: String::new(),
            kind: LineType::Empty,
        }
    }

    pub fn is_empty_padding(&self) -> bool {
        self.kind == LineType::Empty
    }
}

/// A complete comparison of two files, as exchanged with `files/compare`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub left_file: String,
    #[serde(default)]
    pub right_file: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub left_lines: Vec<DiffLine>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub right_lines: Vec<DiffLine>,
    /// Pre-rendered unified diff text, when the producer supplied one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub diff: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DiffLine>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DiffLine>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Comparison {
    /// Align two texts and wrap the result with display names
    pub fn from_texts(
        left_file: impl Into<String>,
        right_file: impl Into<String>,
        old: &str,
        new: &str,
    ) -> Self {
        let (left_lines, right_lines) = crate::align::compare_texts(old, new);
        Self {
            left_file: left_file.into(),
            right_file: right_file.into(),
            left_lines,
            right_lines,
            diff: String::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_json(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        let comparison = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            left = comparison.left_lines.len(),
            right = comparison.right_lines.len(),
            "loaded compare payload"
        );
        Ok(comparison)
    }

    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of side-by-side rows
    pub fn row_count(&self) -> usize {
        self.left_lines.len().max(self.right_lines.len())
    }

    pub fn has_changes(&self) -> bool {
        self.left_lines.iter().any(|l| l.kind.is_change())
            || self.right_lines.iter().any(|l| l.kind.is_change())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_payload() {
        let json = r#"{
            "success": true,
            "left_file": "r1.cfg",
            "right_file": "r2.cfg",
            "left_lines": [
                {"line_number": 1, "content": "hostname r1", "type": "replace"},
                {"line_number": null, "content": "", "type": "empty"}
            ],
            "right_lines": [
                {"line_number": 1, "content": "hostname r2", "type": "replace"},
                {"line_number": 2, "content": "ntp server 1.1.1.1", "type": "insert"}
            ],
            "diff": "--- r1.cfg\n+++ r2.cfg\n"
        }"#;
        let cmp = Comparison::from_json(json).unwrap();
        assert_eq!(cmp.left_file, "r1.cfg");
        assert_eq!(cmp.left_lines.len(), 2);
        assert_eq!(cmp.left_lines[1], DiffLine::empty());
        assert_eq!(cmp.right_lines[1].kind, LineType::Insert);
        assert_eq!(cmp.right_lines[1].line_number, Some(2));
        assert!(cmp.has_changes());
    }

    #[test]
    fn test_null_and_missing_arrays() {
        let cmp = Comparison::from_json(r#"{"left_lines": null}"#).unwrap();
        assert!(cmp.left_lines.is_empty());
        assert!(cmp.right_lines.is_empty());
        assert_eq!(cmp.row_count(), 0);
        assert!(!cmp.has_changes());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"left_lines": [{"line_number": 1, "content": "x", "type": "moved"}]}"#;
        assert!(matches!(
            Comparison::from_json(json),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let line = DiffLine::new(LineType::Delete, 3, "shutdown");
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(
            json,
            r#"{"line_number":3,"content":"shutdown","type":"delete"}"#
        );
    }

    #[test]
    fn test_markers() {
        assert_eq!(LineType::Delete.marker(), '-');
        assert_eq!(LineType::Insert.marker(), '+');
        assert_eq!(LineType::Replace.marker(), '+');
        assert_eq!(LineType::Equal.marker(), ' ');
    }
}
