//! Parsed documents before interpolation
//!
//! A document is the generic nested mapping a YAML or JSON source parses
//! into. Values are scalars (string, int, float, bool, null), sequences, or
//! mappings. The same shape is used for the plain snapshot produced by
//! [`ConfigNode::to_dict`](crate::ConfigNode::to_dict).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Top-level mapping of a parsed document
pub type Document = IndexMap<String, RawValue>;

/// A value as it appears in the source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawValue {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value (may contain placeholders like ${VAR})
    String(String),
    /// Sequence of values
    Sequence(Vec<RawValue>),
    /// Mapping of string keys to values
    Mapping(IndexMap<String, RawValue>),
}

impl RawValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Get as str if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as mapping if this is a Mapping
    pub fn as_mapping(&self) -> Option<&IndexMap<String, RawValue>> {
        match self {
            RawValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Integer(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::String(_) => "string",
            RawValue::Sequence(_) => "sequence",
            RawValue::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Integer(i) => write!(f, "{}", i),
            RawValue::Float(n) => write!(f, "{}", n),
            RawValue::String(s) => write!(f, "{}", s),
            RawValue::Sequence(seq) => {
                write!(f, "[")?;
                for (i, v) in seq.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            RawValue::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}

impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        RawValue::Integer(i as i64)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(v: Vec<T>) -> Self {
        RawValue::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, RawValue>> for RawValue {
    fn from(m: IndexMap<String, RawValue>) -> Self {
        RawValue::Mapping(m)
    }
}

/// Parse YAML (or JSON, which YAML accepts) text into a document
///
/// An empty document yields an empty mapping. Any other top-level shape
/// than a mapping is rejected.
pub fn parse_document(text: &str) -> Result<Document> {
    let value: RawValue = serde_yaml::from_str(text).map_err(|e| Error::parse(e.to_string()))?;
    into_document(value)
}

/// Parse strict JSON text into a document
pub fn parse_json_document(text: &str) -> Result<Document> {
    let value: RawValue = serde_json::from_str(text).map_err(|e| Error::parse(e.to_string()))?;
    into_document(value)
}

fn into_document(value: RawValue) -> Result<Document> {
    match value {
        RawValue::Mapping(map) => Ok(map),
        RawValue::Null => Ok(Document::new()),
        other => Err(Error::parse(format!(
            "Expected a mapping at the top level, found {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_nested_document() {
        let doc = parse_document(
            r#"
config:
  basic: abc
  port: 5432
  ratio: 0.5
  enabled: true
  tags: [a, b]
single_field: "123"
"#,
        )
        .unwrap();

        assert_eq!(doc.len(), 2);
        let config = doc["config"].as_mapping().unwrap();
        assert_eq!(config["basic"], RawValue::String("abc".into()));
        assert_eq!(config["port"], RawValue::Integer(5432));
        assert_eq!(config["ratio"], RawValue::Float(0.5));
        assert_eq!(config["enabled"], RawValue::Bool(true));
        assert_eq!(config["tags"], RawValue::from(vec!["a", "b"]));
        assert_eq!(doc["single_field"].as_str(), Some("123"));
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let doc = parse_document("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("~").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_top_level_sequence() {
        let err = parse_document("- a\n- b\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DocumentParse);
        assert!(err.to_string().contains("found sequence"));
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let err = parse_document("config: [unclosed").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DocumentParse);
    }

    #[test]
    fn test_parse_json_document() {
        let doc = parse_json_document(r#"{"a": {"b": null}, "c": [1, 2]}"#).unwrap();
        assert!(doc["a"].as_mapping().unwrap()["b"].is_null());
        assert_eq!(doc["c"], RawValue::from(vec![1, 2]));

        assert!(parse_json_document("a: 1").is_err());
    }

    #[test]
    fn test_raw_value_display() {
        let value = RawValue::from(vec![RawValue::from("x"), RawValue::from(1), RawValue::Null]);
        assert_eq!(value.to_string(), "[x, 1, null]");
    }
}
