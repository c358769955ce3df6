//! JSON documents as provenance producers

use crate::error::JsonError;
use provenance_domain::{CaptureError, Leaf, Provenance, StructuredData, StructuredValue};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A JSON document whose content is its own provenance
///
/// Capturing converts the root object to structured data:
/// - objects become nested structures
/// - arrays become structures keyed by decimal index (`"0"`, `"1"`, ...)
/// - `null` becomes an absent value
/// - numbers become integers when they fit in `i64`, floats otherwise
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    value: Value,
}

impl JsonDocument {
    /// Wrap an already parsed JSON value
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Parse a document from a string
    pub fn parse(input: &str) -> Result<Self, JsonError> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::from_value(value))
    }

    /// Parse a document from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, JsonError> {
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Self::from_value(value))
    }

    /// Read and parse a document from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, JsonError> {
        let path = path.as_ref();
        debug!("Loading JSON document from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// The underlying JSON value
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl FromStr for JsonDocument {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Provenance for JsonDocument {
    fn capture(&self) -> Result<Option<StructuredData>, CaptureError> {
        match &self.value {
            Value::Object(map) => {
                let data = structured_from_json(map);
                debug!("Captured {} top-level fields from JSON document", data.len());
                Ok(Some(data))
            }
            // A null document carries no provenance at all
            Value::Null => Ok(None),
            other => Err(CaptureError::with_source(
                "JSON document cannot be captured",
                JsonError::NotAnObject(kind(other)),
            )),
        }
    }
}

/// Convert a JSON object to structured data
pub fn structured_from_json(map: &Map<String, Value>) -> StructuredData {
    map.iter()
        .map(|(name, value)| (name.clone(), value_from_json(value)))
        .collect()
}

/// Convert any JSON value to a structured value
pub fn value_from_json(value: &Value) -> StructuredValue {
    match value {
        Value::Null => StructuredValue::Absent,
        Value::Bool(b) => StructuredValue::Leaf(Leaf::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => StructuredValue::Leaf(Leaf::Integer(i)),
            None => StructuredValue::Leaf(Leaf::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        Value::String(s) => StructuredValue::Leaf(Leaf::Text(s.clone())),
        Value::Array(items) => StructuredValue::Structured(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), value_from_json(item)))
                .collect(),
        ),
        Value::Object(map) => StructuredValue::Structured(structured_from_json(map)),
    }
}

fn kind(value: &Value) -> &'static str {
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
    use provenance_domain::{KeyPath, ProvenanceRecord};
    use serde_json::json;

    #[test]
    fn test_object_capture() {
        let doc = JsonDocument::from_value(json!({
            "tool": "rustc",
            "version": 178,
            "flags": {"release": true, "opt": 3.5}
        }));

        let data = doc.capture().unwrap().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.get("tool"), Some(&StructuredValue::from("rustc")));
        assert_eq!(data.get("version"), Some(&StructuredValue::from(178i64)));
        let flags = data.get("flags").and_then(StructuredValue::as_structured).unwrap();
        assert_eq!(flags.get("opt"), Some(&StructuredValue::from(3.5)));
    }

    #[test]
    fn test_all_fields_captured() {
        let doc = JsonDocument::parse(r#"{"b": 1, "a": 2}"#).unwrap();
        let data = doc.capture().unwrap().unwrap();
        let names: Vec<&str> = data.names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a") && names.contains(&"b"));
    }

    #[test]
    fn test_arrays_keyed_by_index() {
        let doc = JsonDocument::from_value(json!({"inputs": ["a.csv", "b.csv"]}));
        let flat = ProvenanceRecord::capture(&doc).unwrap().flatten();

        assert_eq!(
            flat.get(&KeyPath::new(["inputs", "0"])),
            Some(&Leaf::from("a.csv"))
        );
        assert_eq!(
            flat.get(&KeyPath::new(["inputs", "1"])),
            Some(&Leaf::from("b.csv"))
        );
    }

    #[test]
    fn test_null_fields_are_absent() {
        let doc = JsonDocument::from_value(json!({"reviewer": null, "id": 1}));
        let flat = ProvenanceRecord::capture(&doc).unwrap().flatten();
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_null_document_has_no_provenance() {
        let doc = JsonDocument::from_value(Value::Null);
        let record = ProvenanceRecord::capture(&doc).unwrap();
        assert!(!record.has_provenance());
    }

    #[test]
    fn test_non_object_root_fails_capture() {
        let doc = JsonDocument::from_value(json!([1, 2, 3]));
        let err = doc.capture().unwrap_err();
        assert_eq!(err.message(), "JSON document cannot be captured");
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let value = value_from_json(&json!(u64::MAX));
        assert!(matches!(value, StructuredValue::Leaf(Leaf::Float(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            JsonDocument::parse("{not json"),
            Err(JsonError::Parse(_))
        ));
    }

    #[test]
    fn test_from_str_trait() {
        let doc: JsonDocument = r#"{"k": "v"}"#.parse().unwrap();
        assert!(doc.value().is_object());
    }
}
