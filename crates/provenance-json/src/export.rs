//! Rendering flattened provenance and records as JSON

use provenance_domain::{FlattenedMap, Leaf, ProvenanceRecord, StructuredData, StructuredValue};
use serde_json::{json, Map, Value};

/// Render a flattened mapping as a JSON object keyed by joined paths
///
/// The root path, if present, is keyed by the empty string.
pub fn to_json(flat: &FlattenedMap, separator: &str) -> Value {
    let object: Map<String, Value> = flat
        .joined(separator)
        .into_iter()
        .map(|(key, leaf)| (key, leaf_to_json(&leaf)))
        .collect();
    Value::Object(object)
}

/// Render a leaf as a JSON scalar
///
/// Non-finite floats have no JSON form and render as `null`.
pub fn leaf_to_json(leaf: &Leaf) -> Value {
    match leaf {
        Leaf::Bool(b) => Value::Bool(*b),
        Leaf::Integer(i) => Value::from(*i),
        Leaf::Float(x) => serde_json::Number::from_f64(*x).map_or(Value::Null, Value::Number),
        Leaf::Text(s) => Value::String(s.clone()),
    }
}

/// Render structured data as a nested JSON object
///
/// Nested records render as their data alone. Absent fields are omitted.
pub fn structured_to_json(data: &StructuredData) -> Value {
    let object: Map<String, Value> = data
        .iter()
        .filter_map(|(name, value)| value_to_json(value).map(|v| (name.to_string(), v)))
        .collect();
    Value::Object(object)
}

fn value_to_json(value: &StructuredValue) -> Option<Value> {
    match value {
        StructuredValue::Absent => None,
        StructuredValue::Leaf(leaf) => Some(leaf_to_json(leaf)),
        StructuredValue::Structured(data) => Some(structured_to_json(data)),
        StructuredValue::Record(record) => record.data().map(structured_to_json),
    }
}

/// Render a record with its signature, timestamp and data
pub fn record_to_json(record: &ProvenanceRecord) -> Value {
    json!({
        "signature": {
            "scheme": record.signature().scheme(),
            "value": record.signature().value(),
        },
        "timestamp": record.timestamp().as_millis(),
        "data": record.data().map(structured_to_json),
    })
}
