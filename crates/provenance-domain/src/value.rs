//! Structured provenance values
//!
//! Captured provenance is a tree: named fields whose values are primitive
//! leaves, nested structures, or whole provenance records.

use crate::record::ProvenanceRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A primitive provenance value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Leaf {
    /// Boolean flag
    Bool(bool),

    /// Signed integer
    Integer(i64),

    /// Floating point number
    Float(f64),

    /// Free-form text
    Text(String),
}

impl Leaf {
    /// Get the text content, if this leaf is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Leaf::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this leaf is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Leaf::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Bool(b) => write!(f, "{}", b),
            Leaf::Integer(i) => write!(f, "{}", i),
            Leaf::Float(x) => write!(f, "{}", x),
            Leaf::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Leaf {
    fn from(value: bool) -> Self {
        Leaf::Bool(value)
    }
}

impl From<i64> for Leaf {
    fn from(value: i64) -> Self {
        Leaf::Integer(value)
    }
}

impl From<i32> for Leaf {
    fn from(value: i32) -> Self {
        Leaf::Integer(i64::from(value))
    }
}

impl From<u32> for Leaf {
    fn from(value: u32) -> Self {
        Leaf::Integer(i64::from(value))
    }
}

impl From<f64> for Leaf {
    fn from(value: f64) -> Self {
        Leaf::Float(value)
    }
}

impl From<&str> for Leaf {
    fn from(value: &str) -> Self {
        Leaf::Text(value.to_string())
    }
}

impl From<String> for Leaf {
    fn from(value: String) -> Self {
        Leaf::Text(value)
    }
}

/// A value inside captured provenance data
///
/// Values form an owned tree, so a record can never contain itself.
/// Producers building values from shared state must still keep that state
/// acyclic, since flattening recurses without a depth limit.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    /// No value; contributes nothing when flattened
    Absent,

    /// A primitive value
    Leaf(Leaf),

    /// A nested set of named fields
    Structured(StructuredData),

    /// A complete provenance record (only its data survives flattening)
    Record(Box<ProvenanceRecord>),
}

impl StructuredValue {
    /// Check whether this value is absent
    pub fn is_absent(&self) -> bool {
        matches!(self, StructuredValue::Absent)
    }

    /// Get the leaf, if this value is one
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            StructuredValue::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Get the nested structure, if this value is one
    pub fn as_structured(&self) -> Option<&StructuredData> {
        match self {
            StructuredValue::Structured(data) => Some(data),
            _ => None,
        }
    }

    /// Get the nested record, if this value is one
    pub fn as_record(&self) -> Option<&ProvenanceRecord> {
        match self {
            StructuredValue::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Leaf> for StructuredValue {
    fn from(value: Leaf) -> Self {
        StructuredValue::Leaf(value)
    }
}

impl From<StructuredData> for StructuredValue {
    fn from(value: StructuredData) -> Self {
        StructuredValue::Structured(value)
    }
}

impl From<ProvenanceRecord> for StructuredValue {
    fn from(value: ProvenanceRecord) -> Self {
        StructuredValue::Record(Box::new(value))
    }
}

impl<T: Into<StructuredValue>> From<Option<T>> for StructuredValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StructuredValue::Absent, Into::into)
    }
}

macro_rules! leaf_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StructuredValue {
                fn from(value: $ty) -> Self {
                    StructuredValue::Leaf(Leaf::from(value))
                }
            }
        )*
    };
}

leaf_value!(bool, i64, i32, u32, f64, &str, String);

/// Named fields of captured provenance
///
/// Field names are unique. Fields keep insertion order for iteration, but
/// equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredData {
    fields: IndexMap<String, StructuredValue>,
}

impl StructuredData {
    /// Create an empty structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    ///
    /// # Examples
    ///
    /// ```
    /// use provenance_domain::StructuredData;
    ///
    /// let data = StructuredData::new()
    ///     .with("tool", "rustc")
    ///     .with("version", 1);
    /// assert_eq!(data.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StructuredValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field, returning the previous value for that name
    ///
    /// Replacing a field keeps its original position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<StructuredValue>,
    ) -> Option<StructuredValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&StructuredValue> {
        self.fields.get(name)
    }

    /// Check whether a field exists
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructuredValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate field names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for StructuredData
where
    K: Into<String>,
    V: Into<StructuredValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = StructuredData::new();
        for (name, value) in iter {
            data.insert(name, value);
        }
        data
    }
}

impl IntoIterator for StructuredData {
    type Item = (String, StructuredValue);
    type IntoIter = indexmap::map::IntoIter<String, StructuredValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
