//! Flattening of nested provenance into key-path mappings
//!
//! The walk is depth-first and visits fields in insertion order. Nested
//! records are unwrapped to their data; their signature and timestamp do not
//! appear in the output. When two leaves land on the same key path the one
//! visited last wins, silently.

use crate::record::ProvenanceRecord;
use crate::value::{Leaf, StructuredData, StructuredValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered sequence of field names locating a leaf
///
/// The root path is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Build a key path from its segments
    ///
    /// # Examples
    ///
    /// ```
    /// use provenance_domain::KeyPath;
    ///
    /// let path = KeyPath::new(["build", "commit"]);
    /// assert_eq!(path.to_string(), "build.commit");
    /// ```
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Check whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Path segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// A new path with `name` appended
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Join segments with `separator`
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join("."))
    }
}

/// Flat mapping from key path to leaf value
///
/// Iteration is sorted by key path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedMap(BTreeMap<KeyPath, Leaf>);

impl FlattenedMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a leaf, returning the value it overwrote
    pub fn insert(&mut self, path: KeyPath, leaf: Leaf) -> Option<Leaf> {
        self.0.insert(path, leaf)
    }

    /// Look up a leaf by path
    pub fn get(&self, path: &KeyPath) -> Option<&Leaf> {
        self.0.get(path)
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries sorted by path
    pub fn iter(&self) -> impl Iterator<Item = (&KeyPath, &Leaf)> {
        self.0.iter()
    }

    /// Key the mapping by joined path strings
    ///
    /// Distinct paths can join to the same string when a field name contains
    /// the separator; the later path in sort order wins.
    pub fn joined(&self, separator: &str) -> BTreeMap<String, Leaf> {
        self.0
            .iter()
            .map(|(path, leaf)| (path.join(separator), leaf.clone()))
            .collect()
    }

    /// Unwrap the underlying map
    pub fn into_inner(self) -> BTreeMap<KeyPath, Leaf> {
        self.0
    }
}

impl<'a> IntoIterator for &'a FlattenedMap {
    type Item = (&'a KeyPath, &'a Leaf);
    type IntoIter = std::collections::btree_map::Iter<'a, KeyPath, Leaf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(KeyPath, Leaf)> for FlattenedMap {
    fn from_iter<I: IntoIterator<Item = (KeyPath, Leaf)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Flatten a record's data
///
/// A record without data flattens to an empty mapping.
pub fn flatten(record: &ProvenanceRecord) -> FlattenedMap {
    let mut acc = FlattenedMap::new();
    if let Some(data) = record.data() {
        walk_structured(&mut acc, data, &mut Vec::new());
    }
    acc
}

/// Flatten an arbitrary value; a bare leaf lands on the root path
pub fn flatten_value(value: &StructuredValue) -> FlattenedMap {
    let mut acc = FlattenedMap::new();
    flatten_into(&mut acc, value, KeyPath::root());
    acc
}

/// Flatten `value` under `prefix` into an existing mapping
///
/// Entries already in `acc` are overwritten by colliding paths.
pub fn flatten_into(acc: &mut FlattenedMap, value: &StructuredValue, prefix: KeyPath) {
    let mut path = prefix.0;
    walk(acc, value, &mut path);
}

fn walk(acc: &mut FlattenedMap, value: &StructuredValue, path: &mut Vec<String>) {
    match value {
        StructuredValue::Absent => {}
        StructuredValue::Record(record) => {
            if let Some(data) = record.data() {
                walk_structured(acc, data, path);
            }
        }
        StructuredValue::Structured(data) => walk_structured(acc, data, path),
        StructuredValue::Leaf(leaf) => {
            acc.insert(KeyPath(path.clone()), leaf.clone());
        }
    }
}

fn walk_structured(acc: &mut FlattenedMap, data: &StructuredData, path: &mut Vec<String>) {
    for (name, value) in data.iter() {
        path.push(name.to_string());
        walk(acc, value, path);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Signature;
    use crate::timestamp::Timestamp;

    fn record(data: Option<StructuredData>) -> ProvenanceRecord {
        ProvenanceRecord::from_parts(Signature::new("test", vec![9, 9]), Timestamp::from_millis(5), data)
    }

    #[test]
    fn test_flat_data() {
        let data = StructuredData::new().with("a", 1).with("b", "two").with("c", true);
        let flat = flatten(&record(Some(data)));

        assert_eq!(flat.len(), 3);
        assert_eq!(flat.get(&KeyPath::new(["a"])), Some(&Leaf::Integer(1)));
        assert_eq!(flat.get(&KeyPath::new(["b"])), Some(&Leaf::from("two")));
        assert!(flat.iter().all(|(path, _)| path.len() == 1));
    }

    #[test]
    fn test_nested_record_is_unwrapped() {
        let inner = record(Some(StructuredData::new().with("field", 1).with("computed", 2)));
        let outer = StructuredData::new().with("ct", inner).with("field", 2);

        let flat = flatten(&record(Some(outer)));

        let expected: FlattenedMap = vec![
            (KeyPath::new(["field"]), Leaf::Integer(2)),
            (KeyPath::new(["ct", "computed"]), Leaf::Integer(2)),
            (KeyPath::new(["ct", "field"]), Leaf::Integer(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_absent_contributes_nothing() {
        let data = StructuredData::new()
            .with("missing", StructuredValue::Absent)
            .with("empty_record", record(None))
            .with("empty", StructuredData::new())
            .with("kept", 1);

        let flat = flatten(&record(Some(data)));
        assert_eq!(flat.len(), 1);
        assert!(flat.get(&KeyPath::new(["kept"])).is_some());
    }

    #[test]
    fn test_absent_record_data() {
        assert!(flatten(&record(None)).is_empty());
    }

    #[test]
    fn test_deep_nesting() {
        let data = StructuredData::new().with(
            "a",
            StructuredData::new().with("b", StructuredData::new().with("c", 3.5)),
        );
        let flat = flatten(&record(Some(data)));
        assert_eq!(flat.get(&KeyPath::new(["a", "b", "c"])), Some(&Leaf::Float(3.5)));
    }

    #[test]
    fn test_bare_leaf_lands_on_root() {
        let flat = flatten_value(&StructuredValue::from("solo"));
        assert_eq!(flat.get(&KeyPath::root()), Some(&Leaf::from("solo")));
    }

    #[test]
    fn test_record_wrapping_is_transparent_at_root() {
        let data = StructuredData::new().with("x", 1);
        let wrapped = StructuredValue::from(record(Some(data.clone())));
        assert_eq!(flatten_value(&wrapped), flatten_value(&StructuredValue::from(data)));
    }

    #[test]
    fn test_collision_last_write_wins() {
        let mut acc = FlattenedMap::new();
        let first = StructuredValue::from(StructuredData::new().with("id", 1).with("only_first", true));
        let second = StructuredValue::from(StructuredData::new().with("id", 2));

        flatten_into(&mut acc, &first, KeyPath::new(["src"]));
        flatten_into(&mut acc, &second, KeyPath::new(["src"]));

        assert_eq!(acc.len(), 2);
        assert_eq!(acc.get(&KeyPath::new(["src", "id"])), Some(&Leaf::Integer(2)));
        assert_eq!(acc.get(&KeyPath::new(["src", "only_first"])), Some(&Leaf::Bool(true)));
    }

    #[test]
    fn test_collision_follows_visit_order() {
        // Both sources reach ["k"]; the tree flattened second wins.
        let mut acc = FlattenedMap::new();
        flatten_into(&mut acc, &StructuredValue::from(1), KeyPath::new(["k"]));
        let tree = StructuredValue::from(StructuredData::new().with("k", 2));
        flatten_into(&mut acc, &tree, KeyPath::root());

        assert_eq!(acc.get(&KeyPath::new(["k"])), Some(&Leaf::Integer(2)));
    }

    #[test]
    fn test_joined_keys() {
        let data = StructuredData::new().with("a", StructuredData::new().with("b", 1));
        let joined = flatten(&record(Some(data))).joined("/");
        assert_eq!(joined.get("a/b"), Some(&Leaf::Integer(1)));
    }

    #[test]
    fn test_key_path_child() {
        let path = KeyPath::root().child("a").child("b");
        assert_eq!(path, KeyPath::new(["a", "b"]));
        assert!(KeyPath::root().is_root());
        assert!(!path.is_root());
    }
}
