//! Raw cell value union as supplied by the host table API.
//!
//! # Responsibility
//! - Mirror the host's per-cell JSON shapes: primitive, tagged object, or a
//!   flat array of such leaves.
//! - Deserialize without loss so unrecognized shapes stay inspectable.
//!
//! # Invariants
//! - Arrays never nest: a `Many` value holds leaves only.
//! - Values are read-only snapshots; nothing in core mutates them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Stable field (column) identifier assigned by the host table.
pub type FieldId = String;

/// Stable record (row) identifier assigned by the host table.
pub type RecordId = String;

/// One non-array cell payload.
///
/// Variant order matters for untagged deserialization: `Absent` must come
/// first so JSON `null` does not match a later variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellLeaf {
    /// JSON `null`; also what the host sends for cleared cells.
    Absent,
    Bool(bool),
    Number(Number),
    Text(String),
    /// Structured value carrying auxiliary data next to a human-readable
    /// `text` or `name` key (single-select options, linked records, users).
    Tagged(Map<String, Value>),
}

/// Raw cell value: a single leaf or a flat list of leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCellValue {
    Leaf(CellLeaf),
    Many(Vec<CellLeaf>),
}

impl RawCellValue {
    /// Plain-text leaf value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf(CellLeaf::Text(value.into()))
    }

    /// Tagged-object leaf value built from key/value pairs.
    pub fn tagged<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect::<Map<String, Value>>();
        Self::Leaf(CellLeaf::Tagged(map))
    }
}

#[cfg(test)]
mod tests {
    use super::{CellLeaf, RawCellValue};

    #[test]
    fn null_deserializes_to_absent_leaf() {
        let value: RawCellValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, RawCellValue::Leaf(CellLeaf::Absent));
    }

    #[test]
    fn scalar_shapes_deserialize_to_matching_leaves() {
        let text: RawCellValue = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(text, RawCellValue::text("abc"));

        let flag: RawCellValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, RawCellValue::Leaf(CellLeaf::Bool(true)));

        let number: RawCellValue = serde_json::from_str("42").unwrap();
        assert!(matches!(number, RawCellValue::Leaf(CellLeaf::Number(_))));
    }

    #[test]
    fn object_deserializes_to_tagged_leaf() {
        let value: RawCellValue = serde_json::from_str(r#"{"id":"x","text":"abc"}"#).unwrap();
        assert_eq!(value, RawCellValue::tagged([("id", "x"), ("text", "abc")]));
    }

    #[test]
    fn array_deserializes_to_flat_leaf_list() {
        let value: RawCellValue = serde_json::from_str(r#"["a",{"name":"b"},null]"#).unwrap();
        match value {
            RawCellValue::Many(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], CellLeaf::Text("a".to_string()));
                assert_eq!(items[2], CellLeaf::Absent);
            }
            other => panic!("expected Many, got {other:?}"),
        }
    }
}
