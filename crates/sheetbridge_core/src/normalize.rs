//! Cell value normalizer.
//!
//! # Responsibility
//! - Flatten one raw cell value of unknown shape into a single display
//!   string for the export matrix.
//!
//! # Invariants
//! - Total over every well-formed `RawCellValue`; never panics.
//! - Deterministic: the same input always yields the same string.
//! - Absent input yields the empty string.

use crate::model::cell::{CellLeaf, RawCellValue};
use serde_json::{Map, Value};

/// Separator between normalized elements of an array value.
const LIST_SEPARATOR: &str = ", ";

/// Normalizes one raw cell value into flat display text.
///
/// `None` stands for a field that is missing from the record mapping, which
/// the host treats the same as an empty cell.
pub fn normalize(value: Option<&RawCellValue>) -> String {
    match value {
        None => String::new(),
        Some(RawCellValue::Leaf(leaf)) => normalize_leaf(leaf),
        Some(RawCellValue::Many(items)) => items
            .iter()
            .map(normalize_leaf)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
    }
}

fn normalize_leaf(leaf: &CellLeaf) -> String {
    match leaf {
        CellLeaf::Absent => String::new(),
        CellLeaf::Bool(flag) => flag.to_string(),
        CellLeaf::Number(number) => number.to_string(),
        CellLeaf::Text(text) => text.clone(),
        CellLeaf::Tagged(map) => normalize_tagged(map),
    }
}

/// `text` wins over `name`; anything else falls through to canonical JSON so
/// unrecognized shapes are kept lossless instead of being dropped.
fn normalize_tagged(map: &Map<String, Value>) -> String {
    if let Some(text) = map.get("text") {
        return stringify_property(text);
    }
    if let Some(name) = map.get("name") {
        return stringify_property(name);
    }
    // String-keyed JSON maps have no failing serialization path.
    serde_json::to_string(map).unwrap_or_default()
}

/// A JSON string property stringifies bare; any other value keeps its
/// canonical JSON text (an explicit `null` therefore yields `"null"`).
fn stringify_property(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
