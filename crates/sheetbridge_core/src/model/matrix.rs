//! Row/column matrix produced by table extraction.
//!
//! # Invariants
//! - Row 0 is the header row (field names in declared order).
//! - Every data row has the same length as the header row.

use serde::{Deserialize, Serialize};

/// Ordered rows of normalized cell text, header first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableMatrix {
    rows: Vec<Vec<String>>,
}

impl TableMatrix {
    /// Wraps already-assembled rows.
    ///
    /// Callers must supply the header as row 0 and equal-length data rows;
    /// the extractor is the canonical producer.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Total row count, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header().map_or(0, <[String]>::len)
    }

    /// JSON-encodes the rows for the conversion request's `feishu_data`.
    pub fn to_json(&self) -> String {
        // Nested string vectors have no failing serialization path.
        serde_json::to_string(&self.rows).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::TableMatrix;

    fn sample() -> TableMatrix {
        TableMatrix::from_rows(vec![
            vec!["DID".to_string(), "名称".to_string()],
            vec!["0xF190".to_string(), "VIN".to_string()],
        ])
    }

    #[test]
    fn header_and_data_rows_are_split() {
        let matrix = sample();
        assert_eq!(matrix.header().unwrap(), ["DID", "名称"]);
        assert_eq!(matrix.data_rows().len(), 1);
        assert_eq!(matrix.row_count(), 2);
        assert_eq!(matrix.column_count(), 2);
    }

    #[test]
    fn empty_matrix_has_no_header() {
        let matrix = TableMatrix::from_rows(Vec::new());
        assert!(matrix.header().is_none());
        assert!(matrix.data_rows().is_empty());
        assert_eq!(matrix.column_count(), 0);
    }

    #[test]
    fn to_json_round_trips_through_serde() {
        let matrix = sample();
        let parsed: TableMatrix = serde_json::from_str(&matrix.to_json()).unwrap();
        assert_eq!(parsed, matrix);
    }
}
