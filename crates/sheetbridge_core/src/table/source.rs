//! Read-only seam to the host table/view API.

use crate::model::cell::{FieldId, RawCellValue, RecordId};
use crate::model::field::FieldDescriptor;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque host-side failure (the host SDK owns the detail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "table source failure: {}", self.message)
    }
}

impl Error for SourceError {}

/// External table/view API consumed by the extractor.
///
/// # Contract
/// - `fields` returns the view-visible columns in display order, stable
///   across calls within one extraction pass. Header order therefore follows
///   what the user currently sees, not the table's canonical field order.
/// - `visible_record_ids` preserves the view's filtered/sorted row order.
/// - `record` maps field id to raw value; absent entries mean empty cells.
pub trait TableSource {
    fn fields(&self) -> Result<Vec<FieldDescriptor>, SourceError>;
    fn visible_record_ids(&self) -> Result<Vec<RecordId>, SourceError>;
    fn record(&self, id: &str) -> Result<HashMap<FieldId, RawCellValue>, SourceError>;
}
