//! Field (column) metadata supplied by the host table.

use crate::model::cell::FieldId;
use serde::{Deserialize, Serialize};

/// One column definition in the source table.
///
/// `id` is unique within a table snapshot and stable for the lifetime of one
/// extraction pass; `name` is the user-visible header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub name: String,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<FieldId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
