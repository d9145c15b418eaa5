//! Matrix extraction over a validated table source.
//!
//! # Responsibility
//! - Build the header row from view-visible fields in display order.
//! - Validate required headers before touching any record.
//! - Normalize every cell and assemble the final matrix.
//!
//! # Invariants
//! - Row order mirrors `visible_record_ids` exactly; column order mirrors
//!   `fields` exactly.
//! - A record-fetch failure aborts the whole extraction; no partial matrix
//!   is ever returned.

use crate::model::matrix::TableMatrix;
use crate::normalize::normalize;
use crate::table::schema::RequiredSchema;
use crate::table::source::{SourceError, TableSource};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Extraction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Table layout lacks required headers; every missing name is listed,
    /// in required-schema order.
    MissingHeaders(Vec<String>),
    /// Host table call failed; extraction is abandoned.
    Source(SourceError),
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeaders(missing) => write!(
                f,
                "table layout is missing required headers: {}",
                missing.join(", ")
            ),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingHeaders(_) => None,
            Self::Source(err) => Some(err),
        }
    }
}

impl From<SourceError> for ExtractError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Extracts the normalized row/column matrix for the current view.
///
/// Records are fetched strictly sequentially, one fully resolved before the
/// next, so total latency scales linearly with record count.
pub fn extract(
    source: &impl TableSource,
    schema: &RequiredSchema,
) -> Result<TableMatrix, ExtractError> {
    info!("event=table_extract module=table status=start");

    let fields = source.fields()?;
    let header: Vec<String> = fields.iter().map(|field| field.name.clone()).collect();

    let missing = schema.missing_from(header.iter().map(String::as_str));
    if !missing.is_empty() {
        error!(
            "event=table_extract module=table status=error error_code=missing_headers missing={}",
            missing.join(",")
        );
        return Err(ExtractError::MissingHeaders(missing));
    }

    let record_ids = source.visible_record_ids()?;
    let mut rows = Vec::with_capacity(record_ids.len() + 1);
    rows.push(header);

    for record_id in &record_ids {
        let record = source.record(record_id)?;
        let row: Vec<String> = fields
            .iter()
            .map(|field| normalize(record.get(&field.id)))
            .collect();
        rows.push(row);
    }

    info!(
        "event=table_extract module=table status=ok records={} columns={}",
        record_ids.len(),
        fields.len()
    );
    Ok(TableMatrix::from_rows(rows))
}
