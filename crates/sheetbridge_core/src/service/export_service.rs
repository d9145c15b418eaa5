//! Export use-case service.
//!
//! # Responsibility
//! - Run one export pass: extract the view matrix, call the conversion
//!   backend, decode the workbook payload, name the artifact.
//!
//! # Invariants
//! - Any stage failure is terminal for the pass; nothing is retried.
//! - No artifact is produced on failure, not even a partial one.

use crate::model::matrix::TableMatrix;
use crate::remote::convert::{
    decode_excel_payload, ConfigProject, ConvertError, ConvertRequest, ConvertService,
};
use crate::table::extract::{extract, ExtractError};
use crate::table::schema::RequiredSchema;
use crate::table::source::TableSource;
use chrono::{DateTime, Local};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Export pass failure; wraps the stage-specific error.
#[derive(Debug)]
pub enum ExportError {
    Extract(ExtractError),
    Convert(ConvertError),
}

impl ExportError {
    /// Human-readable failure messages for status surfaces.
    ///
    /// Missing-header validation reports every absent name in one message,
    /// matching how the table owner is expected to fix the layout in one go.
    pub fn messages(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extract(err) => write!(f, "{err}"),
            Self::Convert(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Extract(err) => Some(err),
            Self::Convert(err) => Some(err),
        }
    }
}

impl From<ExtractError> for ExportError {
    fn from(value: ExtractError) -> Self {
        Self::Extract(value)
    }
}

impl From<ConvertError> for ExportError {
    fn from(value: ConvertError) -> Self {
        Self::Convert(value)
    }
}

/// Caller-selected parameters for one export pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Stable project identifier sent to the backend.
    pub project_value: String,
    /// User-facing project label; used in the artifact file name when set.
    pub project_label: Option<String>,
    /// Name of the field holding actual values, mapped into the output.
    pub value_column: String,
    pub view_name: String,
    pub table_name: String,
}

/// Finished export: workbook bytes plus a suggested download file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Export facade over a conversion transport implementation.
pub struct ExportService<C: ConvertService> {
    client: C,
}

impl<C: ConvertService> ExportService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Runs one export pass over the current view.
    pub fn export(
        &self,
        source: &impl TableSource,
        schema: &RequiredSchema,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, ExportError> {
        info!(
            "event=export module=service status=start project={} view={}",
            options.project_value, options.view_name
        );

        let matrix = match extract(source, schema) {
            Ok(matrix) => matrix,
            Err(err) => {
                error!("event=export module=service status=error stage=extract error={err}");
                return Err(err.into());
            }
        };

        let request = build_request(&matrix, options);
        let bytes = match self
            .client
            .convert(&request)
            .and_then(|response| decode_excel_payload(&response))
        {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("event=export module=service status=error stage=convert error={err}");
                return Err(err.into());
            }
        };

        let file_name = artifact_file_name(options, Local::now());
        info!(
            "event=export module=service status=ok rows={} bytes={} file={}",
            matrix.row_count(),
            bytes.len(),
            file_name
        );
        Ok(ExportArtifact { file_name, bytes })
    }
}

fn build_request(matrix: &TableMatrix, options: &ExportOptions) -> ConvertRequest {
    ConvertRequest::new(
        matrix,
        ConfigProject::for_value_column(options.value_column.as_str()),
        options.project_value.as_str(),
        options.view_name.as_str(),
        options.table_name.as_str(),
    )
}

/// `{project}_{view}_{timestamp}_{table}.xlsx`, with the user-facing label
/// preferred over the raw project value.
fn artifact_file_name(options: &ExportOptions, now: DateTime<Local>) -> String {
    let label = options
        .project_label
        .as_deref()
        .unwrap_or(options.project_value.as_str());
    let timestamp = now.format("%Y_%m_%d_%H_%M_%S");
    format!(
        "{label}_{}_{timestamp}_{}.xlsx",
        options.view_name, options.table_name
    )
}
