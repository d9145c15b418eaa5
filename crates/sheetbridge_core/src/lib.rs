//! Core domain logic for sheetbridge: table-view extraction, normalization
//! and conversion into downloadable workbooks, plus the project registry
//! cache that parameterizes conversions.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod registry;
pub mod remote;
pub mod service;
pub mod table;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::cell::{CellLeaf, FieldId, RawCellValue, RecordId};
pub use model::field::FieldDescriptor;
pub use model::matrix::TableMatrix;
pub use model::project::Project;
pub use normalize::normalize;
pub use registry::kv::{KvStore, MemoryKvStore, SqliteKvStore, StoreError};
pub use registry::project_registry::{AddOutcome, ProjectRegistry, RegistryError};
pub use registry::seed::{HttpProjectSeed, ProjectSeedSource, SeedError};
pub use remote::convert::{
    decode_excel_payload, decode_hex_payload, encode_hex_payload, ConfigProject, ConvertError,
    ConvertRequest, ConvertResponse, ConvertService,
};
pub use remote::http::HttpConvertService;
pub use service::export_service::{ExportArtifact, ExportError, ExportOptions, ExportService};
pub use table::extract::{extract, ExtractError};
pub use table::schema::{RequiredSchema, DEFAULT_REQUIRED_HEADERS};
pub use table::source::{SourceError, TableSource};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
