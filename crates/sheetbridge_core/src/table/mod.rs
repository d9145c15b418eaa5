//! Table extraction: schema validation and matrix construction.
//!
//! # Responsibility
//! - Define the read-only seam to the host table/view API.
//! - Validate the table layout against the required-header contract.
//! - Assemble the normalized row/column matrix in caller-visible order.
//!
//! # Invariants
//! - Validation failure reports every missing header and fetches no records.
//! - The extractor never filters, deduplicates or reorders rows or columns.

pub mod extract;
pub mod schema;
pub mod source;
