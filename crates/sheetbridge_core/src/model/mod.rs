//! Domain model for table export.
//!
//! # Responsibility
//! - Define canonical data structures shared by the normalizer, the table
//!   extractor and the project registry.
//! - Keep host-API and wire-format shapes out of business orchestration.
//!
//! # Invariants
//! - Model types never mutate host-supplied raw values.
//! - Matrix rows always share the header row's length.

pub mod cell;
pub mod field;
pub mod matrix;
pub mod project;
