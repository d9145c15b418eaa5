//! Project registry cache: local-first list of user-defined projects.
//!
//! # Responsibility
//! - Persist the project list and selection state through an injected
//!   key-value store.
//! - Seed the list once from the remote source when no cache exists.
//!
//! # Invariants
//! - Every mutation re-persists the full sequence, never a partial patch.
//! - Remote seed failure degrades silently to an empty registry; the next
//!   load retries.

pub mod kv;
pub mod project_registry;
pub mod seed;
