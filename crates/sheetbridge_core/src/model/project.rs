//! User-managed project entry for the registry cache.
//!
//! # Invariants
//! - `label` is user-facing and unique among registry entries.
//! - `value` is a stable identifier; locally generated values are time-based
//!   and never reused after deletion.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// One named project used to parameterize a conversion request.
///
/// Field names match the persisted cache payload and the seed wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub label: String,
    pub value: String,
}

impl Project {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Creates a project with a freshly generated time-based identifier.
    pub fn with_generated_value(label: impl Into<String>) -> Self {
        Self::new(label, generated_project_value())
    }
}

static LAST_GENERATED_MS: AtomicU64 = AtomicU64::new(0);

/// Generates a `project_<epoch_millis>` identifier.
///
/// The millisecond value is bumped past the last one handed out, so two
/// projects created within the same millisecond still get distinct values.
pub(crate) fn generated_project_value() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default();

    let mut last = LAST_GENERATED_MS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_GENERATED_MS.compare_exchange(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return format!("project_{next}"),
            Err(observed) => last = observed,
        }
    }
}
