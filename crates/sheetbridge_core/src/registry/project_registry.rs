//! Project registry: cached list plus selection state.
//!
//! # Responsibility
//! - Own the ordered project sequence and its load/add/remove lifecycle.
//! - Keep the durable cache authoritative once seeded.
//!
//! # Invariants
//! - A cache hit never triggers a remote call.
//! - Labels stay unique: adding a duplicate selects the existing entry.
//! - Mutations persist the full sequence synchronously before returning.
//! - Single logical owner; cross-thread callers must wrap the registry in
//!   their own mutex around each read-modify-persist.

use crate::model::project::Project;
use crate::registry::kv::{KvStore, StoreError};
use crate::registry::seed::{parse_seed_projects, ProjectSeedSource};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Cache key for the persisted project sequence.
pub const PROJECTS_KEY: &str = "feishu_project_options";
/// Cache key for the currently selected project value.
pub const SELECTED_PROJECT_KEY: &str = "feishu_selected_project";
/// Cache key for the currently selected value-column field id.
pub const SELECTED_VALUE_FIELD_KEY: &str = "feishu_selected_value_field";

/// Registry operation failure.
#[derive(Debug)]
pub enum RegistryError {
    /// `add` input is empty after trimming.
    BlankLabel,
    /// Durable store read/write failed.
    Store(StoreError),
    /// Persisted project snapshot is not parseable.
    CorruptCache(serde_json::Error),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankLabel => write!(f, "project label cannot be blank"),
            Self::Store(err) => write!(f, "{err}"),
            Self::CorruptCache(err) => write!(f, "cached project list is corrupt: {err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BlankLabel => None,
            Self::Store(err) => Some(err),
            Self::CorruptCache(err) => Some(err),
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of an `add` call; both carry the affected project value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new project was appended and selected.
    Added(String),
    /// The label already existed; the existing entry was selected instead.
    SelectedExisting(String),
}

impl AddOutcome {
    pub fn value(&self) -> &str {
        match self {
            Self::Added(value) | Self::SelectedExisting(value) => value,
        }
    }
}

/// Local-first project registry over an injected key-value store.
pub struct ProjectRegistry<S: KvStore> {
    store: S,
    projects: Vec<Project>,
}

impl<S: KvStore> ProjectRegistry<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            projects: Vec::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Loads the registry: cache snapshot verbatim when present, otherwise
    /// one remote seed fetch.
    ///
    /// Seed failure is non-critical configuration loss: it is logged, the
    /// registry stays empty and unpersisted, and a later `load` retries.
    pub fn load(&mut self, seed: &impl ProjectSeedSource) -> Result<&[Project], RegistryError> {
        if let Some(snapshot) = self.store.read(PROJECTS_KEY)? {
            self.projects =
                serde_json::from_str(&snapshot).map_err(RegistryError::CorruptCache)?;
            info!(
                "event=registry_load module=registry status=ok source=cache count={}",
                self.projects.len()
            );
            return Ok(&self.projects);
        }

        match seed
            .fetch()
            .and_then(|body| parse_seed_projects(body.as_str()))
        {
            Ok(projects) => {
                self.persist_projects(&projects)?;
                self.projects = projects;
                info!(
                    "event=registry_load module=registry status=ok source=remote count={}",
                    self.projects.len()
                );
            }
            Err(err) => {
                warn!(
                    "event=registry_load module=registry status=degraded source=remote error={err}"
                );
                self.projects.clear();
            }
        }
        Ok(&self.projects)
    }

    /// Adds a project by label, or selects the existing entry with the same
    /// label. The label is trimmed first; a blank result is rejected.
    pub fn add(&mut self, label: &str) -> Result<AddOutcome, RegistryError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::BlankLabel);
        }

        if let Some(existing) = self.projects.iter().find(|project| project.label == trimmed) {
            let value = existing.value.clone();
            self.select_project(Some(&value))?;
            info!(
                "event=registry_add module=registry status=ok outcome=existing value={value}"
            );
            return Ok(AddOutcome::SelectedExisting(value));
        }

        let project = Project::with_generated_value(trimmed);
        let value = project.value.clone();
        self.projects.push(project);
        self.persist()?;
        self.select_project(Some(&value))?;
        info!("event=registry_add module=registry status=ok outcome=added value={value}");
        Ok(AddOutcome::Added(value))
    }

    /// Removes the project with the given value; unknown values are a no-op.
    ///
    /// Removing the currently selected project clears the selection.
    pub fn remove(&mut self, value: &str) -> Result<&[Project], RegistryError> {
        let before = self.projects.len();
        self.projects.retain(|project| project.value != value);
        if self.projects.len() == before {
            return Ok(&self.projects);
        }

        self.persist()?;
        if self.selected_project()?.as_deref() == Some(value) {
            self.select_project(None)?;
        }
        info!("event=registry_remove module=registry status=ok value={value}");
        Ok(&self.projects)
    }

    /// Persists or clears the selected project value.
    pub fn select_project(&mut self, value: Option<&str>) -> Result<(), RegistryError> {
        match value {
            Some(value) => self.store.write(SELECTED_PROJECT_KEY, value)?,
            None => self.store.remove(SELECTED_PROJECT_KEY)?,
        }
        Ok(())
    }

    pub fn selected_project(&self) -> Result<Option<String>, RegistryError> {
        Ok(self.store.read(SELECTED_PROJECT_KEY)?)
    }

    /// Persists or clears the selected value-column field id.
    pub fn select_value_field(&mut self, field_id: Option<&str>) -> Result<(), RegistryError> {
        match field_id {
            Some(field_id) => self.store.write(SELECTED_VALUE_FIELD_KEY, field_id)?,
            None => self.store.remove(SELECTED_VALUE_FIELD_KEY)?,
        }
        Ok(())
    }

    pub fn selected_value_field(&self) -> Result<Option<String>, RegistryError> {
        Ok(self.store.read(SELECTED_VALUE_FIELD_KEY)?)
    }

    fn persist(&mut self) -> Result<(), RegistryError> {
        let snapshot =
            serde_json::to_string(&self.projects).map_err(RegistryError::CorruptCache)?;
        self.store.write(PROJECTS_KEY, &snapshot)?;
        Ok(())
    }

    fn persist_projects(&mut self, projects: &[Project]) -> Result<(), RegistryError> {
        let snapshot = serde_json::to_string(projects).map_err(RegistryError::CorruptCache)?;
        self.store.write(PROJECTS_KEY, &snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AddOutcome, ProjectRegistry, RegistryError, PROJECTS_KEY};
    use crate::registry::kv::{KvStore, MemoryKvStore};
    use crate::registry::seed::{ProjectSeedSource, SeedError};
    use std::cell::Cell;

    struct FakeSeed {
        body: Result<String, ()>,
        calls: Cell<usize>,
    }

    impl FakeSeed {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                body: Err(()),
                calls: Cell::new(0),
            }
        }
    }

    impl ProjectSeedSource for FakeSeed {
        fn fetch(&self) -> Result<String, SeedError> {
            self.calls.set(self.calls.get() + 1);
            self.body
                .clone()
                .map_err(|()| SeedError::Transport("connection refused".to_string()))
        }
    }

    #[test]
    fn duplicate_label_selects_existing_entry() {
        let mut registry = ProjectRegistry::new(MemoryKvStore::new());

        let first = registry.add("Foo").unwrap();
        let second = registry.add("Foo").unwrap();

        assert_eq!(registry.projects().len(), 1);
        assert_eq!(first.value(), second.value());
        assert!(matches!(first, AddOutcome::Added(_)));
        assert!(matches!(second, AddOutcome::SelectedExisting(_)));
    }

    #[test]
    fn blank_label_is_rejected_without_changes() {
        let mut registry = ProjectRegistry::new(MemoryKvStore::new());
        let err = registry.add("  ").unwrap_err();
        assert!(matches!(err, RegistryError::BlankLabel));
        assert!(registry.projects().is_empty());
    }

    #[test]
    fn add_trims_label_before_matching() {
        let mut registry = ProjectRegistry::new(MemoryKvStore::new());
        registry.add("Foo").unwrap();
        let outcome = registry.add("  Foo  ").unwrap();
        assert!(matches!(outcome, AddOutcome::SelectedExisting(_)));
        assert_eq!(registry.projects().len(), 1);
    }

    #[test]
    fn remove_clears_selection_of_removed_project() {
        let mut registry = ProjectRegistry::new(MemoryKvStore::new());
        let outcome = registry.add("Foo").unwrap();
        assert_eq!(
            registry.selected_project().unwrap().as_deref(),
            Some(outcome.value())
        );

        registry.remove(outcome.value()).unwrap();
        assert!(registry.projects().is_empty());
        assert_eq!(registry.selected_project().unwrap(), None);
    }

    #[test]
    fn remove_unknown_value_is_a_no_op() {
        let store = MemoryKvStore::new();
        let mut registry = ProjectRegistry::new(store.clone());
        registry.add("Foo").unwrap();

        let remaining = registry.remove("project_missing").unwrap().to_vec();
        assert_eq!(remaining.len(), 1);
        assert!(store.contains(PROJECTS_KEY));
    }

    #[test]
    fn cache_hit_skips_remote_seed() {
        let store = MemoryKvStore::new();
        let mut first = ProjectRegistry::new(store.clone());
        first.add("Foo").unwrap();

        let seed = FakeSeed::ok(r#"{"success":true,"projects":[]}"#);
        let mut second = ProjectRegistry::new(store);
        let projects = second.load(&seed).unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].label, "Foo");
        assert_eq!(seed.calls.get(), 0);
    }

    #[test]
    fn seed_failure_leaves_registry_empty_and_retries_next_load() {
        let store = MemoryKvStore::new();
        let mut registry = ProjectRegistry::new(store.clone());

        let failing = FakeSeed::failing();
        assert!(registry.load(&failing).unwrap().is_empty());
        assert!(!store.contains(PROJECTS_KEY));

        let seed = FakeSeed::ok(r#"{"success":true,"projects":[{"label":"A","value":"p1"}]}"#);
        let projects = registry.load(&seed).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(seed.calls.get(), 1);
        assert!(store.contains(PROJECTS_KEY));
    }

    #[test]
    fn value_field_selection_round_trips() {
        let mut registry = ProjectRegistry::new(MemoryKvStore::new());
        registry.select_value_field(Some("fldX")).unwrap();
        assert_eq!(
            registry.selected_value_field().unwrap().as_deref(),
            Some("fldX")
        );
        registry.select_value_field(None).unwrap();
        assert_eq!(registry.selected_value_field().unwrap(), None);
    }
}
