use sheetbridge_core::db::open_cache_db_in_memory;
use sheetbridge_core::{
    AddOutcome, ProjectRegistry, ProjectSeedSource, SeedError, SqliteKvStore,
};
use std::cell::Cell;

struct ScriptedSeed {
    body: Option<String>,
    calls: Cell<usize>,
}

impl ScriptedSeed {
    fn with_body(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            calls: Cell::new(0),
        }
    }

    fn unreachable_backend() -> Self {
        Self {
            body: None,
            calls: Cell::new(0),
        }
    }
}

impl ProjectSeedSource for ScriptedSeed {
    fn fetch(&self) -> Result<String, SeedError> {
        self.calls.set(self.calls.get() + 1);
        self.body
            .clone()
            .ok_or_else(|| SeedError::Transport("connection refused".to_string()))
    }
}

#[test]
fn first_load_seeds_from_remote_and_persists() {
    let conn = open_cache_db_in_memory().unwrap();
    let seed = ScriptedSeed::with_body(
        r#"{"success":true,"projects":[
            {"label":"整车控制器","value":"p1"},
            {"name":"车身域","id":"p2"}
        ]}"#,
    );

    let mut registry = ProjectRegistry::new(SqliteKvStore::new(&conn));
    let projects = registry.load(&seed).unwrap().to_vec();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].label, "车身域");
    assert_eq!(projects[1].value, "p2");
    assert_eq!(seed.calls.get(), 1);

    // A fresh registry over the same cache must not call the backend again.
    let mut second = ProjectRegistry::new(SqliteKvStore::new(&conn));
    let cached = second.load(&seed).unwrap().to_vec();
    assert_eq!(cached, projects);
    assert_eq!(seed.calls.get(), 1);
}

#[test]
fn seed_wrapped_in_proxy_markup_still_loads() {
    let conn = open_cache_db_in_memory().unwrap();
    let seed = ScriptedSeed::with_body(
        "<html>tunnel warning</html>{\"success\":true,\"projects\":[{\"label\":\"A\",\"value\":\"p1\"}]}",
    );

    let mut registry = ProjectRegistry::new(SqliteKvStore::new(&conn));
    let projects = registry.load(&seed).unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].value, "p1");
}

#[test]
fn unreachable_backend_degrades_to_empty_registry() {
    let conn = open_cache_db_in_memory().unwrap();
    let seed = ScriptedSeed::unreachable_backend();

    let mut registry = ProjectRegistry::new(SqliteKvStore::new(&conn));
    assert!(registry.load(&seed).unwrap().is_empty());

    // Nothing was persisted, so the next load retries the backend.
    let recovered = ScriptedSeed::with_body(r#"{"success":true,"projects":[]}"#);
    registry.load(&recovered).unwrap();
    assert_eq!(recovered.calls.get(), 1);
}

#[test]
fn local_mutations_survive_reload_without_remote_calls() {
    let conn = open_cache_db_in_memory().unwrap();

    let value = {
        let mut registry = ProjectRegistry::new(SqliteKvStore::new(&conn));
        let outcome = registry.add("动力域").unwrap();
        registry.add("底盘域").unwrap();
        match outcome {
            AddOutcome::Added(value) => value,
            other => panic!("expected a fresh project, got {other:?}"),
        }
    };

    let seed = ScriptedSeed::unreachable_backend();
    let mut registry = ProjectRegistry::new(SqliteKvStore::new(&conn));
    let projects = registry.load(&seed).unwrap().to_vec();
    assert_eq!(seed.calls.get(), 0);
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].value, value);

    registry.remove(&value).unwrap();
    let mut reloaded = ProjectRegistry::new(SqliteKvStore::new(&conn));
    let remaining = reloaded.load(&seed).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].label, "底盘域");
}

#[test]
fn selection_state_is_cleared_when_selected_project_is_removed() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut registry = ProjectRegistry::new(SqliteKvStore::new(&conn));

    let kept = registry.add("保留项目").unwrap().value().to_string();
    let removed = registry.add("临时项目").unwrap().value().to_string();
    assert_eq!(
        registry.selected_project().unwrap().as_deref(),
        Some(removed.as_str())
    );

    registry.remove(&removed).unwrap();
    assert_eq!(registry.selected_project().unwrap(), None);

    // Removing a non-selected project leaves the selection alone.
    registry.select_project(Some(&kept)).unwrap();
    registry.remove("project_unknown").unwrap();
    assert_eq!(
        registry.selected_project().unwrap().as_deref(),
        Some(kept.as_str())
    );
}
