use rusqlite::Connection;
use sheetbridge_core::db::migrations::latest_version;
use sheetbridge_core::db::{open_cache_db, open_cache_db_in_memory, DbError};
use sheetbridge_core::{KvStore, SqliteKvStore};

#[test]
fn open_cache_db_in_memory_applies_all_migrations() {
    let conn = open_cache_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_cache");
}

#[test]
fn opening_same_cache_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheetbridge.db");

    let conn_first = open_cache_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_cache_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "kv_cache");
}

#[test]
fn opening_cache_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_cache_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn values_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheetbridge.db");

    {
        let conn = open_cache_db(&path).unwrap();
        let mut store = SqliteKvStore::new(&conn);
        store.write("feishu_selected_project", "project_42").unwrap();
    }

    let conn = open_cache_db(&path).unwrap();
    let store = SqliteKvStore::new(&conn);
    assert_eq!(
        store.read("feishu_selected_project").unwrap().as_deref(),
        Some("project_42")
    );
}

#[test]
fn stores_over_one_connection_observe_each_other() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut writer = SqliteKvStore::new(&conn);
    let reader = SqliteKvStore::new(&conn);

    writer.write("k", "v").unwrap();
    assert_eq!(reader.read("k").unwrap().as_deref(), Some("v"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
