use chrono::{TimeZone, Utc};
use remindly_core::db::migrations::latest_version;
use remindly_core::db::{open_db, open_db_in_memory, DbError};
use remindly_core::{
    Birthday, Category, KeyValueStore, RecordStore, SqliteKeyValueStore, StoreError,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remindly.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "kv_entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = SqliteKeyValueStore::open(&path).err().unwrap();
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
fn set_upserts_and_get_returns_latest_value() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    assert_eq!(store.get("birthdays").unwrap(), None);

    store.set("birthdays", "[]").unwrap();
    store.set("birthdays", "[1]").unwrap();
    store.set("anniversaries", "[]").unwrap();

    assert_eq!(store.get("birthdays").unwrap().as_deref(), Some("[1]"));
    assert_eq!(store.keys().unwrap(), ["anniversaries", "birthdays"]);
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remindly.db");
    let asha = Birthday::new("Asha", Utc.with_ymd_and_hms(1990, 4, 12, 0, 0, 0).unwrap());

    {
        let store = RecordStore::new(SqliteKeyValueStore::open(&path).unwrap());
        store.append_typed(asha.clone()).unwrap();
    }

    let reopened = RecordStore::new(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(reopened.load_typed::<Birthday>().unwrap(), vec![asha]);
}

#[test]
fn corrupt_row_is_reported_not_overwritten() {
    let store = RecordStore::new(SqliteKeyValueStore::open_in_memory().unwrap());
    store.provider().set("healthCheckups", "42").unwrap();

    let err = store.load_all(Category::HealthCheckups).unwrap_err();
    assert!(matches!(err, StoreError::CorruptStore { .. }));
    assert_eq!(
        store.provider().get("healthCheckups").unwrap().as_deref(),
        Some("42")
    );
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
