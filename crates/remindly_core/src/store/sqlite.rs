//! SQLite-backed provider storing one row per key in `kv_entries`.
//!
//! # Invariants
//! - The wrapped connection has migrations applied (`db::open_db*`).
//! - `set` is an upsert; the previous value is fully replaced.
//! - Write locks cover handles to this instance only, not other connections
//!   to the same file.

use super::{KeyLocks, KeyValueStore, ProviderError, ProviderResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
    write_locks: KeyLocks,
}

impl SqliteKeyValueStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            write_locks: KeyLocks::new(),
        }
    }

    /// Keys currently present, sorted.
    pub fn keys(&self) -> ProviderResult<Vec<String>> {
        let conn = self.lock()?;
        let read_error = |err: rusqlite::Error| ProviderError::Read {
            key: "*".to_string(),
            message: err.to_string(),
        };
        let mut stmt = conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")
            .map_err(read_error)?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        Ok(keys)
    }

    fn lock(&self) -> ProviderResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ProviderError::Unavailable("sqlite connection lock poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> ProviderResult<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM kv_entries WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|err| ProviderError::Read {
            key: key.to_string(),
            message: err.to_string(),
        })
    }

    fn set(&self, key: &str, value: &str) -> ProviderResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )
        .map_err(|err| ProviderError::Write {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        Ok(())
    }

    fn write_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.write_locks.lock_for(key)
    }
}
