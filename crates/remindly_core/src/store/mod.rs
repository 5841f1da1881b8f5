//! Key-value providers and the append-only reminder record store.
//!
//! # Responsibility
//! - Define the whole-value `get`/`set` contract every storage provider meets.
//! - Provide in-memory and SQLite-backed providers.
//! - Layer `RecordStore` read-modify-append semantics on top of any provider.
//!
//! # Invariants
//! - Providers never interpret values; they store opaque strings by key.
//! - A `set` replaces the full value stored under its key.
//! - Every handle to one provider sees the same per-key write locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

mod memory;
mod record_store;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use record_store::{RecordStore, StoreError, StoreResult};
pub use sqlite::SqliteKeyValueStore;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure reported by a storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("storage read failed for key `{key}`: {message}")]
    Read { key: String, message: String },
    #[error("storage write failed for key `{key}`: {message}")]
    Write { key: String, message: String },
    #[error("storage provider unavailable: {0}")]
    Unavailable(String),
}

/// Whole-value key-value storage.
///
/// There are no partial updates and no transactions. Read-modify-write
/// cycles are serialized by holding [`KeyValueStore::write_lock`] for the key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> ProviderResult<Option<String>>;

    /// Overwrites the full value stored under `key`.
    fn set(&self, key: &str, value: &str) -> ProviderResult<()>;

    /// Lock owned by the provider for `key`.
    ///
    /// All callers sharing this provider receive the same lock for a key.
    fn write_lock(&self, key: &str) -> Arc<Mutex<()>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> ProviderResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ProviderResult<()> {
        (**self).set(key, value)
    }

    fn write_lock(&self, key: &str) -> Arc<Mutex<()>> {
        (**self).write_lock(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> ProviderResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ProviderResult<()> {
        (**self).set(key, value)
    }

    fn write_lock(&self, key: &str) -> Arc<Mutex<()>> {
        (**self).write_lock(key)
    }
}

/// Per-key lock table embedded by providers.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `key`, creating it on first use.
    pub fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        // The table only ever gains entries, so a poisoned map is still consistent.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }
}
