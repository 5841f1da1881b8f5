//! Process-local provider backed by a `HashMap`.

use super::{KeyLocks, KeyValueStore, ProviderError, ProviderResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory key-value provider.
///
/// Read and write failures can be switched on to exercise caller error paths.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_locks: KeyLocks,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail until switched off.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` fail until switched off.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        // A panicking writer cannot leave the map half-updated.
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> ProviderResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ProviderError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> ProviderResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ProviderError::Read {
                key: key.to_string(),
                message: "injected read failure".to_string(),
            });
        }
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ProviderResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProviderError::Write {
                key: key.to_string(),
                message: "injected write failure".to_string(),
            });
        }
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn write_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.write_locks.lock_for(key)
    }
}
