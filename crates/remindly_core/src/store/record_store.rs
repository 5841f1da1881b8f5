//! Append-only reminder record store over a whole-value key-value provider.
//!
//! # Responsibility
//! - Load a category's full record list, failing closed on corrupt data.
//! - Append one validated record and persist the updated list.
//!
//! # Invariants
//! - Each category value is a JSON array; a missing key reads as empty.
//! - Records are validated before write and after read.
//! - Appends to one category are serialized by the provider's write lock for
//!   its key, so concurrent appends never overwrite each other's records,
//!   even across stores sharing one provider.
//! - A corrupt stored value is reported, never overwritten by `append`.

use super::{KeyValueStore, ProviderError};
use crate::model::category::Category;
use crate::model::record::{CategoryRecord, Record, RecordValidationError};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::sync::PoisonError;
use std::time::Instant;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Record rejected before reaching the provider.
    #[error("record rejected: {0}")]
    Validation(#[from] RecordValidationError),
    /// Stored value is not a JSON array of valid records for its category.
    #[error("stored `{category}` list is corrupt: {reason}")]
    CorruptStore { category: Category, reason: String },
    /// Provider `get` or `set` failed.
    #[error("persistence failed for `{category}`: {source}")]
    Persistence {
        category: Category,
        #[source]
        source: ProviderError,
    },
    #[error("failed to encode `{category}` list: {source}")]
    Encode {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Validation(_) => None,
            Self::CorruptStore { category, .. }
            | Self::Persistence { category, .. }
            | Self::Encode { category, .. } => Some(*category),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "record_invalid",
            Self::CorruptStore { .. } => "store_corrupt",
            Self::Persistence { .. } => "provider_failed",
            Self::Encode { .. } => "encode_failed",
        }
    }
}

/// Per-category, append-only record store.
pub struct RecordStore<S: KeyValueStore> {
    provider: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(provider: S) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &S {
        &self.provider
    }

    /// Loads every record stored under `category`, in insertion order.
    ///
    /// # Errors
    /// - `CorruptStore` when the value is not a JSON array, or any element does
    ///   not match the category shape or fails validation.
    /// - `Persistence` when the provider read fails.
    pub fn load_all(&self, category: Category) -> StoreResult<Vec<Record>> {
        let started_at = Instant::now();
        let result = self.read_list(category);
        match &result {
            Ok(records) => debug!(
                "event=store_load module=store status=ok category={} count={} duration_ms={}",
                category,
                records.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("store_load", category, err),
        }
        result
    }

    /// Appends `record` to the end of the `category` list.
    ///
    /// The record's variant must match `category` and pass validation;
    /// otherwise nothing is read or written.
    pub fn append(&self, category: Category, record: Record) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.append_locked(category, record);
        match &result {
            Ok(count) => info!(
                "event=store_append module=store status=ok category={} count={} duration_ms={}",
                category,
                count,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("store_append", category, err),
        }
        result.map(|_| ())
    }

    /// Loads a category as its concrete record type.
    pub fn load_typed<T: CategoryRecord>(&self) -> StoreResult<Vec<T>> {
        let records = self.load_all(T::CATEGORY)?;
        Ok(records.into_iter().filter_map(T::from_record).collect())
    }

    /// Appends a concrete record to the category it belongs to.
    pub fn append_typed<T: CategoryRecord>(&self, record: T) -> StoreResult<()> {
        self.append(T::CATEGORY, record.into_record())
    }

    pub fn count(&self, category: Category) -> StoreResult<usize> {
        self.load_all(category).map(|records| records.len())
    }

    fn append_locked(&self, category: Category, record: Record) -> StoreResult<usize> {
        if record.category() != category {
            return Err(RecordValidationError::CategoryMismatch {
                expected: category,
                actual: record.category(),
            }
            .into());
        }
        record.validate()?;

        let lock = self.provider.write_lock(category.key());
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.read_list(category)?;
        records.push(record);

        let payload = serde_json::to_string(&records)
            .map_err(|source| StoreError::Encode { category, source })?;
        self.provider
            .set(category.key(), &payload)
            .map_err(|source| StoreError::Persistence { category, source })?;
        Ok(records.len())
    }

    fn read_list(&self, category: Category) -> StoreResult<Vec<Record>> {
        let raw = self
            .provider
            .get(category.key())
            .map_err(|source| StoreError::Persistence { category, source })?;
        match raw {
            None => Ok(Vec::new()),
            Some(raw) => decode_list(category, &raw),
        }
    }
}

fn decode_list(category: Category, raw: &str) -> StoreResult<Vec<Record>> {
    let corrupt = |reason: String| StoreError::CorruptStore { category, reason };

    let value: Value =
        serde_json::from_str(raw).map_err(|err| corrupt(format!("invalid JSON: {err}")))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(corrupt(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| -> StoreResult<Record> {
            let record = Record::from_value(category, item)
                .map_err(|err| corrupt(format!("element {index}: {err}")))?;
            record
                .validate()
                .map_err(|err| corrupt(format!("element {index}: {err}")))?;
            Ok(record)
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn log_failure(event: &str, category: Category, err: &StoreError) {
    match err {
        StoreError::Validation(_) => warn!(
            "event={event} module=store status=rejected category={category} error_code={} error={err}",
            err.error_code()
        ),
        _ => error!(
            "event={event} module=store status=error category={category} error_code={} error={err}",
            err.error_code()
        ),
    }
}
