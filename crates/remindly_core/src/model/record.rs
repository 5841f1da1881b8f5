//! Record identity, validation errors and the category-tagged `Record` enum.
//!
//! # Responsibility
//! - Generate timestamp-derived record ids.
//! - Bind each typed record to its category via `CategoryRecord`.
//! - Decode raw JSON elements into the record type their category dictates.
//!
//! # Invariants
//! - Generated ids are strictly increasing within one `IdGenerator`.
//! - A `Record` variant always matches the category it is stored under.

use crate::model::category::Category;
use crate::model::health::{HealthCheckup, Vaccination};
use crate::model::medicine::MedicineReminder;
use crate::model::occasion::{Anniversary, Birthday};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;

/// Epoch-millisecond-derived record identifier, serialized as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids are non-empty ASCII decimal strings.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|byte| byte.is_ascii_digit())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues strictly increasing ids from the wall clock.
///
/// Two requests inside the same millisecond (or after a clock step backwards)
/// receive `last + 1`, so ids are never reused within a process.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> RecordId {
        self.next_id_at(chrono::Utc::now().timestamp_millis())
    }

    /// Same as [`IdGenerator::next_id`] with an explicit clock reading.
    pub fn next_id_at(&self, now_ms: i64) -> RecordId {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_ms.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        let issued = now_ms.max(previous.saturating_add(1));
        RecordId(issued.to_string())
    }
}

/// Record-level invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("id `{0}` is not a timestamp-derived id")]
    MalformedId(String),
    #[error("timesPerDay must be at least 1")]
    NoReminderTimes,
    #[error("reminderTimes has {actual} entries but timesPerDay is {times_per_day}")]
    ReminderTimesMismatch { times_per_day: u32, actual: usize },
    #[error("type must be `{expected}`, found `{actual}`")]
    TypeTagMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("record for `{actual}` cannot be stored under `{expected}`")]
    CategoryMismatch { expected: Category, actual: Category },
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField { field });
    }
    Ok(())
}

pub(crate) fn require_id(id: &RecordId) -> Result<(), RecordValidationError> {
    if !id.is_well_formed() {
        return Err(RecordValidationError::MalformedId(id.to_string()));
    }
    Ok(())
}

/// Literal `type` discriminator written by the reminder forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderTag {
    Birthday,
    Anniversary,
    HealthCheckup,
}

impl ReminderTag {
    pub fn label(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
            Self::HealthCheckup => "health-checkup",
        }
    }

    pub(crate) fn expect(self, actual: ReminderTag) -> Result<(), RecordValidationError> {
        if self != actual {
            return Err(RecordValidationError::TypeTagMismatch {
                expected: self.label(),
                actual: actual.label(),
            });
        }
        Ok(())
    }
}

/// Treats missing, `null` and blank strings as absent.
///
/// Older app builds persisted untouched optional inputs as `""`.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

/// Normalizes optional form text: trimmed, blank becomes `None`.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Binds a typed record to the category it is stored under.
pub trait CategoryRecord: Clone + Serialize + DeserializeOwned {
    const CATEGORY: Category;

    fn validate(&self) -> Result<(), RecordValidationError>;

    fn into_record(self) -> Record;

    fn from_record(record: Record) -> Option<Self>;
}

/// One persisted reminder, tagged by its category.
///
/// Serializes as the bare inner object; the category key, not an in-band tag,
/// decides the shape on read (see [`Record::from_value`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Birthday(Birthday),
    Anniversary(Anniversary),
    HealthCheckup(HealthCheckup),
    Vaccination(Vaccination),
    Medicine(MedicineReminder),
}

impl Record {
    /// Decodes one stored JSON element using the shape of `category`.
    pub fn from_value(
        category: Category,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match category {
            Category::Birthdays => Self::Birthday(serde_json::from_value(value)?),
            Category::Anniversaries => Self::Anniversary(serde_json::from_value(value)?),
            Category::HealthCheckups => Self::HealthCheckup(serde_json::from_value(value)?),
            Category::Vaccinations => Self::Vaccination(serde_json::from_value(value)?),
            Category::MedicineReminders => Self::Medicine(serde_json::from_value(value)?),
        })
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Birthday(_) => Category::Birthdays,
            Self::Anniversary(_) => Category::Anniversaries,
            Self::HealthCheckup(_) => Category::HealthCheckups,
            Self::Vaccination(_) => Category::Vaccinations,
            Self::Medicine(_) => Category::MedicineReminders,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        match self {
            Self::Birthday(record) => record.validate(),
            Self::Anniversary(record) => record.validate(),
            Self::HealthCheckup(record) => record.validate(),
            Self::Vaccination(record) => record.validate(),
            Self::Medicine(record) => record.validate(),
        }
    }

    /// Birthdays written without an id return `None`.
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Birthday(record) => record.id.as_ref(),
            Self::Anniversary(record) => Some(&record.id),
            Self::HealthCheckup(record) => Some(&record.id),
            Self::Vaccination(record) => Some(&record.id),
            Self::Medicine(record) => Some(&record.id),
        }
    }
}
