//! Yearly occasions: birthdays and anniversaries.

use crate::model::category::Category;
use crate::model::record::{
    require_id, require_text, CategoryRecord, Record, RecordId, RecordValidationError,
    ReminderTag,
};
use crate::model::temporal::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Birthday reminder.
///
/// Only `name` and `date` are mandatory on disk. The remaining fields are
/// written by the birthday form but may be absent in older lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Birthday {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ReminderTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_enabled: Option<bool>,
}

impl Birthday {
    /// Minimal birthday with just a name and a date.
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: name.into(),
            date,
            tag: None,
            notification_enabled: None,
        }
    }
}

impl CategoryRecord for Birthday {
    const CATEGORY: Category = Category::Birthdays;

    fn validate(&self) -> Result<(), RecordValidationError> {
        if let Some(id) = &self.id {
            require_id(id)?;
        }
        require_text("name", &self.name)?;
        if let Some(tag) = self.tag {
            ReminderTag::Birthday.expect(tag)?;
        }
        Ok(())
    }

    fn into_record(self) -> Record {
        Record::Birthday(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Birthday(birthday) => Some(birthday),
            _ => None,
        }
    }
}

/// Anniversary reminder. The `type` literal is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anniversary {
    pub id: RecordId,
    pub name: String,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub tag: ReminderTag,
    pub notification_enabled: bool,
}

impl Anniversary {
    pub fn new(id: RecordId, name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            tag: ReminderTag::Anniversary,
            notification_enabled: true,
        }
    }
}

impl CategoryRecord for Anniversary {
    const CATEGORY: Category = Category::Anniversaries;

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_id(&self.id)?;
        require_text("name", &self.name)?;
        ReminderTag::Anniversary.expect(self.tag)
    }

    fn into_record(self) -> Record {
        Record::Anniversary(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Anniversary(anniversary) => Some(anniversary),
            _ => None,
        }
    }
}
