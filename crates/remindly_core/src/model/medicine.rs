//! Medicine intake reminders.
//!
//! # Invariants
//! - `times_per_day >= 1`.
//! - `reminder_times.len() == times_per_day` for every persisted reminder.

use crate::model::category::Category;
use crate::model::record::{
    blank_as_none, require_id, require_text, CategoryRecord, Record, RecordId,
    RecordValidationError,
};
use crate::model::temporal::{iso_millis, TimeOfDay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

label_enum! {
    pub enum MedicineFrequency {
        Daily => "Daily",
        AlternateDays => "Alternate Days",
        Weekly => "Weekly",
        Every15Days => "Every 15 Days",
        Monthly => "Monthly",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineReminder {
    pub id: RecordId,
    pub medicine_name: String,
    pub dosage: String,
    pub times_per_day: u32,
    pub reminder_times: Vec<TimeOfDay>,
    #[serde(with = "iso_millis")]
    pub start_date: DateTime<Utc>,
    pub medicine_frequency: MedicineFrequency,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub doctor: Option<String>,
    pub notification_enabled: bool,
}

impl CategoryRecord for MedicineReminder {
    const CATEGORY: Category = Category::MedicineReminders;

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_id(&self.id)?;
        require_text("medicineName", &self.medicine_name)?;
        require_text("dosage", &self.dosage)?;
        if self.times_per_day == 0 {
            return Err(RecordValidationError::NoReminderTimes);
        }
        if self.reminder_times.len() != self.times_per_day as usize {
            return Err(RecordValidationError::ReminderTimesMismatch {
                times_per_day: self.times_per_day,
                actual: self.reminder_times.len(),
            });
        }
        Ok(())
    }

    fn into_record(self) -> Record {
        Record::Medicine(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Medicine(reminder) => Some(reminder),
            _ => None,
        }
    }
}
