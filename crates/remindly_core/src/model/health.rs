//! Health check-up and vaccination records.

use crate::model::category::Category;
use crate::model::record::{
    blank_as_none, require_id, require_text, CategoryRecord, Record, RecordId,
    RecordValidationError, ReminderTag,
};
use crate::model::temporal::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

label_enum! {
    /// Kind of health check-up.
    pub enum CheckupType {
        FullBody => "Full Body",
        Dental => "Dental",
        Eye => "Eye",
        BloodTest => "Blood Test",
        Other => "Other",
    }
}

label_enum! {
    /// How often a check-up repeats.
    pub enum CheckupFrequency {
        Once => "Once",
        SixMonths => "6 Months",
        Yearly => "Yearly",
    }
}

label_enum! {
    /// Who receives the vaccine. Persisted under the `type` key.
    pub enum VaccineRecipient {
        Human => "Human",
        Pet => "Pet",
        Child => "Child",
        Adult => "Adult",
    }
}

label_enum! {
    pub enum VaccinationFrequency {
        OneTime => "One-time",
        Yearly => "Yearly",
        EverySixMonths => "Every 6 months",
        Custom => "Custom",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckup {
    pub id: RecordId,
    pub name: String,
    pub checkup_type: CheckupType,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    pub reminder_frequency: CheckupFrequency,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub doctor_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub clinic_location: Option<String>,
    pub notification_enabled: bool,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ReminderTag>,
}

impl CategoryRecord for HealthCheckup {
    const CATEGORY: Category = Category::HealthCheckups;

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_id(&self.id)?;
        require_text("name", &self.name)?;
        if let Some(tag) = self.tag {
            ReminderTag::HealthCheckup.expect(tag)?;
        }
        Ok(())
    }

    fn into_record(self) -> Record {
        Record::HealthCheckup(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::HealthCheckup(checkup) => Some(checkup),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    pub id: RecordId,
    pub name: String,
    pub vaccine: String,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub dose: Option<String>,
    #[serde(rename = "type")]
    pub recipient: VaccineRecipient,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub doctor: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    pub notification_enabled: bool,
    pub frequency: VaccinationFrequency,
}

impl CategoryRecord for Vaccination {
    const CATEGORY: Category = Category::Vaccinations;

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_id(&self.id)?;
        require_text("name", &self.name)?;
        require_text("vaccine", &self.vaccine)
    }

    fn into_record(self) -> Record {
        Record::Vaccination(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Vaccination(vaccination) => Some(vaccination),
            _ => None,
        }
    }
}
