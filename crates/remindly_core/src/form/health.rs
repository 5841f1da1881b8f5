use super::{FieldChecker, ValidationError};
use crate::model::health::{
    CheckupFrequency, CheckupType, HealthCheckup, Vaccination, VaccinationFrequency,
    VaccineRecipient,
};
use crate::model::record::{optional_text, IdGenerator, ReminderTag};
use chrono::{DateTime, Utc};

const CHECKUP_PROMPT: &str = "Please fill all required fields: name, check-up type, and frequency.";
const VACCINATION_PROMPT: &str = "Please fill all required fields.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckupForm {
    pub name: String,
    pub checkup_type: Option<CheckupType>,
    pub date: Option<DateTime<Utc>>,
    pub reminder_frequency: Option<CheckupFrequency>,
    pub doctor_name: String,
    pub clinic_location: String,
    pub notes: String,
    pub notification_enabled: bool,
}

impl Default for HealthCheckupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            checkup_type: None,
            date: None,
            reminder_frequency: None,
            doctor_name: String::new(),
            clinic_location: String::new(),
            notes: String::new(),
            notification_enabled: true,
        }
    }
}

impl HealthCheckupForm {
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_checkup_type(self, checkup_type: CheckupType) -> Self {
        Self {
            checkup_type: Some(checkup_type),
            ..self
        }
    }

    pub fn with_date(self, date: DateTime<Utc>) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    pub fn with_reminder_frequency(self, reminder_frequency: CheckupFrequency) -> Self {
        Self {
            reminder_frequency: Some(reminder_frequency),
            ..self
        }
    }

    pub fn with_doctor_name(self, doctor_name: impl Into<String>) -> Self {
        Self {
            doctor_name: doctor_name.into(),
            ..self
        }
    }

    pub fn with_clinic_location(self, clinic_location: impl Into<String>) -> Self {
        Self {
            clinic_location: clinic_location.into(),
            ..self
        }
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..self
        }
    }

    pub fn with_notification(self, notification_enabled: bool) -> Self {
        Self {
            notification_enabled,
            ..self
        }
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Submits with an unpicked date falling back to the current time.
    pub fn submit(&self, ids: &IdGenerator) -> Result<HealthCheckup, ValidationError> {
        self.submit_at(ids, Utc::now())
    }

    /// Same as [`HealthCheckupForm::submit`] with `now` as the date fallback.
    pub fn submit_at(
        &self,
        ids: &IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<HealthCheckup, ValidationError> {
        let mut check = FieldChecker::default();
        let name = check.text("name", &self.name);
        let checkup_type = check.present("checkupType", &self.checkup_type);
        let reminder_frequency = check.present("reminderFrequency", &self.reminder_frequency);

        match (name, checkup_type, reminder_frequency) {
            (Some(name), Some(checkup_type), Some(reminder_frequency)) if check.is_clean() => {
                Ok(HealthCheckup {
                    id: ids.next_id(),
                    name,
                    checkup_type,
                    date: self.date.unwrap_or(now),
                    reminder_frequency,
                    doctor_name: optional_text(&self.doctor_name),
                    clinic_location: optional_text(&self.clinic_location),
                    notification_enabled: self.notification_enabled,
                    notes: optional_text(&self.notes),
                    tag: Some(ReminderTag::HealthCheckup),
                })
            }
            _ => Err(check.into_error(CHECKUP_PROMPT)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccinationForm {
    pub name: String,
    pub vaccine: String,
    pub date: Option<DateTime<Utc>>,
    pub dose: String,
    pub recipient: Option<VaccineRecipient>,
    pub doctor: String,
    pub location: String,
    pub notes: String,
    pub notification_enabled: bool,
    pub frequency: Option<VaccinationFrequency>,
}

impl Default for VaccinationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            vaccine: String::new(),
            date: None,
            dose: String::new(),
            recipient: None,
            doctor: String::new(),
            location: String::new(),
            notes: String::new(),
            notification_enabled: true,
            frequency: None,
        }
    }
}

impl VaccinationForm {
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_vaccine(self, vaccine: impl Into<String>) -> Self {
        Self {
            vaccine: vaccine.into(),
            ..self
        }
    }

    pub fn with_date(self, date: DateTime<Utc>) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    pub fn with_dose(self, dose: impl Into<String>) -> Self {
        Self {
            dose: dose.into(),
            ..self
        }
    }

    pub fn with_recipient(self, recipient: VaccineRecipient) -> Self {
        Self {
            recipient: Some(recipient),
            ..self
        }
    }

    pub fn with_doctor(self, doctor: impl Into<String>) -> Self {
        Self {
            doctor: doctor.into(),
            ..self
        }
    }

    pub fn with_location(self, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..self
        }
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..self
        }
    }

    pub fn with_notification(self, notification_enabled: bool) -> Self {
        Self {
            notification_enabled,
            ..self
        }
    }

    pub fn with_frequency(self, frequency: VaccinationFrequency) -> Self {
        Self {
            frequency: Some(frequency),
            ..self
        }
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    pub fn submit(&self, ids: &IdGenerator) -> Result<Vaccination, ValidationError> {
        let mut check = FieldChecker::default();
        let name = check.text("name", &self.name);
        let vaccine = check.text("vaccine", &self.vaccine);
        let date = check.present("date", &self.date);
        let recipient = check.present("type", &self.recipient);
        let frequency = check.present("frequency", &self.frequency);

        match (name, vaccine, date, recipient, frequency) {
            (Some(name), Some(vaccine), Some(date), Some(recipient), Some(frequency))
                if check.is_clean() =>
            {
                Ok(Vaccination {
                    id: ids.next_id(),
                    name,
                    vaccine,
                    date,
                    dose: optional_text(&self.dose),
                    recipient,
                    doctor: optional_text(&self.doctor),
                    location: optional_text(&self.location),
                    notes: optional_text(&self.notes),
                    notification_enabled: self.notification_enabled,
                    frequency,
                })
            }
            _ => Err(check.into_error(VACCINATION_PROMPT)),
        }
    }
}
