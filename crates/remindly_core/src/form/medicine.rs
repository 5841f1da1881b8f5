use super::{FieldChecker, ValidationError};
use crate::model::medicine::{MedicineFrequency, MedicineReminder};
use crate::model::record::{optional_text, IdGenerator};
use crate::model::temporal::TimeOfDay;
use chrono::{DateTime, Utc};

/// Upper bound offered by the times-per-day picker.
pub const MAX_TIMES_PER_DAY: u32 = 4;

const MEDICINE_PROMPT: &str = "Please fill all required fields.";

/// Medicine reminder input.
///
/// `reminder_times` always has one slot per intake; changing
/// `times_per_day` discards previously picked times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineForm {
    pub medicine_name: String,
    pub dosage: String,
    times_per_day: u32,
    reminder_times: Vec<Option<TimeOfDay>>,
    pub start_date: Option<DateTime<Utc>>,
    pub frequency: Option<MedicineFrequency>,
    pub notes: String,
    pub doctor: String,
    pub notification_enabled: bool,
}

impl Default for MedicineForm {
    fn default() -> Self {
        Self {
            medicine_name: String::new(),
            dosage: String::new(),
            times_per_day: 1,
            reminder_times: vec![None],
            start_date: None,
            frequency: None,
            notes: String::new(),
            doctor: String::new(),
            notification_enabled: true,
        }
    }
}

impl MedicineForm {
    pub fn times_per_day(&self) -> u32 {
        self.times_per_day
    }

    pub fn reminder_times(&self) -> &[Option<TimeOfDay>] {
        &self.reminder_times
    }

    pub fn with_medicine_name(self, medicine_name: impl Into<String>) -> Self {
        Self {
            medicine_name: medicine_name.into(),
            ..self
        }
    }

    pub fn with_dosage(self, dosage: impl Into<String>) -> Self {
        Self {
            dosage: dosage.into(),
            ..self
        }
    }

    /// Sets the intake count and resets every reminder time slot.
    ///
    /// Slots are capped at [`MAX_TIMES_PER_DAY`]; an out-of-range count is
    /// reported by [`MedicineForm::submit`].
    pub fn with_times_per_day(self, times_per_day: u32) -> Self {
        Self {
            times_per_day,
            reminder_times: vec![None; times_per_day.min(MAX_TIMES_PER_DAY) as usize],
            ..self
        }
    }

    /// Fills one reminder slot. Out-of-range slots leave the form unchanged.
    pub fn with_reminder_time(self, slot: usize, time: TimeOfDay) -> Self {
        if slot >= self.reminder_times.len() {
            return self;
        }
        let mut reminder_times = self.reminder_times.clone();
        reminder_times[slot] = Some(time);
        Self {
            reminder_times,
            ..self
        }
    }

    pub fn with_start_date(self, start_date: DateTime<Utc>) -> Self {
        Self {
            start_date: Some(start_date),
            ..self
        }
    }

    pub fn with_frequency(self, frequency: MedicineFrequency) -> Self {
        Self {
            frequency: Some(frequency),
            ..self
        }
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..self
        }
    }

    pub fn with_doctor(self, doctor: impl Into<String>) -> Self {
        Self {
            doctor: doctor.into(),
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

    pub fn submit(&self, ids: &IdGenerator) -> Result<MedicineReminder, ValidationError> {
        let mut check = FieldChecker::default();
        let medicine_name = check.text("medicineName", &self.medicine_name);
        let dosage = check.text("dosage", &self.dosage);
        let start_date = check.present("startDate", &self.start_date);
        let frequency = check.present("medicineFrequency", &self.frequency);

        if !(1..=MAX_TIMES_PER_DAY).contains(&self.times_per_day) {
            check.invalid(
                "timesPerDay",
                format!("must be between 1 and {MAX_TIMES_PER_DAY}"),
            );
        }
        let reminder_times = self
            .reminder_times
            .iter()
            .copied()
            .collect::<Option<Vec<TimeOfDay>>>();
        if reminder_times.is_none() {
            check.invalid("reminderTimes", "must have every time slot filled");
        }

        match (medicine_name, dosage, start_date, frequency, reminder_times) {
            (
                Some(medicine_name),
                Some(dosage),
                Some(start_date),
                Some(medicine_frequency),
                Some(reminder_times),
            ) if check.is_clean() => Ok(MedicineReminder {
                id: ids.next_id(),
                medicine_name,
                dosage,
                times_per_day: self.times_per_day,
                reminder_times,
                start_date,
                medicine_frequency,
                notes: optional_text(&self.notes),
                doctor: optional_text(&self.doctor),
                notification_enabled: self.notification_enabled,
            }),
            _ => Err(check.into_error(MEDICINE_PROMPT)),
        }
    }
}
