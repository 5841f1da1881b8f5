use super::{FieldChecker, ValidationError};
use crate::model::occasion::{Anniversary, Birthday};
use crate::model::record::{IdGenerator, ReminderTag};
use chrono::{DateTime, Utc};

const BIRTHDAY_PROMPT: &str = "Please enter a name.";
const ANNIVERSARY_PROMPT: &str = "Please enter a couple's name.";
const DATE_PROMPT: &str = "Please select a date.";

/// Name problems are reported first; a missing date alone gets its own prompt.
fn occasion_prompt(name_prompt: &'static str, name: &Option<String>) -> &'static str {
    if name.is_none() {
        name_prompt
    } else {
        DATE_PROMPT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayForm {
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub notification_enabled: bool,
}

impl Default for BirthdayForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            date: None,
            notification_enabled: true,
        }
    }
}

impl BirthdayForm {
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_date(self, date: DateTime<Utc>) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    pub fn with_notification(self, notification_enabled: bool) -> Self {
        Self {
            notification_enabled,
            ..self
        }
    }

    /// Returns the blank form shown after a successful save.
    pub fn reset(&self) -> Self {
        Self::default()
    }

    pub fn submit(&self, ids: &IdGenerator) -> Result<Birthday, ValidationError> {
        let mut check = FieldChecker::default();
        let name = check.text("name", &self.name);
        let date = check.present("date", &self.date);
        let prompt = occasion_prompt(BIRTHDAY_PROMPT, &name);

        match (name, date) {
            (Some(name), Some(date)) if check.is_clean() => Ok(Birthday {
                id: Some(ids.next_id()),
                name,
                date,
                tag: Some(ReminderTag::Birthday),
                notification_enabled: Some(self.notification_enabled),
            }),
            _ => Err(check.into_error(prompt)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnniversaryForm {
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub notification_enabled: bool,
}

impl Default for AnniversaryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            date: None,
            notification_enabled: true,
        }
    }
}

impl AnniversaryForm {
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_date(self, date: DateTime<Utc>) -> Self {
        Self {
            date: Some(date),
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

    pub fn submit(&self, ids: &IdGenerator) -> Result<Anniversary, ValidationError> {
        let mut check = FieldChecker::default();
        let name = check.text("name", &self.name);
        let date = check.present("date", &self.date);
        let prompt = occasion_prompt(ANNIVERSARY_PROMPT, &name);

        match (name, date) {
            (Some(name), Some(date)) if check.is_clean() => {
                let mut anniversary = Anniversary::new(ids.next_id(), name, date);
                anniversary.notification_enabled = self.notification_enabled;
                Ok(anniversary)
            }
            _ => Err(check.into_error(prompt)),
        }
    }
}
