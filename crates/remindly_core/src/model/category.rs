//! Reminder categories and their storage keys.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Logical collection of records of one entity type.
///
/// Each category maps to exactly one key in the key-value provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "birthdays")]
    Birthdays,
    #[serde(rename = "anniversaries")]
    Anniversaries,
    #[serde(rename = "healthCheckups")]
    HealthCheckups,
    #[serde(rename = "vaccinations")]
    Vaccinations,
    #[serde(rename = "medicine_reminders")]
    MedicineReminders,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reminder category `{0}`")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Birthdays,
        Category::Anniversaries,
        Category::HealthCheckups,
        Category::Vaccinations,
        Category::MedicineReminders,
    ];

    /// Storage key used by the key-value provider. Case-sensitive.
    pub fn key(self) -> &'static str {
        match self {
            Self::Birthdays => "birthdays",
            Self::Anniversaries => "anniversaries",
            Self::HealthCheckups => "healthCheckups",
            Self::Vaccinations => "vaccinations",
            Self::MedicineReminders => "medicine_reminders",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(value.trim()).ok_or_else(|| UnknownCategory(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            "healthCheckups".parse::<Category>().unwrap(),
            Category::HealthCheckups
        );
        assert!("healthcheckups".parse::<Category>().is_err());
        assert!("gifts".parse::<Category>().is_err());
    }
}
