//! Date and time-of-day representations used by reminder records.
//!
//! # Invariants
//! - Calendar dates are stored as UTC ISO-8601 with millisecond precision
//!   (`1990-04-12T00:00:00.000Z`).
//! - Times of day are stored as locale-independent 24-hour `HH:MM`.
//! - Legacy 12-hour strings (`08:30 AM`, `8:30 p.m.`) are accepted on read and
//!   normalized; 12-hour output exists for display only.

use chrono::{DateTime, NaiveTime, SecondsFormat, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

static TIME_OF_DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})(?:\s*([AaPp])\.?\s*[Mm]\.?)?\s*$")
        .expect("time-of-day pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("invalid ISO-8601 date `{0}`")]
    InvalidDate(String),
    #[error("invalid time of day `{0}`; expected HH:MM or hh:mm AM/PM")]
    InvalidTime(String),
}

/// Formats a timestamp in the persisted ISO-8601 form.
pub fn format_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses any RFC 3339 timestamp and normalizes it to UTC.
pub fn parse_iso(value: &str) -> Result<DateTime<Utc>, TemporalError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| TemporalError::InvalidDate(value.to_string()))
}

/// Serde adapter for `DateTime<Utc>` fields using [`format_iso`].
pub mod iso_millis {
    use super::{format_iso, parse_iso};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_iso(&raw).map_err(serde::de::Error::custom)
    }
}

/// Wall-clock reminder time without date or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parses `HH:MM` (24-hour) or `hh:mm AM/PM` (12-hour) input.
    pub fn parse(value: &str) -> Result<Self, TemporalError> {
        let invalid = || TemporalError::InvalidTime(value.to_string());
        let captures = TIME_OF_DAY_PATTERN.captures(value).ok_or_else(invalid)?;

        let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
        let minute: u32 = captures[2].parse().map_err(|_| invalid())?;
        let hour = match captures.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
            None => hour,
            Some(meridiem) => {
                if !(1..=12).contains(&hour) {
                    return Err(invalid());
                }
                match (meridiem.as_str(), hour) {
                    ("a", 12) => 0,
                    ("a", h) => h,
                    (_, 12) => 12,
                    (_, h) => h + 12,
                }
            }
        };

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Presentation form, e.g. `08:30 PM`.
    pub fn display_12h(self) -> String {
        self.0.format("%I:%M %p").to_string()
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TemporalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_iso, parse_iso, TemporalError, TimeOfDay};

    #[test]
    fn iso_dates_keep_millisecond_utc_form() {
        let parsed = parse_iso("1990-04-12T00:00:00.000Z").unwrap();
        assert_eq!(format_iso(&parsed), "1990-04-12T00:00:00.000Z");

        let offset = parse_iso("1990-04-12T05:30:00+05:30").unwrap();
        assert_eq!(format_iso(&offset), "1990-04-12T00:00:00.000Z");

        assert_eq!(
            parse_iso("12/04/1990"),
            Err(TemporalError::InvalidDate("12/04/1990".to_string()))
        );
    }

    #[test]
    fn time_of_day_accepts_24h_and_legacy_12h() {
        assert_eq!(TimeOfDay::parse("08:30").unwrap().to_string(), "08:30");
        assert_eq!(TimeOfDay::parse("21:05").unwrap().to_string(), "21:05");
        assert_eq!(TimeOfDay::parse("08:30 AM").unwrap().to_string(), "08:30");
        assert_eq!(TimeOfDay::parse("8:30 pm").unwrap().to_string(), "20:30");
        assert_eq!(TimeOfDay::parse("12:00 AM").unwrap().to_string(), "00:00");
        assert_eq!(TimeOfDay::parse("12:15 p.m.").unwrap().to_string(), "12:15");
    }

    #[test]
    fn time_of_day_rejects_out_of_range_values() {
        for raw in ["24:00", "13:00 PM", "0:10 AM", "07:60", "noon", ""] {
            assert!(TimeOfDay::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn time_of_day_serializes_as_plain_string() {
        let time = TimeOfDay::from_hm(7, 5).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"07:05\"");
        assert_eq!(time.display_12h(), "07:05 AM");

        let legacy: TimeOfDay = serde_json::from_str("\"07:05 PM\"").unwrap();
        assert_eq!(legacy, TimeOfDay::from_hm(19, 5).unwrap());
    }
}
