//! Immutable form state for the reminder entry screens.
//!
//! # Responsibility
//! - Hold every screen's inputs in one value, changed only by `with_*`
//!   transitions that return a new value.
//! - Validate all fields as a unit and build the typed record on submit.
//!
//! # Invariants
//! - `submit` never mutates the form; callers keep it for retry on failure.
//! - A `ValidationError` lists every offending field, not just the first.

use std::fmt::{Display, Formatter};
use thiserror::Error;

mod health;
mod medicine;
mod occasion;

pub use health::{HealthCheckupForm, VaccinationForm};
pub use medicine::{MedicineForm, MAX_TIMES_PER_DAY};
pub use occasion::{AnniversaryForm, BirthdayForm};

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Missing(&'static str),
    Invalid { field: &'static str, reason: String },
}

impl FieldIssue {
    pub fn field(&self) -> &'static str {
        match *self {
            Self::Missing(field) | Self::Invalid { field, .. } => field,
        }
    }
}

impl Display for FieldIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{field} is required"),
            Self::Invalid { field, reason } => write!(f, "{field} {reason}"),
        }
    }
}

/// Submission blocked by missing or invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.issues))]
pub struct ValidationError {
    prompt: &'static str,
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// User-facing prompt shown by the entry screen.
    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(FieldIssue::field).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects field issues while a form is checked as a unit.
#[derive(Debug, Default)]
pub(crate) struct FieldChecker {
    issues: Vec<FieldIssue>,
}

impl FieldChecker {
    /// Returns the trimmed text, or records `field` as missing.
    pub(crate) fn text(&mut self, field: &'static str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.issues.push(FieldIssue::Missing(field));
            return None;
        }
        Some(trimmed.to_string())
    }

    pub(crate) fn present<T: Clone>(&mut self, field: &'static str, value: &Option<T>) -> Option<T> {
        if value.is_none() {
            self.issues.push(FieldIssue::Missing(field));
        }
        value.clone()
    }

    pub(crate) fn invalid(&mut self, field: &'static str, reason: impl Into<String>) {
        self.issues.push(FieldIssue::Invalid {
            field,
            reason: reason.into(),
        });
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub(crate) fn into_error(self, prompt: &'static str) -> ValidationError {
        ValidationError {
            prompt,
            issues: self.issues,
        }
    }
}
