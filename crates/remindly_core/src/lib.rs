//! Core domain logic for Remindly.
//! This crate is the single source of truth for reminder record invariants.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod service;
pub mod store;

pub use config::{ConfigOverrides, CoreConfig};
pub use form::{
    AnniversaryForm, BirthdayForm, FieldIssue, HealthCheckupForm, MedicineForm, VaccinationForm,
    ValidationError,
};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::category::Category;
pub use model::health::{
    CheckupFrequency, CheckupType, HealthCheckup, Vaccination, VaccinationFrequency,
    VaccineRecipient,
};
pub use model::medicine::{MedicineFrequency, MedicineReminder};
pub use model::occasion::{Anniversary, Birthday};
pub use model::record::{
    CategoryRecord, IdGenerator, Record, RecordId, RecordValidationError, ReminderTag,
};
pub use model::temporal::{format_iso, parse_iso, TemporalError, TimeOfDay};
pub use navigation::{
    gift_ideas, launch_route, reminder_catalog, GiftCategory, OnboardingPager, Route, SessionState,
};
pub use service::reminder_service::{saved_message, ReminderService, ServiceError, ServiceResult};
pub use store::{
    KeyLocks, KeyValueStore, MemoryKeyValueStore, ProviderError, ProviderResult, RecordStore,
    SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
