//! Reminder use-case service.
//!
//! # Responsibility
//! - Validate a screen's form as a unit, then append the built record.
//! - Map failures to user-facing notices without discarding form input.
//!
//! # Invariants
//! - Nothing reaches the store unless the whole form validates.
//! - Service APIs never bypass `RecordStore` validation/persistence.
//! - Forms are borrowed, never consumed, so callers can retry after errors.

use crate::form::{
    AnniversaryForm, BirthdayForm, HealthCheckupForm, MedicineForm, VaccinationForm,
    ValidationError,
};
use crate::model::category::Category;
use crate::model::health::{HealthCheckup, Vaccination};
use crate::model::medicine::MedicineReminder;
use crate::model::occasion::{Anniversary, Birthday};
use crate::model::record::{CategoryRecord, IdGenerator, Record};
use crate::store::{KeyValueStore, RecordStore, StoreError};
use log::warn;
use thiserror::Error;

const SAVE_FAILED_MESSAGE: &str = "Failed to save reminder. Your input was kept, please try again.";
const LOAD_FAILED_MESSAGE: &str = "Could not load reminders. Please try again.";
const CORRUPT_MESSAGE: &str = "Saved reminders could not be read and were left untouched.";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Notice shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.prompt(),
            Self::Store(StoreError::CorruptStore { .. }) => CORRUPT_MESSAGE,
            Self::Store(_) => SAVE_FAILED_MESSAGE,
        }
    }

    /// Same as [`ServiceError::user_message`] for list/load flows.
    pub fn load_message(&self) -> &'static str {
        match self {
            Self::Store(StoreError::CorruptStore { .. }) => CORRUPT_MESSAGE,
            _ => LOAD_FAILED_MESSAGE,
        }
    }
}

/// Confirmation shown after a record was saved.
pub fn saved_message(category: Category) -> &'static str {
    match category {
        Category::Birthdays => "🎉 Birthday reminder saved!",
        Category::Anniversaries => "🎊 Anniversary saved!",
        Category::HealthCheckups => "🩺 Health Check-up reminder saved!",
        Category::Vaccinations => "💉 Vaccination saved!",
        Category::MedicineReminders => "💊 Medicine Reminder Saved!",
    }
}

/// Use-case service over one record store.
pub struct ReminderService<S: KeyValueStore> {
    store: RecordStore<S>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> ReminderService<S> {
    pub fn new(store: RecordStore<S>) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
        }
    }

    pub fn from_provider(provider: S) -> Self {
        Self::new(RecordStore::new(provider))
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn save_birthday(&self, form: &BirthdayForm) -> ServiceResult<Birthday> {
        self.save(form.submit(&self.ids))
    }

    pub fn save_anniversary(&self, form: &AnniversaryForm) -> ServiceResult<Anniversary> {
        self.save(form.submit(&self.ids))
    }

    pub fn save_health_checkup(&self, form: &HealthCheckupForm) -> ServiceResult<HealthCheckup> {
        self.save(form.submit(&self.ids))
    }

    pub fn save_vaccination(&self, form: &VaccinationForm) -> ServiceResult<Vaccination> {
        self.save(form.submit(&self.ids))
    }

    pub fn save_medicine(&self, form: &MedicineForm) -> ServiceResult<MedicineReminder> {
        self.save(form.submit(&self.ids))
    }

    /// Lists one category as tagged records.
    pub fn list(&self, category: Category) -> ServiceResult<Vec<Record>> {
        Ok(self.store.load_all(category)?)
    }

    /// Lists one category as its concrete record type.
    pub fn list_typed<T: CategoryRecord>(&self) -> ServiceResult<Vec<T>> {
        Ok(self.store.load_typed::<T>()?)
    }

    pub fn list_birthdays(&self) -> ServiceResult<Vec<Birthday>> {
        self.list_typed()
    }

    fn save<T: CategoryRecord>(&self, submitted: Result<T, ValidationError>) -> ServiceResult<T> {
        let record = submitted.map_err(|err| {
            warn!(
                "event=form_submit module=service status=rejected category={} fields={}",
                T::CATEGORY,
                err.fields().join(",")
            );
            err
        })?;
        self.store.append_typed(record.clone())?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{saved_message, ReminderService, ServiceError};
    use crate::form::BirthdayForm;
    use crate::model::category::Category;
    use crate::store::MemoryKeyValueStore;
    use chrono::{TimeZone, Utc};

    #[test]
    fn failed_save_keeps_form_and_reports_retry_notice() {
        let provider = MemoryKeyValueStore::new();
        provider.set_fail_writes(true);
        let service = ReminderService::from_provider(&provider);

        let form = BirthdayForm::default()
            .with_name("Asha")
            .with_date(Utc.with_ymd_and_hms(1990, 4, 12, 0, 0, 0).unwrap());
        let snapshot = form.clone();

        let err = service.save_birthday(&form).unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(err.user_message().contains("try again"));
        assert_eq!(form, snapshot);

        provider.set_fail_writes(false);
        service.save_birthday(&form).unwrap();
        assert_eq!(service.list_birthdays().unwrap().len(), 1);
    }

    #[test]
    fn validation_prompt_comes_from_the_form() {
        let service = ReminderService::from_provider(MemoryKeyValueStore::new());
        let err = service.save_birthday(&BirthdayForm::default()).unwrap_err();
        assert_eq!(err.user_message(), "Please enter a name.");
        assert_eq!(saved_message(Category::Birthdays), "🎉 Birthday reminder saved!");
    }
}
