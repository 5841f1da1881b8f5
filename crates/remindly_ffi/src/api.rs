//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose one call per reminder entry screen plus list/routing helpers.
//! - Translate raw picker strings into typed form state before submission.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back as envelopes carrying a user-facing message; the
//!   screen keeps its input so the user can retry.
//! - All calls share one process-wide service so same-category saves are
//!   serialized and ids stay unique.

use chrono::{DateTime, Utc};
use log::warn;
use once_cell::sync::OnceCell;
use remindly_core::{
    core_version as core_version_inner, gift_ideas, init_logging as init_logging_inner,
    launch_route, parse_iso, ping as ping_inner, reminder_catalog, saved_message,
    AnniversaryForm, BirthdayForm, Category, CheckupFrequency, CheckupType, CoreConfig,
    HealthCheckupForm, MedicineForm, MedicineFrequency, ReminderService, ServiceError,
    SessionState, SqliteKeyValueStore, TimeOfDay, VaccinationForm, VaccinationFrequency,
    VaccineRecipient,
};

static ENTRY_SERVICE: OnceCell<ReminderService<SqliteKeyValueStore>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope for one save call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    pub ok: bool,
    /// Id of the created record on success.
    pub record_id: Option<String>,
    /// Text for the confirmation or error alert.
    pub message: String,
    /// Diagnostic detail for failures (offending fields, provider error).
    pub detail: Option<String>,
}

impl EntryActionResponse {
    fn saved(category: Category, record_id: String) -> Self {
        Self {
            ok: true,
            record_id: Some(record_id),
            message: saved_message(category).to_string(),
            detail: None,
        }
    }

    fn rejected(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Result envelope for listing one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListResponse {
    pub ok: bool,
    pub count: u32,
    /// Records as a JSON array in stored order (`[]` on failure).
    pub items_json: String,
    pub message: String,
}

/// Home-screen catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCatalogItem {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub path: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_save_birthday(
    name: String,
    date_iso: String,
    notification_enabled: bool,
) -> EntryActionResponse {
    let build = || -> Result<BirthdayForm, String> {
        let mut form = BirthdayForm::default()
            .with_name(name)
            .with_notification(notification_enabled);
        if let Some(date) = parse_date("date", &date_iso)? {
            form = form.with_date(date);
        }
        Ok(form)
    };
    save_entry(Category::Birthdays, build, |service, form| {
        service.save_birthday(form).map(|record| {
            record
                .id
                .map(|id| id.to_string())
                .unwrap_or_default()
        })
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_save_anniversary(
    name: String,
    date_iso: String,
    notification_enabled: bool,
) -> EntryActionResponse {
    let build = || -> Result<AnniversaryForm, String> {
        let mut form = AnniversaryForm::default()
            .with_name(name)
            .with_notification(notification_enabled);
        if let Some(date) = parse_date("date", &date_iso)? {
            form = form.with_date(date);
        }
        Ok(form)
    };
    save_entry(Category::Anniversaries, build, |service, form| {
        service
            .save_anniversary(form)
            .map(|record| record.id.to_string())
    })
}

#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save_health_checkup(
    name: String,
    checkup_type: String,
    date_iso: String,
    reminder_frequency: String,
    doctor_name: String,
    clinic_location: String,
    notes: String,
    notification_enabled: bool,
) -> EntryActionResponse {
    let build = || -> Result<HealthCheckupForm, String> {
        let mut form = HealthCheckupForm::default()
            .with_name(name)
            .with_doctor_name(doctor_name)
            .with_clinic_location(clinic_location)
            .with_notes(notes)
            .with_notification(notification_enabled);
        if let Some(kind) = parse_label("checkupType", &checkup_type, CheckupType::from_label)? {
            form = form.with_checkup_type(kind);
        }
        if let Some(date) = parse_date("date", &date_iso)? {
            form = form.with_date(date);
        }
        if let Some(frequency) = parse_label(
            "reminderFrequency",
            &reminder_frequency,
            CheckupFrequency::from_label,
        )? {
            form = form.with_reminder_frequency(frequency);
        }
        Ok(form)
    };
    save_entry(Category::HealthCheckups, build, |service, form| {
        service
            .save_health_checkup(form)
            .map(|record| record.id.to_string())
    })
}

#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save_vaccination(
    name: String,
    vaccine: String,
    date_iso: String,
    dose: String,
    recipient_type: String,
    doctor: String,
    location: String,
    notes: String,
    notification_enabled: bool,
    frequency: String,
) -> EntryActionResponse {
    let build = || -> Result<VaccinationForm, String> {
        let mut form = VaccinationForm::default()
            .with_name(name)
            .with_vaccine(vaccine)
            .with_dose(dose)
            .with_doctor(doctor)
            .with_location(location)
            .with_notes(notes)
            .with_notification(notification_enabled);
        if let Some(date) = parse_date("date", &date_iso)? {
            form = form.with_date(date);
        }
        if let Some(recipient) = parse_label("type", &recipient_type, VaccineRecipient::from_label)? {
            form = form.with_recipient(recipient);
        }
        if let Some(frequency) =
            parse_label("frequency", &frequency, VaccinationFrequency::from_label)?
        {
            form = form.with_frequency(frequency);
        }
        Ok(form)
    };
    save_entry(Category::Vaccinations, build, |service, form| {
        service
            .save_vaccination(form)
            .map(|record| record.id.to_string())
    })
}

/// Saves a medicine reminder.
///
/// `reminder_times` entries may be `HH:MM` or `hh:mm AM/PM`; blank entries
/// count as unfilled slots.
#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save_medicine(
    medicine_name: String,
    dosage: String,
    times_per_day: u32,
    reminder_times: Vec<String>,
    start_date_iso: String,
    medicine_frequency: String,
    notes: String,
    doctor: String,
    notification_enabled: bool,
) -> EntryActionResponse {
    let build = || -> Result<MedicineForm, String> {
        if reminder_times.len() > times_per_day as usize {
            return Err(format!(
                "reminderTimes has {} entries but timesPerDay is {times_per_day}",
                reminder_times.len()
            ));
        }
        let mut form = MedicineForm::default()
            .with_medicine_name(medicine_name)
            .with_dosage(dosage)
            .with_times_per_day(times_per_day)
            .with_notes(notes)
            .with_doctor(doctor)
            .with_notification(notification_enabled);
        for (slot, raw) in reminder_times.iter().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            let time = TimeOfDay::parse(raw).map_err(|err| err.to_string())?;
            form = form.with_reminder_time(slot, time);
        }
        if let Some(date) = parse_date("startDate", &start_date_iso)? {
            form = form.with_start_date(date);
        }
        if let Some(frequency) = parse_label(
            "medicineFrequency",
            &medicine_frequency,
            MedicineFrequency::from_label,
        )? {
            form = form.with_frequency(frequency);
        }
        Ok(form)
    };
    save_entry(Category::MedicineReminders, build, |service, form| {
        service
            .save_medicine(form)
            .map(|record| record.id.to_string())
    })
}

/// Lists one category by its storage key (`birthdays`, `healthCheckups`, ...).
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list(category: String) -> EntryListResponse {
    let failure = |message: String| EntryListResponse {
        ok: false,
        count: 0,
        items_json: "[]".to_string(),
        message,
    };

    let category = match category.parse::<Category>() {
        Ok(category) => category,
        Err(err) => return failure(err.to_string()),
    };
    let service = match entry_service() {
        Ok(service) => service,
        Err(err) => return failure(err),
    };

    let records = match service.list(category) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=entry_list module=ffi status=error category={category} error={err}"
            );
            return failure(err.load_message().to_string());
        }
    };
    match serde_json::to_string(&records) {
        Ok(items_json) => EntryListResponse {
            ok: true,
            count: u32::try_from(records.len()).unwrap_or(u32::MAX),
            items_json,
            message: format!("Loaded {} reminder(s).", records.len()),
        },
        Err(err) => failure(format!("entry_list failed: {err}")),
    }
}

/// Route path to open after the splash screen.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_launch_path(signed_in: bool) -> String {
    let session = if signed_in {
        SessionState::SignedIn
    } else {
        SessionState::SignedOut
    };
    launch_route(session).path().to_string()
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_catalog() -> Vec<EntryCatalogItem> {
    reminder_catalog()
        .into_iter()
        .map(|entry| EntryCatalogItem {
            icon: entry.icon.to_string(),
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            path: entry.route().path().to_string(),
        })
        .collect()
}

/// Gift-ideas tab card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftIdeaCategory {
    pub title: String,
    pub ideas: Vec<String>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_gift_ideas() -> Vec<GiftIdeaCategory> {
    gift_ideas()
        .into_iter()
        .map(|gift| GiftIdeaCategory {
            title: gift.title.to_string(),
            ideas: gift.ideas.iter().map(|idea| idea.to_string()).collect(),
        })
        .collect()
}

fn entry_service() -> Result<&'static ReminderService<SqliteKeyValueStore>, String> {
    ENTRY_SERVICE.get_or_try_init(|| {
        let config = CoreConfig::from_env();
        SqliteKeyValueStore::open(&config.db_path)
            .map(ReminderService::from_provider)
            .map_err(|err| format!("reminder DB open failed: {err}"))
    })
}

fn save_entry<F>(
    category: Category,
    build: impl FnOnce() -> Result<F, String>,
    save: impl FnOnce(&ReminderService<SqliteKeyValueStore>, &F) -> Result<String, ServiceError>,
) -> EntryActionResponse {
    let form = match build() {
        Ok(form) => form,
        Err(detail) => return EntryActionResponse::rejected("Please check the entered values.", detail),
    };
    let service = match entry_service() {
        Ok(service) => service,
        Err(detail) => return EntryActionResponse::rejected("❌ Failed to save reminder", detail),
    };
    match save(service, &form) {
        Ok(record_id) => EntryActionResponse::saved(category, record_id),
        Err(err) => EntryActionResponse::rejected(err.user_message(), err.to_string()),
    }
}

/// Blank input means "not picked yet"; anything else must be ISO-8601.
fn parse_date(field: &str, raw: &str) -> Result<Option<DateTime<Utc>>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_iso(raw)
        .map(Some)
        .map_err(|err| format!("{field}: {err}"))
}

fn parse_label<T>(
    field: &str,
    raw: &str,
    from_label: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    from_label(trimmed)
        .map(Some)
        .ok_or_else(|| format!("{field}: unknown option `{trimmed}`"))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, entry_catalog, entry_gift_ideas, entry_launch_path, entry_list,
        entry_save_anniversary, entry_save_birthday, entry_save_health_checkup,
        entry_save_medicine, entry_save_vaccination, init_logging, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn saved_birthday_appears_in_list() {
        let name = unique_token("birthday");
        let response = entry_save_birthday(
            name.clone(),
            "1990-04-12T00:00:00.000Z".to_string(),
            true,
        );
        assert!(response.ok, "{:?}", response.detail);
        assert_eq!(response.message, "🎉 Birthday reminder saved!");
        let record_id = response.record_id.expect("saved birthday should return id");

        let listed = entry_list("birthdays".to_string());
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items_json.contains(&name));
        assert!(listed.items_json.contains(&record_id));
    }

    #[test]
    fn missing_anniversary_name_returns_screen_prompt() {
        let response = entry_save_anniversary(
            "  ".to_string(),
            "2015-02-14T00:00:00.000Z".to_string(),
            true,
        );
        assert!(!response.ok);
        assert_eq!(response.message, "Please enter a couple's name.");
        assert!(response.record_id.is_none());
    }

    #[test]
    fn unknown_picker_value_is_rejected_before_saving() {
        let response = entry_save_health_checkup(
            unique_token("checkup"),
            "Hearing".to_string(),
            "2025-01-10T09:00:00.000Z".to_string(),
            "Yearly".to_string(),
            String::new(),
            String::new(),
            String::new(),
            true,
        );
        assert!(!response.ok);
        assert!(response.detail.unwrap().contains("checkupType"));
    }

    #[test]
    fn checkup_without_picked_date_is_saved() {
        let name = unique_token("checkup-today");
        let response = entry_save_health_checkup(
            name.clone(),
            "Eye".to_string(),
            String::new(),
            "Once".to_string(),
            String::new(),
            String::new(),
            String::new(),
            true,
        );
        assert!(response.ok, "{:?}", response.detail);

        let listed = entry_list("healthCheckups".to_string());
        assert!(listed.items_json.contains(&name));
    }

    #[test]
    fn vaccination_with_all_required_fields_is_saved() {
        let response = entry_save_vaccination(
            unique_token("vaccination"),
            "Rabies".to_string(),
            "2024-08-01T00:00:00.000Z".to_string(),
            String::new(),
            "Pet".to_string(),
            String::new(),
            "City Vet".to_string(),
            String::new(),
            true,
            "Yearly".to_string(),
        );
        assert!(response.ok, "{:?}", response.detail);
        assert_eq!(response.message, "💉 Vaccination saved!");
    }

    #[test]
    fn medicine_with_missing_time_slot_is_not_saved() {
        let name = unique_token("medicine");
        let response = entry_save_medicine(
            name.clone(),
            "250mg".to_string(),
            3,
            vec!["08:00 AM".to_string(), "02:00 PM".to_string()],
            "2024-06-01T00:00:00.000Z".to_string(),
            "Daily".to_string(),
            String::new(),
            String::new(),
            true,
        );
        assert!(!response.ok);
        assert_eq!(response.message, "Please fill all required fields.");

        let listed = entry_list("medicine_reminders".to_string());
        assert!(!listed.items_json.contains(&name));
    }

    #[test]
    fn medicine_with_every_slot_is_saved_with_24h_times() {
        let name = unique_token("medicine-ok");
        let response = entry_save_medicine(
            name.clone(),
            "250mg".to_string(),
            2,
            vec!["08:00 AM".to_string(), "08:30 PM".to_string()],
            "2024-06-01T00:00:00.000Z".to_string(),
            "Every 15 Days".to_string(),
            String::new(),
            String::new(),
            true,
        );
        assert!(response.ok, "{:?}", response.detail);

        let listed = entry_list("medicine_reminders".to_string());
        assert!(listed.items_json.contains(&name));
        assert!(listed.items_json.contains("\"20:30\""));
    }

    #[test]
    fn unknown_category_list_fails_softly() {
        let listed = entry_list("gifts".to_string());
        assert!(!listed.ok);
        assert_eq!(listed.items_json, "[]");
    }

    #[test]
    fn routing_helpers_expose_paths() {
        assert_eq!(entry_launch_path(true), "/(tabs)");
        assert_eq!(entry_launch_path(false), "/onboarding");
        let catalog = entry_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[0].path, "/add-birthday");
        let gifts = entry_gift_ideas();
        assert_eq!(gifts.len(), 3);
        assert_eq!(gifts[0].title, "Electronics");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
