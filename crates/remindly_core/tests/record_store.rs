use chrono::{DateTime, TimeZone, Utc};
use remindly_core::{
    Anniversary, Birthday, Category, KeyValueStore, MedicineFrequency, MedicineReminder,
    MemoryKeyValueStore, Record, RecordId, RecordStore, RecordValidationError, StoreError,
    TimeOfDay, Vaccination, VaccinationFrequency, VaccineRecipient,
};

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn vaccination(id: &str, name: &str) -> Vaccination {
    Vaccination {
        id: RecordId::new(id),
        name: name.to_string(),
        vaccine: "MMR".to_string(),
        date: utc(2024, 3, 1),
        dose: Some("2nd".to_string()),
        recipient: VaccineRecipient::Child,
        doctor: None,
        location: None,
        notes: None,
        notification_enabled: true,
        frequency: VaccinationFrequency::OneTime,
    }
}

fn medicine(times_per_day: u32, times: &[(u32, u32)]) -> MedicineReminder {
    MedicineReminder {
        id: RecordId::new("1712000000000"),
        medicine_name: "Metformin".to_string(),
        dosage: "500mg".to_string(),
        times_per_day,
        reminder_times: times
            .iter()
            .map(|(hour, minute)| TimeOfDay::from_hm(*hour, *minute).unwrap())
            .collect(),
        start_date: utc(2024, 5, 1),
        medicine_frequency: MedicineFrequency::Daily,
        notes: None,
        doctor: None,
        notification_enabled: true,
    }
}

#[test]
fn appending_birthday_to_empty_store_yields_exact_list() {
    let store = RecordStore::new(MemoryKeyValueStore::new());
    let asha = Birthday::new("Asha", utc(1990, 4, 12));

    store
        .append(Category::Birthdays, Record::Birthday(asha.clone()))
        .unwrap();

    let loaded = store.load_all(Category::Birthdays).unwrap();
    assert_eq!(loaded, vec![Record::Birthday(asha)]);

    let raw = store.provider().get("birthdays").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "name": "Asha", "date": "1990-04-12T00:00:00.000Z" }])
    );
}

#[test]
fn never_written_category_loads_empty() {
    let store = RecordStore::new(MemoryKeyValueStore::new());
    for category in Category::ALL {
        assert!(store.load_all(category).unwrap().is_empty());
        assert_eq!(store.count(category).unwrap(), 0);
    }
}

#[test]
fn append_grows_list_by_one_and_puts_record_last() {
    let store = RecordStore::new(MemoryKeyValueStore::new());
    store
        .append_typed(Anniversary::new(
            RecordId::new("1700000000000"),
            "Ravi & Meera",
            utc(2015, 2, 14),
        ))
        .unwrap();
    let before = store.count(Category::Anniversaries).unwrap();

    let next = Anniversary::new(RecordId::new("1700000000001"), "Sam & Lee", utc(2019, 6, 1));
    store.append_typed(next.clone()).unwrap();

    let loaded = store.load_typed::<Anniversary>().unwrap();
    assert_eq!(loaded.len(), before + 1);
    assert_eq!(loaded.last(), Some(&next));
}

#[test]
fn sequential_vaccinations_keep_submission_order() {
    let store = RecordStore::new(MemoryKeyValueStore::new());
    store.append_typed(vaccination("1", "Mia")).unwrap();
    store.append_typed(vaccination("2", "Rex")).unwrap();

    let names = store
        .load_typed::<Vaccination>()
        .unwrap()
        .into_iter()
        .map(|record| record.name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["Mia", "Rex"]);
}

#[test]
fn medicine_with_mismatched_reminder_times_is_never_persisted() {
    let store = RecordStore::new(MemoryKeyValueStore::new());
    let reminder = medicine(3, &[(8, 0), (20, 0)]);

    let err = store.append_typed(reminder).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(RecordValidationError::ReminderTimesMismatch {
            times_per_day: 3,
            actual: 2
        })
    ));
    assert_eq!(store.provider().get("medicine_reminders").unwrap(), None);

    store
        .append_typed(medicine(3, &[(8, 0), (14, 0), (20, 0)]))
        .unwrap();
    assert_eq!(store.count(Category::MedicineReminders).unwrap(), 1);
}

#[test]
fn record_for_another_category_is_rejected() {
    let store = RecordStore::new(MemoryKeyValueStore::new());
    let err = store
        .append(
            Category::Anniversaries,
            Record::Birthday(Birthday::new("Asha", utc(1990, 4, 12))),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(RecordValidationError::CategoryMismatch {
            expected: Category::Anniversaries,
            actual: Category::Birthdays,
        })
    ));
}

#[test]
fn invalid_json_is_reported_as_corrupt_and_left_untouched() {
    let provider = MemoryKeyValueStore::new();
    provider.set("birthdays", "[{\"name\": ").unwrap();
    let store = RecordStore::new(provider);

    let err = store.load_all(Category::Birthdays).unwrap_err();
    assert!(matches!(
        err,
        StoreError::CorruptStore {
            category: Category::Birthdays,
            ..
        }
    ));

    let append_err = store
        .append_typed(Birthday::new("Asha", utc(1990, 4, 12)))
        .unwrap_err();
    assert!(matches!(append_err, StoreError::CorruptStore { .. }));
    assert_eq!(
        store.provider().get("birthdays").unwrap().as_deref(),
        Some("[{\"name\": ")
    );
}

#[test]
fn non_array_and_wrong_shape_values_are_corrupt() {
    let provider = MemoryKeyValueStore::new();
    provider
        .set("vaccinations", r#"{"name":"Mia"}"#)
        .unwrap();
    provider
        .set(
            "anniversaries",
            r#"[{"id":"1","name":"Ravi","date":"2015-02-14T00:00:00.000Z","type":"birthday","notificationEnabled":true}]"#,
        )
        .unwrap();
    let store = RecordStore::new(provider);

    let err = store.load_all(Category::Vaccinations).unwrap_err();
    assert!(err.to_string().contains("expected a JSON array"), "{err}");

    let err = store.load_all(Category::Anniversaries).unwrap_err();
    assert!(matches!(
        err,
        StoreError::CorruptStore {
            category: Category::Anniversaries,
            ..
        }
    ));
}

#[test]
fn provider_failures_surface_as_persistence_errors() {
    let provider = MemoryKeyValueStore::new();
    let store = RecordStore::new(&provider);

    provider.set_fail_reads(true);
    let err = store.load_all(Category::Birthdays).unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));
    provider.set_fail_reads(false);

    provider.set_fail_writes(true);
    let err = store
        .append_typed(Birthday::new("Asha", utc(1990, 4, 12)))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Persistence {
            category: Category::Birthdays,
            ..
        }
    ));
    provider.set_fail_writes(false);
    assert!(store.load_all(Category::Birthdays).unwrap().is_empty());
}

#[test]
fn lists_written_by_the_mobile_app_are_readable_and_normalized_on_append() {
    let provider = MemoryKeyValueStore::new();
    provider
        .set(
            "medicine_reminders",
            r#"[{
                "id": "1712345678901",
                "medicineName": "Vitamin D",
                "dosage": "1 tablet",
                "timesPerDay": 2,
                "reminderTimes": ["08:30 AM", "09:15 PM"],
                "startDate": "2024-04-05T10:20:30.000Z",
                "medicineFrequency": "Weekly",
                "notes": "",
                "doctor": "",
                "notificationEnabled": true
            }]"#,
        )
        .unwrap();
    let store = RecordStore::new(provider);

    let loaded = store.load_typed::<MedicineReminder>().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].reminder_times[1], TimeOfDay::from_hm(21, 15).unwrap());
    assert_eq!(loaded[0].notes, None);

    store
        .append_typed(medicine(1, &[(7, 0)]))
        .unwrap();
    let raw = store.provider().get("medicine_reminders").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["reminderTimes"], serde_json::json!(["08:30", "21:15"]));
    assert!(json[0].get("notes").is_none());
    assert_eq!(json.as_array().unwrap().len(), 2);
}
