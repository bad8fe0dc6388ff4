//! End-to-end editing-session tests over file-backed storage.


use chrono::NaiveDate;
use fixtures::{sample_pattern, slot, temp_file_store};
use std::fs;
use tutorlink_availability::store::parse_template_hours;
use tutorlink_availability::{
    AvailabilityProjector, AvailabilityStore, JsonFileStorage, RecurringAvailability, TimeSlot,
    Weekday,
};
use tutorlink_config::AvailabilityConfig;

fn a_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
}

#[test]
fn test_editing_session_survives_reload() {
    tutorlink_common::logging::init();
    let (dir, store) = temp_file_store();
    let today = a_monday();

    let mut projector = AvailabilityProjector::new(store);
    assert!(projector.pattern().is_empty());

    let cell = today.succ_opt().unwrap().and_hms_opt(11, 0, 0).unwrap();
    let outcome = projector.select_range(cell, today);
    assert!(outcome.persisted);

    // A later session against the same file sees the edit
    let storage = JsonFileStorage::new(dir.path().join("availability.json"));
    let reloaded = AvailabilityProjector::new(AvailabilityStore::new(storage));
    assert!(reloaded.pattern().contains(Weekday::Tuesday, slot(11)));
    assert_eq!(reloaded.stats().total_slots, 1);
}

#[test]
fn test_on_disk_shape_is_canonical_json() {
    let (dir, store) = temp_file_store();
    store.save(&sample_pattern()).unwrap();

    let raw = fs::read_to_string(dir.path().join("availability.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 7);
    assert_eq!(object["monday"], serde_json::json!(["09:00", "10:00"]));
    assert_eq!(object["wednesday"], serde_json::json!(["14:00"]));
    assert_eq!(object["tuesday"], serde_json::json!([]));
}

#[test]
fn test_corrupted_file_falls_back_to_empty() {
    let (dir, store) = temp_file_store();
    store.save(&sample_pattern()).unwrap();
    fs::write(dir.path().join("availability.json"), "{broken!").unwrap();

    assert_eq!(store.load(), RecurringAvailability::empty());
}

#[test]
fn test_reset_clears_the_persisted_pattern() {
    let (_dir, store) = temp_file_store();
    store.save(&sample_pattern()).unwrap();

    let pattern = store.reset().unwrap();
    assert!(pattern.is_empty());
    assert_eq!(store.load(), RecurringAvailability::empty());
}

#[test]
fn test_template_from_config_default_hours() {
    let (_dir, store) = temp_file_store();
    let config = AvailabilityConfig::default();
    let hours: Vec<TimeSlot> =
        parse_template_hours(&config.default_template_hours).expect("config hours are HH:00");

    let pattern = store
        .apply_template(&hours, &Weekday::BUSINESS_DAYS)
        .unwrap();

    assert_eq!(pattern.total_slots(), hours.len() * 5);
    assert_eq!(pattern.slots(Weekday::Saturday).count(), 0);
    assert_eq!(store.load(), pattern);
}

#[test]
fn test_store_built_from_config_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = AvailabilityConfig {
        schedule_path: dir
            .path()
            .join("schedule.json")
            .to_string_lossy()
            .into_owned(),
        ..AvailabilityConfig::default()
    };

    let store = AvailabilityStore::new(JsonFileStorage::from_config(&config));
    store.save(&sample_pattern()).unwrap();
    assert!(dir.path().join("schedule.json").exists());
    assert_eq!(store.load(), sample_pattern());
}
