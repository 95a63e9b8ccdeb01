use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use medtrack_core::model::{
    LogStatus, LogUpdate, MedicineUpdate, NewMedicine, NewSchedule, Theme,
};
use medtrack_core::storage::keys;
use medtrack_core::views::{LogQuery, ReportPeriod};
use medtrack_core::{AppState, FixedClock, JsonFileStore, KeyValueStore, MedtrackError};

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid timestamp")
}

fn clock(value: &str) -> Box<FixedClock> {
    Box::new(FixedClock(at(value)))
}

#[test]
fn test_session_survives_process_restart() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("medtrack").join("state.json");

    {
        let store = JsonFileStore::open(&path).expect("open should succeed");
        let mut state = AppState::load(&store, clock("2025-06-08T09:00")).expect("load should succeed");
        state.login("demo@example.com").expect("login should succeed");
        state.set_theme(Theme::Dark);

        let mut store = store;
        state.persist(&mut store).expect("persist should succeed");
    }

    let store = JsonFileStore::open(&path).expect("reopen should succeed");
    let mut state = AppState::load(&store, clock("2025-06-08T09:30")).expect("load should succeed");
    assert!(state.is_authenticated());
    assert_eq!(state.user().map(|u| u.email.as_str()), Some("demo@example.com"));
    assert_eq!(state.settings().theme(), Theme::Dark);

    let stats = state.today_stats();
    assert_eq!((stats.total, stats.completed, stats.pending, stats.missed), (3, 2, 1, 0));
    assert_eq!(stats.adherence_rate, 67);

    let raw = fs::read_to_string(&path).expect("state file should exist");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("state file is JSON");
    // Default notification settings are not written.
    for key in keys::ALL.iter().filter(|k| **k != keys::NOTIFICATION_SETTINGS) {
        assert!(json.get(*key).is_some(), "missing key {}", key);
    }
}

#[test]
fn test_logout_empties_state_file() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("state.json");

    let mut store = JsonFileStore::open(&path).expect("open should succeed");
    let mut state = AppState::load(&store, clock("2025-06-08T09:00")).expect("load should succeed");
    state.login("test@example.com").expect("login should succeed");
    state.persist(&mut store).expect("persist should succeed");

    state.logout();
    state.persist(&mut store).expect("persist should succeed");

    let raw = fs::read_to_string(&path).expect("state file should exist");
    assert_eq!(raw.trim(), "{}");
    let reopened = JsonFileStore::open(&path).expect("reopen should succeed");
    for key in keys::ALL {
        assert_eq!(reopened.get(key).expect("get should succeed"), None);
    }
}

#[test]
fn test_corrupt_key_in_file_falls_back() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("state.json");
    fs::write(
        &path,
        r#"{"theme": "neon", "notificationSettings": {"enabled": "yes"}, "medicines": []}"#,
    )
    .expect("write should succeed");

    let store = JsonFileStore::open(&path).expect("open should succeed");
    let state = AppState::load(&store, clock("2025-06-08T09:00")).expect("load should succeed");
    assert_eq!(state.settings().theme(), Theme::System);
    assert!(state.settings().notifications().enabled);
    assert!(!state.is_authenticated());
}

#[test]
fn test_unparseable_file_is_reported() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("state.json");
    fs::write(&path, "{ truncated").expect("write should succeed");

    let err = JsonFileStore::open(&path).expect_err("open should fail");
    assert!(matches!(err, MedtrackError::Serialization(_)));
}

#[test]
fn test_medicine_lifecycle_through_state() {
    let mut state = AppState::new(clock("2025-06-10T21:00"));
    state.login("demo@example.com").expect("login should succeed");

    let iron = state
        .add_medicine(
            NewMedicine::new("Iron")
                .with_dosage("1", Some("capsule".into()))
                .with_schedule(NewSchedule::daily("20:00".parse().expect("valid time"))),
        )
        .expect("add should succeed");

    let log_id = state.quick_log(iron, at("2025-06-10T20:00"), LogStatus::Pending, None);
    assert!(state.update_log(
        log_id,
        &LogUpdate::new()
            .status(LogStatus::Completed)
            .taken_time(Some(at("2025-06-10T20:10")))
    ));

    let logs = LogQuery::new().medicine(iron).run(state.entities());
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, LogStatus::Completed);

    assert!(state.update_medicine(iron, &MedicineUpdate::new().active(false)));
    let report = state.report(ReportPeriod::Daily);
    assert!(report.medicines.iter().all(|m| m.medicine_id != iron));

    let deleted = state.delete_medicine(iron).expect("medicine should exist");
    assert_eq!(deleted.removed_logs, 1);
    assert!(state.entities().logs_for_medicine(iron).next().is_none());
    // Seeded logs are untouched.
    assert_eq!(state.entities().logs().len(), 3);
}

#[test]
fn test_week_calendar_for_seeded_regimen() {
    let mut state = AppState::new(clock("2025-06-11T09:00"));
    state.login("demo@example.com").expect("login should succeed");

    let today = NaiveDate::from_ymd_opt(2025, 6, 11).expect("valid date");
    let week = state.week_calendar(today);
    assert_eq!(week.start, NaiveDate::from_ymd_opt(2025, 6, 8).expect("valid date"));
    // Three daily doses on each of seven days.
    assert_eq!(week.cells().count(), 21);

    let wednesday = &week.days[3];
    let statuses: Vec<_> = wednesday.cells.iter().map(|c| c.status()).collect();
    assert_eq!(
        statuses,
        [LogStatus::Completed, LogStatus::Completed, LogStatus::Pending]
    );
    let times: Vec<_> = wednesday
        .cells
        .iter()
        .map(|c| c.schedule.scheduled_time.to_string())
        .collect();
    assert_eq!(times, ["07:30", "08:00", "19:30"]);
}
