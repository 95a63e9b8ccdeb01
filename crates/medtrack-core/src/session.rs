//! Mock sign-in.
//!
//! There is no real identity provider: a fixed set of demo accounts is
//! accepted by email and each hands out a placeholder token. Signing in
//! seeds the entity store with a small sample regimen for the current day.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{MedtrackError, Result};
use crate::model::{
    LogStatus, NewLog, NewMedicine, NewSchedule, TimeOfDay, UserId, UserProfile, WeekdaySet,
};
use crate::store::EntityStore;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const TEST_EMAIL: &str = "test@example.com";

/// A hard-coded account accepted by [`authenticate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAccount {
    pub id: u64,
    pub email: &'static str,
    pub display_name: &'static str,
    pub timezone: &'static str,
    pub notification_enabled: bool,
    pub line_user_id: &'static str,
    pub token: &'static str,
}

pub const MOCK_ACCOUNTS: [MockAccount; 2] = [
    MockAccount {
        id: 1,
        email: DEMO_EMAIL,
        display_name: "Demo User",
        timezone: "Asia/Tokyo",
        notification_enabled: true,
        line_user_id: "mock_line_user_123",
        token: "mock_jwt_token_for_demo",
    },
    MockAccount {
        id: 2,
        email: TEST_EMAIL,
        display_name: "Test User",
        timezone: "Asia/Tokyo",
        notification_enabled: false,
        line_user_id: "mock_line_user_456",
        token: "mock_jwt_token_for_test",
    },
];

impl MockAccount {
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Fresh profile for this account as of `now`.
    pub fn profile(&self, now: DateTime<Utc>) -> UserProfile {
        UserProfile {
            id: self.user_id(),
            email: self.email.to_string(),
            display_name: Some(self.display_name.to_string()),
            timezone: self.timezone.to_string(),
            notification_enabled: self.notification_enabled,
            line_user_id: Some(self.line_user_id.to_string()),
            last_login_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Look up a mock account by email (case-insensitive, surrounding
/// whitespace ignored).
pub fn authenticate(email: &str) -> Result<&'static MockAccount> {
    let wanted = email.trim();
    MOCK_ACCOUNTS
        .iter()
        .find(|a| a.email.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            MedtrackError::Auth(format!(
                "unknown account: {} (try {} or {})",
                wanted, DEMO_EMAIL, TEST_EMAIL
            ))
        })
}

fn time(hour: u8, minute: u8) -> Result<TimeOfDay> {
    TimeOfDay::new(hour, minute)
}

/// Sample regimen seeded at sign-in: two medicines and three logs on
/// `today`, two taken and the evening dose still pending.
pub fn sample_data(user_id: UserId, today: NaiveDate, now: DateTime<Utc>) -> Result<EntityStore> {
    let mut store = EntityStore::new();

    let vitamin_d = NewMedicine::new("Vitamin D")
        .with_description("Supports bone health")
        .with_dosage("1", Some("tablet".to_string()))
        .with_schedule(NewSchedule::daily(time(8, 0)?).with_days(WeekdaySet::all()))
        .into_medicine(user_id, now);
    let blood_pressure = NewMedicine::new("Blood pressure medication")
        .with_description("Hypertension treatment")
        .with_dosage("0.5", Some("tablet".to_string()))
        .with_schedule(NewSchedule::daily(time(7, 30)?).with_days(WeekdaySet::all()))
        .with_schedule(NewSchedule::daily(time(19, 30)?).with_days(WeekdaySet::all()))
        .into_medicine(user_id, now);

    let logs = [
        (vitamin_d.id, time(8, 0)?, Some(time(8, 5)?), LogStatus::Completed),
        (blood_pressure.id, time(7, 30)?, Some(time(7, 35)?), LogStatus::Completed),
        (blood_pressure.id, time(19, 30)?, None, LogStatus::Pending),
    ];

    store.add_medicine(vitamin_d);
    store.add_medicine(blood_pressure);
    for (medicine_id, scheduled, taken, status) in logs {
        let mut log = NewLog::new(medicine_id, scheduled.on(today), status);
        if let Some(taken) = taken {
            log = log.with_taken_time(taken.on(today));
        }
        store.add_log(log.into_log(now));
    }
    Ok(store)
}
