//! Upcoming reminders and overdue doses.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::model::{LogStatus, MedicationLog, Medicine, NotificationSettings, Schedule};
use crate::store::EntityStore;

/// A dose whose reminder falls inside the look-ahead window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder<'a> {
    #[serde(skip)]
    pub medicine: &'a Medicine,
    #[serde(skip)]
    pub schedule: &'a Schedule,
    pub medicine_name: &'a str,
    pub scheduled_time: NaiveDateTime,
    pub remind_at: NaiveDateTime,
}

impl Reminder<'_> {
    /// Human-readable reminder text, with the dosage when one is set.
    pub fn message(&self) -> String {
        match self.medicine.dosage_label() {
            Some(dosage) => format!(
                "Time for {} ({}) at {}",
                self.medicine.name,
                dosage,
                self.scheduled_time.format("%H:%M")
            ),
            None => format!(
                "Time for {} at {}",
                self.medicine.name,
                self.scheduled_time.format("%H:%M")
            ),
        }
    }
}

/// Reminders for today's doses whose reminder instant (dose time minus the
/// configured offset) lies in `[now, now + window]`.
///
/// Only active schedules of active medicines are considered, and a dose
/// that already has a resolved log is skipped. Nothing is due while
/// notifications are disabled.
pub fn due_reminders<'a>(
    store: &'a EntityStore,
    settings: &NotificationSettings,
    now: NaiveDateTime,
    window: Duration,
) -> Vec<Reminder<'a>> {
    if !settings.enabled {
        return Vec::new();
    }
    let offset = Duration::minutes(i64::from(settings.reminder_minutes));
    // A window reaching past the representable range is capped, not an error.
    let horizon = now.checked_add_signed(window).unwrap_or(NaiveDateTime::MAX);

    // A window can cross midnight, so look at today and tomorrow.
    let dates = std::iter::once(now.date()).chain(now.date().succ_opt());
    let mut due: Vec<Reminder<'a>> = Vec::new();
    for medicine in store.medicines().iter().filter(|m| m.active) {
        for schedule in medicine.active_schedules() {
            for date in dates.clone() {
                if !schedule.applies_on(date.weekday()) {
                    continue;
                }
                let scheduled_time = schedule.occurrence_on(date);
                let remind_at = scheduled_time
                    .checked_sub_signed(offset)
                    .unwrap_or(NaiveDateTime::MIN);
                if remind_at < now || remind_at > horizon {
                    continue;
                }
                let resolved = store.logs().iter().any(|l| {
                    l.medicine_id == medicine.id
                        && l.scheduled_time == scheduled_time
                        && l.status != LogStatus::Pending
                });
                if resolved {
                    continue;
                }
                due.push(Reminder {
                    medicine,
                    schedule,
                    medicine_name: &medicine.name,
                    scheduled_time,
                    remind_at,
                });
            }
        }
    }
    due.sort_by_key(|r| r.remind_at);
    due
}

/// Today's pending logs scheduled at least the missed-dose offset before
/// `now`. An offset of zero disables the check.
pub fn overdue_logs<'a>(
    store: &'a EntityStore,
    settings: &NotificationSettings,
    today: NaiveDate,
    now: NaiveDateTime,
) -> Vec<&'a MedicationLog> {
    if settings.missed_medication_minutes == 0 {
        return Vec::new();
    }
    let cutoff = now
        .checked_sub_signed(Duration::minutes(i64::from(settings.missed_medication_minutes)))
        .unwrap_or(NaiveDateTime::MIN);
    store
        .logs()
        .iter()
        .filter(|l| {
            l.status == LogStatus::Pending
                && l.scheduled_time.date() == today
                && l.scheduled_time <= cutoff
        })
        .collect()
}
