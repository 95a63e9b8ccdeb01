//! Today's statistics, pending doses and active medicines.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::model::{LogStatus, MedicationLog, Medicine};
use crate::store::EntityStore;

/// Percentage of `completed` out of `total`, rounded half-up. Zero when
/// there is nothing to count.
pub fn adherence_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (completed, total) = (completed as u64, total as u64);
    ((200 * completed + total) / (2 * total)) as u32
}

/// Counts of today's doses by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub missed: usize,
    pub skipped: usize,
    pub adherence_rate: u32,
}

/// Logs whose scheduled date is `today`.
pub fn today_logs(store: &EntityStore, today: NaiveDate) -> impl Iterator<Item = &MedicationLog> {
    store
        .logs()
        .iter()
        .filter(move |l| l.scheduled_time.date() == today)
}

pub fn today_stats(store: &EntityStore, today: NaiveDate) -> TodayStats {
    let mut stats = TodayStats::default();
    for log in today_logs(store, today) {
        stats.total += 1;
        match log.status {
            LogStatus::Completed => stats.completed += 1,
            LogStatus::Pending => stats.pending += 1,
            LogStatus::Missed => stats.missed += 1,
            LogStatus::Skipped => stats.skipped += 1,
        }
    }
    stats.adherence_rate = adherence_rate(stats.completed, stats.total);
    stats
}

/// Today's pending doses that are due or overdue at `now`.
pub fn pending_medications(
    store: &EntityStore,
    today: NaiveDate,
    now: NaiveDateTime,
) -> Vec<&MedicationLog> {
    today_logs(store, today)
        .filter(|l| l.status == LogStatus::Pending && l.scheduled_time <= now)
        .collect()
}

pub fn active_medicines(store: &EntityStore) -> impl Iterator<Item = &Medicine> {
    store.medicines().iter().filter(|m| m.active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MedicineId, MedicineUpdate, NewLog, NewMedicine, UserId};
    use chrono::Utc;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn push(store: &mut EntityStore, when: &str, status: LogStatus) {
        store.add_log(NewLog::new(MedicineId::new(), at(when), status).into_log(Utc::now()));
    }

    #[test]
    fn test_adherence_rate() {
        assert_eq!(adherence_rate(0, 0), 0);
        assert_eq!(adherence_rate(5, 0), 0);
        assert_eq!(adherence_rate(2, 3), 67);
        assert_eq!(adherence_rate(1, 3), 33);
        assert_eq!(adherence_rate(1, 2), 50);
        assert_eq!(adherence_rate(1, 8), 13);
        assert_eq!(adherence_rate(3, 3), 100);
    }

    #[test]
    fn test_today_stats_only_counts_today() {
        let mut store = EntityStore::new();
        push(&mut store, "2025-06-08T08:00", LogStatus::Completed);
        push(&mut store, "2025-06-08T12:00", LogStatus::Missed);
        push(&mut store, "2025-06-08T18:00", LogStatus::Skipped);
        push(&mut store, "2025-06-07T08:00", LogStatus::Completed);

        let stats = today_stats(&store, day("2025-06-08"));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.missed, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.adherence_rate, 33);
    }

    #[test]
    fn test_today_stats_empty() {
        let stats = today_stats(&EntityStore::new(), day("2025-06-08"));
        assert_eq!(stats, TodayStats::default());
    }

    #[test]
    fn test_pending_excludes_future_and_resolved() {
        let mut store = EntityStore::new();
        push(&mut store, "2025-06-08T07:30", LogStatus::Pending);
        push(&mut store, "2025-06-08T09:00", LogStatus::Pending);
        push(&mut store, "2025-06-08T19:30", LogStatus::Pending);
        push(&mut store, "2025-06-08T08:00", LogStatus::Completed);
        push(&mut store, "2025-06-07T08:00", LogStatus::Pending);

        let pending = pending_medications(&store, day("2025-06-08"), at("2025-06-08T09:00"));
        let times: Vec<_> = pending.iter().map(|l| l.scheduled_time).collect();
        assert_eq!(times, [at("2025-06-08T07:30"), at("2025-06-08T09:00")]);
    }

    #[test]
    fn test_active_medicines() {
        let mut store = EntityStore::new();
        let a = NewMedicine::new("A").into_medicine(UserId(1), Utc::now());
        let b = NewMedicine::new("B").into_medicine(UserId(1), Utc::now());
        let b_id = b.id;
        store.add_medicine(a);
        store.add_medicine(b);
        store.update_medicine(b_id, &MedicineUpdate::new().active(false));

        let names: Vec<_> = active_medicines(&store).map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["A"]);
    }
}
