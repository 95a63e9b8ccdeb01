//! Filtering and summaries for the log history and medicine list.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::MedtrackError;
use crate::model::{LogStatus, MedicationLog, Medicine, MedicineId};
use crate::store::EntityStore;

/// Filter for querying logs.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    /// Only logs scheduled on this date
    pub date: Option<NaiveDate>,

    /// Only logs with one of these statuses (empty = any)
    pub statuses: Vec<LogStatus>,

    /// Only logs for this medicine
    pub medicine_id: Option<MedicineId>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl LogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn status(mut self, status: LogStatus) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn medicine(mut self, id: MedicineId) -> Self {
        self.medicine_id = Some(id);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, log: &MedicationLog) -> bool {
        self.date.map_or(true, |d| log.scheduled_time.date() == d)
            && (self.statuses.is_empty() || self.statuses.contains(&log.status))
            && self.medicine_id.map_or(true, |id| log.medicine_id == id)
    }

    /// Matching logs, most recently scheduled first.
    pub fn run<'a>(&self, store: &'a EntityStore) -> Vec<&'a MedicationLog> {
        let mut logs: Vec<_> = store.logs().iter().filter(|l| self.matches(l)).collect();
        logs.sort_by(|a, b| b.scheduled_time.cmp(&a.scheduled_time));
        if let Some(limit) = self.limit {
            logs.truncate(limit);
        }
        logs
    }
}

/// Status counts over a set of logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSummary {
    pub total: usize,
    pub completed: usize,
    pub missed: usize,
    pub pending: usize,
    pub skipped: usize,
}

impl LogSummary {
    pub fn from_logs<'a, I: IntoIterator<Item = &'a MedicationLog>>(logs: I) -> Self {
        let mut summary = Self::default();
        for log in logs {
            summary.total += 1;
            match log.status {
                LogStatus::Completed => summary.completed += 1,
                LogStatus::Missed => summary.missed += 1,
                LogStatus::Pending => summary.pending += 1,
                LogStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }
}

/// Which medicines a list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MedicineFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl FromStr for MedicineFilter {
    type Err = MedtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(MedicineFilter::All),
            "active" => Ok(MedicineFilter::Active),
            "inactive" => Ok(MedicineFilter::Inactive),
            other => Err(MedtrackError::InvalidInput(format!(
                "unknown filter: {} (use all, active or inactive)",
                other
            ))),
        }
    }
}

/// Search and filter for the medicine list.
#[derive(Debug, Clone, Default)]
pub struct MedicineQuery {
    /// Case-insensitive substring matched against name and description
    pub search: Option<String>,
    pub filter: MedicineFilter,
}

impl MedicineQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn filter(mut self, filter: MedicineFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn matches(&self, medicine: &Medicine) -> bool {
        let matches_filter = match self.filter {
            MedicineFilter::All => true,
            MedicineFilter::Active => medicine.active,
            MedicineFilter::Inactive => !medicine.active,
        };
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                medicine.name.to_lowercase().contains(&term)
                    || medicine
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
        };
        matches_filter && matches_search
    }

    pub fn run<'a>(&self, store: &'a EntityStore) -> Vec<&'a Medicine> {
        store.medicines().iter().filter(|m| self.matches(m)).collect()
    }
}

/// Headline numbers for the medicine list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineTotals {
    pub medicines: usize,
    pub active_medicines: usize,
    pub active_schedules: usize,
}

pub fn medicine_totals(store: &EntityStore) -> MedicineTotals {
    let medicines = store.medicines();
    MedicineTotals {
        medicines: medicines.len(),
        active_medicines: medicines.iter().filter(|m| m.active).count(),
        active_schedules: medicines.iter().map(|m| m.active_schedules().count()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MedicineUpdate, NewLog, NewMedicine, NewSchedule, UserId};
    use chrono::{NaiveDateTime, Utc};

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn sample_store() -> (EntityStore, MedicineId) {
        let mut store = EntityStore::new();
        let vit = NewMedicine::new("Vitamin D")
            .with_description("Supports bone health")
            .with_schedule(NewSchedule::daily("08:00".parse().unwrap()))
            .into_medicine(UserId(1), Utc::now());
        let bp = NewMedicine::new("Amlodipine")
            .with_description("Blood pressure")
            .with_schedule(NewSchedule::daily("07:30".parse().unwrap()))
            .with_schedule(NewSchedule::daily("19:30".parse().unwrap()))
            .into_medicine(UserId(1), Utc::now());
        let (vit_id, bp_id) = (vit.id, bp.id);
        store.add_medicine(vit);
        store.add_medicine(bp);
        store.update_medicine(bp_id, &MedicineUpdate::new().active(false));

        for (id, when, status) in [
            (vit_id, "2025-06-07T08:00", LogStatus::Completed),
            (vit_id, "2025-06-08T08:00", LogStatus::Missed),
            (bp_id, "2025-06-08T07:30", LogStatus::Completed),
            (bp_id, "2025-06-08T19:30", LogStatus::Pending),
        ] {
            store.add_log(NewLog::new(id, at(when), status).into_log(Utc::now()));
        }
        (store, vit_id)
    }

    #[test]
    fn test_log_query_sorts_newest_first() {
        let (store, _) = sample_store();
        let logs = LogQuery::new().run(&store);
        let times: Vec<_> = logs.iter().map(|l| l.scheduled_time).collect();
        assert_eq!(
            times,
            [
                at("2025-06-08T19:30"),
                at("2025-06-08T08:00"),
                at("2025-06-08T07:30"),
                at("2025-06-07T08:00"),
            ]
        );
    }

    #[test]
    fn test_log_query_filters() {
        let (store, vit_id) = sample_store();
        let date = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();

        assert_eq!(LogQuery::new().date(date).run(&store).len(), 3);
        assert_eq!(LogQuery::new().medicine(vit_id).run(&store).len(), 2);
        assert_eq!(
            LogQuery::new()
                .status(LogStatus::Completed)
                .status(LogStatus::Missed)
                .date(date)
                .run(&store)
                .len(),
            2
        );
        assert_eq!(LogQuery::new().limit(1).run(&store).len(), 1);
    }

    #[test]
    fn test_log_summary() {
        let (store, _) = sample_store();
        let summary = LogSummary::from_logs(store.logs());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.missed, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_medicine_query() {
        let (store, _) = sample_store();
        assert_eq!(MedicineQuery::new().run(&store).len(), 2);
        assert_eq!(MedicineQuery::new().search("BONE").run(&store)[0].name, "Vitamin D");
        assert_eq!(
            MedicineQuery::new().filter(MedicineFilter::Inactive).run(&store)[0].name,
            "Amlodipine"
        );
        assert!(MedicineQuery::new()
            .search("blood")
            .filter(MedicineFilter::Active)
            .run(&store)
            .is_empty());
    }

    #[test]
    fn test_medicine_totals() {
        let (store, _) = sample_store();
        let totals = medicine_totals(&store);
        assert_eq!(totals.medicines, 2);
        assert_eq!(totals.active_medicines, 1);
        // Schedules of an inactive medicine still count while they are active.
        assert_eq!(totals.active_schedules, 3);
    }
}
