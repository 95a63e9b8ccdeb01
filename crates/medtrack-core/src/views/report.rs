//! Adherence reports over a date range.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::error::MedtrackError;
use crate::model::{LogStatus, MedicationLog, MedicineId};
use crate::store::EntityStore;

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Daily,
    /// Today and the six days before it
    Weekly,
    /// Today and the 29 days before it
    Monthly,
    /// Explicit inclusive range
    Range { start: NaiveDate, end: NaiveDate },
}

impl ReportPeriod {
    /// Inclusive `(start, end)` dates relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match *self {
            ReportPeriod::Daily => (today, today),
            ReportPeriod::Weekly => (today - Duration::days(6), today),
            ReportPeriod::Monthly => (today - Duration::days(29), today),
            ReportPeriod::Range { start, end } => (start, end),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "daily",
            ReportPeriod::Weekly => "weekly",
            ReportPeriod::Monthly => "monthly",
            ReportPeriod::Range { .. } => "custom",
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = MedtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(ReportPeriod::Daily),
            "weekly" => Ok(ReportPeriod::Weekly),
            "monthly" => Ok(ReportPeriod::Monthly),
            other => Err(MedtrackError::InvalidInput(format!(
                "unknown report period: {} (use daily, weekly or monthly)",
                other
            ))),
        }
    }
}

/// Part of the day a dose falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBand {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeBand {
    const ORDER: [TimeBand; 4] = [
        TimeBand::Morning,
        TimeBand::Afternoon,
        TimeBand::Evening,
        TimeBand::Night,
    ];

    pub fn of(time: NaiveDateTime) -> Self {
        match time.hour() {
            6..=11 => TimeBand::Morning,
            12..=17 => TimeBand::Afternoon,
            18..=23 => TimeBand::Evening,
            _ => TimeBand::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeBand::Morning => "morning (06-11)",
            TimeBand::Afternoon => "afternoon (12-17)",
            TimeBand::Evening => "evening (18-23)",
            TimeBand::Night => "night (00-05)",
        }
    }
}

impl fmt::Display for TimeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineReport {
    pub medicine_id: MedicineId,
    pub medicine_name: String,
    pub scheduled_count: usize,
    pub taken_count: usize,
    pub missed_count: usize,
    /// Percentage, unrounded
    pub adherence_rate: f64,
    /// `HH:MM` of each missed dose
    pub missed_times: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_scheduled: usize,
    pub total_taken: usize,
    pub total_missed: usize,
    pub adherence_rate: f64,
    pub most_missed_time: Option<TimeBand>,
    pub best_adherence_medicine: Option<String>,
    pub worst_adherence_medicine: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceReport {
    pub period: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub summary: ReportSummary,
    pub medicines: Vec<MedicineReport>,
    pub recommendations: Vec<String>,
    pub generated_at: NaiveDateTime,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Build a report for `period`, anchored on the date of `now`.
///
/// Only active medicines get a per-medicine row; the time-band analysis
/// looks at every missed log in the window.
pub fn adherence_report(
    store: &EntityStore,
    period: ReportPeriod,
    now: NaiveDateTime,
) -> AdherenceReport {
    let (start, end) = period.bounds(now.date());
    let in_window: Vec<&MedicationLog> = store
        .logs()
        .iter()
        .filter(|l| {
            let date = l.scheduled_time.date();
            date >= start && date <= end
        })
        .collect();

    let medicines: Vec<MedicineReport> = store
        .medicines()
        .iter()
        .filter(|m| m.active)
        .map(|medicine| {
            let logs: Vec<&&MedicationLog> = in_window
                .iter()
                .filter(|l| l.medicine_id == medicine.id)
                .collect();
            let taken_count = logs.iter().filter(|l| l.status == LogStatus::Completed).count();
            let missed_times: Vec<String> = logs
                .iter()
                .filter(|l| l.status == LogStatus::Missed)
                .map(|l| l.scheduled_time.format("%H:%M").to_string())
                .collect();
            MedicineReport {
                medicine_id: medicine.id,
                medicine_name: medicine.name.clone(),
                scheduled_count: logs.len(),
                taken_count,
                missed_count: missed_times.len(),
                adherence_rate: percent(taken_count, logs.len()),
                missed_times,
            }
        })
        .collect();

    let total_scheduled = medicines.iter().map(|m| m.scheduled_count).sum();
    let total_taken = medicines.iter().map(|m| m.taken_count).sum();
    let total_missed = medicines.iter().map(|m| m.missed_count).sum();

    let rated = || medicines.iter().filter(|m| m.scheduled_count > 0);
    // Ties go to the earliest listed medicine.
    let best = rated()
        .fold(None::<&MedicineReport>, |acc, m| match acc {
            Some(a) if a.adherence_rate >= m.adherence_rate => Some(a),
            _ => Some(m),
        })
        .map(|m| m.medicine_name.clone());
    let worst = rated()
        .fold(None::<&MedicineReport>, |acc, m| match acc {
            Some(a) if a.adherence_rate <= m.adherence_rate => Some(a),
            _ => Some(m),
        })
        .map(|m| m.medicine_name.clone());

    let summary = ReportSummary {
        total_scheduled,
        total_taken,
        total_missed,
        adherence_rate: percent(total_taken, total_scheduled),
        most_missed_time: most_missed_band(&in_window),
        best_adherence_medicine: best,
        worst_adherence_medicine: worst,
    };
    let recommendations = recommendations(&summary, &medicines);

    log::debug!(
        "built {} report {}..{}: {}/{} taken",
        period.as_str(),
        start,
        end,
        summary.total_taken,
        summary.total_scheduled
    );

    AdherenceReport {
        period: period.as_str(),
        start,
        end,
        summary,
        medicines,
        recommendations,
        generated_at: now,
    }
}

/// Band with the most missed doses; earlier bands win ties.
fn most_missed_band(logs: &[&MedicationLog]) -> Option<TimeBand> {
    let mut counts = [0usize; 4];
    for log in logs.iter().filter(|l| l.status == LogStatus::Missed) {
        let band = TimeBand::of(log.scheduled_time);
        if let Some(i) = TimeBand::ORDER.iter().position(|b| *b == band) {
            counts[i] += 1;
        }
    }
    let mut best: Option<(TimeBand, usize)> = None;
    for (band, count) in TimeBand::ORDER.iter().zip(counts) {
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((*band, count));
        }
    }
    best.map(|(band, _)| band)
}

fn recommendations(summary: &ReportSummary, medicines: &[MedicineReport]) -> Vec<String> {
    let rate = summary.adherence_rate;
    let mut out = vec![
        if rate >= 90.0 {
            "Excellent adherence. Keep up the routine."
        } else if rate >= 70.0 {
            "Good habits, with some room to improve."
        } else if rate >= 50.0 {
            "Adherence needs work. Try alarms or keeping medicines somewhere visible."
        } else {
            "Adherence is low. Consider talking to your doctor or pharmacist."
        }
        .to_string(),
    ];

    if let Some(band) = summary.most_missed_time {
        out.push(format!(
            "Most missed doses fall in the {}. Consider a stronger reminder for that time.",
            band
        ));
    }

    for medicine in medicines {
        if medicine.adherence_rate < 60.0 && medicine.scheduled_count >= 3 {
            out.push(format!(
                "Adherence for \"{}\" is slipping. Review when you take it.",
                medicine.medicine_name
            ));
        }
    }

    if summary.total_missed > summary.total_taken / 2 {
        out.push(
            "Frequent misses: try a pill organiser, a fixed spot for your medicines, or a reminder from family."
                .to_string(),
        );
    }
    out
}
