//! Dose logs: one concrete instance of a scheduled dose.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{LogId, MedicineId};
use crate::error::MedtrackError;

/// Outcome of a dose. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Pending,
    Completed,
    Missed,
    Skipped,
}

impl LogStatus {
    pub const ALL: [LogStatus; 4] = [
        LogStatus::Pending,
        LogStatus::Completed,
        LogStatus::Missed,
        LogStatus::Skipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Pending => "pending",
            LogStatus::Completed => "completed",
            LogStatus::Missed => "missed",
            LogStatus::Skipped => "skipped",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            LogStatus::Pending => "Scheduled",
            LogStatus::Completed => "Taken",
            LogStatus::Missed => "Missed",
            LogStatus::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStatus {
    type Err = MedtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(LogStatus::Pending),
            "completed" | "taken" => Ok(LogStatus::Completed),
            "missed" => Ok(LogStatus::Missed),
            "skipped" => Ok(LogStatus::Skipped),
            other => Err(MedtrackError::InvalidInput(format!(
                "unknown status: {} (use pending, completed, missed or skipped)",
                other
            ))),
        }
    }
}

/// A single dose record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationLog {
    pub id: LogId,
    pub medicine_id: MedicineId,
    /// Local wall-clock instant the dose was due.
    pub scheduled_time: NaiveDateTime,
    /// Local wall-clock instant the dose was actually taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_time: Option<NaiveDateTime>,
    pub status: LogStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Builder for creating new logs.
#[derive(Debug, Clone)]
pub struct NewLog {
    pub medicine_id: MedicineId,
    pub scheduled_time: NaiveDateTime,
    pub taken_time: Option<NaiveDateTime>,
    pub status: LogStatus,
    pub notes: Option<String>,
}

impl NewLog {
    pub fn new(medicine_id: MedicineId, scheduled_time: NaiveDateTime, status: LogStatus) -> Self {
        Self {
            medicine_id,
            scheduled_time,
            taken_time: None,
            status,
            notes: None,
        }
    }

    pub fn with_taken_time(mut self, taken_time: NaiveDateTime) -> Self {
        self.taken_time = Some(taken_time);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn into_log(self, now: DateTime<Utc>) -> MedicationLog {
        MedicationLog {
            id: LogId::new(),
            medicine_id: self.medicine_id,
            scheduled_time: self.scheduled_time,
            taken_time: self.taken_time,
            status: self.status,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a log. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct LogUpdate {
    pub status: Option<LogStatus>,
    pub scheduled_time: Option<NaiveDateTime>,
    pub taken_time: Option<Option<NaiveDateTime>>,
    pub notes: Option<Option<String>>,
}

impl LogUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: LogStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn scheduled_time(mut self, scheduled_time: NaiveDateTime) -> Self {
        self.scheduled_time = Some(scheduled_time);
        self
    }

    pub fn taken_time(mut self, taken_time: Option<NaiveDateTime>) -> Self {
        self.taken_time = Some(taken_time);
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.scheduled_time.is_none()
            && self.taken_time.is_none()
            && self.notes.is_none()
    }

    pub fn apply(&self, log: &mut MedicationLog, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            log.status = status;
        }
        if let Some(scheduled_time) = self.scheduled_time {
            log.scheduled_time = scheduled_time;
        }
        if let Some(taken_time) = self.taken_time {
            log.taken_time = taken_time;
        }
        if let Some(ref notes) = self.notes {
            log.notes = notes.clone();
        }
        log.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("completed".parse::<LogStatus>().unwrap(), LogStatus::Completed);
        assert_eq!("Taken".parse::<LogStatus>().unwrap(), LogStatus::Completed);
        assert_eq!("SKIPPED".parse::<LogStatus>().unwrap(), LogStatus::Skipped);
        assert!("done".parse::<LogStatus>().is_err());
    }

    #[test]
    fn test_log_serialized_shape() {
        let log = NewLog::new(MedicineId::new(), at("2025-06-08T08:00:00"), LogStatus::Completed)
            .with_taken_time(at("2025-06-08T08:05:00"))
            .into_log(Utc::now());
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["scheduledTime"], "2025-06-08T08:00:00");
        assert_eq!(json["takenTime"], "2025-06-08T08:05:00");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_any_status_transition_is_allowed() {
        let mut log = NewLog::new(MedicineId::new(), at("2025-06-08T08:00:00"), LogStatus::Completed)
            .with_taken_time(at("2025-06-08T08:05:00"))
            .into_log(Utc::now());

        LogUpdate::new()
            .status(LogStatus::Pending)
            .taken_time(Some(at("2030-01-01T00:00:00")))
            .apply(&mut log, Utc::now());

        assert_eq!(log.status, LogStatus::Pending);
        assert_eq!(log.taken_time, Some(at("2030-01-01T00:00:00")));
    }
}
