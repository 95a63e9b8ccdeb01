//! JSON output formatting.

use serde::Serialize;
use serde_json::{json, Value};

use medtrack_core::model::MedicationLog;
use medtrack_core::views::WeekCalendar;
use medtrack_core::EntityStore;

use crate::ui::{badge, print, Badge, UiContext};

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Outcome of a declined confirmation prompt.
pub fn cancelled_json(action: &str) -> Value {
    json!({ "status": "cancelled", "action": action })
}

/// Report a declined prompt: a status object under `--json`, a warning otherwise.
pub fn print_cancelled(ui: &UiContext, action: &str, message: &str) -> anyhow::Result<()> {
    if ui.mode.is_json() {
        return print_json(&cancelled_json(action));
    }
    print(ui, &badge(ui, Badge::Warn, message));
    Ok(())
}

/// A log with its medicine's name attached.
pub fn log_json(store: &EntityStore, log: &MedicationLog) -> anyhow::Result<Value> {
    let mut value = serde_json::to_value(log)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "medicineName".to_string(),
            Value::from(store.medicine_name(log.medicine_id)),
        );
    }
    Ok(value)
}

pub fn logs_json(store: &EntityStore, logs: &[&MedicationLog]) -> anyhow::Result<Vec<Value>> {
    logs.iter().map(|log| log_json(store, log)).collect()
}

/// The week view, one entry per day with its doses.
pub fn week_json(week: &WeekCalendar<'_>) -> Value {
    let days: Vec<Value> = week
        .days
        .iter()
        .map(|day| {
            let doses: Vec<Value> = day
                .cells
                .iter()
                .map(|cell| {
                    json!({
                        "medicineId": cell.medicine.id,
                        "medicineName": cell.medicine.name,
                        "scheduleId": cell.schedule.id,
                        "scheduledTime": cell.scheduled_time,
                        "status": cell.status(),
                        "logId": cell.log.map(|l| l.id),
                    })
                })
                .collect();
            json!({ "date": day.date, "doses": doses })
        })
        .collect();
    json!({
        "start": week.start,
        "end": week.end(),
        "days": days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use medtrack_core::model::UserId;
    use medtrack_core::session::sample_data;
    use medtrack_core::views::week_calendar;

    fn seeded() -> EntityStore {
        let today = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        sample_data(UserId(1), today, Utc::now()).unwrap()
    }

    #[test]
    fn test_cancelled_json_shape() {
        let value = cancelled_json("logout");
        assert_eq!(value["status"], "cancelled");
        assert_eq!(value["action"], "logout");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_log_json_names_medicine() {
        let store = seeded();
        let value = log_json(&store, &store.logs()[0]).unwrap();
        assert_eq!(value["medicineName"], "Vitamin D");
        assert_eq!(value["status"], "completed");
        assert!(value.get("scheduledTime").is_some());
    }

    #[test]
    fn test_week_json_shape() {
        let store = seeded();
        let anchor = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let value = week_json(&week_calendar(&store, anchor));
        assert_eq!(value["start"], "2025-06-08");
        assert_eq!(value["days"].as_array().unwrap().len(), 7);
        let sunday = &value["days"][0]["doses"];
        assert_eq!(sunday.as_array().unwrap().len(), 3);
        assert_eq!(sunday[0]["status"], "completed");
    }
}
