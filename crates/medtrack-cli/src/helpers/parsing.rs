//! Parsing helpers for dates, times, durations and weekday sets.
//!
//! Every failure is an [`CliError::InvalidInput`] so it exits with the
//! invalid-input code.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use medtrack_core::model::{Frequency, LogStatus, TimeOfDay, WeekdaySet};

use crate::errors::CliError;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

fn invalid(message: String) -> anyhow::Error {
    CliError::invalid_input(message).into()
}

/// Parse the pinned clock value (`YYYY-MM-DDTHH:MM`, seconds optional).
pub fn parse_now(value: &str) -> anyhow::Result<NaiveDateTime> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
        .ok_or_else(|| {
            invalid(format!(
                "Invalid clock value (expected YYYY-MM-DDTHH:MM): {}",
                value
            ))
        })
}

/// Parse a dose time: `HH:MM` means that time today, otherwise a full
/// local date-time.
pub fn parse_datetime(value: &str, today: NaiveDate) -> anyhow::Result<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(time) = NaiveTime::parse_from_str(trimmed, "%H:%M") {
        return Ok(today.and_time(time));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
        .ok_or_else(|| {
            invalid(format!(
                "Invalid date/time (expected HH:MM or YYYY-MM-DDTHH:MM): {}",
                value
            ))
        })
}

/// Parse a day: `YYYY-MM-DD`, `today` or `yesterday`.
pub fn parse_date(value: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let trimmed = value.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => {
            return today
                .pred_opt()
                .ok_or_else(|| invalid(format!("No day before {}", today)))
        }
        _ => {}
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| invalid(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}

/// Parse a dose time of day (`HH:MM`).
pub fn parse_time(value: &str) -> anyhow::Result<TimeOfDay> {
    value.parse().map_err(|e: medtrack_core::MedtrackError| invalid(e.to_string()))
}

/// Parse a duration string (e.g., "30m", "2h", "1d").
pub fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    let trimmed = value.trim();
    let (num_str, unit) = match trimmed.char_indices().last() {
        Some((idx, unit)) if idx > 0 => (&trimmed[..idx], unit),
        _ => {
            return Err(invalid(format!(
                "Invalid duration: {} (expected <number><unit>)",
                value
            )))
        }
    };
    let amount: i64 = num_str
        .parse()
        .map_err(|_| invalid(format!("Invalid duration number: {}", value)))?;
    if amount <= 0 {
        return Err(invalid(format!("Duration must be positive: {}", value)));
    }

    let duration = match unit {
        'd' => Duration::try_days(amount),
        'h' => Duration::try_hours(amount),
        'm' => Duration::try_minutes(amount),
        _ => {
            return Err(invalid(format!(
                "Invalid duration unit: {} (use d/h/m)",
                unit
            )))
        }
    };
    duration.ok_or_else(|| invalid(format!("Duration out of range: {}", value)))
}

/// Parse a weekday set from day numbers (`1,3,5`, Sunday = 0) or short
/// names (`mon,wed,fri`). Names and numbers may be mixed.
pub fn parse_days(value: &str) -> anyhow::Result<WeekdaySet> {
    let mut days = WeekdaySet::empty();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let day = match token.parse::<u8>() {
            Ok(n) => weekday_from_number(n),
            Err(_) => token.parse::<Weekday>().ok(),
        }
        .ok_or_else(|| {
            invalid(format!(
                "Invalid weekday: {} (use 0-6 with Sunday = 0, or names like mon)",
                token
            ))
        })?;
        days.insert(day);
    }
    if days.is_empty() {
        return Err(invalid(format!("No weekdays given: {:?}", value)));
    }
    Ok(days)
}

fn weekday_from_number(n: u8) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn parse_frequency(value: &str) -> anyhow::Result<Frequency> {
    value.parse().map_err(|e: medtrack_core::MedtrackError| invalid(e.to_string()))
}

pub fn parse_status(value: &str) -> anyhow::Result<LogStatus> {
    value.parse().map_err(|e: medtrack_core::MedtrackError| invalid(e.to_string()))
}
