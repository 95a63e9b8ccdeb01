//! String formatting utilities for UI rendering.

use chrono::{NaiveDate, NaiveDateTime};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Short form of an ID (first 8 characters), accepted back as a prefix.
pub fn short_id(id: &impl ToString) -> String {
    let full = id.to_string();
    full.chars().take(8).collect()
}

/// Format a local date-time for display.
pub fn format_datetime(dt: &NaiveDateTime, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M").to_string()
    }
}

/// Format a date as `Sun 2025-06-08` (pretty) or `2025-06-08`.
pub fn format_date(date: &NaiveDate, pretty: bool) -> String {
    if pretty {
        date.format("%a %Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Format a percentage with one decimal place.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_short_id() {
        let id = uuid::Uuid::parse_str("7a2e3c0b-1234-5678-9abc-def012345678").unwrap();
        assert_eq!(short_id(&id), "7a2e3c0b");
    }

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2025, 6, 8)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        assert_eq!(format_datetime(&dt, true), "2025-06-08 19:30");
        assert_eq!(format_datetime(&dt, false), "2025-06-08T19:30");
        assert_eq!(format_date(&dt.date(), true), "Sun 2025-06-08");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(66.666), "66.7%");
        assert_eq!(format_rate(100.0), "100.0%");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("hello\nworld"), "hello world");
    }
}
