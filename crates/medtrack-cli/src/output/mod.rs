//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying medicines,
//! schedules, logs and derived views as JSON or text.

mod json;
mod text;

// Re-export public API
pub use json::{log_json, logs_json, print_cancelled, print_json, week_json};
pub use text::{
    log_rows, medicine_rows, print_medicine, print_report, print_week, schedule_rows, LOG_COLUMNS,
    MEDICINE_COLUMNS, SCHEDULE_COLUMNS,
};
