//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Date, time, duration and weekday parsing (`parsing`)
//! - Resolving IDs, ID prefixes and names to entities (`ids`)
//! - Confirmation prompts for destructive commands (`confirm`)

mod confirm;
mod ids;
mod parsing;

// Re-export public API
pub use confirm::confirm;
pub use ids::{resolve_log, resolve_medicine, resolve_schedule};
pub use parsing::{
    parse_date, parse_datetime, parse_days, parse_duration, parse_frequency, parse_now,
    parse_status, parse_time,
};
