//! UI primitives for the Medtrack CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, color styles, dose status styling
//! - **Render**: Tables, headers, receipts, hints, errors
//! - **Format**: String utilities (truncate, short IDs, times, rates)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, Badge};
//! use crate::ui::render::{header, table, hint};
//!
//! let ui = ctx.ui_context();
//!
//! if ui.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ui, "medicines", Some("active")));
//! println!("{}", table(&ui, &columns, &rows));
//! println!("{}", hint(&ui, "medtrack medicines show <id>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, header, hint, kv, print, print_error, receipt, simple_table, table, Column,
};

// Re-export commonly used format functions
pub use format::{format_date, format_datetime, format_rate, short_id, truncate};
