//! Derived views over the entity store.
//!
//! Every function here is pure: it reads the store (and the instant passed
//! in as `now`) and returns borrowed or owned summaries. Nothing is cached
//! except the current day, which lives in [`crate::clock::TodayCache`].

mod calendar;
mod query;
mod reminders;
mod report;
mod stats;

pub use calendar::{week_calendar, week_start, CalendarCell, CalendarDay, WeekCalendar};
pub use query::{
    medicine_totals, LogQuery, LogSummary, MedicineFilter, MedicineQuery, MedicineTotals,
};
pub use reminders::{due_reminders, overdue_logs, Reminder};
pub use report::{
    adherence_report, AdherenceReport, MedicineReport, ReportPeriod, ReportSummary, TimeBand,
};
pub use stats::{
    active_medicines, adherence_rate, pending_medications, today_logs, today_stats, TodayStats,
};
