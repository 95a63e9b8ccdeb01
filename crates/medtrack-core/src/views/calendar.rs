//! Weekly calendar expansion of schedules.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::model::{LogStatus, MedicationLog, Medicine, Schedule};
use crate::store::EntityStore;

/// One (day, schedule) pair in the week view.
#[derive(Debug, Clone)]
pub struct CalendarCell<'a> {
    pub medicine: &'a Medicine,
    pub schedule: &'a Schedule,
    pub scheduled_time: NaiveDateTime,
    /// Log recorded for exactly this medicine and instant, if any.
    pub log: Option<&'a MedicationLog>,
}

impl CalendarCell<'_> {
    /// Status of the dose; a cell without a log is implicitly pending.
    pub fn status(&self) -> LogStatus {
        self.log.map(|l| l.status).unwrap_or(LogStatus::Pending)
    }
}

#[derive(Debug, Clone)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub cells: Vec<CalendarCell<'a>>,
}

#[derive(Debug, Clone)]
pub struct WeekCalendar<'a> {
    /// The Sunday that opens the week.
    pub start: NaiveDate,
    pub days: Vec<CalendarDay<'a>>,
}

impl<'a> WeekCalendar<'a> {
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell<'a>> {
        self.days.iter().flat_map(|d| d.cells.iter())
    }
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Expand every active schedule across the Sunday-start week containing
/// `anchor`. Cells within a day are ordered by time of day.
pub fn week_calendar(store: &EntityStore, anchor: NaiveDate) -> WeekCalendar<'_> {
    let start = week_start(anchor);
    let days = (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CalendarDay {
                date,
                cells: cells_for_day(store, date),
            }
        })
        .collect();
    WeekCalendar { start, days }
}

fn cells_for_day(store: &EntityStore, date: NaiveDate) -> Vec<CalendarCell<'_>> {
    let weekday = date.weekday();
    let mut cells: Vec<CalendarCell<'_>> = store
        .medicines()
        .iter()
        .flat_map(|medicine| {
            medicine
                .active_schedules()
                .filter(move |schedule| schedule.applies_on(weekday))
                .map(move |schedule| {
                    let scheduled_time = schedule.occurrence_on(date);
                    let log = store
                        .logs()
                        .iter()
                        .find(|l| l.medicine_id == medicine.id && l.scheduled_time == scheduled_time);
                    CalendarCell {
                        medicine,
                        schedule,
                        scheduled_time,
                        log,
                    }
                })
        })
        .collect();
    cells.sort_by_key(|cell| cell.schedule.scheduled_time);
    cells
}
