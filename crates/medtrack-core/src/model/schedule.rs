//! Dosing schedules: time of day, frequency and applicable weekdays.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::ids::{MedicineId, ScheduleId};
use crate::error::MedtrackError;

/// A wall-clock time of day with minute precision, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, MedtrackError> {
        if hour > 23 || minute > 59 {
            return Err(MedtrackError::InvalidInput(format!(
                "time out of range: {:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// The instant this time falls on for a given date.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = MedtrackError;

    /// Accepts `H:MM` or `HH:MM`, 00:00 through 23:59.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MedtrackError::InvalidInput(format!("invalid time (expected HH:MM): {}", s));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = MedtrackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Set of weekdays, stored as a comma-joined list of day numbers with
/// Sunday = 0 (e.g. `"1,3,5"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekdaySet(u8);

const ALL_DAYS_MASK: u8 = 0b0111_1111;
const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl WeekdaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Self(ALL_DAYS_MASK)
    }

    pub fn from_weekdays<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        let mut set = Self::empty();
        for day in days {
            set.insert(day);
        }
        set
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_DAYS_MASK
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Day numbers in ascending order, Sunday = 0.
    pub fn day_numbers(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..7).filter(move |n| self.0 & (1 << n) != 0)
    }

    /// Human-readable summary, e.g. `Every day` or `Mon, Wed, Fri`.
    pub fn label(&self) -> String {
        if self.is_all() || self.is_empty() {
            return "Every day".to_string();
        }
        self.day_numbers()
            .map(|n| SHORT_DAY_NAMES[n as usize])
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .day_numbers()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

impl FromStr for WeekdaySet {
    type Err = MedtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = 0u8;
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let day: u8 = token.parse().map_err(|_| {
                MedtrackError::InvalidInput(format!("invalid weekday number: {}", token))
            })?;
            if day > 6 {
                return Err(MedtrackError::InvalidInput(format!(
                    "weekday out of range (0-6, Sunday = 0): {}",
                    day
                )));
            }
            mask |= 1 << day;
        }
        Ok(Self(mask))
    }
}

impl TryFrom<String> for WeekdaySet {
    type Error = MedtrackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekdaySet> for String {
    fn from(value: WeekdaySet) -> Self {
        value.to_string()
    }
}

/// How often a schedule recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Custom,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Custom => "custom",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = MedtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "custom" => Ok(Frequency::Custom),
            other => Err(MedtrackError::InvalidInput(format!(
                "unknown frequency: {} (use daily, weekly or custom)",
                other
            ))),
        }
    }
}

/// A recurring dosing rule attached to a medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub medicine_id: MedicineId,
    pub scheduled_time: TimeOfDay,
    pub frequency: Frequency,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<WeekdaySet>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// The weekdays this schedule fires on.
    ///
    /// Daily schedules fire every day regardless of the stored set; an
    /// absent or empty set also means every day.
    pub fn effective_days(&self) -> WeekdaySet {
        if self.frequency == Frequency::Daily {
            return WeekdaySet::all();
        }
        match self.days_of_week {
            Some(days) if !days.is_empty() => days,
            _ => WeekdaySet::all(),
        }
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.effective_days().contains(day)
    }

    /// The dose instant on `date`.
    pub fn occurrence_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.scheduled_time.on(date)
    }
}

/// Fields for a schedule that has not been attached to a medicine yet.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub scheduled_time: TimeOfDay,
    pub frequency: Frequency,
    pub days_of_week: Option<WeekdaySet>,
}

impl NewSchedule {
    pub fn new(scheduled_time: TimeOfDay, frequency: Frequency) -> Self {
        Self {
            scheduled_time,
            frequency,
            days_of_week: None,
        }
    }

    pub fn daily(scheduled_time: TimeOfDay) -> Self {
        Self::new(scheduled_time, Frequency::Daily)
    }

    pub fn with_days(mut self, days: WeekdaySet) -> Self {
        self.days_of_week = Some(days);
        self
    }

    /// Materialize the schedule for `medicine_id`.
    pub fn into_schedule(self, medicine_id: MedicineId, now: DateTime<Utc>) -> Schedule {
        Schedule {
            id: ScheduleId::new(),
            medicine_id,
            scheduled_time: self.scheduled_time,
            frequency: self.frequency,
            active: true,
            days_of_week: self.days_of_week,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a schedule. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub scheduled_time: Option<TimeOfDay>,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<Option<WeekdaySet>>,
    pub active: Option<bool>,
}

impl ScheduleUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(mut self, time: TimeOfDay) -> Self {
        self.scheduled_time = Some(time);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn days(mut self, days: Option<WeekdaySet>) -> Self {
        self.days_of_week = Some(days);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled_time.is_none()
            && self.frequency.is_none()
            && self.days_of_week.is_none()
            && self.active.is_none()
    }

    pub fn apply(&self, schedule: &mut Schedule, now: DateTime<Utc>) {
        if let Some(time) = self.scheduled_time {
            schedule.scheduled_time = time;
        }
        if let Some(frequency) = self.frequency {
            schedule.frequency = frequency;
        }
        if let Some(days) = self.days_of_week {
            schedule.days_of_week = days;
        }
        if let Some(active) = self.active {
            schedule.active = active;
        }
        schedule.updated_at = now;
    }
}
