//! Domain data model.
//!
//! Records serialize with camelCase field names so persisted snapshots keep
//! the same shape under every storage backend.

mod ids;
mod log;
mod medicine;
mod schedule;
mod user;

pub use ids::{LogId, MedicineId, ScheduleId, UserId};
pub use log::{LogStatus, LogUpdate, MedicationLog, NewLog};
pub use medicine::{Medicine, MedicineUpdate, NewMedicine};
pub use schedule::{Frequency, NewSchedule, Schedule, ScheduleUpdate, TimeOfDay, WeekdaySet};
pub use user::{NotificationSettings, NotificationUpdate, ProfileUpdate, ResolvedTheme, Theme, UserProfile};

/// Display name used when a log references a medicine that no longer exists.
pub const UNKNOWN_MEDICINE_NAME: &str = "Unknown medicine";
