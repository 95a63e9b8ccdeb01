pub mod dashboard;
pub mod logs;
pub mod medicines;
pub mod misc;
pub mod reminders;
pub mod report;
pub mod schedules;
pub mod session;
pub mod settings;
