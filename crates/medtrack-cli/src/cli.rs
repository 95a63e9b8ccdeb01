use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use medtrack_core::VERSION;

/// Medtrack - track medicines, dosing schedules and adherence from the terminal
#[derive(Parser)]
#[command(name = "medtrack")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the state file
    #[arg(short, long, global = true, env = "MEDTRACK_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Write a debug log to the data directory (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "MEDTRACK_LOG", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Pin the clock to a local time (YYYY-MM-DDTHH:MM)
    #[arg(long, global = true, env = "MEDTRACK_NOW", hide = true)]
    pub now: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with a demo account
    Login(LoginArgs),

    /// Sign out and clear all stored data
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Today's doses, adherence and what needs attention
    Dashboard,

    /// Manage medicines
    #[command(alias = "medicine")]
    Medicines(MedicinesArgs),

    /// Manage dosing schedules
    #[command(alias = "schedule")]
    Schedules(SchedulesArgs),

    /// Record and review doses
    #[command(alias = "log")]
    Logs(LogsArgs),

    /// Adherence report for a period
    Report(ReportArgs),

    /// Upcoming reminders and overdue doses
    Reminders(RemindersArgs),

    /// Profile, notification and theme preferences
    Settings(SettingsArgs),

    /// Resolve a path to a named view
    Route(RouteArgs),

    /// Discard all stored data, including an unreadable state file
    Reset,

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (demo@example.com or test@example.com)
    #[arg(long)]
    pub email: Option<String>,
}

/// A medicine, schedule or log reference: full UUID or a unique prefix
#[derive(Args)]
pub struct IdArgs {
    /// ID or unique ID prefix
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args)]
pub struct MedicinesArgs {
    #[command(subcommand)]
    pub command: MedicinesSubcommand,
}

#[derive(Subcommand)]
pub enum MedicinesSubcommand {
    /// Add a medicine, optionally with daily dose times
    Add(MedicineAddArgs),

    /// List medicines
    List(MedicineListArgs),

    /// Show a medicine with its schedules
    Show(MedicineRefArgs),

    /// Change a medicine's details
    Edit(MedicineEditArgs),

    /// Delete a medicine and every log recorded for it
    Delete(MedicineRefArgs),

    /// Mark a medicine active
    Activate(MedicineRefArgs),

    /// Mark a medicine inactive (kept, but left out of views)
    Deactivate(MedicineRefArgs),
}

/// A medicine reference: ID, ID prefix or exact name
#[derive(Args)]
pub struct MedicineRefArgs {
    /// Medicine ID, ID prefix or name
    #[arg(value_name = "MEDICINE")]
    pub medicine: String,
}

/// Arguments for `medicines add`
#[derive(Args)]
pub struct MedicineAddArgs {
    /// Medicine name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Amount per dose (e.g., "1", "0.5")
    #[arg(long)]
    pub dosage: Option<String>,

    /// Dose unit (e.g., "tablet", "ml")
    #[arg(long)]
    pub unit: Option<String>,

    /// Dose time (HH:MM); repeat for several doses a day
    #[arg(short, long = "time", value_name = "HH:MM")]
    pub times: Vec<String>,

    /// Frequency for the dose times (daily, weekly, custom)
    #[arg(long, default_value = "daily")]
    pub frequency: String,

    /// Weekdays for the dose times (e.g., "1,3,5" or "mon,wed,fri"; Sunday = 0)
    #[arg(long)]
    pub days: Option<String>,
}

/// Arguments for `medicines list`
#[derive(Args)]
pub struct MedicineListArgs {
    /// Case-insensitive search over name and description
    #[arg(long)]
    pub search: Option<String>,

    /// Which medicines to show (all, active, inactive)
    #[arg(long, default_value = "all")]
    pub filter: String,
}

/// Arguments for `medicines edit`
#[derive(Args)]
pub struct MedicineEditArgs {
    /// Medicine ID, ID prefix or name
    #[arg(value_name = "MEDICINE")]
    pub medicine: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// New amount per dose
    #[arg(long, conflicts_with = "clear_dosage")]
    pub dosage: Option<String>,

    /// New dose unit
    #[arg(long, conflicts_with = "clear_dosage")]
    pub unit: Option<String>,

    /// Remove dosage and unit
    #[arg(long)]
    pub clear_dosage: bool,
}

#[derive(Args)]
pub struct SchedulesArgs {
    #[command(subcommand)]
    pub command: SchedulesSubcommand,
}

#[derive(Subcommand)]
pub enum SchedulesSubcommand {
    /// Attach a dose time to a medicine
    Add(ScheduleAddArgs),

    /// List schedules
    List(ScheduleListArgs),

    /// Change a schedule
    Edit(ScheduleEditArgs),

    /// Delete a schedule
    Delete(IdArgs),

    /// Seven-day calendar of scheduled doses (Sunday first)
    Week(WeekArgs),
}

/// Arguments for `schedules add`
#[derive(Args)]
pub struct ScheduleAddArgs {
    /// Medicine ID, ID prefix or name
    #[arg(value_name = "MEDICINE")]
    pub medicine: String,

    /// Dose time (HH:MM)
    #[arg(short, long, value_name = "HH:MM")]
    pub time: String,

    /// Frequency (daily, weekly, custom)
    #[arg(long, default_value = "daily")]
    pub frequency: String,

    /// Weekdays (e.g., "1,3,5" or "mon,wed,fri"; Sunday = 0)
    #[arg(long)]
    pub days: Option<String>,
}

/// Arguments for `schedules list`
#[derive(Args)]
pub struct ScheduleListArgs {
    /// Only schedules of this medicine
    #[arg(long, value_name = "MEDICINE")]
    pub medicine: Option<String>,

    /// Which schedules to show (all, active, inactive)
    #[arg(long, default_value = "all")]
    pub filter: String,
}

/// Arguments for `schedules edit`
#[derive(Args)]
pub struct ScheduleEditArgs {
    /// Schedule ID or unique prefix
    #[arg(value_name = "ID")]
    pub id: String,

    /// New dose time (HH:MM)
    #[arg(short, long, value_name = "HH:MM")]
    pub time: Option<String>,

    /// New frequency (daily, weekly, custom)
    #[arg(long)]
    pub frequency: Option<String>,

    /// New weekdays (e.g., "1,3,5" or "mon,wed,fri")
    #[arg(long, conflicts_with = "every_day")]
    pub days: Option<String>,

    /// Clear the weekday set so the schedule applies every day
    #[arg(long)]
    pub every_day: bool,

    /// Pause the schedule
    #[arg(long, conflicts_with = "resume")]
    pub pause: bool,

    /// Resume a paused schedule
    #[arg(long)]
    pub resume: bool,
}

/// Arguments for `schedules week`
#[derive(Args)]
pub struct WeekArgs {
    /// Any date inside the week to show (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsSubcommand,
}

#[derive(Subcommand)]
pub enum LogsSubcommand {
    /// Record a dose for a medicine
    Add(LogAddArgs),

    /// List dose logs, newest first
    List(LogListArgs),

    /// Change a dose log
    Edit(LogEditArgs),

    /// Mark a dose taken now
    Take(IdArgs),

    /// Mark a dose skipped
    Skip(IdArgs),

    /// Delete a dose log
    Delete(IdArgs),
}

/// Arguments for `logs add`
#[derive(Args)]
pub struct LogAddArgs {
    /// Medicine ID, ID prefix or name
    #[arg(value_name = "MEDICINE")]
    pub medicine: String,

    /// Scheduled time (HH:MM today, or YYYY-MM-DDTHH:MM; default now)
    #[arg(long)]
    pub at: Option<String>,

    /// Status (completed, pending, missed, skipped)
    #[arg(long, default_value = "completed")]
    pub status: String,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `logs list`
#[derive(Args)]
pub struct LogListArgs {
    /// Only logs scheduled on this day (YYYY-MM-DD, "today" or "yesterday")
    #[arg(long)]
    pub date: Option<String>,

    /// Only logs with this status; repeat to allow several
    #[arg(long)]
    pub status: Vec<String>,

    /// Only logs of this medicine
    #[arg(long, value_name = "MEDICINE")]
    pub medicine: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `logs edit`
#[derive(Args)]
pub struct LogEditArgs {
    /// Log ID or unique prefix
    #[arg(value_name = "ID")]
    pub id: String,

    /// New status (completed, pending, missed, skipped)
    #[arg(long)]
    pub status: Option<String>,

    /// New scheduled time (HH:MM today, or YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub scheduled: Option<String>,

    /// Time the dose was taken (HH:MM today, or YYYY-MM-DDTHH:MM)
    #[arg(long, conflicts_with = "clear_taken")]
    pub taken: Option<String>,

    /// Remove the taken time
    #[arg(long)]
    pub clear_taken: bool,

    /// New notes
    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    /// Remove the notes
    #[arg(long)]
    pub clear_notes: bool,
}

/// Arguments for the `report` command
#[derive(Args)]
pub struct ReportArgs {
    /// Period (daily, weekly, monthly); ignored with --from/--to
    #[arg(long, default_value = "weekly")]
    pub period: String,

    /// Start of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

/// Arguments for the `reminders` command
#[derive(Args)]
pub struct RemindersArgs {
    /// How far ahead to look (e.g., "30m", "2h", "1d")
    #[arg(long, default_value = "1h")]
    pub window: String,

    /// Create today's missing dose logs and mark overdue ones missed
    #[arg(long)]
    pub sweep: bool,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsSubcommand>,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show all settings
    Show,

    /// Update the signed-in profile
    Profile(ProfileArgs),

    /// Update notification preferences
    Notifications(NotificationsArgs),

    /// Show or set the theme
    Theme(ThemeArgs),
}

/// Arguments for `settings profile`
#[derive(Args)]
pub struct ProfileArgs {
    /// Display name
    #[arg(long, conflicts_with = "clear_display_name")]
    pub display_name: Option<String>,

    /// Remove the display name
    #[arg(long)]
    pub clear_display_name: bool,

    /// IANA timezone (e.g., "Asia/Tokyo")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Whether the account receives notifications (true/false)
    #[arg(long, value_name = "BOOL")]
    pub notifications: Option<bool>,
}

/// Arguments for `settings notifications`
#[derive(Args)]
pub struct NotificationsArgs {
    /// Turn reminders on
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Turn reminders off
    #[arg(long)]
    pub disable: bool,

    /// Minutes before a dose to remind
    #[arg(long, value_name = "MINUTES")]
    pub reminder_minutes: Option<u32>,

    /// Minutes after a dose before it counts as missed (0 turns this off)
    #[arg(long, value_name = "MINUTES")]
    pub missed_minutes: Option<u32>,

    /// Whether to send the weekly report (true/false)
    #[arg(long, value_name = "BOOL")]
    pub weekly_report: Option<bool>,

    /// Weekday for the weekly report (0-6, Sunday = 0)
    #[arg(long, value_name = "DAY")]
    pub weekly_report_day: Option<u8>,
}

/// Arguments for `settings theme`
#[derive(Args)]
pub struct ThemeArgs {
    /// Theme to use (light, dark, system); omit to show the current one
    #[arg(value_name = "THEME")]
    pub theme: Option<String>,
}

/// Arguments for the `route` command
#[derive(Args)]
pub struct RouteArgs {
    /// Path to resolve (e.g., "/medicines")
    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a default config file
    Init(ConfigInitArgs),

    /// Print the config path and the resolved state file
    Path,
}

/// Arguments for `config init`
#[derive(Args)]
pub struct ConfigInitArgs {
    /// State file to record in the config
    #[arg(long, value_name = "PATH")]
    pub store_path: Option<String>,

    /// IANA timezone for the clock (e.g., "Asia/Tokyo")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}
