//! # Application State
//!
//! [`AppState`] owns everything a front end needs: the signed-in session,
//! the entity store, the settings store, and the clock that derived views
//! are computed against.
//!
//! ```text
//! AppState
//! ├── clock: Box<dyn Clock>          // source of "now"
//! ├── today: TodayCache              // current day, refreshed every 60s
//! ├── authenticated / auth_token     // mock session
//! ├── entities: EntityStore          // medicines, schedules, logs
//! ├── settings: SettingsStore        // profile, notifications, theme
//! └── subscribers                    // callbacks fed every StateEvent
//! ```
//!
//! Every mutation goes through a method here and is announced to
//! subscribers as a [`StateEvent`]. Persistence is explicit:
//! [`AppState::load`] reads a [`KeyValueStore`], [`AppState::persist`]
//! writes it back.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;

use crate::clock::{Clock, SystemClock, TodayCache};
use crate::error::{MedtrackError, Result};
use crate::model::{
    LogId, LogStatus, LogUpdate, MedicationLog, Medicine, MedicineId, MedicineUpdate, NewLog,
    NewMedicine, NewSchedule, NotificationSettings, NotificationUpdate, ProfileUpdate,
    ScheduleId, ScheduleUpdate, Theme, UserId, UserProfile,
};
use crate::session;
use crate::settings::SettingsStore;
use crate::storage::{self, keys, KeyValueStore};
use crate::store::{DeletedMedicine, EntityStore};
use crate::views::{
    self, AdherenceReport, LogSummary, Reminder, ReportPeriod, TodayStats, WeekCalendar,
};

/// Something that changed in the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    LoggedIn { user_id: UserId },
    LoggedOut,
    MedicineAdded(MedicineId),
    MedicineUpdated(MedicineId),
    MedicineDeleted { id: MedicineId, removed_logs: usize },
    ScheduleAdded { medicine_id: MedicineId, schedule_id: ScheduleId },
    ScheduleUpdated(ScheduleId),
    ScheduleDeleted(ScheduleId),
    LogAdded(LogId),
    LogUpdated(LogId),
    LogDeleted(LogId),
    ProfileUpdated,
    NotificationsUpdated,
    ThemeChanged(Theme),
    DosesSwept { created: usize, missed: usize },
    Reset,
}

/// Handle returned by [`AppState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StateEvent)>;

/// Result of [`AppState::sweep_doses`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Pending logs created for doses that came due today
    pub created: usize,
    /// Pending logs marked missed after the missed-dose offset
    pub missed: usize,
}

pub struct AppState {
    clock: Box<dyn Clock>,
    today: TodayCache,
    authenticated: bool,
    auth_token: Option<String>,
    entities: EntityStore,
    settings: SettingsStore,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("authenticated", &self.authenticated)
            .field("entities", &self.entities)
            .field("settings", &self.settings)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl AppState {
    /// Signed-out state with default settings.
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            today: TodayCache::new(),
            authenticated: false,
            auth_token: None,
            entities: EntityStore::new(),
            settings: SettingsStore::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Restore state from `store`.
    ///
    /// A value that fails to decode is logged and replaced by its default;
    /// only an unusable store is an error.
    pub fn load(store: &dyn KeyValueStore, clock: Box<dyn Clock>) -> Result<Self> {
        let profile: Option<UserProfile> = load_or_default(store, keys::USER)?;
        let flag: Option<bool> = load_or_default(store, keys::IS_AUTHENTICATED)?;
        let auth_token: Option<String> = load_or_default(store, keys::AUTH_TOKEN)?;
        let notifications: Option<NotificationSettings> =
            load_or_default(store, keys::NOTIFICATION_SETTINGS)?;
        let theme: Option<Theme> = load_or_default(store, keys::THEME)?;
        let medicines: Option<Vec<Medicine>> = load_or_default(store, keys::MEDICINES)?;
        let logs: Option<Vec<MedicationLog>> = load_or_default(store, keys::LOGS)?;

        let flag = flag.unwrap_or(false);
        if flag && profile.is_none() {
            log::warn!("stored session is marked signed in but has no user; treating as signed out");
        }

        let mut state = Self::new(clock);
        state.authenticated = flag && profile.is_some();
        state.auth_token = auth_token;
        state.entities = EntityStore::from_parts(medicines.unwrap_or_default(), logs.unwrap_or_default());
        state.settings = SettingsStore::from_parts(
            profile,
            notifications.unwrap_or_default(),
            theme.unwrap_or_default(),
        );
        log::debug!(
            "loaded state: signed_in={} medicines={} logs={}",
            state.authenticated,
            state.entities.medicines().len(),
            state.entities.logs().len()
        );
        Ok(state)
    }

    /// Write the state to `store` and flush it.
    ///
    /// Values at their default (no user, signed out, no entities, default
    /// settings) are removed rather than written, so a signed-out default
    /// state leaves the store empty.
    pub fn persist(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        put_or_remove(store, keys::USER, self.settings.profile())?;
        put_or_remove(store, keys::IS_AUTHENTICATED, self.authenticated.then_some(&true))?;
        put_or_remove(store, keys::AUTH_TOKEN, self.auth_token.as_ref())?;
        let notifications = self.settings.notifications();
        put_or_remove(
            store,
            keys::NOTIFICATION_SETTINGS,
            (*notifications != NotificationSettings::default()).then_some(notifications),
        )?;
        let theme = self.settings.theme();
        put_or_remove(store, keys::THEME, (theme != Theme::default()).then_some(&theme))?;
        let medicines = self.entities.medicines();
        put_or_remove(store, keys::MEDICINES, (!medicines.is_empty()).then_some(medicines))?;
        let logs = self.entities.logs();
        put_or_remove(store, keys::LOGS, (!logs.is_empty()).then_some(logs))?;
        store.flush()?;
        log::debug!("persisted state");
        Ok(())
    }

    // --- Subscriptions ---

    /// Register a callback invoked after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StateEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: StateEvent) {
        log::debug!("state event: {:?}", event);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
    }

    // --- Clock ---

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Current calendar date, cached for up to a minute.
    pub fn today(&mut self) -> NaiveDate {
        let now = self.clock.now();
        self.today.today(now)
    }

    // --- Session ---

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.settings.profile()
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// The signed-in user, or an `Auth` error.
    pub fn require_user(&self) -> Result<&UserProfile> {
        match self.settings.profile() {
            Some(profile) if self.authenticated => Ok(profile),
            _ => Err(MedtrackError::Auth("not signed in (run `medtrack login`)".to_string())),
        }
    }

    /// Sign in with a mock account and replace the entity store with the
    /// sample regimen for today.
    pub fn login(&mut self, email: &str) -> Result<&UserProfile> {
        let account = session::authenticate(email)?;
        let now = Utc::now();
        let today = self.today();
        let sample = session::sample_data(account.user_id(), today, now)?;

        self.settings.set_profile(Some(account.profile(now)));
        self.authenticated = true;
        self.auth_token = Some(account.token.to_string());
        self.entities = sample;
        log::info!("signed in as {}", account.email);
        self.emit(StateEvent::LoggedIn {
            user_id: account.user_id(),
        });
        self.require_user()
    }

    /// Sign out: drop the user, token, entities and settings.
    pub fn logout(&mut self) {
        let was_signed_in = self.authenticated;
        self.clear();
        if was_signed_in {
            log::info!("signed out");
        }
        self.emit(StateEvent::LoggedOut);
    }

    /// Return to the pristine signed-out state.
    pub fn reset(&mut self) {
        self.clear();
        log::info!("state reset");
        self.emit(StateEvent::Reset);
    }

    fn clear(&mut self) {
        self.authenticated = false;
        self.auth_token = None;
        self.entities.clear();
        self.settings.clear();
        self.today.invalidate();
    }

    // --- Entities ---

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Create a medicine owned by the signed-in user.
    pub fn add_medicine(&mut self, new: NewMedicine) -> Result<MedicineId> {
        let user_id = self.require_user()?.id;
        let medicine = new.into_medicine(user_id, Utc::now());
        let id = medicine.id;
        self.entities.add_medicine(medicine);
        self.emit(StateEvent::MedicineAdded(id));
        Ok(id)
    }

    pub fn update_medicine(&mut self, id: MedicineId, update: &MedicineUpdate) -> bool {
        let updated = self.entities.update_medicine(id, update);
        if updated {
            self.emit(StateEvent::MedicineUpdated(id));
        }
        updated
    }

    pub fn delete_medicine(&mut self, id: MedicineId) -> Option<DeletedMedicine> {
        let deleted = self.entities.delete_medicine(id)?;
        self.emit(StateEvent::MedicineDeleted {
            id,
            removed_logs: deleted.removed_logs,
        });
        Some(deleted)
    }

    pub fn add_schedule(&mut self, medicine_id: MedicineId, new: NewSchedule) -> Option<ScheduleId> {
        let schedule_id = self.entities.add_schedule(medicine_id, new)?;
        self.emit(StateEvent::ScheduleAdded {
            medicine_id,
            schedule_id,
        });
        Some(schedule_id)
    }

    pub fn update_schedule(&mut self, id: ScheduleId, update: &ScheduleUpdate) -> bool {
        let updated = self.entities.update_schedule(id, update);
        if updated {
            self.emit(StateEvent::ScheduleUpdated(id));
        }
        updated
    }

    pub fn delete_schedule(&mut self, id: ScheduleId) -> bool {
        let deleted = self.entities.delete_schedule(id).is_some();
        if deleted {
            self.emit(StateEvent::ScheduleDeleted(id));
        }
        deleted
    }

    pub fn add_log(&mut self, new: NewLog) -> LogId {
        let log = new.into_log(Utc::now());
        let id = log.id;
        self.entities.add_log(log);
        self.emit(StateEvent::LogAdded(id));
        id
    }

    /// Record a dose at `at`. A completed dose is taken at that instant.
    pub fn quick_log(
        &mut self,
        medicine_id: MedicineId,
        at: NaiveDateTime,
        status: LogStatus,
        notes: Option<String>,
    ) -> LogId {
        let mut new = NewLog::new(medicine_id, at, status);
        if status == LogStatus::Completed {
            new = new.with_taken_time(at);
        }
        if let Some(notes) = notes.filter(|n| !n.trim().is_empty()) {
            new = new.with_notes(notes);
        }
        self.add_log(new)
    }

    pub fn update_log(&mut self, id: LogId, update: &LogUpdate) -> bool {
        let updated = self.entities.update_log(id, update);
        if updated {
            self.emit(StateEvent::LogUpdated(id));
        }
        updated
    }

    pub fn delete_log(&mut self, id: LogId) -> Option<MedicationLog> {
        let deleted = self.entities.delete_log(id)?;
        self.emit(StateEvent::LogDeleted(id));
        Some(deleted)
    }

    /// Bring today's logs up to date with the schedules: create a pending
    /// log for every dose that has come due without one, then mark pending
    /// logs older than the missed-dose offset as missed.
    pub fn sweep_doses(&mut self) -> SweepOutcome {
        let now = self.now();
        let today = self.today();
        let weekday = today.weekday();

        let due: Vec<(MedicineId, NaiveDateTime)> = self
            .entities
            .medicines()
            .iter()
            .filter(|m| m.active)
            .flat_map(|m| {
                m.active_schedules()
                    .filter(move |s| s.applies_on(weekday))
                    .map(move |s| (m.id, s.occurrence_on(today)))
            })
            .filter(|(_, at)| *at <= now)
            .filter(|(id, at)| {
                !self
                    .entities
                    .logs()
                    .iter()
                    .any(|l| l.medicine_id == *id && l.scheduled_time == *at)
            })
            .collect();

        let mut outcome = SweepOutcome::default();
        let created_at = Utc::now();
        for (medicine_id, at) in due {
            self.entities
                .add_log(NewLog::new(medicine_id, at, LogStatus::Pending).into_log(created_at));
            outcome.created += 1;
        }

        let overdue: Vec<LogId> =
            views::overdue_logs(&self.entities, self.settings.notifications(), today, now)
                .iter()
                .map(|l| l.id)
                .collect();
        let missed = LogUpdate::new().status(LogStatus::Missed);
        for id in overdue {
            if self.entities.update_log(id, &missed) {
                outcome.missed += 1;
            }
        }

        if outcome != SweepOutcome::default() {
            log::info!(
                "dose sweep: {} created, {} marked missed",
                outcome.created,
                outcome.missed
            );
            self.emit(StateEvent::DosesSwept {
                created: outcome.created,
                missed: outcome.missed,
            });
        }
        outcome
    }

    // --- Settings ---

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Merge `update` into the signed-in user's profile.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<()> {
        self.require_user()?;
        self.settings.update_profile(update, Utc::now());
        self.emit(StateEvent::ProfileUpdated);
        Ok(())
    }

    pub fn update_notifications(&mut self, update: &NotificationUpdate) -> Result<()> {
        self.settings.update_notifications(update)?;
        self.emit(StateEvent::NotificationsUpdated);
        Ok(())
    }

    pub fn set_notifications(&mut self, settings: NotificationSettings) {
        self.settings.set_notifications(settings);
        self.emit(StateEvent::NotificationsUpdated);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.set_theme(theme);
        self.emit(StateEvent::ThemeChanged(theme));
    }

    // --- Views ---

    pub fn today_stats(&mut self) -> TodayStats {
        let today = self.today();
        views::today_stats(&self.entities, today)
    }

    pub fn pending_medications(&mut self) -> Vec<&MedicationLog> {
        let today = self.today();
        let now = self.now();
        views::pending_medications(&self.entities, today, now)
    }

    pub fn active_medicines(&self) -> impl Iterator<Item = &Medicine> {
        views::active_medicines(&self.entities)
    }

    pub fn week_calendar(&self, anchor: NaiveDate) -> WeekCalendar<'_> {
        views::week_calendar(&self.entities, anchor)
    }

    pub fn today_summary(&mut self) -> LogSummary {
        let today = self.today();
        LogSummary::from_logs(views::today_logs(&self.entities, today))
    }

    pub fn report(&self, period: ReportPeriod) -> AdherenceReport {
        views::adherence_report(&self.entities, period, self.now())
    }

    pub fn due_reminders(&self, window: Duration) -> Vec<Reminder<'_>> {
        views::due_reminders(
            &self.entities,
            self.settings.notifications(),
            self.now(),
            window,
        )
    }

    pub fn overdue_logs(&mut self) -> Vec<&MedicationLog> {
        let today = self.today();
        let now = self.now();
        views::overdue_logs(&self.entities, self.settings.notifications(), today, now)
    }
}

fn load_or_default<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match storage::load(store, key) {
        Ok(value) => Ok(value),
        Err(MedtrackError::Serialization(message)) => {
            log::warn!("ignoring unreadable stored value ({})", message);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn put_or_remove<T: serde::Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: Option<&T>,
) -> Result<()> {
    match value {
        Some(value) => storage::save(store, key, value),
        None => store.remove(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn state_at(value: &str) -> AppState {
        AppState::new(Box::new(FixedClock(at(value))))
    }

    #[test]
    fn test_login_seeds_sample_data() {
        let mut state = state_at("2025-06-08T09:00");
        let user = state.login("demo@example.com").unwrap();
        assert_eq!(user.email, "demo@example.com");
        assert!(state.is_authenticated());
        assert_eq!(state.auth_token(), Some("mock_jwt_token_for_demo"));

        let stats = state.today_stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.missed, 0);
        assert_eq!(stats.adherence_rate, 67);

        // The 19:30 dose is still in the future.
        assert!(state.pending_medications().is_empty());
    }

    #[test]
    fn test_login_rejects_unknown_account() {
        let mut state = state_at("2025-06-08T09:00");
        assert!(matches!(state.login("nobody@example.com"), Err(MedtrackError::Auth(_))));
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut state = state_at("2025-06-08T09:00");
        state.login("demo@example.com").unwrap();
        state.set_theme(Theme::Dark);
        state.logout();

        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert!(state.auth_token().is_none());
        assert!(state.entities().is_empty());
        assert_eq!(state.settings().theme(), Theme::System);

        let mut store = MemoryStore::new();
        state.persist(&mut store).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_medicine_requires_session() {
        let mut state = state_at("2025-06-08T09:00");
        assert!(state.add_medicine(NewMedicine::new("A")).is_err());

        state.login("test@example.com").unwrap();
        let id = state.add_medicine(NewMedicine::new("A")).unwrap();
        assert_eq!(state.entities().medicine(id).unwrap().user_id, UserId(2));
    }

    #[test]
    fn test_subscribers_see_events_until_unsubscribed() {
        let mut state = state_at("2025-06-08T09:00");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = state.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        state.login("demo@example.com").unwrap();
        state.set_theme(Theme::Light);
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set_theme(Theme::Dark);

        assert_eq!(
            *seen.borrow(),
            [
                StateEvent::LoggedIn { user_id: UserId(1) },
                StateEvent::ThemeChanged(Theme::Light),
            ]
        );
    }

    #[test]
    fn test_noop_mutations_emit_nothing() {
        let mut state = state_at("2025-06-08T09:00");
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        state.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(!state.update_medicine(MedicineId::new(), &MedicineUpdate::new().name("X")));
        assert!(state.delete_log(LogId::new()).is_none());
        assert!(!state.delete_schedule(ScheduleId::new()));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_persist_and_load_round_trip() {
        let mut state = state_at("2025-06-08T09:00");
        state.login("demo@example.com").unwrap();
        state.set_theme(Theme::Dark);

        let mut store = MemoryStore::new();
        state.persist(&mut store).unwrap();
        assert_eq!(store.get(keys::IS_AUTHENTICATED).unwrap(), Some(Value::Bool(true)));

        let mut loaded = AppState::load(&store, Box::new(FixedClock(at("2025-06-08T09:00")))).unwrap();
        assert!(loaded.is_authenticated());
        assert_eq!(loaded.entities(), state.entities());
        assert_eq!(loaded.settings().theme(), Theme::Dark);
        assert_eq!(loaded.today_stats().adherence_rate, 67);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(keys::THEME, Value::from("sepia")).unwrap();
        store.set(keys::LOGS, Value::from("not a list")).unwrap();

        let state = AppState::load(&store, Box::new(FixedClock(at("2025-06-08T09:00")))).unwrap();
        assert_eq!(state.settings().theme(), Theme::System);
        assert!(state.entities().logs().is_empty());
    }

    #[test]
    fn test_flag_without_user_is_signed_out() {
        let mut store = MemoryStore::new();
        store.set(keys::IS_AUTHENTICATED, Value::Bool(true)).unwrap();
        let state = AppState::load(&store, Box::new(FixedClock(at("2025-06-08T09:00")))).unwrap();
        assert!(!state.is_authenticated());
        assert!(state.require_user().is_err());
    }

    struct Unavailable;

    impl KeyValueStore for Unavailable {
        fn get(&self, _key: &str) -> Result<Option<Value>> {
            Err(MedtrackError::Storage("disk gone".into()))
        }
        fn set(&mut self, _key: &str, _value: Value) -> Result<()> {
            Err(MedtrackError::Storage("disk gone".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(MedtrackError::Storage("disk gone".into()))
        }
        fn clear(&mut self) -> Result<()> {
            Err(MedtrackError::Storage("disk gone".into()))
        }
    }

    #[test]
    fn test_unavailable_store_is_an_error() {
        let clock = Box::new(FixedClock(at("2025-06-08T09:00")));
        assert!(matches!(
            AppState::load(&Unavailable, clock),
            Err(MedtrackError::Storage(_))
        ));
        let state = state_at("2025-06-08T09:00");
        assert!(state.persist(&mut Unavailable).is_err());
    }

    #[test]
    fn test_sweep_creates_due_logs_and_marks_missed() {
        let mut state = state_at("2025-06-09T08:00");
        state.login("demo@example.com").unwrap();
        let medicine_id = state
            .add_medicine(NewMedicine::new("Iron").with_schedule(NewSchedule::daily(
                "06:00".parse().unwrap(),
            )))
            .unwrap();

        let outcome = state.sweep_doses();
        // 06:00 iron is due and not logged; seeded 07:30 and 08:00 logs exist.
        assert_eq!(outcome.created, 1);
        // The new 06:00 pending log is two hours old.
        assert_eq!(outcome.missed, 1);
        let iron_log = state.entities().logs_for_medicine(medicine_id).next().unwrap();
        assert_eq!(iron_log.status, LogStatus::Missed);

        assert_eq!(state.sweep_doses(), SweepOutcome::default());
    }

    #[test]
    fn test_quick_log_sets_taken_time_for_completed() {
        let mut state = state_at("2025-06-08T09:00");
        state.login("demo@example.com").unwrap();
        let medicine_id = state.entities().medicines()[0].id;

        let taken = state.quick_log(medicine_id, at("2025-06-08T12:00"), LogStatus::Completed, None);
        let skipped = state.quick_log(
            medicine_id,
            at("2025-06-08T13:00"),
            LogStatus::Skipped,
            Some("  ".into()),
        );
        let entities = state.entities();
        assert_eq!(entities.log(taken).unwrap().taken_time, Some(at("2025-06-08T12:00")));
        assert_eq!(entities.log(skipped).unwrap().taken_time, None);
        assert_eq!(entities.log(skipped).unwrap().notes, None);
    }
}
