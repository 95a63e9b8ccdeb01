//! Settings store: user profile, notification preferences and theme.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{
    NotificationSettings, NotificationUpdate, ProfileUpdate, ResolvedTheme, Theme, UserProfile,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsStore {
    profile: Option<UserProfile>,
    notifications: NotificationSettings,
    theme: Theme,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        profile: Option<UserProfile>,
        notifications: NotificationSettings,
        theme: Theme,
    ) -> Self {
        Self {
            profile,
            notifications,
            theme,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Option<UserProfile>) {
        self.profile = profile;
    }

    /// Merge `update` into the profile. Returns `false` when nobody is
    /// signed in.
    pub fn update_profile(&mut self, update: &ProfileUpdate, now: DateTime<Utc>) -> bool {
        match self.profile.as_mut() {
            Some(profile) => {
                update.apply(profile, now);
                true
            }
            None => false,
        }
    }

    pub fn notifications(&self) -> &NotificationSettings {
        &self.notifications
    }

    pub fn set_notifications(&mut self, settings: NotificationSettings) {
        self.notifications = settings;
    }

    /// Merge `update` into the notification settings. Nothing changes if
    /// the update is rejected.
    pub fn update_notifications(&mut self, update: &NotificationUpdate) -> Result<()> {
        update.apply(&mut self.notifications)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn resolved_theme(&self, host_prefers_dark: bool) -> ResolvedTheme {
        self.theme.resolve(host_prefers_dark)
    }

    /// Back to defaults: no profile, default notifications, system theme.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
