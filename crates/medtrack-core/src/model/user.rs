//! User profile, notification preferences and theme.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::error::MedtrackError;

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub timezone: String,
    pub notification_enabled: bool,
    /// Linked messaging account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Name to greet the user with: display name, falling back to email.
    pub fn greeting_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Partial update for the profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<Option<String>>,
    pub timezone: Option<String>,
    pub notification_enabled: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.timezone.is_none() && self.notification_enabled.is_none()
    }

    pub fn apply(&self, profile: &mut UserProfile, now: DateTime<Utc>) {
        if let Some(ref display_name) = self.display_name {
            profile.display_name = display_name.clone();
        }
        if let Some(ref timezone) = self.timezone {
            profile.timezone = timezone.clone();
        }
        if let Some(enabled) = self.notification_enabled {
            profile.notification_enabled = enabled;
        }
        profile.updated_at = now;
    }
}

/// Reminder and report preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Minutes before a dose to remind (0 = at dose time).
    pub reminder_minutes: u32,
    /// Minutes after a dose before it counts as missed (0 = never alert).
    pub missed_medication_minutes: u32,
    pub weekly_report_enabled: bool,
    /// Day the weekly report goes out, Sunday = 0.
    pub weekly_report_day: u8,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            reminder_minutes: 0,
            missed_medication_minutes: 30,
            weekly_report_enabled: true,
            weekly_report_day: 0,
        }
    }
}

/// Partial update for notification settings.
#[derive(Debug, Clone, Default)]
pub struct NotificationUpdate {
    pub enabled: Option<bool>,
    pub reminder_minutes: Option<u32>,
    pub missed_medication_minutes: Option<u32>,
    pub weekly_report_enabled: Option<bool>,
    pub weekly_report_day: Option<u8>,
}

impl NotificationUpdate {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.reminder_minutes.is_none()
            && self.missed_medication_minutes.is_none()
            && self.weekly_report_enabled.is_none()
            && self.weekly_report_day.is_none()
    }

    /// Merge into `settings`. A weekday outside 0-6 is rejected.
    pub fn apply(&self, settings: &mut NotificationSettings) -> Result<(), MedtrackError> {
        if let Some(day) = self.weekly_report_day {
            if day > 6 {
                return Err(MedtrackError::InvalidInput(format!(
                    "weekly report day out of range (0-6, Sunday = 0): {}",
                    day
                )));
            }
        }
        if let Some(enabled) = self.enabled {
            settings.enabled = enabled;
        }
        if let Some(minutes) = self.reminder_minutes {
            settings.reminder_minutes = minutes;
        }
        if let Some(minutes) = self.missed_medication_minutes {
            settings.missed_medication_minutes = minutes;
        }
        if let Some(enabled) = self.weekly_report_enabled {
            settings.weekly_report_enabled = enabled;
        }
        if let Some(day) = self.weekly_report_day {
            settings.weekly_report_day = day;
        }
        Ok(())
    }
}

/// Theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// A theme after `System` has been resolved against the host preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Resolve `System` using the host's dark-mode preference.
    pub fn resolve(&self, host_prefers_dark: bool) -> ResolvedTheme {
        match self {
            Theme::Light => ResolvedTheme::Light,
            Theme::Dark => ResolvedTheme::Dark,
            Theme::System if host_prefers_dark => ResolvedTheme::Dark,
            Theme::System => ResolvedTheme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = MedtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(MedtrackError::InvalidInput(format!(
                "unknown theme: {} (use light, dark or system)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults() {
        let settings = NotificationSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.reminder_minutes, 0);
        assert_eq!(settings.missed_medication_minutes, 30);
        assert!(settings.weekly_report_enabled);
        assert_eq!(settings.weekly_report_day, 0);
    }

    #[test]
    fn test_notification_serialized_shape() {
        let json = serde_json::to_value(NotificationSettings::default()).unwrap();
        assert_eq!(json["missedMedicationMinutes"], 30);
        assert_eq!(json["weeklyReportDay"], 0);
    }

    #[test]
    fn test_notification_update_rejects_bad_day() {
        let mut settings = NotificationSettings::default();
        let update = NotificationUpdate {
            reminder_minutes: Some(15),
            weekly_report_day: Some(9),
            ..Default::default()
        };
        assert!(update.apply(&mut settings).is_err());
        // Rejected updates leave the record untouched.
        assert_eq!(settings.reminder_minutes, 0);
    }

    #[test]
    fn test_theme_resolution() {
        assert_eq!(Theme::System.resolve(true), ResolvedTheme::Dark);
        assert_eq!(Theme::System.resolve(false), ResolvedTheme::Light);
        assert_eq!(Theme::Light.resolve(true), ResolvedTheme::Light);
        assert_eq!(Theme::Dark.resolve(false), ResolvedTheme::Dark);
        assert_eq!(Theme::default(), Theme::System);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
    }
}
