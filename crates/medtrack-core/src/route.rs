//! Named views addressed by path.

use std::fmt;

/// A top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Medicines,
    Schedules,
    Logs,
    Settings,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Medicines,
        View::Schedules,
        View::Logs,
        View::Settings,
    ];

    /// Resolve a path. Unknown paths land on the dashboard; a trailing
    /// slash, query string or fragment is ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/medicines" | "medicines" => View::Medicines,
            "/schedules" | "schedules" => View::Schedules,
            "/logs" | "logs" => View::Logs,
            "/settings" | "settings" => View::Settings,
            _ => View::Dashboard,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            View::Dashboard => "/",
            View::Medicines => "/medicines",
            View::Schedules => "/schedules",
            View::Logs => "/logs",
            View::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Medicines => "Medicines",
            View::Schedules => "Schedules",
            View::Logs => "Logs",
            View::Settings => "Settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_path(view.path()), view);
        }
    }

    #[test]
    fn test_unknown_paths_fall_back_to_dashboard() {
        assert_eq!(View::from_path("/nope"), View::Dashboard);
        assert_eq!(View::from_path(""), View::Dashboard);
        assert_eq!(View::from_path("/medicines/42"), View::Dashboard);
    }

    #[test]
    fn test_path_decorations_are_ignored() {
        assert_eq!(View::from_path("/logs/"), View::Logs);
        assert_eq!(View::from_path("/settings?tab=theme"), View::Settings);
        assert_eq!(View::from_path("/schedules#week"), View::Schedules);
    }
}
