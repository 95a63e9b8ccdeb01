//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

use medtrack_core::model::LogStatus;

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "[\u{2713}]",   // [✓]
            Self::Warn => "[\u{26A0}]", // [⚠]
            Self::Err => "[\u{2717}]",  // [✗]
            Self::Info => "[\u{2139}]", // [ℹ]
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::ok(),
            Self::Warn => styles::warn(),
            Self::Err => styles::err(),
            Self::Info => styles::info(),
        }
    }

    /// Badge for a dose status.
    pub fn for_status(status: LogStatus) -> Self {
        match status {
            LogStatus::Completed => Self::Ok,
            LogStatus::Pending => Self::Info,
            LogStatus::Skipped => Self::Warn,
            LogStatus::Missed => Self::Err,
        }
    }

    /// Badge for an adherence percentage.
    pub fn for_rate(rate: f64) -> Self {
        if rate >= 80.0 {
            Self::Ok
        } else if rate >= 50.0 {
            Self::Warn
        } else {
            Self::Err
        }
    }
}

/// Named styles.
pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn ok() -> Style {
        Style::new().green()
    }

    pub fn warn() -> Style {
        Style::new().yellow()
    }

    pub fn err() -> Style {
        Style::new().red()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }
}

/// Apply `style` to `text` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Dose status label ("Taken", "Missed", ...) colored by status.
pub fn status_label(status: LogStatus, color: bool) -> String {
    styled(status.label(), Badge::for_status(status).style(), color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(Badge::Ok.text(), "[OK]");
        assert_eq!(Badge::Warn.text(), "[WARN]");
        assert_eq!(Badge::Err.text(), "[ERR]");
        assert_eq!(Badge::Info.text(), "[INFO]");
    }

    #[test]
    fn test_badge_display() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Ok.display(true), "[\u{2713}]");
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(Badge::for_status(LogStatus::Completed), Badge::Ok);
        assert_eq!(Badge::for_status(LogStatus::Missed), Badge::Err);
        assert_eq!(status_label(LogStatus::Pending, false), "Scheduled");
    }

    #[test]
    fn test_rate_badges() {
        assert_eq!(Badge::for_rate(92.0), Badge::Ok);
        assert_eq!(Badge::for_rate(66.7), Badge::Warn);
        assert_eq!(Badge::for_rate(0.0), Badge::Err);
    }

    #[test]
    fn test_styled_without_color_is_plain() {
        assert_eq!(styled("hi", styles::bold(), false), "hi");
        assert_ne!(styled("hi", styles::bold(), true), "hi");
    }
}
