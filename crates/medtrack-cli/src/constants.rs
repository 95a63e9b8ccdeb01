//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap for usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unhandled error.
    pub const GENERAL: i32 = 1;

    /// Resource not found (medicine, schedule, log).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Not signed in, or the demo account was rejected.
    pub const AUTH_FAILED: i32 = 5;
}

/// Default number of rows shown by `logs list`.
pub const DEFAULT_LOG_LIMIT: usize = 20;

/// Name of the debug log written when `--log-level` is set.
pub const LOG_FILE_NAME: &str = "medtrack.log";
