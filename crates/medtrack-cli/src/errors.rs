//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use medtrack_core::MedtrackError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (medicine, schedule, log)
    NotFound { message: String, hint: String },

    /// Not signed in, or unknown demo account
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for any error surfaced by a command handler.
///
/// Typed CLI errors carry their own code; core errors are mapped by kind;
/// everything else is a general failure.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<MedtrackError>() {
        Some(MedtrackError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(MedtrackError::InvalidInput(_)) => exit_codes::INVALID_INPUT,
        Some(MedtrackError::Auth(_)) => exit_codes::AUTH_FAILED,
        _ => exit_codes::GENERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_kind() {
        assert_eq!(CliError::not_found("x", "hint").exit_code(), 3);
        assert_eq!(CliError::invalid_input("x").exit_code(), 4);
        assert_eq!(CliError::auth_failed_with_hint("x", "hint").exit_code(), 5);
    }

    #[test]
    fn test_exit_code_for_core_errors() {
        let err = anyhow::Error::new(MedtrackError::InvalidInput("bad time".into()));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);

        let err = anyhow::Error::new(MedtrackError::Auth("unknown account".into()));
        assert_eq!(exit_code_for(&err), exit_codes::AUTH_FAILED);

        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code_for(&err), exit_codes::GENERAL);
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::auth_failed_with_hint("Not signed in", "Hint: Run `medtrack login`.");
        assert_eq!(err.to_string(), "Not signed in\nHint: Run `medtrack login`.");
    }
}
