//! Error types for Medtrack core operations.
//!
//! Store mutations and derived views never fail; errors come from the
//! persistence layer, from parsing user-supplied values, and from the mock
//! session. The CLI layer maps these to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Medtrack operations.
pub type Result<T> = std::result::Result<T, MedtrackError>;

/// Core error type for Medtrack operations.
#[derive(Debug, Error)]
pub enum MedtrackError {
    /// Persisted storage is unavailable (IO failure, unwritable path)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Mock login rejected the supplied credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for MedtrackError {
    fn from(err: std::io::Error) -> Self {
        MedtrackError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for MedtrackError {
    fn from(err: serde_json::Error) -> Self {
        MedtrackError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_storage() {
        let err: MedtrackError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, MedtrackError::Storage(_)));
        assert!(err.to_string().starts_with("Storage error"));
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: MedtrackError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, MedtrackError::Serialization(_)));
    }
}
