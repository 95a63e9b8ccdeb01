//! Key-value persistence for application state.
//!
//! State is stored as JSON values under the fixed keys in [`keys`]. Two
//! backends are provided: [`MemoryStore`] for tests and embedding, and
//! [`JsonFileStore`], which keeps every key in one JSON object on disk.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{MedtrackError, Result};

/// Storage keys.
pub mod keys {
    pub const USER: &str = "user";
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const NOTIFICATION_SETTINGS: &str = "notificationSettings";
    pub const THEME: &str = "theme";
    pub const MEDICINES: &str = "medicines";
    pub const LOGS: &str = "logs";

    pub const ALL: [&str; 7] = [
        USER,
        IS_AUTHENTICATED,
        AUTH_TOKEN,
        NOTIFICATION_SETTINGS,
        THEME,
        MEDICINES,
        LOGS,
    ];
}

/// A string-keyed store of JSON values.
///
/// `Ok(None)` means nothing is stored under the key; `Err` means the
/// backend itself could not be used.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Remove every key.
    fn clear(&mut self) -> Result<()>;

    /// Make buffered writes durable. Backends that write through do nothing.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Read and decode the value under `key`.
///
/// A value that exists but does not decode as `T` is a
/// [`MedtrackError::Serialization`] naming the key.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| MedtrackError::Serialization(format!("{}: {}", key, e))),
    }
}

/// Encode `value` and store it under `key`.
pub fn save<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let value = serde_json::to_value(value)
        .map_err(|e| MedtrackError::Serialization(format!("{}: {}", key, e)))?;
    store.set(key, value)
}
