use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::KeyValueStore;
use crate::error::{MedtrackError, Result};

/// All keys in a single JSON object on disk.
///
/// Writes are buffered in memory until [`KeyValueStore::flush`], which
/// replaces the file atomically. A missing file reads as an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
    dirty: bool,
}

impl JsonFileStore {
    /// Open the store at `path`, reading the file if it exists.
    ///
    /// # Errors
    ///
    /// `Storage` if the file cannot be read, `Serialization` if it is not a
    /// JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Map::new(),
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(MedtrackError::Serialization(format!(
                        "{} does not contain a JSON object",
                        path.display()
                    )))
                }
                Err(e) => {
                    return Err(MedtrackError::Serialization(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )))
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(MedtrackError::Storage(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        log::debug!("opened state file {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the state file outright. Used to recover from a file that no
    /// longer parses.
    pub fn destroy(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MedtrackError::Storage(format!(
                "Cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.dirty = true;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if !self.values.is_empty() {
            self.values.clear();
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let bytes = serde_json::to_vec_pretty(&self.values)?;
        crate::fs::write_atomic(&self.path, &bytes)?;
        self.dirty = false;
        log::debug!("wrote state file {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_flush_persists_and_reopens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("theme", Value::from("dark")).unwrap();
        assert!(!path.exists());
        store.flush().unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap(), Some(Value::from("dark")));
    }

    #[test]
    fn test_rejects_non_object_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(MedtrackError::Serialization(_))
        ));

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(MedtrackError::Serialization(_))
        ));

        JsonFileStore::destroy(&path).unwrap();
        assert!(!path.exists());
        JsonFileStore::destroy(&path).unwrap();
    }

    #[test]
    fn test_directory_path_is_storage_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            JsonFileStore::open(dir.path()),
            Err(MedtrackError::Storage(_))
        ));
    }
}
