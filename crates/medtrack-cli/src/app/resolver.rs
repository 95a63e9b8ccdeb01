//! Path resolution for the config and state files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, MedtrackConfig};

/// Resolve the config file path, checking MEDTRACK_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("MEDTRACK_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the state file: `--store` / `MEDTRACK_STORE`, then the config,
/// then the XDG default.
pub fn resolve_store_path(cli: &Cli, config: Option<&MedtrackConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Some(path) = config.and_then(|c| c.storage.path.as_deref()) {
        return Ok(PathBuf::from(path));
    }
    default_store_path()
}

/// Error message when the state file exists but cannot be parsed.
pub fn unreadable_store_message(path: &Path, cause: &str) -> String {
    format!(
        "Cannot read state file {}\n{}\nHint: Run `medtrack reset --yes` to discard it.",
        path.display(),
        cause
    )
}
