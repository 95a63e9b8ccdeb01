use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MedtrackConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    /// State file; defaults to `$XDG_DATA_HOME/medtrack/state.json`.
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UiSection {
    /// IANA timezone used for the clock instead of the host's local time.
    pub timezone: Option<String>,
    #[serde(default = "default_color")]
    pub color: bool,
    /// Host dark-mode preference, used to resolve the `system` theme.
    #[serde(default)]
    pub prefers_dark: bool,
}

fn default_color() -> bool {
    true
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            timezone: None,
            color: default_color(),
            prefers_dark: false,
        }
    }
}

impl MedtrackConfig {
    pub fn new(store_path: Option<PathBuf>, timezone: Option<String>) -> Self {
        Self {
            storage: StorageSection {
                path: store_path.map(|path| path.to_string_lossy().to_string()),
            },
            ui: UiSection {
                timezone,
                ..UiSection::default()
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("state.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<MedtrackConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &MedtrackConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("medtrack"));
        }
    }
    Ok(home_dir()?.join(".config").join("medtrack"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("medtrack"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("medtrack"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = MedtrackConfig::new(
            Some(PathBuf::from("/tmp/state.json")),
            Some("Asia/Tokyo".to_string()),
        );

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.ui.color);
    }

    #[test]
    fn test_sections_are_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nprefers_dark = true\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.storage.path, None);
        assert!(config.ui.prefers_dark);
        assert!(config.ui.color);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\npath = 1").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
