//! File logging for diagnostics.
//!
//! Only installed when a level is given; stdout stays reserved for command
//! output.

use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::constants::LOG_FILE_NAME;
use crate::errors::CliError;

/// Append log records at `level` and above to `medtrack.log` in `dir`.
pub fn init_logging(level: &str, dir: &Path) -> anyhow::Result<()> {
    let filter = parse_level(level)?;
    if filter == LevelFilter::Off {
        return Ok(());
    }

    std::fs::create_dir_all(dir).map_err(|e| {
        anyhow::anyhow!("Failed to create log directory {}: {}", dir.display(), e)
    })?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;

    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = WriteLogger::init(filter, config, file);
    log::info!("medtrack {} logging at {}", medtrack_core::VERSION, filter);
    Ok(())
}

fn parse_level(value: &str) -> anyhow::Result<LevelFilter> {
    value.trim().parse::<LevelFilter>().map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid log level: {} (use off, error, warn, info, debug or trace)",
            value
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::Warn);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_off_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        init_logging("off", dir.path()).unwrap();
        assert!(!dir.path().join(LOG_FILE_NAME).exists());
    }
}
