//! Application context for the Medtrack CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file, and opens the persisted state on demand.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use medtrack_core::model::UserProfile;
use medtrack_core::{
    AppState, Clock, FixedClock, JsonFileStore, MedtrackError, SystemClock,
};

use crate::cli::Cli;
use crate::config::{read_config, MedtrackConfig};
use crate::errors::CliError;
use crate::helpers::parse_now;
use crate::ui::UiContext;

use super::clock::{parse_timezone, ZonedClock};
use super::resolver::{resolve_config_path, resolve_store_path, unreadable_store_message};

/// Application context that bundles CLI args with the config file.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<MedtrackConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&MedtrackConfig>> {
        self.config
            .get_or_try_init(|| {
                let path = resolve_config_path()?;
                if !path.exists() {
                    return Ok(None);
                }
                read_config(&path).map(Some)
            })
            .map(Option::as_ref)
    }

    /// Resolved state file path.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    /// Clock for this run: `--now` pins it, a configured timezone zones it,
    /// otherwise host local time.
    pub fn clock(&self) -> anyhow::Result<Box<dyn Clock>> {
        if let Some(value) = self.cli.now.as_deref() {
            return Ok(Box::new(FixedClock(parse_now(value)?)));
        }
        if let Some(tz) = self.config()?.and_then(|c| c.ui.timezone.as_deref()) {
            return Ok(Box::new(ZonedClock(parse_timezone(tz)?)));
        }
        Ok(Box::new(SystemClock))
    }

    /// UI context for this run. A broken config never blocks output.
    pub fn ui_context(&self) -> UiContext {
        let config_color = self
            .config()
            .ok()
            .flatten()
            .map(|c| c.ui.color)
            .unwrap_or(true);
        UiContext::from_env(self.cli.json, self.cli.no_color || !config_color, self.cli.ascii)
    }

    /// Host dark-mode preference used to resolve the `system` theme.
    pub fn prefers_dark(&self) -> anyhow::Result<bool> {
        Ok(self.config()?.map(|c| c.ui.prefers_dark).unwrap_or(false))
    }

    /// Open the state file without decoding it.
    pub fn open_store(&self) -> anyhow::Result<JsonFileStore> {
        let path = self.store_path()?;
        match JsonFileStore::open(&path) {
            Ok(store) => Ok(store),
            Err(MedtrackError::Serialization(cause)) => {
                Err(anyhow::anyhow!(unreadable_store_message(&path, &cause)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Open the state file and restore application state from it.
    pub fn load(&self) -> anyhow::Result<Workspace> {
        let store = self.open_store()?;
        let mut state = AppState::load(&store, self.clock()?)?;
        state.subscribe(|event| log::debug!("state event: {:?}", event));
        Ok(Workspace { store, state })
    }
}

/// Restored state together with the file it is written back to.
#[derive(Debug)]
pub struct Workspace {
    pub store: JsonFileStore,
    pub state: AppState,
}

impl Workspace {
    /// Write the state back to disk.
    pub fn save(&mut self) -> anyhow::Result<()> {
        self.state.persist(&mut self.store)?;
        Ok(())
    }

    /// The signed-in profile, or an auth error pointing at `medtrack login`.
    pub fn require_user(&self) -> anyhow::Result<&UserProfile> {
        self.state.require_user().map_err(|_| {
            CliError::auth_failed_with_hint(
                "Not signed in",
                "Hint: Run `medtrack login` (demo@example.com or test@example.com).",
            )
            .into()
        })
    }
}
