//! # Medtrack Core
//!
//! Core library for Medtrack - a local-first medication tracker.
//!
//! This crate provides the domain model, the in-memory entity store, the
//! derived views computed from it, and the key-value persistence used to
//! carry state between sessions. It is independent of any front end.
//!
//! ## Architecture
//!
//! - **model**: Medicines, schedules, dose logs, user profile and settings
//! - **store**: Entity store with add/update/delete by identifier
//! - **views**: Derived state (today's stats, pending doses, weekly calendar, reports)
//! - **settings**: Profile, notification preferences and theme
//! - **state**: Application-state controller with change subscriptions
//! - **storage**: Key-value persistence (in-memory and JSON file)
//! - **session**: Mock login, sample data seeding, logout
//! - **route**: Named views addressed by path

pub mod clock;
pub mod error;
pub mod fs;
pub mod model;
pub mod route;
pub mod session;
pub mod settings;
pub mod state;
pub mod storage;
pub mod store;
pub mod views;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{MedtrackError, Result};
pub use route::View;
pub use settings::SettingsStore;
pub use state::{AppState, StateEvent, SubscriptionId, SweepOutcome};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::EntityStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
