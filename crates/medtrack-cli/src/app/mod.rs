//! Application-level utilities for the Medtrack CLI.
//!
//! This module provides:
//! - Path resolution for config and state files
//! - The per-invocation context (config, clock, loaded state)
//! - Debug log setup

mod clock;
mod context;
mod logging;
mod resolver;

// Re-export public API
pub use clock::parse_timezone;
pub use context::{AppContext, Workspace};
pub use logging::init_logging;
pub use resolver::resolve_config_path;
