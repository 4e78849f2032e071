//! Application state machine and persisted configuration.
//!
//! [`App`] orchestrates the three external collaborators — corpus source,
//! classifier gateway, logging sink — behind narrow trait seams, so hosts
//! render from its observable state and tests inject fakes.

mod config;
mod state;

pub use config::{AppConfig, ConfigError, ENDPOINT_SUFFIX, default_config_path, validate_endpoint};
pub use state::{Analysis, AnalyzeError, App, AppState};
