//! Persisted endpoint configuration.
//!
//! One string value — the webhook URL — stored as JSON in the user's config
//! directory, read at startup and written only on explicit save. Validation
//! happens at save time; invalid input is rejected and never persisted.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use url::Url;

/// Required trailing path segment of a valid log endpoint.
pub const ENDPOINT_SUFFIX: &str = "/exec";

const APP_DIR_NAME: &str = ".revlens";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("no suitable base config directory available")]
    NoBaseDir,

    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Webhook endpoint for analysis logging, if configured.
    pub endpoint: Option<String>,
}

impl AppConfig {
    /// Read the config file; a missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validate and persist a new endpoint, returning the parsed URL.
    ///
    /// Rejection leaves the file untouched.
    pub fn save_endpoint(path: &Path, input: &str) -> Result<Url, ConfigError> {
        let url = validate_endpoint(input)?;
        let mut config = Self::load(path)?;
        config.endpoint = Some(url.to_string());
        config.save(path)?;
        info!(endpoint = %url, "endpoint saved");
        Ok(url)
    }

    /// The configured endpoint as a parsed URL, dropping values that no
    /// longer pass validation.
    pub fn endpoint_url(&self) -> Option<Url> {
        self.endpoint
            .as_deref()
            .and_then(|raw| validate_endpoint(raw).ok())
    }
}

/// Shape check for a log endpoint: an http(s) URL whose path ends with
/// [`ENDPOINT_SUFFIX`].
pub fn validate_endpoint(input: &str) -> Result<Url, ConfigError> {
    let input = input.trim();
    let url =
        Url::parse(input).map_err(|e| ConfigError::InvalidEndpoint(format!("{input}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEndpoint(format!(
            "{input}: expected an http(s) URL"
        )));
    }
    if !url.path().ends_with(ENDPOINT_SUFFIX) {
        return Err(ConfigError::InvalidEndpoint(format!(
            "{input}: endpoint must end with {ENDPOINT_SUFFIX}"
        )));
    }
    Ok(url)
}

/// Default config file location: `<os config dir>/.revlens/config.json`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = BaseDirs::new().ok_or(ConfigError::NoBaseDir)?;
    Ok(base.config_dir().join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
