//! Runtime settings, read through the `config` crate.
//!
//! Sources are layered: an optional settings file first (any format `config`
//! recognises by extension, such as `multibucket.json` or `multibucket.toml`),
//! then environment variables prefixed `MULTIBUCKET_`, for example
//! `MULTIBUCKET_INITIAL_CAPACITY=1024`. Missing values fall back to defaults.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{MultibucketError, Result};

pub const DEFAULT_SETTINGS_FILE: &str = "multibucket.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of keys the map is pre-sized for.
    pub initial_capacity: usize,
    /// An `EnvFilter` directive, e.g. `"warn"` or `"multibucket=trace"`.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            log_filter: String::from("warn"),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("MULTIBUCKET").try_parsing(true))
            .build()?;
        let settings: Settings = config.try_deserialize()?;
        debug!(path, initial_capacity = settings.initial_capacity, "settings loaded");
        Ok(settings)
    }
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_SETTINGS_FILE)
    }
}

/// Installs a global `fmt` subscriber filtered by `settings.log_filter`.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_tracing(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.log_filter)
        .map_err(|e| MultibucketError::Logging(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| MultibucketError::Logging(e.to_string()))
}
