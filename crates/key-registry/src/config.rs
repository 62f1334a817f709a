//! Configuration for the key registry.
//!
//! Read from environment variables prefixed with `KEY_REGISTRY_`, using `__`
//! to separate nested keys, e.g. `KEY_REGISTRY_STORE__PATH=/data/keys`.
//! A `.env` file in the working directory is loaded first if present.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "KEY_REGISTRY";

/// Registry configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Record store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the record file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, records live in memory for one invocation)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level, used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// Default implementations
impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// Default value functions
fn default_store_path() -> PathBuf {
    PathBuf::from(".keys")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "error".into()
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(environment())
    }

    fn from_environment(source: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(false)
}
