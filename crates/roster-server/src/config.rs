// ABOUTME: Configuration loading and validation for the roster server.
// ABOUTME: Resolves a YAML file from CONFIG_PATH or --config and fails fast on missing required keys.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Env var consulted first for the config file path.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
/// Env var that overrides the `env` key from the file.
pub const ENV_OVERRIDE: &str = "ENV";

const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config path not specified; set CONFIG_PATH or pass --config")]
    MissingPath,

    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("error reading config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("http_server.address is required")]
    MissingAddress,

    #[error("storage_path is required")]
    MissingStoragePath,
}

/// Process configuration, loaded once at startup and passed to constructors.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Deployment label, used in logs only.
    #[serde(default)]
    pub env: String,
    /// SQLite database file path.
    #[serde(default)]
    pub storage_path: PathBuf,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// Listen address, `host:port`. Hostnames are resolved at bind time.
    #[serde(default)]
    pub address: String,
    /// How long shutdown waits for in-flight requests before forcing close.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

fn default_shutdown_timeout_secs() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_SECS
}

impl Config {
    /// Pick the config file path: `CONFIG_PATH` wins, then the CLI flag.
    pub fn resolve_path(flag: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or(flag)
            .ok_or(ConfigError::MissingPath)
    }

    /// Read, parse, and validate the config file at `path`, applying the
    /// `ENV` override.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;

        let mut config = Self::parse(&raw)?;
        if let Some(env) = std::env::var(ENV_OVERRIDE).ok().filter(|e| !e.is_empty()) {
            config.env = env;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without validation or env overrides.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Enforce the keys the server cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_server.address.trim().is_empty() {
            return Err(ConfigError::MissingAddress);
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingStoragePath);
        }
        Ok(())
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.http_server.shutdown_timeout_secs)
    }
}
