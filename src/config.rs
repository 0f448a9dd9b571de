//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote quote API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the general quotes API
    #[serde(default = "default_quote_api_url")]
    pub quote_api_url: String,

    /// Base URL of the Bible text API
    #[serde(default = "default_bible_api_url")]
    pub bible_api_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_quote_api_url() -> String {
    "https://api.quotable.io".to_string()
}

fn default_bible_api_url() -> String {
    "https://bible-api.com".to_string()
}

fn default_request_timeout() -> u64 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            quote_api_url: default_quote_api_url(),
            bible_api_url: default_bible_api_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the store document
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("quotidian").to_string_lossy().to_string())
        .unwrap_or_else(|| "./quotidian_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the store document inside the data directory
    pub fn store_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("store.json")
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("quotidian").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("QUOTIDIAN_QUOTE_API_URL") {
            self.api.quote_api_url = url;
        }
        if let Ok(url) = std::env::var("QUOTIDIAN_BIBLE_API_URL") {
            self.api.bible_api_url = url;
        }
        if let Ok(timeout) = std::env::var("QUOTIDIAN_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.api.request_timeout_ms = ms;
            }
        }
        if let Ok(data_dir) = std::env::var("QUOTIDIAN_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Ok(level) = std::env::var("QUOTIDIAN_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Quotidian Configuration
#
# Environment variables override these settings:
# - QUOTIDIAN_QUOTE_API_URL
# - QUOTIDIAN_BIBLE_API_URL
# - QUOTIDIAN_REQUEST_TIMEOUT_MS
# - QUOTIDIAN_DATA_DIR
# - QUOTIDIAN_LOG_LEVEL

[api]
# General quotes API (Quotable, no key required)
quote_api_url = "https://api.quotable.io"

# Bible text API (bible-api.com, no key required)
bible_api_url = "https://bible-api.com"

# HTTP request timeout (ms)
request_timeout_ms = 5000

[storage]
# Directory for the persistent store document
# data_dir = "~/.local/share/quotidian"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"
"#
    .to_string()
}
