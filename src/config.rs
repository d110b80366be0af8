//! Configuration System
//!
//! Loads settings from a TOML file with `INSIGHTX_*` environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::{HttpClientConfig, DEFAULT_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend locations
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    /// Base URL of the question-answering service
    #[serde(default = "default_base_url")]
    pub qa_url: String,

    /// Base URL of the aggregate endpoints
    #[serde(default = "default_base_url")]
    pub api_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            qa_url: default_base_url(),
            api_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Local persistence
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("insightx").to_string_lossy().to_string())
        .unwrap_or_else(|| "./insightx_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from the first default location that exists, else environment only
    pub fn load_default() -> Self {
        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_with_env(&path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {:?}", path);
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load config from {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Candidate config files, highest priority first
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("insightx").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("INSIGHTX_QA_URL") {
            self.endpoints.qa_url = url;
        }
        if let Some(url) = var("INSIGHTX_API_URL") {
            self.endpoints.api_url = url;
        }
        if let Some(secs) = var("INSIGHTX_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.endpoints.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid INSIGHTX_TIMEOUT_SECS: {}", secs),
            }
        }

        if let Some(data_dir) = var("INSIGHTX_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(level) = var("INSIGHTX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("INSIGHTX_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.logging.format = format,
                Err(e) => tracing::warn!("{}", e),
            }
        }
    }

    /// Settings for the HTTP client
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            qa_url: self.endpoints.qa_url.clone(),
            dashboard_url: self.endpoints.api_url.clone(),
            request_timeout_ms: self.endpoints.timeout_secs.saturating_mul(1000),
        }
    }

    /// Storage directory with a leading `~` resolved to the home directory
    pub fn data_dir(&self) -> PathBuf {
        expand_home(&self.storage.data_dir, dirs::home_dir())
    }
}

fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match home {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
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
    r#"# InsightX Configuration
#
# Environment variables override these settings:
# - INSIGHTX_QA_URL
# - INSIGHTX_API_URL
# - INSIGHTX_TIMEOUT_SECS
# - INSIGHTX_DATA_DIR
# - INSIGHTX_LOG_LEVEL
# - INSIGHTX_LOG_FORMAT

[endpoints]
# Question-answering service
qa_url = "http://localhost:8000"

# Summary, failure and trend aggregates
api_url = "http://localhost:8000"

# Request timeout in seconds
timeout_secs = 30

[storage]
# Directory holding the session id and chat history
data_dir = "~/.local/share/insightx"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
