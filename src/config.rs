//! Configuration management for GPXIFY
//!
//! Handles environment variables and client settings.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use strum::{Display, EnumString};
use tracing::{info, warn};
use url::Url;

/// Default backend address used by the web front end in development
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Path prefix of every backend endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Console,
    /// One JSON object per event
    Json,
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL, without the `/api/v1` prefix
    pub api_url: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Directory holding the persisted state file
    pub data_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Admin session token, when already logged in
    #[serde(skip_serializing)]
    pub admin_token: Option<String>,

    /// Contact shown on the recovery screen
    pub support_email: String,

    /// Web front end origin, used to print share links
    pub frontend_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: 30,
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            log_format: LogFormat::Console,
            admin_token: None,
            support_email: "support@gpx.ninja".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Backend address, the web front end's variable is honored as a fallback
        if let Some(api_url) = lookup("GPXIFY_API_URL").or_else(|| lookup("VITE_API_URL")) {
            config.api_url = api_url;
        }

        if let Some(timeout) = lookup("GPXIFY_REQUEST_TIMEOUT") {
            config.request_timeout = timeout
                .parse()
                .map_err(|_| ConfigError::InvalidRequestTimeout(timeout))?;
        }

        if let Some(data_dir) = lookup("GPXIFY_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        // Logging
        if let Some(log_level) = lookup("GPXIFY_LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Some(log_format) = lookup("GPXIFY_LOG_FORMAT") {
            config.log_format = LogFormat::from_str(&log_format)
                .map_err(|_| ConfigError::InvalidLogFormat(log_format))?;
        }

        // Admin
        config.admin_token = lookup("GPXIFY_ADMIN_TOKEN").filter(|t| !t.trim().is_empty());

        if let Some(email) = lookup("GPXIFY_SUPPORT_EMAIL") {
            config.support_email = email;
        }

        if let Some(frontend_url) = lookup("GPXIFY_FRONTEND_URL") {
            config.frontend_url = frontend_url;
        }

        config.validate()?;

        Ok(config)
    }

    /// Replace the backend address, e.g. from a command line flag
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_url = api_url.into();
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_base_url()?;

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidRequestTimeout(
                self.request_timeout.to_string(),
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        Ok(())
    }

    /// Parsed backend base URL
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.api_url.trim())
            .map_err(|e| ConfigError::InvalidApiUrl(format!("{}: {}", self.api_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidApiUrl(format!(
                "unsupported scheme '{other}'"
            ))),
        }
    }

    /// Get request timeout as a duration
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Persisted client state
    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join("gpxify-storage.json")
    }

    /// Stored admin session token
    pub fn admin_token_file(&self) -> PathBuf {
        self.data_dir.join("admin-token")
    }

    /// Create data directory if it doesn't exist
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| ConfigError::DataDirCreationFailed(e.to_string()))?;
        Ok(())
    }

    /// Log configuration (excluding sensitive data)
    pub fn log_config(&self) {
        info!("Configuration loaded:");
        info!("  API URL: {}", self.api_url);
        info!("  Request timeout: {}s", self.request_timeout);
        info!("  Data directory: {:?}", self.data_dir);
        info!("  Log level: {}", self.log_level);
        info!("  Log format: {}", self.log_format);
        info!("  Front end: {}", self.frontend_url);
        info!(
            "  Admin token: {}",
            if self.admin_token.is_some() { "***" } else { "none" }
        );

        if self.api_url.starts_with("http://") && !self.is_local_backend() {
            warn!("Backend reached over plain HTTP: {}", self.api_url);
        }
    }

    fn is_local_backend(&self) -> bool {
        self.api_base_url()
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .is_some_and(|host| host == "localhost" || host == "127.0.0.1")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),

    #[error("Invalid request timeout: {0}")]
    InvalidRequestTimeout(String),

    #[error("Invalid log format: {0} (expected 'console' or 'json')")]
    InvalidLogFormat(String),

    #[error("Empty data directory")]
    EmptyDataDir,

    #[error("Data directory creation failed: {0}")]
    DataDirCreationFailed(String),
}
