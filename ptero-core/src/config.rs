//! Application configuration management.
//!
//! Holds the panel URL, API key and request tuning used to build a
//! connection, plus logging preferences. Configuration is persisted as TOML.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{PteroError, PteroResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Panel connection settings.
    #[serde(default)]
    pub panel: PanelConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Panel connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Panel base URL (e.g., "https://panel.example.com").
    #[serde(default)]
    pub url: String,

    /// Application or client API key, sent as a bearer token.
    #[serde(default)]
    pub api_key: String,

    /// Extra HTTP headers sent after the mandatory ones.
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,

    /// Timeout for each capability probe, in seconds.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Timeout for list and detail requests, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Whether to accept invalid TLS certificates from the panel.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Emit probe timings and per-page progress at debug level.
    #[serde(default)]
    pub debug: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output for the file layer.
    #[serde(default)]
    pub json_output: bool,
}

fn default_probe_timeout() -> u64 {
    constants::PROBE_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    constants::REQUEST_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            custom_headers: HashMap::new(),
            probe_timeout_secs: default_probe_timeout(),
            request_timeout_secs: default_request_timeout(),
            accept_invalid_certs: false,
            debug: false,
        }
    }
}

impl std::fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelConfig")
            .field("url", &self.url)
            .field("api_key", &"********")
            .field("custom_headers", &self.custom_headers.keys().collect::<Vec<_>>())
            .field("probe_timeout_secs", &self.probe_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl PanelConfig {
    /// Build a panel config from a URL and key, leaving everything else default.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Fail unless both the URL and the key are set.
    pub fn validate(&self) -> PteroResult<()> {
        if self.url.trim().is_empty() {
            return Err(PteroError::MissingConfig("panel.url".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(PteroError::MissingConfig("panel.api_key".into()));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> PteroResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> PteroResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> PteroResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| PteroError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PteroResult<PathBuf> {
        let config_dir = Platform::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> PteroResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let data_dir = Platform::data_dir()?;
            Ok(data_dir.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether the panel connection is configured.
    pub fn is_panel_configured(&self) -> bool {
        !self.panel.url.is_empty() && !self.panel.api_key.is_empty()
    }

    /// Sanitize and normalize a panel URL.
    ///
    /// Strips surrounding whitespace and quotes, defaults the scheme to https
    /// and removes trailing slashes so paths can be appended directly.
    pub fn sanitize_panel_url(url: &str) -> String {
        let trimmed = url.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}
