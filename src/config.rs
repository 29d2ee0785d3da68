//! Configuration module for docshelf.

use serde::Deserialize;
use std::path::Path;

use crate::{DocshelfError, Result};

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the storage root directory. All managed files live under it.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
    /// Base URL used when formatting access URLs in listings.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_root_path() -> String {
    "data/uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl StorageConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_upload_size_mb: default_max_upload_size(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the Web API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means permissive (development mode).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/docshelf.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DocshelfError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DocshelfError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DOCSHELF_STORAGE_ROOT`: Override the storage root directory
    /// - `DOCSHELF_MAX_UPLOAD_SIZE_MB`: Override the upload size limit
    /// - `DOCSHELF_PUBLIC_BASE_URL`: Override the access URL base
    /// - `DOCSHELF_WEB_HOST` / `DOCSHELF_WEB_PORT`: Override the bind address
    /// - `DOCSHELF_LOG_LEVEL` / `DOCSHELF_LOG_FILE`: Override logging settings
    pub fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var("DOCSHELF_STORAGE_ROOT") {
            if !root.is_empty() {
                self.storage.root_path = root;
            }
        }
        if let Ok(size) = std::env::var("DOCSHELF_MAX_UPLOAD_SIZE_MB") {
            if let Ok(mb) = size.parse::<u64>() {
                self.storage.max_upload_size_mb = mb;
            }
        }
        if let Ok(base_url) = std::env::var("DOCSHELF_PUBLIC_BASE_URL") {
            if !base_url.is_empty() {
                self.storage.public_base_url = base_url;
            }
        }
        if let Ok(host) = std::env::var("DOCSHELF_WEB_HOST") {
            if !host.is_empty() {
                self.web.host = host;
            }
        }
        if let Ok(port) = std::env::var("DOCSHELF_WEB_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                self.web.port = p;
            }
        }
        if let Ok(level) = std::env::var("DOCSHELF_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
        if let Ok(file) = std::env::var("DOCSHELF_LOG_FILE") {
            if !file.is_empty() {
                self.logging.file = file;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The storage root path is empty
    /// - The upload size limit is zero
    /// - The public base URL is empty
    pub fn validate(&self) -> Result<()> {
        if self.storage.root_path.is_empty() {
            return Err(DocshelfError::Config(
                "storage root_path is not set".to_string(),
            ));
        }
        if self.storage.max_upload_size_mb == 0 {
            return Err(DocshelfError::Config(
                "max_upload_size_mb must be at least 1".to_string(),
            ));
        }
        if self.storage.public_base_url.is_empty() {
            return Err(DocshelfError::Config(
                "public_base_url is not set".to_string(),
            ));
        }
        Ok(())
    }
}
