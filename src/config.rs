//! Configuration System
//!
//! Layered configuration: built-in defaults, an optional TOML file,
//! then DEVPULSE_* environment overrides. The API server looks for a
//! file in the user config directory, /etc/devpulse and the working
//! directory, in that order.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gitlab: GitLabConfig,
    #[serde(default)]
    pub vision: VisionBackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory image paths in analyze requests resolve against.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Live GitLab integration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_gitlab_url")]
    pub base_url: String,
    /// Personal access token.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_gitlab_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_gitlab_url(),
            token: String::new(),
            request_timeout_ms: default_gitlab_timeout(),
        }
    }
}

/// Image-analysis backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct VisionBackendConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_vision_url")]
    pub base_url: String,
    #[serde(default = "default_vision_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for VisionBackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_vision_url(),
            request_timeout_ms: default_vision_timeout(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_request_timeout() -> u64 {
    30
}

fn default_gitlab_url() -> String {
    "https://gitlab.com/api/v4".to_string()
}

fn default_gitlab_timeout() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_vision_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_vision_timeout() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Defaults plus environment overrides, no file involved.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Load from a file, then apply environment overrides on top.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from the first config file found in the standard
    /// locations, falling back to defaults plus the environment.
    pub fn load_default() -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("devpulse").join("config.toml"));
        }
        candidates.push(PathBuf::from("/etc/devpulse/config.toml"));
        candidates.push(PathBuf::from("./config.toml"));

        for candidate in &candidates {
            if candidate.is_file() {
                match Self::load_with_env(candidate) {
                    Ok(config) => {
                        tracing::info!(path = %candidate.display(), "loaded configuration");
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %candidate.display(),
                            error = %e,
                            "ignoring unreadable config file"
                        );
                    }
                }
            }
        }

        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("DEVPULSE_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("DEVPULSE_API_PORT") {
            if let Ok(port) = port.parse() {
                self.api.port = port;
            }
        }
        if let Ok(dir) = std::env::var("DEVPULSE_ASSETS_DIR") {
            self.api.assets_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("DEVPULSE_GITLAB_URL") {
            self.gitlab.base_url = url;
            self.gitlab.enabled = true;
        }
        if let Ok(token) = std::env::var("DEVPULSE_GITLAB_TOKEN") {
            self.gitlab.token = token;
        }
        if let Ok(url) = std::env::var("DEVPULSE_VISION_URL") {
            self.vision.base_url = url;
        }
        if let Ok(level) = std::env::var("DEVPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DEVPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// A commented template for a fresh installation.
pub fn generate_default_config() -> String {
    r#"# devpulse configuration
#
# Every value here can also be set through the environment:
#   DEVPULSE_API_HOST, DEVPULSE_API_PORT, DEVPULSE_ASSETS_DIR,
#   DEVPULSE_GITLAB_URL, DEVPULSE_GITLAB_TOKEN,
#   DEVPULSE_VISION_URL, DEVPULSE_LOG_LEVEL, DEVPULSE_LOG_FORMAT

[api]
host = "0.0.0.0"
port = 8086
# Image paths in analyze requests resolve against this directory.
assets_dir = "./assets"
request_timeout_secs = 30

[gitlab]
# When disabled, deterministic sample metrics are served instead.
enabled = false
base_url = "https://gitlab.com/api/v4"
token = ""
request_timeout_ms = 10000

[vision]
enabled = true
base_url = "http://localhost:8090"
request_timeout_ms = 30000

[logging]
# trace, debug, info, warn, error
level = "info"
# "pretty" or "json"
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.api.port, 8086);
        assert!(!config.gitlab.enabled);
        assert!(config.vision.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn generated_template_parses_back() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8086);
        assert_eq!(config.vision.base_url, "http://localhost:8090");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = 9000").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.gitlab.base_url, "https://gitlab.com/api/v4");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api = not valid toml").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
