//! Configuration management for TrackerDesk
//!
//! This module handles application configuration including:
//! - Loading and saving `config.toml`
//! - Managing the configuration directory
//! - Providing sensible defaults and validating values
//!
//! Per-profile user preferences (field and column selections) live in
//! [`preferences`].

pub mod preferences;

use crate::error::{ConfigError, ConfigResult};
use crate::statistics::Period;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use preferences::{PreferenceStore, Preferences};

const CONFIG_FILE_NAME: &str = "config.toml";
const PREFERENCES_FILE_NAME: &str = "preferences.toml";

const DEFAULT_BASE_URL: &str = "http://localhost:8082";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;
const DEFAULT_CARD_OFFSET: f32 = 8.0;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracking server connection
    pub server: ServerConfig,

    /// UI configuration
    pub ui: UiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Tracking server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server, e.g. `https://demo.example.com`
    pub base_url: String,

    /// Optional API token sent as a bearer credential
    pub token: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial window width
    pub window_width: f32,

    /// Initial window height
    pub window_height: f32,

    /// Distance of the status card from the bottom-right corner
    pub card_offset: f32,

    /// Period preselected on the statistics screen
    pub default_period: Period,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            card_offset: DEFAULT_CARD_OFFSET,
            default_period: Period::Today,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Configuration manager
pub struct ConfigManager {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager rooted at the platform config directory
    ///
    /// # Errors
    ///
    /// Returns error if project directory cannot be determined
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::get_config_directory()?;
        Ok(Self::with_directory(config_dir))
    }

    /// Creates a ConfigManager rooted at an explicit directory
    pub fn with_directory(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let config_file = config_dir.join(CONFIG_FILE_NAME);
        Self {
            config_dir,
            config_file,
        }
    }

    /// Gets the configuration directory path
    fn get_config_directory() -> ConfigResult<PathBuf> {
        ProjectDirs::from("com", "trackerdesk", "TrackerDesk")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                ConfigError::DirectoryNotFound(
                    "Could not determine configuration directory".to_string(),
                )
            })
    }

    /// Ensures the configuration directory exists
    fn ensure_config_directory(&self) -> ConfigResult<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).map_err(|e| {
                ConfigError::DirectoryCreationFailed(format!(
                    "Failed to create config directory at {:?}: {}",
                    self.config_dir, e
                ))
            })?;
        }
        Ok(())
    }

    /// Loads configuration from file, or creates default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns error if configuration cannot be loaded or created
    pub fn load_or_create_default(&self) -> ConfigResult<Config> {
        self.ensure_config_directory()?;

        if self.config_file.exists() {
            self.load()
        } else {
            let config = Config::default();
            self.save(&config)?;
            Ok(config)
        }
    }

    /// Loads configuration from file
    fn load(&self) -> ConfigResult<Config> {
        let content = fs::read_to_string(&self.config_file).map_err(|e| {
            ConfigError::LoadFailed(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ConfigError::LoadFailed(format!("Failed to parse config file: {}", e))
        })?;

        self.validate(&config)?;

        Ok(config)
    }

    /// Saves configuration to file
    ///
    /// # Errors
    ///
    /// Returns error if configuration cannot be saved
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.ensure_config_directory()?;
        self.validate(config)?;

        let content = toml::to_string_pretty(config).map_err(|e| {
            ConfigError::SaveFailed(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&self.config_file, content).map_err(|e| {
            ConfigError::SaveFailed(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Validates configuration values
    fn validate(&self, config: &Config) -> ConfigResult<()> {
        let base_url = config.server.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(format!(
                "Server base URL must start with http:// or https:// (got '{}')",
                base_url
            )));
        }

        if config.server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }

        if config.ui.window_width < 320.0 || config.ui.window_height < 240.0 {
            return Err(ConfigError::InvalidValue(
                "Window must be at least 320x240".to_string(),
            ));
        }

        if config.ui.card_offset < 0.0 {
            return Err(ConfigError::InvalidValue(
                "Card offset cannot be negative".to_string(),
            ));
        }

        config.logging.level.parse::<crate::logging::LogLevel>()?;

        Ok(())
    }

    /// Opens the preference store that lives next to the config file
    pub fn preference_store(&self) -> PreferenceStore {
        PreferenceStore::new(self.config_dir.join(PREFERENCES_FILE_NAME))
    }

    /// Gets the configuration directory path
    pub fn config_directory(&self) -> &Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:8082");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert!(config.server.token.is_none());
        assert_eq!(config.ui.default_period, Period::Today);
    }

    #[test]
    fn test_config_validation() {
        let manager = ConfigManager::with_directory("/nonexistent");

        let mut config = Config::default();
        config.server.base_url = "ftp://tracker".to_string();
        assert!(manager.validate(&config).is_err());

        let mut config = Config::default();
        config.server.request_timeout_secs = 0;
        assert!(manager.validate(&config).is_err());

        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        assert!(manager.validate(&config).is_err());

        assert!(manager.validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(temp.path().join("nested"));

        let config = manager.load_or_create_default().unwrap();
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert!(temp.path().join("nested").join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[server]\nbase_url = \"https://gps.example.com\"\ntoken = \"abc\"\n",
        )
        .unwrap();

        let manager = ConfigManager::with_directory(temp.path());
        let config = manager.load_or_create_default().unwrap();

        assert_eq!(config.server.base_url, "https://gps.example.com");
        assert_eq!(config.server.token.as_deref(), Some("abc"));
        assert_eq!(config.server.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.ui.card_offset, DEFAULT_CARD_OFFSET);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.server.base_url, deserialized.server.base_url);
        assert_eq!(config.ui.default_period, deserialized.ui.default_period);
    }
}
