//! Persisted per-profile preferences
//!
//! Holds the status card field list and the statistics column selection.
//! Stored as TOML next to `config.toml`, independent of the server.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::statistics::DEFAULT_COLUMNS;

/// Default comma-separated list of status card fields
pub const DEFAULT_POSITION_ITEMS: &str =
    "deviceTime,address,speed,course,latitude,longitude,accuracy,valid,fixTime,serverTime,ignition,distance";

/// Preference values persisted across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Local override of the status card field list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_items: Option<String>,

    /// Statistics table columns, in display order
    #[serde(default = "default_statistics_columns")]
    pub statistics_columns: Vec<String>,
}

fn default_statistics_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(|c| c.key().to_string()).collect()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            position_items: None,
            statistics_columns: default_statistics_columns(),
        }
    }
}

/// File-backed preference store
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads preferences, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(&self) -> Preferences {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => {
                debug!("No preferences at {:?}, using defaults", self.path);
                return Preferences::default();
            }
        };

        match toml::from_str(&content) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!("Ignoring malformed preferences file {:?}: {}", self.path, e);
                Preferences::default()
            }
        }
    }

    /// Writes preferences to disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be serialized or written
    pub fn save(&self, preferences: &Preferences) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::DirectoryCreationFailed(format!("{:?}: {}", parent, e))
            })?;
        }

        let content = toml::to_string_pretty(preferences).map_err(|e| {
            ConfigError::SaveFailed(format!("Failed to serialize preferences: {}", e))
        })?;

        fs::write(&self.path, content).map_err(|e| {
            ConfigError::SaveFailed(format!("Failed to write preferences: {}", e))
        })?;

        debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let store = PreferenceStore::new(temp.path().join("preferences.toml"));

        let preferences = store.load();
        assert_eq!(preferences.position_items, None);
        assert_eq!(
            preferences.statistics_columns,
            vec!["captureTime", "activeUsers", "activeDevices", "messagesStored"]
        );
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let store = PreferenceStore::new(temp.path().join("profile").join("preferences.toml"));

        let preferences = Preferences {
            position_items: Some("speed,ignition".to_string()),
            statistics_columns: vec!["requests".to_string(), "captureTime".to_string()],
        };
        store.save(&preferences).unwrap();

        assert_eq!(store.load(), preferences);
    }

    #[test]
    fn test_uses_wire_key_names() {
        let preferences = Preferences {
            position_items: Some("speed".to_string()),
            statistics_columns: vec![],
        };
        let text = toml::to_string(&preferences).unwrap();
        assert!(text.contains("positionItems"));
        assert!(text.contains("statisticsColumns"));
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.toml");
        fs::write(&path, "statisticsColumns = 7").unwrap();

        let store = PreferenceStore::new(path);
        assert_eq!(store.load(), Preferences::default());
    }
}
