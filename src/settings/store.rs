//! JSON file-backed settings store.
//!
//! Persists the durations configuration as a single JSON blob under the
//! user's home directory. The blob is versionless; missing fields fall back
//! to defaults at deserialization time (see `TimerSettings`).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::TimerSettings;

use super::error::SettingsError;
use super::SettingsStore;

/// Default settings path relative to the home directory.
pub const DEFAULT_SETTINGS_PATH: &str = ".tomato/settings.json";

/// Settings store that persists a JSON blob on the filesystem.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    /// Path of the settings file
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Creates a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default path under the home directory.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::HomeDirNotFound` if the home directory
    /// cannot be determined.
    pub fn with_default_path() -> Result<Self, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::HomeDirNotFound)?;
        Ok(Self::new(home.join(DEFAULT_SETTINGS_PATH)))
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Option<TimerSettings>, SettingsError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("設定ファイルが存在しないためデフォルト設定を使用します");
                return Ok(None);
            }
            Err(e) => return Err(SettingsError::ReadError(e.to_string())),
        };

        let settings: TimerSettings = serde_json::from_slice(&bytes)
            .map_err(|e| SettingsError::ParseError(e.to_string()))?;

        debug!("設定を読み込みました: {:?}", self.path);
        Ok(Some(settings))
    }

    fn save(&self, settings: &TimerSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::WriteError(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(settings)
            .map_err(|e| SettingsError::SerializeError(e.to_string()))?;

        std::fs::write(&self.path, json).map_err(|e| SettingsError::WriteError(e.to_string()))?;

        debug!("設定を保存しました: {:?}", self.path);
        Ok(())
    }
}
