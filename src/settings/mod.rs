//! Settings persistence for the tomato timer.
//!
//! The engine consumes a plain `TimerSettings` value and talks to storage
//! only through the `SettingsStore` trait:
//!
//! - `JsonSettingsStore` persists a JSON blob under the home directory
//! - `MockSettingsStore` records calls and injects failures for tests
//!
//! An absent blob means "use the built-in defaults"; save failures are
//! reported as values so the caller can log them without aborting.

mod error;
mod store;

pub use error::SettingsError;
pub use store::{JsonSettingsStore, DEFAULT_SETTINGS_PATH};

use crate::types::TimerSettings;

/// Trait for settings persistence implementations.
pub trait SettingsStore: Send {
    /// Loads the persisted settings.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<TimerSettings>, SettingsError>;

    /// Persists the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    fn save(&self, settings: &TimerSettings) -> Result<(), SettingsError>;
}

// ============================================================================
// MockSettingsStore
// ============================================================================

/// Mock settings store for testing.
#[derive(Debug, Default)]
pub struct MockSettingsStore {
    preset: std::sync::Mutex<Option<TimerSettings>>,
    saved: std::sync::Mutex<Vec<TimerSettings>>,
    fail_save: std::sync::atomic::AtomicBool,
    fail_load: std::sync::atomic::AtomicBool,
}

impl MockSettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose `load` returns the given settings.
    #[must_use]
    pub fn with_settings(settings: TimerSettings) -> Self {
        let mock = Self::new();
        *mock.preset.lock().unwrap() = Some(settings);
        mock
    }

    pub fn set_should_fail_save(&self, should_fail: bool) {
        self.fail_save
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set_should_fail_load(&self, should_fail: bool) {
        self.fail_load
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    #[must_use]
    pub fn last_saved(&self) -> Option<TimerSettings> {
        self.saved.lock().unwrap().last().cloned()
    }
}

impl SettingsStore for MockSettingsStore {
    fn load(&self) -> Result<Option<TimerSettings>, SettingsError> {
        if self.fail_load.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SettingsError::ReadError("Mock failure".to_string()));
        }
        Ok(self.preset.lock().unwrap().clone())
    }

    fn save(&self, settings: &TimerSettings) -> Result<(), SettingsError> {
        if self.fail_save.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SettingsError::WriteError("Mock failure".to_string()));
        }
        self.saved.lock().unwrap().push(settings.clone());
        Ok(())
    }
}

impl SettingsStore for std::sync::Arc<MockSettingsStore> {
    fn load(&self) -> Result<Option<TimerSettings>, SettingsError> {
        MockSettingsStore::load(self)
    }

    fn save(&self, settings: &TimerSettings) -> Result<(), SettingsError> {
        MockSettingsStore::save(self, settings)
    }
}
