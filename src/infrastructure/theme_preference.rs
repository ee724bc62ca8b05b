//! Persisted light/dark preference.

use tracing::{debug, warn};

use super::config::{ConfigError, StateConfig, StorageManager, ThemeMode};

/// Reads and writes the dark-theme flag kept in `state.toml`.
pub struct ThemePreferenceStore {
    storage: StorageManager,
    fallback: ThemeMode,
}

impl ThemePreferenceStore {
    /// Creates a store that answers `fallback` until a preference is saved.
    #[must_use]
    pub const fn new(storage: StorageManager, fallback: ThemeMode) -> Self {
        Self { storage, fallback }
    }

    /// Returns the saved mode, or the fallback when nothing usable is stored.
    #[must_use]
    pub fn load(&self) -> ThemeMode {
        match self.storage.load_state() {
            Ok(StateConfig {
                dark_theme: Some(dark),
            }) => ThemeMode::from_dark(dark),
            Ok(_) => self.fallback,
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                self.fallback
            }
        }
    }

    /// Persists `mode`.
    ///
    /// # Errors
    /// Returns error if the state file cannot be written.
    pub fn save(&self, mode: ThemeMode) -> Result<(), ConfigError> {
        let mut state = self.storage.load_state().unwrap_or_default();
        state.dark_theme = Some(mode.is_dark());
        self.storage.save_state(&state)?;
        debug!(%mode, "Saved theme preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fallback_until_saved() {
        let dir = tempdir().unwrap();
        let store =
            ThemePreferenceStore::new(StorageManager::with_dir(dir.path().into()), ThemeMode::Dark);

        assert_eq!(store.load(), ThemeMode::Dark);

        store.save(ThemeMode::Light).unwrap();
        assert_eq!(store.load(), ThemeMode::Light);
    }

    #[test]
    fn test_preference_survives_new_store() {
        let dir = tempdir().unwrap();
        ThemePreferenceStore::new(StorageManager::with_dir(dir.path().into()), ThemeMode::Light)
            .save(ThemeMode::Dark)
            .unwrap();

        let reopened =
            ThemePreferenceStore::new(StorageManager::with_dir(dir.path().into()), ThemeMode::Light);
        assert_eq!(reopened.load(), ThemeMode::Dark);
    }
}
