//! `config.toml` and `state.toml` under the platform config directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use super::state_config::StateConfig;
use crate::infrastructure::atomic_file::write_atomic;

const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_FILE_NAME: &str = "state.toml";

/// Failure to locate, read or write a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no config directory for this user.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A value could not be rendered as TOML.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Reads the config file and reads and writes the session state file.
pub struct StorageManager {
    dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform config directory (`~/.config/photogrid` on Linux).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigDirNotFound` when no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses `dir` for both files.
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Loads `config.toml` (or `path_override`) with out-of-range values clamped.
    ///
    /// A missing file is created with defaults. An unparseable file is left untouched and
    /// defaults are used for this run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.dir.join(CONFIG_FILE_NAME), Path::to_path_buf);

        if let Some(config) = read_toml::<AppConfig>(&path)? {
            return Ok(config.clamped());
        }

        info!(path = %path.display(), "No config file, writing defaults");
        let config = AppConfig::default();
        write_toml(&path, &config)?;
        Ok(config)
    }

    /// Loads the session state. Missing or unparseable files yield the default state.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read.
    pub fn load_state(&self) -> Result<StateConfig, ConfigError> {
        Ok(read_toml(&self.dir.join(STATE_FILE_NAME))?.unwrap_or_default())
    }

    /// Replaces the session state file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory or file cannot be written.
    pub fn save_state(&self, state: &StateConfig) -> Result<(), ConfigError> {
        write_toml(&self.dir.join(STATE_FILE_NAME), state)
    }
}

/// `Ok(None)` when the file does not exist.
fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let value = toml::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Unparseable settings file, using defaults");
        T::default()
    });
    Ok(Some(value))
}

fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(value)?;
    write_atomic(path, content.as_bytes())?;
    Ok(())
}
