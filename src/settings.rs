//! Persisted user settings.
//!
//! A single user-editable value, owned by the host and injected into the
//! renderer. Loading merges stored values over the defaults, so older or
//! partial files keep working.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Directory under the user config dir holding the settings file.
pub const APP_DIR: &str = "u-timeline";
/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings at {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write settings at {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid settings at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_yaml::Error),
    #[error("no user config directory available")]
    NoConfigDir,
}

/// Timeline rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Theme name, emitted as a `timeline-theme-<theme>` class.
    pub theme: String,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

impl TimelineSettings {
    /// Sets the theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Default settings location: `<config dir>/u-timeline/settings.yaml`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let mut path = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Ok(path)
    }

    /// Loads settings from `path`.
    ///
    /// A missing or empty file yields the defaults; keys absent from the
    /// file keep their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings = serde_yaml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Saves settings to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;

        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)?;

        info!(path = %path.display(), "settings saved");
        Ok(())
    }
}
