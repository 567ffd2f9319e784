//! Persisted planner settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::model::ZoomMode;

const SETTINGS_FILE: &str = "settings.json";
const DATA_FILE: &str = "planner.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Dataset to open; the default lives next to the settings file.
    pub data_file: Option<PathBuf>,
    pub default_zoom: ZoomMode,
    /// `tracing` filter directive used when `STAFF_TIMELINE_LOG` is unset.
    pub log_level: String,
    /// Team filter restored on start.
    pub teams: Vec<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            data_file: None,
            default_zoom: ZoomMode::Monthly,
            log_level: "info".into(),
            teams: Vec::new(),
        }
    }
}

impl PlannerSettings {
    /// Read settings from the platform config directory, falling back to defaults.
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from(&dir.join(SETTINGS_FILE)),
            Err(e) => {
                warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Missing or unreadable files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file yet");
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), "ignoring settings: {e}");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_dir()?.join(SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Configured dataset path, or `planner.json` in the config directory.
    pub fn data_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(config_dir()?.join(DATA_FILE)),
        }
    }
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("", "", "StaffTimeline")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ConfigError::NoConfigDir)
}
