//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::RecordingPreset;

/// Default log level when neither RUST_LOG nor --verbose is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub recordings_dir: Option<String>,
    pub preset: Option<String>,
    pub plays_in_silent_mode: Option<bool>,
    pub log_level: Option<String>,
}

/// Default directory for recordings (`<data dir>/record-play/recordings`)
pub fn default_recordings_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("record-play")
        .join("recordings")
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            recordings_dir: Some(default_recordings_dir().to_string_lossy().into_owned()),
            preset: Some(RecordingPreset::default().to_string()),
            plays_in_silent_mode: Some(true),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            recordings_dir: other.recordings_dir.or(self.recordings_dir),
            preset: other.preset.or(self.preset),
            plays_in_silent_mode: other.plays_in_silent_mode.or(self.plays_in_silent_mode),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get recordings directory, or the platform default if not set
    pub fn recordings_dir_or_default(&self) -> PathBuf {
        self.recordings_dir
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_recordings_dir)
    }

    /// Get preset as parsed RecordingPreset, or default if not set/invalid
    pub fn preset_or_default(&self) -> RecordingPreset {
        self.preset
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get silent-mode playback setting, or true if not set
    pub fn plays_in_silent_mode_or_default(&self) -> bool {
        self.plays_in_silent_mode.unwrap_or(true)
    }

    /// Get log level, or "warn" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
