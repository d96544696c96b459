//! In-process audio mode flag
//!
//! Desktop platforms have no system-wide recording/silent switch, so the
//! mode lives in the process and is consulted by the recorder before capture.

use std::sync::RwLock;

use tracing::debug;

use crate::application::ports::{AudioModeError, AudioSession};
use crate::domain::AudioMode;

/// Audio mode shared between the controller and the recorder
#[derive(Debug, Default)]
pub struct ProcessAudioMode {
    mode: RwLock<AudioMode>,
}

impl ProcessAudioMode {
    /// Create a mode flag starting in playback mode
    pub fn new(plays_in_silent_mode: bool) -> Self {
        Self {
            mode: RwLock::new(AudioMode::playback(plays_in_silent_mode)),
        }
    }

    /// Check if capture is currently allowed
    pub fn allows_recording(&self) -> bool {
        self.mode().allows_recording
    }
}

impl AudioSession for ProcessAudioMode {
    fn set_mode(&self, mode: AudioMode) -> Result<(), AudioModeError> {
        let mut guard = self
            .mode
            .write()
            .map_err(|e| AudioModeError::SetFailed(e.to_string()))?;
        *guard = mode;
        debug!(%mode, "audio mode set");
        Ok(())
    }

    fn mode(&self) -> AudioMode {
        *self.mode.read().unwrap_or_else(|e| e.into_inner())
    }
}
