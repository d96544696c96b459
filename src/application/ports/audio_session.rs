//! Shared audio mode port

use thiserror::Error;

use crate::domain::AudioMode;

/// Audio mode errors
#[derive(Debug, Clone, Error)]
pub enum AudioModeError {
    #[error("Failed to set audio mode: {0}")]
    SetFailed(String),
}

/// Port for the process-wide audio mode.
///
/// Synchronous so that scope guards can restore it from `Drop`.
pub trait AudioSession: Send + Sync {
    /// Replace the current mode
    fn set_mode(&self, mode: AudioMode) -> Result<(), AudioModeError>;

    /// Read the current mode
    fn mode(&self) -> AudioMode;
}
