//! Playback service port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::RecordingUri;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Audio output not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Failed to load {uri}: {message}")]
    LoadFailed { uri: String, message: String },

    #[error("Nothing is loaded")]
    NothingLoaded,

    #[error("Seek failed: {0}")]
    SeekFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for audio playback.
///
/// Lifecycle: empty -> loaded (`replace`) -> playing (`play`).
#[async_trait]
pub trait PlaybackService: Send + Sync {
    /// Load a new source, replacing whatever was loaded. Leaves playback paused.
    async fn replace(&self, uri: &RecordingUri) -> Result<(), PlaybackError>;

    /// Move the playhead of the loaded source
    async fn seek_to(&self, position_ms: u64) -> Result<(), PlaybackError>;

    /// Start or resume playback of the loaded source
    async fn play(&self) -> Result<(), PlaybackError>;

    /// Drop the loaded source and free output resources
    async fn unload(&self) -> Result<(), PlaybackError>;

    /// Check if audio is currently being played
    fn is_playing(&self) -> bool;
}
