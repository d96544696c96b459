//! Recording service port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{PermissionStatus, RecordingUri};

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Permission query failed: {0}")]
    PermissionFailed(String),

    #[error("Audio mode does not allow recording")]
    RecordingNotAllowed,

    #[error("Failed to prepare recorder: {0}")]
    PrepareFailed(String),

    #[error("Recorder is not prepared")]
    NotPrepared,

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to stop recording: {0}")]
    StopFailed(String),

    #[error("Failed to write recording: {0}")]
    WriteFailed(String),

    #[error("No audio device available")]
    NoAudioDevice,
}

/// Port for microphone capture.
///
/// Lifecycle: idle -> preparing (`prepare`) -> recording (`record`)
/// -> stopped (`stop`) -> idle (next `prepare`).
#[async_trait]
pub trait RecordingService: Send + Sync {
    /// Ask for microphone permission, prompting the user where the platform does.
    async fn request_permission(&self) -> Result<PermissionStatus, RecordingError>;

    /// Read the current permission status without prompting.
    async fn permission_status(&self) -> Result<PermissionStatus, RecordingError>;

    /// Get ready to capture into a fresh destination.
    async fn prepare(&self) -> Result<(), RecordingError>;

    /// Begin capture. Requires a prior `prepare`.
    async fn record(&self) -> Result<(), RecordingError>;

    /// End capture and finalize the destination.
    async fn stop(&self) -> Result<(), RecordingError>;

    /// Check if currently capturing
    fn is_recording(&self) -> bool;

    /// Locator of the last finalized recording, if it produced one
    fn uri(&self) -> Option<RecordingUri>;

    /// Elapsed (or final) capture time in milliseconds
    fn duration_ms(&self) -> u64;
}
