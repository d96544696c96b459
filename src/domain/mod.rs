//! Domain layer - Core types and state
//!
//! Contains value objects, the session state machine, and domain errors.
//! This layer has no dependencies on audio devices or the filesystem.

pub mod audio_mode;
pub mod config;
pub mod error;
pub mod recording;
pub mod session;

// Re-export common types
pub use audio_mode::AudioMode;
pub use config::AppConfig;
pub use error::*;
pub use recording::{PermissionStatus, RecordingPreset, RecordingUri};
pub use session::{InvalidStateTransition, Session, SessionState, SessionStatus};
