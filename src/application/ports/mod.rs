//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the controller
//! and the audio/storage adapters.

pub mod audio_session;
pub mod config;
pub mod player;
pub mod recorder;

// Re-export common types
pub use audio_session::{AudioModeError, AudioSession};
pub use config::ConfigStore;
pub use player::{PlaybackError, PlaybackService};
pub use recorder::{RecordingError, RecordingService};
