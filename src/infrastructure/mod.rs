//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rodio and the filesystem.

pub mod audio_mode;
pub mod config;
pub mod playback;
pub mod recording;

// Re-export adapters
pub use audio_mode::ProcessAudioMode;
pub use config::XdgConfigStore;
pub use playback::RodioPlaybackService;
pub use recording::CpalRecordingService;
