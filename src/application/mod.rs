//! Application layer - Use cases and port interfaces
//!
//! Contains the record/play controller and the trait definitions
//! for the audio services it drives.

pub mod controller;
pub mod mode_guard;
pub mod ports;

// Re-export use cases
pub use controller::{
    ControllerConfig, ControllerError, PlayOutcome, RecordPlayController, StartOutcome,
    StopOutcome,
};
pub use mode_guard::RecordingModeGuard;
