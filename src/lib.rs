//! record-play - record, stop and play back microphone audio
//!
//! This crate provides a small record → stop → play workflow: it asks for
//! microphone access, captures audio to a WAV file, remembers the last take
//! and plays it back from the start.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the session state machine, config and errors
//! - **Application**: The record/play controller, the audio mode guard and port traits
//! - **Infrastructure**: Adapter implementations (cpal capture, rodio playback, TOML config)
//! - **CLI**: Argument parsing, the interactive session and the one-shot `take` runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
