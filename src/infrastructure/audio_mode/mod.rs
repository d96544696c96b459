//! Shared audio mode adapters

mod process;

pub use process::ProcessAudioMode;
