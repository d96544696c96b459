//! Recording infrastructure module
//!
//! Captures microphone audio with cpal and stores each take as a WAV file.

mod cpal_recorder;
mod wav;

pub use cpal_recorder::CpalRecordingService;
pub use wav::write_wav;
