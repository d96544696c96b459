//! Shared audio mode value object

use std::fmt;

/// Process-wide audio configuration.
///
/// `allows_recording` must be set before a recorder may capture.
/// `plays_in_silent_mode` keeps playback audible when the system is muted
/// on platforms that have such a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioMode {
    pub allows_recording: bool,
    pub plays_in_silent_mode: bool,
}

impl AudioMode {
    /// Mode used while capturing
    pub const fn recording(plays_in_silent_mode: bool) -> Self {
        Self {
            allows_recording: true,
            plays_in_silent_mode,
        }
    }

    /// Mode used outside of capture
    pub const fn playback(plays_in_silent_mode: bool) -> Self {
        Self {
            allows_recording: false,
            plays_in_silent_mode,
        }
    }
}

impl Default for AudioMode {
    fn default() -> Self {
        Self::playback(true)
    }
}

impl fmt::Display for AudioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "recording={} silent_mode={}",
            self.allows_recording, self.plays_in_silent_mode
        )
    }
}
