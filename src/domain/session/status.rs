//! Status line shown to the user

use std::fmt;

use crate::domain::recording::RecordingUri;

/// Snapshot of what the session is doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Capture in progress
    Recording { elapsed_ms: u64 },
    /// A recording is available for playback
    Ready { uri: RecordingUri },
    /// Nothing recorded yet
    Empty,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recording { elapsed_ms } => write!(f, "Recording... {}s", elapsed_ms / 1000),
            Self::Ready { uri } => write!(f, "Ready: {}", uri.label()),
            Self::Empty => write!(f, "No recording yet"),
        }
    }
}
