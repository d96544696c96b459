//! Scoped recording mode on the shared audio session

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::{AudioModeError, AudioSession};
use crate::domain::AudioMode;

/// RAII guard holding the shared audio session in recording mode.
///
/// The non-recording mode is restored by `release`, or on drop when the
/// guard is abandoned (a failed start, teardown, panic unwinding).
pub struct RecordingModeGuard<M: AudioSession> {
    session: Arc<M>,
    restore: AudioMode,
    active: bool,
}

impl<M: AudioSession> RecordingModeGuard<M> {
    /// Switch the session into recording mode and return a guard that undoes it.
    pub fn enter(session: Arc<M>, plays_in_silent_mode: bool) -> Result<Self, AudioModeError> {
        let mode = AudioMode::recording(plays_in_silent_mode);
        session.set_mode(mode)?;
        debug!(%mode, "entered recording mode");

        Ok(Self {
            session,
            restore: AudioMode::playback(plays_in_silent_mode),
            active: true,
        })
    }

    /// Restore the non-recording mode, reporting failure to the caller.
    pub fn release(mut self) -> Result<(), AudioModeError> {
        self.active = false;
        self.session.set_mode(self.restore)?;
        debug!(mode = %self.restore, "left recording mode");
        Ok(())
    }
}

impl<M: AudioSession> Drop for RecordingModeGuard<M> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        match self.session.set_mode(self.restore) {
            Ok(()) => debug!(mode = %self.restore, "recording mode rolled back"),
            Err(e) => warn!(error = %e, "failed to roll back recording mode"),
        }
    }
}
