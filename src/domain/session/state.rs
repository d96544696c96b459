//! Session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Record/play session entity.
///
/// State machine:
///   IDLE -> RECORDING (start_recording)
///   RECORDING -> IDLE (finish_recording)
///
/// Playback is only allowed from IDLE.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Transition from IDLE to RECORDING
    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        self.ensure_can_start()?;
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to IDLE
    pub fn finish_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(self.invalid("finish recording"));
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Check that a recording may start
    pub fn ensure_can_start(&self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("start recording"));
        }
        Ok(())
    }

    /// Check that playback may start
    pub fn ensure_can_play(&self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("play"));
        }
        Ok(())
    }

    /// Force the session back to IDLE (teardown, lost device)
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}
