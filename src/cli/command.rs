//! Commands accepted by the interactive session

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One line of input in the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Record,
    Stop,
    Play,
    Status,
    Help,
    Quit,
}

/// Input that is not a session command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command: \"{0}\". Type 'help' for the list of commands")]
pub struct UnknownCommand(pub String);

impl SessionCommand {
    /// All commands, in help order
    pub fn all() -> &'static [SessionCommand] {
        &[
            SessionCommand::Record,
            SessionCommand::Stop,
            SessionCommand::Play,
            SessionCommand::Status,
            SessionCommand::Help,
            SessionCommand::Quit,
        ]
    }

    /// Full command name
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Record => "record",
            SessionCommand::Stop => "stop",
            SessionCommand::Play => "play",
            SessionCommand::Status => "status",
            SessionCommand::Help => "help",
            SessionCommand::Quit => "quit",
        }
    }

    /// Short alias, if any
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            SessionCommand::Record => Some("r"),
            SessionCommand::Stop => Some("s"),
            SessionCommand::Play => Some("p"),
            SessionCommand::Status => None,
            SessionCommand::Help => Some("?"),
            SessionCommand::Quit => Some("q"),
        }
    }

    /// One-line description for the help listing
    pub fn description(&self) -> &'static str {
        match self {
            SessionCommand::Record => "Start recording",
            SessionCommand::Stop => "Stop recording and keep the take",
            SessionCommand::Play => "Play the last take from the start",
            SessionCommand::Status => "Show the current status",
            SessionCommand::Help => "Show this list",
            SessionCommand::Quit => "Stop everything and exit",
        }
    }
}

impl FromStr for SessionCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|command| command.name() == input || command.alias() == Some(input.as_str()))
            .ok_or_else(|| UnknownCommand(s.trim().to_string()))
    }
}

impl fmt::Display for SessionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
