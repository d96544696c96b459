//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;

use crate::domain::session::SessionStatus;

use super::command::SessionCommand;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print the input prompt without a newline
    pub fn prompt(&self) {
        print!("{} ", ">".bold());
        let _ = io::stdout().flush();
    }

    /// Print the status line to stdout
    pub fn status(&self, status: &SessionStatus) {
        let marker = match status {
            SessionStatus::Recording { .. } => "●".red(),
            SessionStatus::Ready { .. } => "●".green(),
            SessionStatus::Empty => "○".dimmed(),
        };
        println!("{} {}", marker, status);
    }

    /// Print the command list to stdout
    pub fn help(&self) {
        println!("{}", "Commands:".bold());
        for command in SessionCommand::all() {
            println!("  {}", format_command(command));
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format a duration in milliseconds as seconds with one decimal
    pub fn format_seconds(&self, duration_ms: u64) -> String {
        format!("{:.1}s", duration_ms as f64 / 1000.0)
    }
}

fn format_command(command: &SessionCommand) -> String {
    let names = match command.alias() {
        Some(alias) => format!("{}, {}", command.name(), alias),
        None => command.name().to_string(),
    };
    format!("{:<12}{}", names, command.description())
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seconds_rounds_to_tenths() {
        let presenter = Presenter::new();
        assert_eq!(presenter.format_seconds(0), "0.0s");
        assert_eq!(presenter.format_seconds(1240), "1.2s");
        assert_eq!(presenter.format_seconds(61_000), "61.0s");
    }

    #[test]
    fn format_command_includes_alias() {
        let line = format_command(&SessionCommand::Record);
        assert!(line.starts_with("record, r"));
        assert!(line.contains("Start recording"));
    }

    #[test]
    fn format_command_without_alias() {
        let line = format_command(&SessionCommand::Status);
        assert!(line.starts_with("status "));
    }
}
