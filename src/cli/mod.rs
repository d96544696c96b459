//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the interactive and one-shot runners.

pub mod app;
pub mod args;
pub mod command;
pub mod config_cmd;
pub mod presenter;
pub mod session;
pub mod signals;
pub mod take;

// Re-export commonly used types
pub use app::{build_controller, AppController, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, SessionOptions};
pub use command::SessionCommand;
pub use presenter::Presenter;
pub use session::run_session;
pub use take::run_take;
