//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::recording::RecordingPreset;

/// Longest accepted `take` duration, in seconds
pub const MAX_TAKE_SECONDS: u64 = 3600;

/// record-play - record, stop and play back microphone audio
#[derive(Parser, Debug)]
#[command(name = "record-play")]
#[command(version)]
#[command(about = "Record, stop and play back microphone audio from the terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Recording quality preset
    #[arg(short = 'p', long, value_name = "PRESET", global = true)]
    pub preset: Option<PresetArg>,

    /// Directory recordings are written to
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        env = "RECORD_PLAY_RECORDINGS_DIR",
        global = true
    )]
    pub recordings_dir: Option<PathBuf>,

    /// Show debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Subcommand (interactive session when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record for a fixed time, then play the take back
    Take {
        /// Recording length in seconds
        #[arg(
            short = 's',
            long,
            value_name = "N",
            default_value_t = 5,
            value_parser = clap::value_parser!(u64).range(1..=MAX_TAKE_SECONDS)
        )]
        seconds: u64,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Preset argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    High,
    Low,
}

impl From<PresetArg> for RecordingPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::High => RecordingPreset::High,
            PresetArg::Low => RecordingPreset::Low,
        }
    }
}

/// Resolved options shared by the session and `take` runners
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub recordings_dir: PathBuf,
    pub preset: RecordingPreset,
    pub plays_in_silent_mode: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "recordings_dir",
    "preset",
    "plays_in_silent_mode",
    "log_level",
];

/// Valid log level values
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
