//! Configuration value objects

mod app_config;

pub use app_config::{default_recordings_dir, AppConfig, DEFAULT_LOG_LEVEL};
