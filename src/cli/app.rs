//! Shared wiring for the session and `take` runners

use std::sync::Arc;

use tracing::warn;

use crate::application::ports::{AudioSession, ConfigStore};
use crate::application::{ControllerConfig, RecordPlayController};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    CpalRecordingService, ProcessAudioMode, RodioPlaybackService, XdgConfigStore,
};

use super::args::SessionOptions;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Controller wired to the real audio adapters
pub type AppController =
    RecordPlayController<CpalRecordingService, RodioPlaybackService, ProcessAudioMode>;

/// Load and merge configuration from file and CLI.
///
/// The CLI config already carries `RECORD_PLAY_RECORDINGS_DIR` (clap reads it
/// when the flag is absent), so the order is defaults < file < env < cli.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

impl SessionOptions {
    /// Resolve runner options from a merged config
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            recordings_dir: config.recordings_dir_or_default(),
            preset: config.preset_or_default(),
            plays_in_silent_mode: config.plays_in_silent_mode_or_default(),
        }
    }
}

/// Build the controller and its adapters
pub fn build_controller(options: &SessionOptions) -> AppController {
    let audio_mode = Arc::new(ProcessAudioMode::new(options.plays_in_silent_mode));
    let recorder_mode: Arc<dyn AudioSession> = audio_mode.clone();

    let recorder = CpalRecordingService::new(&options.recordings_dir, options.preset, recorder_mode);
    let player = RodioPlaybackService::new();

    RecordPlayController::new(
        recorder,
        player,
        audio_mode,
        ControllerConfig {
            plays_in_silent_mode: options.plays_in_silent_mode,
        },
    )
}
