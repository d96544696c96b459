//! record-play CLI entry point

use std::process::ExitCode;

use clap::Parser;

use record_play::cli::{
    app::{load_merged_config, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_session, run_take, SessionOptions,
};
use record_play::domain::config::AppConfig;
use record_play::domain::recording::RecordingPreset;
use record_play::infrastructure::XdgConfigStore;
use record_play::telemetry;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Build CLI config from args (clap has already folded in the env var)
    let cli_config = AppConfig {
        recordings_dir: cli
            .recordings_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().into_owned()),
        preset: cli.preset.map(|p| RecordingPreset::from(p).to_string()),
        ..Default::default()
    };

    let config = load_merged_config(cli_config).await;
    telemetry::init(cli.verbose, config.log_level_or_default());

    let options = SessionOptions::from_config(&config);

    match cli.command {
        Some(Commands::Take { seconds }) => run_take(options, seconds).await,
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        None => run_session(options).await,
    }
}
