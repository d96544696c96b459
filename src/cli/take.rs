//! One-shot runner: record for a fixed time, then play the take back

use std::process::ExitCode;
use std::time::Duration;

use tracing::debug;

use crate::application::{ControllerError, PlayOutcome, StartOutcome, StopOutcome};
use crate::domain::recording::RecordingUri;

use super::app::{build_controller, AppController, EXIT_ERROR, EXIT_SUCCESS};
use super::args::SessionOptions;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// How often playback completion is checked
const PLAYBACK_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Record for `seconds`, stop, play back and wait for playback to end.
///
/// A shutdown signal cuts the current phase short; teardown always runs.
pub async fn run_take(options: SessionOptions, seconds: u64) -> ExitCode {
    let presenter = Presenter::new();

    let mut shutdown = match ShutdownSignal::install() {
        Ok(shutdown) => shutdown,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let controller = build_controller(&options);
    let result = take(&controller, &presenter, &mut shutdown, seconds).await;
    controller.teardown().await;

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(message) => {
            presenter.error(&message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn take(
    controller: &AppController,
    presenter: &Presenter,
    shutdown: &mut ShutdownSignal,
    seconds: u64,
) -> Result<(), String> {
    controller.initialize().await.map_err(describe)?;

    match controller.start_recording().await.map_err(describe)? {
        StartOutcome::Started => {}
        StartOutcome::PermissionDenied(status) => {
            return Err(format!("Microphone permission {}, not recording", status));
        }
    }
    presenter.info(&format!(
        "Recording for {}s... (Ctrl-C to stop early)",
        seconds
    ));

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(seconds)) => {}
        reason = shutdown.recv() => {
            debug!(?reason, "recording cut short");
        }
    }

    let uri = match controller.stop_recording().await.map_err(describe)? {
        StopOutcome::Stopped {
            uri: Some(uri),
            duration_ms,
        } => {
            presenter.success(&format!(
                "Saved {} ({})",
                uri,
                presenter.format_seconds(duration_ms)
            ));
            uri
        }
        StopOutcome::Stopped { uri: None, .. } => return Err("No audio captured".to_string()),
        StopOutcome::NotRecording => {
            return Err("Recording ended before it was stopped".to_string())
        }
    };

    play_to_end(controller, presenter, shutdown, &uri).await
}

async fn play_to_end(
    controller: &AppController,
    presenter: &Presenter,
    shutdown: &mut ShutdownSignal,
    uri: &RecordingUri,
) -> Result<(), String> {
    match controller.play().await.map_err(describe)? {
        PlayOutcome::Playing(_) => presenter.info(&format!("Playing {}", uri.label())),
        PlayOutcome::NothingToPlay => return Err("Nothing to play".to_string()),
    }

    loop {
        tokio::select! {
            _ = tokio::time::sleep(PLAYBACK_POLL_INTERVAL) => {
                if !controller.is_playing() {
                    break;
                }
            }
            reason = shutdown.recv() => {
                debug!(?reason, "playback cut short");
                break;
            }
        }
    }

    presenter.success("Done");
    Ok(())
}

fn describe(error: ControllerError) -> String {
    error.to_string()
}
