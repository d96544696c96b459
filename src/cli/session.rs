//! Interactive record/stop/play session on stdin

use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::application::ports::{AudioSession, PlaybackService, RecordingService};
use crate::application::{PlayOutcome, RecordPlayController, StartOutcome, StopOutcome};
use crate::domain::recording::PermissionStatus;

use super::app::{build_controller, EXIT_ERROR, EXIT_SUCCESS};
use super::args::SessionOptions;
use super::command::SessionCommand;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Run the interactive session until `quit`, end of input or a shutdown signal.
///
/// Teardown runs on every one of those paths.
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let presenter = Presenter::new();

    let mut shutdown = match ShutdownSignal::install() {
        Ok(shutdown) => shutdown,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let controller = build_controller(&options);
    debug!(dir = %options.recordings_dir.display(), preset = %options.preset, "session starting");

    match controller.initialize().await {
        Ok(PermissionStatus::Granted) => {}
        Ok(status) => presenter.warn(&format!(
            "Microphone permission {}. Recording will retry when you ask for it",
            status
        )),
        Err(e) => presenter.error(&e.to_string()),
    }

    presenter.help();
    presenter.status(&controller.status().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let exit = loop {
        presenter.prompt();
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match line.parse::<SessionCommand>() {
                        Ok(command) => {
                            if !handle_command(&controller, command, &presenter).await {
                                break EXIT_SUCCESS;
                            }
                        }
                        Err(e) => presenter.warn(&e.to_string()),
                    }
                }
                Ok(None) => {
                    // End of input
                    println!();
                    break EXIT_SUCCESS;
                }
                Err(e) => {
                    presenter.error(&format!("Failed to read input: {}", e));
                    break EXIT_ERROR;
                }
            },
            reason = shutdown.recv() => {
                println!();
                if let Some(reason) = reason {
                    presenter.info(&format!("Session {}", reason));
                }
                break EXIT_SUCCESS;
            }
        }
    };

    controller.teardown().await;
    ExitCode::from(exit)
}

/// Run one command and print the status line. Returns false on `quit`.
pub async fn handle_command<R, P, M>(
    controller: &RecordPlayController<R, P, M>,
    command: SessionCommand,
    presenter: &Presenter,
) -> bool
where
    R: RecordingService,
    P: PlaybackService,
    M: AudioSession,
{
    match command {
        SessionCommand::Record => match controller.start_recording().await {
            Ok(StartOutcome::Started) => presenter.success("Recording started"),
            Ok(StartOutcome::PermissionDenied(status)) => presenter.warn(&format!(
                "Microphone permission {}, not recording",
                status
            )),
            Err(e) => presenter.error(&e.to_string()),
        },
        SessionCommand::Stop => match controller.stop_recording().await {
            Ok(StopOutcome::NotRecording) => presenter.info("Not recording"),
            Ok(StopOutcome::Stopped {
                uri: Some(uri),
                duration_ms,
            }) => presenter.success(&format!(
                "Saved {} ({})",
                uri,
                presenter.format_seconds(duration_ms)
            )),
            Ok(StopOutcome::Stopped { uri: None, .. }) => {
                presenter.warn("No audio captured, keeping the previous take")
            }
            Err(e) => presenter.error(&e.to_string()),
        },
        SessionCommand::Play => match controller.play().await {
            Ok(PlayOutcome::NothingToPlay) => presenter.info("Nothing to play yet"),
            Ok(PlayOutcome::Playing(uri)) => {
                presenter.success(&format!("Playing {}", uri.label()))
            }
            Err(e) => presenter.error(&e.to_string()),
        },
        SessionCommand::Status => {}
        SessionCommand::Help => {
            presenter.help();
            return true;
        }
        SessionCommand::Quit => return false,
    }

    presenter.status(&controller.status().await);
    true
}
