//! Rodio-based playback service
//!
//! A worker thread owns the output stream and sink (neither is `Send`);
//! the async side talks to it over a channel and waits for each reply.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::ports::{PlaybackError, PlaybackService};
use crate::domain::recording::RecordingUri;

/// How often the worker refreshes the playing flag when idle
const POLL_INTERVAL: Duration = Duration::from_millis(100);

type Reply = oneshot::Sender<Result<(), PlaybackError>>;

enum PlayerCommand {
    Replace(PathBuf, Reply),
    Seek(Duration, Reply),
    Play(Reply),
    Unload(Reply),
}

/// Playback service using rodio on the default output device.
///
/// The device is opened on the first `replace`, so constructing the service
/// never touches audio hardware.
pub struct RodioPlaybackService {
    commands: Sender<PlayerCommand>,
    playing: Arc<AtomicBool>,
}

impl RodioPlaybackService {
    /// Spawn the playback worker
    pub fn new() -> Self {
        let (commands, receiver) = mpsc::channel();
        let playing = Arc::new(AtomicBool::new(false));

        let worker_playing = Arc::clone(&playing);
        std::thread::spawn(move || PlayerWorker::new(worker_playing).run(receiver));

        Self { commands, playing }
    }

    async fn send(
        &self,
        build: impl FnOnce(Reply) -> PlayerCommand,
    ) -> Result<(), PlaybackError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .map_err(|_| PlaybackError::PlaybackFailed("Player thread stopped".to_string()))?;
        response
            .await
            .map_err(|_| PlaybackError::PlaybackFailed("Player thread stopped".to_string()))?
    }
}

impl Default for RodioPlaybackService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaybackService for RodioPlaybackService {
    async fn replace(&self, uri: &RecordingUri) -> Result<(), PlaybackError> {
        let path = uri.to_path();
        self.send(|reply| PlayerCommand::Replace(path, reply)).await
    }

    async fn seek_to(&self, position_ms: u64) -> Result<(), PlaybackError> {
        let position = Duration::from_millis(position_ms);
        self.send(|reply| PlayerCommand::Seek(position, reply)).await
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        self.send(PlayerCommand::Play).await
    }

    async fn unload(&self) -> Result<(), PlaybackError> {
        self.send(PlayerCommand::Unload).await
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

/// State owned by the worker thread
struct PlayerWorker {
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
    playing: Arc<AtomicBool>,
}

impl PlayerWorker {
    fn new(playing: Arc<AtomicBool>) -> Self {
        Self {
            output: None,
            sink: None,
            playing,
        }
    }

    fn run(mut self, commands: Receiver<PlayerCommand>) {
        loop {
            match commands.recv_timeout(POLL_INTERVAL) {
                Ok(command) => self.handle(command),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.playing.store(self.is_playing(), Ordering::SeqCst);
        }
        self.playing.store(false, Ordering::SeqCst);
        debug!("player thread exiting");
    }

    fn handle(&mut self, command: PlayerCommand) {
        let (result, reply) = match command {
            PlayerCommand::Replace(path, reply) => (self.replace(path), reply),
            PlayerCommand::Seek(position, reply) => (self.seek(position), reply),
            PlayerCommand::Play(reply) => (self.play(), reply),
            PlayerCommand::Unload(reply) => (self.unload(), reply),
        };
        if let Err(e) = &result {
            warn!(error = %e, "playback command failed");
        }
        // Publish the new state before the caller resumes
        self.playing.store(self.is_playing(), Ordering::SeqCst);
        let _ = reply.send(result);
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }

    fn output_handle(&mut self) -> Result<&OutputStreamHandle, PlaybackError> {
        if self.output.is_none() {
            let output = OutputStream::try_default()
                .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
            debug!("output stream opened");
            self.output = Some(output);
        }
        match &self.output {
            Some((_, handle)) => Ok(handle),
            None => Err(PlaybackError::DeviceNotAvailable(
                "Output stream missing".to_string(),
            )),
        }
    }

    fn replace(&mut self, path: PathBuf) -> Result<(), PlaybackError> {
        let load_error = |message: String| PlaybackError::LoadFailed {
            uri: path.display().to_string(),
            message,
        };

        let file = File::open(&path).map_err(|e| load_error(e.to_string()))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| load_error(e.to_string()))?;

        // Dropping the previous sink stops whatever it was playing
        self.sink = None;
        let sink = Sink::try_new(self.output_handle()?)
            .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;
        sink.pause();
        sink.append(source);
        self.sink = Some(sink);

        debug!(path = %path.display(), "source loaded");
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        let sink = self.sink.as_ref().ok_or(PlaybackError::NothingLoaded)?;
        sink.try_seek(position)
            .map_err(|e| PlaybackError::SeekFailed(format!("{:?}", e)))
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let sink = self.sink.as_ref().ok_or(PlaybackError::NothingLoaded)?;
        sink.play();
        Ok(())
    }

    fn unload(&mut self) -> Result<(), PlaybackError> {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.output = None;
        Ok(())
    }
}
