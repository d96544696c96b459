//! Record/play controller use case

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::mode_guard::RecordingModeGuard;
use super::ports::{
    AudioModeError, AudioSession, PlaybackError, PlaybackService, RecordingError,
    RecordingService,
};
use crate::domain::recording::{PermissionStatus, RecordingUri};
use crate::domain::session::{InvalidStateTransition, Session, SessionState, SessionStatus};
use crate::domain::AudioMode;

/// Errors from the controller
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Audio mode failed: {0}")]
    AudioMode(#[from] AudioModeError),

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Controller settings
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Keep playback audible in silent mode
    pub plays_in_silent_mode: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            plays_in_silent_mode: true,
        }
    }
}

/// Result of `start_recording`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Capture is running
    Started,
    /// Permission still not granted; nothing was touched
    PermissionDenied(PermissionStatus),
}

/// Result of `stop_recording`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// Recorder was not capturing
    NotRecording,
    /// Capture ended. `uri` is `None` when the recorder produced no file.
    Stopped {
        uri: Option<RecordingUri>,
        duration_ms: u64,
    },
}

/// Result of `play`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// No recording exists yet
    NothingToPlay,
    /// Playback restarted from the beginning of this recording
    Playing(RecordingUri),
}

struct ControllerInner<M: AudioSession> {
    session: Session,
    permission_granted: bool,
    last_recording: Option<RecordingUri>,
    mode_guard: Option<RecordingModeGuard<M>>,
}

/// Orchestrates permission checks, the recording lifecycle and playback.
///
/// Every operation holds the state lock for its whole duration, so calls
/// from the UI never interleave.
pub struct RecordPlayController<R, P, M>
where
    R: RecordingService,
    P: PlaybackService,
    M: AudioSession,
{
    recorder: R,
    player: P,
    audio_session: Arc<M>,
    config: ControllerConfig,
    inner: Mutex<ControllerInner<M>>,
}

impl<R, P, M> RecordPlayController<R, P, M>
where
    R: RecordingService,
    P: PlaybackService,
    M: AudioSession,
{
    /// Create a new controller
    pub fn new(recorder: R, player: P, audio_session: Arc<M>, config: ControllerConfig) -> Self {
        Self {
            recorder,
            player,
            audio_session,
            config,
            inner: Mutex::new(ControllerInner {
                session: Session::new(),
                permission_granted: false,
                last_recording: None,
                mode_guard: None,
            }),
        }
    }

    /// Request microphone permission. Call once at session start.
    pub async fn initialize(&self) -> Result<PermissionStatus, ControllerError> {
        let mut inner = self.inner.lock().await;
        let status = self.recorder.request_permission().await?;
        inner.permission_granted = status.is_granted();
        info!(%status, "microphone permission");
        Ok(status)
    }

    /// Start capturing.
    ///
    /// Re-checks permission (without prompting) when it was not granted
    /// earlier. Rejected while already recording.
    pub async fn start_recording(&self) -> Result<StartOutcome, ControllerError> {
        let mut inner = self.inner.lock().await;
        inner.session.ensure_can_start()?;

        if !inner.permission_granted {
            let status = self.recorder.permission_status().await?;
            if !status.is_granted() {
                debug!(%status, "permission not granted, not recording");
                return Ok(StartOutcome::PermissionDenied(status));
            }
            inner.permission_granted = true;
        }

        // Dropped (and the mode restored) if prepare or record fails
        let guard = RecordingModeGuard::enter(
            Arc::clone(&self.audio_session),
            self.config.plays_in_silent_mode,
        )?;
        self.recorder.prepare().await?;
        self.recorder.record().await?;

        inner.session.start_recording()?;
        inner.mode_guard = Some(guard);
        info!("recording started");
        Ok(StartOutcome::Started)
    }

    /// Stop capturing and remember the produced recording. No-op when idle.
    pub async fn stop_recording(&self) -> Result<StopOutcome, ControllerError> {
        let mut inner = self.inner.lock().await;

        if !self.recorder.is_recording() {
            if inner.session.is_recording() {
                warn!("recorder stopped on its own, resetting session");
                inner.session.reset();
                if let Some(guard) = inner.mode_guard.take() {
                    guard.release()?;
                }
            }
            return Ok(StopOutcome::NotRecording);
        }

        if let Err(e) = self.recorder.stop().await {
            // A recorder that went idle anyway cannot be stopped again
            if !self.recorder.is_recording() {
                warn!(error = %e, "recorder failed while stopping, resetting session");
                inner.session.reset();
                if let Some(guard) = inner.mode_guard.take() {
                    if let Err(mode_error) = guard.release() {
                        warn!(error = %mode_error, "failed to restore audio mode");
                    }
                }
            }
            return Err(e.into());
        }

        let uri = self.recorder.uri();
        let duration_ms = self.recorder.duration_ms();
        match &uri {
            Some(uri) => {
                info!(%uri, duration_ms, "recording saved");
                inner.last_recording = Some(uri.clone());
            }
            None => warn!("recorder produced no file, keeping previous recording"),
        }

        if inner.session.is_recording() {
            inner.session.finish_recording()?;
        }
        match inner.mode_guard.take() {
            Some(guard) => guard.release()?,
            None => self
                .audio_session
                .set_mode(AudioMode::playback(self.config.plays_in_silent_mode))?,
        }

        Ok(StopOutcome::Stopped { uri, duration_ms })
    }

    /// Play the last recording from the beginning. No-op when none exists.
    pub async fn play(&self) -> Result<PlayOutcome, ControllerError> {
        let inner = self.inner.lock().await;

        let Some(uri) = inner.last_recording.clone() else {
            debug!("nothing to play");
            return Ok(PlayOutcome::NothingToPlay);
        };
        inner.session.ensure_can_play()?;

        self.player.replace(&uri).await?;
        self.player.seek_to(0).await?;
        self.player.play().await?;

        info!(%uri, "playing");
        Ok(PlayOutcome::Playing(uri))
    }

    /// Release everything held by the session. Safe to call more than once.
    ///
    /// Best effort: each step runs even if an earlier one failed.
    pub async fn teardown(&self) {
        let mut inner = self.inner.lock().await;

        if self.recorder.is_recording() {
            if let Err(e) = self.recorder.stop().await {
                warn!(error = %e, "failed to stop recorder during teardown");
            }
        }
        if let Err(e) = self.player.unload().await {
            warn!(error = %e, "failed to unload player during teardown");
        }

        inner.session.reset();
        if let Some(guard) = inner.mode_guard.take() {
            if let Err(e) = guard.release() {
                warn!(error = %e, "failed to restore audio mode during teardown");
            }
        }
        debug!("session torn down");
    }

    /// Current status line
    pub async fn status(&self) -> SessionStatus {
        let inner = self.inner.lock().await;
        if self.recorder.is_recording() {
            SessionStatus::Recording {
                elapsed_ms: self.recorder.duration_ms(),
            }
        } else if let Some(uri) = inner.last_recording.clone() {
            SessionStatus::Ready { uri }
        } else {
            SessionStatus::Empty
        }
    }

    /// Current session state
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.session.state()
    }

    /// Whether permission has been granted so far
    pub async fn permission_granted(&self) -> bool {
        self.inner.lock().await.permission_granted
    }

    /// Locator of the last successful recording
    pub async fn last_recording(&self) -> Option<RecordingUri> {
        self.inner.lock().await.last_recording.clone()
    }

    /// Check if playback is in progress
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;

    type CallLog = Arc<StdMutex<Vec<&'static str>>>;

    fn calls(log: &CallLog) -> Vec<&'static str> {
        log.lock().unwrap().clone()
    }

    struct MockRecorder {
        log: CallLog,
        recording: AtomicBool,
        request_status: PermissionStatus,
        query_status: StdMutex<PermissionStatus>,
        next_uri: StdMutex<Option<RecordingUri>>,
        uri: StdMutex<Option<RecordingUri>>,
        fail_permission: AtomicBool,
        fail_prepare: AtomicBool,
        fail_stop: AtomicBool,
    }

    impl MockRecorder {
        fn new(log: &CallLog, permission: PermissionStatus) -> Self {
            Self {
                log: Arc::clone(log),
                recording: AtomicBool::new(false),
                request_status: permission,
                query_status: StdMutex::new(permission),
                next_uri: StdMutex::new(RecordingUri::new("/tmp/take-1.wav")),
                uri: StdMutex::new(None),
                fail_permission: AtomicBool::new(false),
                fail_prepare: AtomicBool::new(false),
                fail_stop: AtomicBool::new(false),
            }
        }

        fn push(&self, call: &'static str) {
            self.log.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl RecordingService for MockRecorder {
        async fn request_permission(&self) -> Result<PermissionStatus, RecordingError> {
            self.push("request_permission");
            if self.fail_permission.load(Ordering::SeqCst) {
                return Err(RecordingError::PermissionFailed("mock".into()));
            }
            Ok(self.request_status)
        }

        async fn permission_status(&self) -> Result<PermissionStatus, RecordingError> {
            self.push("permission_status");
            if self.fail_permission.load(Ordering::SeqCst) {
                return Err(RecordingError::PermissionFailed("mock".into()));
            }
            Ok(*self.query_status.lock().unwrap())
        }

        async fn prepare(&self) -> Result<(), RecordingError> {
            self.push("prepare");
            if self.fail_prepare.load(Ordering::SeqCst) {
                return Err(RecordingError::PrepareFailed("mock".into()));
            }
            Ok(())
        }

        async fn record(&self) -> Result<(), RecordingError> {
            self.push("record");
            self.recording.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> Result<(), RecordingError> {
            self.push("stop");
            self.recording.store(false, Ordering::SeqCst);
            if self.fail_stop.load(Ordering::SeqCst) {
                return Err(RecordingError::WriteFailed("disk gone".into()));
            }
            *self.uri.lock().unwrap() = self.next_uri.lock().unwrap().clone();
            Ok(())
        }

        fn is_recording(&self) -> bool {
            self.recording.load(Ordering::SeqCst)
        }

        fn uri(&self) -> Option<RecordingUri> {
            self.uri.lock().unwrap().clone()
        }

        fn duration_ms(&self) -> u64 {
            1_500
        }
    }

    struct MockPlayer {
        log: CallLog,
        playing: AtomicBool,
        fail_unload: AtomicBool,
    }

    #[async_trait]
    impl PlaybackService for MockPlayer {
        async fn replace(&self, _uri: &RecordingUri) -> Result<(), PlaybackError> {
            self.log.lock().unwrap().push("replace");
            self.playing.store(false, Ordering::SeqCst);
            Ok(())
        }

        async fn seek_to(&self, position_ms: u64) -> Result<(), PlaybackError> {
            assert_eq!(position_ms, 0);
            self.log.lock().unwrap().push("seek_to(0)");
            Ok(())
        }

        async fn play(&self) -> Result<(), PlaybackError> {
            self.log.lock().unwrap().push("play");
            self.playing.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn unload(&self) -> Result<(), PlaybackError> {
            self.log.lock().unwrap().push("unload");
            self.playing.store(false, Ordering::SeqCst);
            if self.fail_unload.load(Ordering::SeqCst) {
                return Err(PlaybackError::PlaybackFailed("mock".into()));
            }
            Ok(())
        }

        fn is_playing(&self) -> bool {
            self.playing.load(Ordering::SeqCst)
        }
    }

    struct MockAudioSession {
        modes: StdMutex<Vec<AudioMode>>,
        fail_set_mode: AtomicBool,
    }

    impl AudioSession for MockAudioSession {
        fn set_mode(&self, mode: AudioMode) -> Result<(), AudioModeError> {
            if self.fail_set_mode.load(Ordering::SeqCst) {
                return Err(AudioModeError::SetFailed("mock".into()));
            }
            self.modes.lock().unwrap().push(mode);
            Ok(())
        }

        fn mode(&self) -> AudioMode {
            self.modes
                .lock()
                .unwrap()
                .last()
                .copied()
                .unwrap_or_default()
        }
    }

    type TestController = RecordPlayController<MockRecorder, MockPlayer, MockAudioSession>;

    fn controller(permission: PermissionStatus) -> (TestController, CallLog, Arc<MockAudioSession>) {
        let log: CallLog = Arc::new(StdMutex::new(Vec::new()));
        let audio = Arc::new(MockAudioSession {
            modes: StdMutex::new(Vec::new()),
            fail_set_mode: AtomicBool::new(false),
        });
        let controller = RecordPlayController::new(
            MockRecorder::new(&log, permission),
            MockPlayer {
                log: Arc::clone(&log),
                playing: AtomicBool::new(false),
                fail_unload: AtomicBool::new(false),
            },
            Arc::clone(&audio),
            ControllerConfig::default(),
        );
        (controller, log, audio)
    }

    #[tokio::test]
    async fn initialize_records_permission() {
        let (controller, log, _) = controller(PermissionStatus::Granted);
        let status = controller.initialize().await.unwrap();
        assert_eq!(status, PermissionStatus::Granted);
        assert!(controller.permission_granted().await);
        assert_eq!(calls(&log), vec!["request_permission"]);
    }

    #[tokio::test]
    async fn start_then_stop_saves_uri() {
        let (controller, log, audio) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();

        let started = controller.start_recording().await.unwrap();
        assert_eq!(started, StartOutcome::Started);
        assert_eq!(controller.state().await, SessionState::Recording);
        assert_eq!(audio.mode(), AudioMode::recording(true));

        let stopped = controller.stop_recording().await.unwrap();
        let expected = RecordingUri::new("/tmp/take-1.wav");
        assert_eq!(
            stopped,
            StopOutcome::Stopped {
                uri: expected.clone(),
                duration_ms: 1_500,
            }
        );
        assert_eq!(controller.last_recording().await, expected);
        assert_eq!(controller.state().await, SessionState::Idle);
        assert_eq!(audio.mode(), AudioMode::playback(true));
        assert_eq!(
            calls(&log),
            vec!["request_permission", "prepare", "record", "stop"]
        );
    }

    #[tokio::test]
    async fn stop_when_idle_is_noop() {
        let (controller, log, audio) = controller(PermissionStatus::Granted);

        assert_eq!(
            controller.stop_recording().await.unwrap(),
            StopOutcome::NotRecording
        );
        assert_eq!(
            controller.stop_recording().await.unwrap(),
            StopOutcome::NotRecording
        );
        assert!(calls(&log).is_empty());
        assert!(audio.modes.lock().unwrap().is_empty());
        assert!(controller.last_recording().await.is_none());
    }

    #[tokio::test]
    async fn stop_twice_changes_nothing_the_second_time() {
        let (controller, log, _) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();
        controller.stop_recording().await.unwrap();
        let before = calls(&log);
        let uri = controller.last_recording().await;

        assert_eq!(
            controller.stop_recording().await.unwrap(),
            StopOutcome::NotRecording
        );
        assert_eq!(calls(&log), before);
        assert_eq!(controller.last_recording().await, uri);
    }

    #[tokio::test]
    async fn empty_locator_keeps_previous_recording() {
        let (controller, _, _) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();
        controller.stop_recording().await.unwrap();

        *controller.recorder.next_uri.lock().unwrap() = None;
        controller.start_recording().await.unwrap();
        let stopped = controller.stop_recording().await.unwrap();

        assert_eq!(
            stopped,
            StopOutcome::Stopped {
                uri: None,
                duration_ms: 1_500,
            }
        );
        assert_eq!(
            controller.last_recording().await,
            RecordingUri::new("/tmp/take-1.wav")
        );
    }

    #[tokio::test]
    async fn play_without_recording_is_noop() {
        let (controller, log, _) = controller(PermissionStatus::Granted);
        assert_eq!(controller.play().await.unwrap(), PlayOutcome::NothingToPlay);
        assert!(calls(&log).is_empty());
        assert!(!controller.is_playing());
    }

    #[tokio::test]
    async fn play_seeks_to_start_before_playing() {
        let (controller, log, _) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();
        controller.stop_recording().await.unwrap();
        log.lock().unwrap().clear();

        controller.play().await.unwrap();
        controller.play().await.unwrap();

        assert_eq!(
            calls(&log),
            vec!["replace", "seek_to(0)", "play", "replace", "seek_to(0)", "play"]
        );
        assert!(controller.is_playing());
    }

    #[tokio::test]
    async fn denied_permission_never_records() {
        let (controller, log, audio) = controller(PermissionStatus::Denied);
        controller.initialize().await.unwrap();
        assert!(!controller.permission_granted().await);

        let outcome = controller.start_recording().await.unwrap();
        assert_eq!(outcome, StartOutcome::PermissionDenied(PermissionStatus::Denied));
        assert_eq!(calls(&log), vec!["request_permission", "permission_status"]);
        assert!(audio.modes.lock().unwrap().is_empty());
        assert_eq!(controller.state().await, SessionState::Idle);
    }

    #[tokio::test]
    async fn permission_granted_later_is_picked_up() {
        let (controller, log, _) = controller(PermissionStatus::Denied);
        controller.initialize().await.unwrap();
        *controller.recorder.query_status.lock().unwrap() = PermissionStatus::Granted;

        let outcome = controller.start_recording().await.unwrap();
        assert_eq!(outcome, StartOutcome::Started);
        assert!(controller.permission_granted().await);
        assert_eq!(
            calls(&log),
            vec!["request_permission", "permission_status", "prepare", "record"]
        );
    }

    #[tokio::test]
    async fn failed_prepare_restores_audio_mode() {
        let (controller, _, audio) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.recorder.fail_prepare.store(true, Ordering::SeqCst);

        let err = controller.start_recording().await.unwrap_err();
        assert!(matches!(err, ControllerError::Recording(_)));
        assert_eq!(audio.mode(), AudioMode::playback(true));
        assert_eq!(controller.state().await, SessionState::Idle);
    }

    #[tokio::test]
    async fn start_while_recording_is_rejected() {
        let (controller, _, _) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();

        let err = controller.start_recording().await.unwrap_err();
        assert!(matches!(err, ControllerError::InvalidState(_)));
        assert_eq!(controller.state().await, SessionState::Recording);
    }

    #[tokio::test]
    async fn play_while_recording_is_rejected() {
        let (controller, log, _) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();
        controller.stop_recording().await.unwrap();
        controller.start_recording().await.unwrap();
        log.lock().unwrap().clear();

        let err = controller.play().await.unwrap_err();
        assert!(matches!(err, ControllerError::InvalidState(_)));
        assert!(calls(&log).is_empty());
    }

    #[tokio::test]
    async fn teardown_stops_active_recording() {
        let (controller, log, audio) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();

        controller.teardown().await;

        let log = calls(&log);
        assert_eq!(&log[log.len() - 2..], &["stop", "unload"]);
        assert!(!controller.recorder.is_recording());
        assert_eq!(controller.state().await, SessionState::Idle);
        assert_eq!(audio.mode(), AudioMode::playback(true));
    }

    #[tokio::test]
    async fn teardown_when_idle_only_unloads() {
        let (controller, log, _) = controller(PermissionStatus::Granted);
        controller.teardown().await;
        assert_eq!(calls(&log), vec!["unload"]);
    }

    #[tokio::test]
    async fn lost_recorder_resets_session_on_stop() {
        let (controller, log, audio) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();
        controller.recorder.recording.store(false, Ordering::SeqCst);

        let outcome = controller.stop_recording().await.unwrap();
        assert_eq!(outcome, StopOutcome::NotRecording);
        assert_eq!(controller.state().await, SessionState::Idle);
        assert_eq!(audio.mode(), AudioMode::playback(true));
        assert!(!calls(&log).contains(&"stop"));
    }

    #[tokio::test]
    async fn failed_stop_returns_session_to_idle() {
        let (controller, log, audio) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();
        controller.recorder.fail_stop.store(true, Ordering::SeqCst);

        let err = controller.stop_recording().await.unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Recording(RecordingError::WriteFailed(_))
        ));
        assert_eq!(controller.state().await, SessionState::Idle);
        assert_eq!(audio.mode(), AudioMode::playback(true));
        assert!(controller.last_recording().await.is_none());

        controller.recorder.fail_stop.store(false, Ordering::SeqCst);
        assert_eq!(
            controller.start_recording().await.unwrap(),
            StartOutcome::Started
        );
        assert_eq!(calls(&log).iter().filter(|c| **c == "record").count(), 2);
    }

    #[tokio::test]
    async fn teardown_continues_after_failures() {
        let (controller, log, audio) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.start_recording().await.unwrap();
        controller.recorder.fail_stop.store(true, Ordering::SeqCst);
        controller.player.fail_unload.store(true, Ordering::SeqCst);

        controller.teardown().await;

        let log = calls(&log);
        assert_eq!(&log[log.len() - 2..], &["stop", "unload"]);
        assert_eq!(controller.state().await, SessionState::Idle);
        assert_eq!(audio.mode(), AudioMode::playback(true));
    }

    #[tokio::test]
    async fn audio_mode_failure_skips_prepare() {
        let (controller, log, _) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        controller.audio_session.fail_set_mode.store(true, Ordering::SeqCst);

        let err = controller.start_recording().await.unwrap_err();
        assert!(matches!(err, ControllerError::AudioMode(_)));
        assert!(!calls(&log).contains(&"prepare"));
        assert!(!calls(&log).contains(&"record"));
        assert_eq!(controller.state().await, SessionState::Idle);
    }

    #[tokio::test]
    async fn permission_request_failure_propagates() {
        let (controller, _, _) = controller(PermissionStatus::Granted);
        controller.recorder.fail_permission.store(true, Ordering::SeqCst);

        let err = controller.initialize().await.unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Recording(RecordingError::PermissionFailed(_))
        ));
        assert!(!controller.permission_granted().await);
    }

    #[tokio::test]
    async fn permission_query_failure_propagates_from_start() {
        let (controller, log, audio) = controller(PermissionStatus::Denied);
        controller.initialize().await.unwrap();
        controller.recorder.fail_permission.store(true, Ordering::SeqCst);

        let err = controller.start_recording().await.unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Recording(RecordingError::PermissionFailed(_))
        ));
        assert!(!calls(&log).contains(&"prepare"));
        assert!(audio.modes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_follows_lifecycle() {
        let (controller, _, _) = controller(PermissionStatus::Granted);
        controller.initialize().await.unwrap();
        assert_eq!(controller.status().await, SessionStatus::Empty);

        controller.start_recording().await.unwrap();
        assert_eq!(
            controller.status().await,
            SessionStatus::Recording { elapsed_ms: 1_500 }
        );

        controller.stop_recording().await.unwrap();
        assert_eq!(
            controller.status().await,
            SessionStatus::Ready {
                uri: RecordingUri::new("/tmp/take-1.wav").unwrap()
            }
        );
    }
}
