//! Cross-platform microphone recorder using cpal
//!
//! Each take is captured at the device rate, folded down to the preset's
//! channel count, and written as 16-bit WAV when recording stops.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, SizedSample, StreamConfig};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::wav::write_wav;
use crate::application::ports::{AudioSession, RecordingError, RecordingService};
use crate::domain::recording::{PermissionStatus, RecordingPreset, RecordingUri};

/// How often the capture thread refreshes the elapsed time
const TICK_MS: u64 = 50;

/// Format of the samples collected for one take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CaptureFormat {
    sample_rate: u32,
    channels: u16,
}

/// A take in progress
struct ActiveCapture {
    path: PathBuf,
    samples: Arc<StdMutex<Vec<i16>>>,
    format: CaptureFormat,
    thread: JoinHandle<()>,
}

/// Recording service backed by the default cpal input device.
///
/// The stream lives on its own thread because `cpal::Stream` is not `Send`.
pub struct CpalRecordingService {
    recordings_dir: PathBuf,
    preset: RecordingPreset,
    audio_mode: Arc<dyn AudioSession>,
    prepared: StdMutex<Option<PathBuf>>,
    active: StdMutex<Option<ActiveCapture>>,
    is_recording: Arc<AtomicBool>,
    stream_failed: Arc<AtomicBool>,
    elapsed_ms: Arc<AtomicU64>,
    last_uri: StdMutex<Option<RecordingUri>>,
}

impl CpalRecordingService {
    /// Create a recorder writing takes into `recordings_dir`
    pub fn new(
        recordings_dir: impl Into<PathBuf>,
        preset: RecordingPreset,
        audio_mode: Arc<dyn AudioSession>,
    ) -> Self {
        Self {
            recordings_dir: recordings_dir.into(),
            preset,
            audio_mode,
            prepared: StdMutex::new(None),
            active: StdMutex::new(None),
            is_recording: Arc::new(AtomicBool::new(false)),
            stream_failed: Arc::new(AtomicBool::new(false)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
            last_uri: StdMutex::new(None),
        }
    }

    /// Directory takes are written to
    pub fn recordings_dir(&self) -> &Path {
        &self.recordings_dir
    }

    /// Whether the device stream of the current take reported an error
    pub fn stream_failed(&self) -> bool {
        self.stream_failed.load(Ordering::SeqCst)
    }

    /// Join and drop a take whose stream died without being stopped
    async fn discard_stale_capture(&self) {
        let stale = lock(&self.active).take();
        if let Some(stale) = stale {
            warn!(path = %stale.path.display(), "discarding take from a failed stream");
            let _ = tokio::task::spawn_blocking(move || stale.thread.join()).await;
        }
    }

    /// Desktop platforms never prompt: access means a default input device exists.
    async fn probe_input_device() -> Result<PermissionStatus, RecordingError> {
        tokio::task::spawn_blocking(|| {
            let host = cpal::default_host();
            if host.default_input_device().is_some() {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            }
        })
        .await
        .map_err(|e| RecordingError::PermissionFailed(format!("Task join error: {}", e)))
    }
}

/// File name for a take started at `now`
fn recording_file_name(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("recording-{}.wav", millis)
}

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Rank a supported config range: covering the preset rate first,
/// then the channel count closest to what the preset keeps.
fn config_score(min_rate: u32, max_rate: u32, channels: u16, preset: RecordingPreset) -> (bool, i32) {
    let target = preset.sample_rate();
    let covers_rate = min_rate <= target && max_rate >= target;
    let channel_distance = (i32::from(channels) - i32::from(preset.max_channels())).abs();
    (covers_rate, -channel_distance)
}

/// Closest supported rate to the preset target
fn pick_sample_rate(min_rate: u32, max_rate: u32, target: u32) -> u32 {
    target.max(min_rate).min(max_rate)
}

/// Reduce interleaved frames from `in_channels` to `out_channels`.
///
/// Mono output averages every frame; otherwise the leading channels are kept.
fn fold_channels(data: &[i16], in_channels: u16, out_channels: u16) -> Vec<i16> {
    if in_channels == 0 || out_channels >= in_channels {
        return data.to_vec();
    }

    let in_ch = in_channels as usize;
    if out_channels == 1 {
        data.chunks(in_ch)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect()
    } else {
        data.chunks(in_ch)
            .flat_map(|frame| frame.iter().take(out_channels as usize).copied())
            .collect()
    }
}

fn i16_sample(sample: i16) -> i16 {
    sample
}

fn f32_sample(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

fn select_input_config(
    device: &cpal::Device,
    preset: RecordingPreset,
) -> Result<(StreamConfig, SampleFormat), RecordingError> {
    let supported = device
        .supported_input_configs()
        .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

    let mut best: Option<cpal::SupportedStreamConfigRange> = None;
    for range in supported {
        if !matches!(range.sample_format(), SampleFormat::I16 | SampleFormat::F32) {
            continue;
        }
        let score = config_score(
            range.min_sample_rate().0,
            range.max_sample_rate().0,
            range.channels(),
            preset,
        );
        let is_better = match &best {
            None => true,
            Some(current) => {
                score
                    > config_score(
                        current.min_sample_rate().0,
                        current.max_sample_rate().0,
                        current.channels(),
                        preset,
                    )
            }
        };
        if is_better {
            best = Some(range);
        }
    }

    let range = best.ok_or(RecordingError::StartFailed(
        "No suitable config found".into(),
    ))?;
    let sample_rate = pick_sample_rate(
        range.min_sample_rate().0,
        range.max_sample_rate().0,
        preset.sample_rate(),
    );

    let config = StreamConfig {
        channels: range.channels(),
        sample_rate: SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };
    Ok((config, range.sample_format()))
}

/// Flags shared between the recorder and the stream callbacks
#[derive(Clone)]
struct CaptureFlags {
    is_recording: Arc<AtomicBool>,
    stream_failed: Arc<AtomicBool>,
}

impl CaptureFlags {
    /// The device is gone: stop reporting as recording, keep the samples
    fn mark_failed(&self) {
        self.stream_failed.store(true, Ordering::SeqCst);
        self.is_recording.store(false, Ordering::SeqCst);
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    out_channels: u16,
    samples: Arc<StdMutex<Vec<i16>>>,
    flags: &CaptureFlags,
    convert: fn(T) -> i16,
) -> Result<cpal::Stream, RecordingError>
where
    T: SizedSample + Send + 'static,
{
    let in_channels = config.channels;
    let is_recording = Arc::clone(&flags.is_recording);
    let error_flags = flags.clone();
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if !is_recording.load(Ordering::SeqCst) {
                    return;
                }
                let converted: Vec<i16> = data.iter().map(|&s| convert(s)).collect();
                let folded = fold_channels(&converted, in_channels, out_channels);
                if let Ok(mut buffer) = samples.lock() {
                    buffer.extend_from_slice(&folded);
                }
            },
            move |err| match err {
                cpal::StreamError::DeviceNotAvailable => {
                    warn!("input device lost, capture ended");
                    error_flags.mark_failed();
                }
                other => warn!(error = %other, "audio stream error"),
            },
            None,
        )
        .map_err(|e| RecordingError::StartFailed(e.to_string()))
}

fn open_input_stream(
    preset: RecordingPreset,
    samples: &Arc<StdMutex<Vec<i16>>>,
    flags: &CaptureFlags,
) -> Result<(cpal::Stream, CaptureFormat), RecordingError> {
    let device = cpal::default_host()
        .default_input_device()
        .ok_or(RecordingError::NoAudioDevice)?;
    let (config, sample_format) = select_input_config(&device, preset)?;
    let format = CaptureFormat {
        sample_rate: config.sample_rate.0,
        channels: config.channels.min(preset.max_channels()),
    };

    let stream = match sample_format {
        SampleFormat::I16 => build_stream(
            &device,
            &config,
            format.channels,
            Arc::clone(samples),
            flags,
            i16_sample,
        )?,
        SampleFormat::F32 => build_stream(
            &device,
            &config,
            format.channels,
            Arc::clone(samples),
            flags,
            f32_sample,
        )?,
        _ => {
            return Err(RecordingError::StartFailed(
                "Unsupported sample format".into(),
            ))
        }
    };

    stream
        .play()
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

    debug!(
        sample_rate = format.sample_rate,
        device_channels = config.channels,
        channels = format.channels,
        "input stream opened"
    );
    Ok((stream, format))
}

/// Body of the capture thread: open the stream, report back, then keep it
/// alive until `is_recording` drops.
fn run_capture(
    preset: RecordingPreset,
    samples: Arc<StdMutex<Vec<i16>>>,
    flags: CaptureFlags,
    elapsed_ms: Arc<AtomicU64>,
    ready: oneshot::Sender<Result<CaptureFormat, RecordingError>>,
) {
    let is_recording = Arc::clone(&flags.is_recording);
    let stream = match open_input_stream(preset, &samples, &flags) {
        Ok((stream, format)) => {
            if ready.send(Ok(format)).is_err() {
                is_recording.store(false, Ordering::SeqCst);
                return;
            }
            stream
        }
        Err(e) => {
            is_recording.store(false, Ordering::SeqCst);
            let _ = ready.send(Err(e));
            return;
        }
    };

    let started = Instant::now();
    while is_recording.load(Ordering::SeqCst) {
        elapsed_ms.store(started.elapsed().as_millis() as u64, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(TICK_MS));
    }
    elapsed_ms.store(started.elapsed().as_millis() as u64, Ordering::SeqCst);

    drop(stream);
}

#[async_trait]
impl RecordingService for CpalRecordingService {
    async fn request_permission(&self) -> Result<PermissionStatus, RecordingError> {
        Self::probe_input_device().await
    }

    async fn permission_status(&self) -> Result<PermissionStatus, RecordingError> {
        Self::probe_input_device().await
    }

    async fn prepare(&self) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::PrepareFailed(
                "Recording already in progress".to_string(),
            ));
        }
        if !self.audio_mode.mode().allows_recording {
            return Err(RecordingError::RecordingNotAllowed);
        }
        self.discard_stale_capture().await;

        tokio::fs::create_dir_all(&self.recordings_dir)
            .await
            .map_err(|e| RecordingError::PrepareFailed(e.to_string()))?;

        let path = self
            .recordings_dir
            .join(recording_file_name(SystemTime::now()));
        debug!(path = %path.display(), "recorder prepared");

        *lock(&self.prepared) = Some(path);
        self.elapsed_ms.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn record(&self) -> Result<(), RecordingError> {
        let path = lock(&self.prepared)
            .take()
            .ok_or(RecordingError::NotPrepared)?;

        let samples = Arc::new(StdMutex::new(Vec::new()));
        let (ready_tx, ready_rx) = oneshot::channel();
        self.stream_failed.store(false, Ordering::SeqCst);
        self.is_recording.store(true, Ordering::SeqCst);

        let thread = {
            let preset = self.preset;
            let samples = Arc::clone(&samples);
            let flags = CaptureFlags {
                is_recording: Arc::clone(&self.is_recording),
                stream_failed: Arc::clone(&self.stream_failed),
            };
            let elapsed_ms = Arc::clone(&self.elapsed_ms);
            std::thread::spawn(move || run_capture(preset, samples, flags, elapsed_ms, ready_tx))
        };

        let format = match ready_rx.await {
            Ok(Ok(format)) => format,
            Ok(Err(e)) => {
                self.is_recording.store(false, Ordering::SeqCst);
                return Err(e);
            }
            Err(_) => {
                self.is_recording.store(false, Ordering::SeqCst);
                return Err(RecordingError::StartFailed(
                    "Capture thread exited".to_string(),
                ));
            }
        };

        info!(
            path = %path.display(),
            sample_rate = format.sample_rate,
            channels = format.channels,
            "capture started"
        );
        *lock(&self.active) = Some(ActiveCapture {
            path,
            samples,
            format,
            thread,
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), RecordingError> {
        let active = lock(&self.active).take();
        let Some(active) = active else {
            return Err(RecordingError::StopFailed(
                "No recording in progress".to_string(),
            ));
        };

        self.is_recording.store(false, Ordering::SeqCst);
        if self.stream_failed() {
            warn!("stream failed during capture, keeping what was recorded");
        }

        let ActiveCapture {
            path,
            samples,
            format,
            thread,
        } = active;

        tokio::task::spawn_blocking(move || thread.join())
            .await
            .map_err(|e| RecordingError::StopFailed(format!("Task join error: {}", e)))?
            .map_err(|_| RecordingError::StopFailed("Capture thread panicked".to_string()))?;

        let samples = std::mem::take(&mut *lock(&samples));
        *lock(&self.last_uri) = None;

        if samples.is_empty() {
            warn!("no audio captured, nothing written");
            return Ok(());
        }

        let write_path = path.clone();
        let sample_count = samples.len();
        tokio::task::spawn_blocking(move || {
            write_wav(&write_path, &samples, format.sample_rate, format.channels)
        })
        .await
        .map_err(|e| RecordingError::WriteFailed(format!("Task join error: {}", e)))??;

        info!(
            path = %path.display(),
            samples = sample_count,
            duration_ms = self.elapsed_ms.load(Ordering::SeqCst),
            "capture written"
        );
        *lock(&self.last_uri) = RecordingUri::from_path(&path);
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn uri(&self) -> Option<RecordingUri> {
        lock(&self.last_uri).clone()
    }

    fn duration_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst)
    }
}

impl Drop for CpalRecordingService {
    fn drop(&mut self) {
        // Lets the capture thread release the device
        self.is_recording.store(false, Ordering::SeqCst);
    }
}
