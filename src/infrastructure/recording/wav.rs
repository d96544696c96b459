//! WAV file output
//!
//! Captured audio is stored as 16-bit integer PCM at the device rate.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::application::ports::RecordingError;

/// Bits per sample written to disk
const BITS_PER_SAMPLE: u16 = 16;

/// Write interleaved PCM samples to a WAV file
pub fn write_wav(
    path: &Path,
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<(), RecordingError> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| RecordingError::WriteFailed(e.to_string()))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| RecordingError::WriteFailed(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| RecordingError::WriteFailed(e.to_string()))
}
