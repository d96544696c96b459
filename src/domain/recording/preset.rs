//! Recording quality presets

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidPresetError;

/// Capture quality preset.
///
/// The recorder picks the supported device configuration closest to the
/// preset's target rate and channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingPreset {
    /// 44.1kHz, up to two channels
    #[default]
    High,
    /// 16kHz mono
    Low,
}

impl RecordingPreset {
    /// All presets
    pub const fn all() -> &'static [RecordingPreset] {
        &[Self::High, Self::Low]
    }

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }

    /// Preferred capture sample rate
    pub const fn sample_rate(&self) -> u32 {
        match self {
            Self::High => 44_100,
            Self::Low => 16_000,
        }
    }

    /// Maximum number of channels written to the file
    pub const fn max_channels(&self) -> u16 {
        match self {
            Self::High => 2,
            Self::Low => 1,
        }
    }
}

impl FromStr for RecordingPreset {
    type Err = InvalidPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "high_quality" => Ok(Self::High),
            "low" | "low_quality" => Ok(Self::Low),
            _ => Err(InvalidPresetError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RecordingPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
