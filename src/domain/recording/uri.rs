//! Recording locator value object

use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque locator of a finished recording.
///
/// Never empty: construction from an empty string yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingUri(String);

impl RecordingUri {
    /// Create a locator, returning `None` for empty or blank input
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Create a locator from a filesystem path
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::new(path.to_string_lossy().into_owned())
    }

    /// Get the raw locator
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the locator as a filesystem path
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Short label for status lines (the file name when there is one)
    pub fn label(&self) -> &str {
        Path::new(&self.0)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for RecordingUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
