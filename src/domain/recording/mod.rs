//! Recording value objects

mod permission;
mod preset;
mod uri;

pub use permission::PermissionStatus;
pub use preset::RecordingPreset;
pub use uri::RecordingUri;
