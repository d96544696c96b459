//! Playback infrastructure adapters

mod rodio_player;

pub use rodio_player::RodioPlaybackService;
