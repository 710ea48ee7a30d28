//! Playback overlay audio.
//!
//! `Player` is the state machine that owns at most one playback resource.
//! `AudioPlayer` runs a `Player` on a dedicated thread, fed by `AudioCmd`s,
//! and publishes `PlaybackInfo` for the UI.

mod player;
mod sink;
mod state;
mod thread;
mod time;
mod types;

pub use player::AudioPlayer;
pub use time::{format_duration, format_time};
pub use types::*;
