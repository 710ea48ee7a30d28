//! Audio-related small types and handles.
//!
//! This module defines the commands, shared playback info and errors used
//! by the audio subsystem.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::library::{Track, TrackId};

/// Overlay transport state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No resource exists.
    #[default]
    Idle,
    Playing,
    Paused,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Bind the player to a track, tearing down any resource for another one.
    Select(Track),
    /// Start (creating the resource on first use), pause or resume.
    TogglePlay,
    /// Jump to an absolute position.
    Seek(Duration),
    /// Seek by the specified number of seconds (positive or negative).
    SeekBy(i64),
    /// Release the resource and unbind the track.
    Close,
    /// Release everything and stop the audio thread.
    Quit,
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Track the player is bound to, if any.
    pub track: Option<TrackId>,
    pub state: PlaybackState,
    /// Position within the current resource.
    pub elapsed: Duration,
    /// Total length, once known.
    pub duration: Option<Duration>,
    /// The resource for `track` is being downloaded and decoded.
    pub loading: bool,
    /// Last failure, taken by the UI once shown.
    pub last_error: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device: {0}")]
    NoOutput(String),

    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {url}: {message}")]
    Decode { url: String, message: String },

    #[error("seek failed: {0}")]
    Seek(String),
}
