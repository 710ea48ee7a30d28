//! The playback overlay state machine.
//!
//! `Idle` (no resource) -> `Playing` -> `Paused` -> `Playing` ...; back to
//! `Idle` when the track ends, another track is selected, or the overlay
//! closes. At most one resource is alive at any time, and dropping the
//! `Player` releases it.

use std::time::Duration;

use log::debug;

use crate::library::Track;

use super::types::{PlaybackError, PlaybackInfo, PlaybackState};

/// A live, audio-producing object bound to one track.
pub trait PlaybackResource {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, pos: Duration) -> Result<(), PlaybackError>;
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    /// True once the source has played to its end.
    fn is_finished(&self) -> bool;
    /// Silence the resource. It is dropped right after.
    fn stop(&mut self);
}

/// Creates playback resources from audio URLs.
pub trait PlaybackBackend {
    type Resource: PlaybackResource;

    fn open(&mut self, url: &str) -> Result<Self::Resource, PlaybackError>;
}

pub struct Player<B: PlaybackBackend> {
    backend: B,
    track: Option<Track>,
    resource: Option<B::Resource>,
    state: PlaybackState,
    elapsed: Duration,
    duration: Option<Duration>,
}

impl<B: PlaybackBackend> Player<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            track: None,
            resource: None,
            state: PlaybackState::Idle,
            elapsed: Duration::ZERO,
            duration: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// True when the next `toggle` has to open a resource.
    pub fn needs_open(&self) -> bool {
        self.track.is_some() && self.resource.is_none()
    }

    /// Bind to `track`. A different track releases the current resource first.
    pub fn select(&mut self, track: Track) {
        let same = self
            .track
            .as_ref()
            .is_some_and(|t| t.id == track.id && t.audio_url == track.audio_url);
        if !same {
            self.release();
        }
        self.track = Some(track);
    }

    /// Play/pause. The first call for a track opens its resource.
    pub fn toggle(&mut self) -> Result<PlaybackState, PlaybackError> {
        let Some(track) = self.track.as_ref() else {
            return Ok(self.state);
        };

        match self.state {
            PlaybackState::Idle => {
                let mut resource = self.backend.open(&track.audio_url)?;
                resource.play();
                debug!("opened playback resource for {}", track.audio_url);
                self.duration = resource.duration().or(self.duration);
                self.elapsed = Duration::ZERO;
                self.resource = Some(resource);
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Playing => {
                if let Some(r) = self.resource.as_mut() {
                    r.pause();
                }
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                if let Some(r) = self.resource.as_mut() {
                    r.play();
                }
                self.state = PlaybackState::Playing;
            }
        }

        Ok(self.state)
    }

    /// Move to `target`, clamped to `[0, duration]`. No-op while idle.
    ///
    /// Returns the position actually applied.
    pub fn seek(&mut self, target: Duration) -> Result<Duration, PlaybackError> {
        let Some(resource) = self.resource.as_mut() else {
            return Ok(self.elapsed);
        };

        let clamped = match self.duration {
            Some(d) => target.min(d),
            None => target,
        };
        resource.seek(clamped)?;
        self.elapsed = clamped;
        Ok(clamped)
    }

    /// Seek relative to the current position; negative results clamp to zero.
    pub fn seek_by(&mut self, secs: i64) -> Result<Duration, PlaybackError> {
        let delta = Duration::from_secs(secs.unsigned_abs());
        let target = if secs < 0 {
            self.elapsed.saturating_sub(delta)
        } else {
            self.elapsed.saturating_add(delta)
        };
        self.seek(target)
    }

    /// Pull position and duration from the resource.
    ///
    /// Returns true when the track just finished; the player is then idle
    /// at position zero.
    pub fn tick(&mut self) -> bool {
        let Some(resource) = self.resource.as_ref() else {
            return false;
        };

        if resource.is_finished() {
            self.drop_resource();
            return true;
        }

        if self.duration.is_none() {
            self.duration = resource.duration();
        }
        self.elapsed = resource.position();
        false
    }

    /// Tear down the resource, forgetting its duration.
    pub fn release(&mut self) {
        self.drop_resource();
        self.duration = None;
    }

    /// Release and unbind.
    pub fn close(&mut self) {
        self.release();
        self.track = None;
    }

    pub fn snapshot(&self) -> PlaybackInfo {
        PlaybackInfo {
            track: self.track.as_ref().map(|t| t.id.clone()),
            state: self.state,
            elapsed: self.elapsed,
            duration: self.duration,
            loading: false,
            last_error: None,
        }
    }

    fn drop_resource(&mut self) {
        if let Some(mut r) = self.resource.take() {
            r.stop();
        }
        self.state = PlaybackState::Idle;
        self.elapsed = Duration::ZERO;
    }
}

impl<B: PlaybackBackend> Drop for Player<B> {
    fn drop(&mut self) {
        self.release();
    }
}
