//! `rodio`-backed playback resources.
//!
//! A resource downloads its URL into memory, decodes it and plays it
//! through a `Sink` on the default output stream. Nothing is written to disk.

use std::io::Cursor;
use std::time::Duration;

use log::{error, info, warn};
use reqwest::blocking::Client;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::config::AudioSettings;

use super::state::{PlaybackBackend, PlaybackResource};
use super::types::PlaybackError;

pub struct RodioBackend {
    stream: Result<OutputStream, String>,
    http: Client,
}

impl RodioBackend {
    /// Open the default output device. A missing device is not fatal: every
    /// later `open` reports it instead.
    pub fn open_default(settings: &AudioSettings) -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped, which would
                // scribble over the TUI.
                stream.log_on_drop(false);
                Ok(stream)
            }
            Err(e) => {
                error!("no audio output device: {e}");
                Err(e.to_string())
            }
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.download_timeout_secs))
            .user_agent(format!("musicgen-studio/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { stream, http }
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, PlaybackError> {
        let download = |source: reqwest::Error| PlaybackError::Download {
            url: url.to_string(),
            source,
        };
        let bytes = self
            .http
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(download)?;
        Ok(bytes.to_vec())
    }
}

impl PlaybackBackend for RodioBackend {
    type Resource = RodioResource;

    fn open(&mut self, url: &str) -> Result<RodioResource, PlaybackError> {
        let stream = self
            .stream
            .as_ref()
            .map_err(|e| PlaybackError::NoOutput(e.clone()))?;

        let bytes = self.fetch(url)?;
        info!("downloaded {} bytes from {}", bytes.len(), url);

        let source = decode(&bytes).map_err(|message| PlaybackError::Decode {
            url: url.to_string(),
            message,
        })?;
        let duration = source.total_duration();

        let mixer = stream.mixer().clone();
        let sink = Sink::connect_new(&mixer);
        sink.pause();
        sink.append(source);

        Ok(RodioResource {
            sink,
            mixer,
            bytes,
            duration,
            offset: Duration::ZERO,
        })
    }
}

fn decode(bytes: &[u8]) -> Result<Decoder<Cursor<Vec<u8>>>, String> {
    Decoder::new(Cursor::new(bytes.to_vec())).map_err(|e| e.to_string())
}

pub struct RodioResource {
    sink: Sink,
    mixer: Mixer,
    bytes: Vec<u8>,
    duration: Option<Duration>,
    // Start of the current sink's source; non-zero after a rebuild.
    offset: Duration,
}

impl RodioResource {
    /// Replace the sink with a fresh decode skipped forward to `pos`, for
    /// formats whose decoder cannot seek in place.
    fn rebuild_at(&mut self, pos: Duration) -> Result<(), PlaybackError> {
        let source = decode(&self.bytes).map_err(PlaybackError::Seek)?;
        let paused = self.sink.is_paused();

        let sink = Sink::connect_new(&self.mixer);
        if paused {
            sink.pause();
        }
        sink.append(source.skip_duration(pos));
        self.sink.stop();
        self.sink = sink;
        Ok(())
    }
}

impl PlaybackResource for RodioResource {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek(&mut self, pos: Duration) -> Result<(), PlaybackError> {
        // try_seek on a rebuilt sink would be relative to the skipped start.
        if self.offset.is_zero() && self.sink.try_seek(pos).is_ok() {
            return Ok(());
        }
        match self.rebuild_at(pos) {
            Ok(()) => {
                self.offset = pos;
                Ok(())
            }
            Err(e) => {
                warn!("seek to {:?} failed: {e}", pos);
                Err(e)
            }
        }
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}
