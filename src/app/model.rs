//! Application model types: `App`, `View` and `Notice`.
//!
//! The `App` struct holds the catalog, the generation form and the overlay
//! selection. The saved-track repository and the music generator are
//! injected so the model never reaches for global state.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info};

use crate::audio::{PlaybackHandle, PlaybackInfo};
use crate::generate::{GenerateError, GeneratedSong, GenerationJob, MusicGenerator};
use crate::library::{GENERATED_ARTIST, Track, TrackId, placeholder_cover_url};
use crate::store::TrackRepository;

use super::form::CreateForm;

/// Which screen is showing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Catalog,
    Create,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A blocking message. Input is swallowed until it is dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub const GENERATION_FAILED: &str = "Music generation failed";
pub const SAVE_PRECONDITION: &str = "Generate music before saving";
pub const SAVED: &str = "Saved to your collection";

/// Id given to the temporary track used to preview a generated song.
pub const PREVIEW_ID: &str = "preview";

/// The main application model.
pub struct App {
    pub view: View,
    /// Compiled-in demo tracks ("Made for you").
    pub builtin: Vec<Track>,
    /// Saved generated tracks ("Your Creations").
    pub creations: Vec<Track>,
    /// Cursor over `entries()`.
    pub selected: usize,
    /// Track shown in the playback overlay, if open.
    pub overlay: Option<Track>,
    pub form: CreateForm,
    /// A generation request is in flight.
    pub busy: bool,
    pub notice: Option<Notice>,
    pub playback_handle: Option<PlaybackHandle>,

    repository: Box<dyn TrackRepository>,
    generator: Arc<dyn MusicGenerator>,
    pending: Option<GenerationJob>,
}

impl App {
    /// Create the model. The saved collection is read once, here.
    pub fn new(
        builtin: Vec<Track>,
        repository: Box<dyn TrackRepository>,
        generator: Arc<dyn MusicGenerator>,
    ) -> Self {
        let creations = repository.load_or_empty();
        info!(
            "catalog: {} built-in, {} saved tracks",
            builtin.len(),
            creations.len()
        );

        Self {
            view: View::Catalog,
            builtin,
            creations,
            selected: 0,
            overlay: None,
            form: CreateForm::default(),
            busy: false,
            notice: None,
            playback_handle: None,
            repository,
            generator,
            pending: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// All tracks in display order: creations first, then built-ins.
    pub fn entries(&self) -> Vec<&Track> {
        self.creations.iter().chain(self.builtin.iter()).collect()
    }

    pub fn has_tracks(&self) -> bool {
        !self.creations.is_empty() || !self.builtin.is_empty()
    }

    fn entry_count(&self) -> usize {
        self.creations.len() + self.builtin.len()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        let n = self.entry_count();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        let n = self.entry_count();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entry_count().saturating_sub(1);
    }

    /// Open the overlay on the track under the cursor.
    ///
    /// Returns the track so the caller can bind the player to it.
    pub fn select_track(&mut self) -> Option<Track> {
        let track = self.entries().get(self.selected).map(|t| (*t).clone())?;
        self.overlay = Some(track.clone());
        Some(track)
    }

    /// Open the overlay on the last generated (unsaved) song.
    pub fn preview_generated(&mut self) -> Option<Track> {
        let url = self.form.generated_music.clone()?;
        let title = match self.form.title.trim() {
            "" => "Untitled",
            t => t,
        };
        let track = Track {
            id: TrackId::Text(PREVIEW_ID.to_string()),
            title: title.to_string(),
            artist: GENERATED_ARTIST.to_string(),
            audio_url: url,
            cover_url: placeholder_cover_url(),
        };
        self.overlay = Some(track.clone());
        Some(track)
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn open_create(&mut self) {
        self.view = View::Create;
    }

    pub fn open_catalog(&mut self) {
        self.view = View::Catalog;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Save is offered once a song has been generated and nothing is in flight.
    pub fn can_save(&self) -> bool {
        !self.busy && self.form.generated_music.is_some()
    }

    /// Validate the form and send the request on a worker thread.
    ///
    /// Returns false when nothing was sent (busy, or a validation notice).
    pub fn start_generation(&mut self) -> bool {
        if self.busy {
            return false;
        }

        let request = self.form.request();
        if let Err(e) = request.validate().and_then(|_| self.generator.check_ready()) {
            self.notice = Some(Notice::error(e.to_string()));
            return false;
        }

        self.form.generated_music = None;
        self.busy = true;
        self.pending = Some(GenerationJob::spawn(self.generator.clone(), request));
        true
    }

    /// Collect a finished generation, if any. Returns true when one landed.
    pub fn poll_generation(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(|job| job.try_result()) else {
            return false;
        };
        self.pending = None;
        self.finish_generation(result);
        true
    }

    fn finish_generation(&mut self, result: Result<GeneratedSong, GenerateError>) {
        self.busy = false;
        match result {
            Ok(song) => {
                self.form.generated_music = Some(song.music_file_path);
            }
            Err(e) if e.is_validation() => {
                self.notice = Some(Notice::error(e.to_string()));
            }
            Err(e) => {
                error!("generation failed: {e}");
                self.notice = Some(Notice::error(GENERATION_FAILED));
            }
        }
    }

    /// Persist the generated song. Returns true when a record was written.
    pub fn save_generated(&mut self) -> bool {
        let title = self.form.title.trim().to_string();
        let genre = self.form.genre_name().to_string();
        let url = self
            .form
            .generated_music
            .clone()
            .filter(|u| !u.trim().is_empty());

        let Some(url) = url.filter(|_| !title.is_empty() && !genre.is_empty()) else {
            self.notice = Some(Notice::error(SAVE_PRECONDITION));
            return false;
        };

        let id = TrackId::fresh(&self.creations, chrono::Utc::now().timestamp_millis());
        let track = Track::generated(id, &title, &url);

        match self.repository.append(track) {
            Ok(all) => {
                info!("saved \"{}\" ({} in collection)", title, all.len());
                self.creations = all;
                self.notice = Some(Notice::info(SAVED));
                true
            }
            Err(e) => {
                error!("save failed: {e}");
                self.notice = Some(Notice::error(format!("Could not save track: {e}")));
                false
            }
        }
    }

    /// Playback info for the overlay's track, if the player is bound to it.
    pub fn overlay_playback(&self) -> Option<PlaybackInfo> {
        let overlay = self.overlay.as_ref()?;
        let info = self.playback_handle.as_ref()?.lock().ok()?.clone();
        (info.track.as_ref() == Some(&overlay.id)).then_some(info)
    }

    /// Move a playback error published by the audio thread into a notice.
    pub fn take_playback_error(&mut self) {
        let err = self
            .playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().and_then(|mut info| info.last_error.take()));
        if let Some(err) = err {
            self.notice = Some(Notice::error(format!("Playback failed: {err}")));
        }
    }

    /// Absolute seek target for a `0`..`9` key: that many tenths of the track.
    pub fn seek_target_for_digit(&self, digit: u32) -> Option<Duration> {
        let total = self.overlay_playback()?.duration?;
        Some(total.mul_f64(f64::from(digit.min(9)) / 10.0))
    }
}
