//! Persistence for the user's generated tracks.
//!
//! The collection is a single JSON array of `Track` records. The app only
//! talks to `TrackRepository`; `JsonFileStore` keeps the array in one file
//! on disk and `MemoryStore` keeps it in memory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use thiserror::Error;

use crate::library::Track;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("collection at {} is not a valid track list: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Load/save access to the persisted collection.
pub trait TrackRepository {
    /// Read the whole collection. An absent collection is empty, not an error.
    fn load(&self) -> Result<Vec<Track>, StoreError>;

    /// Replace the whole collection.
    fn save(&self, tracks: &[Track]) -> Result<(), StoreError>;

    /// Read, append `track`, write everything back. Last writer wins.
    ///
    /// Returns the collection as written.
    fn append(&self, track: Track) -> Result<Vec<Track>, StoreError> {
        let mut tracks = self.load()?;
        tracks.push(track);
        self.save(&tracks)?;
        Ok(tracks)
    }

    /// Like `load`, but any failure yields an empty collection.
    fn load_or_empty(&self) -> Vec<Track> {
        match self.load() {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("could not read saved tracks, starting empty: {e}");
                Vec::new()
            }
        }
    }
}

/// Collection stored as a JSON array in one file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TrackRepository for JsonFileStore {
    fn load(&self) -> Result<Vec<Track>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, tracks: &[Track]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let body = serde_json::to_string_pretty(tracks)?;

        // Write next to the target and rename so a crash never leaves half a file.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, body).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;

        debug!("wrote {} tracks to {}", tracks.len(), self.path.display());
        Ok(())
    }
}

/// In-memory collection.
#[derive(Default)]
pub struct MemoryStore {
    tracks: Mutex<Vec<Track>>,
}

impl MemoryStore {
    // A panicking writer cannot leave the Vec half-written, so a poisoned
    // lock still holds a usable collection.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Track>> {
        self.tracks.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Mutex::new(tracks),
        }
    }
}

impl TrackRepository for MemoryStore {
    fn load(&self) -> Result<Vec<Track>, StoreError> {
        Ok(self.lock().clone())
    }

    fn save(&self, tracks: &[Track]) -> Result<(), StoreError> {
        *self.lock() = tracks.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests;
