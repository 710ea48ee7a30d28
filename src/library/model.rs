use std::fmt;

use serde::{Deserialize, Serialize};

/// Artist label given to every track produced by the generation API.
pub const GENERATED_ARTIST: &str = "AI Generated";

/// Identifier of a track.
///
/// Built-in tracks use small integers; generated tracks use their creation
/// timestamp (milliseconds) rendered as a string. Both shapes appear in the
/// persisted JSON, so the enum is untagged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(u64),
    Text(String),
}

impl TrackId {
    /// Pick an id for a track created at `now_ms`, unique against `existing`.
    ///
    /// Two saves within the same millisecond get consecutive ids.
    pub fn fresh(existing: &[Track], now_ms: i64) -> Self {
        let latest = existing.iter().filter_map(|t| t.id.as_timestamp()).max();
        let ms = match latest {
            Some(l) if l >= now_ms => l.saturating_add(1),
            _ => now_ms,
        };
        TrackId::Text(ms.to_string())
    }

    fn as_timestamp(&self) -> Option<i64> {
        match self {
            TrackId::Number(n) => i64::try_from(*n).ok(),
            TrackId::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::Number(n) => write!(f, "{n}"),
            TrackId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub audio_url: String,
    pub cover_url: String,
}

impl Track {
    /// Build the record for a freshly generated song.
    pub fn generated(id: TrackId, title: &str, audio_url: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            artist: GENERATED_ARTIST.to_string(),
            audio_url: audio_url.to_string(),
            cover_url: placeholder_cover_url(),
        }
    }

    /// "Artist - Title", or just the title when the artist is blank.
    pub fn display(&self) -> String {
        make_display(&self.title, &self.artist)
    }
}

pub(crate) fn make_display(title: &str, artist: &str) -> String {
    let artist = artist.trim();
    if artist.is_empty() {
        title.to_string()
    } else {
        format!("{} - {}", artist, title)
    }
}

/// Randomized placeholder cover for generated tracks.
pub fn placeholder_cover_url() -> String {
    format!(
        "https://picsum.photos/400/400?random={}",
        rand::random::<u32>()
    )
}
