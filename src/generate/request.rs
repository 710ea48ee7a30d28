use std::fmt;

use serde::Deserialize;

use super::error::GenerateError;

/// Genres offered by the generation form.
pub const GENRES: [&str; 6] = ["electronic", "jazz", "classical", "ambient", "rock", "pop"];

/// The user-facing form fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Title,
    Genre,
    Prompt,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "Title",
            Field::Genre => "Genre",
            Field::Prompt => "Prompt",
        })
    }
}

/// What the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub title: String,
    pub genre: String,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(title: &str, genre: &str, prompt: &str) -> Self {
        Self {
            title: title.to_string(),
            genre: genre.to_string(),
            prompt: prompt.to_string(),
        }
    }

    /// Every field must be non-blank.
    pub fn validate(&self) -> Result<(), GenerateError> {
        for (field, value) in [
            (Field::Title, &self.title),
            (Field::Genre, &self.genre),
            (Field::Prompt, &self.prompt),
        ] {
            if value.trim().is_empty() {
                return Err(GenerateError::MissingField(field));
            }
        }
        Ok(())
    }

    /// The instruction string sent as the `prompt` form field.
    pub fn compose_prompt(&self) -> String {
        format!(
            "Create a {} song titled \"{}\". Musical style: {}. High quality production with clear melody and rhythm.",
            self.genre.trim(),
            self.title.trim(),
            self.prompt.trim()
        )
    }
}

/// Raw reply body. Only `music_file_path` matters; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SongResponse {
    #[serde(default)]
    pub music_file_path: Option<String>,
}

impl SongResponse {
    /// Turn the raw body into a song, rejecting a missing or blank path.
    pub fn into_song(self) -> Result<GeneratedSong, GenerateError> {
        match self.music_file_path {
            Some(p) if !p.trim().is_empty() => Ok(GeneratedSong {
                music_file_path: p.trim().to_string(),
            }),
            _ => Err(GenerateError::MissingMusicPath),
        }
    }
}

/// A validated generation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSong {
    pub music_file_path: String,
}
