use std::path::PathBuf;

use serde::Deserialize;

/// Default generation endpoint.
pub const LOUDLY_SONGS_ENDPOINT: &str = "https://soundtracks.loudly.com/api/ai/prompt/songs";

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musicgen-studio/config.toml` or
/// `~/.config/musicgen-studio/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICGEN__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// `LOUDLY_API_KEY` fills `api.api_key` when neither of the above set it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// URL the generation form is POSTed to.
    pub endpoint: String,
    /// Credential sent in the `API-KEY` header. Generation is refused without it.
    pub api_key: Option<String>,
    /// Requested song length in seconds.
    pub duration_secs: u32,
    /// Whole-request timeout (seconds). Generation is slow; keep this generous.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: LOUDLY_SONGS_ENDPOINT.to_string(),
            api_key: None,
            duration_secs: 30,
            timeout_secs: 180,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the saved-track collection lives.
    /// Defaults to `$XDG_DATA_HOME/musicgen-studio/generated_music.json`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Timeout for downloading a track before playback (seconds).
    pub download_timeout_secs: u64,
    /// How often the audio thread refreshes elapsed time (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            download_timeout_secs: 60,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `h` / `l` in the player.
    pub seek_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Line shown under the header on the catalog view.
    pub greeting: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " MusicGen Studio ".to_string(),
            greeting: "Ready to discover your next favorite AI-generated track?".to_string(),
        }
    }
}
