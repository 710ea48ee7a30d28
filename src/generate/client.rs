use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::blocking::multipart::Form;

use crate::config::ApiSettings;

use super::error::GenerateError;
use super::request::{GeneratedSong, GenerationRequest, SongResponse};

/// Anything that can turn a request into a song.
///
/// `generate` blocks; callers run it off the UI thread.
pub trait MusicGenerator: Send + Sync {
    /// Cheap precondition check done before a request is queued.
    fn check_ready(&self) -> Result<(), GenerateError> {
        Ok(())
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GeneratedSong, GenerateError>;
}

/// Blocking client for the Loudly prompt-to-song endpoint.
pub struct LoudlyClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    duration_secs: u32,
}

impl LoudlyClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, GenerateError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("musicgen-studio/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim().to_string(),
            api_key: settings
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            duration_secs: settings.duration_secs,
        })
    }
}

impl MusicGenerator for LoudlyClient {
    fn check_ready(&self) -> Result<(), GenerateError> {
        if self.api_key.is_none() {
            return Err(GenerateError::MissingApiKey);
        }
        Ok(())
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GeneratedSong, GenerateError> {
        request.validate()?;
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;

        let prompt = request.compose_prompt();
        debug!("requesting song from {}: {}", self.endpoint, prompt);

        let form = Form::new()
            .text("prompt", prompt)
            .text("duration", self.duration_secs.to_string());

        let response = self
            .http
            .post(&self.endpoint)
            .header("API-KEY", api_key)
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text()?;
        let parsed: SongResponse =
            serde_json::from_str(&body).map_err(|e| GenerateError::Malformed(e.to_string()))?;
        let song = parsed.into_song()?;

        info!(
            "generated \"{}\" -> {}",
            request.title.trim(),
            song.music_file_path
        );
        Ok(song)
    }
}
