use thiserror::Error;

use super::request::Field;

/// Everything that can stop a generation request from producing a song.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A form field was left blank
    #[error("{0} is required")]
    MissingField(Field),

    /// No credential configured for the API
    #[error("no API key configured (set LOUDLY_API_KEY)")]
    MissingApiKey,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Body was not the JSON object we expect
    #[error("failed to parse response: {0}")]
    Malformed(String),

    /// Body parsed but carried no usable music file path
    #[error("response did not include a music file path")]
    MissingMusicPath,

    /// The worker thread went away without reporting back
    #[error("generation worker exited without a result")]
    WorkerExited,
}

impl GenerateError {
    /// True for failures caught before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::MissingApiKey)
    }
}
