//! Client for the external music-generation API.
//!
//! A `GenerationRequest` is validated, composed into one natural-language
//! prompt and POSTed as a multipart form. The JSON reply is checked against
//! `SongResponse` before anything reaches the UI.

mod client;
mod error;
mod job;
mod request;

pub use client::{LoudlyClient, MusicGenerator};
pub use error::GenerateError;
pub use job::GenerationJob;
pub use request::*;
