use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::debug;

use super::client::MusicGenerator;
use super::error::GenerateError;
use super::request::{GeneratedSong, GenerationRequest};

/// One in-flight generation running on its own thread.
///
/// There is no cancellation: dropping the job detaches the worker, which
/// finishes its request and discards the result.
pub struct GenerationJob {
    rx: Receiver<Result<GeneratedSong, GenerateError>>,
}

impl GenerationJob {
    pub fn spawn(generator: Arc<dyn MusicGenerator>, request: GenerationRequest) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = generator.generate(&request);
            if tx.send(result).is_err() {
                debug!("generation finished after its job was dropped");
            }
        });
        Self { rx }
    }

    /// Non-blocking poll. `None` while the request is still running.
    pub fn try_result(&self) -> Option<Result<GeneratedSong, GenerateError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(GenerateError::WorkerExited)),
        }
    }
}
