//! Error types for audio acquisition and playback.

use fukugo_core::{RendererError, RepositoryError, SynthesisError};

/// Errors that can occur in the audio cache, synthesis client, renderer or
/// coordinator.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// Writing synthesized audio to the cache failed (non-fatal for playback).
    #[error("Failed to cache audio under '{key}': {source}")]
    CacheWrite {
        key: String,
        #[source]
        source: RepositoryError,
    },

    /// The synthesis service failed.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// The renderer rejected a payload.
    #[error(transparent)]
    Renderer(#[from] RendererError),

    /// The configured synthesis endpoint is not a valid URL.
    #[error("Invalid synthesis endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    /// Failed to open the audio output stream.
    #[error("Failed to open audio output stream: {0}")]
    OutputStreamError(String),

    /// The renderer thread exited unexpectedly.
    #[error("Audio renderer thread is not running")]
    RendererThreadDied,

    /// The coordinator task has shut down.
    #[error("Playback coordinator is not running")]
    CoordinatorStopped,
}
