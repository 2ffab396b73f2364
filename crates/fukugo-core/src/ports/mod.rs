//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the playback coordinator expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `sqlx`, `reqwest` or `rodio` types in any signature
//! - Storage and synthesis ports are async; the renderer port is a
//!   synchronous command surface that reports back through events

pub mod blob_store;
pub mod renderer;
pub mod synthesis;

use thiserror::Error;

pub use blob_store::BlobStore;
pub use renderer::{AudioRenderer, RendererError, RendererEvent, RendererEventSink};
pub use synthesis::{SpeechSynthesizer, SynthesisError};

/// Domain-specific errors for storage operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx
/// errors) and gives the cache a single failure type to log.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (database, filesystem, quota, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// The store could not be reached at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
