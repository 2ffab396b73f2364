//! # fukugo-core
//!
//! Domain types and port definitions for the fukugo pronunciation player.
//!
//! The dictionary UI asks for a headword or example sentence to be spoken in
//! a given voice. This crate holds the vocabulary shared by every adapter:
//!
//! - [`domain`] - cache keys, playback state, session tokens, snapshots
//! - [`ports`] - traits for the blob store, the synthesis service and the
//!   audio renderer
//! - [`settings`] - TTS service configuration and validation
//! - [`paths`] - data directory and database location
//!
//! Nothing here performs I/O beyond path resolution; adapters live in
//! `fukugo-db` (persistence) and `fukugo-voice` (HTTP, playback).
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    CACHE_KEY_SEPARATOR, CacheKey, PlaybackFailure, PlaybackSnapshot, PlaybackState, SessionId,
};
pub use paths::{PathError, data_root, database_path};
pub use ports::{
    AudioRenderer, BlobStore, RendererError, RendererEvent, RendererEventSink, RepositoryError,
    SpeechSynthesizer, SynthesisError,
};
pub use settings::{
    DEFAULT_TTS_ENDPOINT, DEFAULT_VOICE, SettingsError, TtsSettings, TtsSettingsUpdate,
    validate_settings,
};
