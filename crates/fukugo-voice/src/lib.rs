//! # fukugo-voice
//!
//! Audio acquisition and playback coordination for dictionary entries.
//!
//! ```text
//!   request(text, voice) ─▶ PlaybackCoordinator ─▶ Acquirer ─▶ AudioCache ─▶ BlobStore
//!                                  │                   └──miss──▶ SpeechSynthesizer
//!                                  └──bind / pause / resume / release──▶ AudioRenderer
//! ```
//!
//! - [`cache`] - persistent audio cache over a [`fukugo_core::BlobStore`]
//! - [`synthesis`] - HTTP client for the synthesis service
//! - [`acquire`] - cache-first acquisition with write-back
//! - [`machine`] - pure single-slot playback state machine
//! - [`coordinator`] - async actor driving the machine
//! - `playback` - rodio renderer (feature `playback`)
#![deny(unused_crate_dependencies)]

// Only the integration tests serve HTTP.
#[cfg(test)]
use axum as _;

pub mod acquire;
pub mod cache;
pub mod coordinator;
pub mod error;
pub mod machine;
#[cfg(feature = "playback")]
pub mod playback;
pub mod synthesis;

// Re-export key types for convenience
pub use acquire::{AcquiredAudio, Acquirer, AudioOrigin};
pub use cache::AudioCache;
pub use coordinator::{PlaybackCoordinator, PlaybackEvent};
pub use error::VoiceError;
pub use machine::{Effect, Input, PlaybackMachine};
#[cfg(feature = "playback")]
pub use playback::RodioRenderer;
pub use synthesis::HttpSynthesisClient;
