//! Domain types for audio caching and playback.

mod cache_key;
mod playback;

pub use cache_key::{CACHE_KEY_SEPARATOR, CacheKey};
pub use playback::{PlaybackFailure, PlaybackSnapshot, PlaybackState, SessionId};
