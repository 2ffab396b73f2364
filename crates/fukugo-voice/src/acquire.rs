//! Audio acquisition: cache lookup, synthesis on miss, write-back.

use std::sync::Arc;

use fukugo_core::{CacheKey, SpeechSynthesizer, SynthesisError};

use crate::cache::AudioCache;

/// Where acquired audio came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioOrigin {
    /// Served from the persistent cache.
    Cache,

    /// Freshly synthesized (and written back to the cache, best-effort).
    Synthesized,
}

/// Audio ready to be bound to a renderer.
#[derive(Debug, Clone)]
pub struct AcquiredAudio {
    pub key: CacheKey,
    pub bytes: Vec<u8>,
    pub origin: AudioOrigin,
}

/// Turns `(text, voice)` into audio bytes, synthesizing each pair at most
/// once per cache lifetime.
#[derive(Clone)]
pub struct Acquirer {
    cache: AudioCache,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl Acquirer {
    pub fn new(cache: AudioCache, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { cache, synthesizer }
    }

    /// The cache this acquirer reads and fills.
    pub const fn cache(&self) -> &AudioCache {
        &self.cache
    }

    /// Fetch audio for `text` in `voice`.
    ///
    /// A cache write failure after a successful synthesis is logged and
    /// ignored; the fresh bytes are still returned.
    pub async fn acquire(&self, text: &str, voice: &str) -> Result<AcquiredAudio, SynthesisError> {
        let key = AudioCache::key(voice, text);

        if let Some(bytes) = self.cache.lookup(&key).await {
            return Ok(AcquiredAudio {
                key,
                bytes,
                origin: AudioOrigin::Cache,
            });
        }

        let bytes = self.synthesizer.synthesize(text, voice).await?;

        if let Err(e) = self.cache.store(&key, &bytes).await {
            tracing::warn!(error = %e, "Playing synthesized audio without caching it");
        }

        Ok(AcquiredAudio {
            key,
            bytes,
            origin: AudioOrigin::Synthesized,
        })
    }
}

impl std::fmt::Debug for Acquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Acquirer")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use fukugo_core::{BlobStore, RepositoryError};

    use super::*;

    struct CountingSynth {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for CountingSynth {
        async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SynthesisError::new("service returned 500"));
            }
            Ok(format!("{voice}|{text}").into_bytes())
        }
    }

    struct ReadOnlyStore;

    #[async_trait]
    impl BlobStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, RepositoryError> {
            Ok(None)
        }

        async fn put(&self, _key: &str, _blob: &[u8]) -> Result<(), RepositoryError> {
            Err(RepositoryError::Storage("quota exceeded".into()))
        }
    }

    async fn sqlite_cache() -> AudioCache {
        let pool = fukugo_db::setup_test_database().await.unwrap();
        AudioCache::new(fukugo_db::StoreFactory::dyn_blob_store(pool))
    }

    #[tokio::test]
    async fn second_acquire_is_served_from_cache() {
        let synth = Arc::new(CountingSynth {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let acquirer = Acquirer::new(sqlite_cache().await, synth.clone());

        let first = acquirer.acquire("食べる", "ja-JP-NanamiNeural").await.unwrap();
        let second = acquirer.acquire("食べる", "ja-JP-NanamiNeural").await.unwrap();

        assert_eq!(first.origin, AudioOrigin::Synthesized);
        assert_eq!(second.origin, AudioOrigin::Cache);
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.key.as_str(), "ja-JP-NanamiNeural:食べる");
        assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_write_failure_still_returns_audio() {
        let synth = Arc::new(CountingSynth {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let acquirer = Acquirer::new(AudioCache::new(Arc::new(ReadOnlyStore)), synth.clone());

        let audio = acquirer.acquire("言い出す", "ja-JP-NanamiNeural").await.unwrap();
        assert_eq!(audio.bytes, "ja-JP-NanamiNeural|言い出す".as_bytes());

        // Nothing was cached, so the next call synthesizes again.
        acquirer.acquire("言い出す", "ja-JP-NanamiNeural").await.unwrap();
        assert_eq!(synth.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn synthesis_failure_leaves_cache_empty() {
        let synth = Arc::new(CountingSynth {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cache = sqlite_cache().await;
        let acquirer = Acquirer::new(cache.clone(), synth);

        let err = acquirer.acquire("走り回る", "ja-JP-NanamiNeural").await.unwrap_err();
        assert!(err.message().contains("500"));

        let key = AudioCache::key("ja-JP-NanamiNeural", "走り回る");
        assert!(cache.lookup(&key).await.is_none());
    }
}
