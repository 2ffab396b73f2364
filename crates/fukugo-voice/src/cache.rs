//! Audio cache — the single source of truth for "already synthesized?".
//!
//! Wraps a persistent [`BlobStore`]. Reads never fail from the caller's point
//! of view: a storage error is logged and reported as a miss. Writes report
//! failure, but callers treat it as non-fatal.

use std::sync::Arc;

use fukugo_core::{BlobStore, CacheKey};

use crate::error::VoiceError;

/// Persistent cache of synthesized audio keyed by `(voice, text)`.
#[derive(Clone)]
pub struct AudioCache {
    store: Arc<dyn BlobStore>,
}

impl AudioCache {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Cache key for `text` spoken in `voice`.
    pub fn key(voice: &str, text: &str) -> CacheKey {
        CacheKey::new(voice, text)
    }

    /// Cached audio for `key`, or `None` on a miss.
    pub async fn lookup(&self, key: &CacheKey) -> Option<Vec<u8>> {
        match self.store.get(key.as_str()).await {
            Ok(Some(audio)) => {
                tracing::debug!(%key, bytes = audio.len(), "Audio cache hit");
                Some(audio)
            }
            Ok(None) => {
                tracing::debug!(%key, "Audio cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "Audio cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store `audio` under `key`. Storing identical bytes twice is harmless.
    pub async fn store(&self, key: &CacheKey, audio: &[u8]) -> Result<(), VoiceError> {
        self.store
            .put(key.as_str(), audio)
            .await
            .map_err(|source| VoiceError::CacheWrite {
                key: key.to_string(),
                source,
            })?;

        tracing::debug!(%key, bytes = audio.len(), "Audio cached");
        Ok(())
    }
}

impl std::fmt::Debug for AudioCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use fukugo_core::RepositoryError;
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;

    mock! {
        Store {}

        #[async_trait]
        impl BlobStore for Store {
            async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError>;
            async fn put(&self, key: &str, blob: &[u8]) -> Result<(), RepositoryError>;
        }
    }

    #[tokio::test]
    async fn lookup_uses_voice_colon_text_key() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .with(eq("ja-JP-NanamiNeural:食べる"))
            .times(1)
            .returning(|_| Ok(Some(b"mp3".to_vec())));

        let cache = AudioCache::new(Arc::new(store));
        let key = AudioCache::key("ja-JP-NanamiNeural", "食べる");

        assert_eq!(cache.lookup(&key).await, Some(b"mp3".to_vec()));
    }

    #[tokio::test]
    async fn lookup_treats_storage_error_as_miss() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Err(RepositoryError::Unavailable("database locked".into())));

        let cache = AudioCache::new(Arc::new(store));
        assert!(cache.lookup(&AudioCache::key("v", "t")).await.is_none());
    }

    #[tokio::test]
    async fn store_failure_is_reported_with_key() {
        let mut store = MockStore::new();
        store
            .expect_put()
            .returning(|_, _| Err(RepositoryError::Storage("disk full".into())));

        let cache = AudioCache::new(Arc::new(store));
        let err = cache
            .store(&AudioCache::key("v", "t"), b"mp3")
            .await
            .unwrap_err();

        match err {
            VoiceError::CacheWrite { key, .. } => assert_eq!(key, "v:t"),
            other => panic!("expected CacheWrite, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn store_then_lookup_round_trips() {
        let pool = fukugo_db::setup_test_database().await.unwrap();
        let cache = AudioCache::new(fukugo_db::StoreFactory::dyn_blob_store(pool));
        let key = AudioCache::key("ja-JP-NanamiNeural", "読み上げる");
        let audio: Vec<u8> = (0..2048u32).map(|i| (i % 251) as u8).collect();

        cache.store(&key, &audio).await.unwrap();
        cache.store(&key, &audio).await.unwrap();

        assert_eq!(cache.lookup(&key).await, Some(audio));
    }
}
