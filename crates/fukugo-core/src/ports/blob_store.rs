//! Persistent blob store port.

use async_trait::async_trait;

use super::RepositoryError;

/// Durable key → binary store that outlives the process.
///
/// # Design Rules
///
/// - Keys are opaque strings (the audio cache passes
///   [`CacheKey`](crate::CacheKey) strings)
/// - `put` on an existing key replaces the value; callers rely on this being
///   idempotent for identical payloads
/// - Implementations must tolerate concurrent writers without client-side
///   locking
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError>;

    /// Store `blob` under `key`.
    async fn put(&self, key: &str, blob: &[u8]) -> Result<(), RepositoryError>;
}
