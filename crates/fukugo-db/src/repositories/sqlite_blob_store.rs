//! `SQLite` implementation of the `BlobStore` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use fukugo_core::{BlobStore, RepositoryError};

/// `SQLite` implementation of the `BlobStore` trait.
///
/// Blobs live in the `audio_cache` table, keyed by the cache key string.
pub struct SqliteBlobStore {
    pool: SqlitePool,
}

impl SqliteBlobStore {
    /// Create a new `SQLite` blob store.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of stored blobs.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audio_cache")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Total payload size in bytes.
    pub async fn total_bytes(&self) -> Result<u64, RepositoryError> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(size_bytes), 0) FROM audio_cache")
                .fetch_one(&self.pool)
                .await
                .map_err(storage_error)?;

        Ok(u64::try_from(total).unwrap_or(0))
    }
}

fn storage_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Unavailable(e.to_string())
        }
        other => RepositoryError::Storage(other.to_string()),
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError> {
        sqlx::query_scalar::<_, Vec<u8>>("SELECT audio FROM audio_cache WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)
    }

    async fn put(&self, key: &str, blob: &[u8]) -> Result<(), RepositoryError> {
        let created_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let size = i64::try_from(blob.len()).unwrap_or(i64::MAX);

        sqlx::query(
            "INSERT OR REPLACE INTO audio_cache (key, audio, size_bytes, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(key)
        .bind(blob)
        .bind(size)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        tracing::trace!(key, size, "Stored audio blob");
        Ok(())
    }
}
