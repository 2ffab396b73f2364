//! Composition utilities for building `SQLite`-backed stores.
//!
//! This module is focused purely on construction and should not contain any
//! caching or playback logic.

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

use fukugo_core::BlobStore;

use crate::repositories::SqliteBlobStore;
use crate::setup::setup_database;

/// Factory for creating store instances with `SQLite` backends.
pub struct StoreFactory;

impl StoreFactory {
    /// Open the database at `db_path` and build the blob store on it.
    ///
    /// This is the recommended single-step way for adapters to obtain the
    /// audio cache backend.
    pub async fn open_blob_store(db_path: &Path) -> anyhow::Result<Arc<SqliteBlobStore>> {
        let pool = setup_database(db_path).await?;
        Ok(Self::blob_store(pool))
    }

    /// Create a blob store from an existing pool.
    pub fn blob_store(pool: SqlitePool) -> Arc<SqliteBlobStore> {
        Arc::new(SqliteBlobStore::new(pool))
    }

    /// Create a blob store as a trait object.
    pub fn dyn_blob_store(pool: SqlitePool) -> Arc<dyn BlobStore> {
        Self::blob_store(pool)
    }
}
