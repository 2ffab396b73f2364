//! # fukugo-db
//!
//! `SQLite` persistence for the audio cache.
//!
//! [`SqliteBlobStore`] implements the [`BlobStore`](fukugo_core::BlobStore)
//! port on a single `audio_cache` table. [`setup_database`] opens (or creates)
//! the database file and ensures the schema exists; entry points call it with
//! the path from [`fukugo_core::database_path`].
#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::StoreFactory;

// Re-export repository implementations
pub use repositories::SqliteBlobStore;

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
