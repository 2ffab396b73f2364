//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - `SQLite` blob store (via fukugo-db)
//! - Audio cache and HTTP synthesis client (via fukugo-voice)
//! - Playback coordinator and rodio renderer, on demand
//!
//! Command handlers receive the composed [`CliContext`].

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use fukugo_core::{TtsSettings, TtsSettingsUpdate, database_path, validate_settings};
use fukugo_db::{SqliteBlobStore, StoreFactory};
use fukugo_voice::{
    Acquirer, AudioCache, HttpSynthesisClient, PlaybackCoordinator, PlaybackEvent, RodioRenderer,
};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Synthesis service settings.
    pub settings: TtsSettings,
    /// Location of the audio cache database.
    pub database_path: PathBuf,
}

impl CliConfig {
    /// Resolve settings from the environment and the default database path.
    pub fn with_defaults() -> Result<Self, CliError> {
        Ok(Self {
            settings: TtsSettings::from_env()?,
            database_path: database_path()?,
        })
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, update: &TtsSettingsUpdate) -> Result<Self, CliError> {
        self.settings.merge(update);
        validate_settings(&self.settings)?;
        Ok(self)
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Effective synthesis settings.
    pub settings: TtsSettings,
    /// Blob store backing the audio cache.
    pub store: Arc<SqliteBlobStore>,
    /// Cache-first audio acquisition.
    pub acquirer: Acquirer,
}

impl CliContext {
    /// Voice used for every request in this invocation.
    pub fn voice(&self) -> &str {
        &self.settings.voice
    }

    /// The audio cache.
    pub const fn cache(&self) -> &AudioCache {
        self.acquirer.cache()
    }

    /// Start a playback coordinator on the default output device.
    pub fn playback(
        &self,
    ) -> Result<(PlaybackCoordinator, mpsc::UnboundedReceiver<PlaybackEvent>), CliError> {
        let renderer = RodioRenderer::spawn()?;
        Ok(PlaybackCoordinator::spawn(
            self.acquirer.clone(),
            Arc::new(renderer),
        ))
    }
}

/// Bootstrap the CLI application.
///
/// Opens (and migrates) the cache database, then builds the synthesis client
/// and the acquirer on top of it.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let store = StoreFactory::open_blob_store(&config.database_path)
        .await
        .map_err(|e| CliError::Database(format!("{e:#}")))?;

    let synthesizer = HttpSynthesisClient::new(&config.settings)?;
    tracing::debug!(
        endpoint = %synthesizer.endpoint(),
        voice = %config.settings.voice,
        database = %config.database_path.display(),
        "CLI bootstrapped"
    );

    let acquirer = Acquirer::new(AudioCache::new(store.clone()), Arc::new(synthesizer));

    Ok(CliContext {
        settings: config.settings,
        store,
        acquirer,
    })
}
