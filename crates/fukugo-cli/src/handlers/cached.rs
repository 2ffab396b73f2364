//! Cached command handler.

use fukugo_voice::AudioCache;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Report whether audio for `text` in the configured voice is cached, and
/// summarize the cache.
pub async fn execute(ctx: &CliContext, text: &str) -> Result<(), CliError> {
    let key = AudioCache::key(ctx.voice(), text);

    match ctx.cache().lookup(&key).await {
        Some(audio) => println!("cached: {key} ({} bytes)", audio.len()),
        None => println!("not cached: {key}"),
    }

    let entries = ctx
        .store
        .count()
        .await
        .map_err(|e| CliError::Database(e.to_string()))?;
    let bytes = ctx
        .store
        .total_bytes()
        .await
        .map_err(|e| CliError::Database(e.to_string()))?;
    println!("cache: {entries} entries, {bytes} bytes");

    Ok(())
}
