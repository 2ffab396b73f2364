//! Fetch command handler.
//!
//! Acquires audio through the cache (synthesizing on a miss) and writes it to
//! a file without playing it.

use std::path::Path;

use fukugo_voice::AudioOrigin;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, text: &str, out: &Path) -> Result<(), CliError> {
    if text.trim().is_empty() {
        return Err(CliError::Arguments("text cannot be empty".to_string()));
    }

    let audio = ctx
        .acquirer
        .acquire(text, ctx.voice())
        .await
        .map_err(|e| CliError::Synthesis(e.message().to_string()))?;

    tokio::fs::write(out, &audio.bytes).await?;

    let origin = match audio.origin {
        AudioOrigin::Cache => "from cache",
        AudioOrigin::Synthesized => "synthesized",
    };
    println!(
        "Wrote {} bytes ({origin}) to {}",
        audio.bytes.len(),
        out.display()
    );
    Ok(())
}
