//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that call into fukugo-voice and format output for the
//!   terminal

pub mod cached;
pub mod fetch;
pub mod paths;
pub mod speak;
