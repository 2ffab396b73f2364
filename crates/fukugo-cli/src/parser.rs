//! Main CLI parser and top-level argument handling.

use clap::Parser;

use fukugo_core::TtsSettingsUpdate;

use crate::commands::Commands;

/// Command-line interface for the compound-verb dictionary's audio player.
///
/// Global options override the `FUKUGO_*` environment variables for this
/// invocation.
#[derive(Parser)]
#[command(name = "fukugo")]
#[command(about = "Speak and cache pronunciation audio for Japanese compound verbs")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Voice to synthesize with (e.g. ja-JP-NanamiNeural)
    #[arg(long, global = true)]
    pub voice: Option<String>,

    /// URL of the speech synthesis endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Give up on a synthesis request after this many seconds
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings overrides given on the command line.
    pub fn settings_update(&self) -> TtsSettingsUpdate {
        TtsSettingsUpdate {
            endpoint: self.endpoint.clone(),
            voice: self.voice.clone(),
            timeout_secs: self.timeout_secs.map(Some),
        }
    }
}
