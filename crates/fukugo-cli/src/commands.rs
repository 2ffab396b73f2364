//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Speak a word or sentence through the default audio device
    ///
    /// Audio is taken from the cache when available and synthesized
    /// otherwise. Waits until playback finishes; Ctrl-C stops it.
    Speak {
        /// Text to speak
        text: String,
    },

    /// Write the audio for a word or sentence to a file
    Fetch {
        /// Text to synthesize
        text: String,

        /// Destination file (mp3)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Report whether audio for a word or sentence is cached
    Cached {
        /// Text to look up
        text: String,
    },

    /// Show resolved data paths
    Paths,
}
