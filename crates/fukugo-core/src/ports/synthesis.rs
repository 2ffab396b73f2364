//! Speech synthesis port.

use async_trait::async_trait;
use thiserror::Error;

/// Synthesis failed.
///
/// Network errors, error statuses and malformed payloads all collapse into
/// this one kind; the message is diagnostic only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Speech synthesis failed: {message}")]
pub struct SynthesisError {
    message: String,
}

impl SynthesisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Diagnostic detail.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Converts `(text, voice)` into an encoded audio payload (`audio/mpeg`).
///
/// Implementations perform no retries; a retry is a fresh request from the
/// caller.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` in `voice`.
    ///
    /// `text` is expected to be non-empty and `voice` a recognized voice
    /// identifier such as `"ja-JP-NanamiNeural"`.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = SynthesisError::new("status 500");
        assert_eq!(err.message(), "status 500");
        assert_eq!(err.to_string(), "Speech synthesis failed: status 500");
    }
}
