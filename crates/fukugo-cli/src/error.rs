//! CLI-specific error types and mappings.
//!
//! Maps errors from the core, database and voice crates to exit codes and
//! user-facing messages.

use fukugo_core::{PathError, SettingsError};
use fukugo_voice::VoiceError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The synthesis service failed or returned unusable audio.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// Audio could not be played.
    #[error("Playback failed: {0}")]
    Playback(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,  // EX_USAGE
            Self::Synthesis(_) => 69, // EX_UNAVAILABLE
            Self::Playback(_) => 71,  // EX_OSERR
            Self::Database(_) => 73,  // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,        // EX_IOERR
            Self::Config(_) => 78,    // EX_CONFIG
        }
    }
}

impl From<VoiceError> for CliError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Synthesis(e) => Self::Synthesis(e.message().to_string()),
            VoiceError::CacheWrite { .. } => Self::Database(err.to_string()),
            VoiceError::InvalidEndpoint { .. } | VoiceError::HttpClient(_) => {
                Self::Config(err.to_string())
            }
            VoiceError::Renderer(_)
            | VoiceError::OutputStreamError(_)
            | VoiceError::RendererThreadDied
            | VoiceError::CoordinatorStopped => Self::Playback(err.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use fukugo_core::SynthesisError;

    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Synthesis("x".into()).exit_code(), 69);
        assert_eq!(CliError::Playback("x".into()).exit_code(), 71);
        assert_eq!(CliError::Database("x".into()).exit_code(), 73);
        assert_eq!(CliError::Io("x".into()).exit_code(), 74);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
    }

    #[test]
    fn test_synthesis_error_keeps_service_message() {
        let err: CliError =
            VoiceError::from(SynthesisError::new("service returned 500: TTS generation failed"))
                .into();

        assert!(matches!(err, CliError::Synthesis(_)));
        assert_eq!(
            err.to_string(),
            "Speech synthesis failed: service returned 500: TTS generation failed"
        );
    }

    #[test]
    fn test_voice_error_mapping() {
        let endpoint: CliError = VoiceError::InvalidEndpoint {
            endpoint: "nope".into(),
            reason: "relative URL without a base".into(),
        }
        .into();
        assert_eq!(endpoint.exit_code(), 78);

        let stopped: CliError = VoiceError::CoordinatorStopped.into();
        assert_eq!(stopped.exit_code(), 71);
    }

    #[test]
    fn test_settings_error_is_config() {
        let err: CliError = SettingsError::EmptyVoice.into();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CliError = io.into();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("read-only"));
    }
}
