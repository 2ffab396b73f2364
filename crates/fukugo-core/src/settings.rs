//! TTS service settings and validation.
//!
//! Pure configuration types. Adapters resolve them from the environment (and
//! a `.env` file) at the composition root and apply command-line overrides
//! through [`TtsSettingsUpdate`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default synthesis endpoint (the dictionary app's `/api/tts` route).
pub const DEFAULT_TTS_ENDPOINT: &str = "http://127.0.0.1:3000/api/tts";

/// Default voice for Japanese headwords and examples.
pub const DEFAULT_VOICE: &str = "ja-JP-NanamiNeural";

/// Environment variable overriding [`TtsSettings::endpoint`].
pub const ENV_TTS_URL: &str = "FUKUGO_TTS_URL";

/// Environment variable overriding [`TtsSettings::voice`].
pub const ENV_VOICE: &str = "FUKUGO_VOICE";

/// Environment variable setting [`TtsSettings::timeout_secs`].
pub const ENV_TTS_TIMEOUT_SECS: &str = "FUKUGO_TTS_TIMEOUT_SECS";

/// Settings for reaching the synthesis service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TtsSettings {
    /// URL the synthesis request is POSTed to.
    pub endpoint: String,

    /// Voice identifier sent with every request.
    pub voice: String,

    /// Request timeout in seconds. `None` waits until the service answers.
    pub timeout_secs: Option<u64>,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TTS_ENDPOINT.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            timeout_secs: None,
        }
    }
}

impl TtsSettings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings from an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut settings = Self::default();
        if let Some(endpoint) = var(ENV_TTS_URL) {
            settings.endpoint = endpoint.trim().to_string();
        }
        if let Some(voice) = var(ENV_VOICE) {
            settings.voice = voice.trim().to_string();
        }
        if let Some(raw) = var(ENV_TTS_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::InvalidTimeout(raw.clone()))?;
            settings.timeout_secs = Some(secs);
        }

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply a partial update, only touching fields that are `Some`.
    pub fn merge(&mut self, update: &TtsSettingsUpdate) {
        if let Some(ref endpoint) = update.endpoint {
            self.endpoint.clone_from(endpoint);
        }
        if let Some(ref voice) = update.voice {
            self.voice.clone_from(voice);
        }
        if let Some(timeout) = update.timeout_secs {
            self.timeout_secs = timeout;
        }
    }
}

/// Partial settings update.
///
/// `timeout_secs` is `Option<Option<u64>>`:
/// - `None` = don't change
/// - `Some(None)` = wait indefinitely
/// - `Some(Some(n))` = time out after `n` seconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtsSettingsUpdate {
    pub endpoint: Option<String>,
    pub voice: Option<String>,
    pub timeout_secs: Option<Option<u64>>,
}

/// Settings validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("TTS endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),

    #[error("Voice identifier cannot be empty")]
    EmptyVoice,

    #[error("Invalid TTS timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Validate settings.
pub fn validate_settings(settings: &TtsSettings) -> Result<(), SettingsError> {
    let endpoint = settings.endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        || endpoint.len() <= "https://".len()
    {
        return Err(SettingsError::InvalidEndpoint(settings.endpoint.clone()));
    }

    if settings.voice.trim().is_empty() {
        return Err(SettingsError::EmptyVoice);
    }

    if settings.timeout_secs == Some(0) {
        return Err(SettingsError::InvalidTimeout("0".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let settings = TtsSettings::default();
        assert_eq!(settings.voice, DEFAULT_VOICE);
        assert_eq!(settings.endpoint, DEFAULT_TTS_ENDPOINT);
        assert!(settings.timeout().is_none());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let settings = TtsSettings::from_lookup(lookup_from(&[
            (ENV_TTS_URL, "https://dict.example/api/tts"),
            (ENV_VOICE, "ja-JP-KeitaNeural"),
            (ENV_TTS_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();

        assert_eq!(settings.endpoint, "https://dict.example/api/tts");
        assert_eq!(settings.voice, "ja-JP-KeitaNeural");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_variables_fall_back_to_defaults() {
        let settings =
            TtsSettings::from_lookup(lookup_from(&[(ENV_VOICE, "  "), (ENV_TTS_URL, "")]))
                .unwrap();
        assert_eq!(settings, TtsSettings::default());
    }

    #[test]
    fn unparsable_timeout_is_rejected() {
        let err =
            TtsSettings::from_lookup(lookup_from(&[(ENV_TTS_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert_eq!(err, SettingsError::InvalidTimeout("soon".to_string()));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad_endpoint = TtsSettings {
            endpoint: "ftp://example".to_string(),
            ..TtsSettings::default()
        };
        assert!(matches!(
            validate_settings(&bad_endpoint),
            Err(SettingsError::InvalidEndpoint(_))
        ));

        let empty_voice = TtsSettings {
            voice: String::new(),
            ..TtsSettings::default()
        };
        assert_eq!(validate_settings(&empty_voice), Err(SettingsError::EmptyVoice));

        let zero_timeout = TtsSettings {
            timeout_secs: Some(0),
            ..TtsSettings::default()
        };
        assert!(matches!(
            validate_settings(&zero_timeout),
            Err(SettingsError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn merge_only_touches_set_fields() {
        let mut settings = TtsSettings {
            timeout_secs: Some(30),
            ..TtsSettings::default()
        };

        settings.merge(&TtsSettingsUpdate {
            voice: Some("ja-JP-AoiNeural".to_string()),
            ..TtsSettingsUpdate::default()
        });
        assert_eq!(settings.voice, "ja-JP-AoiNeural");
        assert_eq!(settings.endpoint, DEFAULT_TTS_ENDPOINT);
        assert_eq!(settings.timeout_secs, Some(30));

        settings.merge(&TtsSettingsUpdate {
            timeout_secs: Some(None),
            ..TtsSettingsUpdate::default()
        });
        assert_eq!(settings.timeout_secs, None);
    }
}
