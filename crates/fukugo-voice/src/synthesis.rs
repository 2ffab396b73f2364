//! HTTP client for the remote synthesis service.
//!
//! Sends `POST {endpoint}` with a JSON body `{ "text": .., "voice": .. }` and
//! expects an `audio/mpeg` payload back. The whole response is buffered; no
//! streaming contract is needed. No retries are performed here.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use fukugo_core::{SpeechSynthesizer, SynthesisError, TtsSettings};

use crate::error::VoiceError;

/// Request body understood by the synthesis service.
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

/// Error body returned by the service on failure (`{"error": "..."}`).
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

/// [`SpeechSynthesizer`] backed by the HTTP synthesis endpoint.
#[derive(Debug, Clone)]
pub struct HttpSynthesisClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpSynthesisClient {
    /// Build a client from settings.
    ///
    /// With no configured timeout the request waits until the service
    /// answers or the connection fails.
    pub fn new(settings: &TtsSettings) -> Result<Self, VoiceError> {
        let endpoint =
            reqwest::Url::parse(&settings.endpoint).map_err(|e| VoiceError::InvalidEndpoint {
                endpoint: settings.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VoiceError::HttpClient(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// The URL requests are sent to.
    pub const fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesisClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::new("text is empty"));
        }

        tracing::debug!(voice, chars = text.chars().count(), endpoint = %self.endpoint, "Requesting synthesis");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SynthesisRequest { text, voice })
            .send()
            .await
            .map_err(|e| SynthesisError::new(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ServiceErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(SynthesisError::new(format!(
                "service returned {status}: {}",
                detail.trim()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        if let Some(ref content_type) = content_type {
            if !content_type.starts_with("audio/") {
                return Err(SynthesisError::new(format!(
                    "expected an audio payload, got '{content_type}'"
                )));
            }
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::new(format!("failed to read audio payload: {e}")))?;

        if audio.is_empty() {
            return Err(SynthesisError::new("service returned an empty audio payload"));
        }

        tracing::debug!(voice, bytes = audio.len(), "Synthesis complete");
        Ok(audio.to_vec())
    }
}
