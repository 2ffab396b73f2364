//! Playback state, session tokens and the observable snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Playback state ─────────────────────────────────────────────────

/// State of the single playback slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing loaded or playing.
    #[default]
    Idle,

    /// Audio is being fetched from the cache or synthesized, or the renderer
    /// has been handed the audio but has not reported that it started.
    Loading,

    /// The renderer reported that playback started.
    Playing,

    /// The renderer reported that playback was paused.
    Paused,
}

impl PlaybackState {
    /// Lowercase label, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Session token ──────────────────────────────────────────────────

/// Generation token identifying one acquisition and the session it produces.
///
/// Tokens are handed out in increasing order. An acquisition result or
/// renderer event whose token does not match the coordinator's current
/// session is stale and must not affect state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Failure kind ───────────────────────────────────────────────────

/// Why a session collapsed back to idle.
///
/// Bindings only see the coarse [`PlaybackSnapshot::failed`] flag; the kind
/// is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackFailure {
    /// The synthesis service failed or returned an unusable payload.
    Synthesis,

    /// The renderer rejected the payload or errored during playback.
    Renderer,
}

impl fmt::Display for PlaybackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthesis => f.write_str("synthesis failure"),
            Self::Renderer => f.write_str("renderer failure"),
        }
    }
}

// ── Snapshot ───────────────────────────────────────────────────────

/// Observable playback state published to UI bindings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Global state of the playback slot.
    pub state: PlaybackState,

    /// Text of the current session, if any.
    pub current_text: Option<String>,

    /// Set when the last session ended in a failure; cleared by the next
    /// accepted request.
    pub failed: bool,
}

impl PlaybackSnapshot {
    /// Whether `text` is the utterance the current session belongs to.
    pub fn is_current(&self, text: &str) -> bool {
        self.current_text.as_deref() == Some(text)
    }

    /// State as seen by a control bound to `text`.
    ///
    /// A control for any other text sees [`PlaybackState::Idle`], whatever
    /// the global state is.
    pub fn state_for(&self, text: &str) -> PlaybackState {
        if self.is_current(text) {
            self.state
        } else {
            PlaybackState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_idle_without_text() {
        let snapshot = PlaybackSnapshot::default();
        assert_eq!(snapshot.state, PlaybackState::Idle);
        assert!(snapshot.current_text.is_none());
        assert!(!snapshot.failed);
    }

    #[test]
    fn state_for_other_text_is_idle() {
        let snapshot = PlaybackSnapshot {
            state: PlaybackState::Playing,
            current_text: Some("食べる".to_string()),
            failed: false,
        };

        assert_eq!(snapshot.state_for("食べる"), PlaybackState::Playing);
        assert_eq!(snapshot.state_for("飲み込む"), PlaybackState::Idle);
    }

    #[test]
    fn loading_applies_only_to_requested_text() {
        let snapshot = PlaybackSnapshot {
            state: PlaybackState::Loading,
            current_text: Some("書き込む".to_string()),
            failed: false,
        };

        assert!(snapshot.is_current("書き込む"));
        assert!(!snapshot.is_current("書き込み"));
        assert_eq!(snapshot.state_for("書き込み"), PlaybackState::Idle);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let snapshot = PlaybackSnapshot {
            state: PlaybackState::Paused,
            current_text: Some("走り出す".to_string()),
            failed: false,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "paused");
        assert_eq!(json["currentText"], "走り出す");
        assert_eq!(json["failed"], false);
    }

    #[test]
    fn session_ids_order_by_generation() {
        assert!(SessionId::new(1) < SessionId::new(2));
        assert_eq!(SessionId::new(7).to_string(), "#7");
    }
}
