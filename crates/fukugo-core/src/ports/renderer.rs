//! Audio renderer port — the playable-resource engine.
//!
//! A renderer turns an encoded payload into sound. It is driven by commands
//! (`bind`, `pause`, `resume`, `release`) and reports what actually happened
//! through [`RendererEvent`]s, the way an HTML audio element fires `play`,
//! `pause`, `ended` and `error`. The coordinator's state only moves on those
//! events, never on command return.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::SessionId;

/// Event reported by a renderer for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererEvent {
    /// Playback started or resumed.
    Played,

    /// Playback was paused.
    Paused,

    /// Playback reached the end of the payload.
    Ended,

    /// The renderer failed while playing.
    Failed(String),
}

/// Errors returned synchronously by [`AudioRenderer::bind`].
#[derive(Debug, Error)]
pub enum RendererError {
    /// No output device or the renderer is shut down.
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    /// The payload could not be decoded.
    #[error("Failed to decode audio payload: {0}")]
    Decode(String),
}

type Notify = dyn Fn(SessionId, RendererEvent) + Send + Sync;

/// Callback handle a renderer uses to report events for one session.
///
/// Cloneable so renderers can hand it to background watchers.
#[derive(Clone)]
pub struct RendererEventSink {
    session: SessionId,
    notify: Arc<Notify>,
}

impl RendererEventSink {
    pub fn new(
        session: SessionId,
        notify: impl Fn(SessionId, RendererEvent) + Send + Sync + 'static,
    ) -> Self {
        Self {
            session,
            notify: Arc::new(notify),
        }
    }

    /// Session this sink reports for.
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Report `event` for this sink's session.
    pub fn emit(&self, event: RendererEvent) {
        (self.notify)(self.session, event);
    }
}

impl fmt::Debug for RendererEventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererEventSink")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Backend-agnostic audio renderer.
///
/// All methods take `&self` so the trait is object-safe and shareable as
/// `Arc<dyn AudioRenderer>`. Commands for a session that is not bound (already
/// released, or never bound) are no-ops.
pub trait AudioRenderer: Send + Sync {
    /// Bind `audio` to a new playable resource for `events.session()` and
    /// start playing it.
    ///
    /// A successful return only means the payload was accepted; the
    /// [`RendererEvent::Played`] event signals that playback started.
    fn bind(&self, audio: Vec<u8>, events: RendererEventSink) -> Result<(), RendererError>;

    /// Pause the session. Reports [`RendererEvent::Paused`].
    fn pause(&self, session: SessionId);

    /// Resume the session. Reports [`RendererEvent::Played`].
    fn resume(&self, session: SessionId);

    /// Stop the session and free its resource. No further events are
    /// reported for it.
    fn release(&self, session: SessionId);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn sink_tags_events_with_its_session() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let sink = RendererEventSink::new(SessionId::new(3), move |session, event| {
            log.lock().unwrap().push((session, event));
        });

        let clone = sink.clone();
        sink.emit(RendererEvent::Played);
        clone.emit(RendererEvent::Ended);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (SessionId::new(3), RendererEvent::Played),
                (SessionId::new(3), RendererEvent::Ended),
            ]
        );
        assert_eq!(clone.session(), SessionId::new(3));
    }
}
