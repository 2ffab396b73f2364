//! Single-slot playback state machine.
//!
//! The machine is pure: it consumes [`Input`]s and returns the [`Effect`]s the
//! coordinator must carry out. It never touches the cache, the synthesizer or
//! the renderer itself.
//!
//! ```text
//!   Idle ──request──▶ Loading ──Played──▶ Playing ◀──Played── Paused
//!    ▲                  │                   │  └────Paused─────▶ │
//!    └──── failure / Ended / dispose ◀──────┴────────────────────┘
//! ```
//!
//! Every (state × input) pair has a defined transition; ignoring an input is
//! one of them. Acquisition results and renderer events carry the
//! [`SessionId`] they were issued for, and anything not addressed to the live
//! session is dropped.

use fukugo_core::{PlaybackFailure, PlaybackSnapshot, PlaybackState, RendererEvent, SessionId};

// ── Inputs ─────────────────────────────────────────────────────────

/// Input symbols accepted by [`PlaybackMachine::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A control asked for `text` to be spoken in `voice`.
    Request { text: String, voice: String },

    /// Audio for `session` is ready.
    AcquisitionSucceeded { session: SessionId, audio: Vec<u8> },

    /// Acquiring audio for `session` failed.
    AcquisitionFailed {
        session: SessionId,
        failure: PlaybackFailure,
    },

    /// The renderer reported `event` for `session`.
    Renderer {
        session: SessionId,
        event: RendererEvent,
    },

    /// The owner is going away; drop everything.
    Dispose,
}

// ── Effects ────────────────────────────────────────────────────────

/// Side effects requested by the machine, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up or synthesize audio for a new session.
    Acquire {
        session: SessionId,
        text: String,
        voice: String,
    },

    /// Hand acquired audio to the renderer.
    Bind { session: SessionId, audio: Vec<u8> },

    Pause(SessionId),

    Resume(SessionId),

    /// Stop the session and free its renderer resource.
    Release(SessionId),

    /// Surface a failure to observers.
    Failed(PlaybackFailure),
}

// ── Machine ────────────────────────────────────────────────────────

/// The one live session.
#[derive(Debug, Clone)]
struct Slot {
    session: SessionId,
    text: String,
    /// Whether the renderer holds a resource for this session.
    bound: bool,
}

/// Playback state machine with at most one live session.
#[derive(Debug)]
pub struct PlaybackMachine {
    state: PlaybackState,
    slot: Option<Slot>,
    failed: bool,
    next_session: u64,
}

impl Default for PlaybackMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackMachine {
    pub const fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            slot: None,
            failed: false,
            next_session: 1,
        }
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<SessionId> {
        self.slot.as_ref().map(|slot| slot.session)
    }

    /// Observable view of the machine.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            current_text: self.slot.as_ref().map(|slot| slot.text.clone()),
            failed: self.failed,
        }
    }

    /// Apply one input and return the effects to execute.
    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        match input {
            Input::Request { text, voice } => self.on_request(text, voice),
            Input::AcquisitionSucceeded { session, audio } => self.on_acquired(session, audio),
            Input::AcquisitionFailed { session, failure } => {
                self.on_acquisition_failed(session, failure)
            }
            Input::Renderer { session, event } => self.on_renderer(session, &event),
            Input::Dispose => self.on_dispose(),
        }
    }

    fn on_request(&mut self, text: String, voice: String) -> Vec<Effect> {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring request with empty text");
            return Vec::new();
        }

        let same_text = self.slot.as_ref().is_some_and(|slot| slot.text == text);
        if same_text {
            if let Some(session) = self.session() {
                match self.state {
                    PlaybackState::Loading => {
                        tracing::debug!(%session, "Already loading this text, request dropped");
                        return Vec::new();
                    }
                    PlaybackState::Playing => return vec![Effect::Pause(session)],
                    PlaybackState::Paused => return vec![Effect::Resume(session)],
                    PlaybackState::Idle => {}
                }
            }
        }

        let mut effects = self.release_slot();

        let session = SessionId::new(self.next_session);
        self.next_session += 1;

        tracing::debug!(%session, %voice, "Starting acquisition");
        self.slot = Some(Slot {
            session,
            text: text.clone(),
            bound: false,
        });
        self.state = PlaybackState::Loading;
        self.failed = false;

        effects.push(Effect::Acquire {
            session,
            text,
            voice,
        });
        effects
    }

    fn on_acquired(&mut self, session: SessionId, audio: Vec<u8>) -> Vec<Effect> {
        match self.slot.as_mut() {
            Some(slot)
                if slot.session == session
                    && !slot.bound
                    && self.state == PlaybackState::Loading =>
            {
                slot.bound = true;
                vec![Effect::Bind { session, audio }]
            }
            _ => {
                tracing::debug!(%session, "Discarding audio for a superseded session");
                Vec::new()
            }
        }
    }

    fn on_acquisition_failed(
        &mut self,
        session: SessionId,
        failure: PlaybackFailure,
    ) -> Vec<Effect> {
        let pending = self.slot.as_ref().is_some_and(|slot| {
            slot.session == session && !slot.bound && self.state == PlaybackState::Loading
        });
        if !pending {
            tracing::debug!(%session, %failure, "Ignoring failure of a superseded session");
            return Vec::new();
        }

        self.slot = None;
        self.state = PlaybackState::Idle;
        self.failed = true;
        vec![Effect::Failed(failure)]
    }

    fn on_renderer(&mut self, session: SessionId, event: &RendererEvent) -> Vec<Effect> {
        if self.session() != Some(session) {
            tracing::trace!(%session, ?event, "Ignoring event for a stale session");
            return Vec::new();
        }

        match (self.state, event) {
            (PlaybackState::Loading | PlaybackState::Paused, RendererEvent::Played) => {
                self.state = PlaybackState::Playing;
                Vec::new()
            }
            (PlaybackState::Playing, RendererEvent::Paused) => {
                self.state = PlaybackState::Paused;
                Vec::new()
            }
            (PlaybackState::Idle, _)
            | (PlaybackState::Playing, RendererEvent::Played)
            | (PlaybackState::Loading | PlaybackState::Paused, RendererEvent::Paused) => {
                Vec::new()
            }
            (_, RendererEvent::Ended) => {
                let effects = self.release_slot();
                self.state = PlaybackState::Idle;
                effects
            }
            (_, RendererEvent::Failed(reason)) => {
                tracing::warn!(%session, %reason, "Renderer failed");
                let mut effects = self.release_slot();
                self.state = PlaybackState::Idle;
                self.failed = true;
                effects.push(Effect::Failed(PlaybackFailure::Renderer));
                effects
            }
        }
    }

    fn on_dispose(&mut self) -> Vec<Effect> {
        let effects = self.release_slot();
        self.state = PlaybackState::Idle;
        self.failed = false;
        effects
    }

    /// Drop the live session, releasing its renderer resource if bound.
    fn release_slot(&mut self) -> Vec<Effect> {
        match self.slot.take() {
            Some(Slot {
                session,
                bound: true,
                ..
            }) => vec![Effect::Release(session)],
            _ => Vec::new(),
        }
    }
}
