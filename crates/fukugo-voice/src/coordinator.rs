//! Playback coordinator — async actor that owns the [`PlaybackMachine`].
//!
//! Requests from UI controls, acquisition results and renderer events all
//! funnel into one unbounded channel, so transitions happen one at a time on
//! the actor task. Effects are executed against the [`Acquirer`] and the
//! [`AudioRenderer`]; acquisitions run as separate tasks and report back into
//! the same channel tagged with their [`SessionId`].
//!
//! Observers read the current [`PlaybackSnapshot`] through [`snapshot`] or a
//! [`watch`] receiver, and receive [`PlaybackEvent`]s on the channel returned
//! by [`spawn`].
//!
//! [`snapshot`]: PlaybackCoordinator::snapshot
//! [`spawn`]: PlaybackCoordinator::spawn

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use fukugo_core::{
    AudioRenderer, PlaybackFailure, PlaybackSnapshot, RendererEvent, RendererEventSink, SessionId,
};

use crate::acquire::Acquirer;
use crate::error::VoiceError;
use crate::machine::{Effect, Input, PlaybackMachine};

// ── Events emitted by the coordinator ──────────────────────────────

/// Events emitted to the UI / application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The observable snapshot changed.
    StateChanged(PlaybackSnapshot),

    /// A session ended in failure. The kind is informational; UI bindings
    /// only show a generic indicator.
    Failed(PlaybackFailure),
}

enum Command {
    Input(Input),
    Shutdown(Option<oneshot::Sender<()>>),
}

// ── Handle ─────────────────────────────────────────────────────────

/// Handle to the playback actor.
///
/// Dropping the handle disposes the current session and stops the actor.
#[derive(Debug)]
pub struct PlaybackCoordinator {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Receiver<PlaybackSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl PlaybackCoordinator {
    /// Spawn the actor on the current tokio runtime.
    pub fn spawn(
        acquirer: Acquirer,
        renderer: Arc<dyn AudioRenderer>,
    ) -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot) = watch::channel(PlaybackSnapshot::default());

        let actor = Actor {
            machine: PlaybackMachine::new(),
            acquirer,
            renderer,
            commands: commands.clone(),
            snapshot: snapshot_tx,
            events: event_tx,
        };
        let task = tokio::spawn(actor.run(command_rx));

        (
            Self {
                commands,
                snapshot,
                task: Some(task),
            },
            event_rx,
        )
    }

    /// Ask for `text` to be spoken in `voice`.
    ///
    /// Depending on the current session this starts a new one, pauses or
    /// resumes the current one, or is dropped. Returns once the request is
    /// queued; observe the outcome through snapshots.
    pub fn request(
        &self,
        text: impl Into<String>,
        voice: impl Into<String>,
    ) -> Result<(), VoiceError> {
        self.send(Input::Request {
            text: text.into(),
            voice: voice.into(),
        })
    }

    /// Release any session, return to idle and discard in-flight work.
    pub fn dispose(&self) -> Result<(), VoiceError> {
        self.send(Input::Dispose)
    }

    /// Current observable state.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot.clone()
    }

    /// Dispose and stop the actor, waiting for it to finish.
    pub async fn shutdown(mut self) -> Result<(), VoiceError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.commands
            .send(Command::Shutdown(Some(ack_tx)))
            .map_err(|_| VoiceError::CoordinatorStopped)?;
        ack_rx.await.map_err(|_| VoiceError::CoordinatorStopped)?;

        if let Some(task) = self.task.take() {
            task.await.map_err(|_| VoiceError::CoordinatorStopped)?;
        }
        Ok(())
    }

    fn send(&self, input: Input) -> Result<(), VoiceError> {
        self.commands
            .send(Command::Input(input))
            .map_err(|_| VoiceError::CoordinatorStopped)
    }
}

impl Drop for PlaybackCoordinator {
    fn drop(&mut self) {
        if self.task.is_some() {
            // The actor may already be gone.
            let _ = self.commands.send(Command::Shutdown(None));
        }
    }
}

// ── Actor ──────────────────────────────────────────────────────────

struct Actor {
    machine: PlaybackMachine,
    acquirer: Acquirer,
    renderer: Arc<dyn AudioRenderer>,
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Sender<PlaybackSnapshot>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
}

impl Actor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        tracing::debug!("Playback coordinator started");

        while let Some(command) = commands.recv().await {
            match command {
                Command::Input(input) => self.apply(input),
                Command::Shutdown(ack) => {
                    self.apply(Input::Dispose);
                    if let Some(ack) = ack {
                        let _ = ack.send(());
                    }
                    break;
                }
            }
        }

        tracing::debug!("Playback coordinator stopped");
    }

    /// Feed `input` to the machine, run its effects, and publish the result.
    /// Inputs produced synchronously by effects are applied before returning.
    fn apply(&mut self, input: Input) {
        let mut pending = VecDeque::from([input]);

        while let Some(input) = pending.pop_front() {
            for effect in self.machine.handle(input) {
                if let Some(follow_up) = self.execute(effect) {
                    pending.push_back(follow_up);
                }
            }
            self.publish();
        }
    }

    fn execute(&self, effect: Effect) -> Option<Input> {
        match effect {
            Effect::Acquire {
                session,
                text,
                voice,
            } => {
                self.spawn_acquisition(session, text, voice);
                None
            }
            Effect::Bind { session, audio } => {
                let commands = self.commands.clone();
                let sink = RendererEventSink::new(session, move |session, event| {
                    let _ = commands.send(Command::Input(Input::Renderer { session, event }));
                });

                match self.renderer.bind(audio, sink) {
                    Ok(()) => None,
                    Err(e) => Some(Input::Renderer {
                        session,
                        event: RendererEvent::Failed(e.to_string()),
                    }),
                }
            }
            Effect::Pause(session) => {
                self.renderer.pause(session);
                None
            }
            Effect::Resume(session) => {
                self.renderer.resume(session);
                None
            }
            Effect::Release(session) => {
                self.renderer.release(session);
                None
            }
            Effect::Failed(failure) => {
                tracing::warn!(%failure, "Playback failed");
                let _ = self.events.send(PlaybackEvent::Failed(failure));
                None
            }
        }
    }

    fn spawn_acquisition(&self, session: SessionId, text: String, voice: String) {
        let acquirer = self.acquirer.clone();
        let commands = self.commands.clone();

        tokio::spawn(async move {
            let input = match acquirer.acquire(&text, &voice).await {
                Ok(audio) => {
                    tracing::debug!(
                        %session,
                        origin = ?audio.origin,
                        bytes = audio.bytes.len(),
                        "Audio acquired"
                    );
                    Input::AcquisitionSucceeded {
                        session,
                        audio: audio.bytes,
                    }
                }
                Err(e) => {
                    tracing::warn!(%session, error = %e, "Audio acquisition failed");
                    Input::AcquisitionFailed {
                        session,
                        failure: PlaybackFailure::Synthesis,
                    }
                }
            };
            let _ = commands.send(Command::Input(input));
        });
    }

    fn publish(&self) {
        let snapshot = self.machine.snapshot();
        let changed = self.snapshot.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot.clone();
                true
            }
        });

        if changed {
            tracing::debug!(
                state = %snapshot.state,
                text = ?snapshot.current_text,
                "Playback state changed"
            );
            let _ = self.events.send(PlaybackEvent::StateChanged(snapshot));
        }
    }
}
