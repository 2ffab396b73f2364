//! Local audio renderer via `rodio`.
//!
//! `rodio::OutputStream` is `!Send` on some platforms, so the stream lives on
//! a dedicated OS thread for its whole lifetime. [`RodioRenderer`] is the
//! `Send + Sync` proxy: every [`AudioRenderer`] call becomes a command sent to
//! that thread.
//!
//! Each bound session gets its own `Sink`. A watcher thread blocks until the
//! sink drains and reports [`RendererEvent::Ended`], unless the session was
//! released first.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use fukugo_core::{AudioRenderer, RendererError, RendererEvent, RendererEventSink, SessionId};

use crate::error::VoiceError;

// ── Commands ───────────────────────────────────────────────────────

enum RendererCommand {
    Bind {
        audio: Vec<u8>,
        events: RendererEventSink,
        reply: mpsc::Sender<Result<(), RendererError>>,
    },
    Pause(SessionId),
    Resume(SessionId),
    Release(SessionId),
    Shutdown,
}

// ── Handle (Send + Sync proxy) ─────────────────────────────────────

/// [`AudioRenderer`] that plays mp3 payloads on the default output device.
pub struct RodioRenderer {
    cmd_tx: mpsc::Sender<RendererCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl RodioRenderer {
    /// Spawn the renderer thread and open the default output device.
    ///
    /// Fails if no output device is available.
    pub fn spawn() -> Result<Self, VoiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RendererCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), VoiceError>>();

        let thread = thread::Builder::new()
            .name("fukugo-audio".into())
            .spawn(move || run(&cmd_rx, &init_tx))
            .map_err(|e| {
                VoiceError::OutputStreamError(format!("failed to spawn audio thread: {e}"))
            })?;

        init_rx.recv().map_err(|_| VoiceError::RendererThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }
}

impl AudioRenderer for RodioRenderer {
    fn bind(&self, audio: Vec<u8>, events: RendererEventSink) -> Result<(), RendererError> {
        let (reply, reply_rx) = mpsc::channel();
        let thread_gone = || RendererError::Unavailable(VoiceError::RendererThreadDied.to_string());

        self.cmd_tx
            .send(RendererCommand::Bind {
                audio,
                events,
                reply,
            })
            .map_err(|_| thread_gone())?;
        reply_rx.recv().map_err(|_| thread_gone())?
    }

    fn pause(&self, session: SessionId) {
        let _ = self.cmd_tx.send(RendererCommand::Pause(session));
    }

    fn resume(&self, session: SessionId) {
        let _ = self.cmd_tx.send(RendererCommand::Resume(session));
    }

    fn release(&self, session: SessionId) {
        let _ = self.cmd_tx.send(RendererCommand::Release(session));
    }
}

impl Drop for RodioRenderer {
    fn drop(&mut self) {
        // The thread may already be dead.
        let _ = self.cmd_tx.send(RendererCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for RodioRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioRenderer").finish_non_exhaustive()
    }
}

// ── Renderer thread ────────────────────────────────────────────────

/// The session currently owning a sink.
struct ActiveSession {
    events: RendererEventSink,
    sink: Arc<Sink>,
    released: Arc<AtomicBool>,
}

impl ActiveSession {
    fn stop(self) {
        self.released.store(true, Ordering::SeqCst);
        self.sink.stop();
        tracing::debug!(session = %self.events.session(), "Audio session released");
    }
}

/// Body of the renderer thread. Owns the output stream; it never crosses
/// thread boundaries.
fn run(
    cmd_rx: &mpsc::Receiver<RendererCommand>,
    init_tx: &mpsc::Sender<Result<(), VoiceError>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = init_tx.send(Err(VoiceError::OutputStreamError(e.to_string())));
            return;
        }
    };

    if init_tx.send(Ok(())).is_err() {
        return;
    }
    tracing::info!("Audio output initialized on default device");

    let mut active: Option<ActiveSession> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            RendererCommand::Bind {
                audio,
                events,
                reply,
            } => {
                if let Some(previous) = active.take() {
                    previous.stop();
                }
                let result = start(&handle, audio, events).map(|session| {
                    active = Some(session);
                });
                let _ = reply.send(result);
            }

            RendererCommand::Pause(session) => {
                if let Some(current) = active.as_ref().filter(|a| a.events.session() == session) {
                    current.sink.pause();
                    current.events.emit(RendererEvent::Paused);
                }
            }

            RendererCommand::Resume(session) => {
                if let Some(current) = active.as_ref().filter(|a| a.events.session() == session) {
                    current.sink.play();
                    current.events.emit(RendererEvent::Played);
                }
            }

            RendererCommand::Release(session) => {
                if let Some(current) = active.take_if(|a| a.events.session() == session) {
                    current.stop();
                }
            }

            RendererCommand::Shutdown => break,
        }
    }

    if let Some(current) = active.take() {
        current.stop();
    }
    tracing::debug!("Audio thread shutting down");
}

/// Decode `audio`, start playing it on a fresh sink and spawn the watcher
/// that reports natural completion.
fn start(
    handle: &OutputStreamHandle,
    audio: Vec<u8>,
    events: RendererEventSink,
) -> Result<ActiveSession, RendererError> {
    let source = decode(audio)?;
    let sink = Sink::try_new(handle).map_err(|e| RendererError::Unavailable(e.to_string()))?;
    sink.append(source);

    let sink = Arc::new(sink);
    let released = Arc::new(AtomicBool::new(false));

    tracing::debug!(session = %events.session(), "Playback started");
    events.emit(RendererEvent::Played);

    let watcher_sink = Arc::clone(&sink);
    let watcher_released = Arc::clone(&released);
    let watcher_events = events.clone();
    thread::spawn(move || {
        // Returns when the queue drains or the sink is stopped.
        watcher_sink.sleep_until_end();
        if watcher_released.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::debug!(session = %watcher_events.session(), "Playback finished");
        watcher_events.emit(RendererEvent::Ended);
    });

    Ok(ActiveSession {
        events,
        sink,
        released,
    })
}

fn decode(audio: Vec<u8>) -> Result<Decoder<Cursor<Vec<u8>>>, RendererError> {
    if audio.is_empty() {
        return Err(RendererError::Decode("empty payload".to_string()));
    }
    Decoder::new(Cursor::new(audio)).map_err(|e| RendererError::Decode(e.to_string()))
}
