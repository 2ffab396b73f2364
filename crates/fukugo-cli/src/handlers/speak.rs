//! Speak command handler.
//!
//! Drives a playback coordinator for a single utterance and waits for it to
//! end. Ctrl-C disposes the session.

use fukugo_core::{PlaybackFailure, PlaybackState};
use fukugo_voice::PlaybackEvent;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, text: &str) -> Result<(), CliError> {
    if text.trim().is_empty() {
        return Err(CliError::Arguments("text cannot be empty".to_string()));
    }

    let (coordinator, mut events) = ctx.playback()?;
    coordinator.request(text, ctx.voice())?;

    let mut started = false;
    let outcome = loop {
        let event = tokio::select! {
            event = events.recv() => event,
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Interrupted, stopping playback");
                coordinator.dispose()?;
                break Ok(());
            }
        };

        match event {
            Some(PlaybackEvent::StateChanged(snapshot)) => match snapshot.state_for(text) {
                PlaybackState::Playing if !started => {
                    started = true;
                    println!("Playing: {text}");
                }
                PlaybackState::Idle if started => break Ok(()),
                _ => {}
            },
            Some(PlaybackEvent::Failed(PlaybackFailure::Synthesis)) => {
                break Err(CliError::Synthesis(format!(
                    "could not get audio for '{text}' (run with -v for details)"
                )));
            }
            Some(PlaybackEvent::Failed(PlaybackFailure::Renderer)) => {
                break Err(CliError::Playback(format!("could not play '{text}'")));
            }
            None => break Err(CliError::Playback("coordinator stopped".to_string())),
        }
    };

    coordinator.shutdown().await?;
    outcome
}
