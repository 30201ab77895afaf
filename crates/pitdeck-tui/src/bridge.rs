use tokio::sync::mpsc;

use pitdeck_core::{DeckFile, DeckSource, LoadedResources};

/// Commands the UI sends to the source task.
#[derive(Debug)]
pub enum SourceCommand {
    /// Fetch the card template and document.
    Load,
    /// Write the given document snapshot back to the source.
    Save(DeckFile),
}

/// Results the source task reports back to the UI loop.
#[derive(Debug)]
pub enum SourceEvent {
    Loaded(LoadedResources),
    LoadFailed { error: String },
    Saved { message: String },
    SaveFailed { error: String },
}

/// Spawn the task that executes source commands sequentially. One command
/// runs at a time, so a save finishes before the next one starts; the UI
/// enforces its own single-in-flight-save rule on top of that.
pub fn spawn_source_task(
    source: DeckSource,
    mut cmd_rx: mpsc::UnboundedReceiver<SourceCommand>,
    event_tx: mpsc::UnboundedSender<SourceEvent>,
) {
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                SourceCommand::Load => match source.load().await {
                    Ok(resources) => {
                        let _ = event_tx.send(SourceEvent::Loaded(resources));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "initial load failed");
                        let _ = event_tx.send(SourceEvent::LoadFailed {
                            error: e.to_string(),
                        });
                    }
                },
                SourceCommand::Save(file) => match source.save(&file).await {
                    Ok(message) => {
                        let _ = event_tx.send(SourceEvent::Saved { message });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "save failed");
                        let _ = event_tx.send(SourceEvent::SaveFailed {
                            error: e.to_string(),
                        });
                    }
                },
            }
        }
    });
}
