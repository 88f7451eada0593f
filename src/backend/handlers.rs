//! BackendAction dispatch and GuiEvent generation
//!
//! Each action becomes exactly one HTTP request and exactly one event, so
//! the UI can always leave its loading state.

use std::ops::ControlFlow;

use crossbeam_channel::Sender;

use crate::client::{ClientError, RecommenderClient};
use crate::payload::BotPayload;
use crate::protocol::{BackendAction, GuiEvent};
use crate::session::Session;

/// Perform a single backend action and report the outcome to the UI.
///
/// Returns `ControlFlow::Break` when the loop should stop, either because
/// `Shutdown` was requested or the UI side of the channel is gone.
pub async fn handle_backend_action(
    action: BackendAction,
    client: &RecommenderClient,
    session: &Session,
    event_tx: &Sender<GuiEvent>,
) -> ControlFlow<()> {
    let event = match action {
        BackendAction::Command(text) => {
            tracing::info!(chars = text.chars().count(), "sending command");
            reply_event("command", client.command(session, &text).await)
        }
        BackendAction::Recommend(artist_or_song) => {
            tracing::info!(%artist_or_song, "requesting recommendation");
            reply_event("recommend", client.recommend(session, &artist_or_song).await)
        }
        BackendAction::Reset => {
            tracing::info!("resetting session preferences");
            reply_event("reset", client.reset(session).await)
        }
        BackendAction::PollSession => match client.session_status(session).await {
            Ok(status) => GuiEvent::SessionStatus(status),
            Err(e) => {
                tracing::debug!("session status unavailable: {}", e);
                GuiEvent::StatusUnavailable(e.to_string())
            }
        },
        BackendAction::Shutdown => {
            tracing::debug!("backend shutdown requested");
            return ControlFlow::Break(());
        }
    };

    if event_tx.send(event).is_err() {
        // UI has gone away
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

fn reply_event(what: &str, result: Result<BotPayload, ClientError>) -> GuiEvent {
    match result {
        Ok(payload) => GuiEvent::BotReply(payload),
        Err(e) => {
            tracing::warn!("{} request failed: {}", what, e);
            GuiEvent::RequestFailed(e.to_string())
        }
    }
}
