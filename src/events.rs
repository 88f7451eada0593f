//! Backend event processing (bot replies, failures, preference progress).

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::buffer::{Author, ChatMessage};
use crate::markup;
use crate::payload::BotPayload;
use crate::protocol::{BackendAction, GuiEvent};
use crate::render;
use crate::state::{timestamp, ClientState};

/// Shown in place of a reply when the backend cannot be reached
pub const CONNECTION_APOLOGY: &str =
    "⚠️ There was a problem connecting to Moodify. Please try again.";

/// Build the bubble for a bot reply and the delay before it appears.
pub fn reply_message(payload: &BotPayload) -> (ChatMessage, Duration) {
    let reply = render::render(payload);
    let flat = markup::flatten(&reply.text);
    let msg = ChatMessage::new(timestamp(), Author::Bot, flat.text)
        .with_media(reply.media)
        .with_quick_replies(flat.quick_replies);
    (msg, reply.delay)
}

/// Apply one backend event to the state.
///
/// Returns a follow-up action for the backend, if the event calls for one.
pub fn process_single_event(
    state: &mut ClientState,
    event: GuiEvent,
    now: Instant,
) -> Option<BackendAction> {
    match event {
        GuiEvent::BotReply(payload) => {
            let (msg, delay) = reply_message(&payload);
            state.typing.schedule(msg, delay, now);
            state.loading = false;
            // Preferences may have changed; refresh the progress bar
            Some(BackendAction::PollSession)
        }

        GuiEvent::RequestFailed(reason) => {
            tracing::warn!("request failed: {}", reason);
            state.push_message(ChatMessage::new(
                timestamp(),
                Author::Bot,
                CONNECTION_APOLOGY.to_string(),
            ));
            state.loading = false;
            None
        }

        GuiEvent::SessionStatus(status) => {
            tracing::debug!(filled = status.filled_count(), "session progress updated");
            state.progress = status;
            None
        }

        GuiEvent::BackendUnavailable(reason) => {
            tracing::error!("backend unavailable: {}", reason);
            state.push_system(format!("Moodify could not start its network backend: {}", reason));
            state.loading = false;
            None
        }

        GuiEvent::StatusUnavailable(reason) => {
            // Keep the last known progress
            tracing::debug!("keeping previous progress: {}", reason);
            None
        }
    }
}

/// Drain all pending events from the backend, then release due replies.
pub fn process_events(
    state: &mut ClientState,
    event_rx: &Receiver<GuiEvent>,
    action_tx: &Sender<BackendAction>,
    now: Instant,
) {
    while let Ok(event) = event_rx.try_recv() {
        if let Some(action) = process_single_event(state, event, now) {
            let _ = action_tx.send(action);
        }
    }
    state.release_due(now);
}
