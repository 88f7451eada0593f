//! User input handling: plain messages and slash commands (/reset, /recommend, ...).

use crossbeam_channel::Sender;

use crate::buffer::{Author, ChatMessage};
use crate::events::CONNECTION_APOLOGY;
use crate::protocol::BackendAction;
use crate::state::{timestamp, ClientState};
use crate::validation;

const HELP_TEXT: &str = "Commands:\n\
/recommend <artist or song>  ask for a track like this one\n\
/reset  start over with new preferences\n\
/help  show this list\n\
Anything else is sent to Moodify as a message.";

/// What a line of input turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Shown as a user bubble and sent to the backend
    Send(BackendAction),
    /// Answered locally with a system notice
    Local(String),
}

/// Classify a (non-empty, trimmed) line of input.
pub fn parse_input(text: &str) -> Submission {
    let Some(cmdline) = text.strip_prefix('/') else {
        return Submission::Send(BackendAction::Command(text.to_string()));
    };

    let mut parts = cmdline.trim().splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().map(str::trim).unwrap_or("");

    match cmd.as_str() {
        "reset" | "restart" => Submission::Send(BackendAction::Reset),
        "recommend" | "rec" => {
            if rest.is_empty() {
                Submission::Local("Usage: /recommend <artist or song>".into())
            } else {
                Submission::Send(BackendAction::Recommend(rest.to_string()))
            }
        }
        "help" | "h" | "?" => Submission::Local(HELP_TEXT.into()),
        _ => Submission::Local(format!(
            "Unknown command: /{}. Type /help for a list of commands.",
            cmd
        )),
    }
}

/// Handle a submitted line of input.
///
/// Returns true if the input was consumed (and the input box should be
/// cleared). Empty input is a no-op: nothing is sent and the chat is
/// unchanged. Input is also ignored while a request is in flight.
pub fn handle_user_input(
    input: &str,
    state: &mut ClientState,
    action_tx: &Sender<BackendAction>,
) -> bool {
    if let Err(e) = validation::validate_message(input) {
        if !input.trim().is_empty() {
            state.push_system(e);
        }
        return false;
    }
    if state.loading {
        return false;
    }

    let text = validation::sanitize_message(input);
    match parse_input(&text) {
        Submission::Send(action) => {
            if action == BackendAction::Reset {
                // Replies still typing belong to the old preferences
                state.typing.cancel_all();
            }
            state.push_user(text);
            state.loading = true;
            if action_tx.send(action).is_err() {
                tracing::error!("backend thread is not running");
                state.push_message(ChatMessage::new(
                    timestamp(),
                    Author::Bot,
                    CONNECTION_APOLOGY.to_string(),
                ));
                state.loading = false;
            }
        }
        Submission::Local(notice) => state.push_system(notice),
    }
    true
}
