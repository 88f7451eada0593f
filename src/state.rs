//! Core application state, separated from UI logic.
//!
//! `ClientState` holds everything that represents the conversation: the
//! message list, the loading flag, pending typing-delayed replies and the
//! preference progress. UI code receives it as a parameter rather than
//! owning any of it.

use std::time::Instant;

use chrono::Local;

use crate::buffer::{Author, ChatBuffer, ChatMessage};
use crate::logging::{LogEntry, Logger};
use crate::progress::SessionStatus;
use crate::scheduler::{OverlapPolicy, TypingScheduler};

/// First bubble shown when the window opens
pub const GREETING: &str = "Hey there! 👋 I'm Moodify, your music assistant. Let's find the perfect song. What genre are you in the mood for?";

/// Core application state for the chat client.
pub struct ClientState {
    /// Messages currently visible.
    pub buffer: ChatBuffer,

    /// A request is in flight: input and send are disabled.
    pub loading: bool,

    /// Latest preference progress from the backend.
    pub progress: SessionStatus,

    /// Bot replies waiting out their typing delay.
    pub typing: TypingScheduler<ChatMessage>,

    /// Session id, used to tag transcript lines.
    pub session_id: String,

    /// Transcript logger for persisting the conversation to disk.
    pub logger: Option<Logger>,
}

impl ClientState {
    /// Create a new ClientState showing the greeting.
    pub fn new(session_id: impl Into<String>, policy: OverlapPolicy, logger: Option<Logger>) -> Self {
        let mut state = Self {
            buffer: ChatBuffer::new(),
            loading: false,
            progress: SessionStatus::default(),
            typing: TypingScheduler::new(policy),
            session_id: session_id.into(),
            logger,
        };
        state.push_message(ChatMessage::new(timestamp(), Author::Bot, GREETING.to_string()));
        state
    }

    /// Append a message to the conversation and the transcript.
    pub fn push_message(&mut self, msg: ChatMessage) {
        if let Some(logger) = &self.logger {
            logger.log(LogEntry {
                session_id: self.session_id.clone(),
                timestamp: msg.timestamp.clone(),
                author: msg.author.label().to_string(),
                message: msg.text.clone(),
            });
        }
        self.buffer.add_message(msg);
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push_message(ChatMessage::new(timestamp(), Author::User, text.into()));
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        self.push_message(ChatMessage::new(timestamp(), Author::System, text.into()));
    }

    /// Move every reply whose typing delay has elapsed into the buffer.
    /// Returns how many messages were released.
    pub fn release_due(&mut self, now: Instant) -> usize {
        let due = self.typing.take_due(now);
        let released = due.len();
        for mut msg in due {
            // Stamp with the time it actually appears
            msg.timestamp = timestamp();
            self.push_message(msg);
        }
        released
    }

    /// Whether the typing indicator should be shown.
    pub fn is_typing(&self) -> bool {
        self.typing.is_pending()
    }
}

/// Local wall-clock timestamp for a bubble
pub fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_state_greets() {
        let state = ClientState::new("sid", OverlapPolicy::KeepAll, None);
        assert_eq!(state.buffer.len(), 1);
        assert_eq!(state.buffer.messages[0].author, Author::Bot);
        assert_eq!(state.buffer.messages[0].text, GREETING);
        assert!(!state.loading);
        assert!(!state.is_typing());
    }

    #[test]
    fn test_release_due_moves_messages() {
        let mut state = ClientState::new("sid", OverlapPolicy::KeepAll, None);
        let start = Instant::now();
        state.typing.schedule(
            ChatMessage::new(String::new(), Author::Bot, "later".into()),
            Duration::from_millis(500),
            start,
        );
        assert!(state.is_typing());
        assert_eq!(state.release_due(start), 0);
        assert_eq!(state.release_due(start + Duration::from_millis(500)), 1);
        assert!(!state.is_typing());

        let last = state.buffer.messages.last().unwrap();
        assert_eq!(last.text, "later");
        assert!(!last.timestamp.is_empty());
    }
}
