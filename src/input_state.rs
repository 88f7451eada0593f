//! Input state management for message composition and history.
//!
//! This module separates input handling concerns from the chat state so
//! the navigation rules can be tested without a window.

use crate::config::MAX_SAVED_HISTORY;

/// Manages all input-related state for the chat window.
#[derive(Default, Debug)]
pub struct InputState {
    /// Current message being composed
    pub message_input: String,

    /// Sent message history (for up/down arrow navigation)
    pub history: Vec<String>,

    /// Current position in history (None = not navigating)
    pub history_pos: Option<usize>,

    /// Saved input when entering history mode
    pub history_saved_input: Option<String>,
}

impl InputState {
    /// Create a new InputState with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an InputState restoring previously saved history.
    pub fn with_history(history: Vec<String>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    /// Step back through history (ArrowUp).
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self.history_pos {
            None => {
                // store current text to restore if user navigates back
                self.history_saved_input = Some(self.message_input.clone());
                self.history_pos = Some(self.history.len() - 1);
            }
            Some(pos) if pos > 0 => self.history_pos = Some(pos - 1),
            Some(_) => {}
        }
        if let Some(h) = self.history_pos.and_then(|pos| self.history.get(pos)) {
            self.message_input = h.clone();
        }
    }

    /// Step forward through history (ArrowDown), restoring the draft at the end.
    pub fn history_next(&mut self) {
        let Some(pos) = self.history_pos else {
            return;
        };
        if pos + 1 < self.history.len() {
            self.history_pos = Some(pos + 1);
            if let Some(h) = self.history.get(pos + 1) {
                self.message_input = h.clone();
            }
        } else {
            // Exit history navigation
            self.history_pos = None;
            self.message_input = self.history_saved_input.take().unwrap_or_default();
        }
    }

    /// Record a sent message, skipping immediate repeats.
    pub fn push_history(&mut self, entry: &str) {
        if self.history.last().map(String::as_str) != Some(entry) {
            self.history.push(entry.to_string());
        }
        if self.history.len() > MAX_SAVED_HISTORY {
            let excess = self.history.len() - MAX_SAVED_HISTORY;
            self.history.drain(0..excess);
        }
    }

    /// Clear the input box and leave history navigation.
    pub fn clear(&mut self) {
        self.message_input.clear();
        self.history_pos = None;
        self.history_saved_input = None;
    }
}
