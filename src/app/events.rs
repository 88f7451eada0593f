//! Event processing from backend

use std::time::Instant;

use super::MoodifyApp;
use crate::events;

impl MoodifyApp {
    /// Drain backend events and release replies whose typing delay is over.
    pub fn process_events(&mut self) {
        events::process_events(
            &mut self.state,
            &self.event_rx,
            &self.action_tx,
            Instant::now(),
        );
    }
}
