//! Main update loop and repaint scheduling

use eframe::egui;
use std::time::{Duration, Instant};

use super::MoodifyApp;

/// Upper bound between repaints while nothing is scheduled
const IDLE_REPAINT: Duration = Duration::from_millis(100);

impl eframe::App for MoodifyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process backend events and due replies
        self.process_events();

        // Wake up in time for the next typing-delayed reply
        let repaint_in = self
            .state
            .typing
            .next_due()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .map_or(IDLE_REPAINT, |wait| wait.min(IDLE_REPAINT));
        ctx.request_repaint_after(repaint_in);

        // Render UI sections
        self.render_header(ctx);
        self.render_input_panel(ctx);
        self.render_central_panel(ctx);
    }
}
