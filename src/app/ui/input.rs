//! Message input panel with history

use eframe::egui;

use crate::app::MoodifyApp;
use crate::commands;

impl MoodifyApp {
    /// Render the input panel at the bottom of the window
    pub(in crate::app) fn render_input_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        let enabled = !self.state.loading;

        egui::TopBottomPanel::bottom("input_panel")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let button_width = 64.0;
                    let input_frame = egui::Frame::new()
                        .fill(theme.surface[2])
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(10, 8));

                    let mut submitted = false;
                    input_frame.show(ui, |ui| {
                        let response = ui.add_enabled(
                            enabled,
                            egui::TextEdit::singleline(&mut self.input.message_input)
                                .desired_width(ui.available_width() - button_width - 16.0)
                                .frame(false)
                                .hint_text("Type a message... (/help for commands)"),
                        );

                        if response.has_focus() {
                            if ui.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
                                self.input.history_prev();
                            }
                            if ui.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
                                self.input.history_next();
                            }
                            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                                self.input.clear();
                            }
                        }

                        // Singleline edits lose focus on Enter
                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            submitted = true;
                            response.request_focus();
                        }
                    });

                    let send = egui::Button::new("Send").fill(theme.accent);
                    if ui.add_enabled(enabled, send).clicked() {
                        submitted = true;
                    }

                    if submitted {
                        self.submit_input();
                    }
                });
            });
    }

    /// Send whatever is in the input box, clearing it if it was consumed.
    pub(in crate::app) fn submit_input(&mut self) {
        let text = self.input.message_input.clone();
        if commands::handle_user_input(&text, &mut self.state, &self.action_tx) {
            self.input.push_history(text.trim());
            self.input.clear();
        }
    }
}
