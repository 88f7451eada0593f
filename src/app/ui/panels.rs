//! Header and central panel rendering

use eframe::egui;

use crate::app::MoodifyApp;
use crate::commands;
use crate::ui;

impl MoodifyApp {
    /// Render the header with title, preference progress and controls
    pub(in crate::app) fn render_header(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(egui::RichText::new("🎧 Moodify").color(theme.accent));
                    ui.separator();
                    ui::render_progress(ui, &self.state.progress, &theme);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = if theme.is_dark() { "☀" } else { "🌙" };
                        if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                            self.toggle_theme(ctx);
                        }
                        let reset = egui::Button::new("↺ Start over");
                        if ui.add_enabled(!self.state.loading, reset).clicked() {
                            commands::handle_user_input("/reset", &mut self.state, &self.action_tx);
                        }
                    });
                });
            });
    }

    /// Render the central panel with messages
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();

        let clicked = egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[0]).inner_margin(12.0))
            .show(ctx, |ui| {
                ui::render_messages(ui, &self.state, &theme, !self.state.loading)
            })
            .inner;

        // Quick replies behave as if the user typed the command
        if let Some(command) = clicked {
            commands::handle_user_input(&command, &mut self.state, &self.action_tx);
        }
    }
}
