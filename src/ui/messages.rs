//! Message rendering for the central chat panel.

use eframe::egui::{self, Align, Layout, RichText};

use crate::buffer::{Author, ChatMessage};
use crate::media::MediaId;
use crate::state::ClientState;
use crate::ui::theme::MoodifyTheme;

/// Widest a bubble may grow, as a share of the panel width
const BUBBLE_WIDTH_RATIO: f32 = 0.75;

/// Render the conversation with the typing indicator below it.
///
/// Quick-reply buttons are only drawn under the newest bot message and are
/// disabled while `interactive` is false. Returns the command of a clicked
/// quick reply, if any.
pub fn render_messages(
    ui: &mut egui::Ui,
    state: &ClientState,
    theme: &MoodifyTheme,
    interactive: bool,
) -> Option<String> {
    let mut clicked = None;
    let last_bot = state.buffer.last_bot_index();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 8.0;

            for (idx, msg) in state.buffer.messages.iter().enumerate() {
                let show_replies = Some(idx) == last_bot && !state.is_typing();
                if let Some(cmd) = render_message(ui, msg, theme, show_replies, interactive) {
                    clicked = Some(cmd);
                }
            }

            if state.is_typing() {
                render_typing_indicator(ui, theme);
            }
        });

    clicked
}

fn render_message(
    ui: &mut egui::Ui,
    msg: &ChatMessage,
    theme: &MoodifyTheme,
    show_replies: bool,
    interactive: bool,
) -> Option<String> {
    let max_width = ui.available_width() * BUBBLE_WIDTH_RATIO;

    match msg.author {
        Author::System => {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(&msg.text)
                        .small()
                        .italics()
                        .color(theme.text_muted),
                );
            });
            None
        }
        Author::User => {
            ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                ui.set_max_width(max_width);
                bubble(theme.accent).show(ui, |ui| {
                    ui.label(RichText::new(&msg.text).color(theme.text_on_accent));
                });
                ui.label(RichText::new(&msg.timestamp).small().color(theme.text_muted));
            });
            None
        }
        Author::Bot => {
            let mut clicked = None;
            ui.with_layout(Layout::left_to_right(Align::Min), |ui| {
                ui.vertical(|ui| {
                    ui.set_max_width(max_width);
                    bubble(theme.surface[2]).show(ui, |ui| {
                        if !msg.text.is_empty() {
                            ui.label(RichText::new(&msg.text).color(theme.text_primary));
                        }
                        if let Some(media) = &msg.media {
                            render_media_card(ui, media, theme);
                        }
                    });

                    if show_replies && !msg.quick_replies.is_empty() {
                        ui.horizontal_wrapped(|ui| {
                            for reply in &msg.quick_replies {
                                let button = egui::Button::new(&reply.label)
                                    .stroke(egui::Stroke::new(1.0, theme.accent));
                                if ui.add_enabled(interactive, button).clicked() {
                                    clicked = Some(reply.command.clone());
                                }
                            }
                        });
                    }

                    ui.label(RichText::new(&msg.timestamp).small().color(theme.text_muted));
                });
            });
            clicked
        }
    }
}

fn bubble(fill: egui::Color32) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Player card standing in for the embedded track player.
fn render_media_card(ui: &mut egui::Ui, media: &MediaId, theme: &MoodifyTheme) {
    ui.add_space(4.0);
    egui::Frame::new()
        .fill(theme.surface[1])
        .corner_radius(6.0)
        .stroke(egui::Stroke::new(1.0, theme.border_medium))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🎵").heading());
                ui.vertical(|ui| {
                    ui.hyperlink_to(
                        RichText::new("▶ Open player").strong().color(theme.accent),
                        media.embed_url(),
                    );
                    ui.hyperlink_to(
                        RichText::new("Listen on Spotify").small(),
                        media.track_url(),
                    );
                });
            });
        });
}

/// Three dots that pulse while a reply is "being typed".
fn render_typing_indicator(ui: &mut egui::Ui, theme: &MoodifyTheme) {
    let time = ui.input(|i| i.time);
    let lit = (time * 3.0) as usize % 3;

    ui.with_layout(Layout::left_to_right(Align::Min), |ui| {
        bubble(theme.surface[2]).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                for i in 0..3 {
                    let color = if i == lit {
                        theme.text_primary
                    } else {
                        theme.text_muted
                    };
                    ui.label(RichText::new("●").color(color));
                }
            });
        });
    });
}
