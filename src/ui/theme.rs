//! Color themes and styling for the chat window.
//!
//! `surface` runs from the window background through panels and bot
//! bubbles to hover fills. The accent marks user bubbles and buttons.

use std::collections::BTreeMap;

use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};

/// Semantic color set for the chat window
#[derive(Clone, Debug)]
pub struct MoodifyTheme {
    pub name: String,
    pub surface: [Color32; 4],
    pub accent: Color32,
    pub success: Color32,
    pub text_primary: Color32,
    pub text_on_accent: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
}

impl MoodifyTheme {
    /// Dark theme (default): deep violet surfaces with a green accent
    pub fn dark() -> Self {
        Self {
            name: "Dark".into(),
            surface: [
                Color32::from_rgb(18, 14, 28),
                Color32::from_rgb(28, 22, 42),
                Color32::from_rgb(44, 36, 64),
                Color32::from_rgb(58, 48, 84),
            ],
            accent: Color32::from_rgb(29, 185, 84),
            success: Color32::from_rgb(120, 220, 150),
            text_primary: Color32::from_rgb(240, 236, 250),
            text_on_accent: Color32::from_rgb(10, 20, 12),
            text_muted: Color32::from_rgb(150, 140, 170),
            border_medium: Color32::from_rgb(66, 56, 92),
        }
    }

    /// Light theme: lavender surfaces, same accent
    pub fn light() -> Self {
        Self {
            name: "Light".into(),
            surface: [
                Color32::from_rgb(250, 248, 255),
                Color32::from_rgb(240, 236, 250),
                Color32::from_rgb(226, 220, 242),
                Color32::from_rgb(212, 204, 234),
            ],
            accent: Color32::from_rgb(29, 185, 84),
            success: Color32::from_rgb(22, 140, 70),
            text_primary: Color32::from_rgb(30, 24, 44),
            text_on_accent: Color32::WHITE,
            text_muted: Color32::from_rgb(110, 100, 130),
            border_medium: Color32::from_rgb(200, 192, 222),
        }
    }

    /// Theme for a persisted theme name ("dark" or "light")
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "Dark"
    }
}

/// Bubble text is slightly larger than the default; timestamps stay small
fn chat_text_styles() -> BTreeMap<TextStyle, FontId> {
    let proportional = |size| FontId::new(size, FontFamily::Proportional);
    BTreeMap::from([
        (TextStyle::Small, proportional(11.0)),
        (TextStyle::Body, proportional(15.0)),
        (TextStyle::Button, proportional(14.0)),
        (TextStyle::Heading, proportional(20.0)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ])
}

/// Apply visuals, spacing and widget styling for `theme`.
/// Call once at start-up and again whenever the theme changes.
pub fn apply_app_style(ctx: &egui::Context, theme: &MoodifyTheme) {
    ctx.set_visuals(if theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        style.text_styles = chat_text_styles();

        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);

        let widgets = &mut style.visuals.widgets;
        for w in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.active] {
            w.corner_radius = egui::CornerRadius::same(14);
        }
        widgets.active.bg_fill = theme.accent;
        widgets.active.weak_bg_fill = theme.accent;
        widgets.hovered.weak_bg_fill = theme.surface[3];
        style.visuals.selection.bg_fill = theme.accent.linear_multiply(0.4);
        style.visuals.hyperlink_color = theme.accent;
        style.visuals.panel_fill = theme.surface[0];
    });
}
