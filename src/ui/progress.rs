//! Preference progress bar shown in the header.

use eframe::egui::{self, RichText};

use crate::progress::SessionStatus;
use crate::ui::theme::MoodifyTheme;

/// Render the progress bar followed by one chip per preference.
pub fn render_progress(ui: &mut egui::Ui, status: &SessionStatus, theme: &MoodifyTheme) {
    let fill = if status.is_complete() {
        theme.success
    } else {
        theme.accent
    };

    ui.add(
        egui::ProgressBar::new(status.fraction())
            .desired_width(160.0)
            .fill(fill)
            .text(status.label()),
    );

    for (name, filled) in status.preferences() {
        let (mark, color) = if filled {
            ("✔", theme.success)
        } else {
            ("○", theme.text_muted)
        };
        ui.label(RichText::new(format!("{} {}", mark, name)).small().color(color));
    }
}
