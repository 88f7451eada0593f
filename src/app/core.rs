//! Core MoodifyApp struct definition and initialization

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;

use crate::backend::run_backend;
use crate::config::{save_settings, ClientConfig, Settings};
use crate::input_state::InputState;
use crate::logging::Logger;
use crate::protocol::{BackendAction, GuiEvent};
use crate::session::Session;
use crate::state::ClientState;
use crate::ui;

pub struct MoodifyApp {
    // Conversation state (messages, loading flag, typing queue, progress)
    pub state: ClientState,

    // Channels for backend communication
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    // Input state (message composition, history)
    pub input: InputState,

    // Persisted settings, written back on exit
    pub settings: Settings,

    // Theme
    pub theme: ui::MoodifyTheme,
}

impl MoodifyApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        config: ClientConfig,
        session: Session,
    ) -> Self {
        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        let logger = if settings.transcript_logging {
            match Logger::new() {
                Ok(logger) => Some(logger),
                Err(e) => {
                    tracing::warn!("Transcript logging disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };
        let state = ClientState::new(session.id(), settings.overlap_policy, logger);

        // Spawn the backend thread
        let spawned = thread::Builder::new()
            .name("moodify-backend".into())
            .spawn(move || run_backend(config, session, action_rx, event_tx));
        if let Err(e) = spawned {
            tracing::error!("Failed to spawn backend thread: {}", e);
        }

        let theme = ui::MoodifyTheme::from_name(&settings.theme);
        ui::apply_app_style(&cc.egui_ctx, &theme);

        let app = Self {
            state,
            action_tx,
            event_rx,
            input: InputState::with_history(settings.history.clone()),
            settings,
            theme,
        };

        // Show progress for a session restored from an earlier run
        let _ = app.action_tx.send(BackendAction::PollSession);
        app
    }

    /// Switch between the dark and light themes.
    pub(super) fn toggle_theme(&mut self, ctx: &eframe::egui::Context) {
        let next = if self.theme.is_dark() { "light" } else { "dark" };
        self.settings.theme = next.to_string();
        self.theme = ui::MoodifyTheme::from_name(next);
        ui::apply_app_style(ctx, &self.theme);
    }
}

impl Drop for MoodifyApp {
    fn drop(&mut self) {
        let _ = self.action_tx.send(BackendAction::Shutdown);

        // Persist settings on exit
        self.settings.history = self.input.history.clone();
        if let Err(e) = save_settings(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}
