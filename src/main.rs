//! Moodify - a chat window for the Moodify music recommender
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Backend thread: runs a Tokio runtime for HTTP requests
//! - Communication via crossbeam channels (lock-free, sync-safe)

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use moodify_client::app::MoodifyApp;
use moodify_client::config::{load_settings, ClientConfig};
use moodify_client::scheduler::OverlapPolicy;
use moodify_client::session::{FileSessionStore, Session};

#[derive(Parser, Debug)]
#[command(name = "moodify-client", version, about = "Chat with the Moodify music recommender")]
struct Cli {
    /// Base URL of the recommendation backend
    #[arg(long, env = "MOODIFY_BACKEND_URL")]
    backend_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Color theme ("dark" or "light")
    #[arg(long)]
    theme: Option<String>,

    /// Drop typing-delayed replies that are still pending when a new one arrives
    #[arg(long)]
    replace_pending: bool,

    /// Do not write conversation transcripts to disk
    #[arg(long)]
    no_transcript: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = load_settings().unwrap_or_default();
    if let Some(url) = cli.backend_url {
        settings.backend_url = url;
    }
    if let Some(secs) = cli.timeout {
        settings.request_timeout_secs = secs;
    }
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    if cli.replace_pending {
        settings.overlap_policy = OverlapPolicy::ReplacePending;
    }
    if cli.no_transcript {
        settings.transcript_logging = false;
    }

    let session = match FileSessionStore::open_default()
        .and_then(|mut store| Session::load_or_create(&mut store))
    {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Session storage unavailable, using a temporary session: {}", e);
            Session::ephemeral()
        }
    };
    tracing::info!(session_id = %session.id(), backend = %settings.backend_url, "starting");

    let config = ClientConfig::from(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([360.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Moodify",
        options,
        Box::new(move |cc| Ok(Box::new(MoodifyApp::new(cc, settings, config, session)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the chat window: {e}"))
}
