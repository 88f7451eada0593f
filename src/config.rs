use serde::{Serialize, Deserialize};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::scheduler::OverlapPolicy;

// Default configuration
pub const DEFAULT_BACKEND_URL: &str = "https://moodify-app-mcic.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Most recent inputs kept for up/down history navigation
pub const MAX_SAVED_HISTORY: usize = 100;

/// Persisted user settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub theme: String,
    pub overlap_policy: OverlapPolicy,
    pub transcript_logging: bool,
    pub history: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            theme: "dark".to_string(),
            overlap_policy: OverlapPolicy::KeepAll,
            transcript_logging: true,
            history: Vec::new(),
        }
    }
}

/// Connection settings handed to the backend client at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL for an endpoint path such as `/command`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl From<&Settings> for ClientConfig {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.backend_url.clone())
            .with_timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "moodify", "moodify-client") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!("Ignoring unreadable settings file: {}", e);
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings).map_err(std::io::Error::other)?;
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}
