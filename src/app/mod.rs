//! Application module structure for MoodifyApp
//!
//! This module organizes the chat window into focused submodules:
//! - `core`: MoodifyApp struct, initialization and shutdown
//! - `events`: Event processing from backend
//! - `update`: Main update loop and repaint scheduling
//! - `ui::panels`: Header and central panel rendering
//! - `ui::input`: Message input panel with history

pub mod core;
pub mod events;
pub mod update;
pub mod ui;

// Re-export MoodifyApp for public API
pub use core::MoodifyApp;
