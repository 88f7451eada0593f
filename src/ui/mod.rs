//! UI rendering modules for the Moodify chat window.
//!
//! - `messages`: Chat bubbles, player cards, quick replies, typing indicator
//! - `progress`: Preference progress bar
//! - `theme`: Color schemes and styling utilities

pub mod messages;
pub mod progress;
pub mod theme;

pub use messages::render_messages;
pub use progress::render_progress;
pub use theme::{apply_app_style, MoodifyTheme};
