//! Backend submodules for HTTP request handling
//!
//! This module splits the backend into focused components:
//! - `handlers`: BackendAction dispatch and GuiEvent generation
//! - `main_loop`: Tokio runtime and the action polling loop

mod handlers;
mod main_loop;

// Re-export the main backend entry points
pub use handlers::handle_backend_action;
pub use main_loop::run_backend;
