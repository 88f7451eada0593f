//! Moodify chat client library.
//!
//! This module re-exports the core components for testing and extension.

pub mod app;
pub mod backend;
pub mod buffer;
pub mod client;
pub mod commands;
pub mod config;
pub mod events;
pub mod input_state;
pub mod logging;
pub mod markup;
pub mod media;
pub mod payload;
pub mod progress;
pub mod protocol;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod ui;
pub mod validation;

#[cfg(test)]
mod integration_tests;
