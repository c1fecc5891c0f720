//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Side effects (share, playback hand-off, clipboard) live in their own
//! layer, keyed on the message after the pure transition, so the core's
//! behavior is verifiable without a terminal.

mod effects;
mod event_loop;
mod input;
mod model;
mod scroll_lock;
mod update;

pub use model::{Model, ToastLevel};
pub use scroll_lock::ScrollLock;
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    catalog_path: PathBuf,
    images_enabled: bool,
    initial_category: Option<String>,
    share_cmd: Option<String>,
}

impl App {
    /// Create a new application for the given catalog file.
    pub fn new(catalog_path: PathBuf) -> Self {
        Self {
            catalog_path,
            images_enabled: true,
            initial_category: None,
            share_cmd: None,
        }
    }

    /// Enable or disable inline thumbnail rendering.
    pub fn with_images_enabled(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }

    /// Start with a category filter applied (ignored if unknown).
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.initial_category = category;
        self
    }

    /// Set the external share command invoked by the share action.
    pub fn with_share_cmd(mut self, share_cmd: Option<String>) -> Self {
        self.share_cmd = share_cmd;
        self
    }
}

#[cfg(test)]
mod tests;
