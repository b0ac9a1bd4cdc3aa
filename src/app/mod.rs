//! Terminal help browser and its main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::i18n::Language;
use crate::ui::{DEFAULT_LEFT_WIDTH, DEFAULT_MIN_LEFT_WIDTH};

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Clone)]
pub struct App {
    language: Language,
    start_topic: Option<String>,
    left_width: u16,
    min_left_width: u16,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
    lang_dir: Option<PathBuf>,
}

impl App {
    /// Create a browser showing pages in `language`.
    pub const fn new(language: Language) -> Self {
        Self {
            language,
            start_topic: None,
            left_width: DEFAULT_LEFT_WIDTH,
            min_left_width: DEFAULT_MIN_LEFT_WIDTH,
            config_global_path: None,
            config_local_path: None,
            lang_dir: None,
        }
    }

    /// Read labels from `<dir>/<code>.lang` files where they exist.
    #[must_use]
    pub fn with_lang_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.lang_dir = dir;
        self
    }

    /// Open this topic instead of the home page.
    #[must_use]
    pub fn with_start_topic(mut self, topic: Option<String>) -> Self {
        self.start_topic = topic;
        self
    }

    /// Set the initial width of the tree pane.
    #[must_use]
    pub const fn with_left_width(mut self, width: u16) -> Self {
        self.left_width = width;
        self
    }

    /// Set the narrowest the tree pane may be dragged to.
    #[must_use]
    pub const fn with_min_left_width(mut self, width: u16) -> Self {
        self.min_left_width = width;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
