// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. splitter::SplitterError)
    clippy::module_name_repetitions
)]

//! # Jenealogio help
//!
//! Multilingual help documentation for the Jenealogio family tree editor.
//!
//! The same content is served two ways:
//! - an interactive terminal browser with a topic tree, a draggable
//!   divider, and the current page
//! - a static HTML site whose pages share the same split layout
//!
//! ## Architecture
//!
//! The browser uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`splitter`]: Split-pane resize controller
//! - [`app`]: Main application loop and state
//! - [`document`]: Help page parsing and rendering
//! - [`ui`]: Terminal UI components
//! - [`topics`]: Topic tree and its expansion state
//! - [`pages`]: Help pages per language
//! - [`i18n`]: Languages and label bundles
//! - [`site`]: Static HTML site generation
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod document;
pub mod i18n;
pub mod pages;
pub mod site;
pub mod splitter;
pub mod topics;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::splitter::{SplitPane, SplitRegions};
    pub use crate::ui::viewport::Viewport;
}
