//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`PaneGeometry`]: Column layout driven by the split pane controller
//! - [`style`]: Colors for page elements and panes

pub mod style;
pub mod viewport;

mod overlays;
mod panes;
mod render;
mod status;

pub use panes::{PaneGeometry, PaneRects};
pub use render::{ScreenLayout, TREE_MARKER_WIDTH, render, screen_layout, tree_inner_area};
pub use status::language_indicator;

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
/// Width of the divider column between the panes.
pub const DIVIDER_WIDTH: u16 = 1;
/// Initial width of the tree pane.
pub const DEFAULT_LEFT_WIDTH: u16 = 30;
/// The tree pane never gets narrower than this while dragging.
pub const DEFAULT_MIN_LEFT_WIDTH: u16 = 20;

#[cfg(test)]
mod tests;
