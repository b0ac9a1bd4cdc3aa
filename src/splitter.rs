//! Resizable two-pane layout driven by pointer drags.
//!
//! [`SplitPane`] owns the horizontal layout of three regions inside a
//! container: the left (navigation) panel, a narrow divider and the right
//! (content) panel. The host supplies the regions through [`SplitRegions`],
//! which exposes width queries and the style writes the controller performs.
//!
//! The drag state machine has two states:
//!
//! - [`DragState::Idle`]: only the divider press listener is registered.
//! - [`DragState::Dragging`]: the press listener is detached and move and
//!   release listeners are attached to the whole window, so the drag keeps
//!   tracking after the pointer leaves the divider.
//!
//! The state field is checked at the top of every handler, and the
//! listener record in [`Listeners`] is updated as a side effect of each
//! transition.
//!
//! # Example
//!
//! ```
//! use jenealogio_help::splitter::{Region, SplitPane, SplitRegions};
//!
//! struct Fixed([i32; 3]);
//!
//! impl SplitRegions for Fixed {
//!     fn container_width(&self) -> Option<i32> {
//!         Some(1000)
//!     }
//!     fn measure(&self, region: Region) -> Option<i32> {
//!         Some(self.0[region.index()])
//!     }
//!     fn set_width(&mut self, region: Region, width: i32) {
//!         self.0[region.index()] = width;
//!     }
//!     fn set_offset(&mut self, _region: Region, _offset: i32) {}
//! }
//!
//! let mut pane = SplitPane::initialize(Fixed([200, 10, 0]), 200).unwrap();
//! pane.press(200);
//! pane.pointer_move(400);
//! pane.release();
//! assert_eq!(pane.layout().left_width, 400);
//! assert_eq!(pane.layout().right_width(), 590);
//! ```

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// One of the three regions of a split layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Navigation panel
    Left,
    /// Draggable boundary between the panels
    Divider,
    /// Content panel
    Right,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::Left, Self::Divider, Self::Right];

    /// Position of the region from left to right.
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Divider => 1,
            Self::Right => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "split-left",
            Self::Divider => "splitter",
            Self::Right => "split-right",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Setup faults raised when the host layout is incomplete.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SplitterError {
    #[error("split layout container is missing")]
    MissingContainer,
    #[error("split layout region `{0}` is missing")]
    MissingRegion(Region),
    #[error("split layout widths do not fit in i32")]
    Overflow,
}

/// Layout measurement and styling capability supplied by the host.
///
/// A query returning `None` means the element does not exist.
pub trait SplitRegions {
    /// Width of the container holding the three regions.
    fn container_width(&self) -> Option<i32>;

    /// Rendered width of a region.
    fn measure(&self, region: Region) -> Option<i32>;

    /// Set the width of a region.
    fn set_width(&mut self, region: Region, width: i32);

    /// Set the horizontal offset of a region from the container's left edge.
    fn set_offset(&mut self, region: Region, offset: i32);
}

/// Widths owned by the controller for the lifetime of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    pub viewport_width: i32,
    pub min_left_width: i32,
    pub left_width: i32,
    pub divider_width: i32,
}

impl LayoutState {
    /// Offset of the divider, directly after the left panel.
    pub const fn divider_offset(&self) -> i32 {
        self.left_width
    }

    /// Offset of the right panel, directly after the divider.
    pub const fn right_offset(&self) -> i32 {
        self.left_width.saturating_add(self.divider_width)
    }

    /// Remaining space for the right panel. Can be zero or negative.
    pub const fn right_width(&self) -> i32 {
        self.viewport_width.saturating_sub(self.right_offset())
    }

    /// Right panel width, `None` when a width or offset of this layout
    /// is not representable.
    ///
    /// The controller only ever stores layouts for which this is `Some`,
    /// so the saturating accessors above are exact.
    pub const fn checked_right_width(&self) -> Option<i32> {
        match self.left_width.checked_add(self.divider_width) {
            Some(offset) => self.viewport_width.checked_sub(offset),
            None => None,
        }
    }
}

/// Pointer drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Horizontal pointer coordinate of the last processed event
        last_pointer_x: i32,
    },
}

/// Which pointer listeners are currently registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Listeners {
    /// Press listener on the divider
    pub divider_press: bool,
    /// Move listener on the whole window
    pub window_move: bool,
    /// Release listener on the whole window
    pub window_release: bool,
}

/// Controller for a three-region resizable layout.
#[derive(Debug, Clone)]
pub struct SplitPane<R> {
    regions: R,
    layout: LayoutState,
    drag: DragState,
    listeners: Listeners,
}

/// A detached pane: no listener is registered, so every pointer event is
/// ignored until a pane is built with [`SplitPane::initialize`].
impl<R: Default> Default for SplitPane<R> {
    fn default() -> Self {
        Self {
            regions: R::default(),
            layout: LayoutState {
                viewport_width: 0,
                min_left_width: 0,
                left_width: 0,
                divider_width: 0,
            },
            drag: DragState::Idle,
            listeners: Listeners::default(),
        }
    }
}

impl<R: SplitRegions> SplitPane<R> {
    /// Measure the regions, position the divider and the right panel
    /// after the left panel, and start listening for divider presses.
    ///
    /// # Errors
    ///
    /// Returns [`SplitterError`] when the container or one of the regions
    /// cannot be measured.
    pub fn initialize(regions: R, min_left_width: i32) -> Result<Self, SplitterError> {
        let viewport_width = regions
            .container_width()
            .ok_or(SplitterError::MissingContainer)?;
        let left_width = regions
            .measure(Region::Left)
            .ok_or(SplitterError::MissingRegion(Region::Left))?;
        let divider_width = regions
            .measure(Region::Divider)
            .ok_or(SplitterError::MissingRegion(Region::Divider))?;
        regions
            .measure(Region::Right)
            .ok_or(SplitterError::MissingRegion(Region::Right))?;

        let layout = LayoutState {
            viewport_width,
            min_left_width,
            left_width,
            divider_width,
        };
        layout
            .checked_right_width()
            .ok_or(SplitterError::Overflow)?;

        let mut pane = Self {
            regions,
            layout,
            drag: DragState::Idle,
            listeners: Listeners::default(),
        };
        pane.apply_positions();
        pane.listeners.divider_press = true;
        debug!(
            viewport_width,
            left_width, divider_width, min_left_width, "split pane initialized"
        );
        Ok(pane)
    }

    /// Handle a pointer press on the divider.
    ///
    /// Returns `true` when a drag session started.
    pub fn press(&mut self, pointer_x: i32) -> bool {
        if self.drag != DragState::Idle || !self.listeners.divider_press {
            return false;
        }
        self.listeners = Listeners {
            divider_press: false,
            window_move: true,
            window_release: true,
        };
        self.drag = DragState::Dragging {
            last_pointer_x: pointer_x,
        };
        debug!(pointer_x, "divider drag started");
        true
    }

    /// Handle a pointer move anywhere in the window.
    ///
    /// Returns `true` when the layout was recomputed.
    pub fn pointer_move(&mut self, pointer_x: i32) -> bool {
        let DragState::Dragging { last_pointer_x } = self.drag else {
            return false;
        };
        if !self.listeners.window_move {
            return false;
        }
        // A move the layout cannot follow keeps the previous pointer, so
        // the next delta is measured from where the divider really is.
        if !self.reset_position(last_pointer_x, pointer_x) {
            return false;
        }
        self.drag = DragState::Dragging {
            last_pointer_x: pointer_x,
        };
        true
    }

    /// Handle a pointer release anywhere in the window.
    ///
    /// Returns `true` when a drag session ended.
    pub fn release(&mut self) -> bool {
        let DragState::Dragging { last_pointer_x } = self.drag else {
            return false;
        };
        if !self.listeners.window_release {
            return false;
        }
        self.listeners = Listeners {
            divider_press: true,
            window_move: false,
            window_release: false,
        };
        self.drag = DragState::Idle;
        self.reset_position(last_pointer_x, last_pointer_x);
        debug!(
            left_width = self.layout.left_width,
            right_width = self.layout.right_width(),
            "divider drag ended"
        );
        true
    }

    /// Recompute the layout without moving the divider.
    pub fn relayout(&mut self) {
        self.reset_position(0, 0);
    }

    /// Adopt a new container width and recompute the right panel.
    ///
    /// Returns `false`, leaving the layout alone, when the right panel
    /// width would not be representable.
    pub fn resize_viewport(&mut self, viewport_width: i32) -> bool {
        let resized = LayoutState {
            viewport_width,
            ..self.layout
        };
        if resized.checked_right_width().is_none() {
            debug!(viewport_width, "viewport width out of range");
            return false;
        }
        self.layout = resized;
        self.relayout();
        true
    }

    pub const fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub const fn state(&self) -> DragState {
        self.drag
    }

    pub const fn listeners(&self) -> Listeners {
        self.listeners
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub const fn regions(&self) -> &R {
        &self.regions
    }

    /// Move the left panel edge by the pointer delta and lay out the
    /// rest. Returns `false` without touching anything when the result
    /// would overflow.
    fn reset_position(&mut self, last_x: i32, now_x: i32) -> bool {
        let current = self
            .regions
            .measure(Region::Left)
            .unwrap_or(self.layout.left_width);
        let Some(proposed) = now_x
            .checked_sub(last_x)
            .and_then(|delta| current.checked_add(delta))
            .map(|width| width.max(self.layout.min_left_width))
        else {
            debug!(last_x, now_x, "pointer delta out of range");
            return false;
        };
        let next = LayoutState {
            left_width: proposed,
            ..self.layout
        };
        if next.checked_right_width().is_none() {
            debug!(left_width = proposed, "left width out of range");
            return false;
        }

        self.layout = next;
        self.regions.set_width(Region::Left, proposed);
        self.apply_positions();
        true
    }

    fn apply_positions(&mut self) {
        let layout = self.layout;
        self.regions
            .set_offset(Region::Divider, layout.divider_offset());
        self.regions.set_offset(Region::Right, layout.right_offset());
        self.regions.set_width(Region::Right, layout.right_width());
    }
}
