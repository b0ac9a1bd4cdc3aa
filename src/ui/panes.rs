//! Terminal columns as split layout regions.
//!
//! [`PaneGeometry`] is the host side of [`SplitPane`](crate::splitter::SplitPane)
//! in the terminal: widths and offsets are counted in columns and the
//! controller's writes land here. Rendering turns them into [`Rect`]s,
//! clipping anything that falls outside the frame.

use ratatui::layout::Rect;

use crate::splitter::{Region, SplitRegions};

use super::DIVIDER_WIDTH;

/// Column layout of the tree pane, the divider and the document pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneGeometry {
    container: i32,
    widths: [i32; 3],
    offsets: [i32; 3],
}

/// Screen rectangles for the three regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneRects {
    pub tree: Rect,
    pub divider: Rect,
    pub document: Rect,
}

impl PaneGeometry {
    /// Geometry for a container `container_width` columns wide with the
    /// tree pane `left_width` columns wide. The document pane is measured
    /// as empty until the controller positions it.
    pub fn new(container_width: u16, left_width: u16) -> Self {
        Self {
            container: i32::from(container_width),
            widths: [i32::from(left_width), i32::from(DIVIDER_WIDTH), 0],
            offsets: [0; 3],
        }
    }

    pub const fn width(&self, region: Region) -> i32 {
        self.widths[region.index()]
    }

    pub const fn offset(&self, region: Region) -> i32 {
        self.offsets[region.index()]
    }

    /// Rectangles of the regions inside `area`.
    ///
    /// A region pushed past the right edge, or with a negative width,
    /// comes out zero columns wide.
    pub fn rects(&self, area: Rect) -> PaneRects {
        PaneRects {
            tree: clip(area, self.offset(Region::Left), self.width(Region::Left)),
            divider: clip(
                area,
                self.offset(Region::Divider),
                self.width(Region::Divider),
            ),
            document: clip(area, self.offset(Region::Right), self.width(Region::Right)),
        }
    }
}

impl SplitRegions for PaneGeometry {
    fn container_width(&self) -> Option<i32> {
        Some(self.container)
    }

    fn measure(&self, region: Region) -> Option<i32> {
        Some(self.width(region))
    }

    fn set_width(&mut self, region: Region, width: i32) {
        self.widths[region.index()] = width;
    }

    fn set_offset(&mut self, region: Region, offset: i32) {
        self.offsets[region.index()] = offset;
    }
}

fn clip(area: Rect, offset: i32, width: i32) -> Rect {
    let available = i32::from(area.width);
    let start = offset.clamp(0, available);
    let end = offset.saturating_add(width.max(0)).clamp(start, available);
    // Both ends lie in 0..=area.width
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Rect {
        x: area.x + start as u16,
        y: area.y,
        width: (end - start) as u16,
        height: area.height,
    }
}
