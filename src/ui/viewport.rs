//! Scroll position of the document pane.
//!
//! The [`Viewport`] tracks which rendered lines of the current page fit
//! in the document pane. It is refitted whenever the divider moves or the
//! terminal changes size, and reset when another topic opens.

use std::ops::Range;

/// Visible slice of a rendered page.
///
/// The top line is always kept within `0..=total_lines - rows`, so the
/// last page is never followed by blank rows.
///
/// # Example
///
/// ```
/// use jenealogio_help::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
///
/// vp.fit(24, 20);
/// assert_eq!(vp.offset(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    rows: u16,
    top: usize,
    lines: usize,
}

impl Viewport {
    /// A viewport of `rows` rows at the top of a page of `lines` lines.
    pub const fn new(rows: u16, lines: usize) -> Self {
        Self {
            rows,
            top: 0,
            lines,
        }
    }

    /// First visible line.
    pub const fn offset(&self) -> usize {
        self.top
    }

    pub const fn height(&self) -> u16 {
        self.rows
    }

    pub const fn total_lines(&self) -> usize {
        self.lines
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.top..(self.top + usize::from(self.rows)).min(self.lines)
    }

    /// How far down the page the viewport is, 100 when everything fits.
    pub fn scroll_percent(&self) -> u8 {
        let last = self.last_top();
        if last == 0 {
            return 100;
        }
        let percent = (self.top * 100 + last / 2) / last;
        u8::try_from(percent.min(100)).unwrap_or(100)
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.top > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.top < self.last_top()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.top = self.top.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.go_to_line(self.top.saturating_add(n));
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.rows as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(usize::from(self.rows));
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.rows as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(usize::from(self.rows) / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.top = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.top = self.last_top();
    }

    /// Put `line` at the top, or as close as the page allows.
    pub fn go_to_line(&mut self, line: usize) {
        self.top = line.min(self.last_top());
    }

    /// Adopt a new pane height and page length, keeping the top line
    /// where possible.
    pub fn fit(&mut self, rows: u16, lines: usize) {
        self.rows = rows;
        self.lines = lines;
        self.top = self.top.min(self.last_top());
    }

    const fn last_top(&self) -> usize {
        self.lines.saturating_sub(self.rows as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_viewport_is_empty() {
        let vp = Viewport::default();
        assert_eq!(vp.visible_range(), 0..0);
        assert!(!vp.can_scroll_down());
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_short_page_does_not_scroll() {
        let mut vp = Viewport::new(24, 10);
        assert_eq!(vp.visible_range(), 0..10);
        vp.page_down();
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_down_stops_at_last_page() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(500);
        assert_eq!(vp.offset(), 76);
        assert_eq!(vp.visible_range(), 76..100);
        assert!(!vp.can_scroll_down());
        assert!(vp.can_scroll_up());
    }

    #[test]
    fn test_page_and_half_page_steps() {
        let mut vp = Viewport::new(10, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.half_page_down();
        assert_eq!(vp.offset(), 15);
        vp.half_page_up();
        vp.page_up();
        assert_eq!(vp.offset(), 0);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_top_and_bottom() {
        let mut vp = Viewport::new(24, 100);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 76);
        assert_eq!(vp.scroll_percent(), 100);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.scroll_percent(), 0);
    }

    #[test]
    fn test_scroll_percent_rounds() {
        let mut vp = Viewport::new(20, 23);
        vp.go_to_line(1);
        // 1 of 3 possible steps
        assert_eq!(vp.scroll_percent(), 33);
        vp.go_to_line(2);
        assert_eq!(vp.scroll_percent(), 67);
    }

    #[test]
    fn test_fit_to_taller_pane_pulls_top_back() {
        let mut vp = Viewport::new(10, 50);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 40);
        vp.fit(30, 50);
        assert_eq!(vp.offset(), 20);
        assert_eq!(vp.height(), 30);
    }

    #[test]
    fn test_fit_to_shorter_page_keeps_top_in_range() {
        let mut vp = Viewport::new(10, 100);
        vp.go_to_line(60);
        vp.fit(10, 40);
        assert_eq!(vp.offset(), 30);
        assert_eq!(vp.total_lines(), 40);
    }

    #[test]
    fn test_fit_keeps_top_when_it_still_fits() {
        let mut vp = Viewport::new(10, 100);
        vp.go_to_line(12);
        vp.fit(8, 120);
        assert_eq!(vp.offset(), 12);
    }

    proptest! {
        #[test]
        fn test_top_stays_within_page(
            rows in 0u16..60,
            lines in 0usize..400,
            steps in prop::collection::vec(0u8..6, 0..30),
        ) {
            let mut vp = Viewport::new(rows, lines);
            for step in steps {
                match step {
                    0 => vp.scroll_down(7),
                    1 => vp.scroll_up(3),
                    2 => vp.page_down(),
                    3 => vp.half_page_up(),
                    4 => vp.go_to_bottom(),
                    _ => vp.go_to_line(lines / 2),
                }
                prop_assert!(vp.offset() <= lines.saturating_sub(usize::from(rows)));
                prop_assert!(vp.visible_range().end <= lines);
                prop_assert!(vp.scroll_percent() <= 100);
            }
        }
    }
}
