//! Help page rendering for the terminal.
//!
//! This module handles:
//! - Parsing page markdown with comrak
//! - Styling the help conventions (menus, buttons, keystrokes)
//! - Wrapping text to the content pane and locating clickable links

mod parser;
mod types;

pub use parser::{parse, parse_with_layout};
pub use types::{
    Document, InlineSpan, InlineStyle, LineType, LinkRef, RenderedLine,
};

use crate::pages::Page;

/// Lay out a help page, title included, for a pane `width` columns wide.
pub fn render_page(page: &Page, width: u16) -> Document {
    parse_with_layout(&page.markdown(), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::pages::PageStore;

    #[test]
    fn test_render_page_starts_with_title() {
        let store = PageStore::embedded().unwrap();
        let page = store.get(Language::English, "getting_started.cards.add").unwrap();
        let doc = render_page(page, 60);
        assert_eq!(doc.line_at(0).unwrap().content(), "Adding cards");
        assert!(doc.line_count() > 10);
    }

    #[test]
    fn test_next_topic_link_points_to_following_page() {
        let store = PageStore::embedded().unwrap();
        let page = store.get(Language::English, "getting_started.cards.add").unwrap();
        let doc = render_page(page, 80);
        let last = doc.links().last().unwrap();
        assert_eq!(last.url, "getting_started.cards.edit.html");
        assert_eq!(last.text, "Editing cards");
    }

    #[test]
    fn test_narrow_width_keeps_every_word() {
        let store = PageStore::embedded().unwrap();
        let page = store.get(Language::French, "overview").unwrap();
        let wide = render_page(page, 200);
        let narrow = render_page(page, 20);
        let words = |doc: &Document| -> Vec<String> {
            doc.visible_lines(0, doc.line_count())
                .iter()
                .flat_map(|l| l.content().split_whitespace().map(str::to_string).collect::<Vec<_>>())
                .collect()
        };
        assert_eq!(words(&wide), words(&narrow));
        assert!(narrow.line_count() > wide.line_count());
    }
}
