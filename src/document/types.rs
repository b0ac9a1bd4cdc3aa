//! Core document types.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

/// Parser output before it is bound to a wrap width.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub lines: Vec<RenderedLine>,
    pub links: Vec<LinkRef>,
}

/// A help page laid out for a given width.
#[derive(Debug, Clone, Default)]
pub struct Document {
    lines: Vec<RenderedLine>,
    links: Vec<LinkRef>,
    /// Width the lines were wrapped to
    width: usize,
}

impl Document {
    pub(crate) fn from_parsed(result: ParsedDocument, width: usize) -> Self {
        Self {
            lines: result.lines,
            links: result.links,
            width,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// Clickable links in reading order.
    pub fn links(&self) -> &[LinkRef] {
        &self.links
    }

    /// Link under a cell of the rendered document, if any.
    pub fn link_at(&self, line: usize, column: usize) -> Option<&LinkRef> {
        self.links
            .iter()
            .find(|link| link.line == line && link.columns.contains(&column))
    }

    /// Up to `count` lines starting at `offset`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> Vec<&RenderedLine> {
        self.lines.iter().skip(offset).take(count).collect()
    }

    pub fn line_at(&self, index: usize) -> Option<&RenderedLine> {
        self.lines.get(index)
    }
}

/// One wrapped line of a page.
///
/// `content` is the plain text of the line;
/// `spans` carry the same text split by inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    line_type: LineType,
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: Vec::new(),
        }
    }

    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Styled pieces of the line, `None` for unstyled lines.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        if self.spans.is_empty() {
            None
        } else {
            Some(&self.spans)
        }
    }
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    /// Key combination, written `<kbd>…</kbd>` in the source
    pub keystroke: bool,
    pub link: bool,
    /// Placeholder standing in for a picture
    pub image: bool,
}

impl InlineStyle {
    /// Menu paths are written bold and italic.
    pub const fn is_menu(self) -> bool {
        self.strong && self.emphasis
    }
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
    /// Destination when the span is part of a link
    target: Option<String>,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self {
            text,
            style,
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Terminal columns taken by the span.
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// Block a line comes from, which decides its base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Paragraph,
    /// Page title is level 1, sections are level 2
    Heading(u8),
    BlockQuote,
    /// Nesting depth, 0 for top-level items
    ListItem(usize),
    HorizontalRule,
    Empty,
}

/// A clickable stretch of text. A link wrapped over two lines is
/// recorded once per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub text: String,
    /// Destination as written in the page, e.g. `options.html`
    pub url: String,
    /// Rendered line index
    pub line: usize,
    /// Columns covered by the link text on that line
    pub columns: Range<usize>,
}
