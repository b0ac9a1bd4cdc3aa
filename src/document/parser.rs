//! Markdown layout with comrak.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use unicode_width::UnicodeWidthStr;

use super::types::{
    Document, InlineSpan, InlineStyle, LineType, LinkRef, ParsedDocument,
    RenderedLine,
};

const QUOTE_PREFIX: &str = "│ ";

impl Document {
    pub fn parse(source: &str) -> Self {
        parse(source)
    }

    pub fn parse_with_layout(source: &str, width: u16) -> Self {
        parse_with_layout(source, width)
    }
}

/// Parse markdown source into a Document.
pub fn parse(source: &str) -> Document {
    parse_with_layout(source, 80)
}

/// Parse markdown source into a Document wrapped to `width` columns.
///
/// # Example
///
/// ```
/// use jenealogio_help::document::Document;
///
/// let doc = Document::parse_with_layout("# Links\n\nPress <kbd>Ctrl+L</kbd>.", 40);
/// assert_eq!(doc.line_at(0).unwrap().content(), "Links");
/// assert_eq!(doc.line_at(2).unwrap().content(), "Press Ctrl+L.");
/// ```
pub fn parse_with_layout(source: &str, width: u16) -> Document {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let wrap_width = usize::from(width.max(1));
    let mut layout = Layout {
        out: ParsedDocument::default(),
        wrap_width,
    };
    layout.process_node(root, 0, None);
    trim_trailing_empty_lines(&mut layout.out.lines);
    Document::from_parsed(layout.out, wrap_width)
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.autolink = true;
    options
}

struct Layout {
    out: ParsedDocument,
    wrap_width: usize,
}

impl Layout {
    fn process_node<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, list_marker: Option<&str>) {
        match &node.data.borrow().value {
            NodeValue::Document => {
                for child in node.children() {
                    self.process_node(child, depth, None);
                }
            }

            NodeValue::Heading(heading) => {
                if !self.out.lines.is_empty() {
                    ensure_trailing_empty_lines(&mut self.out.lines, 1);
                }
                let mut style = InlineStyle::default();
                style.strong = true;
                let segments = collect_inline_spans(node, style);
                self.push_wrapped(&segments, LineType::Heading(heading.level), "", "");
                self.push_empty();
            }

            NodeValue::Paragraph => {
                let segments = collect_inline_spans(node, InlineStyle::default());
                self.push_wrapped(&segments, LineType::Paragraph, "", "");
                self.push_empty();
            }

            NodeValue::List(list) => {
                let list_depth = depth + 1;
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let list_len = node.children().count();
                let number_width = (list.start + list_len.saturating_sub(1)).to_string().len();

                for (index, child) in node.children().enumerate() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => format!(
                            "{:>width$}{delimiter} ",
                            list.start + index,
                            width = number_width
                        ),
                    };
                    self.process_node(child, list_depth, Some(&marker));
                }
                if depth == 0 {
                    self.push_empty();
                }
            }

            NodeValue::Item(_) => {
                let indent = "  ".repeat(depth.saturating_sub(1));
                let marker = list_marker.unwrap_or("- ");
                let prefix_first = format!("{indent}{marker}");
                let prefix_next = format!("{indent}{}", " ".repeat(marker.width()));
                let mut rendered_any = false;

                for child in node.children() {
                    if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                        if rendered_any {
                            self.out
                                .lines
                                .push(RenderedLine::new(String::new(), LineType::ListItem(depth)));
                        }
                        let segments = collect_inline_spans(child, InlineStyle::default());
                        let prefix = if rendered_any {
                            &prefix_next
                        } else {
                            &prefix_first
                        };
                        self.push_wrapped(
                            &segments,
                            LineType::ListItem(depth),
                            prefix,
                            &prefix_next,
                        );
                        rendered_any = true;
                    } else {
                        self.process_node(child, depth, None);
                    }
                }

                if !rendered_any {
                    self.out.lines.push(RenderedLine::new(
                        prefix_first.trim_end().to_string(),
                        LineType::ListItem(depth),
                    ));
                }
            }

            NodeValue::BlockQuote => {
                for child in node.children() {
                    let segments = collect_inline_spans(child, InlineStyle::default());
                    self.push_wrapped(&segments, LineType::BlockQuote, QUOTE_PREFIX, QUOTE_PREFIX);
                }
                self.push_empty();
            }

            NodeValue::ThematicBreak => {
                self.out.lines.push(RenderedLine::new(
                    "─".repeat(self.wrap_width),
                    LineType::HorizontalRule,
                ));
                self.push_empty();
            }

            // Raw block markup is dropped; the inline tags that matter are
            // handled in paragraphs.
            NodeValue::HtmlBlock(_) => {}

            _ => {
                for child in node.children() {
                    self.process_node(child, depth, list_marker);
                }
            }
        }
    }

    fn push_empty(&mut self) {
        self.out
            .lines
            .push(RenderedLine::new(String::new(), LineType::Empty));
    }

    /// Wrap inline segments and record the links found on each line.
    fn push_wrapped(
        &mut self,
        segments: &[Vec<InlineSpan>],
        line_type: LineType,
        prefix_first: &str,
        prefix_next: &str,
    ) {
        for (index, segment) in segments.iter().enumerate() {
            let is_blank = segment.iter().all(|s| s.text().trim().is_empty());
            if index > 0 && is_blank {
                continue;
            }
            let prefix = if index == 0 { prefix_first } else { prefix_next };
            for line_spans in wrap_spans(segment, self.wrap_width, prefix, prefix_next) {
                let line = self.out.lines.len();
                record_links(&line_spans, line, &mut self.out.links);
                let content = spans_to_string(&line_spans);
                self.out
                    .lines
                    .push(RenderedLine::with_spans(content, line_type, line_spans));
            }
        }
    }
}

fn ensure_trailing_empty_lines(lines: &mut Vec<RenderedLine>, count: usize) {
    let existing = lines
        .iter()
        .rev()
        .take_while(|line| matches!(line.line_type(), LineType::Empty))
        .count();
    for _ in existing..count {
        lines.push(RenderedLine::new(String::new(), LineType::Empty));
    }
}

fn trim_trailing_empty_lines(lines: &mut Vec<RenderedLine>) {
    while lines
        .last()
        .is_some_and(|line| matches!(line.line_type(), LineType::Empty))
    {
        lines.pop();
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        NodeValue::HtmlInline(html) if is_break_tag(html) => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

/// Collect the inline content of a block, split at hard line breaks.
fn collect_inline_spans<'a>(node: &'a AstNode<'a>, style: InlineStyle) -> Vec<Vec<InlineSpan>> {
    let mut collector = InlineCollector {
        segments: vec![Vec::new()],
        keystroke: false,
    };
    for child in node.children() {
        collector.collect(child, style, None);
    }
    collector.segments
}

struct InlineCollector {
    segments: Vec<Vec<InlineSpan>>,
    /// Inside `<kbd>` … `</kbd>`
    keystroke: bool,
}

impl InlineCollector {
    fn push(&mut self, text: String, mut style: InlineStyle, target: Option<&str>) {
        style.keystroke |= self.keystroke;
        let span = InlineSpan::new(text, style).with_target(target.map(ToString::to_string));
        if let Some(segment) = self.segments.last_mut() {
            segment.push(span);
        }
    }

    fn collect<'a>(&mut self, node: &'a AstNode<'a>, style: InlineStyle, target: Option<&str>) {
        match &node.data.borrow().value {
            NodeValue::List(_) | NodeValue::Item(_) => {}
            NodeValue::Text(t) => self.push(t.clone(), style, target),
            NodeValue::Code(code) => self.push(code.literal.clone(), style, target),
            NodeValue::Emph => {
                let mut next = style;
                next.emphasis = true;
                for child in node.children() {
                    self.collect(child, next, target);
                }
            }
            NodeValue::Strong => {
                let mut next = style;
                next.strong = true;
                for child in node.children() {
                    self.collect(child, next, target);
                }
            }
            NodeValue::Link(link) => {
                let mut next = style;
                next.link = true;
                for child in node.children() {
                    self.collect(child, next, Some(&link.url));
                }
            }
            NodeValue::Image(image) => {
                let alt = extract_text(node);
                let label = if alt.is_empty() {
                    image.url.rsplit('/').next().unwrap_or_default().to_string()
                } else {
                    alt
                };
                let mut next = style;
                next.image = true;
                self.push(format!("[{label}]"), next, target);
            }
            NodeValue::HtmlInline(html) => self.html_tag(html),
            NodeValue::SoftBreak => self.push(" ".to_string(), style, target),
            NodeValue::LineBreak => self.segments.push(Vec::new()),
            _ => {
                for child in node.children() {
                    self.collect(child, style, target);
                }
            }
        }
    }

    fn html_tag(&mut self, html: &str) {
        let tag = html.trim().to_ascii_lowercase();
        if tag == "<kbd>" {
            self.keystroke = true;
        } else if tag == "</kbd>" {
            self.keystroke = false;
        } else if is_break_tag(&tag) {
            self.segments.push(Vec::new());
        }
    }
}

fn is_break_tag(html: &str) -> bool {
    let tag = html.trim().to_ascii_lowercase();
    matches!(tag.as_str(), "<br>" | "<br/>" | "<br />")
}

/// Attach a [`LinkRef`] for every run of spans sharing a link target.
fn record_links(spans: &[InlineSpan], line: usize, links: &mut Vec<LinkRef>) {
    let mut column = 0usize;
    let mut current: Option<LinkRef> = None;
    for span in spans {
        let width = span.width();
        match (span.target(), current.as_mut()) {
            (Some(url), Some(link)) if link.url == url => {
                link.text.push_str(span.text());
                link.columns.end = column + width;
            }
            (target, _) => {
                links.extend(current.take());
                current = target.map(|url| LinkRef {
                    text: span.text().to_string(),
                    url: url.to_string(),
                    line,
                    columns: column..column + width,
                });
            }
        }
        column += width;
    }
    links.extend(current);
    for link in links.iter_mut().filter(|l| l.line == line) {
        let trimmed = link.text.trim_end().to_string();
        link.columns.end -= link.text.width() - trimmed.width();
        link.text = trimmed;
    }
}

fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let mut tokens: Vec<InlineSpan> = Vec::new();
    for span in spans {
        tokens.extend(split_inline_tokens(span));
    }

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    let start_new_line = |prefix: &str,
                          current: &mut Vec<InlineSpan>,
                          current_len: &mut usize,
                          has_word: &mut bool| {
        current.clear();
        if prefix.is_empty() {
            *current_len = 0;
        } else {
            current.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
            *current_len = prefix.width();
        }
        *has_word = false;
    };

    start_new_line(prefix_first, &mut current, &mut current_len, &mut has_word);

    for token in tokens {
        let token_len = token.width();
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word && !token_is_ws {
            strip_trailing_whitespace(&mut current);
            lines.push(current.clone());
            start_new_line(prefix_next, &mut current, &mut current_len, &mut has_word);
        }

        if token_is_ws && !has_word {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }

        current_len += token_len;
        current.push(token);
        if !token_is_ws {
            has_word = true;
        }
    }

    strip_trailing_whitespace(&mut current);
    lines.push(current);
    lines
}

fn strip_trailing_whitespace(spans: &mut Vec<InlineSpan>) {
    while spans.len() > 1
        && spans
            .last()
            .is_some_and(|s| s.text().chars().all(char::is_whitespace))
    {
        spans.pop();
    }
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;
    let target = span.target().map(ToString::to_string);
    let token = |text: String| InlineSpan::new(text, span.style()).with_target(target.clone());

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        match ws_state {
            Some(state) if state == is_ws => buf.push(ch),
            Some(_) => {
                out.push(token(std::mem::take(&mut buf)));
                buf.push(ch);
                ws_state = Some(is_ws);
            }
            None => {
                buf.push(ch);
                ws_state = Some(is_ws);
            }
        }
    }

    if !buf.is_empty() {
        out.push(token(buf));
    }

    out
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}
