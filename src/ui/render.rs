use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Focus, Model};
use crate::topics::TreeRow;

use super::panes::PaneRects;
use super::{DOCUMENT_LEFT_PADDING, overlays, status, style};

/// Columns taken by the expand marker in front of a tree label.
pub const TREE_MARKER_WIDTH: u16 = 2;

/// Where everything goes on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub panes: PaneRects,
    pub status: Rect,
}

/// Split the frame into the split panes and the status bar below them.
pub fn screen_layout(area: Rect, model: &Model) -> ScreenLayout {
    let main = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    ScreenLayout {
        panes: model.splitter.regions().rects(main),
        status,
    }
}

/// Rows area of the tree pane, inside its border.
pub fn tree_inner_area(tree: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(tree)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = screen_layout(area, model);

    render_tree(model, frame, layout.panes.tree);
    render_divider(model, frame, layout.panes.divider);
    render_document(model, frame, layout.panes.document);

    if model.active_toast().is_some() && layout.status.y > area.y {
        let toast_area = Rect {
            y: layout.status.y - 1,
            ..layout.status
        };
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_tree(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width == 0 {
        return;
    }
    let visible_rows = tree_inner_area(area).height as usize;
    let start = model.tree_scroll_offset.min(
        model.tree_rows.len().saturating_sub(visible_rows),
    );

    let items: Vec<Line> = model
        .tree_rows
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_rows)
        .map(|(i, row)| tree_line(model, i, row))
        .collect();

    let block = Block::default()
        .title(model.bundle.text("browser.topics"))
        .title_bottom(format!(" c: {} ", model.bundle.text("button.collapse_all")))
        .borders(Borders::ALL)
        .border_style(style::pane_border_style(model.focus == Focus::Tree));

    frame.render_widget(Paragraph::new(items).block(block), area);
}

fn tree_line<'a>(model: &'a Model, index: usize, row: &'a TreeRow) -> Line<'a> {
    let indent = " ".repeat(row.depth * usize::from(TREE_MARKER_WIDTH));
    let marker = match (row.has_children, row.expanded) {
        (true, true) => "\u{25be} ",
        (true, false) => "\u{25b8} ",
        (false, _) => "  ",
    };
    let row_style = style::tree_row_style(
        row.has_children,
        row.id == model.current_id,
        model.tree_selected == Some(index),
    );
    Line::from(vec![
        Span::raw(indent),
        Span::styled(marker, row_style),
        Span::styled(model.bundle.text(&row.label), row_style),
    ])
}

fn render_divider(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width == 0 {
        return;
    }
    let bar: Vec<Line> = (0..area.height).map(|_| Line::raw("\u{2502}")).collect();
    let divider = Paragraph::new(bar).style(style::divider_style(model.splitter.is_dragging()));
    frame.render_widget(divider, area);
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width == 0 {
        return;
    }
    let visible_lines = model
        .document
        .visible_lines(model.viewport.offset(), model.viewport.height() as usize);

    let content: Vec<Line> = visible_lines
        .iter()
        .map(|line| {
            let line_style = style::style_for_line_type(line.line_type());
            match line.spans() {
                Some(spans) => Line::from(
                    spans
                        .iter()
                        .map(|span| {
                            Span::styled(
                                span.text(),
                                style::style_for_inline(line_style, span.style()),
                            )
                        })
                        .collect::<Vec<_>>(),
                ),
                None => Line::styled(line.content(), line_style),
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}
