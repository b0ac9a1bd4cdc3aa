use super::*;
use crate::app::{Message, Model, update};
use crate::i18n::Language;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(100, 30);
    Terminal::new(backend).unwrap()
}

fn create_test_model() -> Model {
    Model::new(Language::English, (100, 30), 30, 20).unwrap()
}

fn draw(model: &Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn column_text(buffer: &Buffer, x: u16, rows: std::ops::Range<u16>) -> String {
    rows.map(|y| buffer[(x, y)].symbol()).collect()
}

#[test]
fn test_screen_layout_follows_splitter() {
    let model = create_test_model();
    let layout = screen_layout(Rect::new(0, 0, 100, 30), &model);
    assert_eq!(layout.panes.tree, Rect::new(0, 0, 30, 29));
    assert_eq!(layout.panes.divider, Rect::new(30, 0, 1, 29));
    assert_eq!(layout.panes.document, Rect::new(31, 0, 69, 29));
    assert_eq!(layout.status, Rect::new(0, 29, 100, 1));
}

#[test]
fn test_render_shows_tree_labels_and_title() {
    let buffer = draw(&create_test_model());
    assert!(row_text(&buffer, 0).contains("Topics"));
    assert!(row_text(&buffer, 1).contains("Overview"));
    assert!(row_text(&buffer, 2).contains("\u{25b8} Getting started"));
    assert!(row_text(&buffer, 28).contains("c: Collapse all"));
}

#[test]
fn test_render_shows_page_in_document_pane() {
    let buffer = draw(&create_test_model());
    let first: String = row_text(&buffer, 0).chars().skip(33).collect();
    // Document starts after the divider and the padding
    assert!(first.starts_with("Using the help system"));
}

#[test]
fn test_render_draws_divider_column() {
    let buffer = draw(&create_test_model());
    assert_eq!(
        column_text(&buffer, 30, 0..29),
        "\u{2502}".repeat(29)
    );
}

#[test]
fn test_divider_highlighted_while_dragging() {
    let model = update(create_test_model(), Message::DividerPress(30));
    let buffer = draw(&model);
    assert_eq!(buffer[(30, 3)].bg, Color::Yellow);

    let model = update(model, Message::PointerRelease);
    let buffer = draw(&model);
    assert_ne!(buffer[(30, 3)].bg, Color::Yellow);
}

#[test]
fn test_render_follows_dragged_divider() {
    let model = update(create_test_model(), Message::DividerPress(30));
    let model = update(model, Message::PointerMove(45));
    let model = update(model, Message::PointerRelease);
    let buffer = draw(&model);
    assert_eq!(buffer[(45, 5)].symbol(), "\u{2502}");
    assert_ne!(buffer[(30, 5)].symbol(), "\u{2502}");
    let first: String = row_text(&buffer, 0).chars().skip(48).collect();
    assert!(first.starts_with("Using the help system"));
}

#[test]
fn test_render_with_document_pane_pushed_off_screen() {
    let model = update(create_test_model(), Message::DividerPress(30));
    let model = update(model, Message::PointerMove(150));
    let buffer = draw(&model);
    // Tree pane fills the whole width, its right border on the last column
    assert_eq!(buffer[(99, 5)].symbol(), "\u{2502}");
    assert!(!row_text(&buffer, 0).contains("Using the help system"));
}

#[test]
fn test_status_bar_shows_title_language_and_position() {
    let buffer = draw(&create_test_model());
    let status = row_text(&buffer, 29);
    assert!(status.contains("Using the help system"));
    assert!(status.contains("[en_US]"));
    assert!(status.contains("Line 1/"));
    assert!(status.contains("?:help"));
}

#[test]
fn test_status_bar_marks_fallback_language() {
    let model = Model::new(Language::Esperanto, (100, 30), 30, 20).unwrap();
    assert_eq!(language_indicator(&model), "eo (en_US)");
    let buffer = draw(&model);
    assert!(row_text(&buffer, 29).contains("[eo (en_US)]"));
}

#[test]
fn test_toast_renders_above_status_bar() {
    let model = update(create_test_model(), Message::OpenTopic("nope".to_string()));
    let buffer = draw(&model);
    assert!(row_text(&buffer, 28).starts_with("[error]"));
}

#[test]
fn test_hovered_link_replaces_title_in_status_bar() {
    let model = update(
        create_test_model(),
        Message::HoverLink(Some("getting_started.html".to_string())),
    );
    let buffer = draw(&model);
    assert!(row_text(&buffer, 29).contains("link: getting_started.html"));
}

#[test]
fn test_help_overlay_lists_divider_keys() {
    let model = update(create_test_model(), Message::ToggleHelp);
    let buffer = draw(&model);
    let text: String = (0..30).map(|y| row_text(&buffer, y)).collect();
    assert!(text.contains("Keys"));
    assert!(text.contains("Move the divider"));
    assert!(text.contains("Collapse all"));
}

#[test]
fn test_tree_labels_follow_language() {
    let model = Model::new(Language::French, (100, 30), 30, 20).unwrap();
    let buffer = draw(&model);
    assert!(row_text(&buffer, 0).contains("Sujets"));
}

#[test]
fn test_tree_inner_area_excludes_border() {
    assert_eq!(
        tree_inner_area(Rect::new(0, 0, 30, 29)),
        Rect::new(1, 1, 28, 27)
    );
}
