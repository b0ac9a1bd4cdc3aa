use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Focus, Message, Model};
use crate::ui::{self, DOCUMENT_LEFT_PADDING, TREE_MARKER_WIDTH};

use super::event_loop::ResizeDebouncer;

/// Lines scrolled by one mouse wheel notch.
const WHEEL_LINES: usize = 3;
/// Columns the divider moves per `[` or `]`.
const NUDGE_COLUMNS: i32 = 2;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    /// Map a mouse event to a message.
    ///
    /// Divider events only get through while the split pane has the
    /// matching listener registered: presses on the divider column while
    /// idle, moves and releases anywhere on screen while dragging.
    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let listeners = model.splitter.listeners();
        match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved
                if listeners.window_move =>
            {
                return Some(Message::PointerMove(mouse.column));
            }
            MouseEventKind::Up(MouseButton::Left) if listeners.window_release => {
                return Some(Message::PointerRelease);
            }
            _ => {}
        }

        if model.help_visible {
            return None;
        }

        let area = Rect::new(0, 0, model.terminal_width, model.terminal_height);
        let layout = ui::screen_layout(area, model);

        if point_in_rect(mouse.column, mouse.row, layout.panes.divider) {
            return match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if listeners.divider_press => {
                    Some(Message::DividerPress(mouse.column))
                }
                _ => None,
            };
        }

        if point_in_rect(mouse.column, mouse.row, layout.panes.tree) {
            return match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) => tree_click(model, layout.panes.tree, mouse),
                MouseEventKind::ScrollDown => Some(Message::TreeScrollDown),
                MouseEventKind::ScrollUp => Some(Message::TreeScrollUp),
                MouseEventKind::Moved if model.hovered_link_url.is_some() => {
                    Some(Message::HoverLink(None))
                }
                _ => None,
            };
        }

        let doc_area = layout.panes.document;
        if !point_in_rect(mouse.column, mouse.row, doc_area) {
            return None;
        }
        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                link_under_pointer(model, doc_area, mouse).map(Message::FollowLink)
            }
            MouseEventKind::Moved => {
                let hovered = link_under_pointer(model, doc_area, mouse);
                (hovered != model.hovered_link_url).then_some(Message::HoverLink(hovered))
            }
            MouseEventKind::ScrollDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::ScrollUp => model
                .viewport
                .can_scroll_up()
                .then_some(Message::ScrollUp(WHEEL_LINES)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        // Keys that work from either pane
        match key.code {
            KeyCode::Char('q') => return Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Message::Quit);
            }
            KeyCode::Char('?') | KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Tab | KeyCode::BackTab => return Some(Message::SwitchFocus),
            KeyCode::Char('c') => return Some(Message::CollapseAll),
            KeyCode::Char('H') => return Some(Message::GoHome),
            KeyCode::Char('L') => return Some(Message::NextLanguage),
            KeyCode::Char('[') => return Some(Message::NudgeDivider(-NUDGE_COLUMNS)),
            KeyCode::Char(']') => return Some(Message::NudgeDivider(NUDGE_COLUMNS)),
            _ => {}
        }

        if model.focus == Focus::Tree {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::TreeDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::TreeUp),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Message::TreeSelect),
                KeyCode::Char('h') | KeyCode::Left => Some(Message::TreeCollapse),
                KeyCode::Char('l') | KeyCode::Right => Some(Message::TreeExpand),
                KeyCode::PageDown => Some(Message::PageDown),
                KeyCode::PageUp => Some(Message::PageUp),
                KeyCode::Esc => Some(Message::SwitchFocus),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => {
                model.viewport.can_scroll_up().then_some(Message::ScrollUp(1))
            }
            KeyCode::Char(' ') | KeyCode::PageDown => {
                model.viewport.can_scroll_down().then_some(Message::PageDown)
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                model.viewport.can_scroll_up().then_some(Message::PageUp)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => model
                .viewport
                .can_scroll_down()
                .then_some(Message::HalfPageDown),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                model.viewport.can_scroll_up().then_some(Message::HalfPageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Enter => Some(Message::FollowVisibleLink),
            KeyCode::Esc => Some(Message::SwitchFocus),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        ui::render(model, frame);
    }
}

/// Row click in the tree pane: the marker column flips a branch, the
/// rest of the row opens the topic.
fn tree_click(model: &Model, tree_area: Rect, mouse: MouseEvent) -> Option<Message> {
    let inner = ui::tree_inner_area(tree_area);
    if !point_in_rect(mouse.column, mouse.row, inner) {
        return None;
    }
    let visible_rows = inner.height as usize;
    let start = model
        .tree_scroll_offset
        .min(model.tree_rows.len().saturating_sub(visible_rows));
    let idx = start + usize::from(mouse.row - inner.y);
    let row = model.tree_rows.get(idx)?;

    let column = usize::from(mouse.column - inner.x);
    let marker_start = row.depth * usize::from(TREE_MARKER_WIDTH);
    let on_marker = (marker_start..marker_start + usize::from(TREE_MARKER_WIDTH)).contains(&column);
    if row.has_children && on_marker {
        Some(Message::TreeToggle(idx))
    } else {
        Some(Message::TreeClick(idx))
    }
}

fn link_under_pointer(model: &Model, doc_area: Rect, mouse: MouseEvent) -> Option<String> {
    let line = model.viewport.offset() + usize::from(mouse.row.checked_sub(doc_area.y)?);
    let column = mouse
        .column
        .checked_sub(doc_area.x + DOCUMENT_LEFT_PADDING)?;
    model
        .document
        .link_at(line, usize::from(column))
        .map(|link| link.url.clone())
}

pub(super) const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
