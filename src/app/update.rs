use tracing::debug;

use crate::app::model::{Focus, Model, ToastLevel};
use crate::pages::HOME_PAGE;
use crate::topics::id_from_href;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Document
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to beginning of the page
    GoToTop,
    /// Go to end of the page
    GoToBottom,

    // Navigation tree
    /// Move tree selection up
    TreeUp,
    /// Move tree selection down
    TreeDown,
    /// Scroll tree viewport up
    TreeScrollUp,
    /// Scroll tree viewport down
    TreeScrollDown,
    /// Open the selected topic
    TreeSelect,
    /// Select and open the topic on a row
    TreeClick(usize),
    /// Select a row and flip its expansion
    TreeToggle(usize),
    /// Expand the selected topic, or step into it
    TreeExpand,
    /// Collapse the selected topic, or step out to its parent
    TreeCollapse,
    /// Collapse every branch of the tree
    CollapseAll,
    /// Switch focus between tree and document
    SwitchFocus,

    // Topics
    /// Open a topic by id
    OpenTopic(String),
    /// Follow a link target found in a page
    FollowLink(String),
    /// Follow the first link visible in the document pane
    FollowVisibleLink,
    /// Open the home page
    GoHome,
    /// Cycle to the next language
    NextLanguage,
    /// Update hovered link URL (or clear when none)
    HoverLink(Option<String>),

    // Divider
    /// Pointer pressed on the divider at a column
    DividerPress(u16),
    /// Pointer moved to a column
    PointerMove(u16),
    /// Pointer released
    PointerRelease,
    /// Move the divider by a number of columns from the keyboard
    NudgeDivider(i32),

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Document
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        // Navigation tree
        Message::TreeUp => {
            if let Some(sel) = model.tree_selected {
                model.tree_selected = Some(sel.saturating_sub(1));
                model.ensure_tree_selection_visible();
            }
        }
        Message::TreeDown => {
            if let Some(sel) = model.tree_selected {
                let max = model.tree_rows.len().saturating_sub(1);
                model.tree_selected = Some((sel + 1).min(max));
                model.ensure_tree_selection_visible();
            }
        }
        Message::TreeScrollUp => {
            model.tree_scroll_offset = model.tree_scroll_offset.saturating_sub(1);
        }
        Message::TreeScrollDown => {
            model.tree_scroll_offset =
                (model.tree_scroll_offset + 1).min(model.max_tree_scroll_offset());
        }
        Message::TreeSelect => {
            if let Some(id) = model.selected_row().map(|row| row.id.clone()) {
                model.open_topic(&id);
            }
        }
        Message::TreeClick(idx) => {
            if let Some(id) = model.tree_rows.get(idx).map(|row| row.id.clone()) {
                model.tree_selected = Some(idx);
                model.open_topic(&id);
            }
        }
        Message::TreeToggle(idx) => {
            if let Some(row) = model.tree_rows.get(idx).filter(|row| row.has_children) {
                let id = row.id.clone();
                model.tree_selected = Some(idx);
                model.tree_state.toggle(&id);
                model.refresh_tree_rows();
            }
        }
        Message::TreeExpand => expand_selected(&mut model),
        Message::TreeCollapse => collapse_selected(&mut model),
        Message::CollapseAll => {
            let root = model.selected_row().map(|row| {
                model
                    .tree
                    .ancestors(&row.id)
                    .and_then(|path| path.first().map(|id| (*id).to_string()))
                    .unwrap_or_else(|| row.id.clone())
            });
            model.tree_state.collapse_all();
            model.refresh_tree_rows();
            if let Some(idx) =
                root.and_then(|id| model.tree_rows.iter().position(|row| row.id == id))
            {
                model.tree_selected = Some(idx);
            }
            model.ensure_tree_selection_visible();
        }
        Message::SwitchFocus => {
            model.focus = match model.focus {
                Focus::Tree => Focus::Document,
                Focus::Document => Focus::Tree,
            };
        }

        // Topics
        Message::OpenTopic(id) => model.open_topic(&id),
        Message::FollowLink(url) => follow_link(&mut model, &url),
        Message::FollowVisibleLink => {
            let range = model.viewport.visible_range();
            let url = model
                .document
                .links()
                .iter()
                .find(|link| range.contains(&link.line))
                .map(|link| link.url.clone());
            match url {
                Some(url) => follow_link(&mut model, &url),
                None => {
                    let message = model.bundle.text("browser.no_link").to_string();
                    model.show_toast(ToastLevel::Info, message);
                }
            }
        }
        Message::GoHome => model.open_topic(HOME_PAGE),
        Message::NextLanguage => {
            let language = model.language.next();
            model.set_language(language);
            let mut message = format!(
                "{}: {}",
                model.bundle.text("browser.language"),
                language.name()
            );
            if model.served_language != language {
                message = format!("{message} ({})", model.bundle.text("browser.fallback"));
            }
            model.show_toast(ToastLevel::Info, message);
        }
        Message::HoverLink(url) => model.hovered_link_url = url,

        // Divider
        Message::DividerPress(column) => {
            model.splitter.press(i32::from(column));
        }
        Message::PointerMove(column) => {
            if model.splitter.pointer_move(i32::from(column)) {
                model.reflow_layout();
            }
        }
        Message::PointerRelease => {
            if model.splitter.release() {
                model.reflow_layout();
            }
        }
        Message::NudgeDivider(delta) => {
            let start = model.splitter.layout().divider_offset();
            if model.splitter.press(start) {
                model.splitter.pointer_move(start.saturating_add(delta));
                model.splitter.release();
                model.reflow_layout();
            }
        }

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Window
        Message::Resize(width, height) => {
            model.terminal_width = width;
            model.terminal_height = height;
            model.splitter.resize_viewport(i32::from(width));
            model.reflow_layout();
            model.refresh_tree_rows();
            model.ensure_tree_selection_visible();
        }
        Message::Redraw => {}

        // Application
        Message::Quit => model.should_quit = true,
    }
    model
}

/// Open the topic behind a page link. Links leaving the help pages are
/// only reported.
fn follow_link(model: &mut Model, url: &str) {
    match id_from_href(url) {
        Some(id) => model.open_topic(id),
        None => {
            debug!(url, "not following external link");
            model.show_toast(ToastLevel::Info, url.to_string());
        }
    }
}

fn expand_selected(model: &mut Model) {
    let Some(idx) = model.tree_selected else {
        return;
    };
    let Some(row) = model.tree_rows.get(idx) else {
        return;
    };
    if !row.has_children {
        return;
    }
    if row.expanded {
        model.tree_selected = Some(idx + 1);
    } else {
        let id = row.id.clone();
        model.tree_state.expand(&id);
        model.refresh_tree_rows();
    }
    model.ensure_tree_selection_visible();
}

fn collapse_selected(model: &mut Model) {
    let Some(row) = model.selected_row() else {
        return;
    };
    let id = row.id.clone();
    if row.expanded {
        model.tree_state.collapse(&id);
        model.refresh_tree_rows();
    } else if let Some(parent) = model
        .tree
        .ancestors(&id)
        .and_then(|path| path.last().map(|p| (*p).to_string()))
        && let Some(idx) = model.tree_rows.iter().position(|row| row.id == parent)
    {
        model.tree_selected = Some(idx);
    }
    model.ensure_tree_selection_visible();
}
