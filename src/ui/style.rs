//! Colors and modifiers for the help browser.
//!
//! Uses ANSI colors so the terminal palette decides the final look.

use ratatui::style::{Color, Modifier, Style, Stylize};

use crate::document::{InlineStyle, LineType};

/// Get the style for a given line type.
pub fn style_for_line_type(line_type: &LineType) -> Style {
    match line_type {
        // Page title
        LineType::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LineType::BlockQuote => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::ITALIC),
        LineType::HorizontalRule => Style::default()
            .fg(Color::Indexed(240))
            .add_modifier(Modifier::DIM),
        LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => Style::default(),
    }
}

/// Get the style for an inline span, merged with a base line style.
///
/// Menus (`***Menu***`) come out bold italic in yellow, buttons
/// (`**Button**`) bold, and keystrokes (`<kbd>`) underlined on a dark
/// background.
pub fn style_for_inline(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;

    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.is_menu() {
        style = style.fg(Color::Yellow);
    }
    if inline.keystroke {
        style = style
            .bg(Color::Indexed(236))
            .add_modifier(Modifier::UNDERLINED);
    }
    if inline.image {
        style = style.fg(Color::Magenta).add_modifier(Modifier::ITALIC);
    }
    if inline.link {
        style = style.fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED);
    }

    style
}

/// Style of a navigation row.
pub fn tree_row_style(has_children: bool, current: bool, selected: bool) -> Style {
    let mut style = if has_children {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    if current {
        style = style.add_modifier(Modifier::BOLD);
    }
    if selected {
        style = style.reversed();
    }
    style
}

/// Border style of a pane, highlighted when it has keyboard focus.
pub fn pane_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Style of the divider column, highlighted while it is being dragged.
pub fn divider_style(dragging: bool) -> Style {
    if dragging {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Indexed(240))
    }
}
