use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

/// Language shown in the status bar, with the served language in
/// parentheses when the page was not translated.
pub fn language_indicator(model: &Model) -> String {
    if model.served_language == model.language {
        model.language.code().to_string()
    } else {
        format!(
            "{} ({})",
            model.language.code(),
            model.served_language.code()
        )
    }
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let subject = model.hovered_link_url.as_ref().map_or_else(
        || model.current_title.clone(),
        |url| format!("link: {url}"),
    );

    let percent = model.viewport.scroll_percent();
    let line_info = format!(
        "Line {}/{}",
        (model.viewport.offset() + 1).min(model.viewport.total_lines().max(1)),
        model.viewport.total_lines()
    );

    let status = format!(
        " {}  [{}]  {}  [{}%]  ?:help",
        subject,
        language_indicator(model),
        line_info,
        percent
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
