use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Page", section_style));
    lines.push(Line::raw("  j/k or Up/Down      Scroll"));
    lines.push(Line::raw("  Space/PageDown      Page down"));
    lines.push(Line::raw("  b/PageUp            Page up"));
    lines.push(Line::raw("  g / G               Top / bottom"));
    lines.push(Line::raw("  Enter               Follow first visible link"));
    lines.push(Line::raw(""));

    lines.push(Line::styled(model.bundle.text("browser.topics"), section_style));
    lines.push(Line::raw("  Tab                 Switch focus"));
    lines.push(Line::raw("  j/k, arrows, Enter  Select and open"));
    lines.push(Line::raw("  h / l               Collapse / expand"));
    lines.push(Line::raw(format!(
        "  c                   {}",
        model.bundle.text("button.collapse_all")
    )));
    lines.push(Line::raw(format!(
        "  H                   {}",
        model.bundle.text("button.home")
    )));
    lines.push(Line::raw(format!(
        "  L                   {}",
        model.bundle.text("browser.language")
    )));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Layout", section_style));
    lines.push(Line::raw("  Drag the divider    Resize the panes"));
    lines.push(Line::raw("  [ / ]               Move the divider"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  q / Ctrl-c          Quit"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title(model.bundle.text("browser.help_title"))
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let content_area = Rect {
        height: content_height,
        ..inner
    };
    frame.render_widget(Paragraph::new(lines), content_area);

    let footer_area = Rect {
        y: inner.y + content_height,
        height: inner.height.min(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(Line::styled("any key closes", dim_style)),
        footer_area,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
