use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the delete confirmation popup for the pending delete
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(id) = app.controller.pending_delete() else {
        return;
    };
    let title = app
        .controller
        .state()
        .find_task(id)
        .map_or_else(|| id.to_string(), |t| t.title.clone());

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let bright_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let warn_style = Style::default().fg(app.theme.red).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w: u16 = 46.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(6) as usize;

    let lines = vec![
        Line::from(Span::styled(" Delete Task", header_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(truncate_to_width(&title, inner_w), bright_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("  This cannot be undone.", warn_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("y", dim_style),
            Span::styled(" delete  ", text_style),
            Span::styled("n", dim_style),
            Span::styled(" cancel", text_style),
        ]),
    ];

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
