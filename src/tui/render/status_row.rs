use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if app.controller.is_busy() {
        spans.push(Span::styled(
            " Working...",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    } else if app.mode == Mode::Confirm {
        let title = app
            .controller
            .pending_delete()
            .and_then(|id| app.controller.state().find_task(id))
            .map_or("", |t| t.title.as_str());
        spans.push(Span::styled(
            format!(" Delete \"{}\"?", title),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    let hint = match app.mode {
        Mode::Navigate => "a add  space toggle  d delete  ? help",
        Mode::Form => "Tab next  Enter add  Esc back",
        Mode::Confirm => "y confirm  n cancel",
    };
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint) + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
