pub mod confirm_popup;
pub mod form_view;
pub mod help_overlay;
pub mod status_row;
pub mod task_table;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};

/// Draw one frame: header, error banner, form, table, status row, overlays
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let banner_height = if app.controller.state().error.is_some() {
        1
    } else {
        0
    };

    // Layout: header | error banner | form | table | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Length(form_view::FORM_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_error_banner(frame, app, chunks[1]);
    form_view::render_form(frame, app, chunks[2]);
    task_table::render_task_table(frame, app, chunks[3]);

    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[4]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        " Task Manager",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let count = app.tasks().len();
    spans.push(Span::styled(
        format!("  {} task{}", count, if count == 1 { "" } else { "s" }),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The most recent error, shown until the next action clears it
fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.controller.state().error else {
        return;
    };
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.red)
        .add_modifier(Modifier::BOLD);
    let banner = Paragraph::new(format!(" ! {}", message)).style(style);
    frame.render_widget(banner, area);
}
