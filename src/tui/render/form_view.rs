use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{FormField, Priority};
use crate::ops::display::priority_class;
use crate::tui::app::{App, Mode};

/// Rows the form occupies, borders included
pub const FORM_HEIGHT: u16 = 9;
/// Visible rows of the description field
const DESCRIPTION_ROWS: usize = 3;
const LABEL_WIDTH: usize = 13;
const CURSOR: &str = "\u{258C}"; // ▌

/// Render the create form: four fields and the submit control
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let editing = app.mode == Mode::Form;
    let busy = app.controller.is_busy();

    let border_color = if editing && !busy {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New Task ")
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));

    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::ALL {
        let focused = editing && !busy && app.form_focus == field;
        match field {
            FormField::Description => {
                let rows = field_rows(app, field, focused);
                for (i, row) in rows.into_iter().enumerate() {
                    let label = if i == 0 { Some(field) } else { None };
                    lines.push(field_line(app, label, focused, row));
                }
            }
            FormField::Priority => {
                let value = priority_spans(app, busy);
                let mut line = field_line(app, Some(field), focused, Vec::new());
                line.spans.extend(value);
                lines.push(line);
            }
            _ => {
                let row = field_rows(app, field, focused)
                    .into_iter()
                    .next()
                    .unwrap_or_default();
                lines.push(field_line(app, Some(field), focused, row));
            }
        }
    }

    let button = if busy { "[ Adding... ]" } else { "[ Add Task ]" };
    let button_style = if busy {
        Style::default().fg(app.theme.dim).bg(bg)
    } else {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled(" ".repeat(LABEL_WIDTH + 1), Style::default().bg(bg)),
        Span::styled(button, button_style),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Label column followed by the value spans
fn field_line<'a>(
    app: &App,
    label: Option<FormField>,
    focused: bool,
    value: Vec<Span<'a>>,
) -> Line<'a> {
    let bg = app.theme.background;
    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let text = label.map_or("", |f| f.label());
    let mut spans = vec![Span::styled(
        format!(" {:<width$}", text, width = LABEL_WIDTH),
        label_style,
    )];
    spans.extend(value);
    Line::from(spans)
}

/// Visible rows of a text field, with the edit cursor drawn when focused.
/// Single-line fields produce one row; the description produces
/// `DESCRIPTION_ROWS`, scrolled to keep the cursor in view.
fn field_rows(app: &App, field: FormField, focused: bool) -> Vec<Vec<Span<'static>>> {
    let bg = app.theme.background;
    let value = app.controller.form().value(field);
    let text_style = if app.controller.is_busy() {
        Style::default().fg(app.theme.dim).bg(bg)
    } else {
        Style::default().fg(app.theme.text_bright).bg(bg)
    };
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
    let placeholder_style = Style::default().fg(app.theme.dim).bg(bg);

    let row_count = if field == FormField::Description {
        DESCRIPTION_ROWS
    } else {
        1
    };

    if value.is_empty() && !focused {
        let placeholder = match field {
            FormField::DueDate => "YYYY-MM-DD",
            _ => "(required)",
        };
        let mut rows = vec![vec![Span::styled(placeholder, placeholder_style)]];
        rows.resize(row_count, Vec::new());
        return rows;
    }

    // Split into lines, remembering where the cursor falls
    let cursor = app.edit_cursor.min(value.len());
    let mut rows: Vec<Vec<Span<'static>>> = Vec::new();
    let mut cursor_row = 0;
    let mut offset = 0;
    for (i, line) in value.split('\n').enumerate() {
        let start = offset;
        let end = start + line.len();
        offset = end + 1;
        if focused && cursor >= start && cursor <= end {
            cursor_row = i;
            let split = cursor - start;
            rows.push(vec![
                Span::styled(line[..split].to_string(), text_style),
                Span::styled(CURSOR, cursor_style),
                Span::styled(line[split..].to_string(), text_style),
            ]);
        } else {
            rows.push(vec![Span::styled(line.to_string(), text_style)]);
        }
    }

    let first = if cursor_row + 1 > row_count {
        cursor_row + 1 - row_count
    } else {
        0
    };
    let mut visible: Vec<_> = rows.into_iter().skip(first).take(row_count).collect();
    visible.resize(row_count, Vec::new());
    visible
}

/// The priority select: "< High >", or a dim prompt when nothing is chosen
fn priority_spans(app: &App, busy: bool) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let value = &app.controller.form().priority;
    let Some(priority) = Priority::from_choice(value) else {
        return vec![Span::styled("< Select priority >", dim)];
    };
    let color = if busy {
        app.theme.dim
    } else {
        app.theme.priority_color(priority_class(&priority))
    };
    vec![
        Span::styled("< ", dim),
        Span::styled(
            priority.as_str().to_string(),
            Style::default().fg(color).bg(bg),
        ),
        Span::styled(" >", dim),
    ]
}
