use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::ops::display::{format_due_date, priority_class, status_label};
use crate::tui::app::{App, Mode};
use crate::util::unicode::pad_to_width;

/// Column headers and their widths in cells. The last column takes the rest.
const COLUMNS: [(&str, usize); 6] = [
    ("Title", 22),
    ("Description", 30),
    ("Due Date", 14),
    ("Priority", 10),
    ("Status", 11),
    ("Actions", 0),
];

/// Render the sorted task list as a table, one row per task
pub fn render_task_table(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut lines: Vec<Line> = Vec::new();

    let header_style = Style::default()
        .fg(app.theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let mut header = vec![Span::styled(" ", header_style)];
    for (name, width) in COLUMNS {
        header.push(Span::styled(pad(name, width), header_style));
    }
    lines.push(Line::from(header));

    let tasks = app.tasks();
    if tasks.is_empty() {
        let message = if app.controller.is_busy() {
            " Loading..."
        } else {
            " No tasks yet"
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    } else {
        // Keep the cursor row on screen
        let visible = (area.height as usize).saturating_sub(1).max(1);
        let first = (app.cursor + 1).saturating_sub(visible);
        for (i, task) in tasks.iter().enumerate().skip(first).take(visible) {
            let selected = i == app.cursor && app.mode != Mode::Form;
            lines.push(task_row(app, task, selected, area.width as usize));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn task_row<'a>(app: &App, task: &Task, selected: bool, width: usize) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let text = if task.completed {
        app.theme.dim
    } else {
        app.theme.text_bright
    };
    let style = |fg: Color| Style::default().fg(fg).bg(bg);

    let status_color = if task.completed {
        app.theme.green
    } else {
        app.theme.text
    };
    let mut title_style = style(text);
    if task.completed {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }

    // Multi-line descriptions show their first line
    let description = task.description.lines().next().unwrap_or("");
    let priority_color = app.theme.priority_color(priority_class(&task.priority));

    let cells = [
        (task.title.clone(), title_style),
        (description.to_string(), style(app.theme.text)),
        (format_due_date(&task.due_date), style(text)),
        (task.priority.to_string(), style(priority_color)),
        (status_label(task).to_string(), style(status_color)),
        ("Delete".to_string(), style(app.theme.red)),
    ];

    let marker = if selected { "\u{25B8}" } else { " " }; // ▸
    let mut spans = vec![Span::styled(marker, style(app.theme.highlight))];
    let mut used = 1;
    for ((value, cell_style), (_, col_width)) in cells.into_iter().zip(COLUMNS) {
        let col_width = if col_width == 0 {
            width.saturating_sub(used)
        } else {
            col_width
        };
        used += col_width;
        spans.push(Span::styled(pad(&value, col_width), cell_style));
    }
    Line::from(spans)
}

/// Fit `s` into `width` cells, always leaving one trailing cell as the
/// column gap
fn pad(s: &str, width: usize) -> String {
    if width == 0 {
        return s.to_string();
    }
    format!("{} ", pad_to_width(s, width - 1))
}
