use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::fake_api::FakeApi;
use crate::model::{Priority, Task, TaskId};
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 110;
pub const TERM_H: u16 = 30;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Three tasks in server order (not display order)
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new("1"),
            title: "Water plants".into(),
            description: "Balcony and kitchen".into(),
            due_date: "2025-01-20".into(),
            priority: Priority::Low,
            completed: false,
        },
        Task {
            id: TaskId::new("2"),
            title: "File taxes".into(),
            description: "Federal return".into(),
            due_date: "2025-04-15".into(),
            priority: Priority::High,
            completed: false,
        },
        Task {
            id: TaskId::new("3"),
            title: "Book flights".into(),
            description: "Lisbon trip".into(),
            due_date: "2025-01-05".into(),
            priority: Priority::Medium,
            completed: true,
        },
    ]
}

/// An App over a fake API, with the initial load already run
pub fn app_with_tasks(tasks: Vec<Task>) -> (App, FakeApi) {
    let api = FakeApi::with_tasks(tasks);
    let mut app = App::new(Box::new(api.clone()), Theme::default());
    app.run_pending();
    (app, api)
}

/// Fill the create form with a valid task
pub fn fill_form(app: &mut App) {
    let form = app.controller.form_mut();
    form.title = "A".into();
    form.description = "d".into();
    form.due_date = "2025-01-10".into();
    form.priority = "High".into();
}
