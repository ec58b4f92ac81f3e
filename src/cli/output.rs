use crate::model::task::{Task, TaskId};
use crate::ops::display::format_due_date;
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

/// The list as a JSON array of tasks in wire form
pub fn tasks_to_json(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}

/// What `delete --json` prints when the prompt is declined
pub fn cancelled_to_json(id: &TaskId) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serde_json::json!({ "id": id.as_str(), "deleted": false }))
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const PRIORITY_WIDTH: usize = 6;
const DATE_WIDTH: usize = 12;
const TITLE_WIDTH: usize = 48;

fn status_char(task: &Task) -> char {
    if task.completed { 'x' } else { ' ' }
}

/// Format a single task as a one-line summary:
/// `[x] High   Jan 5, 2025  12  Book flights`
pub fn format_task_line(task: &Task, id_width: usize) -> String {
    format!(
        "[{}] {} {} {:>id_width$}  {}",
        status_char(task),
        pad_to_width(task.priority.as_str(), PRIORITY_WIDTH),
        pad_to_width(&format_due_date(&task.due_date), DATE_WIDTH),
        task.id.as_str(),
        truncate_to_width(&task.title, TITLE_WIDTH),
        id_width = id_width,
    )
}

/// Format the sorted list, one line per task, plus a count footer
pub fn format_task_list(tasks: &[Task]) -> Vec<String> {
    if tasks.is_empty() {
        return vec!["no tasks".to_string()];
    }
    let id_width = tasks
        .iter()
        .map(|t| display_width(t.id.as_str()))
        .max()
        .unwrap_or(0);
    let mut lines: Vec<String> = tasks
        .iter()
        .map(|t| format_task_line(t, id_width))
        .collect();
    let done = tasks.iter().filter(|t| t.completed).count();
    lines.push(String::new());
    lines.push(format!(
        "{} task{}, {} completed",
        tasks.len(),
        if tasks.len() == 1 { "" } else { "s" },
        done,
    ));
    lines
}
