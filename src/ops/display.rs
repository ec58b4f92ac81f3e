use crate::model::task::{Priority, Task};

/// Style class for a priority value. Unknown priorities get no class.
pub fn priority_class(priority: &Priority) -> Option<&'static str> {
    match priority {
        Priority::Low => Some("priority-low"),
        Priority::Medium => Some("priority-medium"),
        Priority::High => Some("priority-high"),
        Priority::Other(_) => None,
    }
}

/// Short month-day-year, e.g. "Jan 5, 2025". Unparsable dates are shown as sent.
pub fn format_due_date(raw: &str) -> String {
    match crate::model::task::parse_due_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Label of the status toggle
pub fn status_label(task: &Task) -> &'static str {
    if task.completed { "Completed" } else { "Pending" }
}
