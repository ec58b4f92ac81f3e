use std::cmp::Ordering;

use crate::model::task::{Priority, Task};

/// Numeric rank used for ordering: High=3, Medium=2, Low=1, anything else=0
pub fn priority_rank(priority: &Priority) -> u8 {
    match priority {
        Priority::High => 3,
        Priority::Medium => 2,
        Priority::Low => 1,
        Priority::Other(_) => 0,
    }
}

/// Display order: priority descending, then due date ascending.
///
/// Tasks whose due date does not parse order after every dated task of the
/// same priority, and compare equal among themselves.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    priority_rank(&b.priority)
        .cmp(&priority_rank(&a.priority))
        .then_with(|| match (a.due_date(), b.due_date()) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Return a sorted copy of `tasks`. Stable: ties keep their input order.
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(compare_tasks);
    sorted
}
