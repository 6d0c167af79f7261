use crate::model::task::Task;

use super::DONE_MARKER;

/// Encode a task as its display / on-disk line (no trailing newline).
pub fn encode_task(task: &Task) -> String {
    if task.completed {
        format!("{}{}", DONE_MARKER, task.text)
    } else {
        task.text.clone()
    }
}

/// Serialize tasks to file content: one encoded line per task, each
/// newline-terminated.
pub fn serialize_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&encode_task(task));
        out.push('\n');
    }
    out
}
