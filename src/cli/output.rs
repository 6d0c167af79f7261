use serde::Serialize;

use crate::model::task::{Task, TaskState, TaskStatus};
use crate::parse::encode_task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based, as accepted by the index arguments
    pub index: usize,
    pub text: String,
    pub state: TaskState,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub tasks: Vec<TaskJson>,
    pub status: TaskStatus,
}

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        index: index + 1,
        text: task.text.clone(),
        state: task.state(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One numbered line of `tick list`. Numbers are right-aligned to `width`.
pub fn format_task_line(index: usize, task: &Task, width: usize) -> String {
    format!("{:>width$}  {}", index + 1, encode_task(task), width = width)
}

/// Numbered listing of `(index, task)` pairs followed by the status line
pub fn format_task_list(tasks: &[(usize, &Task)], total: usize, status: TaskStatus) -> String {
    let width = total.to_string().len().max(2);
    let mut out = String::new();
    if tasks.is_empty() {
        out.push_str("No tasks.\n");
    }
    for (index, task) in tasks {
        out.push_str(&format_task_line(*index, task, width));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&status.to_string());
    out
}
