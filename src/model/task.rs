use serde::{Deserialize, Serialize};

/// Completion state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Active,
    Completed,
}

impl TaskState {
    /// Parse a state name as accepted on the command line
    pub fn parse_state(s: &str) -> Option<TaskState> {
        match s {
            "active" => Some(TaskState::Active),
            "completed" | "done" => Some(TaskState::Completed),
            _ => None,
        }
    }
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// User text, never carrying the completion marker
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Create a new active task
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            completed: false,
        }
    }

    pub fn state(&self) -> TaskState {
        if self.completed {
            TaskState::Completed
        } else {
            TaskState::Active
        }
    }
}

/// Totals shown in the status line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatus {
    pub total: usize,
    pub completed: usize,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} task(s) | {} completed", self.total, self.completed)
    }
}

/// The ordered, authoritative list of tasks. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Count all tasks and completed tasks
    pub fn status(&self) -> TaskStatus {
        TaskStatus {
            total: self.tasks.len(),
            completed: self.tasks.iter().filter(|t| t.completed).count(),
        }
    }
}
