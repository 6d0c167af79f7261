use std::fmt;

use crate::model::task::{Task, TaskList, TaskStatus};

/// The action that needed a selected row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    MarkCompleted,
    MarkActive,
    Delete,
}

impl fmt::Display for SelectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionAction::MarkCompleted => write!(f, "mark as completed"),
            SelectionAction::MarkActive => write!(f, "mark as active"),
            SelectionAction::Delete => write!(f, "delete"),
        }
    }
}

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Please type a task before adding.")]
    EmptyTask,
    #[error("Select a task to {0}.")]
    NoSelection(SelectionAction),
    #[error("This task is already completed.")]
    AlreadyCompleted,
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Normalize raw input into task text: trim, and fold line breaks into spaces
/// so a task always stays on one line of the file.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

/// Append a new active task. Returns its index.
pub fn add_task(list: &mut TaskList, raw: &str) -> Result<usize, TaskError> {
    let text = normalize_text(raw);
    if text.is_empty() {
        return Err(TaskError::EmptyTask);
    }
    list.tasks.push(Task::new(text));
    Ok(list.tasks.len() - 1)
}

// ---------------------------------------------------------------------------
// State transitions
// ---------------------------------------------------------------------------

/// Resolve a selection against the list. Stale indices count as no selection.
fn selected(list: &TaskList, selection: Option<usize>) -> Option<usize> {
    selection.filter(|&i| i < list.tasks.len())
}

/// Active → Completed. Rejects a task that is already completed.
pub fn mark_completed(list: &mut TaskList, selection: Option<usize>) -> Result<usize, TaskError> {
    let index = selected(list, selection)
        .ok_or(TaskError::NoSelection(SelectionAction::MarkCompleted))?;
    let task = &mut list.tasks[index];
    if task.completed {
        return Err(TaskError::AlreadyCompleted);
    }
    task.completed = true;
    Ok(index)
}

/// Any → Active. Idempotent.
pub fn mark_active(list: &mut TaskList, selection: Option<usize>) -> Result<usize, TaskError> {
    let index =
        selected(list, selection).ok_or(TaskError::NoSelection(SelectionAction::MarkActive))?;
    list.tasks[index].completed = false;
    Ok(index)
}

/// Flip the selected task. Without a selection this is a silent no-op.
pub fn toggle_completed(list: &mut TaskList, selection: Option<usize>) -> Option<usize> {
    let index = selected(list, selection)?;
    let task = &mut list.tasks[index];
    task.completed = !task.completed;
    Some(index)
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

/// Look up the task a delete would remove, without removing it.
pub fn delete_target(list: &TaskList, selection: Option<usize>) -> Result<usize, TaskError> {
    selected(list, selection).ok_or(TaskError::NoSelection(SelectionAction::Delete))
}

/// Remove the selected task. Later tasks shift down by one.
pub fn delete_task(list: &mut TaskList, selection: Option<usize>) -> Result<Task, TaskError> {
    let index = delete_target(list, selection)?;
    Ok(list.tasks.remove(index))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub fn compute_status(list: &TaskList) -> TaskStatus {
    list.status()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> TaskList {
        TaskList::from_tasks(vec![
            Task::new("Buy milk"),
            Task {
                text: "Pay bills".into(),
                completed: true,
            },
            Task::new("Walk dog"),
        ])
    }

    // --- Creation ---

    #[test]
    fn test_add_appends_active_task() {
        let mut list = sample_list();
        let idx = add_task(&mut list, "  Read book  ").unwrap();
        assert_eq!(idx, 3);
        assert_eq!(list.tasks[3], Task::new("Read book"));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut list = sample_list();
        assert_eq!(add_task(&mut list, ""), Err(TaskError::EmptyTask));
        assert_eq!(add_task(&mut list, "   \t"), Err(TaskError::EmptyTask));
        assert_eq!(list, sample_list());
    }

    #[test]
    fn test_add_folds_line_breaks() {
        let mut list = TaskList::new();
        add_task(&mut list, "first\nsecond\r\nthird").unwrap();
        assert_eq!(list.tasks[0].text, "first second third");
    }

    // --- State transitions ---

    #[test]
    fn test_mark_completed() {
        let mut list = sample_list();
        assert_eq!(mark_completed(&mut list, Some(0)), Ok(0));
        assert!(list.tasks[0].completed);
        assert_eq!(list.tasks[0].text, "Buy milk");
    }

    #[test]
    fn test_mark_completed_twice_rejected() {
        let mut list = sample_list();
        assert_eq!(
            mark_completed(&mut list, Some(1)),
            Err(TaskError::AlreadyCompleted)
        );
        assert!(list.tasks[1].completed);
    }

    #[test]
    fn test_mark_completed_without_selection() {
        let mut list = sample_list();
        assert_eq!(
            mark_completed(&mut list, None),
            Err(TaskError::NoSelection(SelectionAction::MarkCompleted))
        );
        // Out-of-range selection behaves like no selection
        assert_eq!(
            mark_completed(&mut list, Some(9)),
            Err(TaskError::NoSelection(SelectionAction::MarkCompleted))
        );
    }

    #[test]
    fn test_mark_active_idempotent() {
        let mut list = sample_list();
        assert_eq!(mark_active(&mut list, Some(1)), Ok(1));
        assert!(!list.tasks[1].completed);
        assert_eq!(mark_active(&mut list, Some(1)), Ok(1));
        assert!(!list.tasks[1].completed);
        assert_eq!(list.tasks[1].text, "Pay bills");
    }

    #[test]
    fn test_mark_active_without_selection() {
        let mut list = sample_list();
        assert_eq!(
            mark_active(&mut list, None),
            Err(TaskError::NoSelection(SelectionAction::MarkActive))
        );
    }

    #[test]
    fn test_complete_then_activate_round_trip() {
        let mut list = sample_list();
        mark_completed(&mut list, Some(2)).unwrap();
        mark_active(&mut list, Some(2)).unwrap();
        assert_eq!(list, sample_list());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut list = sample_list();
        assert_eq!(toggle_completed(&mut list, Some(1)), Some(1));
        assert!(!list.tasks[1].completed);
        assert_eq!(toggle_completed(&mut list, Some(1)), Some(1));
        assert_eq!(list, sample_list());
    }

    #[test]
    fn test_toggle_without_selection_is_noop() {
        let mut list = sample_list();
        assert_eq!(toggle_completed(&mut list, None), None);
        assert_eq!(toggle_completed(&mut list, Some(3)), None);
        assert_eq!(list, sample_list());
    }

    // --- Removal ---

    #[test]
    fn test_delete_shifts_indices() {
        let mut list = sample_list();
        let removed = delete_task(&mut list, Some(0)).unwrap();
        assert_eq!(removed.text, "Buy milk");
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks[0].text, "Pay bills");
        assert_eq!(list.tasks[1].text, "Walk dog");
    }

    #[test]
    fn test_delete_without_selection() {
        let mut list = sample_list();
        assert_eq!(
            delete_task(&mut list, None),
            Err(TaskError::NoSelection(SelectionAction::Delete))
        );
        assert_eq!(list, sample_list());
    }

    // --- Status ---

    #[test]
    fn test_status_bounds() {
        let mut list = sample_list();
        for _ in 0..3 {
            let status = compute_status(&list);
            assert!(status.completed <= status.total);
            toggle_completed(&mut list, Some(0));
        }
        assert_eq!(compute_status(&TaskList::new()).total, 0);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TaskError::NoSelection(SelectionAction::MarkCompleted).to_string(),
            "Select a task to mark as completed."
        );
        assert_eq!(
            TaskError::NoSelection(SelectionAction::Delete).to_string(),
            "Select a task to delete."
        );
        assert_eq!(
            TaskError::EmptyTask.to_string(),
            "Please type a task before adding."
        );
    }
}
