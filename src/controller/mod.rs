pub mod events;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::Path;

use crate::io::recovery::RecoveryLog;
use crate::io::store::{FileStore, PersistenceError};
use crate::model::task::{Task, TaskList, TaskStatus};
use crate::ops::task_ops::{self, TaskError};
use crate::parse::{encode_task, parse_task_lines, serialize_tasks};

pub use events::ViewEvent;
pub use view::{Notice, NoticeKind, RowStyle, View};

/// Error type for a user action
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ActionError {
    /// The modal notice that reports this error
    pub fn notice(&self) -> Notice {
        match self {
            ActionError::Task(TaskError::EmptyTask) => {
                Notice::new(NoticeKind::Warning, "Empty Task", self.to_string())
            }
            ActionError::Task(TaskError::NoSelection(_)) => {
                Notice::new(NoticeKind::Info, "No Selection", self.to_string())
            }
            ActionError::Task(TaskError::AlreadyCompleted) => {
                Notice::new(NoticeKind::Info, "Already Completed", self.to_string())
            }
            ActionError::Persistence(e @ PersistenceError::Write { .. }) => Notice::new(
                NoticeKind::Error,
                "Error Saving",
                format!("Could not save file:\n{}", e.io_error()),
            ),
            ActionError::Persistence(e @ PersistenceError::Read { .. }) => Notice::new(
                NoticeKind::Error,
                "Error Loading",
                format!("Could not load file:\n{}", e.io_error()),
            ),
        }
    }
}

/// Owns the task list and keeps a [`View`] in sync with it.
///
/// Every operation runs to completion before returning; the view is updated
/// by explicit commands after each mutation and never holds state of its own.
pub struct TaskListController<V: View, S: FileStore> {
    tasks: TaskList,
    view: V,
    store: S,
    recovery: Option<RecoveryLog>,
}

impl<V: View, S: FileStore> TaskListController<V, S> {
    pub fn new(view: V, store: S) -> Self {
        let mut controller = TaskListController {
            tasks: TaskList::new(),
            view,
            store,
            recovery: None,
        };
        controller.refresh_status();
        controller
    }

    /// Keep deleted tasks and failed saves in a recovery log
    pub fn with_recovery_log(mut self, log: Option<RecoveryLog>) -> Self {
        self.recovery = log;
        self
    }

    pub fn set_recovery_log(&mut self, log: Option<RecoveryLog>) {
        self.recovery = log;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks.tasks
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn recovery_log(&self) -> Option<&RecoveryLog> {
        self.recovery.as_ref()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self, raw: &str) -> Result<(), ActionError> {
        let index = task_ops::add_task(&mut self.tasks, raw)?;
        let line = encode_task(&self.tasks.tasks[index]);
        self.view.append_row(&line, RowStyle::Normal);
        self.view.clear_input();
        self.refresh_status();
        Ok(())
    }

    pub fn mark_completed(&mut self, selection: Option<usize>) -> Result<(), ActionError> {
        let index = task_ops::mark_completed(&mut self.tasks, selection)?;
        self.render_row(index);
        self.refresh_status();
        Ok(())
    }

    pub fn mark_active(&mut self, selection: Option<usize>) -> Result<(), ActionError> {
        let index = task_ops::mark_active(&mut self.tasks, selection)?;
        self.render_row(index);
        self.refresh_status();
        Ok(())
    }

    /// Flip the selected task; does nothing without a selection.
    pub fn toggle_completed(&mut self, selection: Option<usize>) {
        if let Some(index) = task_ops::toggle_completed(&mut self.tasks, selection) {
            self.render_row(index);
            self.refresh_status();
        }
    }

    /// Delete the selected task after the user confirms.
    /// Returns whether a task was removed.
    pub fn delete_task(&mut self, selection: Option<usize>) -> Result<bool, ActionError> {
        let index = task_ops::delete_target(&self.tasks, selection)?;
        let line = encode_task(&self.tasks.tasks[index]);
        let message = format!("Are you sure you want to delete:\n\n{}", line);
        if !self.view.confirm("Delete Task", &message) {
            return Ok(false);
        }

        task_ops::delete_task(&mut self.tasks, Some(index))?;
        if let Some(log) = &self.recovery {
            log.log_task_deletion(&line, index);
        }
        self.view.remove_row(index);
        self.refresh_status();
        Ok(true)
    }

    pub fn compute_status(&self) -> TaskStatus {
        task_ops::compute_status(&self.tasks)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Write every task, in order, to `path`. In-memory state is untouched.
    pub fn save_tasks(&self, path: &Path) -> Result<(), ActionError> {
        let content = serialize_tasks(&self.tasks.tasks);
        if let Err(e) = self.store.write_lines(path, &content) {
            if let Some(log) = &self.recovery {
                log.log_write_failure(path, &e, &content);
            }
            return Err(PersistenceError::Write {
                path: path.to_path_buf(),
                source: e,
            }
            .into());
        }
        Ok(())
    }

    /// Replace the whole list with the contents of `path`.
    /// On failure the current list and view are left as they were.
    pub fn load_tasks(&mut self, path: &Path) -> Result<usize, ActionError> {
        let lines = self
            .store
            .read_lines(path)
            .map_err(|e| PersistenceError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;

        self.tasks = TaskList::from_tasks(parse_task_lines(&lines));
        self.view.clear_rows();
        for task in self.tasks.iter() {
            self.view
                .append_row(&encode_task(task), RowStyle::for_task(task));
        }
        self.refresh_status();
        Ok(self.tasks.len())
    }

    // -----------------------------------------------------------------------
    // View sync
    // -----------------------------------------------------------------------

    fn render_row(&mut self, index: usize) {
        if let Some(task) = self.tasks.get(index) {
            self.view
                .replace_row(index, &encode_task(task), RowStyle::for_task(task));
        }
    }

    fn refresh_status(&mut self) {
        let status = self.compute_status();
        self.view.set_status(status);
    }
}
