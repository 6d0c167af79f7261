use std::path::PathBuf;

use crate::io::store::FileStore;

use super::view::View;
use super::TaskListController;

/// Text of the About notice
pub const ABOUT_TEXT: &str = "\
To-Do & Habit Tracker

Enter or Space toggles the selected task.
Press d or Delete to remove a task.
Ctrl-S saves, Ctrl-O loads, Ctrl-Q quits.";

/// A user action raised by a view. Selections are row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Add(String),
    MarkCompleted(Option<usize>),
    MarkActive(Option<usize>),
    ToggleCompleted(Option<usize>),
    Delete(Option<usize>),
    Save(PathBuf),
    Load(PathBuf),
    About,
}

impl<V: View, S: FileStore> TaskListController<V, S> {
    /// Run one user action to completion, reporting failures and
    /// save/load outcomes through the view.
    pub fn handle(&mut self, event: ViewEvent) {
        let result = match event {
            ViewEvent::Add(text) => self.add_task(&text),
            ViewEvent::MarkCompleted(selection) => self.mark_completed(selection),
            ViewEvent::MarkActive(selection) => self.mark_active(selection),
            ViewEvent::ToggleCompleted(selection) => {
                self.toggle_completed(selection);
                Ok(())
            }
            ViewEvent::Delete(selection) => self.delete_task(selection).map(|_| ()),
            ViewEvent::Save(path) => match self.save_tasks(&path) {
                Ok(()) => {
                    let message = format!("Tasks saved to:\n{}", path.display());
                    self.view_mut().show_info("Saved", &message);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            ViewEvent::Load(path) => match self.load_tasks(&path) {
                Ok(_) => {
                    let message = format!("Tasks loaded from:\n{}", path.display());
                    self.view_mut().show_info("Loaded", &message);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            ViewEvent::About => {
                self.view_mut().show_info("About", ABOUT_TEXT);
                Ok(())
            }
        };

        if let Err(e) = result {
            let notice = e.notice();
            self.view_mut().show_notice(notice);
        }
    }
}
