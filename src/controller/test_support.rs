use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::store::FileStore;
use crate::model::task::TaskStatus;

use super::view::{Notice, RowStyle, View};

/// Every command a controller sent, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Append(String, RowStyle),
    Replace(usize, String, RowStyle),
    Remove(usize),
    Clear,
    ClearInput,
    Status(TaskStatus),
    Notice(Notice),
    Confirm(String, String),
}

/// A `View` that records commands and mirrors the row projection.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub commands: Vec<ViewCommand>,
    pub rows: Vec<(String, RowStyle)>,
    pub status: TaskStatus,
    /// Answer returned from `confirm`
    pub confirm_answer: bool,
}

impl RecordingView {
    pub fn confirming(answer: bool) -> Self {
        RecordingView {
            confirm_answer: answer,
            ..Default::default()
        }
    }

    pub fn row_texts(&self) -> Vec<&str> {
        self.rows.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn notices(&self) -> Vec<&Notice> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ViewCommand::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices().into_iter().last()
    }
}

impl View for RecordingView {
    fn append_row(&mut self, text: &str, style: RowStyle) {
        self.rows.push((text.to_string(), style));
        self.commands.push(ViewCommand::Append(text.to_string(), style));
    }

    fn replace_row(&mut self, index: usize, text: &str, style: RowStyle) {
        self.rows[index] = (text.to_string(), style);
        self.commands
            .push(ViewCommand::Replace(index, text.to_string(), style));
    }

    fn remove_row(&mut self, index: usize) {
        self.rows.remove(index);
        self.commands.push(ViewCommand::Remove(index));
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        self.commands.push(ViewCommand::Clear);
    }

    fn clear_input(&mut self) {
        self.commands.push(ViewCommand::ClearInput);
    }

    fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.commands.push(ViewCommand::Status(status));
    }

    fn show_notice(&mut self, notice: Notice) {
        self.commands.push(ViewCommand::Notice(notice));
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.commands
            .push(ViewCommand::Confirm(title.to_string(), message.to_string()));
        self.confirm_answer
    }
}

/// In-memory `FileStore`. Paths under `/readonly` refuse writes.
#[derive(Debug, Default)]
pub struct MemStore {
    pub files: RefCell<HashMap<PathBuf, String>>,
}

impl MemStore {
    pub fn with_file(path: &str, content: &str) -> Self {
        let store = MemStore::default();
        store
            .files
            .borrow_mut()
            .insert(PathBuf::from(path), content.to_string());
        store
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl FileStore for MemStore {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        match self.files.borrow().get(path) {
            Some(content) => Ok(content.lines().map(|l| l.to_string()).collect()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
        }
    }

    fn write_lines(&self, path: &Path, content: &str) -> io::Result<()> {
        if path.starts_with("/readonly") {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Permission denied",
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
