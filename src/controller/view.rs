use crate::model::task::{Task, TaskStatus};

/// How a row should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Normal,
    /// Completed tasks are drawn muted
    Muted,
}

impl RowStyle {
    pub fn for_task(task: &Task) -> Self {
        if task.completed {
            RowStyle::Muted
        } else {
            RowStyle::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A modal message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Commands the controller issues to keep a presentation in sync.
///
/// A view holds only the encoded row projection; it never changes rows on its
/// own. Row indices always match task indices in the controller.
pub trait View {
    fn append_row(&mut self, text: &str, style: RowStyle);
    fn replace_row(&mut self, index: usize, text: &str, style: RowStyle);
    fn remove_row(&mut self, index: usize);
    fn clear_rows(&mut self);
    /// Empty the text entry after a successful add
    fn clear_input(&mut self);
    fn set_status(&mut self, status: TaskStatus);
    fn show_notice(&mut self, notice: Notice);
    /// Ask a yes/no question. Blocks until the user answers.
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    fn show_info(&mut self, title: &str, message: &str) {
        self.show_notice(Notice::new(NoticeKind::Info, title, message));
    }

    fn show_warning(&mut self, title: &str, message: &str) {
        self.show_notice(Notice::new(NoticeKind::Warning, title, message));
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.show_notice(Notice::new(NoticeKind::Error, title, message));
    }
}
