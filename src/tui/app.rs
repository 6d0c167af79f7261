use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::controller::{Notice, RowStyle, TaskListController, View, ViewEvent};
use crate::io::recovery::RecoveryLog;
use crate::io::store::{FileStore, FsStore};
use crate::model::{Config, TaskStatus};

use super::edit_buffer::EditBuffer;
use super::input;
use super::render;
use super::theme::Theme;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// One displayed task row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub style: RowStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Save,
    Load,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Save => "Save Tasks",
            PromptKind::Load => "Load Tasks",
        }
    }
}

/// File path prompt opened by Ctrl-S / Ctrl-O
#[derive(Debug, Clone)]
pub struct PathPrompt {
    pub kind: PromptKind,
    pub buffer: EditBuffer,
}

/// A pending yes/no question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
}

/// Everything the TUI draws. Rows mirror the controller's task list via
/// [`View`] commands; the rest is local UI state.
pub struct Screen {
    pub rows: Vec<Row>,
    pub selected: Option<usize>,
    pub scroll: usize,
    pub input: EditBuffer,
    pub focus: Focus,
    pub status: TaskStatus,
    pub notice: Option<Notice>,
    pub confirm: Option<ConfirmPrompt>,
    pub prompt: Option<PathPrompt>,
    /// Path prefilled in the save/load prompt
    pub default_path: PathBuf,
    pub show_key_hints: bool,
    pub theme: Theme,
    pub should_quit: bool,
}

impl Screen {
    pub fn new(theme: Theme, default_path: PathBuf, show_key_hints: bool) -> Self {
        Screen {
            rows: Vec::new(),
            selected: None,
            scroll: 0,
            input: EditBuffer::default(),
            focus: Focus::Input,
            status: TaskStatus::default(),
            notice: None,
            confirm: None,
            prompt: None,
            default_path,
            show_key_hints,
            theme,
            should_quit: false,
        }
    }

    pub fn append_row(&mut self, text: &str, style: RowStyle) {
        self.rows.push(Row {
            text: text.to_string(),
            style,
        });
    }

    pub fn replace_row(&mut self, index: usize, text: &str, style: RowStyle) {
        if let Some(row) = self.rows.get_mut(index) {
            row.text = text.to_string();
            row.style = style;
        }
    }

    /// Remove a row. The selection is dropped if it pointed at the removed
    /// row and shifted up if it was below it.
    pub fn remove_row(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        self.rows.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
    }

    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.selected = None;
        self.scroll = 0;
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(sel) => (sel + 1).min(self.rows.len() - 1),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(sel) => sel.saturating_sub(1),
            None => self.rows.len() - 1,
        });
    }

    pub fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(self.rows.len() - 1);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        };
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        let path = self.default_path.display().to_string();
        self.prompt = Some(PathPrompt {
            kind,
            buffer: EditBuffer::with_text(path),
        });
    }

    /// Whether a popup currently covers the main screen
    pub fn has_overlay(&self) -> bool {
        self.notice.is_some() || self.confirm.is_some() || self.prompt.is_some()
    }
}

/// Terminal input as the TUI consumes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
}

/// Source of terminal events. Blocks until one is available.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<TerminalEvent>;
}

/// Reads events from the real terminal
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<TerminalEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(TerminalEvent::Key(key));
                }
                Event::Paste(text) => return Ok(TerminalEvent::Paste(text)),
                Event::Resize(_, _) => return Ok(TerminalEvent::Resize),
                _ => {}
            }
        }
    }
}

/// [`View`] implementation backed by a ratatui terminal.
///
/// `confirm` runs its own draw/read loop so the controller gets an answer
/// before it continues.
pub struct TuiView<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    screen: Screen,
}

impl<B: Backend, E: EventSource> TuiView<B, E> {
    pub fn new(terminal: Terminal<B>, events: E, screen: Screen) -> Self {
        TuiView {
            terminal,
            events,
            screen,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let screen = &mut self.screen;
        self.terminal.draw(|frame| render::render(frame, screen))?;
        Ok(())
    }

    pub fn next_event(&mut self) -> io::Result<TerminalEvent> {
        self.events.next_event()
    }

    fn ask(&mut self) -> io::Result<bool> {
        loop {
            self.draw()?;
            if let TerminalEvent::Key(key) = self.events.next_event()?
                && let Some(answer) = input::confirm_answer(key)
            {
                return Ok(answer);
            }
        }
    }
}

impl<B: Backend, E: EventSource> View for TuiView<B, E> {
    fn append_row(&mut self, text: &str, style: RowStyle) {
        self.screen.append_row(text, style);
    }

    fn replace_row(&mut self, index: usize, text: &str, style: RowStyle) {
        self.screen.replace_row(index, text, style);
    }

    fn remove_row(&mut self, index: usize) {
        self.screen.remove_row(index);
    }

    fn clear_rows(&mut self) {
        self.screen.clear_rows();
    }

    fn clear_input(&mut self) {
        self.screen.input.clear();
    }

    fn set_status(&mut self, status: TaskStatus) {
        self.screen.status = status;
    }

    fn show_notice(&mut self, notice: Notice) {
        self.screen.notice = Some(notice);
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.screen.confirm = Some(ConfirmPrompt {
            title: title.to_string(),
            message: message.to_string(),
        });
        // A terminal failure while asking counts as "no"
        let answer = self.ask().unwrap_or(false);
        self.screen.confirm = None;
        answer
    }
}

/// Launch the TUI on the given tasks file.
///
/// The file is loaded at startup when `load_at_start` is set and it exists;
/// otherwise the list starts empty.
pub fn run(
    config: &Config,
    tasks_file: &Path,
    load_at_start: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let screen = Screen::new(
        Theme::from_config(&config.ui),
        tasks_file.to_path_buf(),
        config.ui.show_key_hints,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    let view = TuiView::new(terminal, CrosstermEvents, screen);
    let recovery = config.recovery_log_path(tasks_file).map(RecoveryLog::new);
    let mut controller = TaskListController::new(view, FsStore).with_recovery_log(recovery);

    if load_at_start
        && tasks_file.exists()
        && let Err(e) = controller.load_tasks(tasks_file)
    {
        let notice = e.notice();
        controller.view_mut().show_notice(notice);
    }

    // Run event loop
    let result = run_event_loop(&mut controller, config);

    // Restore terminal
    disable_raw_mode()?;
    let terminal = controller.view_mut().terminal_mut();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

/// Draw, read one event, dispatch it. Stops when the screen asks to quit.
pub fn run_event_loop<B, E, S>(
    controller: &mut TaskListController<TuiView<B, E>, S>,
    config: &Config,
) -> io::Result<()>
where
    B: Backend,
    E: EventSource,
    S: FileStore,
{
    loop {
        controller.view_mut().draw()?;

        let event = controller.view_mut().next_event()?;
        let action = match event {
            TerminalEvent::Key(key) => input::handle_key(controller.view_mut().screen_mut(), key),
            TerminalEvent::Paste(text) => {
                input::handle_paste(controller.view_mut().screen_mut(), &text);
                None
            }
            TerminalEvent::Resize => None,
        };

        if let Some(action) = action {
            // The recovery log follows the file last chosen in a path prompt
            if let ViewEvent::Save(path) | ViewEvent::Load(path) = &action {
                let log = config.recovery_log_path(path).map(RecoveryLog::new);
                controller.set_recovery_log(log);
            }
            controller.handle(action);
        }

        if controller.view().screen().should_quit {
            break;
        }
    }
    Ok(())
}
