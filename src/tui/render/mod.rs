pub mod input_bar;
pub mod popups;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::Screen;

pub const TITLE: &str = "To-Do & Habit Tracker";

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, screen: &mut Screen) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(screen.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title | input box | task list | key hints | status row
    let hint_rows = if screen.show_key_hints { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(hint_rows),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, screen, chunks[0]);
    input_bar::render_input_bar(frame, screen, chunks[1]);
    task_list::render_task_list(frame, screen, chunks[2]);
    if screen.show_key_hints {
        status_row::render_key_hints(frame, screen, chunks[3]);
    }
    status_row::render_status_row(frame, screen, chunks[4]);

    // Popups, topmost last
    if let Some(prompt) = &screen.prompt {
        popups::render_path_prompt(frame, &screen.theme, prompt, area);
    }
    if let Some(confirm) = &screen.confirm {
        popups::render_confirm(frame, &screen.theme, confirm, area);
    }
    if let Some(notice) = &screen.notice {
        popups::render_notice(frame, &screen.theme, notice, area);
    }
}

fn render_title(frame: &mut Frame, screen: &Screen, area: Rect) {
    let style = Style::default()
        .fg(screen.theme.highlight)
        .bg(screen.theme.background)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(Span::styled(format!(" {}", TITLE), style));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::{TERM_H, TERM_W, render_screen, screen_with_rows};
    use crate::controller::{Notice, NoticeKind};
    use crate::model::TaskStatus;

    #[test]
    fn full_screen_layout() {
        let mut screen = screen_with_rows(&["Buy milk", "[Done] Walk dog"]);
        screen.status = TaskStatus {
            total: 2,
            completed: 1,
        };
        let output = render_screen(&mut screen, TERM_W, TERM_H);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], " To-Do & Habit Tracker");
        assert!(lines[1].starts_with("┌ Task "));
        assert!(lines[4].starts_with("┌ Tasks "));
        assert!(lines[5].contains("Buy milk"));
        assert!(lines[6].contains("[Done] Walk dog"));
        assert!(output.contains("Ctrl-S save"));
        assert_eq!(lines[lines.len() - 1], " 2 task(s) | 1 completed");
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut screen = screen_with_rows(&[]);
        screen.show_key_hints = false;
        let output = render_screen(&mut screen, TERM_W, TERM_H);
        assert!(!output.contains("Ctrl-S save"));
        assert!(output.ends_with(" 0 task(s) | 0 completed"));
    }

    #[test]
    fn notice_draws_over_list() {
        let mut screen = screen_with_rows(&["Buy milk"]);
        screen.notice = Some(Notice::new(
            NoticeKind::Warning,
            "Empty Task",
            "Please type a task before adding.",
        ));
        let output = render_screen(&mut screen, TERM_W, TERM_H);
        assert!(output.contains("Empty Task"));
        assert!(output.contains("Please type a task before adding."));
        assert!(output.contains("any key dismiss"));
    }
}
