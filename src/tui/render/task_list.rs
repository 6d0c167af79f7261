use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{Focus, Screen};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the bordered task list, scrolling to keep the selection visible
pub fn render_task_list(frame: &mut Frame, screen: &mut Screen, area: Rect) {
    let theme = screen.theme.clone();
    let bg = theme.background;
    let focused = screen.focus == Focus::List && !screen.has_overlay();
    let border = if focused {
        theme.selection_border
    } else {
        theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tasks ")
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    let width = inner.width as usize;
    if height == 0 || width == 0 {
        return;
    }

    if screen.rows.is_empty() {
        let line = Line::from(Span::styled(
            " No tasks yet",
            Style::default().fg(theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    adjust_scroll(screen, height);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, row) in screen
        .rows
        .iter()
        .enumerate()
        .skip(screen.scroll)
        .take(height)
    {
        let text = format!(" {}", truncate_to_width(&row.text, width.saturating_sub(1)));
        if screen.selected == Some(idx) {
            let mut style = Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg);
            if focused {
                style = style.add_modifier(Modifier::BOLD);
            }
            let pad = width.saturating_sub(display_width(&text));
            lines.push(Line::from(vec![
                Span::styled(text, style),
                Span::styled(" ".repeat(pad), style),
            ]));
        } else {
            let style = Style::default().fg(theme.row_color(row.style)).bg(bg);
            lines.push(Line::from(Span::styled(text, style)));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Clamp the scroll offset so the selected row is on screen
fn adjust_scroll(screen: &mut Screen, height: usize) {
    let max_scroll = screen.rows.len().saturating_sub(height);
    if let Some(sel) = screen.selected {
        if sel < screen.scroll {
            screen.scroll = sel;
        } else if sel >= screen.scroll + height {
            screen.scroll = sel + 1 - height;
        }
    }
    screen.scroll = screen.scroll.min(max_scroll);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RowStyle;
    use crate::tui::render::test_helpers::{render_to_string, screen_with_rows};

    #[test]
    fn list_snapshot() {
        let mut screen = screen_with_rows(&["Buy milk", "[Done] Walk the dog", "Call mom"]);
        screen.rows[1].style = RowStyle::Muted;
        let output = render_to_string(24, 6, |frame, area| {
            render_task_list(frame, &mut screen, area);
        });
        insta::assert_snapshot!(output, @r"
        ┌ Tasks ───────────────┐
        │ Buy milk             │
        │ [Done] Walk the dog  │
        │ Call mom             │
        │                      │
        └──────────────────────┘
        ");
    }

    #[test]
    fn empty_list_placeholder() {
        let mut screen = screen_with_rows(&[]);
        let output = render_to_string(24, 4, |frame, area| {
            render_task_list(frame, &mut screen, area);
        });
        assert!(output.contains("No tasks yet"));
    }

    #[test]
    fn long_rows_are_truncated() {
        let mut screen = screen_with_rows(&["Renew the passport before the trip"]);
        let output = render_to_string(20, 3, |frame, area| {
            render_task_list(frame, &mut screen, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "│ Renew the passpo…│");
    }

    #[test]
    fn selection_scrolls_into_view() {
        let rows: Vec<String> = (1..=10).map(|i| format!("task {}", i)).collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut screen = screen_with_rows(&rows);
        screen.selected = Some(8);
        let output = render_to_string(20, 5, |frame, area| {
            render_task_list(frame, &mut screen, area);
        });
        // Three visible rows, ending at the selection
        assert_eq!(screen.scroll, 6);
        assert!(output.contains("task 9"));
        assert!(!output.contains("task 6"));

        screen.selected = Some(0);
        render_to_string(20, 5, |frame, area| {
            render_task_list(frame, &mut screen, area);
        });
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn scroll_is_clamped_after_rows_shrink() {
        let mut screen = screen_with_rows(&["a", "b"]);
        screen.scroll = 5;
        render_to_string(20, 5, |frame, area| {
            render_task_list(frame, &mut screen, area);
        });
        assert_eq!(screen.scroll, 0);
    }
}
