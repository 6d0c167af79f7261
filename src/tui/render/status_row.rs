use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{Focus, Screen};

const INPUT_HINTS: &[(&str, &str)] = &[
    ("Enter", "add"),
    ("Tab", "list"),
    ("Ctrl-S", "save"),
    ("Ctrl-O", "load"),
    ("F1", "about"),
    ("Ctrl-Q", "quit"),
];

const LIST_HINTS: &[(&str, &str)] = &[
    ("Space", "toggle"),
    ("c", "complete"),
    ("a", "active"),
    ("d", "delete"),
    ("Tab", "input"),
    ("Ctrl-S", "save"),
    ("Ctrl-O", "load"),
    ("q", "quit"),
];

/// Key hints for the focused pane, cut off at the last hint that fits
pub fn render_key_hints(frame: &mut Frame, screen: &Screen, area: Rect) {
    let bg = screen.theme.background;
    let key_style = Style::default().fg(screen.theme.text).bg(bg);
    let label_style = Style::default().fg(screen.theme.dim).bg(bg);

    let hints = match screen.focus {
        Focus::Input => INPUT_HINTS,
        Focus::List => LIST_HINTS,
    };

    let width = area.width as usize;
    let mut used = 1;
    let mut spans = vec![Span::styled(" ", label_style)];
    for (key, label) in hints {
        let cost = key.len() + 1 + label.len() + 2;
        if used + cost > width + 2 {
            break;
        }
        used += cost;
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}  ", label), label_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, screen: &Screen, area: Rect) {
    let bg = screen.theme.background;
    let line = Line::from(Span::styled(
        format!(" {}", screen.status),
        Style::default().fg(screen.theme.text).bg(bg),
    ));
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
