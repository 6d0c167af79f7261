use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::controller::RowStyle;
use crate::tui::app::Screen;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen at the given size.
pub fn render_screen(screen: &mut Screen, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _area| super::render(frame, screen))
}

/// A screen with the given rows, styled the way the controller would.
pub fn screen_with_rows(rows: &[&str]) -> Screen {
    let mut screen = Screen::new(Theme::default(), PathBuf::from("tasks.txt"), true);
    for text in rows {
        let style = if text.starts_with(crate::parse::DONE_MARKER) {
            RowStyle::Muted
        } else {
            RowStyle::Normal
        };
        screen.append_row(text, style);
    }
    screen
}
