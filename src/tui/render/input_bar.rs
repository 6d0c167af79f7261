use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{Focus, Screen};
use crate::tui::edit_buffer::EditBuffer;
use crate::tui::theme::Theme;
use crate::util::unicode::display_width;

/// Render the bordered "Task" entry box
pub fn render_input_bar(frame: &mut Frame, screen: &Screen, area: Rect) {
    let theme = &screen.theme;
    let bg = theme.background;
    let focused = screen.focus == Focus::Input && !screen.has_overlay();
    let border = if focused {
        theme.selection_border
    } else {
        theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Task ")
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = edit_line(&screen.input, theme, inner.width as usize, focused);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Build a one-line view of an edit buffer that keeps the cursor visible.
///
/// With `show_cursor` the cell under the cursor is drawn reversed, or a
/// block cursor is appended when the cursor sits at the end.
pub fn edit_line<'a>(buf: &'a EditBuffer, theme: &Theme, width: usize, show_cursor: bool) -> Line<'a> {
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text_bright).bg(bg);

    let (before, rest) = buf.text.split_at(buf.cursor.min(buf.text.len()));
    // Reserve one cell for the cursor
    let before = tail_to_width(before, width.saturating_sub(1));

    if !show_cursor {
        return Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(rest, text_style),
        ]);
    }

    match rest.graphemes(true).next() {
        Some(under) => Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(under, text_style.add_modifier(Modifier::REVERSED)),
            Span::styled(&rest[under.len()..], text_style),
        ]),
        None => Line::from(vec![
            Span::styled(before, text_style),
            Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)), // ▌ cursor
        ]),
    }
}

/// Longest suffix of `s` that fits in `max_cells`
fn tail_to_width(s: &str, max_cells: usize) -> &str {
    let mut start = 0;
    for (idx, g) in s.grapheme_indices(true) {
        if display_width(&s[idx..]) <= max_cells {
            start = idx;
            break;
        }
        start = idx + g.len();
    }
    &s[start..]
}
