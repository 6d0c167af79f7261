use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::controller::Notice;
use crate::tui::app::{ConfirmPrompt, PathPrompt};
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

use super::input_bar::edit_line;

const MIN_POPUP_W: u16 = 30;
const MAX_POPUP_W: u16 = 64;

/// Modal notice. Dismissed by any key.
pub fn render_notice(frame: &mut Frame, theme: &Theme, notice: &Notice, area: Rect) {
    let accent = theme.notice_color(notice.kind);
    let hints = [("any key", "dismiss")];
    render_message_popup(frame, theme, accent, &notice.title, &notice.message, &hints, area);
}

/// Yes/no question shown while the controller waits for an answer
pub fn render_confirm(frame: &mut Frame, theme: &Theme, confirm: &ConfirmPrompt, area: Rect) {
    let hints = [("y", "yes"), ("n", "no")];
    render_message_popup(
        frame,
        theme,
        theme.yellow,
        &confirm.title,
        &confirm.message,
        &hints,
        area,
    );
}

/// File path entry for save/load
pub fn render_path_prompt(frame: &mut Frame, theme: &Theme, prompt: &PathPrompt, area: Rect) {
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let popup_w = MAX_POPUP_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let mut field = vec![Span::styled(" ", text_style)];
    field.extend(edit_line(&prompt.buffer, theme, inner_w.saturating_sub(2), true).spans);

    let lines = vec![
        Line::from(Span::styled(" File path:", text_style)),
        Line::from(field),
        Line::from(""),
        hint_line(theme, &[("Enter", "confirm"), ("Esc", "cancel")]),
    ];

    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let popup_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", prompt.kind.title()))
        .title_style(title_style(theme, theme.highlight))
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(dim_style);
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn render_message_popup(
    frame: &mut Frame,
    theme: &Theme,
    accent: Color,
    title: &str,
    message: &str,
    hints: &[(&str, &str)],
    area: Rect,
) {
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text_bright).bg(bg);

    let widest = message
        .lines()
        .map(display_width)
        .chain(std::iter::once(display_width(title) + 2))
        .max()
        .unwrap_or(0);
    let popup_w = ((widest + 4) as u16)
        .clamp(MIN_POPUP_W, MAX_POPUP_W)
        .min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));
    for text in message.lines() {
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate_to_width(text, inner_w.saturating_sub(2))),
            text_style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(theme, hints));

    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let popup_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_style(title_style(theme, accent))
        .border_style(Style::default().fg(accent).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn title_style(theme: &Theme, accent: Color) -> Style {
    Style::default()
        .fg(accent)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD)
}

fn hint_line<'a>(theme: &Theme, hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let bg = theme.background;
    let key_style = Style::default().fg(theme.text).bg(bg);
    let label_style = Style::default().fg(theme.dim).bg(bg);
    let mut spans = vec![Span::styled(" ", label_style)];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", label_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}", label), label_style));
    }
    Line::from(spans)
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
