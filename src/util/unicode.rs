use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" { 4 } else { UnicodeWidthStr::width(g) }
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    match s[byte_offset..].grapheme_indices(true).nth(1) {
        Some((i, _)) => Some(byte_offset + i),
        None => Some(s.len()),
    }
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
}

/// Convert byte offset to display column (terminal cells).
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Start of the word left of `byte_offset` (whitespace-delimited).
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    let is_space = |g: &str| g.chars().all(char::is_whitespace);

    let mut idx = graphemes.len();
    while idx > 0 && is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    graphemes.get(idx).map_or(byte_offset, |(i, _)| *i)
}
