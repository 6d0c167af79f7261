use ratatui::style::Color;

use crate::controller::{NoticeKind, RowStyle};
use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "cyan" => theme.cyan = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Foreground for a task row
    pub fn row_color(&self, style: RowStyle) -> Color {
        match style {
            RowStyle::Normal => self.text,
            RowStyle::Muted => self.dim,
        }
    }

    /// Border color for a notice popup
    pub fn notice_color(&self, kind: NoticeKind) -> Color {
        match kind {
            NoticeKind::Info => self.cyan,
            NoticeKind::Warning => self.yellow,
            NoticeKind::Error => self.red,
        }
    }
}
