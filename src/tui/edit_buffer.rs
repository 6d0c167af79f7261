use crate::util::unicode;

/// Single-line text field with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub text: String,
    pub cursor: usize,
}

impl EditBuffer {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        EditBuffer { text, cursor }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert text at the cursor. Line breaks become spaces.
    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace("\r\n", " ").replace(['\r', '\n'], " ");
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word_left(&mut self) {
        let start = unicode::word_boundary_left(&self.text, self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn delete_to_start(&mut self) {
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Cursor position in terminal cells
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.text, self.cursor)
    }
}
