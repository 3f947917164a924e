//! Cell edit buffer
//!
//! Single-line text buffer with a char-indexed caret, used while exactly one
//! cell is open for text entry.

use super::model::CellPosition;

/// Single-line editable text with a caret
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Caret position in chars (0..=char count)
    cursor: usize,
}

impl EditBuffer {
    /// Create a buffer with the caret at the end of `text`
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Convert char offset to byte offset
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.char_to_byte(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert text at the caret; line breaks are dropped
    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    pub fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.char_to_byte(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    pub fn delete_forward(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let at = self.char_to_byte(self.cursor);
        self.text.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }
}

/// State for the one cell currently open for editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditState {
    /// Position of the cell being edited
    pub position: CellPosition,
    /// In-progress text
    pub buffer: EditBuffer,
    /// Value the buffer was opened with
    pub original: String,
}

impl CellEditState {
    pub fn new(position: CellPosition, value: &str) -> Self {
        Self {
            position,
            buffer: EditBuffer::from_text(value),
            original: value.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Check if content changed from the opened value
    pub fn is_modified(&self) -> bool {
        self.buffer.as_str() != self.original
    }
}
