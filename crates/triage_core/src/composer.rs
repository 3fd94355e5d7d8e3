//! State for the email composer text box.

/// Hard bound on the composer buffer. Validation rejects text well before
/// this; the cap only keeps a runaway paste from growing without limit.
const MAX_COMPOSER_CHARS: usize = 64 * 1024;

/// Text buffer with a character-index cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposerState {
    text: String,
    /// Cursor position (character index, not byte).
    cursor_position: usize,
}

impl ComposerState {
    /// Returns the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cursor position (character index).
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Returns true if the composer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters in the buffer.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Replaces the whole buffer and puts the cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.cursor_position = self.char_count();
    }

    /// Inserts a character at the current cursor position.
    /// Returns false if the buffer is at its hard bound.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.char_count() >= MAX_COMPOSER_CHARS {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }
        self.cursor_position -= 1;
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
        self.text.drain(byte_idx..next_byte_idx);
        true
    }

    /// Deletes the character at the cursor position (delete key).
    pub fn delete_char_at(&mut self) -> bool {
        if self.cursor_position >= self.char_count() {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
        self.text.drain(byte_idx..next_byte_idx);
        true
    }

    /// Moves the cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Moves the cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    /// Moves the cursor to the beginning of the text.
    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Moves the cursor to the end of the text.
    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    /// Clears all text and resets the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    /// Converts character index to byte index.
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
