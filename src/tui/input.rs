use crossterm::event::{KeyCode, KeyModifiers};

/// A single-line text buffer with cursor tracking.
///
/// Backs both the "new task" bar and each row's in-progress edit draft.
/// Handles character insertion, deletion, and cursor movement including
/// word-wise jumps (Alt+arrows) and kill shortcuts (Ctrl+W, Ctrl+U).
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        InputBuffer {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Contents with a visible block cursor inserted at the cursor position.
    pub fn display_with_cursor(&self) -> String {
        let pos = self.cursor.min(self.text.len());
        let (before, after) = self.text.split_at(pos);
        format!("{before}\u{2588}{after}")
    }

    /// Apply a key event to the buffer. Returns `true` if it was consumed.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.cursor = self.cursor.min(self.text.len());

        match code {
            // --- Cursor movement ---
            KeyCode::Left if modifiers.contains(KeyModifiers::ALT) => {
                self.cursor = word_boundary_left(&self.text, self.cursor);
                true
            }
            KeyCode::Left => {
                if let Some(ch) = self.text[..self.cursor].chars().next_back() {
                    self.cursor -= ch.len_utf8();
                }
                true
            }
            KeyCode::Right if modifiers.contains(KeyModifiers::ALT) => {
                self.cursor = word_boundary_right(&self.text, self.cursor);
                true
            }
            KeyCode::Right => {
                if let Some(ch) = self.text[self.cursor..].chars().next() {
                    self.cursor += ch.len_utf8();
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                true
            }

            // --- Deletion ---
            KeyCode::Backspace if modifiers.contains(KeyModifiers::ALT) => {
                let new_pos = word_boundary_left(&self.text, self.cursor);
                self.text.drain(new_pos..self.cursor);
                self.cursor = new_pos;
                true
            }
            KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => {
                let new_pos = word_boundary_left(&self.text, self.cursor);
                self.text.drain(new_pos..self.cursor);
                self.cursor = new_pos;
                true
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.drain(..self.cursor);
                self.cursor = 0;
                true
            }
            KeyCode::Backspace => {
                if let Some(ch) = self.text[..self.cursor].chars().next_back() {
                    let new_pos = self.cursor - ch.len_utf8();
                    self.text.drain(new_pos..self.cursor);
                    self.cursor = new_pos;
                }
                true
            }
            KeyCode::Delete => {
                if let Some(ch) = self.text[self.cursor..].chars().next() {
                    self.text.drain(self.cursor..(self.cursor + ch.len_utf8()));
                }
                true
            }

            // --- Character insertion ---
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            _ => false,
        }
    }
}

/// Byte offset of the previous word boundary (for word-left navigation).
fn word_boundary_left(s: &str, pos: usize) -> usize {
    let trimmed = s[..pos].trim_end();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.rfind(|c: char| c.is_whitespace()) {
        Some(idx) => {
            let ch = trimmed[idx..].chars().next().expect("non-empty slice");
            idx + ch.len_utf8()
        }
        None => 0,
    }
}

/// Byte offset of the next word boundary (for word-right navigation).
fn word_boundary_right(s: &str, pos: usize) -> usize {
    let after = &s[pos..];
    match after.find(|c: char| c.is_whitespace()) {
        None => s.len(),
        Some(offset) => match after[offset..].find(|c: char| !c.is_whitespace()) {
            None => s.len(),
            Some(word_start) => pos + offset + word_start,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(buf: &mut InputBuffer, code: KeyCode) -> bool {
        buf.handle_key(code, KeyModifiers::NONE)
    }

    #[test]
    fn word_boundary_left_cases() {
        assert_eq!(word_boundary_left("hello world", 11), 6);
        assert_eq!(word_boundary_left("hello world  ", 13), 6);
        assert_eq!(word_boundary_left("hello", 5), 0);
        assert_eq!(word_boundary_left("", 0), 0);
        assert_eq!(word_boundary_left("   ", 3), 0);
    }

    #[test]
    fn word_boundary_right_cases() {
        assert_eq!(word_boundary_right("hello world", 0), 6);
        assert_eq!(word_boundary_right("hello world", 2), 6);
        assert_eq!(word_boundary_right("hello world", 11), 11);
    }

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut buf = InputBuffer::with_text("hllo");
        buf.handle_key(KeyCode::Home, KeyModifiers::NONE);
        key(&mut buf, KeyCode::Right);
        key(&mut buf, KeyCode::Char('e'));
        assert_eq!(buf.text(), "hello");

        key(&mut buf, KeyCode::Backspace);
        assert_eq!(buf.text(), "hllo");
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut buf = InputBuffer::with_text("heello");
        buf.handle_key(KeyCode::Home, KeyModifiers::NONE);
        key(&mut buf, KeyCode::Right);
        key(&mut buf, KeyCode::Right);
        key(&mut buf, KeyCode::Delete);
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut buf = InputBuffer::with_text("hello world");
        let consumed = buf.handle_key(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert!(consumed);
        assert_eq!(buf.text(), "hello ");
    }

    #[test]
    fn ctrl_u_clears_before_cursor() {
        let mut buf = InputBuffer::with_text("hello world");
        buf.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(buf.text(), "");
        assert!(buf.is_empty());
    }

    #[test]
    fn alt_arrows_jump_words() {
        let mut buf = InputBuffer::with_text("hello world test");
        buf.handle_key(KeyCode::Left, KeyModifiers::ALT);
        buf.handle_key(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(buf.display_with_cursor(), "hello \u{2588}world test");
        buf.handle_key(KeyCode::Right, KeyModifiers::ALT);
        assert_eq!(buf.display_with_cursor(), "hello world \u{2588}test");
    }

    #[test]
    fn ctrl_char_is_not_consumed() {
        let mut buf = InputBuffer::with_text("hello");
        let consumed = buf.handle_key(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!consumed);
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut buf = InputBuffer::with_text("old");
        buf.set_text("fresh");
        assert_eq!(buf.display_with_cursor(), "fresh\u{2588}");
    }

    #[test]
    fn take_leaves_buffer_empty() {
        let mut buf = InputBuffer::with_text("hello");
        assert_eq!(buf.take(), "hello");
        assert!(buf.is_empty());
        assert_eq!(buf.display_with_cursor(), "\u{2588}");
    }
}
