//! Single-line text input with cursor management and an optional character
//! filter.

/// A text input buffer with cursor positioning.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
    accept: fn(char) -> bool,
    max_chars: Option<usize>,
}

fn any_char(c: char) -> bool {
    !c.is_control()
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            accept: any_char,
            max_chars: None,
        }
    }

    /// Only characters for which `accept` holds are inserted.
    pub fn with_filter(mut self, accept: fn(char) -> bool) -> Self {
        self.accept = accept;
        self
    }

    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    /// Insert at the cursor. Returns `false` when the filter or length cap
    /// rejected the character.
    pub fn insert_char(&mut self, c: char) -> bool {
        if !(self.accept)(c) {
            return false;
        }
        if self
            .max_chars
            .is_some_and(|max| self.content.chars().count() >= max)
        {
            return false;
        }
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert every accepted character of `text`. Returns how many were taken.
    pub fn insert_str(&mut self, text: &str) -> usize {
        text.chars().filter(|&c| self.insert_char(c)).count()
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Take the content out, resetting the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter for numeric fields.
pub fn digits_only(c: char) -> bool {
    c.is_ascii_digit()
}

/// Filter for phone numbers.
pub fn phone_chars(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | ' ' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_cursor() {
        let mut buf = InputBuffer::new();
        buf.insert_char('h');
        buf.insert_char('i');
        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_backspace() {
        let mut buf = InputBuffer::new();
        buf.insert_char('a');
        buf.insert_char('b');
        buf.backspace();
        assert_eq!(buf.text(), "a");
        assert_eq!(buf.cursor_position(), 1);
    }

    #[test]
    fn test_movement_and_delete() {
        let mut buf = InputBuffer::new();
        buf.insert_str("abc");
        buf.move_home();
        assert_eq!(buf.cursor_position(), 0);
        buf.delete();
        assert_eq!(buf.text(), "bc");
        buf.move_end();
        assert_eq!(buf.cursor_position(), 2);
        buf.move_left();
        assert_eq!(buf.cursor_position(), 1);
        buf.move_right();
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_multibyte_cursor_column() {
        let mut buf = InputBuffer::new();
        buf.insert_str("Zoë");
        assert_eq!(buf.cursor_position(), 4);
        assert_eq!(buf.cursor_column(), 3);
        buf.backspace();
        assert_eq!(buf.text(), "Zo");
    }

    #[test]
    fn test_take_resets() {
        let mut buf = InputBuffer::new();
        buf.insert_char('x');
        let text = buf.take();
        assert_eq!(text, "x");
        assert!(buf.text().is_empty());
        assert_eq!(buf.cursor_position(), 0);
    }

    #[test]
    fn test_is_empty_trims() {
        let mut buf = InputBuffer::new();
        assert!(buf.is_empty());
        buf.insert_char(' ');
        assert!(buf.is_empty());
        buf.insert_char('a');
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_digit_filter_rejects_letters() {
        let mut buf = InputBuffer::new().with_filter(digits_only).with_max_chars(3);
        assert!(!buf.insert_char('a'));
        assert_eq!(buf.insert_str("1x2-34"), 3);
        assert_eq!(buf.text(), "123");
    }

    #[test]
    fn test_phone_filter() {
        let mut buf = InputBuffer::new().with_filter(phone_chars);
        buf.insert_str("+91 98-76x");
        assert_eq!(buf.text(), "+91 98-76");
    }

    #[test]
    fn test_control_chars_rejected_by_default() {
        let mut buf = InputBuffer::new();
        assert!(!buf.insert_char('\n'));
        assert!(buf.text().is_empty());
    }
}
