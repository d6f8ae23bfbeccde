//! Input field handling for the terminal user interface.

/// A text input field with cursor position and active state management.
///
/// The cursor indexes characters, not bytes, so multibyte input never
/// lands inside a char boundary.
#[derive(Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            active: false,
        }
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset corresponding to the character cursor.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Empty the field and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_moves_cursor() {
        let mut field = InputField::new();
        field.handle_char('a');
        field.handle_char('b');
        assert_eq!(field.value, "ab");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn insert_mid_string() {
        let mut field = InputField::with_value("ac");
        field.move_cursor_left();
        field.handle_char('b');
        assert_eq!(field.value, "abc");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn backspace_and_delete_at_bounds() {
        let mut field = InputField::new();
        field.handle_backspace();
        field.handle_delete();
        assert_eq!(field.value, "");

        let mut field = InputField::with_value("xy");
        field.handle_backspace();
        assert_eq!(field.value, "x");
        field.handle_delete();
        assert_eq!(field.value, "x");
    }

    #[test]
    fn multibyte_input_keeps_char_boundaries() {
        let mut field = InputField::new();
        field.handle_char('é');
        field.handle_char('t');
        field.handle_char('é');
        assert_eq!(field.value, "été");
        assert_eq!(field.cursor, 3);

        field.move_cursor_left();
        field.handle_backspace();
        assert_eq!(field.value, "éé");
        assert_eq!(field.cursor, 1);
    }
}
