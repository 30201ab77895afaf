/// A single-line edit buffer with a byte-offset cursor kept on char
/// boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    pub text: String,
    pub cursor: usize,
}

impl TextBuffer {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextBuffer { text, cursor }
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.cursor
                + self.text[self.cursor..]
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(0);
            self.text.drain(self.cursor..next);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    pub fn right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor += self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Which card field an inline edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Year,
}

/// An in-progress inline edit of one card's name or year.
///
/// The buffer starts prefilled with the current value and "selected", the
/// way a browser input behaves after select(): the first typed character
/// replaces the whole value, while a cursor movement just deselects.
#[derive(Debug)]
pub struct EditState {
    pub card: String,
    pub field: EditField,
    pub input: TextBuffer,
    pub original: String,
    select_all: bool,
}

impl EditState {
    pub fn new(card: impl Into<String>, field: EditField, value: impl Into<String>) -> Self {
        let original = value.into();
        EditState {
            card: card.into(),
            field,
            input: TextBuffer::from_text(original.clone()),
            original,
            select_all: true,
        }
    }

    pub fn selection_active(&self) -> bool {
        self.select_all
    }

    pub fn insert_char(&mut self, c: char) {
        if self.select_all {
            self.input.clear();
            self.select_all = false;
        }
        self.input.insert(c);
    }

    pub fn backspace(&mut self) {
        if self.select_all {
            self.input.clear();
            self.select_all = false;
            return;
        }
        self.input.backspace();
    }

    pub fn delete_forward(&mut self) {
        if self.select_all {
            self.input.clear();
            self.select_all = false;
            return;
        }
        self.input.delete_forward();
    }

    pub fn cursor_left(&mut self) {
        self.select_all = false;
        self.input.left();
    }

    pub fn cursor_right(&mut self) {
        self.select_all = false;
        self.input.right();
    }

    pub fn cursor_home(&mut self) {
        self.select_all = false;
        self.input.home();
    }

    pub fn cursor_end(&mut self) {
        self.select_all = false;
        self.input.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_ops_stay_on_char_boundaries() {
        let mut buf = TextBuffer::from_text("héllo");
        buf.left();
        buf.left();
        buf.left();
        buf.left();
        assert_eq!(buf.cursor, 1);
        buf.backspace();
        assert_eq!(buf.text, "éllo");
        assert_eq!(buf.cursor, 0);
        buf.delete_forward();
        assert_eq!(buf.text, "llo");
        buf.insert('ø');
        assert_eq!(buf.text, "øllo");
        buf.end();
        assert_eq!(buf.cursor, "øllo".len());
    }

    #[test]
    fn first_typed_char_replaces_prefilled_value() {
        let mut edit = EditState::new("Comet", EditField::Year, "1971");
        edit.insert_char('1');
        edit.insert_char('9');
        assert_eq!(edit.input.text, "19");
    }

    #[test]
    fn cursor_move_deselects_without_wiping() {
        let mut edit = EditState::new("Comet", EditField::Year, "1971");
        edit.cursor_left();
        edit.insert_char('x');
        assert_eq!(edit.input.text, "197x1");
    }

    #[test]
    fn backspace_on_selection_wipes_the_value() {
        let mut edit = EditState::new("Comet", EditField::Name, "Comet");
        edit.backspace();
        assert_eq!(edit.input.text, "");
        edit.insert_char('Z');
        assert_eq!(edit.input.text, "Z");
    }
}
