// Editor pane state.
// A rope buffer mirroring the active file plus a char-indexed cursor.
// The app sends the buffer back as `UpdateFileContent` after each edit.

use ropey::{Rope, RopeSlice};
use unicode_width::UnicodeWidthStr;

use super::ids::NodeId;

/// Buffer and cursor for the active file.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    rope: Rope,
    /// Char index into the buffer, `0..=len_chars`.
    cursor: usize,
    /// File the buffer was loaded from.
    file_id: Option<NodeId>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `text` for `file_id` and put the cursor at its end.
    pub fn load(&mut self, file_id: Option<NodeId>, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.rope.len_chars();
        self.file_id = file_id;
    }

    pub fn file_id(&self) -> Option<NodeId> {
        self.file_id
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.rope.len_chars());
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn insert(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
    }

    /// Delete the char before the cursor. False at the start of the buffer.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.rope.remove(self.cursor..self.cursor + 1);
        true
    }

    /// Delete the char under the cursor. False at the end of the buffer.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.cursor..self.cursor + 1);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.rope.len_chars());
    }

    /// Move to the start of the current line.
    pub fn move_home(&mut self) {
        self.cursor = self.rope.line_to_char(self.line());
    }

    /// Move to the end of the current line.
    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.line());
    }

    pub fn move_up(&mut self) {
        let line = self.line();
        if line == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.cursor - self.rope.line_to_char(line);
        self.cursor = (self.rope.line_to_char(line - 1) + column).min(self.line_end(line - 1));
    }

    pub fn move_down(&mut self) {
        let line = self.line();
        if line + 1 >= self.rope.len_lines() {
            self.cursor = self.rope.len_chars();
            return;
        }
        let column = self.cursor - self.rope.line_to_char(line);
        self.cursor = (self.rope.line_to_char(line + 1) + column).min(self.line_end(line + 1));
    }

    /// Zero-based (line, char column) of the cursor.
    pub fn position(&self) -> (usize, usize) {
        let line = self.line();
        (line, self.cursor - self.rope.line_to_char(line))
    }

    /// Screen cells between the start of the line and the cursor.
    /// Wide glyphs (CJK, most emoji) take two cells.
    pub fn display_column(&self) -> usize {
        let start = self.rope.line_to_char(self.line());
        slice_width(self.rope.slice(start..self.cursor))
    }

    fn line(&self) -> usize {
        self.rope.char_to_line(self.cursor)
    }

    /// Char index of the end of `line`, before its line break.
    fn line_end(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
        }
        if len > 0 && slice.char(len - 1) == '\r' {
            len -= 1;
        }
        self.rope.line_to_char(line) + len
    }
}

fn slice_width(slice: RopeSlice<'_>) -> usize {
    slice.chunks().map(UnicodeWidthStr::width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_at(text: &str, cursor: usize) -> EditorState {
        let mut editor = EditorState::new();
        editor.load(None, text);
        editor.set_cursor(cursor);
        editor
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut editor = EditorState::new();
        editor.insert('h');
        editor.insert('i');
        assert_eq!(editor.text(), "hi");
        assert_eq!(editor.cursor(), 2);

        editor.move_left();
        editor.insert('é');
        assert_eq!(editor.text(), "héi");

        assert!(editor.backspace());
        assert_eq!(editor.text(), "hi");
        assert_eq!(editor.cursor(), 1);

        editor.set_cursor(0);
        assert!(!editor.backspace());
        assert_eq!(editor.text(), "hi");
    }

    #[test]
    fn test_delete_forward() {
        let mut editor = editor_at("abc", 0);
        assert!(editor.delete());
        assert_eq!(editor.text(), "bc");
        assert_eq!(editor.cursor(), 0);

        editor.set_cursor(2);
        assert!(!editor.delete());
    }

    #[test]
    fn test_load_puts_cursor_at_end() {
        let id = NodeId::new();
        let mut editor = EditorState::new();
        editor.load(Some(id), "one\ntwo");
        assert_eq!(editor.file_id(), Some(id));
        assert_eq!(editor.cursor(), 7);
        assert_eq!(editor.position(), (1, 3));
    }

    #[test]
    fn test_home_end_are_line_aware() {
        let mut editor = editor_at("one\ntwo\nthree", 5);

        editor.move_home();
        assert_eq!(editor.cursor(), 4);
        editor.move_end();
        assert_eq!(editor.cursor(), 7);
        assert_eq!(editor.position(), (1, 3));
    }

    #[test]
    fn test_end_stops_before_crlf() {
        let mut editor = editor_at("ab\r\ncd", 0);
        editor.move_end();
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let text = "abcd\nx\nlonger";
        let mut editor = editor_at(text, 3);

        editor.move_down();
        assert_eq!(editor.position(), (1, 1));
        editor.move_down();
        assert_eq!(editor.position(), (2, 1));
        editor.move_down();
        assert_eq!(editor.cursor(), text.chars().count());

        // Column shrinks to 1 passing through the short middle line.
        editor.move_up();
        editor.move_up();
        assert_eq!(editor.position(), (0, 1));
        editor.move_up();
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_cursor_is_clamped_to_buffer() {
        let mut editor = editor_at("abc", 10);
        assert_eq!(editor.cursor(), 3);

        editor.move_right();
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_display_column_counts_wide_glyphs() {
        let mut editor = editor_at("日本", 2);
        assert_eq!(editor.position(), (0, 2));
        assert_eq!(editor.display_column(), 4);

        editor.load(None, "ok\na日b");
        assert_eq!(editor.position(), (1, 3));
        assert_eq!(editor.display_column(), 4);
    }
}
