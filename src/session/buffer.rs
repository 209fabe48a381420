//! Editable text buffer backing the code and input areas.
//!
//! Cursor and selection anchor are byte indices, kept on char boundaries.

const INDENT: &str = "    ";

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole buffer, e.g. with freshly fetched defaults.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = 0;
        self.anchor = None;
    }

    /// Ordered selection range, if a non-empty one exists.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.anchor
            .filter(|&a| a != self.cursor)
            .map(|a| (a.min(self.cursor), a.max(self.cursor)))
    }

    /// Insert four spaces at the cursor, replacing any selection, and leave
    /// the cursor right after them.
    pub fn insert_indent(&mut self) {
        let start = self.delete_selection_if_any();
        self.text.insert_str(start, INDENT);
        self.cursor = start + INDENT.len();
    }

    pub fn insert_char(&mut self, c: char) {
        let start = self.delete_selection_if_any();
        self.text.insert(start, c);
        self.cursor = start + c.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if self.selection().is_some() {
            self.delete_selection_if_any();
            return;
        }
        self.anchor = None;
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.selection().is_some() {
            self.delete_selection_if_any();
            return;
        }
        self.anchor = None;
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self, select: bool) {
        self.track_anchor(select);
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self, select: bool) {
        self.track_anchor(select);
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self, select: bool) {
        self.track_anchor(select);
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self, select: bool) {
        self.track_anchor(select);
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self, select: bool) {
        self.track_anchor(select);
        let line_start = self.line_start(self.cursor);
        if line_start == 0 {
            self.cursor = 0;
            return;
        }
        let col = self.text[line_start..self.cursor].chars().count();
        let prev_start = self.line_start(line_start - 1);
        self.cursor = self.advance_by(prev_start, line_start - 1, col);
    }

    pub fn move_down(&mut self, select: bool) {
        self.track_anchor(select);
        let line_start = self.line_start(self.cursor);
        let line_end = self.line_end(self.cursor);
        if line_end == self.text.len() {
            self.cursor = line_end;
            return;
        }
        let col = self.text[line_start..self.cursor].chars().count();
        let next_start = line_end + 1;
        let next_end = self.line_end(next_start);
        self.cursor = self.advance_by(next_start, next_end, col);
    }

    /// Cursor position as (row, byte offset within that row), for rendering.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let row = self.text[..self.cursor].matches('\n').count();
        let line_start = self.line_start(self.cursor);
        (row, self.cursor - line_start)
    }

    fn track_anchor(&mut self, select: bool) {
        if select {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
    }

    /// Remove the selection if present; returns the insertion point.
    fn delete_selection_if_any(&mut self) -> usize {
        if let Some((start, end)) = self.selection() {
            self.text.replace_range(start..end, "");
            self.cursor = start;
        }
        self.anchor = None;
        self.cursor
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].chars().next_back().map(|c| self.cursor - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..].chars().next().map(|c| self.cursor + c.len_utf8())
    }

    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.text[at..].find('\n').map(|i| at + i).unwrap_or(self.text.len())
    }

    /// Walk from `start` at most `count` chars, stopping at `limit`.
    fn advance_by(&self, start: usize, limit: usize, count: usize) -> usize {
        let mut pos = start;
        for c in self.text[start..limit].chars().take(count) {
            pos += c.len_utf8();
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_cursor(text: &str, cursor: usize) -> TextBuffer {
        let mut b = TextBuffer::new();
        b.set_text(text);
        for _ in 0..cursor {
            b.move_right(false);
        }
        b
    }

    #[test]
    fn indent_inserts_four_spaces_at_cursor() {
        let mut b = buffer_with_cursor("abcdef", 3);
        let before = b.text().len();
        b.insert_indent();
        assert_eq!(b.text(), "abc    def");
        assert_eq!(b.text().len(), before + 4);
        assert_eq!(b.cursor(), 3 + 4);
    }

    #[test]
    fn indent_replaces_selection() {
        let mut b = buffer_with_cursor("abcdef", 1);
        b.move_right(true);
        b.move_right(true);
        assert_eq!(b.selection(), Some((1, 3)));
        b.insert_indent();
        assert_eq!(b.text(), "a    def");
        assert_eq!(b.cursor(), 5);
        assert_eq!(b.selection(), None);
    }

    #[test]
    fn typing_replaces_selection() {
        let mut b = buffer_with_cursor("hello", 0);
        for _ in 0..5 {
            b.move_right(true);
        }
        b.insert_char('x');
        assert_eq!(b.text(), "x");
        assert_eq!(b.cursor(), 1);
    }

    #[test]
    fn backspace_and_delete() {
        let mut b = buffer_with_cursor("ab", 1);
        b.backspace();
        assert_eq!(b.text(), "b");
        assert_eq!(b.cursor(), 0);
        b.delete();
        assert_eq!(b.text(), "");
    }

    #[test]
    fn vertical_movement_keeps_column() {
        let mut b = buffer_with_cursor("abcd\nxy\nlong line", 2);
        b.move_down(false);
        let (row, col) = b.cursor_line_col();
        assert_eq!((row, col), (1, 2)); // clamped to end of "xy"
        b.move_down(false);
        assert_eq!(b.cursor_line_col().0, 2);
        b.move_up(false);
        b.move_up(false);
        assert_eq!(b.cursor_line_col().0, 0);
    }

    #[test]
    fn multibyte_chars_stay_on_boundaries() {
        let mut b = TextBuffer::new();
        b.set_text("héllo");
        b.move_right(false);
        b.move_right(false);
        b.backspace();
        assert_eq!(b.text(), "hllo");
    }

    #[test]
    fn set_text_clears_cursor_and_selection() {
        let mut b = buffer_with_cursor("abc", 2);
        b.move_right(true);
        b.set_text("replaced");
        assert_eq!(b.cursor(), 0);
        assert_eq!(b.selection(), None);
    }
}
