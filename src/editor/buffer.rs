use ropey::Rope;

use crate::session::{DocumentView, EditError, InsertionSink};
use crate::span::TokenSpan;

/// Line/column view of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in chars.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// A text buffer backed by a rope data structure.
///
/// The cursor is stored as a char offset so it can be handed straight to the
/// token resolver.
pub struct EditorBuffer {
    rope: Rope,
    cursor: usize,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string, with the cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Cursor as a char offset.
    pub const fn cursor_offset(&self) -> usize {
        self.cursor
    }

    /// Cursor as line and column.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.cursor);
        let col = self.cursor - self.rope.line_to_char(line);
        Cursor::at(line, col)
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Move the cursor to a char offset, clamped to the buffer length.
    pub fn move_to_offset(&mut self, char_idx: usize) {
        self.cursor = char_idx.min(self.rope.len_chars());
    }

    /// Move the cursor to a line and column, clamped to the line.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let line_len = self.line_at(line).map_or(0, |s| s.chars().count());
        self.cursor = self.rope.line_to_char(line) + col.min(line_len);
    }

    /// Move the cursor to the end of the last non-empty line.
    pub fn move_to_content_end(&mut self) {
        let trailing = self
            .rope
            .chars_at(self.rope.len_chars())
            .reversed()
            .take_while(|&ch| ch == '\n' || ch == '\r')
            .count();
        self.cursor = self.rope.len_chars() - trailing;
    }

    /// Insert a string at the cursor and move the cursor past it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.rope.insert(self.cursor, s);
        self.cursor += s.chars().count();
        self.dirty = true;
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.dirty = true;
        true
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl DocumentView for EditorBuffer {
    type Text = Rope;

    fn text(&self) -> &Rope {
        &self.rope
    }

    fn cursor(&self) -> usize {
        self.cursor
    }
}

impl InsertionSink for EditorBuffer {
    fn replace_and_place_caret(
        &mut self,
        span: TokenSpan,
        markup: &str,
        caret_offset: usize,
    ) -> Result<(), EditError> {
        let len = self.rope.len_chars();
        if span.start > span.end || span.end > len {
            return Err(EditError::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }
        let markup_len = markup.chars().count();
        if caret_offset > markup_len {
            return Err(EditError::CaretOutOfBounds {
                caret: caret_offset,
                len: markup_len,
            });
        }
        self.rope.remove(span.range());
        self.rope.insert(span.start, markup);
        self.cursor = span.start + caret_offset;
        self.dirty = true;
        Ok(())
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.line_count())
            .field("cursor", &self.cursor())
            .field("dirty", &self.dirty)
            .finish()
    }
}
