//! Rope-backed document model addressed in UTF-16 code units.
//!
//! Offsets coming from the analysis engine count UTF-16 code units; positions are 1-based lines
//! and 1-based UTF-16 columns.

use inspector_panel::{DocumentModel, Position};
use ropey::Rope;

/// The text shown by a [`HeadlessEditor`](crate::HeadlessEditor).
#[derive(Debug, Clone)]
pub struct TextModel {
    rope: Rope,
}

impl TextModel {
    /// Build a model from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Document length in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    /// Text of a 1-based line, without its line break.
    pub fn line_text(&self, line: u32) -> Option<String> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        if index >= self.rope.len_lines() {
            return None;
        }
        let text = self.rope.line(index).to_string();
        let text = text.strip_suffix('\n').unwrap_or(&text);
        let text = text.strip_suffix('\r').unwrap_or(text);
        Some(text.to_string())
    }

    /// Convert a UTF-16 offset to a position, clamping to the document end.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_utf16_cu());
        let char_idx = self.rope.utf16_cu_to_char(offset);
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let column =
            self.rope.char_to_utf16_cu(char_idx) - self.rope.char_to_utf16_cu(line_start);
        Position::new(line as u32 + 1, column as u32 + 1)
    }

    /// Convert a position back to a UTF-16 offset. Columns past the line end clamp to it; lines
    /// past the document end clamp to the document end.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = (position.line.max(1) - 1) as usize;
        if line >= self.rope.len_lines() {
            return self.rope.len_utf16_cu();
        }
        let line_start = self.rope.line_to_char(line);
        let line_text = self.line_text(position.line).unwrap_or_default();
        let line_len: usize = line_text.chars().map(char::len_utf16).sum();
        let column = ((position.column.max(1) - 1) as usize).min(line_len);
        self.rope.char_to_utf16_cu(line_start) + column
    }
}

impl Default for TextModel {
    fn default() -> Self {
        Self { rope: Rope::new() }
    }
}

impl DocumentModel for TextModel {
    fn position_at(&self, offset: usize) -> Position {
        TextModel::position_at(self, offset)
    }
}
