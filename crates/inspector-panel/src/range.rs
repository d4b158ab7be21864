//! Document ranges and editor positions.
//!
//! Offsets handed to the panel by the analysis engine are measured in UTF-16 code units, which is
//! how the editor addresses its text. Positions returned by the editor model are 1-based.

/// A half-open offset range (`start..end`) into the edited document.
///
/// Both offsets are UTF-16 code units from the start of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    /// Range start offset (inclusive).
    pub start: usize,
    /// Range end offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Create a new range. A reversed pair is normalized so that `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Build a range from a `start` offset and a `length`.
    pub fn from_start_length(start: usize, length: usize) -> Self {
        Self {
            start,
            end: start.saturating_add(length),
        }
    }

    /// Length of the range in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A line/column position as reported by the editor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-based).
    pub line: u32,
    /// Column (1-based, UTF-16 code units).
    pub column: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A line/column range used when talking to the editor's decoration API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineColumnRange {
    /// First line (1-based).
    pub start_line: u32,
    /// First column (1-based).
    pub start_column: u32,
    /// Last line (1-based).
    pub end_line: u32,
    /// Column after the last covered unit (1-based).
    pub end_column: u32,
}

impl LineColumnRange {
    /// Build a range from two positions.
    pub fn from_positions(start: Position, end: Position) -> Self {
        Self {
            start_line: start.line,
            start_column: start.column,
            end_line: end.line,
            end_column: end.column,
        }
    }

    /// Start position.
    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    /// End position.
    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }
}
