//! The editor collaborator seen from the panel.
//!
//! The panel never owns the text. It asks the host editor for offset → position conversion,
//! replaces its own overlay set through [`EditorSurface::apply_decorations`], and asks the editor
//! to scroll a line into view.

use crate::range::{LineColumnRange, Position};

/// An opaque handle to one overlay installed in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationHandle(pub u64);

/// One overlay to install in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationSpec {
    /// Covered span in line/column coordinates.
    pub range: LineColumnRange,
    /// Style class the host maps to a visual style (e.g. `highlight-info`).
    pub style_class: String,
    /// Whether the overlay paints whole lines rather than the exact span.
    pub whole_line: bool,
}

impl DecorationSpec {
    /// An inline overlay spanning exactly `range`.
    pub fn inline(range: LineColumnRange, style_class: impl Into<String>) -> Self {
        Self {
            range,
            style_class: style_class.into(),
            whole_line: false,
        }
    }

    /// An overlay painting every line `range` touches.
    pub fn whole_line(range: LineColumnRange, style_class: impl Into<String>) -> Self {
        Self {
            range,
            style_class: style_class.into(),
            whole_line: true,
        }
    }
}

/// Read access to the edited document.
pub trait DocumentModel {
    /// Convert a UTF-16 offset into a 1-based position. Out-of-range offsets clamp to the
    /// document end.
    fn position_at(&self, offset: usize) -> Position;
}

/// The editor operations the panel relies on.
pub trait EditorSurface {
    /// The document currently shown by the editor.
    fn model(&self) -> &dyn DocumentModel;

    /// Replace a decoration set.
    ///
    /// Every handle in `previous` is retired and `decorations` are installed in its place. The
    /// returned handles identify the new set and must be passed back on the next call.
    fn apply_decorations(
        &mut self,
        previous: &[DecorationHandle],
        decorations: Vec<DecorationSpec>,
    ) -> Vec<DecorationHandle>;

    /// Scroll `line` (1-based) into view.
    fn reveal_line(&mut self, line: u32);
}

impl<E: EditorSurface + ?Sized> EditorSurface for &mut E {
    fn model(&self) -> &dyn DocumentModel {
        (**self).model()
    }

    fn apply_decorations(
        &mut self,
        previous: &[DecorationHandle],
        decorations: Vec<DecorationSpec>,
    ) -> Vec<DecorationHandle> {
        (**self).apply_decorations(previous, decorations)
    }

    fn reveal_line(&mut self, line: u32) {
        (**self).reveal_line(line)
    }
}
