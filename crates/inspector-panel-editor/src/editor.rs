//! A headless editor: text, overlays, and a record of scroll requests.

use crate::decorations::DecorationStore;
use crate::text_model::TextModel;
use inspector_panel::{DecorationHandle, DecorationSpec, DocumentModel, EditorSurface};

/// An editor without a screen.
///
/// Hosts that render elsewhere (a terminal, a test harness) use it to observe what the panel asks
/// of the editor.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEditor {
    model: TextModel,
    decorations: DecorationStore,
    revealed_lines: Vec<u32>,
}

impl HeadlessEditor {
    /// An editor showing `text`.
    pub fn new(text: &str) -> Self {
        Self {
            model: TextModel::from_text(text),
            ..Self::default()
        }
    }

    /// The document.
    pub fn text_model(&self) -> &TextModel {
        &self.model
    }

    /// Replace the document text. Installed overlays are kept.
    pub fn set_text(&mut self, text: &str) {
        self.model.set_text(text);
    }

    /// Installed overlays.
    pub fn decorations(&self) -> &DecorationStore {
        &self.decorations
    }

    /// Specs of every installed overlay, in installation order.
    pub fn active_specs(&self) -> Vec<&DecorationSpec> {
        self.decorations.active().map(|(_, spec)| spec).collect()
    }

    /// Every line the editor was asked to reveal, oldest first.
    pub fn revealed_lines(&self) -> &[u32] {
        &self.revealed_lines
    }

    /// The most recently revealed line.
    pub fn last_revealed_line(&self) -> Option<u32> {
        self.revealed_lines.last().copied()
    }
}

impl EditorSurface for HeadlessEditor {
    fn model(&self) -> &dyn DocumentModel {
        &self.model
    }

    fn apply_decorations(
        &mut self,
        previous: &[DecorationHandle],
        decorations: Vec<DecorationSpec>,
    ) -> Vec<DecorationHandle> {
        self.decorations.delta(previous, decorations)
    }

    fn reveal_line(&mut self, line: u32) {
        tracing::trace!(line, "reveal line");
        self.revealed_lines.push(line);
    }
}
