use inspector_panel::{DecorationHandle, DecorationSpec, DocumentModel, EditorSurface, Position};

/// Single-line document: offset `n` is column `n + 1`.
pub struct FlatDocument;

impl DocumentModel for FlatDocument {
    fn position_at(&self, offset: usize) -> Position {
        Position::new(1, offset as u32 + 1)
    }
}

#[derive(Default)]
pub struct FakeEditor {
    next: u64,
    pub installed: Vec<(DecorationHandle, DecorationSpec)>,
    pub revealed: Vec<u32>,
}

impl EditorSurface for FakeEditor {
    fn model(&self) -> &dyn DocumentModel {
        &FlatDocument
    }

    fn apply_decorations(
        &mut self,
        previous: &[DecorationHandle],
        decorations: Vec<DecorationSpec>,
    ) -> Vec<DecorationHandle> {
        self.installed.retain(|(handle, _)| !previous.contains(handle));
        decorations
            .into_iter()
            .map(|spec| {
                self.next += 1;
                self.installed.push((DecorationHandle(self.next), spec));
                DecorationHandle(self.next)
            })
            .collect()
    }

    fn reveal_line(&mut self, line: u32) {
        self.revealed.push(line);
    }
}
