//! Handle-addressed overlay storage.
//!
//! Overlays are replaced in sets: a caller hands back the handles it received last time and the
//! specs it wants now. Handles are never reused.

use inspector_panel::{DecorationHandle, DecorationSpec};
use std::collections::BTreeMap;

/// Installed overlays, keyed by handle.
#[derive(Debug, Clone, Default)]
pub struct DecorationStore {
    next: u64,
    installed: BTreeMap<DecorationHandle, DecorationSpec>,
}

impl DecorationStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retire `previous` and install `decorations`, returning their handles in order.
    ///
    /// Handles that are not installed (already retired, or issued by another store) are ignored.
    pub fn delta(
        &mut self,
        previous: &[DecorationHandle],
        decorations: Vec<DecorationSpec>,
    ) -> Vec<DecorationHandle> {
        let retired = previous
            .iter()
            .filter(|handle| self.installed.remove(*handle).is_some())
            .count();

        let handles: Vec<_> = decorations
            .into_iter()
            .map(|spec| {
                self.next += 1;
                let handle = DecorationHandle(self.next);
                self.installed.insert(handle, spec);
                handle
            })
            .collect();

        tracing::trace!(retired, installed = handles.len(), "decoration delta");
        handles
    }

    /// Installed overlays in installation order.
    pub fn active(&self) -> impl Iterator<Item = (DecorationHandle, &DecorationSpec)> {
        self.installed.iter().map(|(handle, spec)| (*handle, spec))
    }

    /// The overlay behind `handle`.
    pub fn get(&self, handle: DecorationHandle) -> Option<&DecorationSpec> {
        self.installed.get(&handle)
    }

    /// Number of installed overlays.
    pub fn len(&self) -> usize {
        self.installed.len()
    }

    /// Whether nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Remove every overlay.
    pub fn clear(&mut self) {
        self.installed.clear();
    }
}
