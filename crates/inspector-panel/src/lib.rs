#![warn(missing_docs)]
//! Inspector Panel - editor-synchronized views of diagnostics and syntax trees
//!
//! # Overview
//!
//! `inspector-panel` renders structured program information supplied by an external analysis
//! engine into a headless element tree, and keeps it linked to a live editor: hovering an element
//! highlights its source range, clicking a diagnostic reveals it and pins the highlight for a
//! short moment.
//!
//! The crate does not parse source code and does not own the text. The editor is reached through
//! the [`EditorSurface`] trait; `inspector-panel-editor` provides a rope-backed implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Panel facade (widgets, events, timers)     │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  TreeRenderer        │  Diagnostics list    │  ← Rendering
//! ├──────────────────────┴──────────────────────┤
//! │  HighlightBridge + HighlightSession         │  ← Editor sync (hover, pin)
//! ├─────────────────────────────────────────────┤
//! │  EditorSurface / DocumentModel              │  ← Host editor
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use inspector_panel::{
//!     DecorationHandle, DecorationSpec, DocumentModel, EditorSurface, Panel, Position,
//!     SyntaxKind, SyntaxNode, TextRange,
//! };
//!
//! struct OneLine;
//!
//! impl DocumentModel for OneLine {
//!     fn position_at(&self, offset: usize) -> Position {
//!         Position::new(1, offset as u32 + 1)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Editor {
//!     next: u64,
//!     installed: Vec<(DecorationHandle, DecorationSpec)>,
//! }
//!
//! impl EditorSurface for Editor {
//!     fn model(&self) -> &dyn DocumentModel {
//!         &OneLine
//!     }
//!
//!     fn apply_decorations(
//!         &mut self,
//!         previous: &[DecorationHandle],
//!         decorations: Vec<DecorationSpec>,
//!     ) -> Vec<DecorationHandle> {
//!         self.installed.retain(|(handle, _)| !previous.contains(handle));
//!         decorations
//!             .into_iter()
//!             .map(|spec| {
//!                 self.next += 1;
//!                 self.installed.push((DecorationHandle(self.next), spec));
//!                 DecorationHandle(self.next)
//!             })
//!             .collect()
//!     }
//!
//!     fn reveal_line(&mut self, _line: u32) {}
//! }
//!
//! let mut panel = Panel::new(Editor::default());
//! let root = SyntaxNode::new(SyntaxKind::SourceFile, TextRange::new(0, 10));
//! let tree = panel.create_ast_tree(&root);
//!
//! let heading = panel.view().find_by_class(tree, "node-name")[0];
//! assert!(panel.pointer_enter(heading));
//! assert_eq!(panel.editor().installed.len(), 1);
//! assert!(panel.pointer_leave(heading));
//! assert!(panel.editor().installed.is_empty());
//! ```
//!
//! # Module Description
//!
//! - [`range`] - document ranges and editor positions
//! - [`editor`] - the editor collaborator traits
//! - [`highlight`] - hover/click synchronization and the pin
//! - [`syntax`] / [`syntax_kind`] - tagged syntax node model and kind names
//! - [`tree`] - collapsible tree rendering
//! - [`diagnostics`] - diagnostic records
//! - [`panel`] - the panel facade
//! - [`view`] - the element tree
//! - [`timers`] - host-driven one-shot timers
//! - [`settings`] / [`config`] - settings store and panel configuration

pub mod config;
pub mod diagnostics;
pub mod editor;
mod error;
pub mod highlight;
pub mod panel;
pub mod range;
pub mod settings;
pub mod syntax;
pub mod syntax_kind;
pub mod timers;
pub mod tree;
pub mod view;

pub use config::PanelConfig;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage, MessageChain};
pub use editor::{DecorationHandle, DecorationSpec, DocumentModel, EditorSurface};
pub use error::{ConfigError, DiagnosticError, NodeError};
pub use highlight::{
    HighlightBridge, HighlightKind, HighlightRequest, HighlightSession, PinReleasePolicy,
    TimerTask,
};
pub use panel::{Key, Panel};
pub use range::{LineColumnRange, Position, TextRange};
pub use settings::{
    MemorySettings, OptionListStyle, SettingOption, SettingsStore, TextInputConfig,
};
pub use syntax::{
    BACK_REFERENCE_FIELDS, Field, FieldValue, KIND_FIELD, Literal, NodeKind, SyntaxNode,
};
pub use syntax_kind::SyntaxKind;
pub use timers::{TimerId, TimerQueue};
pub use tree::{RenderedTree, TreeRenderer};
pub use view::{Element, NodeId, ViewNode, ViewTree};
