#![warn(missing_docs)]
//! `inspector-panel-editor` - a headless editor surface for `inspector-panel`.
//!
//! This crate provides a rope-backed [`TextModel`] addressed in UTF-16 code units, a
//! handle-based [`DecorationStore`], and [`HeadlessEditor`], which combines both and implements
//! `inspector_panel::EditorSurface`.
//!
//! ```rust
//! use inspector_panel::{Diagnostic, DiagnosticCategory, Panel};
//! use inspector_panel_editor::HeadlessEditor;
//! use std::time::Duration;
//!
//! let mut panel = Panel::new(HeadlessEditor::new("let a = 1;\nlet b: string = 2;\n"));
//! let list = panel.list_diagnostics(&[Diagnostic::new(
//!     DiagnosticCategory::Error,
//!     "Type 'number' is not assignable to type 'string'.",
//! )
//! .at(15, 1)]);
//! let item = panel.view().children(list)[0];
//!
//! panel.click(item);
//! assert_eq!(panel.editor().last_revealed_line(), Some(2));
//! assert_eq!(panel.editor().decorations().len(), 1);
//!
//! panel.advance(Duration::from_millis(300));
//! assert!(panel.editor().decorations().is_empty());
//! ```

pub mod decorations;
pub mod editor;
pub mod text_model;

pub use decorations::DecorationStore;
pub use editor::HeadlessEditor;
pub use text_model::TextModel;
