use thiserror::Error;

/// Errors raised while converting an analysis-engine payload into a [`SyntaxNode`].
///
/// [`SyntaxNode`]: crate::syntax::SyntaxNode
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    /// The value at `path` is not a record.
    #[error("expected a node object at {path}")]
    NotAnObject {
        /// Field path from the root node (e.g. `root.statements[2]`).
        path: String,
    },

    /// The node at `path` has no usable `pos`/`end` pair.
    #[error("node at {path} is missing a numeric pos/end range")]
    MissingRange {
        /// Field path from the root node.
        path: String,
    },

    /// The node at `path` has `pos > end`.
    #[error("node at {path} has a reversed range {start}..{end}")]
    ReversedRange {
        /// Field path from the root node.
        path: String,
        /// The `pos` value.
        start: usize,
        /// The `end` value.
        end: usize,
    },

    /// The node at `path` has no usable kind tag.
    #[error("node at {path} has no kind tag")]
    MissingKind {
        /// Field path from the root node.
        path: String,
    },
}

/// Errors raised while loading a [`PanelConfig`](crate::config::PanelConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for the expected shape.
    #[error("invalid panel configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while decoding diagnostics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiagnosticError {
    /// Category value outside `0..=3`.
    #[error("unknown diagnostic category {0}")]
    UnknownCategory(u8),
}
