//! Diagnostics as delivered by the analysis engine.
//!
//! The panel lists them, highlights their range on hover, and reveals them on click. Items
//! without a usable range are listed but stay inert.

use crate::error::DiagnosticError;
use crate::range::TextRange;
use serde::Deserialize;

/// Diagnostic category, numbered the way the engine numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum DiagnosticCategory {
    /// `0`
    Warning,
    /// `1`
    Error,
    /// `2`
    Suggestion,
    /// `3`
    Message,
}

impl DiagnosticCategory {
    /// Style class applied to the list item.
    pub fn style_class(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

impl TryFrom<u8> for DiagnosticCategory {
    type Error = DiagnosticError;

    fn try_from(value: u8) -> Result<Self, DiagnosticError> {
        match value {
            0 => Ok(DiagnosticCategory::Warning),
            1 => Ok(DiagnosticCategory::Error),
            2 => Ok(DiagnosticCategory::Suggestion),
            3 => Ok(DiagnosticCategory::Message),
            other => Err(DiagnosticError::UnknownCategory(other)),
        }
    }
}

/// One link of a nested diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageChain {
    /// Text of this link.
    pub message_text: String,
    /// Nested details, rendered one level deeper.
    #[serde(default)]
    pub next: Vec<MessageChain>,
}

impl MessageChain {
    /// A chain link without details.
    pub fn new(message_text: impl Into<String>) -> Self {
        Self {
            message_text: message_text.into(),
            next: Vec::new(),
        }
    }

    /// Add a nested detail.
    pub fn with_next(mut self, next: MessageChain) -> Self {
        self.next.push(next);
        self
    }

    fn flatten_into(&self, out: &mut String, new_line: &str, indent: usize) {
        if indent > 0 {
            out.push_str(new_line);
            for _ in 0..indent {
                out.push_str("  ");
            }
        }
        out.push_str(&self.message_text);
        for next in &self.next {
            next.flatten_into(out, new_line, indent + 1);
        }
    }
}

/// Diagnostic message text: plain or a nested chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DiagnosticMessage {
    /// Plain text.
    Text(String),
    /// Nested message chain.
    Chain(MessageChain),
}

impl DiagnosticMessage {
    /// Flatten to a single string. Nested links start on a new line, indented two spaces per
    /// level.
    pub fn flatten(&self, new_line: &str) -> String {
        match self {
            DiagnosticMessage::Text(text) => text.clone(),
            DiagnosticMessage::Chain(chain) => {
                let mut out = String::new();
                chain.flatten_into(&mut out, new_line, 0);
                out
            }
        }
    }
}

impl From<&str> for DiagnosticMessage {
    fn from(text: &str) -> Self {
        DiagnosticMessage::Text(text.to_string())
    }
}

impl From<String> for DiagnosticMessage {
    fn from(text: String) -> Self {
        DiagnosticMessage::Text(text)
    }
}

impl From<MessageChain> for DiagnosticMessage {
    fn from(chain: MessageChain) -> Self {
        DiagnosticMessage::Chain(chain)
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Diagnostic {
    /// Category.
    pub category: DiagnosticCategory,
    /// Message text.
    #[serde(rename = "messageText")]
    pub message: DiagnosticMessage,
    /// Start offset (UTF-16 code units).
    #[serde(default)]
    pub start: Option<usize>,
    /// Length (UTF-16 code units).
    #[serde(default)]
    pub length: Option<usize>,
    /// Optional engine error code.
    #[serde(default)]
    pub code: Option<u32>,
}

impl Diagnostic {
    /// A diagnostic without a location.
    pub fn new(category: DiagnosticCategory, message: impl Into<DiagnosticMessage>) -> Self {
        Self {
            category,
            message: message.into(),
            start: None,
            length: None,
            code: None,
        }
    }

    /// Attach a location.
    pub fn at(mut self, start: usize, length: usize) -> Self {
        self.start = Some(start);
        self.length = Some(length);
        self
    }

    /// The highlighted range, if the diagnostic has a non-empty location.
    ///
    /// `start == 0` is a real location (the first character); only a missing start or an empty
    /// length disables highlighting.
    pub fn range(&self) -> Option<TextRange> {
        match (self.start, self.length) {
            (Some(start), Some(length)) if length > 0 => {
                Some(TextRange::from_start_length(start, length))
            }
            _ => None,
        }
    }

    /// Flattened message text, one line per chain level.
    pub fn message_text(&self) -> String {
        self.message.flatten("\n")
    }

    /// Parse a JSON array of diagnostics.
    pub fn list_from_json(text: &str) -> Result<Vec<Diagnostic>, serde_json::Error> {
        serde_json::from_str(text)
    }
}
