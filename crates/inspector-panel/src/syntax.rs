//! Tagged model of the syntax nodes handed over by the analysis engine.
//!
//! Every field value states what it is ([`FieldValue`]), so the renderer never guesses from the
//! shape of the data. Untyped engine payloads are classified once, in
//! [`SyntaxNode::from_json`].

use crate::error::NodeError;
use crate::range::TextRange;
use crate::syntax_kind::SyntaxKind;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Field names that point back to an ancestor or a control-flow predecessor.
///
/// These are never traversed or rendered.
pub const BACK_REFERENCE_FIELDS: &[&str] = &["parent", "flowNode"];

/// Name of the field holding the node's kind tag.
pub const KIND_FIELD: &str = "kind";

const POS_FIELD: &str = "pos";
const END_FIELD: &str = "end";

/// The kind tag of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Numeric tag from the engine's kind enumeration.
    Tag(u16),
    /// Engine-provided kind name (engines that tag nodes with strings).
    Named(String),
}

impl NodeKind {
    /// The typed kind, when the tag is known to this build.
    pub fn known(&self) -> Option<SyntaxKind> {
        match self {
            NodeKind::Tag(raw) => SyntaxKind::from_raw(*raw),
            NodeKind::Named(_) => None,
        }
    }

    /// Human-readable label. Unrecognized numeric tags render as the raw number.
    pub fn display_name(&self) -> Cow<'_, str> {
        match self {
            NodeKind::Tag(raw) => match SyntaxKind::from_raw(*raw) {
                Some(kind) => Cow::Borrowed(kind.name()),
                None => Cow::Owned(raw.to_string()),
            },
            NodeKind::Named(name) => Cow::Borrowed(name),
        }
    }

    /// Label used next to the raw kind field (`SyntaxKind.Identifier`).
    pub fn qualified_name(&self) -> String {
        match self.known() {
            Some(kind) => format!("SyntaxKind.{}", kind.name()),
            None => self.display_name().into_owned(),
        }
    }

    fn as_literal(&self) -> Literal {
        match self {
            NodeKind::Tag(raw) => Literal::Number(f64::from(*raw)),
            NodeKind::Named(name) => Literal::Str(name.clone()),
        }
    }
}

impl From<SyntaxKind> for NodeKind {
    fn from(kind: SyntaxKind) -> Self {
        NodeKind::Tag(kind.raw())
    }
}

impl From<u16> for NodeKind {
    fn from(raw: u16) -> Self {
        NodeKind::Tag(raw)
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        NodeKind::Named(name.to_string())
    }
}

/// A plain value stored in a node field.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Text.
    Str(String),
    /// Number.
    Number(f64),
    /// Boolean.
    Bool(bool),
    /// Explicit null.
    Null,
    /// Absent value.
    Undefined,
    /// A list whose items are not nodes.
    List(Vec<Literal>),
    /// A record that is not a node.
    Record,
}

impl Literal {
    /// Build a literal from untyped JSON.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Literal::Str(s.clone()),
            Value::Number(n) => Literal::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::Bool(b) => Literal::Bool(*b),
            Value::Null => Literal::Null,
            Value::Array(items) => Literal::List(items.iter().map(Literal::from_json).collect()),
            Value::Object(_) => Literal::Record,
        }
    }

    /// Type label used to style the value (`string`, `number`, `boolean`, `object`, `undefined`).
    pub fn type_label(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Number(_) => "number",
            Literal::Bool(_) => "boolean",
            Literal::Null | Literal::List(_) | Literal::Record => "object",
            Literal::Undefined => "undefined",
        }
    }

    fn write_list_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null | Literal::Undefined => Ok(()),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => f.write_str(s),
            Literal::Number(n) => write_number(*n, f),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
            Literal::Undefined => f.write_str("undefined"),
            Literal::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    item.write_list_item(f)?;
                }
                Ok(())
            }
            Literal::Record => f.write_str("[object Object]"),
        }
    }
}

fn write_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form with an explicit sign: 1e+21, 1.5e-7.
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            }
            _ => f.write_str(&text),
        }
    } else {
        write!(f, "{n}")
    }
}

/// The value of one node field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A plain value.
    Leaf(Literal),
    /// A nested node.
    Child(Box<SyntaxNode>),
    /// An ordered collection of nodes.
    Children(Vec<SyntaxNode>),
    /// A reference to an ancestor or predecessor node. Never traversed.
    BackReference,
    /// A method exposed by the engine's node object. Never rendered.
    Function,
}

/// A named field of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: FieldValue,
}

/// One node of a parsed program, with its range and its fields in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: NodeKind,
    pos: i64,
    end: i64,
    fields: Vec<Field>,
}

impl SyntaxNode {
    /// Create a node covering `range`.
    ///
    /// The record starts with the `pos`, `end` and `kind` fields, like engine nodes do.
    pub fn new(kind: impl Into<NodeKind>, range: TextRange) -> Self {
        let kind = kind.into();
        let pos = range.start as i64;
        let end = range.end as i64;
        let fields = vec![
            Field {
                name: POS_FIELD.to_string(),
                value: FieldValue::Leaf(Literal::Number(pos as f64)),
            },
            Field {
                name: END_FIELD.to_string(),
                value: FieldValue::Leaf(Literal::Number(end as f64)),
            },
            Field {
                name: KIND_FIELD.to_string(),
                value: FieldValue::Leaf(kind.as_literal()),
            },
        ];
        Self {
            kind,
            pos,
            end,
            fields,
        }
    }

    /// Set a field, replacing an existing field of the same name in place.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    /// Builder form of [`SyntaxNode::set_field`].
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.set_field(name, value);
        self
    }

    /// Add a literal field.
    pub fn with_literal(self, name: impl Into<String>, literal: Literal) -> Self {
        self.with_field(name, FieldValue::Leaf(literal))
    }

    /// Add a single-child field.
    pub fn with_child(self, name: impl Into<String>, child: SyntaxNode) -> Self {
        self.with_field(name, FieldValue::Child(Box::new(child)))
    }

    /// Add a child-collection field.
    pub fn with_children(self, name: impl Into<String>, children: Vec<SyntaxNode>) -> Self {
        self.with_field(name, FieldValue::Children(children))
    }

    /// The node's kind tag.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Raw start offset as reported by the engine (negative for synthesized nodes).
    pub fn pos(&self) -> i64 {
        self.pos
    }

    /// Raw end offset as reported by the engine (negative for synthesized nodes).
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The document range, or `None` for synthesized nodes without a source position.
    pub fn range(&self) -> Option<TextRange> {
        let start = usize::try_from(self.pos).ok()?;
        let end = usize::try_from(self.end).ok()?;
        (start <= end).then(|| TextRange::new(start, end))
    }

    /// Fields in record order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Convert an engine payload into a node.
    ///
    /// Field values are classified in record order:
    /// - names in [`BACK_REFERENCE_FIELDS`] become [`FieldValue::BackReference`] and are not read;
    /// - a non-empty array whose first item carries `pos` and `end` becomes
    ///   [`FieldValue::Children`];
    /// - a record carrying `pos` and `end` becomes [`FieldValue::Child`];
    /// - anything else becomes a [`FieldValue::Leaf`].
    ///
    /// Nodes without a numeric `pos`/`end`, with `pos > end`, or without a kind are rejected.
    pub fn from_json(value: &Value) -> Result<Self, NodeError> {
        node_from_json(value, "root")
    }
}

fn is_node_shaped(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key(POS_FIELD) && map.contains_key(END_FIELD))
}

fn node_from_json(value: &Value, path: &str) -> Result<SyntaxNode, NodeError> {
    let Value::Object(map) = value else {
        return Err(NodeError::NotAnObject {
            path: path.to_string(),
        });
    };

    let (pos, end) = match (
        map.get(POS_FIELD).and_then(Value::as_i64),
        map.get(END_FIELD).and_then(Value::as_i64),
    ) {
        (Some(pos), Some(end)) => (pos, end),
        _ => {
            return Err(NodeError::MissingRange {
                path: path.to_string(),
            });
        }
    };
    if pos >= 0 && end >= 0 && pos > end {
        return Err(NodeError::ReversedRange {
            path: path.to_string(),
            start: pos as usize,
            end: end as usize,
        });
    }

    let kind = kind_from_json(map).ok_or_else(|| NodeError::MissingKind {
        path: path.to_string(),
    })?;

    let mut fields = Vec::with_capacity(map.len());
    for (name, value) in map {
        fields.push(Field {
            name: name.clone(),
            value: classify_field(name, value, path)?,
        });
    }

    Ok(SyntaxNode {
        kind,
        pos,
        end,
        fields,
    })
}

fn kind_from_json(map: &Map<String, Value>) -> Option<NodeKind> {
    match map.get(KIND_FIELD)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|raw| u16::try_from(raw).ok())
            .map(NodeKind::Tag),
        Value::String(name) => Some(NodeKind::Named(name.clone())),
        _ => None,
    }
}

fn classify_field(name: &str, value: &Value, path: &str) -> Result<FieldValue, NodeError> {
    if BACK_REFERENCE_FIELDS.contains(&name) {
        return Ok(FieldValue::BackReference);
    }

    match value {
        Value::Array(items) if items.first().is_some_and(is_node_shaped) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(i, item)| node_from_json(item, &format!("{path}.{name}[{i}]")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FieldValue::Children(children))
        }
        value if is_node_shaped(value) => {
            let child = node_from_json(value, &format!("{path}.{name}"))?;
            Ok(FieldValue::Child(Box::new(child)))
        }
        value => Ok(FieldValue::Leaf(Literal::from_json(value))),
    }
}
