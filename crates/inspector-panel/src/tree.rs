//! Collapsible syntax tree rendering.
//!
//! Layout produced for each node (depth `d`):
//!
//! ```text
//! div.ast-tree-start[data-pos][data-end][data-depth=d]   (+ .open when d == 0)
//!   a.node-name                                          heading, toggles .open, hover → range
//!   ul.ast-tree
//!     li  "name: " span.ast-node-<type> "value" [" (SyntaxKind.X)"]     literal
//!     li  "name: " div.ast-tree-start ...                                single child
//!     div.ast-children
//!       li "name: [" br
//!       div.ast-tree-start ...                                           one per child
//!       li "]"
//! ```

use crate::highlight::{HighlightBridge, HighlightKind};
use crate::syntax::{BACK_REFERENCE_FIELDS, FieldValue, KIND_FIELD, Literal, SyntaxNode};
use crate::view::{NodeId, ViewTree};

/// Class of the element wrapping a whole rendered tree.
pub const AST_CLASS: &str = "ast";
/// Class of each node container.
pub const NODE_CLASS: &str = "ast-tree-start";
/// Class of each node heading.
pub const HEADING_CLASS: &str = "node-name";
/// Class of each node's field list.
pub const FIELDS_CLASS: &str = "ast-tree";
/// Class of a child-collection block.
pub const CHILDREN_CLASS: &str = "ast-children";
/// Class marking an expanded node container.
pub const OPEN_CLASS: &str = "open";

/// Result of rendering one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    /// The `div.ast` wrapper.
    pub container: NodeId,
    /// Every node heading, in pre-order. Clicking one toggles [`OPEN_CLASS`] on its parent.
    pub headings: Vec<NodeId>,
}

/// Renders [`SyntaxNode`] trees into a [`ViewTree`].
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    extra_excluded: Vec<String>,
}

struct RenderContext<'a> {
    view: &'a mut ViewTree,
    bridge: &'a mut HighlightBridge,
    headings: Vec<NodeId>,
}

impl TreeRenderer {
    /// A renderer skipping only the back-reference fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that also skips `fields`. The back-reference fields are always skipped.
    pub fn with_excluded_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra_excluded: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a field named `name` is left out of the rendering.
    pub fn is_excluded(&self, name: &str) -> bool {
        BACK_REFERENCE_FIELDS.contains(&name) || self.extra_excluded.iter().any(|f| f == name)
    }

    /// Render `root` into a new `div.ast` appended to `parent`.
    ///
    /// Every heading is registered with `bridge` for [`HighlightKind::Info`] hover over its node's
    /// range.
    pub fn render(
        &self,
        view: &mut ViewTree,
        bridge: &mut HighlightBridge,
        parent: NodeId,
        root: &SyntaxNode,
    ) -> RenderedTree {
        let container = view.create_element("div");
        view.add_class(container, AST_CLASS);

        let mut ctx = RenderContext {
            view,
            bridge,
            headings: Vec::new(),
        };
        self.render_node(&mut ctx, container, root, 0);
        ctx.view.append_child(parent, container);

        tracing::debug!(headings = ctx.headings.len(), "rendered syntax tree");
        RenderedTree {
            container,
            headings: ctx.headings,
        }
    }

    fn render_node(
        &self,
        ctx: &mut RenderContext<'_>,
        parent: NodeId,
        node: &SyntaxNode,
        depth: usize,
    ) -> NodeId {
        let item = ctx.view.append_element(parent, "div");
        ctx.view.add_class(item, NODE_CLASS);
        ctx.view.set_attribute(item, "data-pos", node.pos().to_string());
        ctx.view.set_attribute(item, "data-end", node.end().to_string());
        ctx.view.set_attribute(item, "data-depth", depth.to_string());
        if depth == 0 {
            ctx.view.add_class(item, OPEN_CLASS);
        }

        let heading = ctx.view.append_element(item, "a");
        ctx.view.add_class(heading, HEADING_CLASS);
        ctx.view.append_text(heading, node.kind().display_name());
        ctx.bridge.attach(heading, node.range(), HighlightKind::Info);
        ctx.headings.push(heading);

        let fields = ctx.view.append_element(item, "ul");
        ctx.view.add_class(fields, FIELDS_CLASS);

        for field in node.fields() {
            if self.is_excluded(&field.name) {
                continue;
            }
            match &field.value {
                FieldValue::BackReference | FieldValue::Function => {}
                FieldValue::Leaf(literal) => {
                    self.render_literal(ctx, fields, &field.name, literal, node);
                }
                FieldValue::Child(child) => {
                    let li = ctx.view.append_element(fields, "li");
                    ctx.view.append_text(li, format!("{}: ", field.name));
                    self.render_node(ctx, li, child, depth + 1);
                }
                FieldValue::Children(children) if children.is_empty() => {
                    // Same output as an empty list coming from JSON.
                    self.render_literal(ctx, fields, &field.name, &Literal::List(Vec::new()), node);
                }
                FieldValue::Children(children) => {
                    let block = ctx.view.append_element(fields, "div");
                    ctx.view.add_class(block, CHILDREN_CLASS);
                    let open = ctx.view.append_element(block, "li");
                    ctx.view.append_text(open, format!("{}: [", field.name));
                    ctx.view.append_element(open, "br");
                    for child in children {
                        self.render_node(ctx, block, child, depth + 1);
                    }
                    let close = ctx.view.append_element(block, "li");
                    ctx.view.append_text(close, "]");
                }
            }
        }

        item
    }

    fn render_literal(
        &self,
        ctx: &mut RenderContext<'_>,
        parent: NodeId,
        name: &str,
        literal: &Literal,
        owner: &SyntaxNode,
    ) {
        let li = ctx.view.append_element(parent, "li");
        ctx.view.append_text(li, format!("{name}: "));
        let span = ctx.view.append_element(li, "span");
        ctx.view
            .add_class(span, &format!("ast-node-{}", literal.type_label()));
        ctx.view.append_text(span, literal.to_string());
        if name == KIND_FIELD {
            ctx.view
                .append_text(li, format!(" ({})", owner.kind().qualified_name()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::TextRange;
    use crate::syntax_kind::SyntaxKind;

    fn sample() -> SyntaxNode {
        SyntaxNode::new(SyntaxKind::SourceFile, TextRange::new(0, 10)).with_children(
            "statements",
            vec![
                SyntaxNode::new(SyntaxKind::ExpressionStatement, TextRange::new(0, 5)),
                SyntaxNode::new(SyntaxKind::EmptyStatement, TextRange::new(5, 10)),
            ],
        )
    }

    #[test]
    fn test_only_root_starts_open() {
        let mut view = ViewTree::new("div");
        let mut bridge = HighlightBridge::new();
        let root = view.root();
        let rendered = TreeRenderer::new().render(&mut view, &mut bridge, root, &sample());

        let nodes = view.find_by_class(rendered.container, NODE_CLASS);
        assert_eq!(nodes.len(), 3);
        assert!(view.has_class(nodes[0], OPEN_CLASS));
        assert!(!view.has_class(nodes[1], OPEN_CLASS));
        assert!(!view.has_class(nodes[2], OPEN_CLASS));
        assert_eq!(view.attribute(nodes[2], "data-depth"), Some("1"));
        assert_eq!(view.attribute(nodes[2], "data-pos"), Some("5"));
    }

    #[test]
    fn test_headings_are_bound_to_their_ranges() {
        let mut view = ViewTree::new("div");
        let mut bridge = HighlightBridge::new();
        let root = view.root();
        let rendered = TreeRenderer::new().render(&mut view, &mut bridge, root, &sample());

        let ranges: Vec<_> = rendered
            .headings
            .iter()
            .map(|h| bridge.hover_request(*h).map(|r| (r.range, r.kind)))
            .collect();
        assert_eq!(
            ranges,
            vec![
                Some((TextRange::new(0, 10), HighlightKind::Info)),
                Some((TextRange::new(0, 5), HighlightKind::Info)),
                Some((TextRange::new(5, 10), HighlightKind::Info)),
            ]
        );
    }

    #[test]
    fn test_extra_excluded_fields_are_skipped() {
        let renderer = TreeRenderer::with_excluded_fields(["flags"]);
        assert!(renderer.is_excluded("flags"));
        assert!(renderer.is_excluded("parent"));
        assert!(renderer.is_excluded("flowNode"));
        assert!(!renderer.is_excluded("name"));

        let node = SyntaxNode::new(SyntaxKind::Identifier, TextRange::new(0, 1))
            .with_literal("flags", Literal::Number(8.0));
        let mut view = ViewTree::new("div");
        let mut bridge = HighlightBridge::new();
        let root = view.root();
        let rendered = renderer.render(&mut view, &mut bridge, root, &node);
        assert!(!view.text_content(rendered.container).contains("flags"));
    }

    #[test]
    fn test_empty_children_render_like_an_empty_list() {
        let mut view = ViewTree::new("div");
        let mut bridge = HighlightBridge::new();
        let root = view.root();
        let node = SyntaxNode::new(SyntaxKind::SourceFile, TextRange::new(0, 0))
            .with_children("statements", Vec::new());
        let rendered = TreeRenderer::new().render(&mut view, &mut bridge, root, &node);

        assert!(view.find_by_class(rendered.container, CHILDREN_CLASS).is_empty());
        assert!(view.text_content(rendered.container).contains("statements: "));
        assert!(!view.text_content(rendered.container).contains("statements: ["));
        assert!(view.to_html(rendered.container).contains(
            "<li>statements: <span class=\"ast-node-object\"></span></li>"
        ));
    }
}
