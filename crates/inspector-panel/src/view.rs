//! Owned element tree the panel renders into.
//!
//! Hosts walk it (or serialize it with [`ViewTree::to_html`]) to display the panel, and report
//! user input back to the panel by [`NodeId`]. Ids carry the generation of the tree they were
//! created in, so ids handed out before [`ViewTree::reset`] never alias newer nodes.

use std::fmt::Write;

/// Identifier of a node in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (`div`, `li`, `a`, ...).
    pub tag: String,
    /// Class list, in insertion order and without duplicates.
    pub classes: Vec<String>,
    /// Attributes in insertion order (`id`, `type`, `data-pos`, ...).
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Value of the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A node of the tree: an element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    /// An element with children.
    Element(Element),
    /// Plain text.
    Text(String),
}

#[derive(Debug, Clone)]
struct Slot {
    node: ViewNode,
    parent: Option<NodeId>,
}

/// Arena of view nodes rooted at a single container element.
#[derive(Debug, Clone)]
pub struct ViewTree {
    slots: Vec<Slot>,
    generation: u32,
    root_tag: String,
}

/// Elements that never have children or a closing tag in HTML.
const VOID_TAGS: &[&str] = &["br", "input"];

impl ViewTree {
    /// Create a tree whose root is a `root_tag` element.
    pub fn new(root_tag: &str) -> Self {
        Self {
            slots: vec![Slot {
                node: ViewNode::Element(Element::new(root_tag)),
                parent: None,
            }],
            generation: 0,
            root_tag: root_tag.to_string(),
        }
    }

    /// The root container.
    pub fn root(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: self.generation,
        }
    }

    /// Drop every node except a fresh root. Previously issued ids become stale.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.slots.clear();
        self.slots.push(Slot {
            node: ViewNode::Element(Element::new(&self.root_tag)),
            parent: None,
        });
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the tree holds only its root.
    pub fn is_empty(&self) -> bool {
        self.slots.len() == 1
    }

    /// Whether `id` refers to a node of the current generation.
    pub fn contains(&self, id: NodeId) -> bool {
        id.generation == self.generation && id.index < self.slots.len()
    }

    fn push(&mut self, node: ViewNode) -> NodeId {
        let id = NodeId {
            index: self.slots.len(),
            generation: self.generation,
        };
        self.slots.push(Slot { node, parent: None });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(ViewNode::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(ViewNode::Text(text.into()))
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Appending a node under itself or under one of its descendants is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return;
        }
        if self.element(parent).is_none() || self.is_ancestor(child, parent) {
            return;
        }
        if let Some(old_parent) = self.slots[child.index].parent
            && let ViewNode::Element(element) = &mut self.slots[old_parent.index].node
        {
            element.children.retain(|c| *c != child);
        }
        self.slots[child.index].parent = Some(parent);
        if let ViewNode::Element(element) = &mut self.slots[parent.index].node {
            element.children.push(child);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    /// The node behind `id`.
    pub fn node(&self, id: NodeId) -> Option<&ViewNode> {
        if !self.contains(id) {
            return None;
        }
        Some(&self.slots[id.index].node)
    }

    /// The element behind `id`, if it is one.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.node(id)? {
            ViewNode::Element(element) => Some(element),
            ViewNode::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        if !self.contains(id) {
            return None;
        }
        match &mut self.slots[id.index].node {
            ViewNode::Element(element) => Some(element),
            ViewNode::Text(_) => None,
        }
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        self.slots[id.index].parent
    }

    /// Children of `id` (empty for text nodes and stale ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id)
            .map(|element| element.children.as_slice())
            .unwrap_or(&[])
    }

    /// Remove every child of `id`. Removed nodes stay in the arena, detached.
    pub fn remove_children(&mut self, id: NodeId) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut element.children);
        for child in children {
            self.slots[child.index].parent = None;
        }
    }

    /// Add `class` to an element (no-op if already present).
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.element_mut(id)
            && !element.has_class(class)
        {
            element.classes.push(class.to_string());
        }
    }

    /// Remove `class` from an element.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.classes.retain(|c| c != class);
        }
    }

    /// Toggle `class` and return whether it is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        if element.has_class(class) {
            element.classes.retain(|c| c != class);
            false
        } else {
            element.classes.push(class.to_string());
            true
        }
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|element| element.has_class(class))
    }

    /// Set (or overwrite) an attribute.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let value = value.into();
        match element.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => element.attributes.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.retain(|(key, _)| key != name);
        }
    }

    /// Value of an attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            Some(ViewNode::Text(text)) => out.push_str(text),
            Some(ViewNode::Element(element)) => {
                for child in &element.children {
                    self.collect_text(*child, out);
                }
            }
            None => {}
        }
    }

    /// Descendants of `id` (pre-order, `id` excluded) that carry `class`.
    pub fn find_by_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.has_class(next, class) {
                found.push(next);
            }
            stack.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Descendants of `id` (pre-order, `id` excluded) with the given tag.
    pub fn find_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.element(next).is_some_and(|element| element.tag == tag) {
                found.push(next);
            }
            stack.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Serialize the subtree rooted at `id` as HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            Some(ViewNode::Text(text)) => out.push_str(&escape_html(text)),
            Some(ViewNode::Element(element)) => {
                let _ = write!(out, "<{}", element.tag);
                if !element.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape_html(&element.classes.join(" ")));
                }
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &element.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
            None => {}
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
