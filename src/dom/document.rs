//! In-memory document.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Detached nodes stay in the
//! arena (ids are never reused) but are unreachable from `body`, so id and tag
//! lookups skip them the way a browser skips removed elements. Detaching a
//! subtree drops every click listener in it, along with whatever the
//! listeners captured.
//!
//! Rewriting the text of a node whose only child is text updates that child in
//! place, so repeated binding writes do not grow the arena.
//!
//! The document counts text writes, globally and per node, so callers can
//! observe exactly which anchors an update touched.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use super::parse::{parse_fragment, ParsedNode};
use super::{escape_text, Dom, Listener};
use crate::error::DomError;
use crate::types::NodeId;

// =============================================================================
// Node Storage
// =============================================================================

enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

struct NodeEntry {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

struct DocumentState {
    nodes: Vec<NodeEntry>,
    body: NodeId,
    text_writes: usize,
    writes_per_node: HashMap<NodeId, usize>,
}

impl DocumentState {
    fn entry(&self, id: NodeId) -> Result<&NodeEntry, DomError> {
        self.nodes.get(id.index()).ok_or(DomError::UnknownNode(id))
    }

    fn entry_mut(&mut self, id: NodeId) -> Result<&mut NodeEntry, DomError> {
        self.nodes.get_mut(id.index()).ok_or(DomError::UnknownNode(id))
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            kind,
            parent,
            children: Vec::new(),
            listeners: Vec::new(),
        });
        id
    }

    fn detach_children(&mut self, id: NodeId) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.entry_mut(id)?.children);
        for child in children {
            if let Some(entry) = self.nodes.get_mut(child.index()) {
                entry.parent = None;
            }
            self.release_listeners(child);
        }
        Ok(())
    }

    /// Drop the listeners of `root` and all its descendants.
    fn release_listeners(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(entry) = self.nodes.get_mut(id.index()) {
                entry.listeners.clear();
                stack.extend(entry.children.iter().copied());
            }
        }
    }

    /// The only child of `id`, when it is a text node.
    fn sole_text_child(&self, id: NodeId) -> Option<NodeId> {
        match self.nodes.get(id.index())?.children.as_slice() {
            [child] if matches!(self.nodes[child.index()].kind, NodeKind::Text(_)) => Some(*child),
            _ => None,
        }
    }

    fn insert_parsed(&mut self, parent: NodeId, parsed: Vec<ParsedNode>) {
        for node in parsed {
            let id = match node {
                ParsedNode::Element {
                    tag,
                    attributes,
                    children,
                } => {
                    let id = self.push(NodeKind::Element { tag, attributes }, Some(parent));
                    self.insert_parsed(id, children);
                    id
                }
                ParsedNode::Text(text) => self.push(NodeKind::Text(text), Some(parent)),
            };
            self.nodes[parent.index()].children.push(id);
        }
    }

    /// Descendants of `root` (excluding `root`) in document order.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(root.index()) {
            Some(entry) => entry.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.index()].children.iter().rev().copied());
        }
        out
    }

    fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.index())?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(id.index())?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let entry = &self.nodes[id.index()];
        match &entry.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &entry.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn serialize(&self, id: NodeId, out: &mut String) {
        let entry = &self.nodes[id.index()];
        match &entry.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_text(value));
                    out.push('"');
                }
                out.push('>');
                for child in &entry.children {
                    self.serialize(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// Arena-backed [`Dom`] implementation.
pub struct Document {
    state: RefCell<DocumentState>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `body` element.
    pub fn new() -> Self {
        let mut state = DocumentState {
            nodes: Vec::new(),
            body: NodeId(0),
            text_writes: 0,
            writes_per_node: HashMap::new(),
        };
        state.body = state.push(
            NodeKind::Element {
                tag: "body".to_string(),
                attributes: Vec::new(),
            },
            None,
        );
        Self {
            state: RefCell::new(state),
        }
    }

    /// Invoke every click listener on `node`.
    ///
    /// Returns how many listeners ran. Listeners are cloned out first, so they
    /// are free to mutate this document.
    pub fn click(&self, node: NodeId) -> Result<usize, DomError> {
        let listeners = self.state.borrow().entry(node)?.listeners.clone();
        trace!(node = node.index(), listeners = listeners.len(), "click");
        for listener in &listeners {
            listener();
        }
        Ok(listeners.len())
    }

    /// Tag name of an element (`None` for text nodes).
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.state.borrow().tag(node).map(str::to_string)
    }

    /// Attribute value of an element.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.state.borrow().attribute(node, name).map(str::to_string)
    }

    /// Direct children of `node`.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.state
            .borrow()
            .nodes
            .get(node.index())
            .map(|entry| entry.children.clone())
            .unwrap_or_default()
    }

    /// Whether `node` is a text node.
    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(
            self.state.borrow().nodes.get(node.index()).map(|e| &e.kind),
            Some(NodeKind::Text(_))
        )
    }

    /// Whether `node` has at least one click listener.
    pub fn has_click_listener(&self, node: NodeId) -> bool {
        self.state
            .borrow()
            .nodes
            .get(node.index())
            .is_some_and(|entry| !entry.listeners.is_empty())
    }

    /// Descendants of `root` carrying click listeners, in document order.
    pub fn clickable_elements(&self, root: NodeId) -> Vec<NodeId> {
        let state = self.state.borrow();
        state
            .descendants(root)
            .into_iter()
            .filter(|id| !state.nodes[id.index()].listeners.is_empty())
            .collect()
    }

    /// Serialized markup of `node` itself.
    pub fn outer_html(&self, node: NodeId) -> Option<String> {
        let state = self.state.borrow();
        state.entry(node).ok()?;
        let mut out = String::new();
        state.serialize(node, &mut out);
        Some(out)
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn node_count(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    /// Total number of `set_text_content` calls.
    pub fn text_writes(&self) -> usize {
        self.state.borrow().text_writes
    }

    /// Number of `set_text_content` calls on `node`.
    pub fn writes_to(&self, node: NodeId) -> usize {
        self.state
            .borrow()
            .writes_per_node
            .get(&node)
            .copied()
            .unwrap_or(0)
    }
}

impl Dom for Document {
    fn body(&self) -> NodeId {
        self.state.borrow().body
    }

    fn create_element(&self, tag: &str) -> NodeId {
        self.state.borrow_mut().push(
            NodeKind::Element {
                tag: tag.to_lowercase(),
                attributes: Vec::new(),
            },
            None,
        )
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        state.entry(parent)?;
        let previous = state.entry(child)?.parent;
        if let Some(previous) = previous {
            state.entry_mut(previous)?.children.retain(|c| *c != child);
        }
        state.entry_mut(child)?.parent = Some(parent);
        state.entry_mut(parent)?.children.push(child);
        Ok(())
    }

    fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        state.entry_mut(parent)?.children.retain(|c| *c != child);
        let entry = state.entry_mut(child)?;
        if entry.parent == Some(parent) {
            entry.parent = None;
        }
        state.release_listeners(child);
        Ok(())
    }

    fn set_inner_html(&self, node: NodeId, markup: &str) -> Result<(), DomError> {
        let parsed = parse_fragment(markup)?;
        let mut state = self.state.borrow_mut();
        state.detach_children(node)?;
        state.insert_parsed(node, parsed);
        Ok(())
    }

    fn inner_html(&self, node: NodeId) -> Option<String> {
        let state = self.state.borrow();
        let mut out = String::new();
        for child in &state.entry(node).ok()?.children {
            state.serialize(*child, &mut out);
        }
        Some(out)
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let state = self.state.borrow();
        let body = state.body;
        std::iter::once(body)
            .chain(state.descendants(body))
            .find(|node| state.attribute(*node, "id") == Some(id))
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let state = self.state.borrow();
        state
            .descendants(root)
            .into_iter()
            .filter(|node| state.tag(*node).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        state.entry(node)?;
        match state.sole_text_child(node) {
            Some(child) if !text.is_empty() => {
                state.nodes[child.index()].kind = NodeKind::Text(text.to_string());
            }
            _ => {
                state.detach_children(node)?;
                if !text.is_empty() {
                    let child = state.push(NodeKind::Text(text.to_string()), Some(node));
                    state.nodes[node.index()].children.push(child);
                }
            }
        }
        state.text_writes += 1;
        *state.writes_per_node.entry(node).or_insert(0) += 1;
        Ok(())
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        let state = self.state.borrow();
        state.entry(node).ok()?;
        let mut out = String::new();
        state.collect_text(node, &mut out);
        Some(out)
    }

    fn add_click_listener(&self, node: NodeId, listener: Listener) -> Result<(), DomError> {
        self.state.borrow_mut().entry_mut(node)?.listeners.push(listener);
        Ok(())
    }
}
