//! Host document interface.
//!
//! The runtime never owns a real page. It talks to one through the [`Dom`]
//! trait, which covers exactly what binding needs: create and attach elements,
//! replace a node's content with markup, find elements by id or tag name, write
//! text, and attach click listeners.
//!
//! [`Document`] is the in-memory implementation used by the terminal host and
//! by tests.

mod document;
mod parse;

pub use document::Document;

use std::rc::Rc;

use crate::error::DomError;
use crate::types::NodeId;

// =============================================================================
// Listener
// =============================================================================

/// Click listener (Rc so one handler can be shared between closures).
pub type Listener = Rc<dyn Fn()>;

// =============================================================================
// Dom Trait
// =============================================================================

/// The host document as seen by the tree builder and the update strategies.
///
/// All methods take `&self`: listeners run while other code holds the same
/// document, so implementations keep their state behind interior mutability
/// and never hold a borrow across a listener call.
pub trait Dom {
    /// Root element that mounts attach to.
    fn body(&self) -> NodeId;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> NodeId;

    /// Attach `child` as the last child of `parent`.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError>;

    /// Detach `child` from `parent`.
    fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError>;

    /// Replace the content of `node` with parsed `markup`.
    ///
    /// On a parse error the node is left untouched.
    fn set_inner_html(&self, node: NodeId, markup: &str) -> Result<(), DomError>;

    /// Serialized content of `node`.
    fn inner_html(&self, node: NodeId) -> Option<String>;

    /// First attached element whose `id` attribute equals `id`.
    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Descendants of `root` with the given tag name, in document order.
    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId>;

    /// Replace the content of `node` with a single text node.
    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), DomError>;

    /// Concatenated text of `node` and its descendants.
    fn text_content(&self, node: NodeId) -> Option<String>;

    /// Register a click listener on `node`.
    fn add_click_listener(&self, node: NodeId, listener: Listener) -> Result<(), DomError>;
}

// =============================================================================
// Escaping
// =============================================================================

/// Escape text for insertion into markup.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
