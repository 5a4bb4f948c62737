//! Core types for spark-dom.
//!
//! Identifiers shared by the document, the compiler and the tree builder,
//! plus the text attributes the terminal host draws with.

use std::fmt;

// =============================================================================
// Node Id
// =============================================================================

/// Handle to a node inside a [`Dom`](crate::dom::Dom).
///
/// Ids are arena indices: stable for the lifetime of the document and never
/// reused, even after the node is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Arena index of this node.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Binding Id
// =============================================================================

/// Identifier of one binding anchor.
///
/// Allocated by [`BindingIds`](crate::template::BindingIds); unique across every
/// component rendered with the same allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u64);

impl BindingId {
    /// The element id attribute value for this binding, e.g. `ng-7`.
    pub fn anchor(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.0)
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes used when drawing a document to a terminal.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::INVERSE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_anchor() {
        assert_eq!(BindingId(7).anchor("ng-"), "ng-7");
        assert_eq!(BindingId(12).anchor("x"), "x12");
    }

    #[test]
    fn test_attr_combination() {
        let attr = Attr::BOLD | Attr::INVERSE;
        assert!(attr.contains(Attr::BOLD));
        assert!(!attr.contains(Attr::DIM));
        assert_eq!(Attr::default(), Attr::NONE);
    }
}
