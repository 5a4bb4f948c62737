//! Component tree nodes.

use std::fmt;
use std::rc::Rc;

use crate::component::{downcast_state, Component, ComponentRef, TextSource};
use crate::reactive::untracked;
use crate::template::{BindingKind, EventBinding, TextBinding};
use crate::types::{BindingId, NodeId};

// =============================================================================
// Bound Bindings
// =============================================================================

/// A text binding resolved to its anchor element.
pub struct BoundText {
    pub binding: TextBinding,
    pub anchor: NodeId,
    pub(crate) source: TextSource,
}

impl BoundText {
    /// Current string form of the bound member (untracked).
    pub fn current_value(&self) -> Option<String> {
        untracked(|| (self.source)())
    }
}

impl fmt::Debug for BoundText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundText")
            .field("binding", &self.binding)
            .field("anchor", &self.anchor)
            .finish()
    }
}

/// A click binding resolved to its anchor element.
#[derive(Debug, Clone)]
pub struct BoundEvent {
    pub binding: EventBinding,
    pub anchor: NodeId,
    /// False when the member was not a handler and no listener was attached.
    pub wired: bool,
}

// =============================================================================
// Component Tree
// =============================================================================

/// One rendered component and its rendered children.
pub struct ComponentTree {
    pub component: ComponentRef,
    /// Element the component was rendered into.
    pub host: NodeId,
    pub text: Vec<BoundText>,
    pub events: Vec<BoundEvent>,
    /// Children in registry order.
    pub children: Vec<ComponentTree>,
}

impl ComponentTree {
    pub fn selector(&self) -> &'static str {
        self.component.selector()
    }

    /// First node (pre-order) rendered for `selector`, including this one.
    pub fn find(&self, selector: &str) -> Option<&ComponentTree> {
        if self.selector().eq_ignore_ascii_case(selector) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(selector))
    }

    /// Anchor of the first text binding for `member` on this component.
    pub fn anchor(&self, member: &str) -> Option<NodeId> {
        self.text
            .iter()
            .find(|bound| bound.binding.member == member)
            .map(|bound| bound.anchor)
    }

    /// Anchor of the first click binding for `handler` on this component.
    pub fn handler_anchor(&self, handler: &str) -> Option<NodeId> {
        self.events
            .iter()
            .find(|bound| bound.binding.handler == handler)
            .map(|bound| bound.anchor)
    }

    /// Every binding id in this subtree, with its kind.
    pub fn binding_ids(&self) -> Vec<(BindingId, BindingKind)> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids(&self, out: &mut Vec<(BindingId, BindingKind)>) {
        out.extend(self.text.iter().map(|b| (b.binding.id, b.binding.kind())));
        out.extend(self.events.iter().map(|b| (b.binding.id, b.binding.kind())));
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    /// Number of components in this subtree.
    pub fn component_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ComponentTree::component_count)
            .sum::<usize>()
    }

    /// Concrete state of this node's component.
    pub fn state<C: Component>(&self) -> Option<Rc<C>> {
        downcast_state::<C>(&self.component)
    }
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentTree")
            .field("selector", &self.selector())
            .field("host", &self.host)
            .field("text", &self.text)
            .field("events", &self.events)
            .field("children", &self.children)
            .finish()
    }
}
