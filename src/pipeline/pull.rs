//! Pull strategy - walk the tree, write what changed.

use tracing::{trace, warn};

use crate::dom::Dom;
use crate::template::Strategy;
use crate::tree::ComponentTree;

/// Compare every pull binding in `tree` with its last rendered value.
///
/// Mismatches are written to their anchor and become the new snapshot.
/// Push bindings are left to their effects. Returns the number of writes.
pub fn check_tree(dom: &dyn Dom, tree: &mut ComponentTree) -> usize {
    let mut writes = 0;

    for bound in &mut tree.text {
        if bound.binding.strategy != Strategy::Pull {
            continue;
        }
        let Some(current) = bound.current_value() else {
            continue;
        };
        if current == bound.binding.last_rendered {
            continue;
        }
        trace!(
            member = bound.binding.member.as_str(),
            anchor = bound.anchor.index(),
            "pull write"
        );
        if let Err(err) = dom.set_text_content(bound.anchor, &current) {
            warn!(anchor = bound.anchor.index(), %err, "pull write failed");
            continue;
        }
        bound.binding.last_rendered = current;
        writes += 1;
    }

    for child in &mut tree.children {
        writes += check_tree(dom, child);
    }

    writes
}
