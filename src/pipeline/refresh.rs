//! Refresh handle - the pull trigger wired into click listeners.

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use super::pull::check_tree;
use crate::dom::Dom;
use crate::tree::ComponentTree;

/// Cloneable request for a pull walk over one mounted tree.
///
/// Created before the tree exists (listeners capture it while the tree is
/// being built) and attached once the build succeeds. Holds only weak
/// references, so a listener never keeps an unmounted tree alive.
#[derive(Clone)]
pub struct Refresh {
    dom: Weak<dyn Dom>,
    tree: Rc<OnceCell<Weak<RefCell<ComponentTree>>>>,
}

impl Refresh {
    pub fn new(dom: Weak<dyn Dom>) -> Self {
        Self {
            dom,
            tree: Rc::new(OnceCell::new()),
        }
    }

    /// Point this handle at the built tree. Later calls are ignored.
    pub fn attach(&self, tree: &Rc<RefCell<ComponentTree>>) {
        let _ = self.tree.set(Rc::downgrade(tree));
    }

    /// Run a pull walk now. Returns the number of anchors written.
    ///
    /// A request made while the tree is already borrowed (a walk in progress,
    /// or a caller holding `tree_mut`) is dropped.
    pub fn request(&self) -> usize {
        let Some(tree) = self.tree.get().and_then(Weak::upgrade) else {
            return 0;
        };
        let Some(dom) = self.dom.upgrade() else {
            return 0;
        };
        let Ok(mut tree) = tree.try_borrow_mut() else {
            trace!("refresh skipped: tree busy");
            return 0;
        };
        let writes = check_tree(dom.as_ref(), &mut tree);
        trace!(writes, "refresh");
        writes
    }
}

impl std::fmt::Debug for Refresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refresh")
            .field("attached", &self.tree.get().is_some())
            .finish()
    }
}
