//! Mount API - bootstrap a root component into a document.
//!
//! # Example
//!
//! ```ignore
//! use spark_dom::{mount, Document, Dom, Registry, RenderOptions};
//!
//! let registry = Registry::builder()
//!     .register::<AppComponent>()
//!     .register::<ClockComponent>()
//!     .build()?;
//!
//! let doc = Rc::new(Document::new());
//! let app = mount::<AppComponent>(doc.clone(), &registry, RenderOptions::default())?;
//!
//! // Pull walk on demand (clicks trigger one automatically)
//! app.refresh();
//!
//! app.unmount();
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use tracing::debug;

use super::pull::check_tree;
use super::refresh::Refresh;
use crate::component::{Component, Registry};
use crate::config::RenderOptions;
use crate::dom::Dom;
use crate::error::{RenderError, RenderResult};
use crate::template::BindingIds;
use crate::tree::{ComponentTree, TreeBuilder};
use crate::types::NodeId;

// =============================================================================
// App
// =============================================================================

/// A mounted root component.
///
/// Owns the component tree, and through it the only strong references to the
/// component instances: listeners and push effects hold them weakly. Dropping
/// the `App` leaves the rendered markup in place but turns every binding into
/// a no-op; [`unmount`](App::unmount) also removes the host element and its
/// listeners. An instance kept alive elsewhere (a clone from
/// [`ComponentTree::state`]) keeps its push effects writing.
pub struct App {
    dom: Rc<dyn Dom>,
    host: NodeId,
    tree: Rc<RefCell<ComponentTree>>,
    refresh: Refresh,
    options: RenderOptions,
}

impl App {
    /// The root of the component tree.
    pub fn tree(&self) -> Ref<'_, ComponentTree> {
        self.tree.borrow()
    }

    pub fn tree_mut(&self) -> RefMut<'_, ComponentTree> {
        self.tree.borrow_mut()
    }

    /// Element the root component was rendered into.
    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn dom(&self) -> &Rc<dyn Dom> {
        &self.dom
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Run a pull walk over the whole tree. Returns the number of writes.
    pub fn refresh(&self) -> usize {
        check_tree(self.dom.as_ref(), &mut self.tree.borrow_mut())
    }

    /// A handle that requests pull walks without borrowing the `App`.
    pub fn refresher(&self) -> Refresh {
        self.refresh.clone()
    }

    /// Remove the host element from the document and drop the tree.
    pub fn unmount(self) {
        let body = self.dom.body();
        if let Err(err) = self.dom.remove_child(body, self.host) {
            debug!(%err, "host already detached");
        }
        debug!(host = self.host.index(), "unmounted");
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("host", &self.host)
            .field("tree", &self.tree)
            .field("options", &self.options)
            .finish()
    }
}

// =============================================================================
// Mount Functions
// =============================================================================

/// Mount component `C` as a root.
///
/// `C` must be registered in `registry`.
pub fn mount<C: Component>(
    dom: Rc<dyn Dom>,
    registry: &Registry,
    options: RenderOptions,
) -> RenderResult<App> {
    mount_selector(dom, registry, C::SELECTOR, options)
}

/// Mount the registered component named `selector` as a root.
pub fn mount_selector(
    dom: Rc<dyn Dom>,
    registry: &Registry,
    selector: &str,
    options: RenderOptions,
) -> RenderResult<App> {
    let mut ids = BindingIds::new();
    mount_in(dom, registry, selector, options, &mut ids)
}

/// Mount with a caller-owned id allocator.
///
/// Roots mounted into the same document through one allocator never share a
/// binding id.
pub fn mount_in(
    dom: Rc<dyn Dom>,
    registry: &Registry,
    selector: &str,
    options: RenderOptions,
    ids: &mut BindingIds,
) -> RenderResult<App> {
    let def = registry
        .get(selector)
        .ok_or_else(|| RenderError::UnknownSelector(selector.to_string()))?
        .clone();

    let body = dom.body();
    let host = dom.create_element(def.selector());
    dom.append_child(body, host)?;

    let refresh = Refresh::new(Rc::downgrade(&dom));
    let built = {
        let mut builder = TreeBuilder::new(&dom, registry, ids, &options);
        if options.pull_enabled() {
            builder = builder.with_refresh(refresh.clone());
        }
        builder.render(host, &def)
    };

    let tree = match built {
        Ok(tree) => tree,
        Err(err) => {
            // Leave the document as it was before the mount.
            dom.remove_child(body, host)?;
            return Err(err);
        }
    };

    debug!(
        selector = def.selector(),
        host = host.index(),
        components = tree.component_count(),
        bindings = tree.binding_ids().len(),
        "mounted"
    );

    let tree = Rc::new(RefCell::new(tree));
    refresh.attach(&tree);

    Ok(App {
        dom,
        host,
        tree,
        refresh,
        options,
    })
}
