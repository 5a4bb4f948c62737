//! # spark-dom
//!
//! Minimal reactive component runtime over a document tree.
//!
//! Components declare a selector, an HTML template and a typed member table.
//! Templates bind members with `{{name}}`, `{{name()}}` and
//! `(click)="name()"`. Rendering compiles each template into markup with id'd
//! anchors, inserts it, discovers child components by selector and wires the
//! anchors back to the members.
//!
//! ## Update Strategies
//!
//! ```text
//! Signal::set → effect → set_text_content(anchor)          (push, {{name()}})
//! click → handler → Refresh → check_tree → changed anchors  (pull, {{name}})
//! ```
//!
//! ## Modules
//!
//! - [`reactive`] - Signals, computed values and effects
//! - [`component`] - Component trait, member tables and the registry
//! - [`template`] - Binding compiler and id allocator
//! - [`tree`] - Component tree builder
//! - [`pipeline`] - Push/pull propagation and mounting
//! - [`dom`] - Document interface and the in-memory document
//! - [`host`] - Terminal host for running an app interactively
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_dom::{mount, signal, Component, Document, Members, Registry, RenderOptions, Signal};
//!
//! struct Counter {
//!     count: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn bump(&self) {
//!         self.count.update(|n| *n += 1);
//!     }
//! }
//!
//! impl Component for Counter {
//!     const SELECTOR: &'static str = "counter";
//!     const TEMPLATE: &'static str = r#"<p>{{count()}}</p><button (click)="bump()">+</button>"#;
//!
//!     fn create() -> Self {
//!         Self { count: signal(0) }
//!     }
//!
//!     fn members() -> Members<Self> {
//!         Members::new()
//!             .reactive("count", |c: &Self| c.count.get().to_string())
//!             .handler("bump", Self::bump)
//!     }
//! }
//!
//! let registry = Registry::builder().register::<Counter>().build()?;
//! let doc = Rc::new(Document::new());
//! let app = mount::<Counter>(doc.clone(), &registry, RenderOptions::default())?;
//! ```

pub mod component;
pub mod config;
pub mod dom;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod reactive;
pub mod template;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use component::{
    AnyComponent, Component, ComponentDef, ComponentRef, Field, Member, MemberKind, Members,
    Registry, RegistryBuilder,
};

pub use config::{RenderOptions, UpdateMode, DEFAULT_ANCHOR_PREFIX, DEFAULT_MAX_DEPTH};

pub use dom::{escape_text, Document, Dom, Listener};

pub use error::{DomError, RenderError, RenderResult};

pub use pipeline::{check_tree, mount, mount_in, mount_selector, App, Refresh};

pub use reactive::{computed, effect, signal, untracked, Computed, Signal};

pub use template::{compile, BindingIds, BindingKind, CompiledTemplate, Strategy};

pub use tree::{ComponentTree, TreeBuilder};
