//! Component tree construction.
//!
//! The tree mirrors the nesting of selectors discovered in rendered markup.
//! Each node owns its component instance and the bindings resolved against the
//! live document.

mod builder;
mod node;

pub use builder::TreeBuilder;
pub use node::{BoundEvent, BoundText, ComponentTree};
