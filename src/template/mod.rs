//! Template binding compiler.
//!
//! Turns a component's raw markup into markup with addressable anchors and a
//! table of binding descriptors the tree builder wires up.

mod binding;
mod compiler;
mod ids;

pub use binding::{BindingKind, CompiledTemplate, EventBinding, Strategy, TextBinding};
pub use compiler::{compile, compile_markup};
pub use ids::BindingIds;
