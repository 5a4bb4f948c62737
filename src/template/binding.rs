//! Binding descriptors produced by the compiler.

use crate::types::BindingId;

/// What a binding anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `{{name}}` or `{{name()}}`
    TextInterpolation,
    /// `(click)="name()"`
    ClickHandler,
}

/// How a text binding is kept current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// An effect rewrites the anchor whenever the signal changes.
    Push,
    /// The tree walk compares against `last_rendered`.
    Pull,
}

/// One text interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBinding {
    pub id: BindingId,
    pub member: String,
    pub strategy: Strategy,
    /// Value last written into the anchor.
    pub last_rendered: String,
}

impl TextBinding {
    pub fn kind(&self) -> BindingKind {
        BindingKind::TextInterpolation
    }
}

/// One click-handler attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    pub id: BindingId,
    pub handler: String,
}

impl EventBinding {
    pub fn kind(&self) -> BindingKind {
        BindingKind::ClickHandler
    }
}

/// Compiler output: rewritten markup plus descriptors in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    pub markup: String,
    pub text: Vec<TextBinding>,
    pub events: Vec<EventBinding>,
}
