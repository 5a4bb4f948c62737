//! Error types.
//!
//! Every render failure is fatal for the mount that hit it. Nothing is retried;
//! errors travel back to the caller of [`mount`](crate::pipeline::mount).

use thiserror::Error;

use crate::types::NodeId;

// =============================================================================
// DomError
// =============================================================================

/// Failures reported by a [`Dom`](crate::dom::Dom) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("failed to parse markup: {0}")]
    Parse(String),

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
}

// =============================================================================
// RenderError
// =============================================================================

/// Failures while compiling templates or building the component tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A template names a member the component does not declare.
    #[error("{member} is not a property of <{component}>")]
    UnresolvedBinding { member: String, component: String },

    /// A binding id could not be found in the document after insertion.
    #[error("binding anchor `{anchor}` is missing from the rendered document")]
    MissingAnchor { anchor: String },

    /// A member is used in a way its declared kind does not allow.
    #[error("{member} on <{component}> cannot be used here: expected {expected}")]
    TypeMisuse {
        member: String,
        component: String,
        expected: &'static str,
    },

    #[error("selector <{0}> is not registered")]
    UnknownSelector(String),

    #[error("selector <{0}> is registered twice")]
    DuplicateSelector(String),

    #[error("component nesting exceeds {limit} levels at <{selector}>")]
    NestingTooDeep { selector: String, limit: usize },

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Result alias for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message() {
        let err = RenderError::UnresolvedBinding {
            member: "title".into(),
            component: "app".into(),
        };
        assert_eq!(err.to_string(), "title is not a property of <app>");
    }

    #[test]
    fn test_dom_error_is_transparent() {
        let err: RenderError = DomError::Parse("bad".into()).into();
        assert_eq!(err.to_string(), "failed to parse markup: bad");
    }
}
