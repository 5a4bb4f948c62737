//! Component Registry - selector → definition.
//!
//! Built once at startup, immutable afterwards. Registration order matters:
//! the tree builder searches a parent's markup for registered selectors in
//! exactly this order.

use super::{Component, ComponentDef};
use crate::error::{RenderError, RenderResult};

// =============================================================================
// Registry
// =============================================================================

/// Ordered, immutable set of component definitions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    defs: Vec<ComponentDef>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Definition registered under `selector` (case-insensitive).
    pub fn get(&self, selector: &str) -> Option<&ComponentDef> {
        self.defs
            .iter()
            .find(|def| def.selector().eq_ignore_ascii_case(selector))
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions a parent with `imports` searches for, in registration order.
    ///
    /// Empty `imports` selects every definition. An import that is not
    /// registered is an error.
    pub fn candidates(&self, imports: &[&str]) -> RenderResult<Vec<&ComponentDef>> {
        if imports.is_empty() {
            return Ok(self.defs.iter().collect());
        }
        if let Some(missing) = imports.iter().find(|import| self.get(import).is_none()) {
            return Err(RenderError::UnknownSelector(missing.to_string()));
        }
        Ok(self
            .defs
            .iter()
            .filter(|def| {
                imports
                    .iter()
                    .any(|import| def.selector().eq_ignore_ascii_case(import))
            })
            .collect())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects definitions; [`build`](RegistryBuilder::build) rejects duplicates.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    defs: Vec<ComponentDef>,
}

impl RegistryBuilder {
    /// Register component type `C`.
    pub fn register<C: Component>(self) -> Self {
        self.register_def(ComponentDef::of::<C>())
    }

    /// Register an already-erased definition.
    pub fn register_def(mut self, def: ComponentDef) -> Self {
        self.defs.push(def);
        self
    }

    pub fn build(self) -> RenderResult<Registry> {
        for (i, def) in self.defs.iter().enumerate() {
            let duplicate = self.defs[..i]
                .iter()
                .any(|earlier| earlier.selector().eq_ignore_ascii_case(def.selector()));
            if duplicate {
                return Err(RenderError::DuplicateSelector(def.selector().to_string()));
            }
        }
        Ok(Registry { defs: self.defs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Members;

    macro_rules! empty_component {
        ($name:ident, $selector:literal) => {
            struct $name;
            impl Component for $name {
                const SELECTOR: &'static str = $selector;
                const TEMPLATE: &'static str = "";
                fn create() -> Self {
                    $name
                }
                fn members() -> Members<Self> {
                    Members::new()
                }
            }
        };
    }

    empty_component!(Alpha, "alpha");
    empty_component!(Beta, "beta");
    empty_component!(Gamma, "gamma");
    empty_component!(AlphaAgain, "ALPHA");

    #[test]
    fn test_registration_order() {
        let registry = Registry::builder()
            .register::<Gamma>()
            .register::<Alpha>()
            .register::<Beta>()
            .build()
            .unwrap();
        let order: Vec<&str> = registry.iter().map(|d| d.selector()).collect();
        assert_eq!(order, vec!["gamma", "alpha", "beta"]);
        assert!(registry.get("Beta").is_some());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_selector_rejected() {
        let err = Registry::builder()
            .register::<Alpha>()
            .register::<AlphaAgain>()
            .build()
            .unwrap_err();
        assert_eq!(err, RenderError::DuplicateSelector("ALPHA".into()));
    }

    #[test]
    fn test_candidates_keep_registration_order() {
        let registry = Registry::builder()
            .register::<Alpha>()
            .register::<Beta>()
            .register::<Gamma>()
            .build()
            .unwrap();

        let all: Vec<&str> = registry.candidates(&[]).unwrap().iter().map(|d| d.selector()).collect();
        assert_eq!(all, vec!["alpha", "beta", "gamma"]);

        let some: Vec<&str> = registry
            .candidates(&["gamma", "alpha"])
            .unwrap()
            .iter()
            .map(|d| d.selector())
            .collect();
        assert_eq!(some, vec!["alpha", "gamma"]);

        assert_eq!(
            registry.candidates(&["delta"]).unwrap_err(),
            RenderError::UnknownSelector("delta".into())
        );
    }
}
