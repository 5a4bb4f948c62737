//! Tree Builder - instantiate, render, recurse, wire.
//!
//! Rendering one component:
//!
//! 1. Instantiate it from its definition
//! 2. Compile its template
//! 3. Replace the host's content with the compiled markup
//! 4. For each registered selector (registry order), render the first
//!    unclaimed matching element inside the host as a child
//! 5. Resolve anchors: install push effects, attach click listeners
//!
//! Any error aborts the whole render and propagates to the caller.

use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, trace};

use super::node::{BoundEvent, BoundText, ComponentTree};
use crate::component::{AnyComponent, ComponentDef, Registry};
use crate::config::RenderOptions;
use crate::dom::{Dom, Listener};
use crate::error::{RenderError, RenderResult};
use crate::pipeline::{bind_text, Refresh};
use crate::template::{compile, BindingIds, EventBinding, Strategy, TextBinding};
use crate::types::NodeId;

// =============================================================================
// Tree Builder
// =============================================================================

/// Builds a [`ComponentTree`] into a document for one render pass.
pub struct TreeBuilder<'a> {
    dom: &'a Rc<dyn Dom>,
    registry: &'a Registry,
    ids: &'a mut BindingIds,
    options: &'a RenderOptions,
    refresh: Option<Refresh>,
    /// Hosts already rendered in this pass.
    claimed: HashSet<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        dom: &'a Rc<dyn Dom>,
        registry: &'a Registry,
        ids: &'a mut BindingIds,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            dom,
            registry,
            ids,
            options,
            refresh: None,
            claimed: HashSet::new(),
        }
    }

    /// Request a pull walk after every click listener returns.
    pub fn with_refresh(mut self, refresh: Refresh) -> Self {
        self.refresh = Some(refresh);
        self
    }

    /// Render `def` into `host`, recursively.
    pub fn render(&mut self, host: NodeId, def: &ComponentDef) -> RenderResult<ComponentTree> {
        self.render_at(host, def, 0)
    }

    fn render_at(
        &mut self,
        host: NodeId,
        def: &ComponentDef,
        depth: usize,
    ) -> RenderResult<ComponentTree> {
        if depth >= self.options.max_depth {
            return Err(RenderError::NestingTooDeep {
                selector: def.selector().to_string(),
                limit: self.options.max_depth,
            });
        }
        self.claimed.insert(host);

        let component = def.instantiate();
        let compiled = compile(component.as_ref(), self.ids, self.options)?;
        self.dom.set_inner_html(host, &compiled.markup)?;

        let children = self.render_children(host, component.as_ref(), depth)?;
        let text = self.bind_text(component.as_ref(), compiled.text)?;
        let events = self.bind_events(component.as_ref(), compiled.events)?;

        debug!(
            selector = def.selector(),
            host = host.index(),
            depth,
            text = text.len(),
            events = events.len(),
            children = children.len(),
            "rendered component"
        );

        Ok(ComponentTree {
            component,
            host,
            text,
            events,
            children,
        })
    }

    fn render_children(
        &mut self,
        host: NodeId,
        component: &dyn AnyComponent,
        depth: usize,
    ) -> RenderResult<Vec<ComponentTree>> {
        let registry = self.registry;
        let mut children = Vec::new();

        for def in registry.candidates(component.imports())? {
            let found = self
                .dom
                .get_elements_by_tag_name(host, def.selector())
                .into_iter()
                .find(|node| !self.claimed.contains(node));
            // Only the first match; further same-selector siblings stay inert.
            if let Some(child_host) = found {
                children.push(self.render_at(child_host, def, depth + 1)?);
            }
        }

        Ok(children)
    }

    fn bind_text(
        &self,
        component: &dyn AnyComponent,
        bindings: Vec<TextBinding>,
    ) -> RenderResult<Vec<BoundText>> {
        bindings
            .into_iter()
            .map(|binding| {
                let anchor = self.find_anchor(&binding.id.anchor(&self.options.anchor_prefix))?;
                let source = component.text_source(&binding.member).ok_or_else(|| {
                    RenderError::UnresolvedBinding {
                        member: binding.member.clone(),
                        component: component.selector().to_string(),
                    }
                })?;
                if binding.strategy == Strategy::Push {
                    bind_text(Rc::downgrade(self.dom), anchor, source.clone());
                }
                Ok(BoundText {
                    binding,
                    anchor,
                    source,
                })
            })
            .collect()
    }

    fn bind_events(
        &self,
        component: &dyn AnyComponent,
        bindings: Vec<EventBinding>,
    ) -> RenderResult<Vec<BoundEvent>> {
        let mut bound = Vec::with_capacity(bindings.len());

        for binding in bindings {
            let anchor = self.find_anchor(&binding.id.anchor(&self.options.anchor_prefix))?;

            let wired = match component.handler(&binding.handler) {
                Some(handler) => {
                    let listener: Listener = match &self.refresh {
                        Some(refresh) => {
                            let refresh = refresh.clone();
                            Rc::new(move || {
                                handler();
                                refresh.request();
                            })
                        }
                        None => handler,
                    };
                    self.dom.add_click_listener(anchor, listener)?;
                    true
                }
                None => {
                    trace!(
                        member = binding.handler.as_str(),
                        component = component.selector(),
                        "member is not callable; no listener attached"
                    );
                    false
                }
            };

            bound.push(BoundEvent {
                binding,
                anchor,
                wired,
            });
        }

        Ok(bound)
    }

    fn find_anchor(&self, anchor: &str) -> RenderResult<NodeId> {
        self.dom
            .get_element_by_id(anchor)
            .ok_or_else(|| RenderError::MissingAnchor {
                anchor: anchor.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::component::{Component, Field, Members};
    use crate::dom::Document;

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    struct Shell {
        title: Field<String>,
    }

    impl Component for Shell {
        const SELECTOR: &'static str = "shell";
        // Document order: b-part before a-part
        const TEMPLATE: &'static str =
            "<h1>{{title}}</h1><b-part></b-part><a-part></a-part><a-part></a-part>";

        fn create() -> Self {
            Self {
                title: Field::new("Shell".into()),
            }
        }

        fn members() -> Members<Self> {
            Members::new().field("title", |s: &Self| s.title.get())
        }
    }

    struct APart {
        label: Field<String>,
    }

    impl Component for APart {
        const SELECTOR: &'static str = "a-part";
        const TEMPLATE: &'static str = r#"<span>{{label}}</span><i (click)="label()">x</i>"#;

        fn create() -> Self {
            Self {
                label: Field::new("A".into()),
            }
        }

        fn members() -> Members<Self> {
            Members::new().field("label", |a: &Self| a.label.get())
        }
    }

    struct BPart {
        label: Field<String>,
    }

    impl Component for BPart {
        const SELECTOR: &'static str = "b-part";
        const TEMPLATE: &'static str = "<em>{{label}}</em>";

        fn create() -> Self {
            Self {
                label: Field::new("B".into()),
            }
        }

        fn members() -> Members<Self> {
            Members::new().field("label", |b: &Self| b.label.get())
        }
    }

    struct Broken;

    impl Component for Broken {
        const SELECTOR: &'static str = "broken";
        // The child replaces the content holding this component's own anchor.
        const TEMPLATE: &'static str = "<b-part>{{name}}</b-part>";
        const IMPORTS: &'static [&'static str] = &["b-part"];

        fn create() -> Self {
            Broken
        }

        fn members() -> Members<Self> {
            Members::new().field("name", |_: &Self| "n".into())
        }
    }

    struct Mirror;

    impl Component for Mirror {
        const SELECTOR: &'static str = "mirror";
        const TEMPLATE: &'static str = "<div><mirror></mirror></div>";

        fn create() -> Self {
            Mirror
        }

        fn members() -> Members<Self> {
            Members::new()
        }
    }

    struct Picky;

    impl Component for Picky {
        const SELECTOR: &'static str = "picky";
        const TEMPLATE: &'static str = "<a-part></a-part><b-part></b-part>";
        const IMPORTS: &'static [&'static str] = &["b-part"];

        fn create() -> Self {
            Picky
        }

        fn members() -> Members<Self> {
            Members::new()
        }
    }

    fn registry() -> Registry {
        Registry::builder()
            .register::<Shell>()
            .register::<APart>()
            .register::<BPart>()
            .register::<Broken>()
            .register::<Mirror>()
            .register::<Picky>()
            .build()
            .unwrap()
    }

    fn render(doc: &Rc<Document>, selector: &str, options: &RenderOptions) -> RenderResult<ComponentTree> {
        let dom: Rc<dyn Dom> = doc.clone();
        let registry = registry();
        let mut ids = BindingIds::new();
        let def = registry.get(selector).unwrap().clone();
        let body = dom.body();
        TreeBuilder::new(&dom, &registry, &mut ids, options).render(body, &def)
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_registry_order_wins_over_document_order() {
        let doc = Rc::new(Document::new());
        let tree = render(&doc, "shell", &RenderOptions::default()).unwrap();

        let order: Vec<&str> = tree.children.iter().map(|c| c.selector()).collect();
        assert_eq!(order, vec!["a-part", "b-part"]);
    }

    #[test]
    fn test_only_first_match_is_rendered() {
        let doc = Rc::new(Document::new());
        let tree = render(&doc, "shell", &RenderOptions::default()).unwrap();

        let parts = doc.get_elements_by_tag_name(doc.body(), "a-part");
        assert_eq!(parts.len(), 2);
        assert_eq!(tree.children[0].host, parts[0]);
        assert_eq!(doc.text_content(parts[0]).unwrap(), "Ax");
        assert_eq!(doc.text_content(parts[1]).unwrap(), "");
    }

    #[test]
    fn test_initial_paint_matches_members() {
        let doc = Rc::new(Document::new());
        let tree = render(&doc, "shell", &RenderOptions::default()).unwrap();

        let title = tree.anchor("title").unwrap();
        assert_eq!(doc.text_content(title).unwrap(), "Shell");
        let b = tree.find("b-part").unwrap();
        assert_eq!(doc.text_content(b.anchor("label").unwrap()).unwrap(), "B");
        assert_eq!(tree.component_count(), 3);
    }

    #[test]
    fn test_binding_ids_unique_across_tree() {
        let doc = Rc::new(Document::new());
        let tree = render(&doc, "shell", &RenderOptions::default()).unwrap();

        let ids = tree.binding_ids();
        let unique: HashSet<_> = ids.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_non_callable_click_is_skipped() {
        let doc = Rc::new(Document::new());
        let tree = render(&doc, "shell", &RenderOptions::default()).unwrap();

        let a = tree.find("a-part").unwrap();
        assert_eq!(a.events.len(), 1);
        assert!(!a.events[0].wired);
        assert!(!doc.has_click_listener(a.events[0].anchor));
    }

    #[test]
    fn test_missing_anchor_is_fatal() {
        let doc = Rc::new(Document::new());
        let err = render(&doc, "broken", &RenderOptions::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingAnchor {
                anchor: "ng-1".into()
            }
        );
    }

    #[test]
    fn test_self_nesting_hits_depth_limit() {
        let doc = Rc::new(Document::new());
        let options = RenderOptions::default().with_max_depth(4);
        let err = render(&doc, "mirror", &options).unwrap_err();
        assert_eq!(
            err,
            RenderError::NestingTooDeep {
                selector: "mirror".into(),
                limit: 4
            }
        );
    }

    #[test]
    fn test_imports_restrict_discovery() {
        let doc = Rc::new(Document::new());
        let tree = render(&doc, "picky", &RenderOptions::default()).unwrap();
        let order: Vec<&str> = tree.children.iter().map(|c| c.selector()).collect();
        assert_eq!(order, vec!["b-part"]);
    }
}
