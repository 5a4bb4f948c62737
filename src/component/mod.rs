//! Components - definitions, instances and the registry.
//!
//! A component is a Rust type implementing [`Component`]: a selector used to
//! discover it inside parent markup, a template, a constructor and a member
//! table. The tree builder only ever sees type-erased instances
//! ([`ComponentRef`]), created from a [`ComponentDef`].
//!
//! # Example
//!
//! ```ignore
//! use spark_dom::component::{Component, Members};
//! use spark_dom::reactive::{signal, Signal};
//!
//! struct ClockComponent {
//!     time: Signal<String>,
//! }
//!
//! impl ClockComponent {
//!     fn tick(&self) {
//!         self.time.set(now());
//!     }
//! }
//!
//! impl Component for ClockComponent {
//!     const SELECTOR: &'static str = "clock";
//!     const TEMPLATE: &'static str =
//!         r#"<p>{{time()}}</p><button (click)="tick()">Update</button>"#;
//!
//!     fn create() -> Self {
//!         Self { time: signal(now()) }
//!     }
//!
//!     fn members() -> Members<Self> {
//!         Members::new()
//!             .reactive("time", |c: &Self| c.time.get())
//!             .handler("tick", Self::tick)
//!     }
//! }
//! ```

mod members;
mod registry;

pub use members::{Field, Member, MemberKind, Members};
pub use registry::{Registry, RegistryBuilder};

use std::any::Any;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// Component Trait
// =============================================================================

/// A component definition.
pub trait Component: Sized + 'static {
    /// Tag name this component is discovered by.
    const SELECTOR: &'static str;

    /// Raw markup; copied into every instance.
    const TEMPLATE: &'static str;

    /// Selectors this component searches its rendered markup for.
    ///
    /// Empty means every registered selector is a candidate.
    const IMPORTS: &'static [&'static str] = &[];

    /// Fresh state for a new instance.
    fn create() -> Self;

    /// Bindable members. Called once per definition.
    fn members() -> Members<Self>;
}

// =============================================================================
// Erased Instance
// =============================================================================

/// Reads a text member as a string. `None` once the instance is gone.
pub type TextSource = Rc<dyn Fn() -> Option<String>>;

/// Invokes a handler on its instance.
pub type HandlerFn = Rc<dyn Fn()>;

/// Type-erased component instance.
pub trait AnyComponent {
    fn selector(&self) -> &'static str;

    fn imports(&self) -> &'static [&'static str];

    /// This instance's own copy of the template.
    fn template(&self) -> &str;

    fn member_kind(&self, name: &str) -> Option<MemberKind>;

    /// Reader for a field or reactive member.
    ///
    /// The reader holds the instance weakly, so effects built on it do not
    /// keep the component alive.
    fn text_source(&self, name: &str) -> Option<TextSource>;

    /// Invoker for a handler member, bound to this instance.
    ///
    /// Also holds the instance weakly: once the instance is dropped, invoking
    /// it does nothing.
    fn handler(&self, name: &str) -> Option<HandlerFn>;

    /// The concrete state, for downcasting.
    fn state(&self) -> Rc<dyn Any>;
}

/// Shared handle to an erased instance.
pub type ComponentRef = Rc<dyn AnyComponent>;

/// Recover the concrete state of an instance.
pub fn downcast_state<C: Component>(component: &ComponentRef) -> Option<Rc<C>> {
    component.state().downcast::<C>().ok()
}

struct Instance<C: Component> {
    state: Rc<C>,
    members: Rc<Members<C>>,
    template: String,
}

impl<C: Component> AnyComponent for Instance<C> {
    fn selector(&self) -> &'static str {
        C::SELECTOR
    }

    fn imports(&self) -> &'static [&'static str] {
        C::IMPORTS
    }

    fn template(&self) -> &str {
        &self.template
    }

    fn member_kind(&self, name: &str) -> Option<MemberKind> {
        self.members.get(name).map(Member::kind)
    }

    fn text_source(&self, name: &str) -> Option<TextSource> {
        let read = match *self.members.get(name)? {
            Member::Field(read) | Member::Reactive(read) => read,
            Member::Handler(_) => return None,
        };
        let state = Rc::downgrade(&self.state);
        Some(Rc::new(move || state.upgrade().map(|state| read(&state))))
    }

    fn handler(&self, name: &str) -> Option<HandlerFn> {
        let Member::Handler(invoke) = *self.members.get(name)? else {
            return None;
        };
        let state = Rc::downgrade(&self.state);
        Some(Rc::new(move || {
            if let Some(state) = state.upgrade() {
                invoke(&state);
            }
        }))
    }

    fn state(&self) -> Rc<dyn Any> {
        self.state.clone()
    }
}

// =============================================================================
// Component Definition
// =============================================================================

/// Erased definition: selector, imports and a factory sharing one member table.
#[derive(Clone)]
pub struct ComponentDef {
    selector: &'static str,
    imports: &'static [&'static str],
    instantiate: Rc<dyn Fn() -> ComponentRef>,
}

impl ComponentDef {
    /// Definition for component type `C`.
    pub fn of<C: Component>() -> Self {
        let members = Rc::new(C::members());
        Self {
            selector: C::SELECTOR,
            imports: C::IMPORTS,
            instantiate: Rc::new(move || {
                let instance: ComponentRef = Rc::new(Instance::<C> {
                    state: Rc::new(C::create()),
                    members: members.clone(),
                    template: C::TEMPLATE.to_string(),
                });
                instance
            }),
        }
    }

    pub fn selector(&self) -> &'static str {
        self.selector
    }

    pub fn imports(&self) -> &'static [&'static str] {
        self.imports
    }

    /// Create a fresh instance.
    pub fn instantiate(&self) -> ComponentRef {
        (self.instantiate)()
    }
}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDef")
            .field("selector", &self.selector)
            .field("imports", &self.imports)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{signal, Signal};

    struct Greeter {
        name: Field<String>,
        shout: Signal<bool>,
    }

    impl Greeter {
        fn toggle(&self) {
            self.shout.update(|s| *s = !*s);
        }
    }

    impl Component for Greeter {
        const SELECTOR: &'static str = "greeter";
        const TEMPLATE: &'static str = "<p>{{name}}</p>";

        fn create() -> Self {
            Self {
                name: Field::new("ada".into()),
                shout: signal(false),
            }
        }

        fn members() -> Members<Self> {
            Members::new()
                .field("name", |g: &Self| g.name.get())
                .reactive("shout", |g: &Self| g.shout.get().to_string())
                .handler("toggle", Self::toggle)
        }
    }

    #[test]
    fn test_instances_have_independent_state() {
        let def = ComponentDef::of::<Greeter>();
        let a = def.instantiate();
        let b = def.instantiate();

        let toggle = a.handler("toggle").unwrap();
        toggle();

        let read_a = a.text_source("shout").unwrap();
        let read_b = b.text_source("shout").unwrap();
        assert_eq!(read_a().as_deref(), Some("true"));
        assert_eq!(read_b().as_deref(), Some("false"));
        assert_eq!(a.template(), "<p>{{name}}</p>");
        assert_eq!(a.selector(), "greeter");
    }

    #[test]
    fn test_member_kinds() {
        let instance = ComponentDef::of::<Greeter>().instantiate();
        assert_eq!(instance.member_kind("name"), Some(MemberKind::Field));
        assert_eq!(instance.member_kind("shout"), Some(MemberKind::Reactive));
        assert_eq!(instance.member_kind("toggle"), Some(MemberKind::Handler));
        assert!(instance.text_source("toggle").is_none());
        assert!(instance.handler("name").is_none());
    }

    #[test]
    fn test_text_source_does_not_keep_instance_alive() {
        let instance = ComponentDef::of::<Greeter>().instantiate();
        let read = instance.text_source("name").unwrap();
        assert_eq!(read().as_deref(), Some("ada"));
        drop(instance);
        assert_eq!(read(), None);
    }

    #[test]
    fn test_handler_does_not_keep_instance_alive() {
        let instance = ComponentDef::of::<Greeter>().instantiate();
        let greeter = downcast_state::<Greeter>(&instance).unwrap();
        let toggle = instance.handler("toggle").unwrap();

        toggle();
        let shout = greeter.shout.clone();
        assert!(shout.peek());

        drop(greeter);
        drop(instance);
        toggle();
        assert!(shout.peek());
    }

    #[test]
    fn test_downcast_state() {
        let instance = ComponentDef::of::<Greeter>().instantiate();
        let greeter = downcast_state::<Greeter>(&instance).unwrap();
        greeter.name.set("grace".into());
        assert_eq!(instance.text_source("name").unwrap()().as_deref(), Some("grace"));
    }
}
