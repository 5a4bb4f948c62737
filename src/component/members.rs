//! Member tables - typed accessors by binding name.
//!
//! Each component type declares its bindable members once. The compiler looks
//! names up here instead of probing the component at runtime, and the tag on
//! each entry decides how a text binding is kept up to date:
//!
//! - [`Member::Field`] - plain state, refreshed by the pull walk
//! - [`Member::Reactive`] - reads a signal or computed, refreshed by its own effect
//! - [`Member::Handler`] - zero-argument method for `(click)` bindings

use std::cell::RefCell;
use std::fmt;

// =============================================================================
// Member
// =============================================================================

/// One bindable member of component type `C`.
pub enum Member<C> {
    /// Plain field read.
    Field(fn(&C) -> String),
    /// Read of a signal or computed. Reads inside an effect are tracked.
    Reactive(fn(&C) -> String),
    /// Zero-argument handler.
    Handler(fn(&C)),
}

impl<C> Clone for Member<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Member<C> {}

/// Kind of a member, without its accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Reactive,
    Handler,
}

impl<C> Member<C> {
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Field(_) => MemberKind::Field,
            Member::Reactive(_) => MemberKind::Reactive,
            Member::Handler(_) => MemberKind::Handler,
        }
    }
}

// =============================================================================
// Members
// =============================================================================

/// Name → accessor table for component type `C`.
///
/// # Example
///
/// ```ignore
/// Members::new()
///     .field("title", |app: &AppComponent| app.title.get())
///     .reactive("time", |clock: &ClockComponent| clock.time.get())
///     .handler("tick", ClockComponent::tick)
/// ```
pub struct Members<C> {
    entries: Vec<(&'static str, Member<C>)>,
}

impl<C> Default for Members<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Members<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare a plain field.
    pub fn field(self, name: &'static str, read: fn(&C) -> String) -> Self {
        self.with(name, Member::Field(read))
    }

    /// Declare a reactive field (signal or computed).
    pub fn reactive(self, name: &'static str, read: fn(&C) -> String) -> Self {
        self.with(name, Member::Reactive(read))
    }

    /// Declare a click handler.
    pub fn handler(self, name: &'static str, invoke: fn(&C)) -> Self {
        self.with(name, Member::Handler(invoke))
    }

    /// Declare a member. A second declaration under the same name replaces the first.
    pub fn with(mut self, name: &'static str, member: Member<C>) -> Self {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = member,
            None => self.entries.push((name, member)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Member<C>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, member)| member)
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> fmt::Debug for Members<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, member)| (name, member.kind())))
            .finish()
    }
}

// =============================================================================
// Field
// =============================================================================

/// Plain (untracked) component state.
///
/// Writes are not observed by anything; bindings over a `Field` are brought up
/// to date by the pull walk.
#[derive(Default)]
pub struct Field<T> {
    value: RefCell<T>,
}

impl<T> Field<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
    }

    /// Replace the value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.value.replace(value)
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
    }
}

impl<T: fmt::Debug> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&*self.value.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        label: Field<String>,
        count: Field<u32>,
    }

    fn bump(counter: &Counter) {
        counter.count.update(|c| *c += 1);
    }

    #[test]
    fn test_lookup_by_name() {
        let members = Members::new()
            .field("label", |c: &Counter| c.label.get())
            .field("count", |c: &Counter| c.count.get().to_string())
            .handler("bump", bump);

        assert_eq!(members.len(), 3);
        assert_eq!(members.get("label").map(Member::kind), Some(MemberKind::Field));
        assert_eq!(members.get("bump").map(Member::kind), Some(MemberKind::Handler));
        assert!(members.get("missing").is_none());
        assert_eq!(members.names().collect::<Vec<_>>(), vec!["label", "count", "bump"]);
    }

    #[test]
    fn test_redeclaring_replaces() {
        let members = Members::new()
            .field("count", |c: &Counter| c.count.get().to_string())
            .reactive("count", |c: &Counter| c.count.get().to_string());
        assert_eq!(members.len(), 1);
        assert_eq!(members.get("count").map(Member::kind), Some(MemberKind::Reactive));
    }

    #[test]
    fn test_accessors_read_and_invoke() {
        let counter = Counter {
            label: Field::new("n".to_string()),
            count: Field::new(0),
        };
        let members = Members::new()
            .field("count", |c: &Counter| c.count.get().to_string())
            .handler("bump", bump);

        if let Some(Member::Handler(invoke)) = members.get("bump") {
            invoke(&counter);
            invoke(&counter);
        }
        match members.get("count") {
            Some(Member::Field(read)) => assert_eq!(read(&counter), "2"),
            other => panic!("unexpected member: {:?}", other.map(Member::kind)),
        }
        assert_eq!(counter.label.replace("m".into()), "n");
    }
}
