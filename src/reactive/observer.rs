//! Observers and the active-observer stack.
//!
//! An observer is anything that reacts to a signal change: an effect re-running
//! its body, or a computed re-deriving its value. While an observer runs it sits
//! on top of a thread-local stack; every signal read in that window registers
//! the top of the stack as a dependent.
//!
//! Entering and leaving the stack goes through [`Scope`], a drop guard, so the
//! depth is restored even when the tracked function unwinds.
//!
//! Runs are re-entrant: an observer that writes a signal it reads is notified
//! again before that write returns. Nesting deeper than [`MAX_REENTRANT_RUNS`]
//! is treated as an unbounded cycle and cut off.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

// =============================================================================
// Observer
// =============================================================================

/// Unique id of an observer, used for set semantics in dependent lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// What an observer recomputes when notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverKind {
    Effect,
    Computed,
}

/// Nested runs of one observer allowed before the innermost is dropped.
pub const MAX_REENTRANT_RUNS: usize = 100;

/// A reaction registered as a dependent of one or more signals.
pub struct Observer {
    id: ObserverId,
    kind: ObserverKind,
    reaction: Rc<dyn Fn()>,
    /// Runs of this observer currently on the call stack.
    running: Cell<usize>,
}

thread_local! {
    static NEXT_OBSERVER_ID: Cell<u64> = const { Cell::new(0) };

    /// `None` entries come from `untracked` and shadow any outer observer.
    static ACTIVE: RefCell<Vec<Option<Rc<Observer>>>> = const { RefCell::new(Vec::new()) };
}

impl Observer {
    pub(crate) fn new(kind: ObserverKind, reaction: impl Fn() + 'static) -> Rc<Self> {
        let id = NEXT_OBSERVER_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            ObserverId(id)
        });
        Rc::new(Self {
            id,
            kind,
            reaction: Rc::new(reaction),
            running: Cell::new(0),
        })
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn kind(&self) -> ObserverKind {
        self.kind
    }

    /// Run the reaction with this observer active.
    ///
    /// A run may start while an earlier run of the same observer is still on
    /// the stack (the reaction wrote a signal it reads). The nested run
    /// completes before the write returns, so the outer run never continues
    /// with a stale view. Past [`MAX_REENTRANT_RUNS`] the run is dropped.
    pub(crate) fn run(self: &Rc<Self>) {
        let depth = self.running.get();
        if depth >= MAX_REENTRANT_RUNS {
            warn!(
                observer = self.id.0,
                kind = ?self.kind,
                depth,
                "observer re-entered too deeply; dropping run"
            );
            return;
        }
        trace!(observer = self.id.0, kind = ?self.kind, depth, "running observer");

        let _running = RunGuard::enter(self);
        let _scope = Scope::enter(Some(self.clone()));
        let reaction = self.reaction.clone();
        reaction();
    }
}

/// Counts one run of an observer for as long as it is alive.
struct RunGuard<'a> {
    observer: &'a Observer,
}

impl<'a> RunGuard<'a> {
    fn enter(observer: &'a Observer) -> Self {
        observer.running.set(observer.running.get() + 1);
        Self { observer }
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.observer.running.set(self.observer.running.get() - 1);
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

// =============================================================================
// Active Stack
// =============================================================================

/// Guard for one level of the active-observer stack.
pub(crate) struct Scope {
    depth: usize,
}

impl Scope {
    pub(crate) fn enter(observer: Option<Rc<Observer>>) -> Self {
        ACTIVE.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(observer);
            Self { depth: stack.len() }
        })
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let _ = ACTIVE.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            debug_assert_eq!(stack.len(), self.depth, "observer scopes closed out of order");
            stack.pop();
        });
    }
}

/// The observer currently tracking reads, if any.
pub fn current_observer() -> Option<Rc<Observer>> {
    ACTIVE.with(|stack| stack.borrow().last().cloned().flatten())
}

/// Depth of the active-observer stack.
pub fn observer_depth() -> usize {
    ACTIVE.with(|stack| stack.borrow().len())
}

/// Run `f` without tracking any signal it reads.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    let _scope = Scope::enter(None);
    f()
}
