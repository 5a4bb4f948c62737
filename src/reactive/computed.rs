//! Computed values - derived signals.
//!
//! A computed runs its derivation once under its own observer to seed a backing
//! signal. Every later notification re-runs the derivation and `set`s the
//! backing signal, which in turn notifies whoever reads the computed.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use super::observer::{Observer, ObserverKind, Scope};
use super::signal::Signal;

// =============================================================================
// Computed
// =============================================================================

/// Read-only view of a derived value.
pub struct Computed<T> {
    backing: Signal<T>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
        }
    }
}

impl<T: 'static> Computed<T> {
    /// Read the derived value, tracking the active observer.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.backing.get()
    }

    /// Read the derived value by reference, tracking the active observer.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.backing.with(f)
    }

    /// Read the derived value without tracking.
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.backing.peek()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Computed").field(&self.backing).finish()
    }
}

/// Derive a value from other signals.
///
/// `derive` should be pure. If it panics the computed keeps its previous value
/// and the panic propagates to whoever triggered the recomputation.
pub fn computed<T: 'static>(derive: impl Fn() -> T + 'static) -> Computed<T> {
    let derive = Rc::new(derive);
    let backing: Rc<OnceCell<Signal<T>>> = Rc::new(OnceCell::new());

    let observer = Observer::new(ObserverKind::Computed, {
        let derive = derive.clone();
        let backing = backing.clone();
        move || {
            if let Some(signal) = backing.get() {
                signal.set(derive());
            }
        }
    });

    let initial = {
        let _scope = Scope::enter(Some(observer));
        derive()
    };
    let signal = Signal::new(initial);
    let _ = backing.set(signal.clone());

    Computed { backing: signal }
}
