//! Signals - reactive value cells.
//!
//! A signal holds one value and an ordered set of dependents. Reading inside an
//! observer registers that observer; writing stores the value and runs every
//! dependent, in registration order, before returning.
//!
//! There is no equality check and no batching: every write notifies, and a
//! dependent that writes another signal finishes that nested notification
//! before the outer one moves on.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::observer::{current_observer, Observer};

// =============================================================================
// Signal
// =============================================================================

struct SignalInner<T> {
    value: RefCell<T>,
    dependents: RefCell<Vec<Rc<Observer>>>,
}

/// A reactive value.
///
/// Cloning a signal clones the handle; both handles share the value.
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Create a signal holding `value`.
pub fn signal<T: 'static>(value: T) -> Signal<T> {
    Signal::new(value)
}

impl<T: 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                value: RefCell::new(value),
                dependents: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Read the value by reference, tracking the active observer.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.track();
        f(&self.inner.value.borrow())
    }

    /// Read the value, tracking the active observer.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read the value without tracking.
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Store `value` and notify every dependent.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Modify a copy of the value, store it and notify every dependent.
    ///
    /// No borrow is held while `f` runs, so `f` may read this signal.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        let mut value = self.peek();
        f(&mut value);
        self.set(value);
    }

    /// Number of registered dependents.
    pub fn dependent_count(&self) -> usize {
        self.inner.dependents.borrow().len()
    }

    fn track(&self) {
        let Some(observer) = current_observer() else {
            return;
        };
        let mut dependents = self.inner.dependents.borrow_mut();
        if !dependents.iter().any(|d| d.id() == observer.id()) {
            dependents.push(observer);
        }
    }

    fn notify(&self) {
        // Snapshot so dependents may read (and register with) this signal while running.
        let dependents: Vec<Rc<Observer>> = self.inner.dependents.borrow().clone();
        trace!(dependents = dependents.len(), "signal updated");
        for dependent in &dependents {
            dependent.run();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.value.try_borrow() {
            Ok(value) => f.debug_tuple("Signal").field(&*value).finish(),
            Err(_) => f.write_str("Signal(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::reactive::{effect, untracked};

    #[test]
    fn test_get_and_set() {
        let count = signal(1);
        assert_eq!(count.get(), 1);
        count.set(5);
        assert_eq!(count.get(), 5);
        count.update(|v| *v += 1);
        assert_eq!(count.peek(), 6);
    }

    #[test]
    fn test_update_closure_may_read_same_signal() {
        let count = signal(2);
        let reader = count.clone();
        count.update(|v| *v += reader.peek() * 10);
        assert_eq!(count.peek(), 22);
        count.update(|v| *v -= reader.get());
        assert_eq!(count.peek(), 0);
    }

    #[test]
    fn test_read_outside_observer_does_not_track() {
        let count = signal(0);
        let _ = count.get();
        assert_eq!(count.dependent_count(), 0);
    }

    #[test]
    fn test_repeated_reads_register_once() {
        let count = signal(0);
        let reader = count.clone();
        effect(move || {
            let _ = reader.get();
            let _ = reader.get();
        });
        assert_eq!(count.dependent_count(), 1);
    }

    #[test]
    fn test_set_notifies_even_when_equal() {
        let name = signal("a".to_string());
        let runs = Rc::new(RefCell::new(0));

        let reader = name.clone();
        let counter = runs.clone();
        effect(move || {
            let _ = reader.get();
            *counter.borrow_mut() += 1;
        });

        name.set("a".to_string());
        name.set("a".to_string());
        assert_eq!(*runs.borrow(), 3);
    }

    #[test]
    fn test_dependents_notified_in_registration_order() {
        let source = signal(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let reader = source.clone();
            let log = log.clone();
            effect(move || {
                let _ = reader.get();
                log.borrow_mut().push(label);
            });
        }
        log.borrow_mut().clear();

        source.set(1);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_nested_notification_is_depth_first() {
        let a = signal(0);
        let b = signal(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        // Registered first on `a`: forwards into `b`.
        {
            let a = a.clone();
            let b = b.clone();
            let log = log.clone();
            effect(move || {
                let v = a.get();
                log.borrow_mut().push(format!("forward {v}"));
                b.set(v * 10);
            });
        }
        {
            let b = b.clone();
            let log = log.clone();
            effect(move || {
                let v = b.get();
                log.borrow_mut().push(format!("b {v}"));
            });
        }
        {
            let a = a.clone();
            let log = log.clone();
            effect(move || {
                let v = a.get();
                log.borrow_mut().push(format!("a {v}"));
            });
        }
        log.borrow_mut().clear();

        a.set(2);
        assert_eq!(
            *log.borrow(),
            vec!["forward 2".to_string(), "b 20".to_string(), "a 2".to_string()]
        );
    }

    #[test]
    fn test_dependents_persist_after_branch_change() {
        let flag = signal(true);
        let other = signal(0);
        let runs = Rc::new(RefCell::new(0));

        let (f, o, r) = (flag.clone(), other.clone(), runs.clone());
        effect(move || {
            *r.borrow_mut() += 1;
            if f.get() {
                let _ = o.get();
            }
        });

        flag.set(false);
        // The effect no longer reads `other`, but stays registered.
        assert_eq!(other.dependent_count(), 1);
        other.set(1);
        assert_eq!(*runs.borrow(), 3);
    }

    #[test]
    fn test_untracked_read_inside_effect() {
        let count = signal(0);
        let reader = count.clone();
        effect(move || {
            untracked(|| reader.get());
        });
        assert_eq!(count.dependent_count(), 0);
    }

    #[test]
    fn test_debug_shows_value() {
        assert_eq!(format!("{:?}", signal(3)), "Signal(3)");
    }
}
