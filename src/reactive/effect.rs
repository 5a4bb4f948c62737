//! Effects - side-effecting observers.

use super::observer::{Observer, ObserverKind};

/// Run `f` now and again after every change to a signal it has read.
///
/// The effect has no handle and no disposal. It stays alive for as long as any
/// signal it depends on keeps it in its dependent list.
///
/// `f` may run re-entrantly (when it writes a signal it reads), so it is `Fn`;
/// keep mutable state in a `Cell` or `RefCell`.
///
/// # Example
///
/// ```ignore
/// use spark_dom::reactive::{effect, signal};
///
/// let count = signal(0);
/// let reader = count.clone();
/// effect(move || println!("count = {}", reader.get()));
///
/// count.set(1); // prints "count = 1"
/// ```
pub fn effect(f: impl Fn() + 'static) {
    let observer = Observer::new(ObserverKind::Effect, f);
    observer.run();
}
