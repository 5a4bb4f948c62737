//! Reactivity core - signals, computeds and effects.
//!
//! Dependencies are discovered by running code: any signal read while an
//! observer is active records that observer as a dependent. Writes push
//! synchronously to every dependent.
//!
//! ```text
//! signal.set(v) ──► computed observer ──► backing.set(..) ──► effect observer
//!               └─► effect observer
//! ```
//!
//! Everything here is single-threaded (`Rc` + `RefCell` + `thread_local!`).

mod computed;
mod effect;
mod observer;
mod signal;

pub use computed::{computed, Computed};
pub use effect::effect;
pub use observer::{
    current_observer, observer_depth, untracked, Observer, ObserverId, ObserverKind,
    MAX_REENTRANT_RUNS,
};
pub use signal::{signal, Signal};
