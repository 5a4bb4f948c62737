//! Update Pipeline
//!
//! Keeps rendered anchors in step with component state after the first paint.
//!
//! # Strategies
//!
//! ```text
//! {{name()}} on a reactive member  → push: one effect per binding
//! {{name}}   on any member         → pull: tree walk after each click
//! ```
//!
//! ## Push
//!
//! [`bind_text`] installs an effect that reads the member with tracking on.
//! A signal write re-runs it synchronously and the anchor is rewritten.
//!
//! ## Pull
//!
//! [`check_tree`] compares each pull binding's last rendered value with the
//! member's current value and writes only the mismatches. Click listeners
//! request a walk through [`Refresh`] once the handler returns.

pub mod mount;
mod pull;
mod push;
mod refresh;

pub use mount::{mount, mount_in, mount_selector, App};
pub use pull::check_tree;
pub use push::bind_text;
pub use refresh::Refresh;
