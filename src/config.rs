//! Render configuration.
//!
//! A mount is configured once through [`RenderOptions`]. The defaults match the
//! fully reactive setup: push effects for `{{name()}}` bindings and a pull walk
//! after every click for plain fields.

// =============================================================================
// Update Mode
// =============================================================================

bitflags::bitflags! {
    /// Which update strategies a mount wires up.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UpdateMode: u8 {
        /// Install one effect per `{{name()}}` binding.
        const PUSH = 1 << 0;
        /// Walk the tree after each click listener returns.
        const PULL = 1 << 1;
    }
}

impl Default for UpdateMode {
    fn default() -> Self {
        Self::PUSH | Self::PULL
    }
}

// =============================================================================
// Render Options
// =============================================================================

/// Default anchor id prefix (`<span id="ng-3">`).
pub const DEFAULT_ANCHOR_PREFIX: &str = "ng-";

/// Default limit on component nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Options for one mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Enabled update strategies.
    pub update: UpdateMode,
    /// Prefix of every anchor element id.
    pub anchor_prefix: String,
    /// Maximum component nesting depth before rendering fails.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            update: UpdateMode::default(),
            anchor_prefix: DEFAULT_ANCHOR_PREFIX.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    /// Replace the enabled update strategies.
    pub fn with_update(mut self, update: UpdateMode) -> Self {
        self.update = update;
        self
    }

    /// Replace the anchor id prefix.
    pub fn with_anchor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.anchor_prefix = prefix.into();
        self
    }

    /// Replace the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether `{{name()}}` bindings get their own effect.
    pub fn push_enabled(&self) -> bool {
        self.update.contains(UpdateMode::PUSH)
    }

    /// Whether click listeners trigger a pull walk.
    pub fn pull_enabled(&self) -> bool {
        self.update.contains(UpdateMode::PULL)
    }
}
