//! Binding-id allocation.

use crate::types::BindingId;

/// Monotonic binding-id allocator.
///
/// One allocator serves a whole mount (or several mounts sharing a document),
/// which keeps every anchor id unique across the entire tree. It is never
/// reset and never hands out an id twice.
#[derive(Debug)]
pub struct BindingIds {
    next: u64,
}

impl Default for BindingIds {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingIds {
    /// Allocator whose first id is 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> BindingId {
        let id = BindingId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let mut ids = BindingIds::new();
        assert_eq!(ids.next_id(), BindingId(1));
        assert_eq!(ids.next_id(), BindingId(2));
        assert_eq!(ids.next_id(), BindingId(3));
        assert_eq!(ids.allocated(), 3);
    }
}
