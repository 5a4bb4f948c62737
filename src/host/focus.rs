//! Focus ring over clickable elements.

use crate::types::NodeId;

/// Cycles focus through a list of targets (Tab / Shift+Tab).
///
/// The target list is re-synced before every draw since rendering can add or
/// remove clickable elements.
#[derive(Debug, Clone, Default)]
pub struct FocusRing {
    targets: Vec<NodeId>,
    index: Option<usize>,
}

impl FocusRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the targets, keeping the focused node when it survives.
    ///
    /// Otherwise focus falls back to the first target (or none).
    pub fn sync(&mut self, targets: Vec<NodeId>) {
        let keep = self.focused();
        self.targets = targets;
        self.index = match keep.and_then(|node| self.targets.iter().position(|t| *t == node)) {
            Some(index) => Some(index),
            None if self.targets.is_empty() => None,
            None => Some(0),
        };
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.index.and_then(|index| self.targets.get(index).copied())
    }

    /// Move to the next target, wrapping around.
    pub fn next(&mut self) -> Option<NodeId> {
        self.step(1)
    }

    /// Move to the previous target, wrapping around.
    pub fn previous(&mut self) -> Option<NodeId> {
        self.step(self.targets.len().saturating_sub(1))
    }

    fn step(&mut self, by: usize) -> Option<NodeId> {
        let len = self.targets.len();
        if len == 0 {
            self.index = None;
            return None;
        }
        self.index = Some(match self.index {
            Some(index) => (index + by) % len,
            None => 0,
        });
        self.focused()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(ids: &[usize]) -> FocusRing {
        let mut ring = FocusRing::new();
        ring.sync(ids.iter().map(|id| NodeId(*id)).collect());
        ring
    }

    #[test]
    fn test_sync_focuses_first() {
        let ring = ring(&[4, 9]);
        assert_eq!(ring.focused(), Some(NodeId(4)));
        assert_eq!(FocusRing::new().focused(), None);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut ring = ring(&[1, 2, 3]);
        assert_eq!(ring.next(), Some(NodeId(2)));
        assert_eq!(ring.next(), Some(NodeId(3)));
        assert_eq!(ring.next(), Some(NodeId(1)));
        assert_eq!(ring.previous(), Some(NodeId(3)));
    }

    #[test]
    fn test_sync_keeps_surviving_focus() {
        let mut ring = ring(&[1, 2, 3]);
        ring.next();
        ring.sync(vec![NodeId(0), NodeId(2)]);
        assert_eq!(ring.focused(), Some(NodeId(2)));

        ring.sync(vec![NodeId(7)]);
        assert_eq!(ring.focused(), Some(NodeId(7)));

        ring.sync(Vec::new());
        assert_eq!(ring.focused(), None);
        assert_eq!(ring.next(), None);
    }
}
