//! Per-range state kept outside the syntax tree
//!
//! Tree nodes are invalidated on every edit, so consumer state (cached
//! highlight results, folding flags, ...) lives here, keyed by the start
//! offset of the range plus the parser generation it was computed against.

use std::collections::HashMap;

/// Stable identifier for a range within one parser generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey {
    pub start: usize,
    pub generation: u64,
}

impl RangeKey {
    pub const fn new(start: usize, generation: u64) -> Self {
        Self { start, generation }
    }
}

/// Map from [`RangeKey`] to arbitrary per-range state
#[derive(Debug, Clone)]
pub struct RangeStateTable<T> {
    entries: HashMap<RangeKey, T>,
}

impl<T> RangeStateTable<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert or replace; returns the previous value for the key
    pub fn insert(&mut self, start: usize, generation: u64, value: T) -> Option<T> {
        self.entries.insert(RangeKey::new(start, generation), value)
    }

    pub fn get(&self, start: usize, generation: u64) -> Option<&T> {
        self.entries.get(&RangeKey::new(start, generation))
    }

    pub fn get_mut(&mut self, start: usize, generation: u64) -> Option<&mut T> {
        self.entries.get_mut(&RangeKey::new(start, generation))
    }

    pub fn remove(&mut self, start: usize, generation: u64) -> Option<T> {
        self.entries.remove(&RangeKey::new(start, generation))
    }

    /// Drop every entry recorded against a generation older than `generation`.
    ///
    /// Returns the number of entries removed.
    pub fn prune_before(&mut self, generation: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.generation >= generation);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::trace!(
                "Pruned {} range entries older than generation {}",
                removed,
                generation
            );
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for RangeStateTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
