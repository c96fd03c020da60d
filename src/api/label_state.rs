use crate::axis::LabelSet;

/// Runtime metrics for one axis label cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Cached label set for one axis, with an explicit staleness flag.
///
/// A pinned (static) set provided by the host takes precedence over
/// generation and is exempt from invalidation until unpinned.
#[derive(Debug, Default)]
pub(super) struct AxisLabelCache {
    generated: Option<LabelSet>,
    pinned: Option<LabelSet>,
    stale: bool,
    hits: u64,
    misses: u64,
}

impl AxisLabelCache {
    /// The pinned set, or the generated set while it is still fresh.
    pub(super) fn lookup(&mut self) -> Option<LabelSet> {
        if let Some(pinned) = &self.pinned {
            self.hits += 1;
            return Some(pinned.clone());
        }
        if self.stale {
            return None;
        }
        let fresh = self.generated.clone();
        if fresh.is_some() {
            self.hits += 1;
        }
        fresh
    }

    pub(super) fn store(&mut self, set: LabelSet) {
        self.misses += 1;
        self.generated = Some(set);
        self.stale = false;
    }

    /// Marks the generated set stale; a pinned set is unaffected.
    pub(super) fn invalidate(&mut self) {
        self.stale = true;
    }

    pub(super) fn pin(&mut self, set: Option<LabelSet>) {
        self.pinned = set;
        if self.pinned.is_none() {
            self.stale = true;
        }
    }

    pub(super) fn stats(&self) -> LabelCacheStats {
        LabelCacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}
