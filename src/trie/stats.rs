use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Snapshot of trie driver statistics at a point in time.
#[derive(Default, Debug, Clone, Copy)]
pub struct TrieStatsSnapshot {
    /// Planner verdicts that descended into an existing child
    pub descents: u64,
    /// Planner verdicts that added a new child label
    pub child_adds: u64,
    /// Tuples rebuilt because a value diverged from their prefix
    pub prefix_splits: u64,
    /// All-the-same tuples dissolved to admit a second label
    pub diversity_splits: u64,
    /// Leaf buckets fanned out by the bulk splitter
    pub bulk_splits: u64,
    /// Bulk splits deferred because the batch was all duplicates
    pub deferred_splits: u64,
    /// Children excluded during scan descents
    pub inner_prunes: u64,
    /// Leaf tuples that passed their exact tests
    pub leaf_hits: u64,
    /// Leaf tuples that failed their exact tests
    pub leaf_misses: u64,
}

/// Thread-safe statistics tracking for the trie driver.
#[derive(Default)]
pub struct TrieStats {
    descents: AtomicU64,
    child_adds: AtomicU64,
    prefix_splits: AtomicU64,
    diversity_splits: AtomicU64,
    bulk_splits: AtomicU64,
    deferred_splits: AtomicU64,
    inner_prunes: AtomicU64,
    leaf_hits: AtomicU64,
    leaf_misses: AtomicU64,
}

impl TrieStats {
    /// Returns the count of descents into existing children.
    pub fn descents(&self) -> u64 {
        self.descents.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of child labels added by the planner.
    pub fn child_adds(&self) -> u64 {
        self.child_adds.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of prefix-divergence splits.
    pub fn prefix_splits(&self) -> u64 {
        self.prefix_splits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of all-the-same tuples dissolved.
    pub fn diversity_splits(&self) -> u64 {
        self.diversity_splits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of bulk splits performed.
    pub fn bulk_splits(&self) -> u64 {
        self.bulk_splits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of bulk splits deferred on duplicate batches.
    pub fn deferred_splits(&self) -> u64 {
        self.deferred_splits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of children pruned during scans.
    pub fn inner_prunes(&self) -> u64 {
        self.inner_prunes.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of leaf tuples that matched.
    pub fn leaf_hits(&self) -> u64 {
        self.leaf_hits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the count of leaf tuples that did not match.
    pub fn leaf_misses(&self) -> u64 {
        self.leaf_misses.load(AtomicOrdering::Relaxed)
    }

    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TrieStatsSnapshot {
        TrieStatsSnapshot {
            descents: self.descents(),
            child_adds: self.child_adds(),
            prefix_splits: self.prefix_splits(),
            diversity_splits: self.diversity_splits(),
            bulk_splits: self.bulk_splits(),
            deferred_splits: self.deferred_splits(),
            inner_prunes: self.inner_prunes(),
            leaf_hits: self.leaf_hits(),
            leaf_misses: self.leaf_misses(),
        }
    }

    pub(crate) fn inc_descents(&self) {
        self.descents.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(crate) fn inc_child_adds(&self) {
        self.child_adds.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(crate) fn inc_prefix_splits(&self) {
        self.prefix_splits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(crate) fn inc_diversity_splits(&self) {
        self.diversity_splits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(crate) fn inc_bulk_splits(&self) {
        self.bulk_splits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(crate) fn inc_deferred_splits(&self) {
        self.deferred_splits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(crate) fn add_inner_prunes(&self, count: u64) {
        self.inner_prunes.fetch_add(count, AtomicOrdering::Relaxed);
    }

    pub(crate) fn inc_leaf_hits(&self) {
        self.leaf_hits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(crate) fn inc_leaf_misses(&self) {
        self.leaf_misses.fetch_add(1, AtomicOrdering::Relaxed);
    }
}
