//! The callback contract between the trie and its host, and the k-mer
//! implementation of it.

use crate::dna::MAX_KMER_LEN;
use crate::error::Result;
use crate::trie::choose::{choose, ChooseAction, ChooseIn};
use crate::trie::consistent::{
    inner_consistent, leaf_consistent, InnerConsistentIn, InnerConsistentOut, LeafConsistentIn,
    LeafConsistentOut,
};
use crate::trie::picksplit::{pick_split, PickSplitOut};

/// Static descriptor the host reads once when it creates an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadixConfig {
    /// The index can rebuild stored values from the path alone, so scans
    /// never touch the base data.
    pub can_return_data: bool,
    /// Whether values may exceed a page; k-mers never do.
    pub long_values_ok: bool,
}

/// Host-supplied knobs for the callbacks.
#[derive(Debug, Clone)]
pub struct RadixOptions {
    /// Upper bound on a rebuilt tuple's prefix. Driven by the host's page
    /// capacity; the default is the k-mer length bound, which never
    /// truncates.
    pub max_prefix_len: usize,
}

impl Default for RadixOptions {
    fn default() -> Self {
        Self {
            max_prefix_len: MAX_KMER_LEN,
        }
    }
}

/// The five contracts a space-partitioned index host drives: a static
/// descriptor plus the four per-operation callbacks. Each callback is total
/// and side-effect-free apart from its freshly allocated result.
pub trait RadixOps {
    /// Static index descriptor.
    fn config(&self) -> RadixConfig;

    /// Plan the next step of an insertion descent (§insertion planner).
    fn choose(&self, args: &ChooseIn<'_>) -> Result<ChooseAction>;

    /// Partition a colliding batch of leaf values (§bulk splitter).
    fn pick_split(&self, values: &[&[u8]]) -> Result<PickSplitOut>;

    /// Prune the children worth visiting during a scan descent.
    fn inner_consistent(&self, args: &InnerConsistentIn<'_>) -> InnerConsistentOut;

    /// Run the exact predicate tests at a leaf and rebuild its value.
    fn leaf_consistent(&self, args: &LeafConsistentIn<'_>) -> Result<LeafConsistentOut>;
}

/// K-mer implementation of [`RadixOps`].
#[derive(Debug, Clone, Default)]
pub struct KmerRadix {
    options: RadixOptions,
}

impl KmerRadix {
    /// Build the callback set with host-supplied options.
    pub fn new(options: RadixOptions) -> Self {
        Self { options }
    }

    /// The options this instance was built with.
    pub fn options(&self) -> &RadixOptions {
        &self.options
    }
}

impl RadixOps for KmerRadix {
    fn config(&self) -> RadixConfig {
        RadixConfig {
            can_return_data: true,
            long_values_ok: false,
        }
    }

    fn choose(&self, args: &ChooseIn<'_>) -> Result<ChooseAction> {
        choose(args)
    }

    fn pick_split(&self, values: &[&[u8]]) -> Result<PickSplitOut> {
        pick_split(values, self.options.max_prefix_len)
    }

    fn inner_consistent(&self, args: &InnerConsistentIn<'_>) -> InnerConsistentOut {
        inner_consistent(args)
    }

    fn leaf_consistent(&self, args: &LeafConsistentIn<'_>) -> Result<LeafConsistentOut> {
        leaf_consistent(args)
    }
}
