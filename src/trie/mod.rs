//! The space-partitioned radix-trie index over k-mers.
//!
//! The host storage engine owns traversal and page I/O; this module supplies
//! the per-level decision callbacks ([`RadixOps`]) and an in-memory driver
//! ([`Trie`]) that hosts them. Inner tuples factor shared prefixes into a
//! node-level prefix plus sorted one-byte child labels, with a terminator
//! label for values ending at the prefix boundary, so trie depth never
//! exceeds the k-mer length bound.

mod choose;
mod consistent;

/// Inner-tuple shape helpers: labels, prefix arithmetic, label search.
pub mod node;

mod ops;
mod picksplit;
mod reconstruct;
mod stats;
mod tree;

pub use choose::{ChooseAction, ChooseIn, PrefixSplit};
pub use consistent::{
    ChildVisit, InnerConsistentIn, InnerConsistentOut, LeafConsistentIn, LeafConsistentOut,
    ScanPredicate,
};
pub use node::{common_prefix_len, find_label, InnerNodeView, NodeLabel};
pub use ops::{KmerRadix, RadixConfig, RadixOps, RadixOptions};
pub use picksplit::PickSplitOut;
pub use reconstruct::PathBuffer;
pub use stats::{TrieStats, TrieStatsSnapshot};
pub use tree::{Trie, TrieOptions};
