//! In-memory host for the radix callbacks.
//!
//! Owns boxed nodes the way a storage engine owns pages, drives the planner
//! and the bulk splitter on insert, and the evaluator pair on scans. Stands
//! in for the real paged host so the callback contracts can be exercised
//! end-to-end; it is not a persistence layer.

use smallvec::SmallVec;

use crate::dna::{Kmer, MAX_KMER_LEN};
use crate::error::{HelicaseError, Result};
use crate::trie::choose::{ChooseAction, ChooseIn};
use crate::trie::consistent::{InnerConsistentIn, LeafConsistentIn, ScanPredicate};
use crate::trie::node::{check_label_order, InnerNodeView, NodeLabel};
use crate::trie::ops::RadixOps;
use crate::trie::picksplit::PickSplitOut;
use crate::trie::reconstruct::PathBuffer;
use crate::trie::stats::{TrieStats, TrieStatsSnapshot};

type Bytes = SmallVec<[u8; MAX_KMER_LEN]>;

/// Tuning for the in-memory driver.
#[derive(Debug, Clone)]
pub struct TrieOptions {
    /// Leaf tuples a bucket may hold before a bulk split fans it out; the
    /// stand-in for page capacity. Values below 1 are treated as 1.
    pub leaf_capacity: usize,
}

impl Default for TrieOptions {
    fn default() -> Self {
        Self { leaf_capacity: 64 }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LeafTuple {
    pub(crate) suffix: Bytes,
    pub(crate) payload: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LeafBucket {
    pub(crate) tuples: Vec<LeafTuple>,
}

#[derive(Debug, Clone)]
pub(crate) struct InnerNode {
    pub(crate) prefix: Bytes,
    pub(crate) labels: Vec<NodeLabel>,
    pub(crate) children: Vec<TrieNode>,
    pub(crate) all_the_same: bool,
}

impl InnerNode {
    pub(crate) fn view(&self) -> InnerNodeView<'_> {
        InnerNodeView {
            prefix: &self.prefix,
            labels: &self.labels,
            all_the_same: self.all_the_same,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum TrieNode {
    Inner(InnerNode),
    Leaf(LeafBucket),
}

/// An in-memory trie index over k-mers, generic over the callback set that
/// partitions it.
pub struct Trie<O: RadixOps> {
    ops: O,
    options: TrieOptions,
    pub(crate) root: TrieNode,
    len: usize,
    next_payload: u64,
    stats: TrieStats,
}

impl<O: RadixOps> Trie<O> {
    /// Empty trie driven by `ops`.
    pub fn new(ops: O, options: TrieOptions) -> Self {
        Self {
            ops,
            options,
            root: TrieNode::Leaf(LeafBucket::default()),
            len: 0,
            next_payload: 0,
            stats: TrieStats::default(),
        }
    }

    /// Number of stored values (duplicates counted).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trie holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The callback set driving this trie.
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Point-in-time driver statistics.
    pub fn stats_snapshot(&self) -> TrieStatsSnapshot {
        self.stats.snapshot()
    }

    /// Insert one value; returns the opaque payload stored with it.
    pub fn insert(&mut self, value: &Kmer) -> Result<u64> {
        let payload = self.next_payload;
        Self::insert_node(
            &self.ops,
            &self.options,
            &self.stats,
            &mut self.root,
            value.as_bytes(),
            0,
            payload,
        )?;
        self.next_payload += 1;
        self.len += 1;
        tracing::trace!(
            target: "helicase_trie::insert",
            value = %value,
            payload,
            "stored value"
        );
        Ok(payload)
    }

    /// Collect every stored value satisfying all `predicates`, with its
    /// payload. Results come back in trie order.
    pub fn scan(&self, predicates: &[ScanPredicate]) -> Result<Vec<(Kmer, u64)>> {
        let mut out = Vec::new();
        self.scan_node(&self.root, predicates, &PathBuffer::new(), &mut out)?;
        Ok(out)
    }

    /// Payloads stored under exactly `value`.
    pub fn lookup(&self, value: &Kmer) -> Result<Vec<u64>> {
        let matches = self.scan(&[ScanPredicate::Equals(value.clone())])?;
        Ok(matches.into_iter().map(|(_, payload)| payload).collect())
    }

    /// Walk the whole tree and fail on the first broken invariant: label
    /// order, label/child arity, or a leaf that does not reconstruct to a
    /// valid k-mer.
    pub fn verify(&self) -> Result<()> {
        Self::verify_node(&self.root, &PathBuffer::new())
    }

    fn insert_node(
        ops: &O,
        options: &TrieOptions,
        stats: &TrieStats,
        node: &mut TrieNode,
        value: &[u8],
        level: usize,
        payload: u64,
    ) -> Result<()> {
        match node {
            TrieNode::Leaf(bucket) => {
                bucket.tuples.push(LeafTuple {
                    suffix: SmallVec::from_slice(&value[level..]),
                    payload,
                });
                if bucket.tuples.len() <= options.leaf_capacity.max(1) {
                    return Ok(());
                }
                let replacement = match Self::split_bucket(ops, options, stats, bucket) {
                    Ok(inner) => inner,
                    Err(HelicaseError::DegenerateBatch(reason)) => {
                        stats.inc_deferred_splits();
                        tracing::debug!(
                            target: "helicase_trie::insert",
                            reason,
                            "bulk split deferred on duplicate batch"
                        );
                        return Ok(());
                    }
                    Err(other) => return Err(other),
                };
                *node = TrieNode::Inner(replacement);
                Ok(())
            }
            TrieNode::Inner(inner) => {
                let action = ops.choose(&ChooseIn {
                    value,
                    level,
                    node: inner.view(),
                })?;
                match action {
                    ChooseAction::Descend { child, level_add } => {
                        stats.inc_descents();
                        Self::insert_node(
                            ops,
                            options,
                            stats,
                            &mut inner.children[child],
                            value,
                            level + level_add,
                            payload,
                        )
                    }
                    ChooseAction::AddChild { label, at } => {
                        stats.inc_child_adds();
                        inner.labels.insert(at, label);
                        inner.children.insert(at, TrieNode::Leaf(LeafBucket::default()));
                        let level_add = inner.prefix.len() + usize::from(label.byte().is_some());
                        Self::insert_node(
                            ops,
                            options,
                            stats,
                            &mut inner.children[at],
                            value,
                            level + level_add,
                            payload,
                        )
                    }
                    ChooseAction::SplitPrefix(plan) => {
                        stats.inc_prefix_splits();
                        // The stored subtree keeps its children under the
                        // shortened prefix; the value gets a fresh branch
                        // beside it.
                        let demoted = InnerNode {
                            prefix: plan.stored_rest.clone(),
                            labels: std::mem::take(&mut inner.labels),
                            children: std::mem::take(&mut inner.children),
                            all_the_same: inner.all_the_same,
                        };
                        let fresh = TrieNode::Leaf(LeafBucket::default());
                        let value_first = plan.value_label < plan.stored_label;
                        let (labels, children) = if value_first {
                            (
                                vec![plan.value_label, plan.stored_label],
                                vec![fresh, TrieNode::Inner(demoted)],
                            )
                        } else {
                            (
                                vec![plan.stored_label, plan.value_label],
                                vec![TrieNode::Inner(demoted), fresh],
                            )
                        };
                        inner.prefix.truncate(plan.common_len);
                        inner.labels = labels;
                        inner.children = children;
                        inner.all_the_same = false;
                        let at = usize::from(!value_first);
                        let level_add =
                            plan.common_len + usize::from(plan.value_label.byte().is_some());
                        Self::insert_node(
                            ops,
                            options,
                            stats,
                            &mut inner.children[at],
                            value,
                            level + level_add,
                            payload,
                        )
                    }
                    ChooseAction::SplitForDiversity { label } => {
                        stats.inc_diversity_splits();
                        let shared = match inner.labels.first() {
                            Some(&shared) => shared,
                            None => {
                                return Err(HelicaseError::InvariantViolation(
                                    "all-the-same tuple without children",
                                ))
                            }
                        };
                        // The equivalent children fold into one subtree under
                        // their real label; the widened tuple then tells the
                        // two labels apart.
                        let kept = if inner.children.len() == 1 {
                            std::mem::take(&mut inner.children)
                        } else {
                            let mut merged = LeafBucket::default();
                            for child in inner.children.drain(..) {
                                match child {
                                    TrieNode::Leaf(bucket) => merged.tuples.extend(bucket.tuples),
                                    TrieNode::Inner(_) => {
                                        return Err(HelicaseError::InvariantViolation(
                                            "equivalent all-the-same children must be leaf buckets",
                                        ))
                                    }
                                }
                            }
                            vec![TrieNode::Leaf(merged)]
                        };
                        let at = usize::from(label > shared);
                        inner.labels = vec![shared];
                        inner.children = kept;
                        inner.labels.insert(at, label);
                        inner
                            .children
                            .insert(at, TrieNode::Leaf(LeafBucket::default()));
                        inner.all_the_same = false;
                        let level_add = inner.prefix.len() + usize::from(label.byte().is_some());
                        Self::insert_node(
                            ops,
                            options,
                            stats,
                            &mut inner.children[at],
                            value,
                            level + level_add,
                            payload,
                        )
                    }
                }
            }
        }
    }

    /// Fan an overflowing bucket out through the bulk splitter, recursively
    /// splitting any child bucket that still overflows.
    fn split_bucket(
        ops: &O,
        options: &TrieOptions,
        stats: &TrieStats,
        bucket: &LeafBucket,
    ) -> Result<InnerNode> {
        let datums: Vec<&[u8]> = bucket
            .tuples
            .iter()
            .map(|tuple| tuple.suffix.as_slice())
            .collect();
        let PickSplitOut {
            prefix,
            labels,
            assignments,
            suffixes,
            all_the_same,
        } = ops.pick_split(&datums)?;
        stats.inc_bulk_splits();

        let mut buckets: Vec<LeafBucket> = vec![LeafBucket::default(); labels.len()];
        for ((tuple, target), suffix) in bucket.tuples.iter().zip(assignments).zip(suffixes) {
            buckets[target].tuples.push(LeafTuple {
                suffix,
                payload: tuple.payload,
            });
        }

        let mut children = Vec::with_capacity(buckets.len());
        for child in buckets {
            if child.tuples.len() > options.leaf_capacity.max(1) {
                match Self::split_bucket(ops, options, stats, &child) {
                    Ok(inner) => {
                        children.push(TrieNode::Inner(inner));
                        continue;
                    }
                    Err(HelicaseError::DegenerateBatch(reason)) => {
                        stats.inc_deferred_splits();
                        tracing::debug!(
                            target: "helicase_trie::insert",
                            reason,
                            "bulk split deferred on duplicate batch"
                        );
                    }
                    Err(other) => return Err(other),
                }
            }
            children.push(TrieNode::Leaf(child));
        }

        Ok(InnerNode {
            prefix,
            labels,
            children,
            all_the_same,
        })
    }

    fn scan_node(
        &self,
        node: &TrieNode,
        predicates: &[ScanPredicate],
        path: &PathBuffer,
        out: &mut Vec<(Kmer, u64)>,
    ) -> Result<()> {
        match node {
            TrieNode::Leaf(bucket) => {
                for tuple in &bucket.tuples {
                    let result = self.ops.leaf_consistent(&LeafConsistentIn {
                        predicates,
                        path,
                        suffix: &tuple.suffix,
                    })?;
                    if result.matches {
                        self.stats.inc_leaf_hits();
                        out.push((result.value, tuple.payload));
                    } else {
                        self.stats.inc_leaf_misses();
                    }
                }
                Ok(())
            }
            TrieNode::Inner(inner) => {
                let result = self.ops.inner_consistent(&InnerConsistentIn {
                    predicates,
                    path,
                    node: inner.view(),
                });
                self.stats
                    .add_inner_prunes((inner.labels.len() - result.visits.len()) as u64);
                for visit in result.visits {
                    self.scan_node(&inner.children[visit.child], predicates, &visit.path, out)?;
                }
                Ok(())
            }
        }
    }

    fn verify_node(node: &TrieNode, path: &PathBuffer) -> Result<()> {
        match node {
            TrieNode::Leaf(bucket) => {
                for tuple in &bucket.tuples {
                    let full = path.complete(&tuple.suffix);
                    Kmer::new(&full).map_err(|_| {
                        HelicaseError::InvariantViolation(
                            "stored leaf does not reconstruct to a valid k-mer",
                        )
                    })?;
                }
                Ok(())
            }
            TrieNode::Inner(inner) => {
                check_label_order(&inner.labels)?;
                if inner.labels.len() != inner.children.len() {
                    return Err(HelicaseError::InvariantViolation(
                        "label and child counts differ",
                    ));
                }
                if inner.labels.is_empty() {
                    return Err(HelicaseError::InvariantViolation(
                        "inner tuple without children",
                    ));
                }
                if inner.all_the_same && inner.labels.len() != 1 {
                    return Err(HelicaseError::InvariantViolation(
                        "all-the-same tuple must hold one label",
                    ));
                }
                for (label, child) in inner.labels.iter().zip(&inner.children) {
                    Self::verify_node(child, &path.descend(&inner.prefix, *label))?;
                }
                Ok(())
            }
        }
    }
}
