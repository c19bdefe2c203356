//! The query evaluator pair: prune children during a descent, then run the
//! exact tests at the leaves.

use crate::dna::alphabet::masks_compatible;
use crate::dna::{Kmer, QueryKmer};
use crate::error::{HelicaseError, Result};
use crate::trie::node::InnerNodeView;
use crate::trie::reconstruct::PathBuffer;

/// One search condition. A scan passes a slice of these; a child or leaf
/// must satisfy every one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanPredicate {
    /// Byte-exact equality with a stored k-mer.
    Equals(Kmer),
    /// Stored k-mer begins with the given k-mer.
    StartsWith(Kmer),
    /// Stored k-mer is contained by the ambiguity pattern.
    Contains(QueryKmer),
}

/// Arguments for one inner-tuple visit during a scan.
#[derive(Debug, Clone, Copy)]
pub struct InnerConsistentIn<'a> {
    /// The scan's predicates, tested conjunctively.
    pub predicates: &'a [ScanPredicate],
    /// Reconstruction of the path into this tuple; its length is the level.
    pub path: &'a PathBuffer,
    /// The tuple being visited.
    pub node: InnerNodeView<'a>,
}

/// A child that survived pruning, with the reconstruction the host threads
/// back in when it recurses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildVisit {
    /// Position of the surviving label.
    pub child: usize,
    /// Reconstruction extended by the tuple's prefix and the child's label.
    pub path: PathBuffer,
}

/// Children worth visiting, in label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InnerConsistentOut {
    /// Surviving children with their extended reconstructions.
    pub visits: Vec<ChildVisit>,
}

/// Decide which children of this tuple may still hold matches.
///
/// Each test is tentative: a surviving child only promises that nothing seen
/// so far rules it out. The exact decision happens at the leaves.
pub(crate) fn inner_consistent(args: &InnerConsistentIn<'_>) -> InnerConsistentOut {
    let mut visits = Vec::with_capacity(args.node.labels.len());
    for (child, &label) in args.node.labels.iter().enumerate() {
        let path = args.path.descend(args.node.prefix, label);
        if args
            .predicates
            .iter()
            .all(|predicate| child_may_match(predicate, path.as_bytes()))
        {
            visits.push(ChildVisit { child, path });
        } else {
            tracing::trace!(
                target: "helicase_trie::scan",
                level = args.path.level(),
                child,
                "pruned child"
            );
        }
    }
    InnerConsistentOut { visits }
}

/// Tentative test of one predicate against a partial reconstruction.
fn child_may_match(predicate: &ScanPredicate, reconstructed: &[u8]) -> bool {
    match predicate {
        ScanPredicate::Equals(query) => {
            let query = query.as_bytes();
            let shared = reconstructed.len().min(query.len());
            // excess query length is fine for now; excess reconstruction
            // can never equalize again
            reconstructed[..shared] == query[..shared] && query.len() >= reconstructed.len()
        }
        ScanPredicate::StartsWith(prefix) => {
            let prefix = prefix.as_bytes();
            let shared = reconstructed.len().min(prefix.len());
            reconstructed[..shared] == prefix[..shared]
        }
        ScanPredicate::Contains(pattern) => {
            let pattern = pattern.as_bytes();
            if reconstructed.len() > pattern.len() {
                return false;
            }
            if reconstructed.len() < pattern.len() {
                // the mask test runs once the reconstruction is complete
                return true;
            }
            masks_compatible(pattern, reconstructed)
        }
    }
}

/// Arguments for the final test at one leaf tuple.
#[derive(Debug, Clone, Copy)]
pub struct LeafConsistentIn<'a> {
    /// The scan's predicates, tested conjunctively.
    pub predicates: &'a [ScanPredicate],
    /// Reconstruction of the path into the leaf's parent.
    pub path: &'a PathBuffer,
    /// The leaf's stored suffix.
    pub suffix: &'a [u8],
}

/// Outcome of one leaf test. Every test here is exact; the host never has to
/// recheck against the raw stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafConsistentOut {
    /// Whether every predicate holds.
    pub matches: bool,
    /// The fully reconstructed stored value.
    pub value: Kmer,
}

/// Reconstruct the leaf's full value and run the exact predicate tests.
pub(crate) fn leaf_consistent(args: &LeafConsistentIn<'_>) -> Result<LeafConsistentOut> {
    let full = args.path.complete(args.suffix);
    let value = Kmer::new(&full).map_err(|_| {
        HelicaseError::InvariantViolation("leaf reconstruction produced an invalid k-mer")
    })?;
    let matches = args
        .predicates
        .iter()
        .all(|predicate| leaf_matches(predicate, &value));
    Ok(LeafConsistentOut { matches, value })
}

fn leaf_matches(predicate: &ScanPredicate, value: &Kmer) -> bool {
    match predicate {
        ScanPredicate::Equals(query) => value == query,
        ScanPredicate::StartsWith(prefix) => value.starts_with(prefix),
        ScanPredicate::Contains(pattern) => pattern.matches(value),
    }
}
