//! The bulk splitter: fan a colliding batch of values out into labeled
//! child buckets under a shared prefix.

use smallvec::SmallVec;

use crate::dna::alphabet::nucleotide_mask;
use crate::dna::MAX_KMER_LEN;
use crate::error::{HelicaseError, Result};
use crate::trie::node::{check_label_order, common_prefix_len, NodeLabel};

type Bytes = SmallVec<[u8; MAX_KMER_LEN]>;

/// Result of partitioning one batch.
///
/// `assignments` and `suffixes` are indexed by input position, so the host
/// can move each tuple without reordering the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickSplitOut {
    /// Shared prefix of the rebuilt tuple (possibly capped by the host's
    /// page bound).
    pub prefix: Bytes,
    /// Distinct child labels, strictly ascending.
    pub labels: Vec<NodeLabel>,
    /// Child index for each input value.
    pub assignments: Vec<usize>,
    /// Leaf suffix for each input value: the bytes strictly after the
    /// prefix and the label byte.
    pub suffixes: Vec<Bytes>,
    /// Whether the output is a single capped-prefix bucket whose values
    /// still share more bytes than the cap allowed.
    pub all_the_same: bool,
}

/// Partition `values` by the byte following their common prefix.
///
/// The prefix is the `min`-fold of pairwise common prefixes, capped at
/// `max_prefix_len` (a page-capacity bound supplied by the host). Values are
/// stable-sorted by label, so equal labels stay in input order and the label
/// run comes out ascending.
pub(crate) fn pick_split(values: &[&[u8]], max_prefix_len: usize) -> Result<PickSplitOut> {
    let first = match values.first() {
        Some(first) => *first,
        None => return Err(HelicaseError::DegenerateBatch("empty batch")),
    };

    let mut common = first.len();
    for value in &values[1..] {
        common = common.min(common_prefix_len(first, value));
    }
    let capped = common.min(max_prefix_len);

    let mut order: Vec<(NodeLabel, usize)> = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        order.push((label_for(value, capped)?, index));
    }
    order.sort_by_key(|(label, _)| *label);

    let mut labels: Vec<NodeLabel> = Vec::new();
    let mut assignments = vec![0usize; values.len()];
    let mut suffixes: Vec<Bytes> = vec![Bytes::new(); values.len()];
    for (label, index) in order {
        if labels.last() != Some(&label) {
            labels.push(label);
        }
        assignments[index] = labels.len() - 1;
        let cut = capped + usize::from(label.byte().is_some());
        suffixes[index] = SmallVec::from_slice(&values[index][cut..]);
    }

    let all_the_same = if values.len() > 1 && labels.len() < 2 {
        match labels[0] {
            // every value ends at the shared prefix: the batch is one value
            // repeated, which no partition can tell apart
            NodeLabel::End => {
                return Err(HelicaseError::DegenerateBatch(
                    "batch holds a single value repeated",
                ))
            }
            // the cap truncated a longer shared run
            NodeLabel::Byte(_) => true,
        }
    } else {
        false
    };

    check_label_order(&labels)?;
    tracing::trace!(
        target: "helicase_trie::picksplit",
        tuples = values.len(),
        prefix_len = capped,
        children = labels.len(),
        all_the_same,
        "partitioned batch"
    );

    Ok(PickSplitOut {
        prefix: SmallVec::from_slice(&first[..capped]),
        labels,
        assignments,
        suffixes,
        all_the_same,
    })
}

fn label_for(value: &[u8], offset: usize) -> Result<NodeLabel> {
    match value.get(offset) {
        None => Ok(NodeLabel::End),
        Some(&byte) if nucleotide_mask(byte) != 0 => Ok(NodeLabel::Byte(byte)),
        Some(_) => Err(HelicaseError::InvariantViolation(
            "unvalidated byte reached the bulk splitter",
        )),
    }
}
