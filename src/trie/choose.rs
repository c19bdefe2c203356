//! The insertion planner: one verdict per level of a descent.

use smallvec::SmallVec;

use crate::dna::alphabet::nucleotide_mask;
use crate::dna::MAX_KMER_LEN;
use crate::error::{HelicaseError, Result};
use crate::trie::node::{common_prefix_len, find_label, InnerNodeView, NodeLabel};

type Bytes = SmallVec<[u8; MAX_KMER_LEN]>;

/// Arguments for one planner invocation at one level.
#[derive(Debug, Clone, Copy)]
pub struct ChooseIn<'a> {
    /// Full value being inserted (raw uppercase bytes).
    pub value: &'a [u8],
    /// Bytes of `value` already consumed by ancestor levels.
    pub level: usize,
    /// The inner tuple the descent has reached.
    pub node: InnerNodeView<'a>,
}

/// Planner verdict for one level. The host applies the action to storage and
/// either continues the descent or retries the same tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooseAction {
    /// Continue into child `child`; the descent consumes `level_add` bytes.
    Descend {
        /// Position of the matched label.
        child: usize,
        /// Prefix length plus one when the label carries a byte.
        level_add: usize,
    },
    /// Insert a new empty child labeled `label` at position `at`, then
    /// re-run the descent against the widened tuple.
    AddChild {
        /// Label for the new child.
        label: NodeLabel,
        /// Sorted insertion position among the existing labels.
        at: usize,
    },
    /// The value disagrees with the stored prefix before either ends:
    /// rebuild this tuple around the shared part and fan out both sides.
    SplitPrefix(PrefixSplit),
    /// Every child carries one shared label and the value needs another:
    /// the host keeps the stored children under their real label and
    /// re-runs the descent against a tuple that now tells the two apart.
    SplitForDiversity {
        /// Label the incoming value needs.
        label: NodeLabel,
    },
}

/// Replacement plan for a tuple whose prefix diverges from the value.
///
/// The rebuilt tuple keeps `common_len` prefix bytes and exactly two
/// children: `stored_label` routes to the demoted stored subtree (which
/// keeps `stored_rest` as its prefix), `value_label` routes to the fresh
/// branch the insertion descends into. The two labels always differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSplit {
    /// Bytes of the stored prefix that remain shared.
    pub common_len: usize,
    /// Label routing to the demoted stored subtree.
    pub stored_label: NodeLabel,
    /// Prefix the demoted subtree keeps: the stored prefix past the label.
    pub stored_rest: Bytes,
    /// Label routing to the incoming value's branch.
    pub value_label: NodeLabel,
}

/// Decide what the host must do with `value` at this tuple.
///
/// Values reaching the planner were validated at parse time; a stray byte
/// here is a broken contract, not recoverable input.
pub(crate) fn choose(args: &ChooseIn<'_>) -> Result<ChooseAction> {
    if args.level > args.value.len() {
        return Err(HelicaseError::InvariantViolation(
            "descent level beyond value length",
        ));
    }
    let tail = &args.value[args.level..];
    let prefix = args.node.prefix;
    let common = common_prefix_len(tail, prefix);

    if common < prefix.len() {
        let stored_label = NodeLabel::Byte(prefix[common]);
        let value_label = label_at(tail, common)?;
        tracing::trace!(
            target: "helicase_trie::choose",
            level = args.level,
            common,
            prefix_len = prefix.len(),
            "prefix diverges, splitting tuple"
        );
        return Ok(ChooseAction::SplitPrefix(PrefixSplit {
            common_len: common,
            stored_label,
            stored_rest: SmallVec::from_slice(&prefix[common + 1..]),
            value_label,
        }));
    }

    let label = label_at(tail, prefix.len())?;
    match find_label(args.node.labels, label) {
        Ok(child) => {
            let level_add = prefix.len() + usize::from(label.byte().is_some());
            tracing::trace!(
                target: "helicase_trie::choose",
                level = args.level,
                child,
                level_add,
                "descending into matching child"
            );
            Ok(ChooseAction::Descend { child, level_add })
        }
        Err(at) if !args.node.all_the_same => {
            tracing::trace!(
                target: "helicase_trie::choose",
                level = args.level,
                at,
                "no matching child, adding one"
            );
            Ok(ChooseAction::AddChild { label, at })
        }
        Err(_) => {
            tracing::trace!(
                target: "helicase_trie::choose",
                level = args.level,
                "all children share one label, splitting for diversity"
            );
            Ok(ChooseAction::SplitForDiversity { label })
        }
    }
}

/// Label for the value tail at `offset`, verifying the byte is a validated
/// nucleotide.
fn label_at(tail: &[u8], offset: usize) -> Result<NodeLabel> {
    match tail.get(offset) {
        None => Ok(NodeLabel::End),
        Some(&byte) if nucleotide_mask(byte) != 0 => Ok(NodeLabel::Byte(byte)),
        Some(_) => Err(HelicaseError::InvariantViolation(
            "unvalidated byte reached the insertion planner",
        )),
    }
}
