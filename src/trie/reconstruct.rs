use smallvec::SmallVec;

use crate::dna::MAX_KMER_LEN;
use crate::trie::node::NodeLabel;

/// Root-to-node reconstruction of the bytes a descent has consumed.
///
/// Concatenates ancestor prefixes and labels in order; its length always
/// equals the level of the node it describes, so the level never needs to be
/// threaded separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuffer {
    bytes: SmallVec<[u8; MAX_KMER_LEN]>,
}

impl PathBuffer {
    /// Empty buffer for a descent starting at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer seeded with bytes the host already reconstructed.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: SmallVec::from_slice(bytes),
        }
    }

    /// The level this buffer describes.
    pub fn level(&self) -> usize {
        self.bytes.len()
    }

    /// The reconstructed bytes so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Extended buffer for entering a child: the tuple's prefix, then the
    /// label byte (terminators consume nothing).
    pub fn descend(&self, prefix: &[u8], label: NodeLabel) -> PathBuffer {
        let mut bytes = self.bytes.clone();
        bytes.extend_from_slice(prefix);
        if let Some(byte) = label.byte() {
            bytes.push(byte);
        }
        PathBuffer { bytes }
    }

    /// Full value bytes for a leaf holding `suffix` under this path.
    pub fn complete(&self, suffix: &[u8]) -> SmallVec<[u8; MAX_KMER_LEN]> {
        let mut bytes = self.bytes.clone();
        bytes.extend_from_slice(suffix);
        bytes
    }
}
