use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::dna::alphabet::{complement_validated, validate_kmer, MAX_KMER_LEN};
use crate::error::{HelicaseError, Result};

pub(crate) type KmerBuf = SmallVec<[u8; MAX_KMER_LEN]>;

/// A validated DNA substring of at most 32 bases.
///
/// Stored uppercase; equality and ordering are byte-wise, which makes the
/// lexicographic order of `Kmer`s identical to the byte order the trie
/// partitions on.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kmer {
    bytes: KmerBuf,
}

impl Kmer {
    /// Build a k-mer from raw bytes, validating and uppercasing them.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        validate_kmer(bytes)?;
        Ok(Self {
            bytes: bytes.iter().map(u8::to_ascii_uppercase).collect(),
        })
    }

    /// Build a k-mer from bytes already validated and uppercased.
    pub(crate) fn from_validated(bytes: &[u8]) -> Self {
        debug_assert!(validate_kmer(bytes).is_ok());
        Self {
            bytes: SmallVec::from_slice(bytes),
        }
    }

    /// Number of bases.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether this is the empty k-mer.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw uppercase byte sequence (the index wire format).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether this k-mer begins with `prefix`.
    pub fn starts_with(&self, prefix: &Kmer) -> bool {
        self.bytes.starts_with(&prefix.bytes)
    }

    /// The reverse complement: bases reversed, each swapped with its
    /// Watson–Crick partner.
    pub fn reverse_complement(&self) -> Kmer {
        let bytes = self
            .bytes
            .iter()
            .rev()
            .map(|&b| complement_validated(b))
            .collect();
        Kmer { bytes }
    }

    /// The canonical form: the lexicographically smaller of this k-mer and
    /// its reverse complement. Ties keep the original, so the operation is
    /// idempotent.
    pub fn canonical(&self) -> Kmer {
        let rc = self.reverse_complement();
        if rc.bytes < self.bytes {
            rc
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.bytes.iter() {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl FromStr for Kmer {
    type Err = HelicaseError;

    fn from_str(s: &str) -> Result<Self> {
        Kmer::new(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for Kmer {
    type Error = HelicaseError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Kmer::new(bytes)
    }
}

impl AsRef<[u8]> for Kmer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
