use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::dna::alphabet::{masks_compatible, validate_query_kmer};
use crate::dna::kmer::{Kmer, KmerBuf};
use crate::error::{HelicaseError, Result};

/// A k-mer-length pattern over the 15-symbol IUPAC ambiguity alphabet.
///
/// Containment is a positional compatibility test between equal-length
/// sequences, not a substring search: position `i` of the pattern must share
/// at least one base with position `i` of the candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryKmer {
    bytes: KmerBuf,
}

impl QueryKmer {
    /// Build a query k-mer from raw bytes, validating and uppercasing them.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        validate_query_kmer(bytes)?;
        Ok(Self {
            bytes: bytes.iter().map(u8::to_ascii_uppercase).collect(),
        })
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether this is the empty pattern.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw uppercase byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether `candidate` is contained by this pattern: lengths must be
    /// equal and every position mask-compatible.
    pub fn matches(&self, candidate: &Kmer) -> bool {
        self.bytes.len() == candidate.len()
            && masks_compatible(&self.bytes, candidate.as_bytes())
    }
}

impl fmt::Display for QueryKmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.bytes.iter() {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl FromStr for QueryKmer {
    type Err = HelicaseError;

    fn from_str(s: &str) -> Result<Self> {
        QueryKmer::new(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for QueryKmer {
    type Error = HelicaseError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        QueryKmer::new(bytes)
    }
}

impl From<Kmer> for QueryKmer {
    fn from(kmer: Kmer) -> Self {
        Self {
            bytes: SmallVec::from_slice(kmer.as_bytes()),
        }
    }
}
