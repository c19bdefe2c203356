use std::fmt;
use std::str::FromStr;

use crate::dna::alphabet::{encode_nucleotide, MAX_KMER_LEN};
use crate::dna::kmer::Kmer;
use crate::error::{HelicaseError, Result};

/// An arbitrary-length validated DNA string, the source material k-mers are
/// windowed out of. Unlike [`Kmer`] there is no length bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DnaSequence {
    bytes: Vec<u8>,
}

impl DnaSequence {
    /// Build a sequence from raw bytes, validating and uppercasing them.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        for &byte in bytes {
            encode_nucleotide(byte)?;
        }
        Ok(Self {
            bytes: bytes.iter().map(u8::to_ascii_uppercase).collect(),
        })
    }

    /// Number of bases.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the sequence holds no bases.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw uppercase byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Iterate over the length-`k` windows of this sequence, yielding
    /// `len() - k + 1` k-mers when `k` is in `1..=len()` and nothing
    /// otherwise. `k` above the k-mer bound is an error.
    pub fn kmers(&self, k: usize) -> Result<KmerWindows<'_>> {
        if k > MAX_KMER_LEN {
            return Err(HelicaseError::LengthExceeded(k));
        }
        Ok(KmerWindows {
            bytes: &self.bytes,
            k,
            pos: 0,
        })
    }
}

impl fmt::Display for DnaSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bytes {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl FromStr for DnaSequence {
    type Err = HelicaseError;

    fn from_str(s: &str) -> Result<Self> {
        DnaSequence::new(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for DnaSequence {
    type Error = HelicaseError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        DnaSequence::new(bytes)
    }
}

/// Lazy, restartable iterator over the k-length windows of a sequence.
///
/// Index-driven: cloning restarts nothing and no state survives beyond the
/// current position.
#[derive(Debug, Clone)]
pub struct KmerWindows<'a> {
    bytes: &'a [u8],
    k: usize,
    pos: usize,
}

impl<'a> KmerWindows<'a> {
    fn remaining(&self) -> usize {
        if self.k == 0 || self.pos + self.k > self.bytes.len() {
            0
        } else {
            self.bytes.len() - self.k - self.pos + 1
        }
    }
}

impl<'a> Iterator for KmerWindows<'a> {
    type Item = Kmer;

    fn next(&mut self) -> Option<Kmer> {
        if self.remaining() == 0 {
            return None;
        }
        let window = &self.bytes[self.pos..self.pos + self.k];
        self.pos += 1;
        Some(Kmer::from_validated(window))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for KmerWindows<'a> {}
