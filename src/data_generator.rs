//! Seeded random DNA datasets for tests and benchmarks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::dna::{DnaSequence, Kmer, QueryKmer};

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
const AMBIGUITY_CODES: [u8; 15] = [
    b'A', b'C', b'G', b'T', b'R', b'Y', b'S', b'W', b'K', b'M', b'B', b'D', b'H', b'V', b'N',
];

/// Deterministic generator of sequences, k-mers, and query patterns.
pub struct DataGenerator {
    rng: ChaCha8Rng,
}

impl DataGenerator {
    /// Generator with a fixed default seed.
    pub fn new() -> Self {
        Self::with_seed(0xFACE_FEED)
    }

    /// Generator seeded for reproducible datasets.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// One random base.
    pub fn base(&mut self) -> u8 {
        BASES[self.rng.gen_range(0..BASES.len())]
    }

    /// A random sequence of exactly `len` bases.
    pub fn sequence(&mut self, len: usize) -> DnaSequence {
        let bytes: Vec<u8> = (0..len).map(|_| self.base()).collect();
        DnaSequence::new(&bytes).expect("generated bases are always valid")
    }

    /// A random k-mer of exactly `len` bases (`len` must be at most 32).
    pub fn kmer(&mut self, len: usize) -> Kmer {
        let bytes: Vec<u8> = (0..len).map(|_| self.base()).collect();
        Kmer::new(&bytes).expect("generated bases are always valid")
    }

    /// `count` random k-mers with lengths drawn uniformly from `lengths`.
    pub fn kmers(
        &mut self,
        count: usize,
        lengths: std::ops::RangeInclusive<usize>,
    ) -> Vec<Kmer> {
        (0..count)
            .map(|_| {
                let len = self.rng.gen_range(lengths.clone());
                self.kmer(len)
            })
            .collect()
    }

    /// A random ambiguity pattern of exactly `len` positions.
    pub fn query_kmer(&mut self, len: usize) -> QueryKmer {
        let bytes: Vec<u8> = (0..len)
            .map(|_| AMBIGUITY_CODES[self.rng.gen_range(0..AMBIGUITY_CODES.len())])
            .collect();
        QueryKmer::new(&bytes).expect("generated codes are always valid")
    }

    /// Every window of length `k` from a fresh random sequence of `bases`
    /// bases, the way an indexing pipeline slides over a read.
    pub fn windows(&mut self, bases: usize, k: usize) -> Vec<Kmer> {
        let sequence = self.sequence(bases);
        sequence
            .kmers(k)
            .expect("window length is bounded by the caller")
            .collect()
    }
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}
