//! Scalar DNA types: validated k-mers, ambiguity patterns, and sequences.
//!
//! Everything here is pure data with no knowledge of the trie. The trie
//! callbacks consume these types through their byte views and the mask
//! predicates.

/// Bitmask alphabets and validation.
pub mod alphabet;

mod kmer;
mod qkmer;
mod sequence;

pub use alphabet::{
    complement, encode_ambiguity, encode_nucleotide, validate_kmer, validate_query_kmer,
    MAX_KMER_LEN,
};
pub use kmer::Kmer;
pub use qkmer::QueryKmer;
pub use sequence::{DnaSequence, KmerWindows};
