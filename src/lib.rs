//! K-mer scalar types and the radix-trie index callbacks that partition
//! them inside a host storage engine.
//!
//! The crate has two halves. [`dna`] holds the validated scalar types:
//! [`Kmer`] over {A, C, G, T}, [`QueryKmer`] over the 15-symbol IUPAC
//! ambiguity alphabet, and [`DnaSequence`] with its sliding k-mer windows.
//! [`trie`] holds the index machinery: the four space-partitioned callbacks
//! (`choose`, `pick_split`, `inner_consistent`, `leaf_consistent`) behind
//! the [`trie::RadixOps`] trait, and an in-memory [`trie::Trie`] driver that
//! hosts them for tests and benchmarks. A real storage engine supplies its
//! own paged driver and calls the same trait.

#![warn(missing_docs)]

pub mod data_generator;
pub mod dna;
pub mod error;
pub mod trie;

pub use dna::{DnaSequence, Kmer, QueryKmer, MAX_KMER_LEN};
pub use error::{HelicaseError, Result};
