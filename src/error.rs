//! Crate-wide error taxonomy.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HelicaseError>;

/// Errors surfaced by the scalar types and the trie callbacks.
///
/// Alphabet and length errors are raised at validation boundaries, before
/// any trie structure is touched. `InvariantViolation` is fatal: it reports
/// a bug in the index machinery, never a user-facing condition.
#[derive(Debug, Error)]
pub enum HelicaseError {
    /// Input byte outside the allowed alphabet for the context.
    #[error("invalid character {found:?} for the {alphabet} alphabet")]
    InvalidCharacter {
        /// The offending byte, as read.
        found: char,
        /// Alphabet that rejected it (`"nucleotide"` or `"ambiguity"`).
        alphabet: &'static str,
    },
    /// Input longer than the maximum k-mer length.
    #[error("length {0} exceeds the maximum k-mer length of 32")]
    LengthExceeded(usize),
    /// A bulk split was handed a batch it cannot partition.
    #[error("degenerate batch: {0}")]
    DegenerateBatch(&'static str),
    /// A node-model invariant is broken.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}
