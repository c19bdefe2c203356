//! Bitmask encodings for the nucleotide and IUPAC ambiguity alphabets.
//!
//! Every base maps to a one-hot 4-bit mask and every ambiguity code to the
//! union of the masks it stands for, so pattern compatibility is a single
//! `&` per position.

use crate::error::{HelicaseError, Result};

/// Maximum length of a k-mer or query k-mer, in bases.
pub const MAX_KMER_LEN: usize = 32;

/// One-hot mask for adenine.
pub const MASK_A: u8 = 0b0001;
/// One-hot mask for cytosine.
pub const MASK_C: u8 = 0b0010;
/// One-hot mask for guanine.
pub const MASK_G: u8 = 0b0100;
/// One-hot mask for thymine.
pub const MASK_T: u8 = 0b1000;

/// Mask for a concrete nucleotide byte, or 0 when the byte is not one.
/// Case-insensitive.
pub(crate) fn nucleotide_mask(byte: u8) -> u8 {
    match byte.to_ascii_uppercase() {
        b'A' => MASK_A,
        b'C' => MASK_C,
        b'G' => MASK_G,
        b'T' => MASK_T,
        _ => 0,
    }
}

/// Mask for an IUPAC code byte, or 0 when the byte is not one.
/// Case-insensitive. The 15 valid codes are the four bases plus the eleven
/// multi-base unions (R, Y, S, W, K, M, B, D, H, V, N).
pub(crate) fn ambiguity_mask(byte: u8) -> u8 {
    match byte.to_ascii_uppercase() {
        b'A' => MASK_A,
        b'C' => MASK_C,
        b'G' => MASK_G,
        b'T' => MASK_T,
        b'R' => MASK_A | MASK_G,
        b'Y' => MASK_C | MASK_T,
        b'S' => MASK_C | MASK_G,
        b'W' => MASK_A | MASK_T,
        b'K' => MASK_G | MASK_T,
        b'M' => MASK_A | MASK_C,
        b'B' => MASK_C | MASK_G | MASK_T,
        b'D' => MASK_A | MASK_G | MASK_T,
        b'H' => MASK_A | MASK_C | MASK_T,
        b'V' => MASK_A | MASK_C | MASK_G,
        b'N' => MASK_A | MASK_C | MASK_G | MASK_T,
        _ => 0,
    }
}

/// Encode a concrete nucleotide byte as its one-hot mask.
pub fn encode_nucleotide(byte: u8) -> Result<u8> {
    match nucleotide_mask(byte) {
        0 => Err(HelicaseError::InvalidCharacter {
            found: byte as char,
            alphabet: "nucleotide",
        }),
        mask => Ok(mask),
    }
}

/// Encode an IUPAC code byte as its union mask.
pub fn encode_ambiguity(byte: u8) -> Result<u8> {
    match ambiguity_mask(byte) {
        0 => Err(HelicaseError::InvalidCharacter {
            found: byte as char,
            alphabet: "ambiguity",
        }),
        mask => Ok(mask),
    }
}

/// Watson–Crick complement of a concrete nucleotide byte (uppercase result).
/// Ambiguity codes are not legal here.
pub fn complement(byte: u8) -> Result<u8> {
    match byte.to_ascii_uppercase() {
        b'A' => Ok(b'T'),
        b'T' => Ok(b'A'),
        b'C' => Ok(b'G'),
        b'G' => Ok(b'C'),
        _ => Err(HelicaseError::InvalidCharacter {
            found: byte as char,
            alphabet: "nucleotide",
        }),
    }
}

/// Complement for bytes already known to be valid nucleotides.
/// Unknown bytes pass through unchanged; callers uphold validity.
pub(crate) fn complement_validated(byte: u8) -> u8 {
    match byte {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        other => other,
    }
}

/// Positional mask compatibility of an ambiguity pattern against concrete
/// bases. Both slices must already be validated and of equal length.
pub(crate) fn masks_compatible(pattern: &[u8], candidate: &[u8]) -> bool {
    pattern
        .iter()
        .zip(candidate)
        .all(|(&p, &c)| ambiguity_mask(p) & nucleotide_mask(c) != 0)
}

/// Check that `bytes` is a legal k-mer: at most [`MAX_KMER_LEN`] concrete
/// nucleotides, case-insensitive.
pub fn validate_kmer(bytes: &[u8]) -> Result<()> {
    if bytes.len() > MAX_KMER_LEN {
        return Err(HelicaseError::LengthExceeded(bytes.len()));
    }
    for &byte in bytes {
        encode_nucleotide(byte)?;
    }
    Ok(())
}

/// Check that `bytes` is a legal query k-mer: at most [`MAX_KMER_LEN`]
/// IUPAC codes, case-insensitive.
pub fn validate_query_kmer(bytes: &[u8]) -> Result<()> {
    if bytes.len() > MAX_KMER_LEN {
        return Err(HelicaseError::LengthExceeded(bytes.len()));
    }
    for &byte in bytes {
        encode_ambiguity(byte)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nucleotide_masks_are_one_hot() {
        for byte in [b'A', b'C', b'G', b'T'] {
            let mask = encode_nucleotide(byte).unwrap();
            assert_eq!(mask.count_ones(), 1);
        }
    }

    #[test]
    fn nucleotide_masks_are_distinct() {
        let masks: Vec<u8> = b"ACGT"
            .iter()
            .map(|&b| encode_nucleotide(b).unwrap())
            .collect();
        assert_eq!(masks.iter().fold(0u8, |acc, m| acc | m), 0b1111);
    }

    #[test]
    fn lowercase_accepted() {
        assert_eq!(
            encode_nucleotide(b'a').unwrap(),
            encode_nucleotide(b'A').unwrap()
        );
        assert_eq!(
            encode_ambiguity(b'n').unwrap(),
            encode_ambiguity(b'N').unwrap()
        );
    }

    #[test]
    fn n_covers_every_base() {
        let n = encode_ambiguity(b'N').unwrap();
        for &b in b"ACGT" {
            assert_ne!(n & encode_nucleotide(b).unwrap(), 0);
        }
    }

    #[test]
    fn ambiguity_alphabet_has_fifteen_codes() {
        let valid: Vec<u8> = (0u8..=255)
            .filter(|&b| b.is_ascii_uppercase() && ambiguity_mask(b) != 0)
            .collect();
        assert_eq!(valid.len(), 15);
    }

    #[test]
    fn invalid_bytes_rejected() {
        assert!(matches!(
            encode_nucleotide(b'N'),
            Err(HelicaseError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            encode_ambiguity(b'X'),
            Err(HelicaseError::InvalidCharacter { .. })
        ));
        assert!(complement(b'N').is_err());
    }

    #[test]
    fn complement_is_an_involution() {
        for &b in b"ACGT" {
            assert_eq!(complement(complement(b).unwrap()).unwrap(), b);
        }
    }

    #[test]
    fn length_bound_enforced() {
        let long = vec![b'A'; MAX_KMER_LEN + 1];
        assert!(matches!(
            validate_kmer(&long),
            Err(HelicaseError::LengthExceeded(33))
        ));
        assert!(validate_kmer(&long[..MAX_KMER_LEN]).is_ok());
        assert!(validate_query_kmer(&long).is_err());
    }
}
