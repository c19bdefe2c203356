#![allow(missing_docs)]

use helicase::dna::{DnaSequence, Kmer, QueryKmer};
use helicase::{HelicaseError, Result};

#[test]
fn kmer_text_io_round_trips() -> Result<()> {
    for text in ["", "A", "ACGT", "GATTACA", "TTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTT"] {
        let kmer: Kmer = text.parse()?;
        assert_eq!(kmer.to_string(), text);
        assert_eq!(kmer.len(), text.len());
    }
    Ok(())
}

#[test]
fn kmer_input_is_case_insensitive() -> Result<()> {
    let lower: Kmer = "gattaca".parse()?;
    let upper: Kmer = "GATTACA".parse()?;
    assert_eq!(lower, upper);
    assert_eq!(lower.to_string(), "GATTACA");
    Ok(())
}

#[test]
fn kmer_rejects_bad_input() {
    assert!(matches!(
        "ACGU".parse::<Kmer>(),
        Err(HelicaseError::InvalidCharacter { found: 'U', .. })
    ));
    assert!(matches!(
        "A".repeat(33).parse::<Kmer>(),
        Err(HelicaseError::LengthExceeded(33))
    ));
}

#[test]
fn query_kmer_accepts_the_ambiguity_alphabet_only() -> Result<()> {
    let pattern: QueryKmer = "nrywsmkbdhvACGT".parse()?;
    assert_eq!(pattern.to_string(), "NRYWSMKBDHVACGT");
    assert!(matches!(
        "NRQ".parse::<QueryKmer>(),
        Err(HelicaseError::InvalidCharacter { found: 'Q', .. })
    ));
    Ok(())
}

#[test]
fn reverse_complement_and_canonical_laws_hold() -> Result<()> {
    // GAT reverse-complements to ATC, which is the canonical strand
    let kmer: Kmer = "GAT".parse()?;
    assert_eq!(kmer.reverse_complement().to_string(), "ATC");
    assert_eq!(kmer.canonical().to_string(), "ATC");

    for text in ["A", "AT", "GATTACA", "CCCCGGGG", ""] {
        let kmer: Kmer = text.parse()?;
        // double reverse complement restores the strand
        assert_eq!(kmer.reverse_complement().reverse_complement(), kmer);
        // canonical form is shared by both strands and stable
        let canon = kmer.canonical();
        assert_eq!(canon.canonical(), canon);
        assert_eq!(kmer.reverse_complement().canonical(), canon);
        assert!(canon <= kmer);
    }
    Ok(())
}

#[test]
fn palindromic_kmers_are_their_own_canonical_form() -> Result<()> {
    // ACGT's reverse complement is ACGT itself
    let kmer: Kmer = "ACGT".parse()?;
    assert_eq!(kmer.reverse_complement(), kmer);
    assert_eq!(kmer.canonical(), kmer);
    Ok(())
}

#[test]
fn pattern_containment_is_positional() -> Result<()> {
    let pattern: QueryKmer = "NRYW".parse()?;
    // N/A passes but R = {A, G} cannot cover C
    assert!(!pattern.matches(&"ACGT".parse()?));
    assert!(pattern.matches(&"AACT".parse()?));
    assert!(pattern.matches(&"GGTA".parse()?));
    // no substring semantics: length must match exactly
    assert!(!pattern.matches(&"AAC".parse()?));
    assert!(!pattern.matches(&"AACTA".parse()?));
    Ok(())
}

#[test]
fn sequences_window_into_kmers() -> Result<()> {
    let sequence: DnaSequence = "ACGTACGTAC".parse()?;
    let windows: Vec<Kmer> = sequence.kmers(4)?.collect();
    assert_eq!(windows.len(), 7);
    assert_eq!(windows.first().map(Kmer::to_string).as_deref(), Some("ACGT"));
    assert_eq!(windows.last().map(Kmer::to_string).as_deref(), Some("GTAC"));

    // every window is a substring match of the source
    for (offset, window) in sequence.kmers(4)?.enumerate() {
        assert_eq!(window.as_bytes(), &sequence.as_bytes()[offset..offset + 4]);
    }
    Ok(())
}

#[test]
fn sequence_accepts_lengths_a_kmer_cannot() -> Result<()> {
    let text = "ACGT".repeat(100);
    let sequence: DnaSequence = text.parse()?;
    assert_eq!(sequence.len(), 400);
    assert!(matches!(
        Kmer::new(sequence.as_bytes()),
        Err(HelicaseError::LengthExceeded(400))
    ));
    // but its windows are all indexable
    assert_eq!(sequence.kmers(32)?.count(), 369);
    Ok(())
}

#[test]
fn error_messages_name_the_problem() {
    let err = "ACGTX".parse::<Kmer>().unwrap_err();
    assert!(err.to_string().contains("invalid character"));
    let err = "A".repeat(40).parse::<Kmer>().unwrap_err();
    assert!(err.to_string().contains("maximum k-mer length"));
}
