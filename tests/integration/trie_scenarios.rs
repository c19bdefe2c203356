#![allow(missing_docs)]

use std::collections::BTreeMap;

use helicase::data_generator::DataGenerator;
use helicase::dna::{Kmer, QueryKmer};
use helicase::trie::{KmerRadix, RadixOps, RadixOptions, ScanPredicate, Trie, TrieOptions};
use helicase::Result;

fn kmer(text: &str) -> Kmer {
    text.parse().expect("test k-mer")
}

fn trie(leaf_capacity: usize, max_prefix_len: usize) -> Trie<KmerRadix> {
    Trie::new(
        KmerRadix::new(RadixOptions { max_prefix_len }),
        TrieOptions { leaf_capacity },
    )
}

fn sorted_texts(results: &[(Kmer, u64)]) -> Vec<String> {
    let mut texts: Vec<String> = results.iter().map(|(value, _)| value.to_string()).collect();
    texts.sort();
    texts
}

#[test]
fn config_advertises_value_reconstruction() {
    let ops = KmerRadix::default();
    let config = ops.config();
    assert!(config.can_return_data, "scans must not need the base data");
    assert!(!config.long_values_ok);
}

#[test]
fn mixed_workload_round_trips_every_value() -> Result<()> {
    let mut index = trie(8, 32);
    let mut generator = DataGenerator::with_seed(0xBADC_0FFE);
    let mut reference: BTreeMap<String, Vec<u64>> = BTreeMap::new();

    for value in generator.kmers(1_000, 1..=32) {
        let payload = index.insert(&value)?;
        reference.entry(value.to_string()).or_default().push(payload);
    }
    index.verify()?;
    assert_eq!(index.len(), 1_000);

    for (text, payloads) in &reference {
        let mut found = index.lookup(&kmer(text))?;
        found.sort_unstable();
        assert_eq!(&found, payloads, "value {text:?}");
    }
    Ok(())
}

#[test]
fn windowed_reads_are_queryable_by_prefix() -> Result<()> {
    let mut index = trie(16, 32);
    let mut generator = DataGenerator::with_seed(0x5EED);
    let windows = generator.windows(400, 12);
    for window in &windows {
        index.insert(window)?;
    }
    assert_eq!(index.len(), 389);

    let probe = &windows[17];
    let prefix = Kmer::new(&probe.as_bytes()[..6])?;
    let found = index.scan(&[ScanPredicate::StartsWith(prefix.clone())])?;
    assert!(
        found.iter().any(|(value, _)| value == probe),
        "window reachable through its own prefix"
    );
    for (value, _) in &found {
        assert!(value.starts_with(&prefix));
    }
    index.verify()
}

#[test]
fn ambiguity_patterns_select_equal_length_matches() -> Result<()> {
    let mut index = trie(8, 32);
    for text in ["ACGT", "AGGT", "ATGT", "ACGTA", "TCGT", "AC"] {
        index.insert(&kmer(text))?;
    }

    // D = {A, G, T}: second position must not be C
    let pattern: QueryKmer = "ADGT".parse()?;
    let found = index.scan(&[ScanPredicate::Contains(pattern)])?;
    assert_eq!(sorted_texts(&found), ["AGGT", "ATGT"]);

    // fully concrete patterns behave as equality
    let pattern: QueryKmer = "ACGT".parse()?;
    let found = index.scan(&[ScanPredicate::Contains(pattern)])?;
    assert_eq!(sorted_texts(&found), ["ACGT"]);
    Ok(())
}

#[test]
fn canonical_forms_index_both_strands() -> Result<()> {
    let mut index = trie(8, 32);
    let mut generator = DataGenerator::with_seed(0xD0_5EED);
    let reads = generator.kmers(200, 8..=8);
    for read in &reads {
        index.insert(&read.canonical())?;
    }

    // a read and its reverse complement reach the same indexed value
    for read in reads.iter().take(20) {
        let forward = index.lookup(&read.canonical())?;
        let reverse = index.lookup(&read.reverse_complement().canonical())?;
        assert_eq!(forward, reverse);
        assert!(!forward.is_empty());
    }
    Ok(())
}

#[test]
fn degenerate_duplicate_floods_stay_queryable() -> Result<()> {
    let mut index = trie(4, 32);
    for _ in 0..64 {
        index.insert(&kmer("GATTACA"))?;
    }
    index.insert(&kmer("GATTAGA"))?;
    index.verify()?;

    assert_eq!(index.lookup(&kmer("GATTACA"))?.len(), 64);
    assert_eq!(index.lookup(&kmer("GATTAGA"))?.len(), 1);
    let stats = index.stats_snapshot();
    assert!(stats.deferred_splits > 0);
    Ok(())
}

#[test]
fn tiny_pages_build_deep_tries_with_the_same_answers() -> Result<()> {
    let mut coarse = trie(64, 32);
    let mut fine = trie(1, 2);
    let mut generator = DataGenerator::with_seed(0x70_F0);
    let values = generator.kmers(400, 1..=16);
    for value in &values {
        coarse.insert(value)?;
        fine.insert(value)?;
    }
    coarse.verify()?;
    fine.verify()?;

    for predicate in [
        ScanPredicate::StartsWith(kmer("AC")),
        ScanPredicate::StartsWith(kmer("")),
        ScanPredicate::Equals(values[3].clone()),
        ScanPredicate::Contains("NNNNRY".parse()?),
    ] {
        let coarse_found = sorted_texts(&coarse.scan(&[predicate.clone()])?);
        let fine_found = sorted_texts(&fine.scan(&[predicate.clone()])?);
        assert_eq!(coarse_found, fine_found, "predicate {predicate:?}");
    }

    let fine_stats = fine.stats_snapshot();
    assert!(fine_stats.bulk_splits > 0);
    assert!(fine_stats.inner_prunes > 0);
    Ok(())
}
