//! Micro benchmarks for the in-memory k-mer trie.
#![allow(missing_docs)]

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use helicase::data_generator::DataGenerator;
use helicase::dna::Kmer;
use helicase::trie::{KmerRadix, RadixOptions, ScanPredicate, Trie, TrieOptions};

const INSERT_COUNT: usize = 16_384;
const LOOKUP_SAMPLES: usize = 2_048;

fn fresh_trie() -> Trie<KmerRadix> {
    Trie::new(KmerRadix::new(RadixOptions::default()), TrieOptions::default())
}

fn dataset(count: usize) -> Vec<Kmer> {
    DataGenerator::with_seed(0xBEEF_F00D).kmers(count, 8..=32)
}

fn micro_trie(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro/trie");
    group.sample_size(30);

    let values = dataset(INSERT_COUNT);

    group.throughput(Throughput::Elements(INSERT_COUNT as u64));
    group.bench_function("bulk_insert", |b| {
        b.iter_batched(
            fresh_trie,
            |mut trie| {
                for value in &values {
                    trie.insert(value).expect("insert");
                }
                black_box(trie.len());
            },
            BatchSize::SmallInput,
        );
    });

    let mut loaded = fresh_trie();
    for value in &values {
        loaded.insert(value).expect("insert");
    }

    group.throughput(Throughput::Elements(LOOKUP_SAMPLES as u64));
    group.bench_function(BenchmarkId::new("point_lookup", LOOKUP_SAMPLES), |b| {
        b.iter(|| {
            for value in values.iter().take(LOOKUP_SAMPLES) {
                black_box(loaded.lookup(value).expect("lookup"));
            }
        });
    });

    let prefixes: Vec<Kmer> = values
        .iter()
        .take(64)
        .map(|value| Kmer::new(&value.as_bytes()[..4.min(value.len())]).expect("prefix"))
        .collect();
    group.throughput(Throughput::Elements(prefixes.len() as u64));
    group.bench_function("prefix_scan", |b| {
        b.iter(|| {
            for prefix in &prefixes {
                let found = loaded
                    .scan(&[ScanPredicate::StartsWith(prefix.clone())])
                    .expect("scan");
                black_box(found.len());
            }
        });
    });

    let patterns: Vec<_> = {
        let mut generator = DataGenerator::with_seed(0xFEED_FACE);
        (0..16).map(|_| generator.query_kmer(12)).collect()
    };
    group.throughput(Throughput::Elements(patterns.len() as u64));
    group.bench_function("pattern_scan", |b| {
        b.iter(|| {
            for pattern in &patterns {
                let found = loaded
                    .scan(&[ScanPredicate::Contains(pattern.clone())])
                    .expect("scan");
                black_box(found.len());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, micro_trie);
criterion_main!(benches);
