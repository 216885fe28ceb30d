use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fibber::{Fib, NextHopTable, PrefixSet, RadixTree, TrieBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const SAMPLE: usize = 1024;

/// Synthesize a BGP-shaped table: mostly /16..=/24, a few wide prefixes,
/// and a default route so every lookup resolves.
fn synth_prefix_set(count: usize, seed: u64) -> PrefixSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = PrefixSet::new();
    set.add(0, 0, 0).unwrap();
    for _ in 0..count {
        let length: u8 = if rng.random_range(0..10) == 0 {
            rng.random_range(8..=15)
        } else {
            rng.random_range(16..=24)
        };
        let next_hop = rng.random_range(1..64);
        set.add(rng.random::<u32>(), length, next_hop).unwrap();
    }
    set
}

fn sample_addresses(seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..SAMPLE).map(|_| rng.random::<u32>()).collect()
}

// Benchmark: compiled-trie lookups against the staging radix tree, over
// tables of increasing size
fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(SAMPLE as u64));

    for table_size in [1_000usize, 10_000, 50_000] {
        let set = synth_prefix_set(table_size, 42);
        let (tree, nexthops) = RadixTree::from_prefix_set(&set).unwrap();
        let trie = TrieBuilder::new().build(&tree).unwrap();
        let fib = Fib::from_parts(trie, nexthops.clone());
        let addresses = sample_addresses(7);

        group.bench_with_input(
            BenchmarkId::new("compiled", table_size),
            &table_size,
            |b, _| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for &addr in &addresses {
                        if fib.lookup(black_box(addr)).is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("radix", table_size),
            &table_size,
            |b, _| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for &addr in &addresses {
                        if radix_hit(&tree, &nexthops, black_box(addr)) {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            },
        );
    }
    group.finish();
}

fn radix_hit(tree: &RadixTree, nexthops: &NextHopTable, addr: u32) -> bool {
    tree.lookup(addr, nexthops).is_some()
}

// Benchmark: full pipeline builds
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    for table_size in [1_000usize, 10_000] {
        let set = synth_prefix_set(table_size, 42);
        group.throughput(Throughput::Elements(table_size as u64));
        group.bench_with_input(
            BenchmarkId::new("pipeline", table_size),
            &table_size,
            |b, _| {
                b.iter(|| {
                    let fib = Fib::build(black_box(&set)).unwrap();
                    black_box(fib.trie().size_bytes())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_lookups, bench_build);
criterion_main!(benches);
