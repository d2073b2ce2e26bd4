use chained_bloom::{BloomFilter, ClassicBloomFilter};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{thread_rng, RngCore};

fn random_items(count: usize, len: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| {
            let mut item = vec![0; len];
            thread_rng().fill_bytes(&mut item);
            item
        })
        .collect()
}

// This is an empty bench, only print false positives rate
fn bench(c: &mut Criterion) {
    for &(k, depth, n) in &[(3usize, 2usize, 8_000usize), (7, 2, 5_000), (10, 3, 1_000_000)] {
        let mut filter = ClassicBloomFilter::new(k, depth).unwrap();
        filter.build_buckets();
        random_items(n, 8).iter().for_each(|i| filter.add(i));

        let lookups = 100_000;
        let false_positives = random_items(lookups, 16)
            .iter()
            .filter(|i| filter.check_membership(i))
            .count();
        println!(
            "k={} d={} n={} false positives: {:?} (estimated {:?})",
            k,
            depth,
            n,
            false_positives as f64 / lookups as f64,
            filter.estimated_false_positive_rate(n)
        );
    }

    c.bench_function("false_positives_rate", |b| b.iter(|| {}));
}

criterion_group!(benches, bench);
criterion_main!(benches);
