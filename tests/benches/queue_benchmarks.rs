//! # Aggregation Queue Benchmarks
//!
//! | Scenario | Cost driver |
//! |----------|-------------|
//! | distinct keys | one bin, hash insert only |
//! | repeated key | first-fit scan grows with bin count |
//! | mixed telemetry | realistic channel fan-in, periodic drain |
//! | shared handle | mutex overhead per insert |

use aggregation_queue::{AggregationQueue, SharedAggregationQueue};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

fn bench_distinct_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert-distinct-keys");

    for size in [100u32, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut queue = AggregationQueue::new();
                for key in 0..size {
                    queue.insert(key, key);
                }
                black_box(queue.len())
            })
        });
    }

    group.finish();
}

fn bench_repeated_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert-repeated-key");

    for repeats in [10u32, 100, 1_000] {
        group.throughput(Throughput::Elements(u64::from(repeats)));
        group.bench_with_input(
            BenchmarkId::from_parameter(repeats),
            &repeats,
            |b, &repeats| {
                b.iter(|| {
                    let mut queue = AggregationQueue::new();
                    for value in 0..repeats {
                        queue.insert("channel", value);
                    }
                    black_box(queue.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_mixed_telemetry(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed-telemetry");
    let mut rng = rand::thread_rng();
    let updates: Vec<(u16, f64)> = (0..10_000)
        .map(|_| (rng.gen_range(0..64), rng.gen::<f64>()))
        .collect();

    group.throughput(Throughput::Elements(updates.len() as u64));
    group.bench_function("insert-and-drain-every-256", |b| {
        b.iter(|| {
            let mut queue = AggregationQueue::new();
            let mut drained = 0usize;
            for (i, (channel, value)) in updates.iter().enumerate() {
                queue.insert(*channel, *value);
                if i % 256 == 255 {
                    while let Some(bin) = queue.poll() {
                        drained += bin.len();
                    }
                }
            }
            black_box(drained)
        })
    });

    group.finish();
}

fn bench_shared_handle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-handle");

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("insert-poll-1000", |b| {
        b.iter(|| {
            let queue = SharedAggregationQueue::new();
            for key in 0..1_000u32 {
                queue.insert(key % 32, key);
            }
            let mut bins = 0usize;
            while queue.poll().is_some() {
                bins += 1;
            }
            black_box(bins)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_distinct_keys,
    bench_repeated_key,
    bench_mixed_telemetry,
    bench_shared_handle
);
criterion_main!(benches);
