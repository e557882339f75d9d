//! Criterion benchmarks for the Fibonacci heap
//!
//! ```bash
//! cargo bench --bench heap_bench
//! # Only the merge group
//! cargo bench --bench heap_bench -- merge
//! ```

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_fibonacci_heap::FibonacciHeap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

const SIZES: [usize; 3] = [1 << 8, 1 << 12, 1 << 16];

/// Deterministic pseudo-random keys
fn keys(n: usize) -> Vec<u64> {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        })
        .collect()
}

fn bench_push_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_drain");
    for n in SIZES {
        let input = keys(n);

        group.bench_with_input(BenchmarkId::new("fibonacci", n), &input, |b, input| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                for &k in input {
                    heap.push(k);
                }
                while let Ok(k) = heap.pop() {
                    black_box(k);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("std_binary", n), &input, |b, input| {
            b.iter(|| {
                let mut heap = BinaryHeap::new();
                for &k in input {
                    heap.push(Reverse(k));
                }
                while let Some(k) = heap.pop() {
                    black_box(k);
                }
            })
        });
    }
    group.finish();
}

fn bench_push_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    for n in SIZES {
        let input = keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &input, |b, input| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                for &k in input {
                    heap.push(k);
                }
                black_box(heap.len())
            })
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for n in SIZES {
        let input = keys(n);
        let (left, right) = input.split_at(n / 2);

        group.bench_with_input(BenchmarkId::new("fibonacci", n), &(left, right), |b, (left, right)| {
            b.iter(|| {
                let mut a: FibonacciHeap<u64> = left.iter().copied().collect();
                let other: FibonacciHeap<u64> = right.iter().copied().collect();
                a.merge(other);
                black_box(a.pop())
            })
        });
    }
    group.finish();
}

/// Appending a large heap into a single-element one moves only the single
/// node, so the time per append should stay flat as `n` grows.
fn bench_append_into_small(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_into_small");
    for n in SIZES {
        let input = keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &input, |b, input| {
            b.iter_batched(
                || {
                    let mut small = FibonacciHeap::new();
                    small.push(0u64);
                    let large: FibonacciHeap<u64> = input.iter().copied().collect();
                    (small, large)
                },
                |(mut small, mut large)| {
                    small.append(&mut large);
                    (small, large)
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_push_drain,
    bench_push_only,
    bench_merge,
    bench_append_into_small
);
criterion_main!(benches);
