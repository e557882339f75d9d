//! Stress tests that push the heap through large and adversarial workloads
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases in consolidation and merging.

use rust_fibonacci_heap::{FibonacciHeap, Heap};

/// Deterministic xorshift so failures are reproducible
fn xorshift(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn drain<H: Heap<i64>>(heap: &mut H) -> Vec<i64> {
    let mut out = Vec::with_capacity(heap.len());
    while let Ok(v) = heap.pop() {
        out.push(v);
    }
    out
}

#[test]
fn test_massive_operations() {
    let mut heap = FibonacciHeap::new();
    for i in 0..10_000 {
        heap.push(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop(), Ok(i));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_reverse_insertion() {
    let mut heap = FibonacciHeap::new();
    for i in (0..5_000).rev() {
        heap.push(i);
    }
    assert_eq!(drain(&mut heap), (0..5_000).collect::<Vec<_>>());
}

#[test]
fn test_alternating_ops() {
    let mut heap = FibonacciHeap::new();
    let mut expected_len = 0;

    for i in 0..2_000i64 {
        heap.push(i * 2);
        heap.push(i * 2 + 1);
        expected_len += 2;

        assert_eq!(heap.pop(), Ok(i));
        expected_len -= 1;
        assert_eq!(heap.len(), expected_len);
    }

    let rest = drain(&mut heap);
    assert!(rest.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(rest.len(), 2_000);
}

#[test]
fn test_random_keys_sorted() {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let values: Vec<i64> = (0..20_000).map(|_| (xorshift(&mut state) % 1_000) as i64).collect();

    let mut heap: FibonacciHeap<i64> = values.iter().copied().collect();
    let mut expected = values;
    expected.sort_unstable();
    assert_eq!(drain(&mut heap), expected);
}

#[test]
fn test_structure_under_churn() {
    // Pops between bursts of pushes build deep trees that later pops must
    // break apart again
    let mut state = 42u64;
    let mut heap = FibonacciHeap::new();
    let mut live = 0usize;

    for round in 0..200 {
        for _ in 0..50 {
            heap.push((xorshift(&mut state) % 10_000) as i64);
            live += 1;
        }
        for _ in 0..(round % 40) {
            if heap.pop().is_ok() {
                live -= 1;
            }
        }
        assert_eq!(heap.len(), live);
        if round % 20 == 0 {
            assert!(heap.verify_internal_structure());
        }
    }

    assert!(heap.verify_internal_structure());
    let rest = drain(&mut heap);
    assert_eq!(rest.len(), live);
    assert!(rest.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_many_merges() {
    // Fold many small heaps together, popping between merges so the
    // receiving heap holds consolidated trees when the next one arrives
    let mut state = 7u64;
    let mut total = FibonacciHeap::new();
    let mut model = Vec::new();

    for _ in 0..300 {
        let mut small = FibonacciHeap::new();
        for _ in 0..(xorshift(&mut state) % 20) {
            let v = (xorshift(&mut state) % 500) as i64;
            small.push(v);
            model.push(v);
        }
        if small.len() > 1 {
            let v = small.pop().unwrap();
            let pos = model.iter().position(|&m| m == v).unwrap();
            model.swap_remove(pos);
        }
        total.merge(small);

        if let Ok(v) = total.pop() {
            let (pos, _) = model.iter().enumerate().min_by_key(|&(_, m)| *m).unwrap();
            assert_eq!(model.swap_remove(pos), v);
        }
    }

    assert!(total.verify_internal_structure());
    model.sort_unstable();
    assert_eq!(drain(&mut total), model);
}

#[test]
fn test_pop_into_empty_then_reuse() {
    let mut heap = FibonacciHeap::new();
    for cycle in 0..100 {
        for i in 0..cycle {
            heap.push(i);
        }
        for i in 0..cycle {
            assert_eq!(heap.pop(), Ok(i));
        }
        assert!(heap.is_empty());
        assert!(heap.verify_internal_structure());
    }
}
