//! Comparison strategies for heap keys
//!
//! A [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) never calls `Ord`
//! directly. It asks a [`Compare`] value instead, so the ordering can be
//! supplied at construction time:
//!
//! - [`NaturalOrder`]: the key's own `Ord` (min-heap)
//! - [`ReverseOrder`]: the key's `Ord` reversed (max-heap)
//! - any closure `Fn(&K, &K) -> Ordering`
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::compare::{Compare, NaturalOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
//!
//! let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
//! assert_eq!(by_len.compare(&"abc", &"de"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// An ordering over keys of type `K`
///
/// The relation must be a consistent total (or weak) order for the lifetime
/// of the heap using it. A comparator that changes its answers, or panics
/// part-way through a pop, leaves the heap in an unspecified state.
pub trait Compare<K: ?Sized> {
    /// Compares two keys
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns true if `a` orders strictly before `b`
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Orders keys by their `Ord` implementation, smallest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Compare<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders keys by their `Ord` implementation, largest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Compare<K> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
