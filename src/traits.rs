//! Common traits for mergeable heaps
//!
//! - [`Heap`]: the operations every mergeable min-heap in this crate offers
//! - [`Handle`]: marker for the opaque node references returned by `push`
//! - [`HeapError`]: the error returned when querying an empty heap

use std::fmt;
use std::hash::Hash;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek` or `pop` was called on a heap with no elements
    EmptyHeap,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap
///
/// This is an opaque type that identifies a specific node. It is only
/// meaningful to the heap that issued it.
pub trait Handle: Copy + Eq + Hash + fmt::Debug {}

/// Base trait for mergeable min-heaps
///
/// The ordering is whatever the heap was constructed with; "minimum" means
/// the key that orders first.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{FibonacciHeap, Heap, HeapError};
///
/// fn drain<H: Heap<i32>>(mut heap: H) -> Vec<i32> {
///     let mut out = Vec::new();
///     while let Ok(key) = heap.pop() {
///         out.push(key);
///     }
///     out
/// }
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3);
/// heap.push(1);
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(drain(heap), vec![1, 3]);
/// assert_eq!(FibonacciHeap::<i32>::new().pop(), Err(HeapError::EmptyHeap));
/// ```
pub trait Heap<K> {
    /// The handle type returned by `push`
    type Handle: Handle;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts a key, returning a handle to its node
    ///
    /// # Time Complexity
    /// O(1) for Fibonacci heaps.
    fn push(&mut self, key: K) -> Self::Handle;

    /// Returns the minimum key without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if there is nothing to peek at.
    fn peek(&self) -> Result<&K, HeapError>;

    /// Removes and returns the minimum key
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if there is nothing to pop.
    ///
    /// # Time Complexity
    /// O(log n) amortized for Fibonacci heaps.
    fn pop(&mut self) -> Result<K, HeapError>;

    /// Moves every element of `other` into this heap, leaving `other` empty
    fn append(&mut self, other: &mut Self);

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, mut other: Self)
    where
        Self: Sized,
    {
        self.append(&mut other);
    }
}
