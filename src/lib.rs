//! Mergeable Fibonacci Heap for Rust
//!
//! This crate provides a Fibonacci heap: a min-priority queue built from a
//! forest of heap-ordered trees whose roots share a circular doubly linked
//! list.
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `push`    | O(1) |
//! | `peek`    | O(1) |
//! | `pop`     | O(log n) amortized |
//! | `append` / `merge` | O(1) root-list splice, plus O(min(n, m)) node moves |
//!
//! Nodes are stored in a slot-map arena and linked by keys, so the cyclic
//! sibling/parent/child structure needs no `unsafe` code. The key ordering is
//! pluggable through [`compare::Compare`]; the default is the key's `Ord`.
//!
//! The [`pathfinding`] module runs Dijkstra and A* searches on top of the heap.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::{FibonacciHeap, HeapError};
//!
//! let mut a = FibonacciHeap::new();
//! a.push(1);
//! a.push(4);
//!
//! let mut b = FibonacciHeap::new();
//! b.push(2);
//! b.push(3);
//!
//! a.merge(b);
//! assert_eq!(a.pop(), Ok(1));
//! assert_eq!(a.pop(), Ok(2));
//! assert_eq!(a.pop(), Ok(3));
//! assert_eq!(a.pop(), Ok(4));
//! assert_eq!(a.pop(), Err(HeapError::EmptyHeap));
//! ```

pub mod compare;
pub mod fibonacci;
mod node;
pub mod pathfinding;
pub mod traits;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use traits::{Handle, Heap, HeapError};
