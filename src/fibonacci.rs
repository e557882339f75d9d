//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a mergeable priority queue with:
//! - O(1) insert and root-list splicing on merge
//! - O(log n) amortized delete-min
//!
//! The structure is a forest of heap-ordered trees. Roots are linked in a
//! circular doubly linked list and the heap keeps the key of the minimum root.
//! Insert and merge only touch the root list; all restructuring is deferred to
//! [`FibonacciHeap::pop`], which promotes the children of the removed minimum
//! and then consolidates the forest so that no two roots share a degree.
//!
//! Nodes live in a slot-map arena owned by the heap (see the `node` module),
//! so the cyclic parent/child/sibling graph is expressed with keys rather than
//! pointers.
//!
//! There is no `decrease_key`: every node keeps a `mark` flag for cascading
//! cuts, but nothing ever cuts a node from its parent, so degrees only grow.

use crate::compare::{Compare, NaturalOrder};
use crate::node::{NodeArena, NodeKey};
use crate::traits::{Handle, Heap, HeapError};
use slotmap::SecondaryMap;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{self, AtomicU64};

/// Golden ratio. The degree of any node in an n-node heap is at most
/// `floor(log_phi(n))`.
const PHI: f64 = 1.618_033_988_749_895;

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies one arena. Handles carry it so a key from another arena never
/// resolves.
fn next_heap_id() -> u64 {
    NEXT_HEAP_ID.fetch_add(1, atomic::Ordering::Relaxed)
}

/// Handle to an element in a Fibonacci heap
///
/// A handle resolves through [`FibonacciHeap::get`] only while its node is
/// live and still stored where it was created. Popping the element or
/// clearing the heap invalidates it, and so does an append that moves its
/// node into another heap's storage (see [`FibonacciHeap::append`]). An
/// invalidated handle resolves to `None`, never to some other element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: u64,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// A min-heap with respect to its comparator `C`, which defaults to the key's
/// `Ord`.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// for key in [5, 3, 8, 1] {
///     heap.push(key);
/// }
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(heap.pop(), Ok(1));
/// assert_eq!(heap.pop(), Ok(3));
/// assert_eq!(heap.len(), 2);
/// ```
///
/// A heap can never be merged into itself:
///
/// ```compile_fail
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(1);
/// heap.merge(heap);
/// ```
pub struct FibonacciHeap<K, C = NaturalOrder> {
    id: u64,
    arena: NodeArena<K>,
    min: Option<NodeKey>,
    len: usize,
    cmp: C,
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates an empty heap ordered by `K`'s `Ord`
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, C: Compare<K>> FibonacciHeap<K, C> {
    /// Creates an empty heap ordered by `cmp`
    ///
    /// ```rust
    /// use rust_fibonacci_heap::FibonacciHeap;
    ///
    /// let mut heap: FibonacciHeap<&str, _> =
    ///     FibonacciHeap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// heap.push("three");
    /// heap.push("on");
    /// assert_eq!(heap.pop(), Ok("on"));
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            id: next_heap_id(),
            arena: NodeArena::new(),
            min: None,
            len: 0,
            cmp,
        }
    }

    /// Returns the comparator ordering this heap
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts a key and returns a handle to its node
    ///
    /// The new node is added to the right of the current minimum in the root
    /// list, and becomes the minimum if it orders strictly first.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn push(&mut self, key: K) -> FibonacciHandle {
        let id = self.arena.alloc(key);

        match self.min {
            Some(min) => {
                self.arena.add_right(min, id);
                if self.less(id, min) {
                    self.min = Some(id);
                }
            }
            None => self.min = Some(id),
        }

        self.len += 1;
        FibonacciHandle { heap: self.id, node: id }
    }

    /// Returns the minimum key without removing it
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the heap has no elements.
    pub fn peek(&self) -> Result<&K, HeapError> {
        match self.min {
            Some(min) => Ok(&self.arena[min].key),
            None => Err(HeapError::EmptyHeap),
        }
    }

    /// Removes and returns the minimum key
    ///
    /// The children of the minimum are promoted to the root list, the minimum
    /// is spliced out and freed, and the root list is consolidated.
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn pop(&mut self) -> Result<K, HeapError> {
        let z = self.min.ok_or(HeapError::EmptyHeap)?;

        let children = self.arena.children(z);
        if let Some(&child) = children.first() {
            for &id in &children {
                self.arena[id].parent = None;
            }
            self.arena.concatenate_right(z, child);
        }

        if self.len == 1 {
            self.min = None;
        } else {
            // Any surviving root is a valid starting point for consolidation
            self.min = Some(self.arena[z].right);
            self.arena.remove(z);
            self.consolidate();
        }

        self.len -= 1;
        Ok(self.arena.free(z).key)
    }

    /// Moves every element of `other` into this heap
    ///
    /// `other` is left empty and can be reused. The two root lists are
    /// spliced together in O(1). The nodes of the smaller heap are then moved
    /// into the larger heap's storage, so a union costs
    /// O(min(|self|, |other|)); if either heap is empty nothing is moved.
    ///
    /// Handles issued by the larger heap (this one on a tie) keep resolving,
    /// now through `self`. Handles of the heap whose nodes were moved resolve
    /// to `None` afterwards.
    ///
    /// ```rust
    /// use rust_fibonacci_heap::{FibonacciHeap, HeapError};
    ///
    /// let mut a = FibonacciHeap::new();
    /// a.push(1);
    /// a.push(4);
    /// let mut b = FibonacciHeap::new();
    /// b.push(2);
    /// b.push(3);
    ///
    /// a.append(&mut b);
    /// assert_eq!(a.len(), 4);
    /// assert_eq!(b.len(), 0);
    /// assert_eq!(b.pop(), Err(HeapError::EmptyHeap));
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };
        let other_len = std::mem::take(&mut other.len);

        let Some(min) = self.min else {
            std::mem::swap(&mut self.arena, &mut other.arena);
            self.id = std::mem::replace(&mut other.id, next_heap_id());
            self.min = Some(other_min);
            self.len = other_len;
            return;
        };

        // `kept` roots the list whose storage stays put, `moved` the other one
        let (kept, moved) = if self.arena.len() < other.arena.len() {
            std::mem::swap(&mut self.arena, &mut other.arena);
            std::mem::swap(&mut self.id, &mut other.id);
            (other_min, min)
        } else {
            (min, other_min)
        };

        let remap = self.arena.absorb(&mut other.arena);
        let moved = remap[moved];
        other.id = next_heap_id();

        self.arena.concatenate_right(kept, moved);
        self.len += other_len;
        self.min = Some(if self.less(moved, kept) { moved } else { kept });
    }

    /// Merges another heap into this one, consuming the other heap
    ///
    /// Taking `other` by value means it cannot be observed afterwards and
    /// cannot be this heap.
    pub fn merge(&mut self, mut other: Self) {
        self.append(&mut other);
    }

    /// Returns the key behind `handle` if its node is still in this heap
    ///
    /// Handles from another heap, or invalidated by an append, yield `None`.
    ///
    /// ```rust
    /// use rust_fibonacci_heap::FibonacciHeap;
    ///
    /// let mut heap = FibonacciHeap::new();
    /// let handle = heap.push(7);
    /// assert_eq!(heap.get(handle), Some(&7));
    /// heap.pop().unwrap();
    /// assert_eq!(heap.get(handle), None);
    /// ```
    pub fn get(&self, handle: FibonacciHandle) -> Option<&K> {
        if handle.heap != self.id {
            return None;
        }
        self.arena.get(handle.node).map(|node| &node.key)
    }

    /// Number of trees in the root list
    pub fn root_count(&self) -> usize {
        self.min.map_or(0, |min| self.arena.siblings(min).len())
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.arena.clear();
        self.min = None;
        self.len = 0;
    }

    /// Checks the structural invariants of the forest
    ///
    /// - every non-root key orders no earlier than its parent's key
    /// - the minimum is a root and no root orders before it
    /// - every sibling list is a consistent circular list and no node
    ///   appears twice
    /// - every degree equals the length of the node's child list
    /// - `len()` equals the number of reachable nodes and of allocated nodes
    ///
    /// Returns false, and logs the first violation, if any invariant fails.
    pub fn verify_internal_structure(&self) -> bool {
        match self.check_structure() {
            Ok(()) => true,
            Err(violation) => {
                tracing::warn!(violation, len = self.len, "fibonacci heap invariant violated");
                false
            }
        }
    }

    fn check_structure(&self) -> Result<(), &'static str> {
        let Some(min) = self.min else {
            if self.len != 0 || !self.arena.is_empty() {
                return Err("empty heap still holds nodes");
            }
            return Ok(());
        };

        if self.arena.get(min).is_none() {
            return Err("minimum is not allocated");
        }
        if self.arena[min].parent.is_some() {
            return Err("minimum is not a root");
        }

        let mut seen: SecondaryMap<NodeKey, ()> = SecondaryMap::with_capacity(self.len);
        let roots = self.check_cycle(min, None, &mut seen)?;
        let mut stack: Vec<NodeKey> = Vec::new();
        for &root in &roots {
            if self.less(root, min) {
                return Err("a root orders before the minimum");
            }
            stack.push(root);
        }

        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            let children = match node.child {
                Some(child) => self.check_cycle(child, Some(id), &mut seen)?,
                None => SmallVec::new(),
            };
            if children.len() != node.degree {
                return Err("degree does not match child count");
            }
            for &child in &children {
                if self.less(child, id) {
                    return Err("child orders before its parent");
                }
                stack.push(child);
            }
        }

        if seen.len() != self.len {
            return Err("len does not match reachable nodes");
        }
        if self.arena.len() != self.len {
            return Err("arena holds unreachable nodes");
        }
        Ok(())
    }

    /// Validates one sibling cycle and records its members in `seen`
    fn check_cycle(
        &self,
        start: NodeKey,
        parent: Option<NodeKey>,
        seen: &mut SecondaryMap<NodeKey, ()>,
    ) -> Result<SmallVec<[NodeKey; 16]>, &'static str> {
        let members = self.arena.siblings(start);
        for &id in &members {
            let node = self.arena.get(id).ok_or("link to a freed node")?;
            if node.parent != parent {
                return Err("parent link disagrees with sibling list");
            }
            if self.arena[node.left].right != id || self.arena[node.right].left != id {
                return Err("left/right links are inconsistent");
            }
            if seen.insert(id, ()).is_some() {
                return Err("node appears in more than one place");
            }
        }
        if members.last().map(|&last| self.arena[last].right) != Some(start) {
            return Err("sibling list does not close");
        }
        Ok(members)
    }

    /// Links roots of equal degree until every root has a distinct degree,
    /// then rebuilds the root list and finds the new minimum
    ///
    /// `self.min` must name some root; it is only used as the entry point.
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        // The root list is rewired while linking, so walk a snapshot of it
        let roots = self.arena.siblings(start);
        let roots_before = roots.len();

        let mut by_degree: SmallVec<[Option<NodeKey>; 64]> =
            smallvec![None; max_degree(self.len) + 1];
        let mut links = 0usize;

        for root in roots {
            let mut x = root;
            let mut d = self.arena[x].degree;

            loop {
                if d >= by_degree.len() {
                    by_degree.resize(d + 1, None);
                }
                let Some(mut y) = by_degree[d].take() else {
                    break;
                };
                if self.order(x, y) == Ordering::Greater {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                links += 1;
                d += 1;
            }

            by_degree[d] = Some(x);
        }

        self.min = None;
        for root in by_degree.into_iter().flatten() {
            self.arena[root].parent = None;
            match self.min {
                Some(min) => {
                    self.arena.add_right(min, root);
                    if self.less(root, min) {
                        self.min = Some(root);
                    }
                }
                None => {
                    self.arena.make_singleton(root);
                    self.min = Some(root);
                }
            }
        }

        tracing::trace!(
            roots_before,
            roots_after = self.root_count(),
            links,
            "consolidated root list"
        );
    }

    /// Makes `child` a child of `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.arena.remove(child);
        self.arena.add_child(parent, child);
        self.arena[child].mark = false;
    }

    #[inline]
    fn order(&self, a: NodeKey, b: NodeKey) -> Ordering {
        self.cmp.compare(&self.arena[a].key, &self.arena[b].key)
    }

    #[inline]
    fn less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.order(a, b) == Ordering::Less
    }
}

/// Upper bound on any node's degree in a heap of `n` nodes
fn max_degree(n: usize) -> usize {
    if n < 2 {
        return 1;
    }
    ((n as f64).ln() / PHI.ln()).floor() as usize + 1
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, C> fmt::Debug for FibonacciHeap<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.min.map(|min| &self.arena[min].key))
            .finish()
    }
}

impl<K, C: Compare<K>> Extend<K> for FibonacciHeap<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.push(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K, C: Compare<K>> Heap<K> for FibonacciHeap<K, C> {
    type Handle = FibonacciHandle;

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, key: K) -> FibonacciHandle {
        FibonacciHeap::push(self, key)
    }

    fn peek(&self) -> Result<&K, HeapError> {
        FibonacciHeap::peek(self)
    }

    fn pop(&mut self) -> Result<K, HeapError> {
        FibonacciHeap::pop(self)
    }

    fn append(&mut self, other: &mut Self) {
        FibonacciHeap::append(self, other)
    }
}
