//! Arena-backed nodes for circular sibling lists
//!
//! Every node of a Fibonacci heap sits in exactly one circular doubly-linked
//! sibling list (the root list, or the child list of its parent) and may own a
//! child list of its own. Instead of raw pointers, nodes live in a
//! [`SlotMap`] and refer to each other by [`NodeKey`]:
//!
//! - `left`/`right` are always set; a solitary node points at itself
//! - `parent` is a plain back-reference and implies no ownership
//! - `child` names any one child; the rest are reached through its siblings
//!
//! The slot map reuses slots freed by [`NodeArena::free`], and its
//! generational keys let a stale key be detected instead of silently
//! aliasing a newer node.
//!
//! All list surgery takes keys of nodes that are currently in the arena.
//! Passing a freed key is a logic error and panics, the same way indexing a
//! `Vec` out of bounds does.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Arena key of a heap node
    pub struct NodeKey;
}

/// Snapshot of the members of one sibling cycle
pub(crate) type Siblings = SmallVec<[NodeKey; 16]>;

#[derive(Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    pub(crate) degree: usize,
    // Cascading-cut bookkeeping. Cleared on link, never read.
    #[allow(dead_code)]
    pub(crate) mark: bool,
}

#[derive(Debug)]
pub(crate) struct NodeArena<K> {
    nodes: SlotMap<NodeKey, Node<K>>,
}

impl<K> Default for NodeArena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> NodeArena<K> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn get(&self, id: NodeKey) -> Option<&Node<K>> {
        self.nodes.get(id)
    }

    /// Allocates a node holding `key` as a singleton cycle
    pub(crate) fn alloc(&mut self, key: K) -> NodeKey {
        self.nodes.insert_with_key(|id| Node {
            key,
            parent: None,
            child: None,
            left: id,
            right: id,
            degree: 0,
            mark: false,
        })
    }

    /// Releases a node's slot and hands back the node
    ///
    /// The node must already be unlinked from every cycle and child pointer.
    pub(crate) fn free(&mut self, id: NodeKey) -> Node<K> {
        match self.nodes.remove(id) {
            Some(node) => node,
            None => panic!("node {id:?} is not in the arena"),
        }
    }

    /// Makes `id` a cycle of one
    pub(crate) fn make_singleton(&mut self, id: NodeKey) {
        let node = &mut self.nodes[id];
        node.left = id;
        node.right = id;
    }

    /// Inserts `new` immediately to the right of `node` in `node`'s cycle
    ///
    /// Parent, child and degree of both nodes are left alone.
    pub(crate) fn add_right(&mut self, node: NodeKey, new: NodeKey) {
        let right = self.nodes[node].right;
        self.nodes[right].left = new;
        self.nodes[new].right = right;
        self.nodes[new].left = node;
        self.nodes[node].right = new;
    }

    /// Attaches `child` to `parent`'s child list and bumps `parent`'s degree
    ///
    /// `child` must not be in any other cycle.
    pub(crate) fn add_child(&mut self, parent: NodeKey, child: NodeKey) {
        self.nodes[parent].degree += 1;
        match self.nodes[parent].child {
            Some(first) => self.add_right(first, child),
            None => {
                self.make_singleton(child);
                self.nodes[parent].child = Some(child);
            }
        }
        self.nodes[child].parent = Some(parent);
    }

    /// Splices `id` out of whatever cycle it is in
    ///
    /// The removed node keeps its stale `left`/`right`. Parent bookkeeping
    /// is the caller's job.
    pub(crate) fn remove(&mut self, id: NodeKey) {
        let left = self.nodes[id].left;
        let right = self.nodes[id].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    /// Splices the whole cycle containing `other` between `node` and
    /// `node.right`, producing a single cycle
    pub(crate) fn concatenate_right(&mut self, node: NodeKey, other: NodeKey) {
        let node_right = self.nodes[node].right;
        let other_left = self.nodes[other].left;

        self.nodes[node_right].left = other_left;
        self.nodes[other_left].right = node_right;

        self.nodes[node].right = other;
        self.nodes[other].left = node;
    }

    /// Collects the cycle containing `start`, beginning at `start` and
    /// walking right
    ///
    /// The walk stops after `len()` steps even if the cycle never closes, so
    /// a corrupted list cannot spin forever.
    pub(crate) fn siblings(&self, start: NodeKey) -> Siblings {
        let mut out = Siblings::new();
        let mut current = start;
        loop {
            out.push(current);
            current = self.nodes[current].right;
            if current == start || out.len() >= self.nodes.len() {
                break;
            }
        }
        out
    }

    /// Snapshot of `id`'s direct children
    pub(crate) fn children(&self, id: NodeKey) -> Siblings {
        match self.nodes[id].child {
            Some(child) => self.siblings(child),
            None => Siblings::new(),
        }
    }

    /// Moves every node of `other` into this arena
    ///
    /// All link fields are rewritten to the new keys. The returned map takes
    /// an old key from `other` to its key in `self`. `other` is left empty.
    pub(crate) fn absorb(&mut self, other: &mut NodeArena<K>) -> SecondaryMap<NodeKey, NodeKey> {
        let mut remap = SecondaryMap::with_capacity(other.len());
        let mut moved = Vec::with_capacity(other.len());

        for (old, node) in other.nodes.drain() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }

        for id in moved {
            let node = &mut self.nodes[id];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|p| remap[p]);
            node.child = node.child.map(|c| remap[c]);
        }

        tracing::debug!(nodes = remap.len(), "absorbed arena");
        remap
    }
}

impl<K> Index<NodeKey> for NodeArena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeKey) -> &Node<K> {
        &self.nodes[id]
    }
}

impl<K> IndexMut<NodeKey> for NodeArena<K> {
    fn index_mut(&mut self, id: NodeKey) -> &mut Node<K> {
        &mut self.nodes[id]
    }
}
