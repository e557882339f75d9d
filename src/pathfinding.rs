//! Dijkstra's and A* shortest-path search over a Fibonacci heap
//!
//! The open set is a [`FibonacciHeap`] of lightweight `(cost, index)` entries
//! ordered by cost alone. Node states and their bookkeeping live in a vector
//! indexed by those entries, with an FxHash map from state to index.
//!
//! The heap has no `decrease_key`, so the search uses lazy deletion: finding a
//! cheaper route to a node pushes a fresh entry, and entries for nodes that
//! are already settled, or that carry an outdated cost, are skipped when they
//! reach the top.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::pathfinding::{dijkstra, SearchNode};
//!
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, ..self.clone() }, 1),
//!             (GridPos { x: self.x - 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y + 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y - 1, ..self.clone() }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//! let (path, cost) = dijkstra(&start).unwrap();
//! assert_eq!(cost, 4);
//! assert_eq!(path.len(), 5);
//! ```

use crate::fibonacci::FibonacciHeap;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate its successors and to
/// decide whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must never overestimate the true remaining cost for A* to
/// return optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns an estimate of the cost from this node to the nearest goal.
    fn heuristic(&self) -> Self::Cost;
}

type NodeIndex = usize;

/// Open-set entry: (f-score, g-score, node index)
type OpenEntry<C> = (C, C, NodeIndex);

type OpenSet<C> = FibonacciHeap<OpenEntry<C>, fn(&OpenEntry<C>, &OpenEntry<C>) -> Ordering>;

fn by_f_score<C: Ord>(a: &OpenEntry<C>, b: &OpenEntry<C>) -> Ordering {
    a.0.cmp(&b.0)
}

/// Metadata stored for each discovered node during search.
struct NodeEntry<N: SearchNode> {
    node: N,
    /// Best known cost from start
    g_score: N::Cost,
    came_from: Option<NodeIndex>,
    /// Settled: popped with its final cost
    closed: bool,
}

struct Search<N: SearchNode> {
    entries: Vec<NodeEntry<N>>,
    index_of: FxHashMap<N, NodeIndex>,
    open: OpenSet<N::Cost>,
}

impl<N: SearchNode> Search<N> {
    fn new(start: &N, h: N::Cost) -> Self {
        let mut search = Search {
            entries: Vec::new(),
            index_of: FxHashMap::default(),
            open: FibonacciHeap::with_comparator(
                by_f_score::<N::Cost> as fn(&OpenEntry<N::Cost>, &OpenEntry<N::Cost>) -> Ordering,
            ),
        };
        search.discover(start.clone(), N::Cost::default(), None);
        search.open.push((h, N::Cost::default(), 0));
        search
    }

    fn discover(&mut self, node: N, g_score: N::Cost, came_from: Option<NodeIndex>) -> NodeIndex {
        let index = self.entries.len();
        self.index_of.insert(node.clone(), index);
        self.entries.push(NodeEntry {
            node,
            g_score,
            came_from,
            closed: false,
        });
        index
    }

    /// Settles nodes in cost order until `stop` accepts one, returning its
    /// index, or until the reachable graph is exhausted
    ///
    /// `stop` sees every settled node with its final cost.
    fn run(
        &mut self,
        heuristic: impl Fn(&N) -> N::Cost,
        mut stop: impl FnMut(&N, N::Cost) -> bool,
    ) -> Option<NodeIndex> {
        while let Ok((_, g, current)) = self.open.pop() {
            let entry = &mut self.entries[current];
            if entry.closed || g > entry.g_score {
                continue;
            }
            entry.closed = true;

            let node = entry.node.clone();
            if stop(&node, g) {
                return Some(current);
            }

            for (neighbor, edge_cost) in node.successors() {
                let tentative = g + edge_cost;
                let index = match self.index_of.get(&neighbor) {
                    Some(&index) => {
                        let known = &mut self.entries[index];
                        if known.closed || tentative >= known.g_score {
                            continue;
                        }
                        known.g_score = tentative;
                        known.came_from = Some(current);
                        index
                    }
                    None => self.discover(neighbor, tentative, Some(current)),
                };
                let f = tentative + heuristic(&self.entries[index].node);
                self.open.push((f, tentative, index));
            }
        }
        None
    }

    fn path_to(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[current].node.clone()];
        while let Some(prev) = self.entries[current].came_from {
            path.push(self.entries[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Finds the cheapest path from `start` to the nearest goal node.
///
/// Returns the path (start and goal included) and its total cost, or `None`
/// if no goal is reachable.
pub fn dijkstra<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    let mut search = Search::new(start, N::Cost::default());
    let goal = search.run(|_| N::Cost::default(), |node, _| node.is_goal())?;
    let cost = search.entries[goal].g_score;
    Some((search.path_to(goal), cost))
}

/// A* search from `start` to the nearest goal node, guided by
/// [`AStarNode::heuristic`].
pub fn astar<N: AStarNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    let mut search = Search::new(start, start.heuristic());
    let goal = search.run(N::heuristic, |node, _| node.is_goal())?;
    let cost = search.entries[goal].g_score;
    tracing::debug!(discovered = search.entries.len(), "astar reached goal");
    Some((search.path_to(goal), cost))
}

/// Computes the shortest distance to every node reachable from `start`.
///
/// Each reachable node maps to its distance and its predecessor on one
/// shortest path (`None` for `start`). Goals are ignored.
pub fn shortest_paths<N: SearchNode>(start: &N) -> FxHashMap<N, (N::Cost, Option<N>)> {
    let mut search = Search::new(start, N::Cost::default());
    search.run(|_| N::Cost::default(), |_, _| false);
    tracing::debug!(settled = search.entries.len(), "shortest paths computed");

    search
        .entries
        .iter()
        .map(|entry| {
            let prev = entry.came_from.map(|i| search.entries[i].node.clone());
            (entry.node.clone(), (entry.g_score, prev))
        })
        .collect()
}

/// Returns every node reachable from `start` with a cost of at most
/// `max_cost`, paired with that cost, in non-decreasing cost order.
pub fn reachable_within<N: SearchNode>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)> {
    let mut search = Search::new(start, N::Cost::default());
    let mut result = Vec::new();
    search.run(
        |_| N::Cost::default(),
        |node, cost| {
            // Nodes settle in cost order, so the first one past the bound ends the search
            if cost > max_cost {
                return true;
            }
            result.push((node.clone(), cost));
            false
        },
    );
    result
}
