use crate::route::primitives::PathCost;

use indexmap::map::Entry;
use indexmap::IndexMap;
use pathfinding::num_traits::Zero;
use petgraph::graph::{EdgeIndex, NodeIndex};
use rustc_hash::{FxHashSet, FxHasher};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Parent slot, the edge taken into the node, and the cost so far.
type Parent = (usize, Option<EdgeIndex>, PathCost);

#[derive(Debug)]
struct SmallestHolder {
    estimate: f64,
    index: usize,
}

impl PartialEq for SmallestHolder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.estimate.total_cmp(&other.estimate) == Ordering::Equal
    }
}

impl Eq for SmallestHolder {}

impl PartialOrd for SmallestHolder {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestHolder {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.estimate.total_cmp(&self.estimate)
    }
}

/// A path found by [`AStar::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reached {
    /// Visited nodes, from the start to the target inclusive.
    pub nodes: Vec<NodeIndex>,
    /// Traversed edges, one fewer than the nodes.
    pub edges: Vec<EdgeIndex>,
    pub total_cost: PathCost,
}

pub struct AStar;

impl AStar {
    /// Finds the cheapest path from `start` to `target`.
    ///
    /// The `successors` function receives the current node, and returns
    /// an iterator of successors with the edge leading to them and its
    /// move cost. The `heuristic` must never overestimate the remaining
    /// cost to the target, a zero heuristic degenerates to dijkstra.
    pub fn search<FN, IN, H>(
        &self,
        start: NodeIndex,
        target: NodeIndex,
        mut successors: FN,
        mut heuristic: H,
    ) -> Option<Reached>
    where
        FN: FnMut(NodeIndex) -> IN,
        IN: IntoIterator<Item = (NodeIndex, EdgeIndex, PathCost)>,
        H: FnMut(NodeIndex) -> f64,
    {
        let mut to_see: BinaryHeap<SmallestHolder> = BinaryHeap::with_capacity(256);
        to_see.push(SmallestHolder {
            estimate: heuristic(start),
            index: 0,
        });

        let mut parents: FxIndexMap<NodeIndex, Parent> =
            FxIndexMap::with_capacity_and_hasher(64, BuildHasherDefault::<FxHasher>::default());
        parents.insert(start, (usize::MAX, None, Zero::zero()));

        let mut seen = FxHashSet::default();

        while let Some(SmallestHolder { index, .. }) = to_see.pop() {
            if !seen.insert(index) {
                continue;
            }

            let (node, cost) = match parents.get_index(index) {
                Some((node, (_, _, cost))) => (*node, *cost),
                None => continue,
            };

            if node == target {
                return Some(Self::unwind(&parents, index));
            }

            for (successor, edge, move_cost) in successors(node) {
                let new_cost = cost + move_cost;

                let index = match parents.entry(successor) {
                    Entry::Vacant(e) => {
                        let n = e.index();
                        e.insert((index, Some(edge), new_cost));
                        n
                    }
                    Entry::Occupied(mut e) => {
                        // Settled nodes keep their parent, so the
                        // parent chain can never form a cycle.
                        if e.get().2 > new_cost && !seen.contains(&e.index()) {
                            e.insert((index, Some(edge), new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };

                to_see.push(SmallestHolder {
                    estimate: new_cost.cost + heuristic(successor),
                    index,
                });
            }
        }

        None
    }

    fn unwind(parents: &FxIndexMap<NodeIndex, Parent>, target: usize) -> Reached {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut total_cost = PathCost::zero();

        let mut index = target;
        while let Some((node, (parent, edge, cost))) = parents.get_index(index) {
            if index == target {
                total_cost = *cost;
            }

            nodes.push(*node);
            edges.extend(*edge);
            index = *parent;
        }

        nodes.reverse();
        edges.reverse();

        Reached {
            nodes,
            edges,
            total_cost,
        }
    }
}
