use std::collections::VecDeque;

use stream_bitset::prelude::*;

use super::*;

/// Reachability queries based on breadth-first search.
pub trait Connectivity: AdjacencyList {
    /// Returns the set of all nodes reachable from `start` (including `start`).
    /// ** Panics if `start` is not a live node **
    fn reachable_from(&self, start: Node) -> NodeBitSet {
        assert!(self.has_node(start));
        let mut visited = self.vertex_bitset_unset();
        let mut queue = VecDeque::from([start]);
        visited.set_bit(start);

        while let Some(u) = queue.pop_front() {
            for v in self.neighbors_of(u) {
                if !visited.set_bit(v) {
                    queue.push_back(v);
                }
            }
        }

        visited
    }

    /// Returns *true* if all live nodes lie in a single connected component.
    /// The empty graph is considered connected.
    ///
    /// # Example
    /// ```
    /// use steiner_approx::{prelude::*, algo::*};
    ///
    /// let mut graph = WeightedGraph::from_edges(3, [(0, 1, 1u32)]);
    /// assert!(!graph.is_connected());
    ///
    /// graph.add_edge(2, 1, 1);
    /// assert!(graph.is_connected());
    /// ```
    fn is_connected(&self) -> bool {
        match self.vertices().next() {
            Some(u) => self.reachable_from(u).cardinality() == self.number_of_nodes(),
            None => true,
        }
    }
}

impl<G: AdjacencyList> Connectivity for G {}
