/*!
# Single-Source Shortest Paths

Dijkstra's algorithm on graphs with non-negative edge weights.
The result is a [`ShortestPathTree`] storing the distance and the predecessor edge of every node.

Ties are broken deterministically: nodes with equal distance are settled in increasing order of
their ids and a node keeps the first predecessor edge reaching it with its final distance.
*/

use std::collections::BinaryHeap;

use num::Zero;

use super::*;

/// Distances and predecessor edges of a shortest path search.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<W> {
    distance: Vec<W>,
    predecessor: Vec<Option<OptionalEdge>>,
}

impl<W: Weight> ShortestPathTree<W> {
    /// Returns the distance to `u` or `None` if `u` was not reached
    pub fn distance(&self, u: Node) -> Option<W> {
        let d = self.distance[u as usize];
        (!d.is_unreached()).then_some(d)
    }

    /// Returns the distance to `u` or [`Weight::infinity`] if `u` was not reached
    pub fn distance_or_infinity(&self, u: Node) -> W {
        self.distance[u as usize]
    }

    /// Returns *true* if `u` was reached
    pub fn is_reached(&self, u: Node) -> bool {
        !self.distance[u as usize].is_unreached()
    }

    /// Returns the last edge of the shortest path to `u` (`None` for sources and unreached nodes)
    pub fn predecessor_edge(&self, u: Node) -> Option<EdgeId> {
        self.predecessor[u as usize].map(|e| e.get())
    }

    /// Returns the edges of the shortest path from `target` back to its source.
    /// The path is empty if `target` is a source or was not reached.
    pub fn path_to<G>(&self, graph: &G, target: Node) -> Vec<EdgeId>
    where
        G: AdjacencyList<Weight = W>,
    {
        let mut path = Vec::new();
        let mut u = target;
        while let Some(e) = self.predecessor_edge(u) {
            path.push(e);
            u = graph.opposite(e, u);
        }
        path
    }
}

/// Runs Dijkstra's algorithm directly on a graph.
pub trait ShortestPaths: AdjacencyList {
    /// Computes shortest paths from `source` to all nodes.
    /// ** Panics if `source` is not a live node **
    ///
    /// # Example
    /// ```
    /// use steiner_approx::{prelude::*, algo::*};
    ///
    /// let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (1, 2, 1), (0, 2, 5)]);
    /// let sp = graph.dijkstra(0);
    ///
    /// assert_eq!(sp.distance(2), Some(2));
    /// assert_eq!(sp.distance(3), None);
    /// assert_eq!(sp.path_to(&graph, 2), vec![1, 0]);
    /// ```
    fn dijkstra(&self, source: Node) -> ShortestPathTree<Self::Weight> {
        self.dijkstra_multi_source([source])
    }

    /// Computes shortest paths from the closest of all `sources` to all nodes.
    fn dijkstra_multi_source<I>(&self, sources: I) -> ShortestPathTree<Self::Weight>
    where
        I: IntoIterator<Item = Node>,
    {
        let n = self.node_bound() as usize;
        let mut distance = vec![Self::Weight::infinity(); n];
        let mut predecessor = vec![None; n];
        let mut heap = BinaryHeap::new();

        for s in sources {
            assert!(self.has_node(s));
            distance[s as usize] = Self::Weight::zero();
            heap.push(MinEntry::new(Self::Weight::zero(), s));
        }

        while let Some(MinEntry { key, item: u }) = heap.pop() {
            if key > distance[u as usize] {
                continue;
            }

            for (v, e) in self.incident_edges_of(u) {
                let nd = key + self.weight_of(e);
                if nd < distance[v as usize] {
                    distance[v as usize] = nd;
                    predecessor[v as usize] = OptionalEdge::new(e);
                    heap.push(MinEntry::new(nd, v));
                }
            }
        }

        ShortestPathTree {
            distance,
            predecessor,
        }
    }
}

impl<G: AdjacencyList> ShortestPaths for G {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_and_paths() {
        // 0 -1- 1 -2- 2
        // |           |
        // 4 --- 3 -1--+
        let graph = WeightedGraph::from_edges(
            5,
            [(0, 1, 1u32), (1, 2, 2), (2, 3, 1), (3, 4, 1), (4, 0, 4)],
        );

        let sp = graph.dijkstra(0);
        let dist: Vec<_> = (0..5).map(|u| sp.distance(u).unwrap()).collect();
        assert_eq!(dist, vec![0, 1, 3, 4, 4]);

        assert_eq!(sp.predecessor_edge(0), None);
        assert_eq!(sp.path_to(&graph, 3), vec![2, 1, 0]);

        // the detour via node 3 is longer than the direct edge
        assert_eq!(sp.predecessor_edge(4), Some(4));
    }

    #[test]
    fn multi_source_and_unreachable() {
        let mut graph = WeightedGraph::from_edges(6, [(0, 1, 2.0f64), (1, 2, 2.0), (2, 3, 2.0)]);
        graph.add_edge(4, 4, 1.0);

        let sp = graph.dijkstra_multi_source([0, 3]);
        assert_eq!(sp.distance(1), Some(2.0));
        assert_eq!(sp.distance(2), Some(2.0));
        assert_eq!(sp.path_to(&graph, 2), vec![2]);
        assert!(!sp.is_reached(4));
        assert!(sp.distance_or_infinity(5).is_unreached());
    }

    #[test]
    fn float_distances_of_unreached_nodes() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 0.5f64), (2, 3, 1.5)]);

        let sp = graph.dijkstra(0);
        assert_eq!(sp.distance(1), Some(0.5));
        assert_eq!(sp.distance(2), None);
        assert!(!sp.is_reached(3));
        assert_eq!(sp.distance_or_infinity(3), f64::MAX);
        assert!(sp.distance_or_infinity(3).is_unreached());
        assert!(!sp.distance_or_infinity(1).is_unreached());
    }
}
