/*!
# Voronoi Regions

Partitions the nodes of a graph into *regions* around a set of seeds: each node belongs to the
region of its closest seed. Regions are computed by a single multi-source Dijkstra run; a node
reachable from several seeds at the same distance belongs to the seed that reaches it first.
*/

use std::collections::BinaryHeap;

use fxhash::FxHashMap;

use super::*;

/// Voronoi regions of a graph together with the shortest path trees leading to the seeds.
#[derive(Debug, Clone)]
pub struct Voronoi<W> {
    seed: Vec<Option<OptionalNode>>,
    distance: Vec<W>,
    predecessor: Vec<Option<OptionalEdge>>,
    regions: FxHashMap<Node, Vec<Node>>,
}

impl<W: Weight> Voronoi<W> {
    /// Computes the Voronoi regions of `seeds` in `graph`.
    /// ** Panics if a seed is not a live node **
    pub fn new<G>(graph: &G, seeds: &[Node]) -> Self
    where
        G: AdjacencyList<Weight = W>,
    {
        let n = graph.node_bound() as usize;
        let mut voronoi = Self {
            seed: vec![None; n],
            distance: vec![W::infinity(); n],
            predecessor: vec![None; n],
            regions: seeds.iter().map(|&s| (s, Vec::new())).collect(),
        };

        let mut heap = BinaryHeap::new();
        for &s in seeds {
            assert!(graph.has_node(s));
            voronoi.seed[s as usize] = some_node(s);
            voronoi.distance[s as usize] = W::zero();
            heap.push(MinEntry::new(W::zero(), s));
        }

        while let Some(MinEntry { key, item: u }) = heap.pop() {
            if key > voronoi.distance[u as usize] {
                continue;
            }

            let seed = voronoi.seed[u as usize];
            if let Some(region) = seed.and_then(|s| voronoi.regions.get_mut(&s.get())) {
                // duplicate seeds are settled twice
                if region.last() != Some(&u) {
                    region.push(u);
                }
            }

            for (v, e) in graph.incident_edges_of(u) {
                let nd = key + graph.weight_of(e);
                if nd < voronoi.distance[v as usize] {
                    voronoi.distance[v as usize] = nd;
                    voronoi.predecessor[v as usize] = OptionalEdge::new(e);
                    voronoi.seed[v as usize] = seed;
                    heap.push(MinEntry::new(nd, v));
                }
            }
        }

        voronoi
    }

    /// Returns the seed whose region contains `u` (`None` if `u` is unreachable from all seeds)
    pub fn seed_of(&self, u: Node) -> Option<Node> {
        self.seed[u as usize].map(|s| s.get())
    }

    /// Returns the distance of `u` to its seed (or [`Weight::infinity`] if unreachable)
    pub fn distance(&self, u: Node) -> W {
        self.distance[u as usize]
    }

    /// Returns the last edge on the shortest path from the seed of `u` to `u`
    pub fn predecessor_edge(&self, u: Node) -> Option<EdgeId> {
        self.predecessor[u as usize].map(|e| e.get())
    }

    /// Returns all nodes of the region of `seed` in the order they were settled (the seed first).
    /// Returns an empty slice if `seed` is not a seed.
    pub fn nodes_in_region(&self, seed: Node) -> &[Node] {
        self.regions
            .get(&seed)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Computes Voronoi regions directly on a graph.
pub trait VoronoiRegions: AdjacencyList {
    /// Partitions all nodes reachable from `seeds` into regions around their closest seed.
    ///
    /// # Example
    /// ```
    /// use steiner_approx::{prelude::*, algo::*};
    ///
    /// // 0 -1- 1 -1- 2 -5- 3
    /// let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (1, 2, 1), (2, 3, 5)]);
    /// let voronoi = graph.voronoi_regions(&[0, 3]);
    ///
    /// assert_eq!(voronoi.seed_of(2), Some(0));
    /// assert_eq!(voronoi.distance(2), 2);
    /// assert_eq!(voronoi.nodes_in_region(0), &[0, 1, 2]);
    /// assert_eq!(voronoi.nodes_in_region(3), &[3]);
    /// ```
    fn voronoi_regions(&self, seeds: &[Node]) -> Voronoi<Self::Weight> {
        Voronoi::new(self, seeds)
    }
}

impl<G: AdjacencyList> VoronoiRegions for G {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_partition_nodes() {
        // two stars connected by a long edge
        let graph = WeightedGraph::from_edges(
            7,
            [
                (0, 1, 1u32),
                (0, 2, 2),
                (3, 4, 1),
                (3, 5, 1),
                (2, 4, 10),
                (1, 5, 3),
            ],
        );
        let voronoi = graph.voronoi_regions(&[0, 3]);

        for u in [0, 1, 2] {
            assert_eq!(voronoi.seed_of(u), Some(0));
        }
        for u in [3, 4, 5] {
            assert_eq!(voronoi.seed_of(u), Some(3));
        }
        assert_eq!(voronoi.seed_of(6), None);

        let mut all: Vec<_> = [0, 3]
            .iter()
            .flat_map(|&s| voronoi.nodes_in_region(s).to_vec())
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(voronoi.predecessor_edge(5), Some(3));
        assert_eq!(voronoi.distance(2), 2);
        assert!(voronoi.distance(6).is_unreached());
        assert!(voronoi.nodes_in_region(1).is_empty());
    }
}
