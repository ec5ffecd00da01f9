/*!
# Mehlhorn

A faster variant of [`Kou`](super::Kou): instead of one shortest path tree per terminal, a single
multi-source Dijkstra run partitions the graph into Voronoi regions around the terminals.
Every edge `{u, v}` crossing two regions yields a *bridge candidate* of value
`dist(u) + dist(v) + w(u, v)` between the seeds of `u` and `v`. The cheapest candidate per pair of
regions becomes an edge of the terminal distance graph, whose minimum spanning tree is expanded
into region paths plus bridge edges.

Candidates are grouped per pair of regions by two stable bucket sorts, so the whole algorithm
runs in `O(m + n log n)`.
*/

use log::debug;

use super::*;
use crate::utils::bucket_sort_by_key;

/// Mehlhorn's 2-approximation.
///
/// # Example
/// ```
/// use steiner_approx::{prelude::*, steiner::*};
///
/// let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (1, 3, 1), (0, 3, 5), (3, 2, 4)]);
/// let terminals = Terminals::new(&graph, [0, 3]).unwrap();
///
/// let solution = Mehlhorn::new().call(&graph, &terminals).unwrap();
/// assert_eq!(solution.weight(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Mehlhorn;

impl Mehlhorn {
    /// Creates a new instance
    pub fn new() -> Self {
        Self
    }
}

/// An edge crossing the Voronoi regions of two distinct seeds
#[derive(Debug, Clone, Copy)]
struct BridgeCandidate<W> {
    seeds: (Node, Node),
    value: W,
    bridge: EdgeId,
}

impl<W: Weight> BridgeCandidate<W> {
    fn lower_seed(&self) -> usize {
        self.seeds.0.min(self.seeds.1) as usize
    }

    fn upper_seed(&self) -> usize {
        self.seeds.0.max(self.seeds.1) as usize
    }
}

/// Collects all bridge candidates and sorts them lexicographically by their pair of seeds
fn sorted_bridge_candidates<W: Weight>(
    graph: &WeightedGraph<W>,
    voronoi: &Voronoi<W>,
) -> Vec<BridgeCandidate<W>> {
    let candidates: Vec<_> = graph
        .edges()
        .filter_map(|(e, Edge(u, v), w)| {
            let seeds = (voronoi.seed_of(u)?, voronoi.seed_of(v)?);
            (seeds.0 != seeds.1).then(|| BridgeCandidate {
                seeds,
                value: voronoi.distance(u) + voronoi.distance(v) + w,
                bridge: e,
            })
        })
        .collect();

    let buckets = graph.node_bound() as usize;
    let candidates = bucket_sort_by_key(candidates, buckets, BridgeCandidate::upper_seed);
    bucket_sort_by_key(candidates, buckets, BridgeCandidate::lower_seed)
}

/// Inserts the path from `u` towards its seed until the path hits an edge already in `tree`
fn insert_region_path<W: Weight>(tree: &mut GraphCopy<'_, W>, voronoi: &Voronoi<W>, u: Node) {
    tree.copy_or_insert_node(u);

    let mut current = u;
    while let Some(e) = voronoi.predecessor_edge(current) {
        if tree.is_mapped(e) {
            break;
        }
        tree.new_edge(e);
        current = tree.original().opposite(e, current);
    }
}

impl MinSteinerTree for Mehlhorn {
    fn call<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
    ) -> Result<SteinerSolution<'a, W>, SteinerError> {
        terminals.ensure_connected(graph)?;

        let voronoi = graph.voronoi_regions(terminals.as_slice());

        let mut distance_graph = GraphCopy::new_empty(graph);
        for t in terminals.iter() {
            distance_graph.new_node(t);
        }

        // bridge of every edge of the distance graph, indexed by edge id
        let mut bridges = Vec::new();
        let candidates = sorted_bridge_candidates(graph, &voronoi);
        for group in candidates.chunk_by(|a, b| {
            (a.lower_seed(), a.upper_seed()) == (b.lower_seed(), b.upper_seed())
        }) {
            let Some(best) = group.iter().min_by(|a, b| a.value.cmp_weight(&b.value)) else {
                continue;
            };
            let (Some(cu), Some(cv)) = (
                distance_graph.copy_of_node(best.seeds.0),
                distance_graph.copy_of_node(best.seeds.1),
            ) else {
                continue;
            };
            distance_graph.new_dummy_edge(cu, cv, best.value);
            bridges.push(best.bridge);
        }
        debug!(
            "Mehlhorn: distance graph over {} terminals has {} edges",
            terminals.len(),
            bridges.len()
        );

        distance_graph.reduce_to_minimum_spanning_tree();

        let mut tree = GraphCopy::new_empty(graph);
        for t in terminals.iter() {
            tree.new_node(t);
        }

        for e in distance_graph.edge_ids() {
            let bridge = bridges[e as usize];
            let Edge(u, v) = graph.endpoints_of(bridge);
            insert_region_path(&mut tree, &voronoi, u);
            insert_region_path(&mut tree, &voronoi, v);
            insert_path(&mut tree, &[bridge]);
        }

        let weight = tree.reduce_to_minimum_spanning_tree()
            - tree.eliminate_one_degree_steiner_nodes(terminals);
        debug_assert!(tree.is_steiner_tree(terminals));
        debug!("Mehlhorn: Steiner tree of weight {weight}");

        Ok(SteinerSolution::new(weight, tree))
    }
}

#[cfg(test)]
crate::testing::test_steiner_algorithm!(mehlhorn_instances, Mehlhorn::new());

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn cheapest_bridge_per_region_pair() {
        // node 1 lies in the region of 0; both 0 - 3 and 1 - 3 cross the two regions
        let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (1, 3, 1), (0, 3, 5), (3, 2, 4)]);
        let terminals = Terminals::new(&graph, [0, 3]).unwrap();
        let voronoi = graph.voronoi_regions(terminals.as_slice());

        let candidates = sorted_bridge_candidates(&graph, &voronoi);
        assert_eq!(
            candidates.iter().map(|c| (c.bridge, c.value)).collect_vec(),
            vec![(1, 2), (2, 5)]
        );

        let solution = Mehlhorn::new().call(&graph, &terminals).unwrap();
        assert_eq!(solution.weight(), 2);
        assert_eq!(solution.tree().original_edges().sorted().collect_vec(), vec![0, 1]);
        assert!(solution.tree().copy_of_node(2).is_none());
    }

    #[test]
    fn candidates_are_grouped_by_seed_pairs() {
        // path of four terminals: every edge is a bridge
        let graph = WeightedGraph::from_edges(4, [(2, 3, 1u32), (0, 1, 1), (1, 2, 1), (3, 0, 1)]);
        let terminals = Terminals::new(&graph, [0, 1, 2, 3]).unwrap();
        let voronoi = graph.voronoi_regions(terminals.as_slice());

        let pairs = sorted_bridge_candidates(&graph, &voronoi)
            .iter()
            .map(|c| (c.lower_seed(), c.upper_seed()))
            .collect_vec();
        assert_eq!(pairs, vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    }
}
