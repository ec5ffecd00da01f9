use std::ops::RangeInclusive;

use rand::Rng;

use crate::{
    algo::MinimumSpanningTree, gens::RandomWeightedGraph, prelude::*, steiner::Terminals,
};

/// Enables log output in tests run with `RUST_LOG` set; repeated calls are ignored
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a random spanning tree over `n` nodes
pub fn random_weighted_tree<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    weights: RangeInclusive<u32>,
) -> WeightedGraph<u32> {
    WeightedGraph::random_tree(rng, n, weights)
}

/// Returns the edges of the unique path between `u` and `v` in `tree`
/// ** Panics if `v` is not reachable from `u` **
pub fn tree_path<G: AdjacencyList>(tree: &G, u: Node, v: Node) -> Vec<EdgeId> {
    let mut arrival: Vec<Option<EdgeId>> = vec![None; tree.node_bound() as usize];
    let mut visited = vec![false; tree.node_bound() as usize];
    let mut queue = std::collections::VecDeque::from([u]);
    visited[u as usize] = true;

    while let Some(x) = queue.pop_front() {
        for (y, e) in tree.incident_edges_of(x) {
            if !visited[y as usize] {
                visited[y as usize] = true;
                arrival[y as usize] = Some(e);
                queue.push_back(y);
            }
        }
    }

    assert!(visited[v as usize], "{v} is not reachable from {u}");
    let mut path = Vec::new();
    let mut x = v;
    while let Some(e) = arrival[x as usize] {
        path.push(e);
        x = tree.opposite(e, x);
    }
    path
}

/// Creates a connected graph with `n` nodes, `m` edges of weight `1..=10` and `k` random terminals
pub fn random_instance<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    m: NumEdges,
    k: usize,
) -> (WeightedGraph<u32>, Terminals) {
    let graph = WeightedGraph::random_connected(rng, n, m, 1..=10);
    let terminals = Terminals::new(
        &graph,
        rand::seq::index::sample(rng, n as usize, k)
            .into_iter()
            .map(|i| i as Node),
    )
    .unwrap();
    (graph, terminals)
}

/// Computes the weight of a minimum Steiner tree by trying every set of Steiner nodes.
/// Only feasible for small graphs.
pub fn brute_force_steiner_weight(graph: &WeightedGraph<u32>, terminals: &Terminals) -> u32 {
    let steiner_nodes: Vec<Node> = graph.vertices().filter(|&u| !terminals.contains(u)).collect();
    assert!(steiner_nodes.len() < 20);

    (0u32..(1 << steiner_nodes.len()))
        .filter_map(|mask| {
            let nodes = terminals.iter().chain(
                steiner_nodes
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| mask & (1 << i) != 0)
                    .map(|(_, &u)| u),
            );
            let induced = GraphCopy::induced(graph, nodes);
            let mst = induced.minimum_spanning_tree();
            mst.is_connected().then(|| mst.weight())
        })
        .min()
        .unwrap()
}

/// Path `0 - 1 - 2 - 3 - 4` with unit weights and terminals `{0, 2, 4}`
pub fn path_graph() -> (WeightedGraph<u32>, Terminals) {
    let graph = WeightedGraph::from_edges(5, [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 4, 1)]);
    let terminals = Terminals::new(&graph, [0, 2, 4]).unwrap();
    (graph, terminals)
}

/// Star with center `0`, terminals `1` and `2` and the extra leaf `3`
pub fn star_with_extra_leaf() -> (WeightedGraph<u32>, Terminals) {
    let graph = WeightedGraph::from_edges(4, [(0, 1, 1), (0, 2, 1), (0, 3, 1)]);
    let terminals = Terminals::new(&graph, [1, 2]).unwrap();
    (graph, terminals)
}

/// The example graph from the Wikipedia article on Steiner trees in graphs.
/// A minimum Steiner tree has weight `190`.
pub fn wiki_example() -> (WeightedGraph<u32>, Terminals) {
    let graph = WeightedGraph::from_edges(
        12,
        [
            (0, 1, 15),
            (1, 2, 30),
            (2, 3, 50),
            (3, 6, 30),
            (0, 4, 25),
            (1, 8, 50),
            (1, 5, 45),
            (2, 5, 40),
            (5, 7, 60),
            (6, 7, 20),
            (4, 8, 30),
            (8, 10, 15),
            (7, 9, 50),
            (10, 9, 40),
            (11, 10, 10),
        ],
    );
    let terminals = Terminals::new(&graph, [0, 8, 11, 6, 7]).unwrap();
    (graph, terminals)
}

/// Every Steiner tree approximation must return valid trees within twice the optimum
macro_rules! test_steiner_algorithm {
    ($env:ident, $algo:expr) => {
        #[cfg(test)]
        mod $env {
            use super::*;
            use crate::{
                prelude::*, repr::digest::GraphDigest, steiner::*,
                testing::{self, test_steiner_algorithm},
            };
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            test_steiner_algorithm!(@case within_twice_the_optimum, $algo);
            test_steiner_algorithm!(@case deterministic, $algo);
            test_steiner_algorithm!(@case fixtures, $algo);
            test_steiner_algorithm!(@case errors, $algo);
        }
    };
    (@case within_twice_the_optimum, $algo:expr) => {
        #[test]
        fn within_twice_the_optimum() {
            testing::init_logger();
            let rng = &mut Pcg64Mcg::seed_from_u64(0x5eed);

            for _ in 0..40 {
                let n: NumNodes = rng.random_range(2..=10);
                let m = rng.random_range((n - 1)..=(n * (n - 1) / 2).min(2 * n));
                let k = rng.random_range(1..=(n as usize).min(6));
                let (graph, terminals) = testing::random_instance(rng, n, m, k);

                let solution = ($algo).call(&graph, &terminals).unwrap();
                let tree = solution.tree();
                assert!(tree.is_steiner_tree(&terminals));
                assert_eq!(solution.weight(), tree.total_weight());
                assert!(tree
                    .original_edges()
                    .all(|e| graph.weight_of(e) == tree.weight_of(tree.chain_of(e)[0])));

                let opt = testing::brute_force_steiner_weight(&graph, &terminals);
                assert!(solution.weight() >= opt);
                assert!(solution.weight() <= 2 * opt);
            }
        }
    };
    (@case deterministic, $algo:expr) => {
        #[test]
        fn deterministic() {
            let rng = &mut Pcg64Mcg::seed_from_u64(17);

            for _ in 0..10 {
                let (graph, terminals) = testing::random_instance(rng, 25, 60, 8);
                let first = ($algo).call(&graph, &terminals).unwrap();
                let second = ($algo).call(&graph, &terminals).unwrap();

                assert_eq!(first.weight(), second.weight());
                assert_eq!(first.tree().digest_sha256(), second.tree().digest_sha256());
            }
        }
    };
    (@case fixtures, $algo:expr) => {
        #[test]
        fn fixtures() {
            let (graph, terminals) = testing::path_graph();
            let solution = ($algo).call(&graph, &terminals).unwrap();
            assert_eq!(solution.weight(), 4);
            assert!(solution.tree().is_steiner_tree(&terminals));

            let (graph, terminals) = testing::star_with_extra_leaf();
            let solution = ($algo).call(&graph, &terminals).unwrap();
            assert_eq!(solution.weight(), 2);
            assert!(solution.tree().copy_of_node(3).is_none());
            assert!(solution.tree().is_steiner_tree(&terminals));

            let (graph, terminals) = testing::wiki_example();
            let solution = ($algo).call(&graph, &terminals).unwrap();
            assert!(solution.tree().is_steiner_tree(&terminals));
            assert!((190..=380).contains(&solution.weight()));

            let terminals = Terminals::new(&graph, [5]).unwrap();
            let solution = ($algo).call(&graph, &terminals).unwrap();
            assert_eq!(solution.weight(), 0);
            assert_eq!(solution.tree().number_of_nodes(), 1);
            assert_eq!(solution.tree().number_of_edges(), 0);
        }
    };
    (@case errors, $algo:expr) => {
        #[test]
        fn errors() {
            let graph = WeightedGraph::from_edges(4, [(0, 1, 2u32), (2, 3, 1)]);
            let terminals = Terminals::new(&graph, [1, 0, 3]).unwrap();
            assert_eq!(
                ($algo).call(&graph, &terminals).unwrap_err(),
                SteinerError::Disconnected {
                    terminal: 3,
                    from: 1
                }
            );
        }
    };
}

pub(crate) use test_steiner_algorithm;
