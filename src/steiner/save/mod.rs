/*!
# Save Structures

For a spanning tree `T` over all terminals, the *save edge* of two terminals `u, v` is the heaviest
edge on the path between them in `T`. Connecting three terminals through a common Steiner point
makes two of their three pairwise save edges superfluous: the *gain* of a triple is the weight of
these two distinct save edges. Contracting a triple merges its terminals in `T` with zero-weight
edges and drops both save edges.

All structures answer queries by *original* node ids of the terminals and implement [`Save`]:
- [`StaticTree`] stores all pairwise save edges in a table rebuilt after every contraction,
- [`StaticLcaTree`] rebuilds a [`HeaviestEdgeTree`] after every contraction,
- [`DynamicLcaTree`] rewires its [`HeaviestEdgeTree`] in place along the affected ancestor paths.

[`SaveStructure`] selects one of them at runtime.
*/

mod arborescence;
mod dynamic;
mod static_lca;
mod static_tree;

use log::trace;

use super::*;

pub use arborescence::*;
pub use dynamic::*;
pub use static_lca::*;
pub use static_tree::*;

/// Queries and contractions on the save edges of a terminal spanning tree.
pub trait Save<W: Weight> {
    /// Returns the heaviest edge on the tree path between terminals `u` and `v` as an edge of the
    /// structure's working tree, or `None` if the path has been contracted to zero weight
    fn save_edge(&self, u: Node, v: Node) -> Option<EdgeId>;

    /// Returns the weight of the heaviest edge on the tree path between terminals `u` and `v`
    fn save_weight(&self, u: Node, v: Node) -> W;

    /// Returns the total weight of the two distinct save edges among the three pairwise save
    /// edges of terminals `u`, `v` and `w`
    fn gain(&self, u: Node, v: Node, w: Node) -> W;

    /// Contracts the terminals of `triple`
    fn update(&mut self, triple: &Triple<W>);

    /// Returns *true* if two terminals of `triple` are already connected at zero cost
    fn already_contracted(&self, triple: &Triple<W>) -> bool {
        let [s0, s1, s2] = triple.terminals();
        self.save_weight(s0, s1).is_zero()
            || self.save_weight(s0, s2).is_zero()
            || self.save_weight(s1, s2).is_zero()
    }
}

/// Runtime selection of a save structure.
#[derive(Debug, Clone)]
pub enum SaveStructure<'a, W> {
    StaticTree(StaticTree<'a, W>),
    StaticLcaTree(StaticLcaTree<'a, W>),
    DynamicLcaTree(DynamicLcaTree<W>),
}

impl<W: Weight> Save<W> for SaveStructure<'_, W> {
    fn save_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        match self {
            Self::StaticTree(s) => s.save_edge(u, v),
            Self::StaticLcaTree(s) => s.save_edge(u, v),
            Self::DynamicLcaTree(s) => s.save_edge(u, v),
        }
    }

    fn save_weight(&self, u: Node, v: Node) -> W {
        match self {
            Self::StaticTree(s) => s.save_weight(u, v),
            Self::StaticLcaTree(s) => s.save_weight(u, v),
            Self::DynamicLcaTree(s) => s.save_weight(u, v),
        }
    }

    fn gain(&self, u: Node, v: Node, w: Node) -> W {
        match self {
            Self::StaticTree(s) => s.gain(u, v, w),
            Self::StaticLcaTree(s) => s.gain(u, v, w),
            Self::DynamicLcaTree(s) => s.gain(u, v, w),
        }
    }

    fn update(&mut self, triple: &Triple<W>) {
        match self {
            Self::StaticTree(s) => s.update(triple),
            Self::StaticLcaTree(s) => s.update(triple),
            Self::DynamicLcaTree(s) => s.update(triple),
        }
    }

    fn already_contracted(&self, triple: &Triple<W>) -> bool {
        match self {
            Self::StaticTree(s) => s.already_contracted(triple),
            Self::StaticLcaTree(s) => s.already_contracted(triple),
            Self::DynamicLcaTree(s) => s.already_contracted(triple),
        }
    }
}

/// Returns the copy of terminal `u` in a terminal tree
/// ** Panics if `u` is not a terminal of the tree **
fn tree_node<W: Weight>(tree: &GraphCopy<'_, W>, u: Node) -> Node {
    tree.copy_of_node(u)
        .unwrap_or_else(|| panic!("node {u} is not a terminal of the save structure"))
}

/// Contracts a triple in a working terminal tree given its three pairwise save edges
/// (`e01` of `s0, s1`, `e12` of `s1, s2` and `e02` of `s0, s2`): the two distinct save edges and
/// all direct edges between the terminals are replaced by zero-weight edges from `s0` to `s1`
/// and `s2`.
fn contract_in_tree<W: Weight>(
    tree: &mut GraphCopy<'_, W>,
    triple: &Triple<W>,
    e01: Option<EdgeId>,
    e12: Option<EdgeId>,
    e02: Option<EdgeId>,
) {
    let [c0, c1, c2] = triple.terminals().map(|s| tree_node(tree, s));

    let (first, second) = if e01 == e12 { (e12, e02) } else { (e01, e12) };
    for e in [first, second].into_iter().flatten() {
        if tree.has_edge_id(e) {
            tree.remove_edge(e);
        }
    }

    for (a, b) in [(c0, c1), (c0, c2), (c1, c2)] {
        while let Some(e) = tree.find_edge(a, b) {
            tree.remove_edge(e);
        }
    }

    tree.new_dummy_edge(c0, c1, W::zero());
    tree.new_dummy_edge(c0, c2, W::zero());
    trace!(
        "Contracted terminals {:?} in the terminal tree",
        triple.terminals()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_pcg::Pcg64Mcg;

    /// Random tree over `0..n` whose edge weights are a permutation of `1..n`
    fn distinct_weight_tree(rng: &mut impl Rng, n: NumNodes) -> WeightedGraph<u32> {
        let shape = random_weighted_tree(rng, n, 1..=1);
        let mut weights = (1..n).collect_vec();
        weights.shuffle(rng);

        WeightedGraph::from_edges(
            n,
            shape
                .edges()
                .zip(weights)
                .map(|((_, Edge(u, v), _), w)| (u, v, w)),
        )
    }

    fn all_structures<'a>(tree: &GraphCopy<'a, u32>) -> Vec<SaveStructure<'a, u32>> {
        vec![
            SaveStructure::StaticTree(StaticTree::new(tree)),
            SaveStructure::StaticLcaTree(StaticLcaTree::new(tree)),
            SaveStructure::DynamicLcaTree(DynamicLcaTree::new(tree)),
        ]
    }

    #[test]
    fn save_edges_match_path_maximum() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for n in [2, 3, 8, 25] {
            let graph = random_weighted_tree(rng, n, 0..=9);
            let tree = GraphCopy::from_original(&graph);

            for save in all_structures(&tree) {
                for (u, v) in (0..n).tuple_combinations() {
                    let path = tree_path(&graph, u, v);
                    let heaviest = path.iter().map(|&e| graph.weight_of(e)).max().unwrap();
                    assert_eq!(save.save_weight(u, v), heaviest);

                    let e = save.save_edge(u, v).unwrap();
                    assert!(path.contains(&e));
                    assert_eq!(graph.weight_of(e), heaviest);
                }
            }
        }
    }

    #[test]
    fn gain_counts_two_distinct_save_edges() {
        // 0 -4- 1 -1- 2 -3- 3
        let graph = WeightedGraph::from_edges(4, [(0, 1, 4u32), (1, 2, 1), (2, 3, 3)]);
        let tree = GraphCopy::from_original(&graph);

        for save in all_structures(&tree) {
            assert_eq!(save.gain(0, 2, 3), 7);
            assert_eq!(save.gain(1, 2, 3), 4);
            assert_eq!(save.gain(3, 1, 0), 7);
        }
    }

    #[test]
    fn contraction_zeroes_triple() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 4u32), (1, 2, 1), (2, 3, 3)]);
        let tree = GraphCopy::from_original(&graph);
        let triple = Triple::new(0, 2, 3, 0, 5);

        for mut save in all_structures(&tree) {
            assert!(!save.already_contracted(&triple));
            save.update(&triple);
            assert!(save.already_contracted(&triple));

            assert_eq!(save.save_weight(0, 3), 0);
            assert_eq!(save.save_weight(2, 3), 0);
            assert_eq!(save.save_weight(1, 2), 1);
            assert_eq!(save.save_weight(0, 1), 1);
        }
    }

    /// Applies random contractions to all structures built for `graph` and compares them
    /// against the heaviest edges of the working tree after every step
    fn assert_agreement_after_contractions(rng: &mut Pcg64Mcg, graph: &WeightedGraph<u32>) {
        let n = graph.number_of_nodes();
        let tree = GraphCopy::from_original(graph);
        let mut structures = all_structures(&tree);

        for _ in 0..n {
            let picked = rand::seq::index::sample(rng, n as usize, 3);
            let [s0, s1, s2] = [0, 1, 2].map(|i| picked.index(i) as Node);
            let triple = Triple::new(s0, s1, s2, s0, 0);
            let contracted = structures.iter().map(|s| s.already_contracted(&triple)).collect_vec();
            assert!(contracted.iter().all_equal());
            if contracted[0] {
                continue;
            }

            for save in structures.iter_mut() {
                save.update(&triple);
            }

            let SaveStructure::StaticTree(reference) = &structures[0] else {
                unreachable!()
            };
            let working = reference.tree();
            for (u, v) in (0..n).tuple_combinations() {
                let heaviest = tree_path(working, u, v)
                    .iter()
                    .map(|&e| working.weight_of(e))
                    .max()
                    .unwrap();
                for save in &structures {
                    assert_eq!(save.save_weight(u, v), heaviest);
                }
            }

            let w = rng.random_range(0..n);
            if w != s0 && w != s1 {
                let gains = structures.iter().map(|s| s.gain(s0, s1, w)).collect_vec();
                assert!(gains.iter().all_equal());
            }

            if let SaveStructure::DynamicLcaTree(dynamic) = &structures[2] {
                assert!(dynamic.arborescence().is_heap_ordered());
            }
        }
    }

    #[test]
    fn structures_agree_after_contractions() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in [5, 12, 30] {
            for _ in 0..4 {
                let graph = distinct_weight_tree(rng, n);
                assert_agreement_after_contractions(rng, &graph);
            }
        }
    }

    #[test]
    fn structures_agree_with_tied_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(12);

        for n in [5, 12, 30] {
            for _ in 0..4 {
                let graph = random_weighted_tree(rng, n, 1..=2);
                assert_agreement_after_contractions(rng, &graph);
            }
        }

        // all edges equally heavy
        for n in [4, 9] {
            let graph = random_weighted_tree(rng, n, 5..=5);
            assert_agreement_after_contractions(rng, &graph);
        }
    }

    #[test]
    fn structures_agree_with_zero_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(13);

        for n in [5, 12, 30] {
            for _ in 0..4 {
                let graph = random_weighted_tree(rng, n, 0..=2);
                assert_agreement_after_contractions(rng, &graph);
            }
        }

        // 0 -0- 1 -3- 2 -0- 3 -3- 4
        let graph = WeightedGraph::from_edges(5, [(0, 1, 0u32), (1, 2, 3), (2, 3, 0), (3, 4, 3)]);
        let tree = GraphCopy::from_original(&graph);
        for mut save in all_structures(&tree) {
            assert_eq!(save.save_weight(0, 1), 0);
            assert_eq!(save.gain(0, 2, 4), 6);
            assert!(save.already_contracted(&Triple::new(0, 1, 4, 2, 7)));

            save.update(&Triple::new(0, 2, 4, 2, 6));
            for (u, v) in (0..5).tuple_combinations() {
                assert_eq!(save.save_weight(u, v), 0);
            }
        }
    }
}
