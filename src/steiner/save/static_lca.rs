use log::trace;

use super::*;

/// Save structure answering queries by lowest common ancestors in a [`HeaviestEdgeTree`].
///
/// Every contraction edits a private copy of the terminal spanning tree and rebuilds the
/// arborescence from scratch in `O(t log t)` for `t` terminals.
#[derive(Debug, Clone)]
pub struct StaticLcaTree<'a, W> {
    tree: GraphCopy<'a, W>,
    arborescence: HeaviestEdgeTree<W>,
    initial_edges: NumEdges,
}

impl<'a, W: Weight> StaticLcaTree<'a, W> {
    /// Builds the structure for a spanning tree over terminals given as a copy of the input graph
    pub fn new(terminal_tree: &GraphCopy<'a, W>) -> Self {
        Self {
            tree: terminal_tree.clone(),
            arborescence: HeaviestEdgeTree::build(terminal_tree),
            initial_edges: terminal_tree.edge_bound(),
        }
    }

    /// Returns the working terminal tree including all zero-weight contraction edges
    pub fn tree(&self) -> &GraphCopy<'a, W> {
        &self.tree
    }

    fn lca(&self, u: Node, v: Node) -> Node {
        self.arborescence
            .lca(tree_node(&self.tree, u), tree_node(&self.tree, v))
    }
}

impl<W: Weight> Save<W> for StaticLcaTree<'_, W> {
    fn save_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.arborescence
            .edge(self.lca(u, v))
            .filter(|&e| e < self.initial_edges)
    }

    fn save_weight(&self, u: Node, v: Node) -> W {
        self.arborescence.weight(self.lca(u, v))
    }

    fn gain(&self, u: Node, v: Node, w: Node) -> W {
        let save1 = self.lca(u, v);
        let mut save2 = self.lca(u, w);
        if save1 == save2 {
            save2 = self.lca(v, w);
        }
        self.arborescence.weight(save1) + self.arborescence.weight(save2)
    }

    fn update(&mut self, triple: &Triple<W>) {
        let [s0, s1, s2] = triple.terminals();
        let [e01, e12, e02] =
            [(s0, s1), (s1, s2), (s0, s2)].map(|(a, b)| self.arborescence.edge(self.lca(a, b)));

        contract_in_tree(&mut self.tree, triple, e01, e12, e02);
        self.arborescence = HeaviestEdgeTree::build(&self.tree);
        trace!(
            "Rebuilt arborescence over {} nodes",
            self.tree.number_of_nodes()
        );
    }
}
