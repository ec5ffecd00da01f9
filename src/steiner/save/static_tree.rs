use log::trace;

use super::*;

/// Lookup table of the heaviest edge between every pair of nodes of a tree.
///
/// The table is built by recursively splitting the tree at its heaviest edge: that edge is the
/// save edge of every pair of nodes on different sides of it. Building takes `O(n^2)` time
/// and space where `n` is the node bound of the tree.
#[derive(Debug, Clone, Default)]
pub(crate) struct SaveTable {
    size: usize,
    table: Vec<Option<OptionalEdge>>,
}

impl SaveTable {
    pub(crate) fn new<G: AdjacencyList>(tree: &G) -> Self {
        let size = tree.node_bound() as usize;
        let mut res = Self {
            size,
            table: vec![None; size * size],
        };

        let mut hidden = vec![false; tree.edge_bound() as usize];
        let mut visited = vec![false; size];
        for u in tree.vertices() {
            if !visited[u as usize] {
                for v in res.split(tree, &mut hidden, u) {
                    visited[v as usize] = true;
                }
            }
        }
        res
    }

    /// Fills the table for the component of `start` (ignoring hidden edges) and returns its nodes.
    /// The component has to be acyclic.
    fn split<G: AdjacencyList>(&mut self, tree: &G, hidden: &mut [bool], start: Node) -> Vec<Node> {
        let mut nodes = vec![start];
        let mut arrival: Vec<Option<EdgeId>> = vec![None];
        let mut heaviest: Option<(EdgeId, G::Weight)> = None;

        let mut i = 0;
        while i < nodes.len() {
            let (u, via) = (nodes[i], arrival[i]);
            i += 1;
            for (v, e) in tree.incident_edges_of(u) {
                if hidden[e as usize] || Some(e) == via {
                    continue;
                }
                nodes.push(v);
                arrival.push(Some(e));

                let w = tree.weight_of(e);
                if heaviest.is_none_or(|(_, max)| w > max) {
                    heaviest = Some((e, w));
                }
            }
        }

        if let Some((e, _)) = heaviest {
            hidden[e as usize] = true;
            let Edge(u, v) = tree.endpoints_of(e);
            let left = self.split(tree, hidden, u);
            let right = self.split(tree, hidden, v);

            for &a in &left {
                for &b in &right {
                    self.set(a, b, e);
                }
            }
        }
        nodes
    }

    fn set(&mut self, u: Node, v: Node, e: EdgeId) {
        let (u, v) = (u as usize, v as usize);
        self.table[u * self.size + v] = OptionalEdge::new(e);
        self.table[v * self.size + u] = OptionalEdge::new(e);
    }

    /// Returns the heaviest edge between tree nodes `u` and `v` (`None` if `u == v`)
    pub(crate) fn get(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.table[u as usize * self.size + v as usize].map(|e| e.get())
    }
}

/// Save structure that stores all pairwise save edges in a table.
///
/// Queries are table lookups; every contraction edits a private copy of the terminal spanning tree
/// and rebuilds the whole table in `O(t^2)` for `t` terminals.
#[derive(Debug, Clone)]
pub struct StaticTree<'a, W> {
    tree: GraphCopy<'a, W>,
    table: SaveTable,
    initial_edges: NumEdges,
}

impl<'a, W: Weight> StaticTree<'a, W> {
    /// Builds the structure for a spanning tree over terminals given as a copy of the input graph
    pub fn new(terminal_tree: &GraphCopy<'a, W>) -> Self {
        Self {
            tree: terminal_tree.clone(),
            table: SaveTable::new(terminal_tree),
            initial_edges: terminal_tree.edge_bound(),
        }
    }

    /// Returns the working terminal tree including all zero-weight contraction edges
    pub fn tree(&self) -> &GraphCopy<'a, W> {
        &self.tree
    }

    fn raw_save_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.table
            .get(tree_node(&self.tree, u), tree_node(&self.tree, v))
    }
}

impl<W: Weight> Save<W> for StaticTree<'_, W> {
    fn save_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.raw_save_edge(u, v)
            .filter(|&e| e < self.initial_edges)
    }

    fn save_weight(&self, u: Node, v: Node) -> W {
        self.raw_save_edge(u, v)
            .map_or(W::zero(), |e| self.tree.weight_of(e))
    }

    fn gain(&self, u: Node, v: Node, w: Node) -> W {
        let weights = [
            self.save_weight(u, v),
            self.save_weight(v, w),
            self.save_weight(u, w),
        ];

        let max = weights
            .into_iter()
            .max_by(|a, b| a.cmp_weight(b))
            .unwrap_or_else(W::zero);
        let min = weights
            .into_iter()
            .min_by(|a, b| a.cmp_weight(b))
            .unwrap_or_else(W::zero);
        max + min
    }

    fn update(&mut self, triple: &Triple<W>) {
        let [s0, s1, s2] = triple.terminals();
        let e01 = self.raw_save_edge(s0, s1);
        let e12 = self.raw_save_edge(s1, s2);
        let e02 = self.raw_save_edge(s0, s2);

        contract_in_tree(&mut self.tree, triple, e01, e12, e02);
        self.table = SaveTable::new(&self.tree);
        trace!("Rebuilt save table over {} nodes", self.tree.number_of_nodes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_on_path() {
        // 0 -2- 1 -5- 2 -1- 3
        let tree = WeightedGraph::from_edges(4, [(0, 1, 2u32), (1, 2, 5), (2, 3, 1)]);
        let table = SaveTable::new(&tree);

        assert_eq!(table.get(0, 1), Some(0));
        assert_eq!(table.get(0, 3), Some(1));
        assert_eq!(table.get(3, 1), Some(1));
        assert_eq!(table.get(2, 3), Some(2));
        assert_eq!(table.get(2, 2), None);
    }
}
