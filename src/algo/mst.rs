/*!
# Minimum Spanning Trees

Prim's algorithm with a binary heap. On disconnected graphs a minimum spanning *forest* is computed
by restarting from the smallest unvisited node. Candidate edges are ordered by weight first and
edge id second, so the result is deterministic for graphs with equal weights.
*/

use std::collections::BinaryHeap;

use num::Zero;

use super::*;

/// A minimum spanning tree (or forest) stored as predecessor edges.
#[derive(Debug, Clone)]
pub struct SpanningTree<W> {
    predecessor: Vec<Option<OptionalEdge>>,
    in_tree: Vec<bool>,
    roots: Vec<Node>,
    weight: W,
}

impl<W: Weight> SpanningTree<W> {
    /// Returns the tree edge connecting `u` to its parent (`None` for roots)
    pub fn predecessor_edge(&self, u: Node) -> Option<EdgeId> {
        self.predecessor[u as usize].map(|e| e.get())
    }

    /// Returns *true* if edge `e` belongs to the tree
    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.in_tree.get(e as usize).copied().unwrap_or(false)
    }

    /// Returns the total weight of all tree edges
    pub fn weight(&self) -> W {
        self.weight
    }

    /// Returns the roots of all trees of the forest in the order they were started
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Returns *true* if all nodes are spanned by a single tree
    pub fn is_connected(&self) -> bool {
        self.roots.len() <= 1
    }

    /// Iterates over `(node, predecessor edge)` for all non-root nodes in increasing node order
    pub fn tree_edges(&self) -> impl Iterator<Item = (Node, EdgeId)> + '_ {
        self.predecessor
            .iter()
            .enumerate()
            .filter_map(|(u, e)| e.map(|e| (u as Node, e.get())))
    }
}

fn prim<G, I>(graph: &G, roots: I) -> SpanningTree<G::Weight>
where
    G: AdjacencyList,
    I: IntoIterator<Item = Node>,
{
    let n = graph.node_bound() as usize;
    let mut tree = SpanningTree {
        predecessor: vec![None; n],
        in_tree: vec![false; graph.edge_bound() as usize],
        roots: Vec::new(),
        weight: G::Weight::zero(),
    };

    let mut visited = vec![false; n];
    let mut best = vec![G::Weight::infinity(); n];
    let mut heap = BinaryHeap::new();

    for root in roots {
        if visited[root as usize] {
            continue;
        }
        tree.roots.push(root);
        heap.push(MinEntry::new(G::Weight::zero(), (INVALID_EDGE, root)));

        while let Some(MinEntry {
            key,
            item: (e, u),
        }) = heap.pop()
        {
            if visited[u as usize] {
                continue;
            }
            visited[u as usize] = true;

            if e != INVALID_EDGE {
                tree.predecessor[u as usize] = OptionalEdge::new(e);
                tree.in_tree[e as usize] = true;
                tree.weight += key;
            }

            for (v, f) in graph.incident_edges_of(u) {
                let w = graph.weight_of(f);
                if !visited[v as usize] && w < best[v as usize] {
                    best[v as usize] = w;
                    heap.push(MinEntry::new(w, (f, v)));
                }
            }
        }
    }

    tree
}

/// Computes minimum spanning trees directly on a graph.
pub trait MinimumSpanningTree: AdjacencyList {
    /// Computes a minimum spanning forest, starting each tree at its smallest node.
    ///
    /// # Example
    /// ```
    /// use steiner_approx::{prelude::*, algo::*};
    ///
    /// let graph = WeightedGraph::from_edges(3, [(0, 1, 1u32), (1, 2, 2), (0, 2, 2)]);
    /// let mst = graph.minimum_spanning_tree();
    ///
    /// assert_eq!(mst.weight(), 3);
    /// assert!(mst.contains_edge(0));
    /// assert!(mst.contains_edge(1));
    /// assert!(!mst.contains_edge(2));
    /// ```
    fn minimum_spanning_tree(&self) -> SpanningTree<Self::Weight> {
        prim(self, self.vertices())
    }

    /// Computes a minimum spanning forest whose first tree is rooted at `root`.
    /// ** Panics if `root` is not a live node **
    fn minimum_spanning_tree_from(&self, root: Node) -> SpanningTree<Self::Weight> {
        assert!(self.has_node(root));
        prim(self, std::iter::once(root).chain(self.vertices()))
    }
}

impl<G: AdjacencyList> MinimumSpanningTree for G {}

/// Reduces an editable graph to one of its minimum spanning trees.
pub trait SpanningTreeReduction {
    /// Numeric type of the edge weights
    type Weight;

    /// Deletes all edges not contained in a minimum spanning forest and returns the forest's weight.
    fn reduce_to_minimum_spanning_tree(&mut self) -> Self::Weight;
}

impl<W: Weight> SpanningTreeReduction for GraphCopy<'_, W> {
    type Weight = W;

    fn reduce_to_minimum_spanning_tree(&mut self) -> W {
        let mst = self.minimum_spanning_tree();
        self.retain_edges(|e| mst.contains_edge(e));
        mst.weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forest_on_disconnected_graph() {
        let graph = WeightedGraph::from_edges(
            6,
            [(0, 1, 4u32), (1, 2, 1), (0, 2, 2), (3, 4, 7), (4, 5, 7), (3, 5, 7)],
        );

        let mst = graph.minimum_spanning_tree();
        assert_eq!(mst.weight(), 17);
        assert_eq!(mst.roots(), &[0, 3]);
        assert!(!mst.is_connected());

        // equal weights prefer the smaller edge id
        assert!(mst.contains_edge(3) && mst.contains_edge(5));
        assert!(!mst.contains_edge(4));
        assert_eq!(mst.tree_edges().count(), 4);
    }

    #[test]
    fn rooted_tree() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (1, 2, 1), (2, 3, 1)]);
        let mst = graph.minimum_spanning_tree_from(2);

        assert_eq!(mst.roots(), &[2]);
        assert_eq!(mst.predecessor_edge(2), None);
        assert_eq!(mst.predecessor_edge(0), Some(0));
        assert_eq!(mst.predecessor_edge(3), Some(2));
    }

    #[test]
    fn reduce_copy() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 3u32), (1, 2, 1), (2, 3, 1), (3, 0, 1)]);
        let mut copy = GraphCopy::from_original(&graph);

        assert_eq!(copy.reduce_to_minimum_spanning_tree(), 3);
        assert_eq!(copy.number_of_edges(), 3);
        assert!(!copy.is_mapped(0));
    }
}
