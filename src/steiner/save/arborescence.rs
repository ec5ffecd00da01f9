/*!
# Heaviest-Edge Trees

A [`HeaviestEdgeTree`] is a binary arborescence overlaid on an edge-weighted tree `T`:
its leaves are the nodes of `T` and every internal vertex corresponds to an edge of `T`.
Parents are at least as heavy as their children, so the lowest common ancestor of two leaves
is the heaviest edge on the path between the two nodes in `T`.

The arborescence is built Kruskal-style: edges are processed in increasing order of weight and
each edge becomes the parent of the (current roots of the) components of its endpoints.
Lowest common ancestors are answered in `O(1)` by a sparse table over an Euler tour, which has
to be rebuilt via [`HeaviestEdgeTree::reindex`] after the arborescence is modified.
*/

use smallvec::SmallVec;

use super::*;
use crate::utils::UnionFind;

#[derive(Debug, Clone)]
struct Vertex<W> {
    parent: Option<OptionalNode>,
    children: SmallVec<[Node; 2]>,
    edge: Option<OptionalEdge>,
    weight: W,
    alive: bool,
}

impl<W: Weight> Vertex<W> {
    fn new(edge: Option<EdgeId>, weight: W) -> Self {
        Self {
            parent: None,
            children: SmallVec::new(),
            edge: edge.and_then(OptionalEdge::new),
            weight,
            alive: true,
        }
    }
}

/// Sparse table over the Euler tour of an arborescence.
#[derive(Debug, Clone, Default)]
struct LcaIndex {
    first: Vec<u32>,
    depth: Vec<u32>,
    table: Vec<Vec<Node>>,
}

impl LcaIndex {
    fn new<W>(vertices: &[Vertex<W>], root: Node) -> Self {
        let n = vertices.len();
        let mut first = vec![u32::MAX; n];
        let mut depth = vec![0u32; n];
        let mut euler = Vec::with_capacity(2 * n);

        first[root as usize] = 0;
        euler.push(root);
        let mut stack: Vec<(Node, usize)> = vec![(root, 0)];
        while let Some(top) = stack.last_mut() {
            let (x, i) = *top;
            if let Some(&c) = vertices[x as usize].children.get(i) {
                top.1 += 1;
                depth[c as usize] = depth[x as usize] + 1;
                first[c as usize] = euler.len() as u32;
                euler.push(c);
                stack.push((c, 0));
            } else {
                stack.pop();
                if let Some(&(p, _)) = stack.last() {
                    euler.push(p);
                }
            }
        }

        let shallower = |a: Node, b: Node| {
            if depth[b as usize] < depth[a as usize] { b } else { a }
        };

        let mut table = vec![euler];
        let mut width = 1;
        while 2 * width <= table[0].len() {
            let prev = &table[table.len() - 1];
            let row: Vec<Node> = (0..prev.len() - width)
                .map(|i| shallower(prev[i], prev[i + width]))
                .collect();
            table.push(row);
            width *= 2;
        }

        Self {
            first,
            depth,
            table,
        }
    }

    fn lca(&self, a: Node, b: Node) -> Node {
        let (mut l, mut r) = (self.first[a as usize], self.first[b as usize]);
        if l > r {
            std::mem::swap(&mut l, &mut r);
        }
        let (l, r) = (l as usize, r as usize);

        let k = (usize::BITS - 1 - (r - l + 1).leading_zeros()) as usize;
        let (x, y) = (self.table[k][l], self.table[k][r + 1 - (1 << k)]);
        if self.depth[y as usize] < self.depth[x as usize] {
            y
        } else {
            x
        }
    }
}

/// Binary arborescence whose lowest common ancestors are the heaviest edges of a weighted tree.
///
/// Vertices `0..n` are the leaves and correspond to the nodes `0..n` of the underlying tree.
/// Internal vertices correspond to tree edges or (after contractions) to zero-weight
/// *contraction vertices* without an edge.
#[derive(Debug, Clone)]
pub struct HeaviestEdgeTree<W> {
    vertices: Vec<Vertex<W>>,
    num_leaves: NumNodes,
    root: Node,
    index: LcaIndex,
}

impl<W: Weight> HeaviestEdgeTree<W> {
    /// Builds the arborescence of a tree (or forest) in `O(n log n)`.
    /// Edges of equal weight are processed in increasing order of their ids.
    /// ** Panics if the tree has no nodes **
    ///
    /// # Example
    /// ```
    /// use steiner_approx::{prelude::*, steiner::save::HeaviestEdgeTree};
    ///
    /// // 0 -3- 1 -1- 2 -2- 3
    /// let tree = WeightedGraph::from_edges(4, [(0, 1, 3u32), (1, 2, 1), (2, 3, 2)]);
    /// let arb = HeaviestEdgeTree::build(&tree);
    ///
    /// assert_eq!(arb.heaviest_edge(1, 3), Some(2));
    /// assert_eq!(arb.heaviest_edge(0, 3), Some(0));
    /// assert_eq!(arb.heaviest_weight(2, 1), 1);
    /// ```
    pub fn build<G>(tree: &G) -> Self
    where
        G: AdjacencyList<Weight = W>,
    {
        let n = tree.node_bound();
        assert!(n > 0);

        let mut vertices: Vec<Vertex<W>> = (0..n).map(|_| Vertex::new(None, W::zero())).collect();

        let mut edges: Vec<(EdgeId, Edge, W)> = tree.edges().collect();
        edges.sort_by(|a, b| a.2.cmp_weight(&b.2));

        let mut components = UnionFind::new(n);
        let mut top: Vec<Node> = (0..n).collect();
        let mut root = 0;

        for (e, Edge(u, v), weight) in edges {
            let (ru, rv) = (components.find(u), components.find(v));
            debug_assert_ne!(ru, rv, "edge {e} closes a cycle");

            let x = vertices.len() as Node;
            vertices.push(Vertex::new(Some(e), weight));
            for child in [top[ru as usize], top[rv as usize]] {
                vertices[child as usize].parent = some_node(x);
                vertices[x as usize].children.push(child);
            }

            let r = components.union(ru, rv);
            top[r as usize] = x;
            root = x;
        }

        let index = LcaIndex::new(&vertices, root);
        Self {
            vertices,
            num_leaves: n,
            root,
            index,
        }
    }

    /// Returns the number of leaves
    pub fn num_leaves(&self) -> NumNodes {
        self.num_leaves
    }

    /// Returns the root of the arborescence
    pub fn root(&self) -> Node {
        self.root
    }

    /// Returns the parent of vertex `x`
    pub fn parent(&self, x: Node) -> Option<Node> {
        self.vertices[x as usize].parent.map(|p| p.get())
    }

    /// Returns the children of vertex `x`
    pub fn children(&self, x: Node) -> &[Node] {
        &self.vertices[x as usize].children
    }

    /// Returns the weight of vertex `x` (zero for leaves and contraction vertices)
    pub fn weight(&self, x: Node) -> W {
        self.vertices[x as usize].weight
    }

    /// Returns the tree edge of vertex `x` (`None` for leaves and contraction vertices)
    pub fn edge(&self, x: Node) -> Option<EdgeId> {
        self.vertices[x as usize].edge.map(|e| e.get())
    }

    /// Returns the depth of vertex `x` as of the last (re-)indexing
    pub fn level(&self, x: Node) -> u32 {
        self.index.depth[x as usize]
    }

    /// Returns the lowest common ancestor of vertices `a` and `b` as of the last (re-)indexing
    pub fn lca(&self, a: Node, b: Node) -> Node {
        self.index.lca(a, b)
    }

    /// Returns the heaviest tree edge on the path between tree nodes `u` and `v`
    /// (`None` if the heaviest part of the path has been contracted)
    pub fn heaviest_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.edge(self.lca(u, v))
    }

    /// Returns the weight of the heaviest tree edge on the path between tree nodes `u` and `v`
    pub fn heaviest_weight(&self, u: Node, v: Node) -> W {
        self.weight(self.lca(u, v))
    }

    /// Adds a zero-weight vertex without edge, parent or children
    pub(crate) fn push_contraction_vertex(&mut self) -> Node {
        let x = self.vertices.len() as Node;
        self.vertices.push(Vertex::new(None, W::zero()));
        x
    }

    /// Makes `parent` the parent of `child`
    /// ** Panics if `child` already has a parent **
    pub(crate) fn attach(&mut self, child: Node, parent: Node) {
        assert!(self.vertices[child as usize].parent.is_none());
        self.vertices[child as usize].parent = some_node(parent);
        self.vertices[parent as usize].children.push(child);
    }

    /// Removes the link between `child` and its parent (if any)
    pub(crate) fn detach(&mut self, child: Node) {
        if let Some(p) = self.vertices[child as usize].parent.take() {
            self.vertices[p.get() as usize]
                .children
                .retain(|c| *c != child);
        }
    }

    /// Removes vertex `x`; its remaining children become parentless
    pub(crate) fn remove_vertex(&mut self, x: Node) {
        self.detach(x);
        let children = std::mem::take(&mut self.vertices[x as usize].children);
        for c in children {
            self.vertices[c as usize].parent = None;
        }
        self.vertices[x as usize].alive = false;
    }

    /// Sets a new root and rebuilds the LCA index
    pub(crate) fn reindex(&mut self, root: Node) {
        debug_assert!(self.parent(root).is_none());
        self.root = root;
        self.index = LcaIndex::new(&self.vertices, root);
        debug_assert!(self.is_heap_ordered());
    }

    /// Returns *true* if every live vertex is at least as heavy as its children and every internal
    /// vertex reachable from the root has exactly two children
    pub fn is_heap_ordered(&self) -> bool {
        let leaves = self.num_leaves as usize;
        self.vertices.iter().enumerate().all(|(x, v)| {
            if !v.alive {
                return true;
            }
            let binary = if x < leaves {
                v.children.is_empty()
            } else {
                v.children.len() == 2
            };
            binary
                && v.children
                    .iter()
                    .all(|&c| self.vertices[c as usize].weight <= v.weight)
        })
    }
}
