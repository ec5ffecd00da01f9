/*!
# Graph Copies

A [`GraphCopy`] is an editable graph whose nodes and edges remember their counterparts in an
immutable *original* [`WeightedGraph`]. Every copy node corresponds to exactly one original node,
every original node has at most one copy. Copy edges either correspond to exactly one original
edge or are *dummy* edges that only exist in the copy (such as edges of a complete terminal graph).

Each original edge maps to a *chain* of copy edges; all algorithms in this crate keep chains of
length at most one, so a chain is either empty (edge not mapped) or a single copy edge.

Steiner trees are returned as `GraphCopy`s of the input graph.
*/

use smallvec::SmallVec;

use super::*;

/// Editable copy of (parts of) an original graph with bidirectional node/edge mappings.
#[derive(Debug, Clone)]
pub struct GraphCopy<'a, W> {
    original: &'a WeightedGraph<W>,
    graph: WeightedGraph<W>,
    original_node: Vec<Node>,
    copy_node: Vec<Option<OptionalNode>>,
    original_edge: Vec<Option<OptionalEdge>>,
    chain: Vec<SmallVec<[EdgeId; 1]>>,
}

impl<'a, W: Weight> GraphCopy<'a, W> {
    /// Creates a copy of `original` without any nodes or edges
    pub fn new_empty(original: &'a WeightedGraph<W>) -> Self {
        Self {
            original,
            graph: WeightedGraph::default(),
            original_node: Vec::new(),
            copy_node: vec![None; original.node_bound() as usize],
            original_edge: Vec::new(),
            chain: vec![SmallVec::new(); original.edge_bound() as usize],
        }
    }

    /// Creates a full copy of `original`: all live nodes in increasing order followed
    /// by all live edges in increasing order.
    pub fn from_original(original: &'a WeightedGraph<W>) -> Self {
        Self::induced(original, original.vertices())
    }

    /// Creates the subgraph of `original` induced by `nodes`.
    /// Copy nodes are created in the order given, edges in increasing order of their original ids.
    /// ** Panics if a node occurs twice **
    pub fn induced<I>(original: &'a WeightedGraph<W>, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let mut copy = Self::new_empty(original);
        for u in nodes {
            copy.new_node(u);
        }

        for (e, Edge(u, v), _) in original.edges() {
            if copy.copy_of_node(u).is_some() && copy.copy_of_node(v).is_some() {
                copy.new_edge(e);
            }
        }
        copy
    }

    /// Returns the original graph
    pub fn original(&self) -> &'a WeightedGraph<W> {
        self.original
    }

    /// Returns the graph held by this copy
    pub fn graph(&self) -> &WeightedGraph<W> {
        &self.graph
    }

    /// Creates a copy of original node `u` and returns it.
    /// ** Panics if `u` is already copied **
    pub fn new_node(&mut self, u: Node) -> Node {
        assert!(self.copy_node[u as usize].is_none(), "node {u} is already copied");
        let c = self.graph.add_node();
        self.original_node.push(u);
        self.copy_node[u as usize] = some_node(c);
        c
    }

    /// Returns the copy of original node `u`, creating it if necessary
    pub fn copy_or_insert_node(&mut self, u: Node) -> Node {
        match self.copy_of_node(u) {
            Some(c) => c,
            None => self.new_node(u),
        }
    }

    /// Returns the copy of original node `u` if it exists
    pub fn copy_of_node(&self, u: Node) -> Option<Node> {
        self.copy_node[u as usize].map(|c| c.get())
    }

    /// Returns the original of copy node `c`
    pub fn original_of_node(&self, c: Node) -> Node {
        debug_assert!(self.graph.has_node(c));
        self.original_node[c as usize]
    }

    /// Copies original edge `e` and returns the copy edge.
    /// Copies of missing endpoints are created first.
    /// ** Panics if `e` is already mapped **
    pub fn new_edge(&mut self, e: EdgeId) -> EdgeId {
        assert!(!self.is_mapped(e), "edge {e} is already mapped");
        let Edge(u, v) = self.original.endpoints_of(e);
        let cu = self.copy_or_insert_node(u);
        let cv = self.copy_or_insert_node(v);

        let c = self.graph.add_edge(cu, cv, self.original.weight_of(e));
        self.push_original_edge(c, OptionalEdge::new(e));
        self.chain[e as usize].push(c);
        c
    }

    /// Adds an edge between copy nodes `u` and `v` without an original counterpart
    pub fn new_dummy_edge(&mut self, u: Node, v: Node, weight: W) -> EdgeId {
        let c = self.graph.add_edge(u, v, weight);
        self.push_original_edge(c, None);
        c
    }

    fn push_original_edge(&mut self, c: EdgeId, original: Option<OptionalEdge>) {
        debug_assert_eq!(c as usize, self.original_edge.len());
        self.original_edge.push(original);
    }

    /// Returns the original of copy edge `c` or `None` for dummy edges
    pub fn original_of_edge(&self, c: EdgeId) -> Option<EdgeId> {
        self.original_edge[c as usize].map(|e| e.get())
    }

    /// Returns *true* if copy edge `c` exists and has not been removed
    pub fn has_edge_id(&self, c: EdgeId) -> bool {
        self.graph.has_edge_id(c)
    }

    /// Returns all copy edges of original edge `e`
    pub fn chain_of(&self, e: EdgeId) -> &[EdgeId] {
        &self.chain[e as usize]
    }

    /// Returns *true* if original edge `e` has a copy
    pub fn is_mapped(&self, e: EdgeId) -> bool {
        !self.chain[e as usize].is_empty()
    }

    /// Removes copy edge `c` and unmaps it from its original
    /// ** Panics if `c` is not a live edge **
    pub fn remove_edge(&mut self, c: EdgeId) {
        self.graph.remove_edge(c);
        if let Some(e) = self.original_of_edge(c) {
            self.chain[e as usize].retain(|&mut x| x != c);
        }
    }

    /// Removes copy node `c` with all its incident edges and unmaps it from its original
    /// ** Panics if `c` is not a live node **
    pub fn remove_node(&mut self, c: Node) {
        let incident: SmallVec<[EdgeId; 4]> =
            self.graph.incident_edges_of(c).map(|(_, e)| e).collect();
        for e in incident {
            self.remove_edge(e);
        }

        self.graph.remove_node(c);
        let u = self.original_node[c as usize];
        self.copy_node[u as usize] = None;
    }

    /// Changes the weight of copy edge `c`
    pub fn set_weight(&mut self, c: EdgeId, weight: W) {
        self.graph.set_weight(c, weight);
    }

    /// Removes every live copy edge for which `keep` returns *false*
    pub fn retain_edges<F: FnMut(EdgeId) -> bool>(&mut self, mut keep: F) {
        let drop: Vec<EdgeId> = self.graph.edge_ids().filter(|&c| !keep(c)).collect();
        for c in drop {
            self.remove_edge(c);
        }
    }

    /// Returns the original ids of all copy nodes in increasing order of copy ids
    pub fn original_nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.graph.vertices().map(|c| self.original_node[c as usize])
    }

    /// Returns the original ids of all non-dummy copy edges in increasing order of copy ids
    pub fn original_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph
            .edge_ids()
            .filter_map(|c| self.original_of_edge(c))
    }
}

impl<W> GraphNodeOrder for GraphCopy<'_, W> {
    fn number_of_nodes(&self) -> NumNodes {
        self.graph.number_of_nodes()
    }

    fn node_bound(&self) -> NumNodes {
        self.graph.node_bound()
    }

    fn has_node(&self, u: Node) -> bool {
        self.graph.has_node(u)
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.graph.vertices()
    }
}

impl<W> GraphEdgeOrder for GraphCopy<'_, W> {
    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }

    fn edge_bound(&self) -> NumEdges {
        self.graph.edge_bound()
    }
}

impl<W: Weight> AdjacencyList for GraphCopy<'_, W> {
    type Weight = W;

    fn incident_edges_of(&self, u: Node) -> impl Iterator<Item = (Node, EdgeId)> + '_ {
        self.graph.incident_edges_of(u)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.graph.degree_of(u)
    }

    fn endpoints_of(&self, e: EdgeId) -> Edge {
        self.graph.endpoints_of(e)
    }

    fn weight_of(&self, e: EdgeId) -> W {
        self.graph.weight_of(e)
    }

    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph.edge_ids()
    }
}
