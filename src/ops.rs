use std::ops::Range;

use crate::*;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of (live) nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns an upper bound on all node ids ever handed out by the graph.
    /// Use this to size node-indexed arrays.
    fn node_bound(&self) -> NumNodes;

    /// Returns *true* if `u` is a live node of the graph
    fn has_node(&self, u: Node) -> bool;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over all live nodes in increasing order.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns empty bitset with one entry per node id
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.node_bound())
    }

    /// Returns a range of node ids possibly including deleted nodes.
    /// In contrast to self.vertices(), the range does not borrow self and hence
    /// may be used where additional mutable references of self are needed.
    fn vertices_range(&self) -> Range<Node> {
        0..self.node_bound()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of (live) edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns an upper bound on all edge ids ever handed out by the graph.
    fn edge_bound(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & weighted edges
pub trait AdjacencyList: GraphNodeOrder + GraphEdgeOrder + Sized {
    /// Numeric type of the edge weights
    type Weight: Weight;

    /// Returns an iterator over `(neighbor, edge)`-pairs of all edges incident to `u`
    /// in the order in which they were inserted.
    /// ** Panics if `u` is not a live node **
    fn incident_edges_of(&self, u: Node) -> impl Iterator<Item = (Node, EdgeId)> + '_;

    /// Returns the number of edges incident to `u`
    /// ** Panics if `u` is not a live node **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns the endpoints of edge `e`
    /// ** Panics if `e` is not a live edge **
    fn endpoints_of(&self, e: EdgeId) -> Edge;

    /// Returns the weight of edge `e`
    /// ** Panics if `e` is not a live edge **
    fn weight_of(&self, e: EdgeId) -> Self::Weight;

    /// Returns an iterator over the ids of all live edges in increasing order
    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_;

    /// Returns an iterator over the neighbors of `u` (with multiplicity for parallel edges)
    /// ** Panics if `u` is not a live node **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.incident_edges_of(u).map(|(v, _)| v)
    }

    /// Returns the endpoint of `e` opposite to `u`
    /// ** Panics if `e` is not a live edge **
    fn opposite(&self, e: EdgeId, u: Node) -> Node {
        self.endpoints_of(e).opposite(u)
    }

    /// Returns an iterator over all live edges as `(id, endpoints, weight)`
    fn edges(&self) -> impl Iterator<Item = (EdgeId, Edge, Self::Weight)> + '_ {
        self.edge_ids()
            .map(|e| (e, self.endpoints_of(e), self.weight_of(e)))
    }

    /// Returns the sum of all edge weights
    fn total_weight(&self) -> Self::Weight {
        self.edge_ids().map(|e| self.weight_of(e)).sum()
    }

    /// Returns the first inserted edge between `u` and `v` if one exists
    /// ** Panics if `u` is not a live node **
    fn find_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.incident_edges_of(u)
            .find_map(|(w, e)| (w == v).then_some(e))
    }

    /// Returns *true* if there is an edge between `u` and `v`
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.find_edge(u, v).is_some()
    }
}

/// Creates an edgeless graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete nodes
pub trait GraphNodeEditing: GraphNodeOrder {
    /// Adds a new singleton node and returns its id
    fn add_node(&mut self) -> Node;

    /// Removes node `u` and all its incident edges.
    /// ** Panics if `u` is not a live node **
    fn remove_node(&mut self, u: Node);
}

/// Provides functions to insert/delete weighted edges
pub trait GraphEdgeEditing: AdjacencyList {
    /// Adds the edge `{u, v}` with weight `weight` and returns its id.
    /// Parallel edges are permitted.
    /// ** Panics if `u` or `v` is not a live node **
    fn add_edge(&mut self, u: Node, v: Node, weight: Self::Weight) -> EdgeId;

    /// Removes edge `e` and returns *true* if it existed before
    fn try_remove_edge(&mut self, e: EdgeId) -> bool;

    /// Removes edge `e`
    /// ** Panics if `e` is not a live edge **
    fn remove_edge(&mut self, e: EdgeId) {
        assert!(self.try_remove_edge(e), "edge {e} does not exist");
    }

    /// Changes the weight of edge `e`
    /// ** Panics if `e` is not a live edge **
    fn set_weight(&mut self, e: EdgeId, weight: Self::Weight);
}

/// Create a graph from a list of weighted edges
pub trait GraphFromScratch: GraphEdgeEditing + GraphNew {
    /// Creates a graph with `n` nodes from a list of `(u, v, weight)`-triples.
    /// Edge ids are assigned in iteration order.
    fn from_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator<Item = (Node, Node, Self::Weight)>,
    {
        let mut graph = Self::new(n);
        for (u, v, weight) in edges {
            graph.add_edge(u, v, weight);
        }
        graph
    }
}

impl<G: GraphEdgeEditing + GraphNew> GraphFromScratch for G {}
