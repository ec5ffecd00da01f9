/*!
# Weighted Graph

[`WeightedGraph`] is an undirected multigraph with a weight attached to every edge.
It stores one [`IncidenceList`] per node and a slot per edge id.

Node and edge ids are stable: removing a node or edge never renumbers others and ids are never reused.
This allows algorithms to keep node- and edge-indexed arrays across modifications.
*/

use super::*;

#[derive(Debug, Clone, Copy)]
struct EdgeSlot<W> {
    endpoints: Edge,
    weight: W,
}

/// Undirected edge-weighted multigraph with stable node and edge ids.
///
/// # Example
/// ```
/// use steiner_approx::prelude::*;
///
/// let mut graph = WeightedGraph::new(3);
/// let e = graph.add_edge(0, 1, 4u32);
/// graph.add_edge(1, 2, 3);
///
/// assert_eq!(graph.number_of_edges(), 2);
/// assert_eq!(graph.weight_of(e), 4);
/// assert_eq!(graph.total_weight(), 7);
///
/// graph.remove_node(1);
/// assert!(graph.is_singleton());
/// assert_eq!(graph.number_of_nodes(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedGraph<W> {
    nbs: Vec<IncidenceList>,
    removed: Vec<bool>,
    edges: Vec<Option<EdgeSlot<W>>>,
    num_nodes: NumNodes,
    num_edges: NumEdges,
}

impl<W> Default for WeightedGraph<W> {
    fn default() -> Self {
        Self {
            nbs: Vec::new(),
            removed: Vec::new(),
            edges: Vec::new(),
            num_nodes: 0,
            num_edges: 0,
        }
    }
}

impl<W: Weight> WeightedGraph<W> {
    fn slot(&self, e: EdgeId) -> &EdgeSlot<W> {
        self.edges[e as usize]
            .as_ref()
            .unwrap_or_else(|| panic!("edge {e} does not exist"))
    }

    /// Returns *true* if `e` is a live edge
    pub fn has_edge_id(&self, e: EdgeId) -> bool {
        self.edges.get(e as usize).is_some_and(|slot| slot.is_some())
    }
}

impl<W> GraphNodeOrder for WeightedGraph<W> {
    fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    fn node_bound(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }

    fn has_node(&self, u: Node) -> bool {
        self.removed.get(u as usize).is_some_and(|&removed| !removed)
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.removed
            .iter()
            .enumerate()
            .filter_map(|(u, &removed)| (!removed).then_some(u as Node))
    }
}

impl<W> GraphEdgeOrder for WeightedGraph<W> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }

    fn edge_bound(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl<W: Weight> AdjacencyList for WeightedGraph<W> {
    type Weight = W;

    fn incident_edges_of(&self, u: Node) -> impl Iterator<Item = (Node, EdgeId)> + '_ {
        debug_assert!(self.has_node(u));
        self.nbs[u as usize].iter()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        debug_assert!(self.has_node(u));
        self.nbs[u as usize].len()
    }

    fn endpoints_of(&self, e: EdgeId) -> Edge {
        self.slot(e).endpoints
    }

    fn weight_of(&self, e: EdgeId) -> W {
        self.slot(e).weight
    }

    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(e, slot)| slot.is_some().then_some(e as EdgeId))
    }
}

impl<W> GraphNew for WeightedGraph<W> {
    fn new(n: NumNodes) -> Self {
        Self {
            nbs: vec![IncidenceList::default(); n as usize],
            removed: vec![false; n as usize],
            edges: Vec::new(),
            num_nodes: n,
            num_edges: 0,
        }
    }
}

impl<W: Weight> GraphNodeEditing for WeightedGraph<W> {
    fn add_node(&mut self) -> Node {
        let u = self.nbs.len() as Node;
        assert_ne!(u, INVALID_NODE);
        self.nbs.push(IncidenceList::default());
        self.removed.push(false);
        self.num_nodes += 1;
        u
    }

    fn remove_node(&mut self, u: Node) {
        assert!(self.has_node(u), "node {u} does not exist");
        for e in self.nbs[u as usize].take_edges() {
            self.try_remove_edge(e);
        }
        self.removed[u as usize] = true;
        self.num_nodes -= 1;
    }
}

impl<W: Weight> GraphEdgeEditing for WeightedGraph<W> {
    fn add_edge(&mut self, u: Node, v: Node, weight: W) -> EdgeId {
        assert!(self.has_node(u) && self.has_node(v));
        debug_assert!(weight >= W::zero(), "negative weight {weight} on ({u},{v})");

        let e = self.edges.len() as EdgeId;
        assert_ne!(e, INVALID_EDGE);
        self.edges.push(Some(EdgeSlot {
            endpoints: Edge(u, v),
            weight,
        }));

        self.nbs[u as usize].push(v, e);
        if u != v {
            self.nbs[v as usize].push(u, e);
        }

        self.num_edges += 1;
        e
    }

    fn try_remove_edge(&mut self, e: EdgeId) -> bool {
        let Some(slot) = self.edges.get_mut(e as usize).and_then(Option::take) else {
            return false;
        };

        // one endpoint might have been cleared already by `remove_node`
        let Edge(u, v) = slot.endpoints;
        self.nbs[u as usize].remove_edge(e);
        if u != v {
            self.nbs[v as usize].remove_edge(e);
        }

        self.num_edges -= 1;
        true
    }

    fn set_weight(&mut self, e: EdgeId, weight: W) {
        debug_assert!(weight >= W::zero());
        match self.edges.get_mut(e as usize) {
            Some(Some(slot)) => slot.weight = weight,
            _ => panic!("edge {e} does not exist"),
        }
    }
}
