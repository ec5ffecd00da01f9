use std::fmt::{Debug, Display};

use crate::{Node, OptionalIdImpl};

/// An edge is defined by two nodes/endpoints.
/// All graphs in this crate are undirected, so `Edge(u, v)` and `Edge(v, u)` describe the same connection.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// Edges are identified by an id that stays stable until the edge is removed.
/// Since graphs may contain parallel edges, an `Edge` alone does not identify an edge.
pub type EdgeId = u32;

/// EdgeId-Value that is considered invalid
pub const INVALID_EDGE: EdgeId = EdgeId::MAX;

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Compact `Option<EdgeId>` (see [`OptionalIdImpl`])
pub type OptionalEdge = OptionalIdImpl<INVALID_EDGE>;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Returns the endpoint that is not `u`.
    /// ** Panics in debug-builds if `u` is not an endpoint **
    pub fn opposite(&self, u: Node) -> Node {
        debug_assert!(self.0 == u || self.1 == u);
        if self.0 == u { self.1 } else { self.0 }
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_and_opposite() {
        let e = Edge(7, 3);
        assert_eq!(e.normalized(), Edge(3, 7));
        assert_eq!(e.reverse(), Edge(3, 7));
        assert_eq!(e.opposite(7), 3);
        assert_eq!(e.opposite(3), 7);
        assert!(Edge(2, 2).is_loop());
        assert_eq!(format!("{e}"), "(7,3)");
    }
}
