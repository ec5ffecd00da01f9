use super::*;

/// Three terminals connected through a common center node.
///
/// The cost is the total weight of the shortest paths from the center to all three terminals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triple<W> {
    terminals: [Node; 3],
    center: Node,
    cost: W,
}

impl<W: Weight> Triple<W> {
    /// Creates the triple `{s0, s1, s2}` with center `z`
    pub fn new(s0: Node, s1: Node, s2: Node, z: Node, cost: W) -> Self {
        debug_assert!(s0 != s1 && s0 != s2 && s1 != s2);
        Self {
            terminals: [s0, s1, s2],
            center: z,
            cost,
        }
    }

    pub fn s0(&self) -> Node {
        self.terminals[0]
    }

    pub fn s1(&self) -> Node {
        self.terminals[1]
    }

    pub fn s2(&self) -> Node {
        self.terminals[2]
    }

    /// Returns all three terminals
    pub fn terminals(&self) -> [Node; 3] {
        self.terminals
    }

    /// Returns the center node
    pub fn center(&self) -> Node {
        self.center
    }

    /// Returns the weight of connecting all terminals through the center
    pub fn cost(&self) -> W {
        self.cost
    }
}
