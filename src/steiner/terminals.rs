use std::ops::Index;

use stream_bitset::prelude::*;

use super::*;

/// An ordered set of terminal nodes together with a membership bitset.
///
/// # Example
/// ```
/// use steiner_approx::{prelude::*, steiner::*};
///
/// let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (1, 2, 1)]);
/// let terminals = Terminals::new(&graph, [2, 0]).unwrap();
///
/// assert_eq!(terminals.as_slice(), &[2, 0]);
/// assert!(terminals.contains(0) && !terminals.contains(1));
/// assert_eq!(Terminals::new(&graph, [0, 0]), Err(SteinerError::DuplicateTerminal { terminal: 0 }));
/// assert_eq!(Terminals::new(&graph, [9]), Err(SteinerError::TerminalOutOfRange { terminal: 9 }));
/// ```
#[derive(Debug, Clone)]
pub struct Terminals {
    list: Vec<Node>,
    is_terminal: NodeBitSet,
}

impl PartialEq for Terminals {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl Terminals {
    /// Creates the terminal set from a list of nodes of `graph`.
    /// Fails if the list is empty, contains a duplicate, or names a node that does not exist.
    pub fn new<G, I>(graph: &G, terminals: I) -> Result<Self, SteinerError>
    where
        G: GraphNodeOrder,
        I: IntoIterator<Item = Node>,
    {
        let mut res = Self {
            list: Vec::new(),
            is_terminal: graph.vertex_bitset_unset(),
        };

        for t in terminals {
            if !graph.has_node(t) {
                return Err(SteinerError::TerminalOutOfRange { terminal: t });
            }
            if !res.insert(t) {
                return Err(SteinerError::DuplicateTerminal { terminal: t });
            }
        }

        if res.list.is_empty() {
            return Err(SteinerError::NoTerminals);
        }
        Ok(res)
    }

    /// Adds `u` as a terminal and returns *true* if it was not a terminal before
    pub(crate) fn insert(&mut self, u: Node) -> bool {
        if self.is_terminal.set_bit(u) {
            false
        } else {
            self.list.push(u);
            true
        }
    }

    /// Returns *true* if `u` is a terminal
    pub fn contains(&self, u: Node) -> bool {
        u < self.is_terminal.number_of_bits() && self.is_terminal.get_bit(u)
    }

    /// Returns the number of terminals
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Always *false* for sets built by [`Terminals::new`]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the first terminal
    /// ** Panics if the set is empty **
    pub fn first(&self) -> Node {
        self.list[0]
    }

    /// Returns all terminals in insertion order
    pub fn as_slice(&self) -> &[Node] {
        &self.list
    }

    /// Iterates over all terminals in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.list.iter().copied()
    }

    /// Returns an error naming the first terminal that is not reachable from the first terminal
    pub fn ensure_connected<G: AdjacencyList>(&self, graph: &G) -> Result<(), SteinerError> {
        let from = self.first();
        let reachable = graph.reachable_from(from);
        match self.iter().find(|&t| !reachable.get_bit(t)) {
            Some(terminal) => Err(SteinerError::Disconnected { terminal, from }),
            None => Ok(()),
        }
    }
}

impl Index<usize> for Terminals {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.list[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_is_checked() {
        let graph = WeightedGraph::from_edges(5, [(0, 1, 1u32), (1, 2, 1), (3, 4, 1)]);

        let connected = Terminals::new(&graph, [0, 2]).unwrap();
        assert_eq!(connected.ensure_connected(&graph), Ok(()));

        let split = Terminals::new(&graph, [2, 0, 4]).unwrap();
        assert_eq!(
            split.ensure_connected(&graph),
            Err(SteinerError::Disconnected {
                terminal: 4,
                from: 2
            })
        );
    }

    #[test]
    fn promotion_keeps_order() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32)]);
        let mut terminals = Terminals::new(&graph, [3, 1]).unwrap();

        assert!(terminals.insert(0));
        assert!(!terminals.insert(3));
        assert_eq!(terminals.as_slice(), &[3, 1, 0]);
        assert_eq!(terminals[2], 0);
        assert!(!terminals.contains(2));
        assert!(!terminals.contains(17));
        assert_eq!(Terminals::new(&graph, []), Err(SteinerError::NoTerminals));
    }
}
