/*!
# Steiner Tree Approximations

Given a connected [`WeightedGraph`] and a set of [`Terminals`], all algorithms compute a tree
connecting every terminal and return it as a [`SteinerSolution`]: the total weight of the tree and
the tree itself as a [`GraphCopy`] of the input graph.

| Algorithm | Idea |
|---|---|
| [`Kou`] | MST of the complete distance graph over all terminals, expanded into shortest paths |
| [`Mehlhorn`] | like [`Kou`] but derives the distance graph from Voronoi regions |
| [`Takahashi`] | Dijkstra that grows the tree one nearest terminal at a time |
| [`Zelikovsky`] | greedily contracts terminal triples whose Steiner point saves most |
| [`RzLoss`] | greedily contracts full components by gain per loss |

Every algorithm is configured as a struct and run via [`MinSteinerTree::call`]:
```
use steiner_approx::{prelude::*, steiner::*};

// star with center 0, terminals 1 and 2 and an extra leaf 3
let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (0, 2, 1), (0, 3, 1)]);
let terminals = Terminals::new(&graph, [1, 2]).unwrap();

let solution = Kou::new().call(&graph, &terminals).unwrap();
assert_eq!(solution.weight(), 2);
assert_eq!(solution.tree().number_of_nodes(), 3);
assert!(solution.tree().copy_of_node(3).is_none());
```
*/

mod full_component;
mod kou;
mod mehlhorn;
mod rz_loss;
mod takahashi;
mod terminals;
mod tree;
mod triple;
mod zelikovsky;

pub mod save;

use thiserror::Error;

use crate::{algo::*, prelude::*};

pub use full_component::*;
pub use kou::*;
pub use mehlhorn::*;
pub use rz_loss::*;
pub use takahashi::*;
pub use terminals::*;
pub use tree::*;
pub use triple::*;
pub use zelikovsky::*;

/// Caller-visible precondition failures of the Steiner tree algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteinerError {
    #[error("the terminal set is empty")]
    NoTerminals,
    #[error("terminal {terminal} is not a node of the graph")]
    TerminalOutOfRange { terminal: Node },
    #[error("terminal {terminal} occurs more than once")]
    DuplicateTerminal { terminal: Node },
    #[error("terminal {terminal} is not reachable from terminal {from}")]
    Disconnected { terminal: Node, from: Node },
    #[error("component size {k} must be at least 3")]
    ComponentSizeTooSmall { k: usize },
    #[error("start node {start} is not a terminal")]
    StartNotTerminal { start: Node },
}

/// A Steiner tree together with its total weight.
#[derive(Debug, Clone)]
pub struct SteinerSolution<'a, W> {
    weight: W,
    tree: GraphCopy<'a, W>,
}

impl<'a, W: Weight> SteinerSolution<'a, W> {
    pub(crate) fn new(weight: W, tree: GraphCopy<'a, W>) -> Self {
        Self { weight, tree }
    }

    /// Returns the total weight of all tree edges
    pub fn weight(&self) -> W {
        self.weight
    }

    /// Returns the Steiner tree as a copy of the input graph
    pub fn tree(&self) -> &GraphCopy<'a, W> {
        &self.tree
    }

    /// Consumes the solution and returns the Steiner tree
    pub fn into_tree(self) -> GraphCopy<'a, W> {
        self.tree
    }
}

/// Common interface of all Steiner tree approximations.
pub trait MinSteinerTree {
    /// Computes a Steiner tree of `graph` connecting all `terminals`.
    ///
    /// Returns an error if the terminals are not mutually reachable in `graph`.
    /// The weight of the returned tree equals the sum of its edge weights.
    fn call<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
    ) -> Result<SteinerSolution<'a, W>, SteinerError>;
}

/// Builds the complete graph over all terminals with `distance(i, j)` as weight of the edge
/// between the `i`-th and `j`-th terminal. Copy node `i` corresponds to the `i`-th terminal.
/// Pairs with infinite distance are skipped.
pub(crate) fn complete_terminal_graph<'a, W, F>(
    graph: &'a WeightedGraph<W>,
    terminals: &Terminals,
    mut distance: F,
) -> GraphCopy<'a, W>
where
    W: Weight,
    F: FnMut(usize, usize) -> W,
{
    let mut complete = GraphCopy::new_empty(graph);
    for &t in terminals.as_slice() {
        complete.new_node(t);
    }

    let k = terminals.len();
    for i in 0..k {
        for j in (i + 1)..k {
            let d = distance(i, j);
            if !d.is_unreached() {
                complete.new_dummy_edge(i as Node, j as Node, d);
            }
        }
    }
    complete
}

/// Builds a minimum spanning tree over the complete terminal graph as a copy containing only
/// the terminals and the tree edges.
pub(crate) fn terminal_spanning_tree<'a, W: Weight>(
    graph: &'a WeightedGraph<W>,
    terminals: &Terminals,
    distance: impl FnMut(usize, usize) -> W,
) -> GraphCopy<'a, W> {
    let mut tree = complete_terminal_graph(graph, terminals, distance);
    tree.reduce_to_minimum_spanning_tree();
    tree
}

/// Copies all edges of `path` that are not yet part of `tree`
pub(crate) fn insert_path<W: Weight>(tree: &mut GraphCopy<'_, W>, path: &[EdgeId]) {
    for &e in path {
        if !tree.is_mapped(e) {
            tree.new_edge(e);
        }
    }
}

/// Runs [`Takahashi`] once from every terminal with `new_terminals` promoted to terminals and
/// returns the lightest tree (the first one on ties).
pub(crate) fn best_takahashi_tree<'a, W: Weight>(
    graph: &'a WeightedGraph<W>,
    terminals: &Terminals,
    new_terminals: &Terminals,
) -> Result<SteinerSolution<'a, W>, SteinerError> {
    let mut best: Option<SteinerSolution<'a, W>> = None;
    for &t in terminals.as_slice() {
        let candidate = Takahashi::new().call_with_new_terminals(graph, terminals, new_terminals, t)?;
        if best.as_ref().is_none_or(|b| candidate.weight() < b.weight()) {
            best = Some(candidate);
        }
    }
    best.ok_or(SteinerError::NoTerminals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_displayed() {
        let err = SteinerError::Disconnected {
            terminal: 4,
            from: 0,
        };
        assert_eq!(err.to_string(), "terminal 4 is not reachable from terminal 0");
        assert_eq!(
            SteinerError::ComponentSizeTooSmall { k: 2 }.to_string(),
            "component size 2 must be at least 3"
        );
        assert_eq!(
            SteinerError::StartNotTerminal { start: 7 }.to_string(),
            "start node 7 is not a terminal"
        );
    }

    #[test]
    fn terminal_spanning_tree_is_minimal() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 3u32), (1, 2, 1), (2, 3, 4)]);
        let terminals = Terminals::new(&graph, [0, 2, 3]).unwrap();
        let sp: Vec<_> = terminals.iter().map(|t| graph.dijkstra(t)).collect();

        let tree = terminal_spanning_tree(&graph, &terminals, |i, j| {
            sp[i].distance_or_infinity(terminals[j])
        });
        assert_eq!(tree.number_of_nodes(), 3);
        assert_eq!(tree.number_of_edges(), 2);
        assert_eq!(tree.total_weight(), 8);
        assert_eq!(tree.original_of_node(2), 3);
    }
}
