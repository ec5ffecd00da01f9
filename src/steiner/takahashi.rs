/*!
# Takahashi & Matsuyama

A single Dijkstra run from a start terminal that grows the Steiner tree one terminal at a time:
whenever a terminal not yet in the tree is settled, its shortest path to the tree is frozen into
the tree and every node on that path gets distance `0`. These nodes re-enter the priority queue,
so the search continues as a multi-source search from the whole tree. It stops once all terminals
have been found.

Afterwards the subgraph induced by all tree nodes is reduced to a minimum spanning tree and
Steiner leaves are removed, which never increases the weight.

The search can treat additional nodes as terminals (*promoted* nodes) that are connected but may
be pruned at the end; contraction-based algorithms use this to turn their chosen Steiner points
into a tree.
*/

use std::{
    collections::BinaryHeap,
    time::{Duration, Instant},
};

use log::debug;

use super::*;

/// The Takahashi-Matsuyama 2-approximation.
///
/// # Example
/// ```
/// use steiner_approx::{prelude::*, steiner::*};
///
/// // 0 - 1 - 2 - 3 - 4 (unit weights), terminals {0, 2, 4}
/// let graph = WeightedGraph::from_edges(5, [(0, 1, 1u32), (1, 2, 1), (2, 3, 1), (3, 4, 1)]);
/// let terminals = Terminals::new(&graph, [0, 2, 4]).unwrap();
///
/// let solution = Takahashi::new().start_node(4).call(&graph, &terminals).unwrap();
/// assert_eq!(solution.weight(), 4);
/// assert_eq!(solution.tree().number_of_edges(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Takahashi {
    start_node: Option<Node>,
    running_time: Duration,
}

impl Takahashi {
    /// Creates a new instance starting at the first terminal
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the terminal the search starts from
    pub fn set_start_node(&mut self, start: Node) {
        self.start_node = Some(start);
    }

    /// Sets the terminal the search starts from
    pub fn start_node(mut self, start: Node) -> Self {
        self.set_start_node(start);
        self
    }

    /// Returns the duration of the last call
    pub fn running_time(&self) -> Duration {
        self.running_time
    }

    /// Computes a Steiner tree by a search starting at terminal `start`.
    /// Returns an error if `start` is not a terminal.
    pub fn call_from<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
        start: Node,
    ) -> Result<SteinerSolution<'a, W>, SteinerError> {
        self.call_with_new_terminals(graph, terminals, terminals, start)
    }

    /// Computes a tree connecting all nodes of `new_terminals`, a superset of `terminals`,
    /// by a search starting at `start`. Leaves in `new_terminals` that are not in `terminals`
    /// are pruned from the result.
    /// Returns an error if `start` is not contained in `new_terminals`.
    pub fn call_with_new_terminals<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
        new_terminals: &Terminals,
        start: Node,
    ) -> Result<SteinerSolution<'a, W>, SteinerError> {
        if !new_terminals.contains(start) {
            return Err(SteinerError::StartNotTerminal { start });
        }
        debug_assert!(terminals.iter().all(|t| new_terminals.contains(t)));

        let timer = Instant::now();
        terminals.ensure_connected(graph)?;
        new_terminals.ensure_connected(graph)?;

        let intermediate = terminal_dijkstra(graph, new_terminals, start);

        let mut tree = GraphCopy::induced(graph, intermediate.original_nodes());
        let weight = tree.reduce_to_minimum_spanning_tree()
            - tree.eliminate_one_degree_steiner_nodes(terminals);
        debug_assert!(tree.is_steiner_tree(terminals));

        self.running_time = timer.elapsed();
        debug!(
            "Takahashi: Steiner tree of weight {weight} from node {start} in {:?}",
            self.running_time
        );

        Ok(SteinerSolution::new(weight, tree))
    }
}

/// Runs the tree-growing Dijkstra search and returns the union of all frozen paths
fn terminal_dijkstra<'a, W: Weight>(
    graph: &'a WeightedGraph<W>,
    new_terminals: &Terminals,
    start: Node,
) -> GraphCopy<'a, W> {
    let n = graph.node_bound() as usize;
    let mut distance = vec![W::infinity(); n];
    let mut predecessor: Vec<Option<EdgeId>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    let mut tree = GraphCopy::new_empty(graph);
    tree.new_node(start);
    distance[start as usize] = W::zero();
    heap.push(MinEntry::new(W::zero(), start));

    let mut found = 1;
    while found < new_terminals.len() {
        let Some(MinEntry { key, item: v }) = heap.pop() else {
            break;
        };
        if key > distance[v as usize] {
            continue;
        }

        if new_terminals.contains(v) && tree.copy_of_node(v).is_none() {
            found += 1;

            // freeze the path back to the tree
            let mut u = v;
            loop {
                distance[u as usize] = W::zero();
                heap.push(MinEntry::new(W::zero(), u));

                let Some(e) = predecessor[u as usize] else {
                    break;
                };
                let next = graph.opposite(e, u);
                let reached_tree = tree.copy_of_node(next).is_some();
                tree.new_edge(e);
                if reached_tree {
                    break;
                }
                u = next;
            }
        } else {
            for (w, e) in graph.incident_edges_of(v) {
                let nd = key + graph.weight_of(e);
                if nd < distance[w as usize] {
                    distance[w as usize] = nd;
                    predecessor[w as usize] = Some(e);
                    heap.push(MinEntry::new(nd, w));
                }
            }
        }
    }

    tree
}

impl MinSteinerTree for Takahashi {
    fn call<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
    ) -> Result<SteinerSolution<'a, W>, SteinerError> {
        let start = self.start_node.unwrap_or_else(|| terminals.first());
        self.call_from(graph, terminals, start)
    }
}

#[cfg(test)]
crate::testing::test_steiner_algorithm!(takahashi_instances, Takahashi::new());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;

    #[test]
    fn path_from_first_terminal() {
        let (graph, terminals) = path_graph();
        let mut algo = Takahashi::new();

        let solution = algo.call_from(&graph, &terminals, 0).unwrap();
        assert_eq!(solution.weight(), 4);
        assert_eq!(
            solution.tree().original_edges().sorted().collect_vec(),
            vec![0, 1, 2, 3]
        );
        assert!(solution.tree().vertices().all(|u| solution.tree().degree_of(u) <= 2));
    }

    #[test]
    fn frozen_paths_act_as_sources() {
        // from 0 the search reaches 2 via 1; afterwards 3 is closer to 1 than to 0
        let graph = WeightedGraph::from_edges(
            4,
            [(0, 1, 2u32), (1, 2, 2), (1, 3, 3), (0, 3, 4)],
        );
        let terminals = Terminals::new(&graph, [0, 2, 3]).unwrap();

        let solution = Takahashi::new().call(&graph, &terminals).unwrap();
        assert_eq!(solution.weight(), 7);
        assert_eq!(
            solution.tree().original_edges().sorted().collect_vec(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn promoted_nodes_are_connected_or_pruned() {
        let (graph, terminals) = star_with_extra_leaf();

        let mut promoted = terminals.clone();
        promoted.insert(3);
        let solution = Takahashi::new()
            .call_with_new_terminals(&graph, &terminals, &promoted, 1)
            .unwrap();

        assert_eq!(solution.weight(), 2);
        assert!(solution.tree().copy_of_node(3).is_none());
    }

    #[test]
    fn zero_weight_edges() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 0u32), (1, 2, 0), (2, 3, 5)]);
        let terminals = Terminals::new(&graph, [0, 2, 3]).unwrap();

        let solution = Takahashi::new().call(&graph, &terminals).unwrap();
        assert_eq!(solution.weight(), 5);
        assert!(solution.tree().is_steiner_tree(&terminals));
    }

    #[test]
    fn start_must_be_a_terminal() {
        let (graph, terminals) = path_graph();
        let err = Takahashi::new().call_from(&graph, &terminals, 1).unwrap_err();
        assert_eq!(err, SteinerError::StartNotTerminal { start: 1 });

        // configured start outside the graph
        let err = Takahashi::new()
            .start_node(17)
            .call(&graph, &terminals)
            .unwrap_err();
        assert_eq!(err, SteinerError::StartNotTerminal { start: 17 });

        let mut promoted = terminals.clone();
        promoted.insert(1);
        let solution = Takahashi::new()
            .call_with_new_terminals(&graph, &terminals, &promoted, 1)
            .unwrap();
        assert_eq!(solution.weight(), 4);
    }
}
