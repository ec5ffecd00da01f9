/*!
# Kou, Markowsky & Berman

1. Compute shortest paths from every terminal.
2. Build the complete graph over all terminals weighted by their distances and compute its
   minimum spanning tree.
3. Replace every tree edge by its shortest path in the input graph. Paths may share edges;
   shared edges are inserted once.
4. Compute a minimum spanning tree of the resulting subgraph and repeatedly delete Steiner leaves.

The resulting tree weighs at most `2 (1 - 1/l)` times the optimum where `l` is the number of
leaves of an optimal tree. The running time is dominated by one Dijkstra run per terminal.
*/

use log::debug;

use super::*;

/// The Kou-Markowsky-Berman 2-approximation.
///
/// # Example
/// ```
/// use steiner_approx::{prelude::*, steiner::*};
///
/// // terminals 0, 1, 2 around the center 3; direct edges are more expensive
/// let graph = WeightedGraph::from_edges(
///     4,
///     [(0, 3, 1u32), (1, 3, 1), (2, 3, 1), (0, 1, 3), (1, 2, 3), (0, 2, 3)],
/// );
/// let terminals = Terminals::new(&graph, [0, 1, 2]).unwrap();
///
/// let solution = Kou::new().call(&graph, &terminals).unwrap();
/// assert_eq!(solution.weight(), 3);
/// assert!(solution.tree().copy_of_node(3).is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Kou;

impl Kou {
    /// Creates a new instance
    pub fn new() -> Self {
        Self
    }
}

impl MinSteinerTree for Kou {
    fn call<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
    ) -> Result<SteinerSolution<'a, W>, SteinerError> {
        terminals.ensure_connected(graph)?;

        let shortest_paths: Vec<_> = terminals.iter().map(|t| graph.dijkstra(t)).collect();
        let distance_tree = terminal_spanning_tree(graph, terminals, |i, j| {
            shortest_paths[i].distance_or_infinity(terminals[j])
        });
        debug!(
            "Kou: spanning tree of the distance graph over {} terminals has weight {}",
            terminals.len(),
            distance_tree.total_weight()
        );

        let mut tree = GraphCopy::new_empty(graph);
        for t in terminals.iter() {
            tree.new_node(t);
        }

        for e in distance_tree.edge_ids() {
            let Edge(i, j) = distance_tree.endpoints_of(e);
            let path = shortest_paths[i as usize].path_to(graph, terminals[j as usize]);
            insert_path(&mut tree, &path);
        }

        let weight = tree.reduce_to_minimum_spanning_tree()
            - tree.eliminate_one_degree_steiner_nodes(terminals);
        debug_assert!(tree.is_steiner_tree(terminals));
        debug!("Kou: Steiner tree of weight {weight}");

        Ok(SteinerSolution::new(weight, tree))
    }
}

#[cfg(test)]
crate::testing::test_steiner_algorithm!(kou_instances, Kou::new());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_path_edges_are_inserted_once() {
        // both terminal pairs (0, 2) and (0, 3) are connected via 0 - 1 - 2
        let graph = WeightedGraph::from_edges(
            5,
            [(0, 1, 2u32), (1, 2, 2), (2, 3, 1), (0, 4, 5), (4, 3, 5)],
        );
        let terminals = Terminals::new(&graph, [0, 2, 3]).unwrap();

        let solution = Kou::new().call(&graph, &terminals).unwrap();
        assert_eq!(solution.weight(), 5);
        let mut edges: Vec<_> = solution.tree().original_edges().collect();
        edges.sort_unstable();
        assert_eq!(edges, vec![0, 1, 2]);
    }
}
