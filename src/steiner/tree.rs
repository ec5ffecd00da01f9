use super::*;

/// Validation and pruning of Steiner trees given as copies of the input graph.
pub trait SteinerTreeOps {
    /// Numeric type of the edge weights
    type Weight;

    /// Returns *true* if the copy is a Steiner tree for `terminals`:
    /// it is connected, has exactly one edge less than nodes, contains every terminal with
    /// degree at least one and every non-terminal with degree at least two.
    /// A single node without edges is a valid tree for a single terminal.
    fn is_steiner_tree(&self, terminals: &Terminals) -> bool;

    /// Repeatedly deletes non-terminals of degree one (together with their incident edge) and
    /// returns the total weight of all deleted edges.
    fn eliminate_one_degree_steiner_nodes(&mut self, terminals: &Terminals) -> Self::Weight;
}

impl<W: Weight> SteinerTreeOps for GraphCopy<'_, W> {
    type Weight = W;

    fn is_steiner_tree(&self, terminals: &Terminals) -> bool {
        if self.number_of_edges() + 1 != self.number_of_nodes() {
            return false;
        }

        let single = terminals.len() == 1 && self.number_of_nodes() == 1;
        for t in terminals.iter() {
            match self.copy_of_node(t) {
                Some(c) if single || self.degree_of(c) >= 1 => {}
                _ => return false,
            }
        }

        if self
            .vertices()
            .any(|c| !terminals.contains(self.original_of_node(c)) && self.degree_of(c) < 2)
        {
            return false;
        }

        self.is_connected()
    }

    fn eliminate_one_degree_steiner_nodes(&mut self, terminals: &Terminals) -> W {
        let leaves: Vec<Node> = self
            .vertices()
            .filter(|&c| self.degree_of(c) == 1 && !terminals.contains(self.original_of_node(c)))
            .collect();

        let mut removed = W::zero();
        for leaf in leaves {
            let mut u = leaf;
            while self.has_node(u)
                && self.degree_of(u) == 1
                && !terminals.contains(self.original_of_node(u))
            {
                let Some((v, e)) = self.incident_edges_of(u).next() else {
                    break;
                };
                removed += self.weight_of(e);
                self.remove_node(u);
                u = v;
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prunes_dangling_paths() {
        // terminals 0 and 2, Steiner path 1 - 3 - 4 hanging off node 1
        let graph =
            WeightedGraph::from_edges(5, [(0, 1, 1u32), (1, 2, 1), (1, 3, 2), (3, 4, 5)]);
        let terminals = Terminals::new(&graph, [0, 2]).unwrap();
        let mut tree = GraphCopy::from_original(&graph);

        assert!(!tree.is_steiner_tree(&terminals));
        assert_eq!(tree.eliminate_one_degree_steiner_nodes(&terminals), 7);
        assert!(tree.is_steiner_tree(&terminals));
        assert!(tree.is_steiner_tree(&terminals));
        assert_eq!(tree.number_of_nodes(), 3);
        assert_eq!(tree.total_weight(), 2);
    }

    #[test]
    fn rejects_invalid_trees() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (1, 2, 1), (2, 0, 1), (2, 3, 1)]);
        let terminals = Terminals::new(&graph, [0, 3]).unwrap();

        // cycle plus pendant edge
        assert!(!GraphCopy::from_original(&graph).is_steiner_tree(&terminals));

        // missing terminal
        let partial = GraphCopy::induced(&graph, [0, 1]);
        assert!(!partial.is_steiner_tree(&terminals));

        let mut path = GraphCopy::new_empty(&graph);
        for e in [0, 1, 3] {
            path.new_edge(e);
        }
        assert!(path.is_steiner_tree(&terminals));

        let mut lonely = GraphCopy::new_empty(&graph);
        lonely.new_node(3);
        assert!(lonely.is_steiner_tree(&Terminals::new(&graph, [3]).unwrap()));
    }
}
