/*!
# Robins & Zelikovsky

Loss-contracting approximation with a ratio of `1 + ln(3)/2 ≈ 1.55` for growing component sizes.

All shortest paths are computed with terminals forbidden as intermediate nodes. For every
component size `3 <= j <= k`, every combination of `j - 2` Steiner nodes and `j` terminals yields
a candidate [`FullComponent`]: the Steiner nodes are joined by a minimum spanning tree over their
distances and every terminal is attached to its nearest Steiner node. Candidates are kept if they
are cheaper than the terminal tree edges they make superfluous.

Starting from a minimum spanning tree over all terminals, the algorithm repeatedly contracts the
component maximizing `(gain - cost) / loss` and promotes all its nodes to terminals. Finally a
[`Takahashi`] run from every terminal connects terminals and promoted nodes; the lightest
resulting tree is returned.

Enumeration is exponential in `k`; the running time is dominated by `O(s^(k-2) t^k)` candidates
for `s` Steiner nodes and `t` terminals.
*/

use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, trace, warn};

use super::{save::*, *};

/// The loss-contracting algorithm of Robins and Zelikovsky.
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
/// let mut algo = RzLoss::new().component_size(3);
/// let solution = algo.call(&graph, &terminals).unwrap();
///
/// assert_eq!(solution.weight(), 3);
/// assert_eq!(algo.number_of_contracted_components(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RzLoss {
    component_size: usize,
    time_limit: Duration,

    components_generated: usize,
    components_contracted: usize,
    component_lookups: usize,
    running_time: Duration,
}

impl Default for RzLoss {
    fn default() -> Self {
        Self {
            component_size: 3,
            time_limit: Duration::from_secs(3600),
            components_generated: 0,
            components_contracted: 0,
            component_lookups: 0,
            running_time: Duration::ZERO,
        }
    }
}

impl RzLoss {
    /// Creates a new instance with components of at most 3 terminals and a time limit of one hour
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of terminals per full component.
    /// Sizes below 3 are rejected when the algorithm is called.
    pub fn set_component_size(&mut self, k: usize) {
        self.component_size = k;
    }

    /// Sets the maximum number of terminals per full component
    pub fn component_size(mut self, k: usize) -> Self {
        self.set_component_size(k);
        self
    }

    /// Bounds the time spent on shortest paths and component generation. Once exceeded, no
    /// further components are generated or contracted.
    pub fn set_time_limit(&mut self, time_limit: Duration) {
        self.time_limit = time_limit;
    }

    /// Bounds the time spent on shortest paths and component generation
    pub fn time_limit(mut self, time_limit: Duration) -> Self {
        self.set_time_limit(time_limit);
        self
    }

    /// Returns the number of components kept as candidates during the last call
    pub fn number_of_generated_components(&self) -> usize {
        self.components_generated
    }

    /// Returns the number of components contracted during the last call
    pub fn number_of_contracted_components(&self) -> usize {
        self.components_contracted
    }

    /// Returns the number of win evaluations of stored components during the last call
    pub fn number_of_component_lookups(&self) -> usize {
        self.component_lookups
    }

    /// Returns the duration of the last call
    pub fn running_time(&self) -> Duration {
        self.running_time
    }
}

/// Advances `tuple`, a strictly increasing sequence of indices below `n`, to the next one in
/// lexicographic order. Returns *false* if `tuple` already was the last one.
fn next_tuple(tuple: &mut [usize], n: usize) -> bool {
    let len = tuple.len();
    let Some(mut i) = (0..len).rev().find(|&i| tuple[i] < i + n - len) else {
        return false;
    };

    tuple[i] += 1;
    while i + 1 < len {
        tuple[i + 1] = tuple[i] + 1;
        i += 1;
    }
    true
}

/// Returns the total weight of all distinct save edges in `terminal_tree` between any two
/// terminals of `component`
fn gain<W: Weight>(
    component: &FullComponent<W>,
    terminal_tree: &GraphCopy<'_, W>,
    table: &SaveTable,
) -> W {
    let mut save_edges: Vec<EdgeId> = Vec::new();
    for (&s, &t) in component.terminals().iter().tuple_combinations() {
        let (Some(cs), Some(ct)) = (terminal_tree.copy_of_node(s), terminal_tree.copy_of_node(t))
        else {
            continue;
        };
        if let Some(e) = table.get(cs, ct) {
            if !save_edges.contains(&e) {
                save_edges.push(e);
            }
        }
    }

    save_edges
        .into_iter()
        .fold(W::zero(), |acc, e| acc + terminal_tree.weight_of(e))
}

/// Data shared by the generation of all candidate components
struct ComponentSearch<'a, 't, W> {
    graph: &'a WeightedGraph<W>,
    terminals: &'t Terminals,
    steiner_nodes: Vec<Node>,
    matrix: ShortestPathMatrix<W>,
    deadline: Option<Instant>,
}

impl<'a, W: Weight> ComponentSearch<'a, '_, W> {
    fn is_expired(&self) -> bool {
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if expired {
            warn!("RzLoss: time limit exceeded, continuing with the components found so far");
        }
        expired
    }

    /// Builds the component over Steiner nodes `steiner` with every terminal of `members`
    /// attached to its nearest Steiner node. Returns the component together with the copy it was
    /// built in, or `None` if some pair of nodes is not connected by a terminal-free path.
    fn component(
        &self,
        steiner: &[Node],
        members: &[Node],
    ) -> Option<(FullComponent<W>, GraphCopy<'a, W>)> {
        let mut nearest = Vec::with_capacity(members.len());
        for &t in members {
            let mut best: Option<(W, Node)> = None;
            for &s in steiner {
                let d = self.matrix.distance(s, t)?;
                if best.is_none_or(|(min, _)| d < min) {
                    best = Some((d, s));
                }
            }
            nearest.push(best?.1);
        }

        let mut skeleton = GraphCopy::new_empty(self.graph);
        let copies: Vec<Node> = steiner.iter().map(|&s| skeleton.new_node(s)).collect();
        for i in 0..steiner.len() {
            for j in 0..i {
                let d = self.matrix.distance(steiner[i], steiner[j])?;
                skeleton.new_dummy_edge(copies[i], copies[j], d);
            }
        }

        let mut tree = GraphCopy::new_empty(self.graph);
        for &s in steiner {
            tree.new_node(s);
        }
        let mst = skeleton.minimum_spanning_tree();
        for (c, e) in mst.tree_edges() {
            let u = skeleton.original_of_node(c);
            let v = skeleton.original_of_node(skeleton.opposite(e, c));
            insert_path(&mut tree, self.matrix.path(u, v));
        }

        let mut component = FullComponent::new(&tree);
        for (&t, &s) in members.iter().zip(&nearest) {
            component.append_terminal(&mut tree, self.matrix.path(s, t));
            component.add_terminal(t);
        }
        Some((component, tree))
    }

    /// Appends all candidates with exactly `k` terminals that are cheaper than their gain in
    /// `terminal_tree`
    fn find_full_components(
        &self,
        k: usize,
        terminal_tree: &GraphCopy<'_, W>,
        table: &SaveTable,
        components: &mut Vec<FullComponent<W>>,
    ) {
        let num_steiner = k - 2;
        if self.steiner_nodes.len() < num_steiner || self.terminals.len() < k {
            return;
        }

        let mut steiner_tuple: Vec<usize> = (0..num_steiner).collect();
        loop {
            if self.is_expired() {
                return;
            }
            let steiner = steiner_tuple
                .iter()
                .map(|&i| self.steiner_nodes[i])
                .collect_vec();

            let mut terminal_tuple: Vec<usize> = (0..k).collect();
            loop {
                let members = terminal_tuple
                    .iter()
                    .map(|&i| self.terminals[i])
                    .collect_vec();
                if let Some((mut component, mut tree)) = self.component(&steiner, &members) {
                    let win = gain(&component, terminal_tree, table).as_f64()
                        - component.cost().as_f64();
                    if win > 0.0 {
                        component.calculate_loss(&mut tree);
                        components.push(component);
                    }
                }

                if !next_tuple(&mut terminal_tuple, self.terminals.len()) {
                    break;
                }
            }

            if !next_tuple(&mut steiner_tuple, self.steiner_nodes.len()) {
                break;
            }
        }
    }
}

impl RzLoss {
    /// Returns the index of the component with the largest positive `(gain - cost) / loss` and
    /// drops all components that no longer win
    fn find_max_component<W: Weight>(
        &mut self,
        components: &mut Vec<FullComponent<W>>,
        terminal_tree: &GraphCopy<'_, W>,
    ) -> Option<usize> {
        let table = SaveTable::new(terminal_tree);
        let mut wins = Vec::with_capacity(components.len());
        components.retain(|component| {
            self.component_lookups += 1;
            let win =
                gain(component, terminal_tree, &table).as_f64() - component.cost().as_f64();
            if win > 0.0 {
                wins.push(win);
            }
            win > 0.0
        });

        let mut best: Option<(f64, usize)> = None;
        for (i, (component, win)) in components.iter().zip(wins).enumerate() {
            let ratio = if component.loss().is_positive() {
                win / component.loss().as_f64()
            } else {
                f64::INFINITY
            };
            if ratio > best.map_or(0.0, |(max, _)| max) {
                best = Some((ratio, i));
            }
        }
        best.map(|(_, i)| i)
    }

    /// Promotes all nodes of `component` and replaces its non-loss edges by edges between the
    /// paired terminals of their endpoints
    fn contract<W: Weight>(
        &mut self,
        terminal_tree: &mut GraphCopy<'_, W>,
        new_terminals: &mut Terminals,
        component: &FullComponent<W>,
    ) {
        self.components_contracted += 1;
        for &u in component.nodes() {
            new_terminals.insert(u);
        }

        let graph = terminal_tree.original();
        for &e in component.edges() {
            if component.loss_edges().contains(&e) {
                continue;
            }

            let Edge(u, v) = graph.endpoints_of(e);
            let (Some(cu), Some(cv)) = (
                terminal_tree.copy_of_node(component.paired_terminal(u)),
                terminal_tree.copy_of_node(component.paired_terminal(v)),
            ) else {
                continue;
            };
            if cu == cv {
                continue;
            }

            let weight = graph.weight_of(e);
            match terminal_tree.find_edge(cu, cv) {
                Some(f) => {
                    if weight < terminal_tree.weight_of(f) {
                        terminal_tree.set_weight(f, weight);
                    }
                }
                None => {
                    terminal_tree.new_dummy_edge(cu, cv, weight);
                }
            }
        }

        let weight = terminal_tree.reduce_to_minimum_spanning_tree();
        trace!(
            "RzLoss: contracted component over {:?} of cost {} and loss {}; terminal tree weighs {weight}",
            component.terminals(),
            component.cost(),
            component.loss()
        );
    }
}

impl MinSteinerTree for RzLoss {
    fn call<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
    ) -> Result<SteinerSolution<'a, W>, SteinerError> {
        let timer = Instant::now();
        self.components_generated = 0;
        self.components_contracted = 0;
        self.component_lookups = 0;

        if self.component_size < 3 {
            return Err(SteinerError::ComponentSizeTooSmall {
                k: self.component_size,
            });
        }
        terminals.ensure_connected(graph)?;

        let deadline = timer.checked_add(self.time_limit);
        let search = ComponentSearch {
            graph,
            terminals,
            steiner_nodes: graph.vertices().filter(|&u| !terminals.contains(u)).collect(),
            matrix: ShortestPathMatrix::restricted(graph, |u| !terminals.contains(u), deadline),
            deadline,
        };

        let mut terminal_tree = terminal_spanning_tree(graph, terminals, |i, j| {
            search
                .matrix
                .distance(terminals[i], terminals[j])
                .unwrap_or_else(W::infinity)
        });
        debug!(
            "RzLoss: terminal spanning tree of weight {}",
            terminal_tree.total_weight()
        );

        let mut components = Vec::new();
        let table = SaveTable::new(&terminal_tree);
        for k in 3..=self.component_size.min(terminals.len()) {
            search.find_full_components(k, &terminal_tree, &table, &mut components);
        }
        self.components_generated = components.len();
        debug!(
            "RzLoss: generated {} components with at most {} terminals",
            self.components_generated, self.component_size
        );

        let mut new_terminals = terminals.clone();
        while !components.is_empty() && !search.is_expired() {
            let Some(index) = self.find_max_component(&mut components, &terminal_tree) else {
                break;
            };
            let component = components.remove(index);
            self.contract(&mut terminal_tree, &mut new_terminals, &component);
        }
        debug!(
            "RzLoss: contracted {} components, {} nodes promoted",
            self.components_contracted,
            new_terminals.len() - terminals.len()
        );

        let solution = best_takahashi_tree(graph, terminals, &new_terminals)?;
        self.running_time = timer.elapsed();
        debug!(
            "RzLoss: Steiner tree of weight {} in {:?}",
            solution.weight(),
            self.running_time
        );

        Ok(solution)
    }
}

#[cfg(test)]
crate::testing::test_steiner_algorithm!(rz_loss_default, RzLoss::new());

#[cfg(test)]
crate::testing::test_steiner_algorithm!(rz_loss_four, RzLoss::new().component_size(4));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    // terminals 0, 1, 2 and Steiner nodes 3, 4
    fn spider() -> (WeightedGraph<u32>, Terminals) {
        let graph = WeightedGraph::from_edges(5, [(0, 3, 2u32), (1, 3, 3), (3, 4, 1), (4, 2, 5)]);
        let terminals = Terminals::new(&graph, [0, 1, 2]).unwrap();
        (graph, terminals)
    }

    #[test]
    fn tuples_in_lexicographic_order() {
        let mut tuple = vec![0, 1];
        let mut all = vec![tuple.clone()];
        while next_tuple(&mut tuple, 4) {
            all.push(tuple.clone());
        }
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );

        let mut single = vec![2];
        assert!(!next_tuple(&mut single, 3));
    }

    #[test]
    fn component_size_below_three_is_rejected() {
        let (graph, terminals) = spider();
        let err = RzLoss::new()
            .component_size(2)
            .call(&graph, &terminals)
            .unwrap_err();
        assert_eq!(err, SteinerError::ComponentSizeTooSmall { k: 2 });
    }

    #[test]
    fn spider_is_contracted_once() {
        init_logger();
        let (graph, terminals) = spider();
        let mut algo = RzLoss::new();

        let solution = algo.call(&graph, &terminals).unwrap();
        assert_eq!(solution.weight(), 11);
        assert_eq!(solution.tree().number_of_edges(), 4);
        assert!(solution.tree().is_steiner_tree(&terminals));

        // one candidate per Steiner node; the second one no longer wins after contraction
        assert_eq!(algo.number_of_generated_components(), 2);
        assert_eq!(algo.number_of_contracted_components(), 1);
        assert_eq!(algo.number_of_component_lookups(), 3);
    }

    #[test]
    fn components_are_built_from_terminal_free_paths() {
        let (graph, terminals) = spider();
        let search = ComponentSearch {
            graph: &graph,
            terminals: &terminals,
            steiner_nodes: vec![3, 4],
            matrix: ShortestPathMatrix::restricted(&graph, |u| !terminals.contains(u), None),
            deadline: None,
        };

        let (component, _) = search.component(&[4], &[0, 1, 2]).unwrap();
        assert_eq!(component.cost(), 11);
        assert_eq!(component.terminals(), &[0, 1, 2]);
        assert_eq!(component.nodes(), &[4, 3, 0, 1, 2]);
        assert_eq!(component.edges(), &[2, 0, 1, 3]);
    }

    #[test]
    fn larger_components_than_terminals() {
        let (graph, terminals) = spider();
        let mut algo = RzLoss::new().component_size(10);

        let solution = algo.call(&graph, &terminals).unwrap();
        assert_eq!(solution.weight(), 11);
        assert_eq!(algo.number_of_generated_components(), 2);
    }

    #[test]
    fn zero_time_limit_still_yields_a_tree() {
        let (graph, terminals) = wiki_example();
        let mut algo = RzLoss::new().time_limit(Duration::ZERO);

        let solution = algo.call(&graph, &terminals).unwrap();
        assert!(solution.tree().is_steiner_tree(&terminals));
        assert_eq!(algo.number_of_generated_components(), 0);
        assert_eq!(algo.number_of_contracted_components(), 0);
    }

    #[test]
    fn statistics_are_reset() {
        let (graph, terminals) = spider();
        let mut algo = RzLoss::new();
        algo.call(&graph, &terminals).unwrap();

        let (graph, terminals) = path_graph();
        algo.call(&graph, &terminals).unwrap();
        assert_eq!(algo.number_of_contracted_components(), 0);
    }
}
