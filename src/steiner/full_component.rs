/*!
# Full Components

A *full component* is a Steiner tree over a subset of terminals in which every terminal is a leaf.
Besides its nodes, edges and cost, a component knows its *loss*: the cheapest forest connecting
every Steiner node of the component to some terminal of the component. Contracting a component
into a terminal spanning tree keeps everything but the loss edges, so the loss measures how much
of the component is spent on Steiner nodes alone.

The loss is computed as a minimum spanning tree of the component after connecting all terminals
by zero-weight edges; every Steiner node is *paired* with the terminal its loss path leads to.
*/

use fxhash::FxHashMap;

use super::*;

/// A full component given by the original ids of its nodes and edges.
#[derive(Debug, Clone)]
pub struct FullComponent<W> {
    terminals: Vec<Node>,
    nodes: Vec<Node>,
    edges: Vec<EdgeId>,
    cost: W,
    loss: W,
    loss_edges: Vec<EdgeId>,
    paired_terminal: FxHashMap<Node, Node>,
}

impl<W: Weight> FullComponent<W> {
    /// Creates a component without terminals from all nodes and edges of `component`.
    /// The cost is the total weight of all its edges.
    pub fn new(component: &GraphCopy<'_, W>) -> Self {
        Self {
            terminals: Vec::new(),
            nodes: component.original_nodes().collect(),
            edges: component.original_edges().collect(),
            cost: component.total_weight(),
            loss: W::zero(),
            loss_edges: Vec::new(),
            paired_terminal: FxHashMap::default(),
        }
    }

    /// Appends all edges of `path` (original ids) that are not yet part of `component`,
    /// creating missing endpoints on the way, and updates nodes, edges and cost accordingly.
    pub fn append_terminal(&mut self, component: &mut GraphCopy<'_, W>, path: &[EdgeId]) {
        for &e in path {
            if component.is_mapped(e) {
                continue;
            }

            let Edge(u, v) = component.original().endpoints_of(e);
            for x in [u, v] {
                if component.copy_of_node(x).is_none() {
                    self.nodes.push(x);
                }
            }

            let c = component.new_edge(e);
            self.cost += component.weight_of(c);
            self.edges.push(e);
        }
    }

    /// Marks original node `t` as a terminal of this component
    pub fn add_terminal(&mut self, t: Node) {
        self.terminals.push(t);
    }

    /// Computes the loss, the loss edges and the paired terminal of every node.
    /// `component` must be the graph this component was built from; it is left unchanged.
    pub fn calculate_loss(&mut self, component: &mut GraphCopy<'_, W>) {
        self.paired_terminal = component.original_nodes().map(|u| (u, u)).collect();
        self.loss = W::zero();
        self.loss_edges.clear();

        let Some(root) = self
            .terminals
            .first()
            .and_then(|&s| component.copy_of_node(s))
        else {
            return;
        };

        let others: Vec<Node> = self.terminals[1..]
            .iter()
            .filter_map(|&t| component.copy_of_node(t))
            .collect();
        let zero_edges: Vec<EdgeId> = others
            .into_iter()
            .map(|c| component.new_dummy_edge(root, c, W::zero()))
            .collect();

        let mst = component.minimum_spanning_tree_from(root);
        for (_, e) in mst.tree_edges() {
            let weight = component.weight_of(e);
            if weight.is_positive() {
                self.loss += weight;
                self.loss_edges.extend(component.original_of_edge(e));
            }
        }

        let steiner_nodes: Vec<Node> = component
            .vertices()
            .filter(|&c| !self.is_terminal(component.original_of_node(c)))
            .collect();
        for c in steiner_nodes {
            self.find_terminal(component, &mst, c);
        }

        for e in zero_edges {
            component.remove_edge(e);
        }
    }

    /// Follows the loss tree from copy node `c` towards the root until a terminal is hit and
    /// memoizes the result for all nodes on the way
    fn find_terminal(
        &mut self,
        component: &GraphCopy<'_, W>,
        mst: &SpanningTree<W>,
        c: Node,
    ) -> Node {
        let u = component.original_of_node(c);
        if !self.is_terminal(u) && self.paired_terminal(u) == u {
            if let Some(e) = mst.predecessor_edge(c) {
                let t = self.find_terminal(component, mst, component.opposite(e, c));
                self.paired_terminal.insert(u, t);
            }
        }
        self.paired_terminal(u)
    }

    fn is_terminal(&self, u: Node) -> bool {
        self.terminals.contains(&u)
    }

    /// Returns the terminals of this component in the order they were added
    pub fn terminals(&self) -> &[Node] {
        &self.terminals
    }

    /// Returns the original ids of all nodes
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the original ids of all edges
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Returns the original ids of all loss edges
    pub fn loss_edges(&self) -> &[EdgeId] {
        &self.loss_edges
    }

    /// Returns the terminal that node `u` is connected to by loss edges
    /// (`u` itself for terminals and nodes not in this component)
    pub fn paired_terminal(&self, u: Node) -> Node {
        self.paired_terminal.get(&u).copied().unwrap_or(u)
    }

    /// Returns the total weight of all edges
    pub fn cost(&self) -> W {
        self.cost
    }

    /// Returns the total weight of all loss edges
    pub fn loss(&self) -> W {
        self.loss
    }
}
