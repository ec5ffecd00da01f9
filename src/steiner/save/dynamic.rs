use fxhash::FxHashMap;
use log::trace;

use super::*;

/// Save structure that updates its [`HeaviestEdgeTree`] in place.
///
/// A contraction only rewires the vertices on the ancestor paths of the three contracted leaves:
/// the leaves are regrouped below two fresh zero-weight vertices, the two save vertices are
/// dropped and the remaining path vertices are merged bottom-up in order of their weight.
/// An update takes time linear in the height of the arborescence plus a rebuild of the LCA index.
#[derive(Debug, Clone)]
pub struct DynamicLcaTree<W> {
    arborescence: HeaviestEdgeTree<W>,
    leaf: FxHashMap<Node, Node>,
}

impl<W: Weight> DynamicLcaTree<W> {
    /// Builds the structure for a spanning tree over terminals given as a copy of the input graph
    pub fn new(terminal_tree: &GraphCopy<'_, W>) -> Self {
        let leaf = terminal_tree
            .vertices()
            .map(|c| (terminal_tree.original_of_node(c), c))
            .collect();

        Self {
            arborescence: HeaviestEdgeTree::build(terminal_tree),
            leaf,
        }
    }

    /// Returns the arborescence
    pub fn arborescence(&self) -> &HeaviestEdgeTree<W> {
        &self.arborescence
    }

    fn leaf_of(&self, u: Node) -> Node {
        match self.leaf.get(&u) {
            Some(&l) => l,
            None => panic!("node {u} is not a terminal of the save structure"),
        }
    }

    fn lca(&self, u: Node, v: Node) -> Node {
        self.arborescence.lca(self.leaf_of(u), self.leaf_of(v))
    }

    /// Returns the two distinct lowest common ancestors of the leaves of a triple
    fn save_vertices(&self, u: Node, v: Node, w: Node) -> (Node, Node) {
        let save1 = self.lca(u, v);
        let mut save2 = self.lca(u, w);
        if save1 == save2 {
            save2 = self.lca(v, w);
        }
        (save1, save2)
    }
}

impl<W: Weight> Save<W> for DynamicLcaTree<W> {
    fn save_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.arborescence.edge(self.lca(u, v))
    }

    fn save_weight(&self, u: Node, v: Node) -> W {
        self.arborescence.weight(self.lca(u, v))
    }

    fn gain(&self, u: Node, v: Node, w: Node) -> W {
        let (save1, save2) = self.save_vertices(u, v, w);
        self.arborescence.weight(save1) + self.arborescence.weight(save2)
    }

    fn update(&mut self, triple: &Triple<W>) {
        let [s0, s1, s2] = triple.terminals();
        let (save1, save2) = self.save_vertices(s0, s1, s2);
        let leaves = [s0, s1, s2].map(|s| self.leaf_of(s));

        let arb = &mut self.arborescence;
        let mut pointers = leaves.map(|l| arb.parent(l));
        for l in leaves {
            arb.detach(l);
        }

        // s0 and s1 meet first, then s2; both meeting points are free
        let joined = arb.push_contraction_vertex();
        arb.attach(leaves[0], joined);
        arb.attach(leaves[1], joined);
        let mut current = arb.push_contraction_vertex();
        arb.attach(joined, current);
        arb.attach(leaves[2], current);

        // merge the three ancestor paths by increasing weight, deeper vertices first on ties
        while let Some(x) = lowest_pointer(arb, &pointers) {
            if x != save1 && x != save2 {
                arb.detach(current);
                arb.attach(current, x);
                current = x;
            }

            let parent = arb.parent(x);
            for p in pointers.iter_mut() {
                if *p == Some(x) {
                    *p = parent;
                }
            }
        }

        arb.detach(current);
        arb.remove_vertex(save1);
        arb.remove_vertex(save2);
        arb.reindex(current);

        trace!(
            "Rewired arborescence for triple {:?}, new root {current}",
            triple.terminals()
        );
    }
}

fn lowest_pointer<W: Weight>(
    arb: &HeaviestEdgeTree<W>,
    pointers: &[Option<Node>; 3],
) -> Option<Node> {
    pointers.iter().flatten().copied().min_by(|&a, &b| {
        arb.weight(a)
            .cmp_weight(&arb.weight(b))
            .then_with(|| arb.level(b).cmp(&arb.level(a)))
    })
}
