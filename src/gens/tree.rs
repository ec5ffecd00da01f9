/*!
# Random Spanning Trees

The generator grows a tree from a root by repeated random walks: each walk starts at a random
node outside the tree, jumps between uniformly chosen nodes while rejecting nodes already on the
walk, and stops once it hits the tree. The walk is then attached to the tree edge by edge.
The result is connected and has exactly `n - 1` edges.
*/

use std::ops::RangeInclusive;

use stream_bitset::prelude::*;

use super::*;

/// Generator for a random spanning tree over `n` nodes with uniformly distributed weights.
///
/// # Example
/// ```
/// use steiner_approx::gens::*;
///
/// let mut rng = rand::rng();
/// let edges = RandomTree::new().nodes(5).weights(1..=3u32).generate(&mut rng);
///
/// assert_eq!(edges.len(), 4);
/// assert!(edges.iter().all(|&(_, _, w)| (1..=3).contains(&w)));
/// ```
#[derive(Debug, Clone)]
pub struct RandomTree<W> {
    n: NumNodes,
    root: Node,
    weights: Option<RangeInclusive<W>>,
}

impl<W> Default for RandomTree<W> {
    fn default() -> Self {
        Self {
            n: 0,
            root: 0,
            weights: None,
        }
    }
}

impl<W> RandomTree<W> {
    /// Creates a new generator with `n = 0` and root `0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node the tree is grown from
    pub fn set_root(&mut self, root: Node) {
        self.root = root;
    }

    /// Sets the node the tree is grown from
    pub fn root(mut self, root: Node) -> Self {
        self.set_root(root);
        self
    }
}

impl<W> NumNodesGen for RandomTree<W> {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl<W> WeightRangeGen<W> for RandomTree<W> {
    fn set_weights(&mut self, range: RangeInclusive<W>) {
        self.weights = Some(range);
    }
}

impl<W> GraphGenerator for RandomTree<W>
where
    W: Weight + SampleUniform,
{
    type Weight = W;

    /// ** Panics if no weight range was set or if `n > 0` and `root >= n` **
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = (Node, Node, W)>
    where
        R: Rng,
    {
        let Some(range) = &self.weights else {
            panic!("weight range of RandomTree was not set");
        };
        let weights = weight_distribution(range);

        let mut walk = (self.n > 0).then(|| TreeWalk::new(self.n, self.root));
        std::iter::from_fn(move || {
            let Edge(u, v) = walk.as_mut()?.next_edge(rng)?;
            Some((u, v, weights.sample(rng)))
        })
    }
}

/// Loop-avoiding random walk attaching all nodes to a growing tree.
struct TreeWalk {
    node_gen: Uniform<Node>,
    connected: NodeBitSet,
    on_path: NodeBitSet,
    path: Vec<Node>,
    path_skip: usize,
}

impl TreeWalk {
    /// ** Panics if `root >= n` **
    fn new(n: NumNodes, root: Node) -> Self {
        assert!(root < n);

        Self {
            node_gen: Uniform::new(0, n).unwrap_or_else(|_| panic!("cannot sample from {n} nodes")),
            connected: NodeBitSet::new_with_bits_set(n, [root]),
            on_path: NodeBitSet::new(n),
            path: Vec::new(),
            path_skip: usize::MAX - 1,
        }
    }

    fn next_edge<R: Rng>(&mut self, rng: &mut R) -> Option<Edge> {
        if self.path_skip + 1 < self.path.len() {
            self.path_skip += 1;
            return Some(Edge(
                self.path[self.path_skip],
                self.path[self.path_skip - 1],
            ));
        }

        if self.connected.are_all_set() {
            return None;
        }

        self.path_skip = usize::MAX - 1;
        self.on_path.clear_all();
        self.path.clear();

        loop {
            let u = self.node_gen.sample(rng);

            if self.path.is_empty() && self.connected.get_bit(u) {
                continue;
            }

            // avoid loops
            if self.on_path.set_bit(u) {
                continue;
            }

            self.path.push(u);

            if self.connected.set_bit(u) {
                self.path_skip = 1;
                return Some(Edge(self.path[1], self.path[0]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::Connectivity;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn spanning_trees() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for n in [1, 2, 5, 30] {
            for root in [0, n - 1] {
                let edges = RandomTree::new()
                    .nodes(n)
                    .root(root)
                    .weights(0..=4u32)
                    .generate(rng);
                assert_eq!(edges.len() as NumNodes, n - 1);

                let tree = WeightedGraph::from_edges(n, edges);
                assert!(tree.is_connected());
            }
        }

        assert!(RandomTree::<u32>::new().weights(1..=1).generate(rng).is_empty());
    }
}
