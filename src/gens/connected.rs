use std::ops::RangeInclusive;

use fxhash::FxHashSet;

use super::*;

/// Generator for connected random graphs with `n` nodes and `m` edges.
///
/// The first `n - 1` edges form a [`RandomTree`]; the remaining edges are drawn uniformly among
/// all node pairs not connected yet, so the result has neither loops nor parallel edges.
#[derive(Debug, Clone)]
pub struct ConnectedGnm<W> {
    n: NumNodes,
    m: NumEdges,
    weights: Option<RangeInclusive<W>>,
}

impl<W> Default for ConnectedGnm<W> {
    fn default() -> Self {
        Self {
            n: 0,
            m: 0,
            weights: None,
        }
    }
}

impl<W> ConnectedGnm<W> {
    /// Creates a new empty generator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W> NumNodesGen for ConnectedGnm<W> {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl<W> NumEdgesGen for ConnectedGnm<W> {
    fn set_edges(&mut self, m: NumEdges) {
        self.m = m;
    }
}

impl<W> WeightRangeGen<W> for ConnectedGnm<W> {
    fn set_weights(&mut self, range: RangeInclusive<W>) {
        self.weights = Some(range);
    }
}

impl<W> GraphGenerator for ConnectedGnm<W>
where
    W: Weight + SampleUniform,
{
    type Weight = W;

    /// ** Panics if no weight range was set, if `n > 0` and `m < n - 1`, or if `m` exceeds the
    /// number of node pairs **
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = (Node, Node, W)>
    where
        R: Rng,
    {
        let Some(range) = &self.weights else {
            panic!("weight range of ConnectedGnm was not set");
        };
        let weights = weight_distribution(range);

        let n = self.n as u64;
        let m = self.m as u64;
        assert!(n == 0 || m + 1 >= n, "{m} edges cannot connect {n} nodes");
        assert!(m <= n * n.saturating_sub(1) / 2, "too many edges for {n} nodes");

        let mut edges = RandomTree::new()
            .nodes(self.n)
            .weights(range.clone())
            .generate(rng);

        let mut present: FxHashSet<Edge> = edges
            .iter()
            .map(|&(u, v, _)| Edge(u, v).normalized())
            .collect();

        while (edges.len() as u64) < m {
            let u = rng.random_range(0..self.n);
            let v = rng.random_range(0..self.n);
            let edge = Edge(u, v).normalized();
            if !edge.is_loop() && present.insert(edge) {
                edges.push((u, v, weights.sample(rng)));
            }
        }

        edges.into_iter()
    }
}
