/*!
# Instance Generators

Random generators for connected weighted graphs, used to build Steiner tree instances.

Each generator is configured via the builder pattern and produces a stream of weighted edges:

1. Create a generator instance (e.g., `RandomTree::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).weights(1..=10)`).
3. Generate edges via `generate()` or `stream()`.

The [`RandomWeightedGraph`] trait wraps the generators into constructors of whole graphs:
- a uniform random spanning tree via a loop-avoiding random walk,
- a connected `G(n, m)`-style graph consisting of a random spanning tree plus uniformly chosen extra edges.

Edge weights are drawn uniformly from an inclusive range.

```
use steiner_approx::{gens::*, prelude::*, algo::Connectivity};
use rand::SeedableRng;

let rng = &mut rand::rngs::StdRng::seed_from_u64(1);
let graph = WeightedGraph::<u32>::random_connected(rng, 20, 40, 1..=10);

assert_eq!(graph.number_of_edges(), 40);
assert!(graph.is_connected());
assert!(graph.edges().all(|(_, _, w)| (1..=10).contains(&w)));
```
*/

use std::ops::RangeInclusive;

use rand::{Rng, distr::uniform::SampleUniform};
use rand_distr::{Distribution, Uniform};

use crate::prelude::*;

mod connected;
mod tree;

pub use connected::*;
pub use tree::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes in the graph generator.
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes in the graph generator.
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Trait for generators that allow setting the number of edges.
pub trait NumEdgesGen: Sized {
    /// Sets the number of edges in the graph generator.
    fn set_edges(&mut self, m: NumEdges);

    /// Sets the number of edges in the graph generator.
    fn edges(mut self, m: NumEdges) -> Self {
        self.set_edges(m);
        self
    }
}

/// Trait for generators with uniformly distributed edge weights.
pub trait WeightRangeGen<W>: Sized {
    /// Sets the inclusive range edge weights are drawn from.
    fn set_weights(&mut self, range: RangeInclusive<W>);

    /// Sets the inclusive range edge weights are drawn from.
    fn weights(mut self, range: RangeInclusive<W>) -> Self {
        self.set_weights(range);
        self
    }
}

/// General trait for a configurable random generator of weighted edges.
pub trait GraphGenerator {
    /// Numeric type of the generated weights
    type Weight;

    /// Generates a list of random weighted edges.
    fn generate<R>(&self, rng: &mut R) -> Vec<(Node, Node, Self::Weight)>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated weighted edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = (Node, Node, Self::Weight)>
    where
        R: Rng;
}

/// Creates the uniform distribution over an inclusive weight range
/// ** Panics if the range is empty **
fn weight_distribution<W>(range: &RangeInclusive<W>) -> Uniform<W>
where
    W: Weight + SampleUniform,
{
    Uniform::new_inclusive(*range.start(), *range.end())
        .unwrap_or_else(|_| panic!("invalid weight range {range:?}"))
}

/// Trait for building whole weighted graphs from the generators of this module.
pub trait RandomWeightedGraph: Sized {
    /// Numeric type of the generated weights
    type Weight;

    /// Creates a random spanning tree over `n` nodes.
    fn random_tree<R>(rng: &mut R, n: NumNodes, weights: RangeInclusive<Self::Weight>) -> Self
    where
        R: Rng;

    /// Creates a random connected graph over `n` nodes with `m >= n - 1` edges
    /// and without loops or parallel edges.
    fn random_connected<R>(
        rng: &mut R,
        n: NumNodes,
        m: NumEdges,
        weights: RangeInclusive<Self::Weight>,
    ) -> Self
    where
        R: Rng;
}

impl<W> RandomWeightedGraph for WeightedGraph<W>
where
    W: Weight + SampleUniform,
{
    type Weight = W;

    fn random_tree<R>(rng: &mut R, n: NumNodes, weights: RangeInclusive<W>) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            RandomTree::new().nodes(n).weights(weights).stream(rng),
        )
    }

    fn random_connected<R>(
        rng: &mut R,
        n: NumNodes,
        m: NumEdges,
        weights: RangeInclusive<W>,
    ) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            ConnectedGnm::new()
                .nodes(n)
                .edges(m)
                .weights(weights)
                .stream(rng),
        )
    }
}
