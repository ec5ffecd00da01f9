/*!
`steiner_approx` is a library of **approximation algorithms for the minimum Steiner tree problem**
on undirected graphs with non-negative edge weights.

Given a connected graph and a set of *terminal* nodes, a Steiner tree is a subtree connecting all
terminals; it may use additional *Steiner* nodes. Finding a tree of minimum weight is NP-hard, so
this crate provides the classical polynomial-time approximations:

| Algorithm | Ratio | Type |
|---|---|---|
| Kou, Markowsky & Berman | 2 | [`steiner::Kou`] |
| Mehlhorn | 2 | [`steiner::Mehlhorn`] |
| Takahashi & Matsuyama | 2 | [`steiner::Takahashi`] |
| Zelikovsky | 11/6 | [`steiner::Zelikovsky`] |
| Robins & Zelikovsky (loss-contracting) | 1.55 for large `k` | [`steiner::RzLoss`] |

# Representation

We represent **nodes** as `u32` and **edges** by a stable `u32`-id. Graphs are multigraphs:
parallel edges are permitted and distinguished by their ids. Edge weights are generic over any
numeric type implementing [`Weight`] (e.g. `u32`, `u64`, `f64`).

- [`WeightedGraph`](crate::repr::WeightedGraph) is the input graph,
- [`GraphCopy`](crate::repr::GraphCopy) is an editable graph mapping nodes/edges back to an original.
  All algorithms return their Steiner tree as a `GraphCopy` of the input.

# Design

All algorithms are provided as configurable structs that one can alter to their needs using
either the *Builder* / *Setter* pattern before running them via [`steiner::MinSteinerTree::call`].
Basic graph algorithms (Dijkstra, Voronoi regions, minimum spanning trees) are implemented via
traits on the graph itself.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, weights, basic graph operations and both graph representations,
- [`algo`] includes shortest paths, Voronoi regions, minimum spanning trees and connectivity checks,
- [`steiner`] includes all Steiner tree approximations together with their supporting data structures,
- [`gens`] includes random generators for connected weighted instances.

```
use steiner_approx::{prelude::*, steiner::*};

// 0 - 1 - 2 - 3 - 4 (unit weights), terminals {0, 2, 4}
let graph = WeightedGraph::from_edges(5, [(0, 1, 1u32), (1, 2, 1), (2, 3, 1), (3, 4, 1)]);
let terminals = Terminals::new(&graph, [0, 2, 4]).unwrap();

let solution = Zelikovsky::new().call(&graph, &terminals).unwrap();
assert_eq!(solution.weight(), 4);
assert!(solution.tree().is_steiner_tree(&terminals));
```
*/

pub mod algo;
pub mod edge;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub mod steiner;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;
pub mod weight;

pub use edge::*;
pub use node::*;
pub use weight::*;

/// `steiner_approx::prelude` includes definitions for nodes, edges and weights, all basic graph operation traits as well as both graph representations.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*, weight::*};
}
