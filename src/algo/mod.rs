/*!
# Graph Algorithms

This module provides the **graph algorithms** the Steiner tree approximations are built upon.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use steiner_approx::algo::*;
```
and gain access to shortest paths, Voronoi regions, minimum spanning trees and connectivity checks.
Most of them are implemented as traits on any [`AdjacencyList`], e.g. `graph.dijkstra(source)`.
*/

mod connectivity;
mod dijkstra;
mod heap;
mod mst;
mod shortest_path_matrix;
mod voronoi;

use crate::prelude::*;

pub use connectivity::*;
pub use dijkstra::*;
pub(crate) use heap::*;
pub use mst::*;
pub use shortest_path_matrix::*;
pub use voronoi::*;
