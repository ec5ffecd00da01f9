/*!
# All-Pairs Shortest Paths

Floyd–Warshall on an edge-weighted graph where only some nodes may serve as *intermediate* nodes
of a path. With all nodes allowed this is the classical all-pairs shortest path computation; with
only Steiner nodes allowed, every path connects its endpoints without passing through a terminal.

Paths are stored explicitly as lists of edge ids.
*/

use std::{
    ops::{Index, IndexMut, Range},
    time::Instant,
};

use log::warn;

use super::*;

/// Distance and edges of a single shortest path.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath<W> {
    distance: W,
    path: Vec<EdgeId>,
}

impl<W: Weight> ShortestPath<W> {
    /// Returns the length of the path ([`Weight::infinity`] if there is none)
    pub fn distance(&self) -> W {
        self.distance
    }

    /// Returns the edges of the path from row- to column-node
    pub fn path(&self) -> &[EdgeId] {
        &self.path
    }

    /// Returns *true* if a path exists
    pub fn is_reachable(&self) -> bool {
        !self.distance.is_unreached()
    }
}

impl<W: Weight> Default for ShortestPath<W> {
    fn default() -> Self {
        Self {
            distance: W::infinity(),
            path: Vec::new(),
        }
    }
}

/// Matrix of shortest paths between all pairs of node ids `0..graph.node_bound()`.
///
/// # Example
/// ```
/// use steiner_approx::{prelude::*, algo::*};
///
/// // 0 -1- 1 -1- 2 and a direct edge 0 -5- 2
/// let graph = WeightedGraph::from_edges(3, [(0, 1, 1u32), (1, 2, 1), (0, 2, 5)]);
///
/// let all = ShortestPathMatrix::new(&graph);
/// assert_eq!(all[0][2].distance(), 2);
/// assert_eq!(all[0][2].path(), &[0, 1]);
///
/// // node 1 must not be passed
/// let restricted = ShortestPathMatrix::restricted(&graph, |u| u != 1, None);
/// assert_eq!(restricted[0][2].distance(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct ShortestPathMatrix<W> {
    paths: Vec<ShortestPath<W>>,
    dimension: usize,
}

impl<W: Weight> ShortestPathMatrix<W> {
    /// Computes shortest paths between all pairs of nodes
    pub fn new<G>(graph: &G) -> Self
    where
        G: AdjacencyList<Weight = W>,
    {
        Self::restricted(graph, |_| true, None)
    }

    /// Computes shortest paths between all pairs of nodes whose intermediate nodes all satisfy
    /// `may_pass`. If `deadline` is reached, the computation stops early: all stored paths are
    /// still valid but possibly not shortest.
    pub fn restricted<G, F>(graph: &G, may_pass: F, deadline: Option<Instant>) -> Self
    where
        G: AdjacencyList<Weight = W>,
        F: Fn(Node) -> bool,
    {
        let n = graph.node_bound() as usize;
        let mut res = Self {
            paths: vec![ShortestPath::default(); n * n],
            dimension: n,
        };
        res.floyd_warshall(graph, may_pass, deadline);
        res
    }

    /// Based on the pseudo-code
    /// [on Wikipedia](https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm).
    fn floyd_warshall<G, F>(&mut self, graph: &G, may_pass: F, deadline: Option<Instant>)
    where
        G: AdjacencyList<Weight = W>,
        F: Fn(Node) -> bool,
    {
        for (e, Edge(u, v), weight) in graph.edges() {
            if u == v {
                continue;
            }
            for (from, to) in [(u, v), (v, u)] {
                let entry = &mut self[from as usize][to as usize];
                if weight < entry.distance {
                    entry.distance = weight;
                    entry.path = vec![e];
                }
            }
        }
        for u in graph.vertices() {
            self[u as usize][u as usize] = ShortestPath {
                distance: W::zero(),
                path: Vec::new(),
            };
        }

        let nodes: Vec<Node> = graph.vertices().collect();
        for &k in nodes.iter().filter(|&&k| may_pass(k)) {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!("Time limit reached while computing shortest paths; paths may be suboptimal");
                return;
            }

            let k = k as usize;
            for &i in &nodes {
                let i = i as usize;
                let ik = self[i][k].distance;
                if ik.is_unreached() || i == k {
                    continue;
                }

                for &j in &nodes {
                    let j = j as usize;
                    let kj = self[k][j].distance;
                    if kj.is_unreached() || j == k || i == j {
                        continue;
                    }

                    let new_dist = ik + kj;
                    if new_dist < self[i][j].distance {
                        let mut path = std::mem::take(&mut self[i][j].path);
                        path.clear();
                        path.extend_from_slice(&self[i][k].path);
                        path.extend_from_slice(&self[k][j].path);
                        self[i][j] = ShortestPath {
                            distance: new_dist,
                            path,
                        };
                    }
                }
            }
        }
    }

    /// Returns the distance between `u` and `v` or `None` if there is no path
    pub fn distance(&self, u: Node, v: Node) -> Option<W> {
        let entry = &self[u as usize][v as usize];
        entry.is_reachable().then_some(entry.distance)
    }

    /// Returns the edges of the shortest path from `u` to `v`
    pub fn path(&self, u: Node, v: Node) -> &[EdgeId] {
        &self[u as usize][v as usize].path
    }

    fn index_range(&self, index: usize) -> Range<usize> {
        let start = index * self.dimension;
        start..start + self.dimension
    }
}

/// This allows for neat two-dimensional indexing (e.g. `spm[a][b]`).
impl<W: Weight> Index<usize> for ShortestPathMatrix<W> {
    type Output = [ShortestPath<W>];

    fn index(&self, index: usize) -> &Self::Output {
        &self.paths[self.index_range(index)]
    }
}

/// This allows for neat two-dimensional indexing (e.g. `spm[a][b] = c`).
impl<W: Weight> IndexMut<usize> for ShortestPathMatrix<W> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let range = self.index_range(index);
        &mut self.paths[range]
    }
}
