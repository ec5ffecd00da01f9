/*!
# Graph Hash Digests

This module provides the [`GraphDigest`] trait, which allows computing
**hash-based digests** of weighted graphs.

The digest encodes:
- the number of nodes, and
- a sorted list of normalized edges together with their weights,

before feeding them into a cryptographic hash function.
For a [`GraphCopy`] all endpoints are encoded by their *original* ids, so that two Steiner trees
consisting of the same original edges yield the same digest.

## Example
```
use steiner_approx::{prelude::*, repr::digest::GraphDigest};

let graph = WeightedGraph::from_edges(3, [(0, 1, 2u32), (1, 2, 5)]);
let copy = GraphCopy::from_original(&graph);

assert_eq!(graph.digest_sha256().len(), 64);
assert_eq!(graph.digest_sha256(), copy.digest_sha256());
```
*/

use std::fmt::LowerHex;

use super::*;
use ::digest::{Digest, Output};

/// Trait for computing a **canonical hash digest** of a weighted graph.
pub trait GraphDigest {
    /// Computes a digest of the graph using the provided hash function `D`.
    ///
    /// The result is returned as a **hexadecimal string**.
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest;

    /// Computes a **SHA-256 digest** of the graph.
    ///
    /// The returned string is exactly 64 characters long.
    fn digest_sha256(&self) -> String {
        self.digest::<sha2::Sha256>()
    }
}

fn digest_edge_list<D, W>(number_of_nodes: NumNodes, mut edges: Vec<(Edge, W)>) -> String
where
    Output<D>: LowerHex,
    D: Digest,
    W: Weight,
{
    let mut hasher = D::new();

    // first encode the number of nodes in the graph
    hasher.update(number_of_nodes.to_le_bytes());

    // then append a sorted edge list
    edges.sort_by(|(e1, w1), (e2, w2)| e1.cmp(e2).then_with(|| w1.cmp_weight(w2)));
    for (Edge(u, v), weight) in edges {
        hasher.update(u.to_le_bytes());
        hasher.update(v.to_le_bytes());
        hasher.update(weight.as_f64().to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

impl<W: Weight> GraphDigest for WeightedGraph<W> {
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        digest_edge_list::<D, W>(
            self.number_of_nodes(),
            self.edges()
                .map(|(_, edge, weight)| (edge.normalized(), weight))
                .collect(),
        )
    }
}

impl<W: Weight> GraphDigest for GraphCopy<'_, W> {
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        digest_edge_list::<D, W>(
            self.number_of_nodes(),
            self.edges()
                .map(|(_, Edge(u, v), weight)| {
                    let edge = Edge(self.original_of_node(u), self.original_of_node(v));
                    (edge.normalized(), weight)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_matter() {
        let a = WeightedGraph::from_edges(3, [(0, 1, 2u32), (1, 2, 5)]);
        let b = WeightedGraph::from_edges(3, [(2, 1, 5u32), (1, 0, 2)]);
        let c = WeightedGraph::from_edges(3, [(0, 1, 2u32), (1, 2, 6)]);

        assert_eq!(a.digest_sha256(), b.digest_sha256());
        assert_ne!(a.digest_sha256(), c.digest_sha256());
    }

    #[test]
    fn copies_use_original_ids() {
        let graph = WeightedGraph::from_edges(4, [(0, 1, 1u32), (2, 3, 1)]);
        let first = GraphCopy::induced(&graph, [3, 2]);
        let second = GraphCopy::induced(&graph, [2, 3]);
        let other = GraphCopy::induced(&graph, [0, 1]);

        assert_eq!(first.digest_sha256(), second.digest_sha256());
        assert_ne!(first.digest_sha256(), other.digest_sha256());
    }
}
