/*!
# Node Representation

We choose `Node = u32` as instances of the Steiner tree problem almost never exceed `2^32` nodes.
This saves space as compared to `usize` and lets us index node-arrays directly.

Graphs may delete nodes (see [`GraphCopy`](crate::repr::GraphCopy)), hence node ids are *stable*
but not necessarily *dense*: an id stays valid until its node is removed and is never reused.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// As `Option<u32>` uses additional bytes for padding, it can be inefficient
/// since we often need `Vec<Option<Node>>` (for predecessors, copy-mappings, ...).
/// This instead uses the `NonZero`-Wrapper to assign a constant value as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalIdImpl<const N: u32>(NonZero<u32>);

/// `INVALID_NODE` is never a valid node and thus safe to pick as the `None`-Value
pub type OptionalNode = OptionalIdImpl<INVALID_NODE>;

impl<const N: u32> OptionalIdImpl<N> {
    /// Returns `Some(OptionalIdImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: u32) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalIdImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying value
    pub const fn get(&self) -> u32 {
        self.0.get() ^ N
    }
}

/// Shorthand for wrapping a node into its compact optional form.
/// ** Panics if `u == INVALID_NODE` **
pub(crate) fn some_node(u: Node) -> Option<OptionalNode> {
    assert_ne!(u, INVALID_NODE);
    OptionalNode::new(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_niche() {
        assert_eq!(size_of::<Option<OptionalNode>>(), size_of::<Node>());

        for u in [0, 1, 17, INVALID_NODE - 1] {
            assert_eq!(OptionalNode::new(u).map(|x| x.get()), Some(u));
        }
        assert!(OptionalNode::new(INVALID_NODE).is_none());
    }
}
