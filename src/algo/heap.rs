use std::cmp::Ordering;

use super::*;

/// Entry of a min-heap built on top of `std::collections::BinaryHeap` (which is a max-heap).
///
/// Entries are ordered by `key` first and `item` second, both ascending, so that ties between
/// equal keys are broken deterministically by the smaller item (e.g. the smaller node id).
#[derive(Debug, Clone, Copy)]
pub(crate) struct MinEntry<W, T> {
    pub key: W,
    pub item: T,
}

impl<W: Weight, T: Ord> MinEntry<W, T> {
    pub fn new(key: W, item: T) -> Self {
        Self { key, item }
    }
}

impl<W: Weight, T: Ord> PartialEq for MinEntry<W, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight, T: Ord> Eq for MinEntry<W, T> {}

impl<W: Weight, T: Ord> PartialOrd for MinEntry<W, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight, T: Ord> Ord for MinEntry<W, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp_weight(&self.key)
            .then_with(|| other.item.cmp(&self.item))
    }
}
