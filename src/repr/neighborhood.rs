use smallvec::SmallVec;

use super::*;

/// Incidence list of a single node: `(neighbor, edge)`-pairs in insertion order.
///
/// Most nodes of Steiner instances have small degree, so we store up to `N`
/// incidences inline before spilling onto the heap.
#[derive(Debug, Clone, Default)]
pub struct IncidenceList<const N: usize = 4>(SmallVec<[(Node, EdgeId); N]>);

impl<const N: usize> IncidenceList<N> {
    /// Returns the number of incident edges
    pub fn len(&self) -> NumNodes {
        self.0.len() as NumNodes
    }

    /// Returns *true* if no edge is incident
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an incidence
    pub fn push(&mut self, v: Node, e: EdgeId) {
        self.0.push((v, e));
    }

    /// Removes the incidence of edge `e` while preserving the order of all others.
    /// Returns *true* if the edge was incident before.
    pub fn remove_edge(&mut self, e: EdgeId) -> bool {
        if let Some(pos) = self.0.iter().position(|&(_, f)| f == e) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    /// Iterates over all `(neighbor, edge)`-pairs
    pub fn iter(&self) -> impl Iterator<Item = (Node, EdgeId)> + '_ {
        self.0.iter().copied()
    }

    /// Removes all incidences and returns the ids of the previously incident edges
    pub fn take_edges(&mut self) -> SmallVec<[EdgeId; N]> {
        self.0.drain(..).map(|(_, e)| e).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_preserves_order() {
        let mut list: IncidenceList = Default::default();
        for (v, e) in [(3, 0), (5, 1), (3, 2), (9, 3), (1, 4)] {
            list.push(v, e);
        }

        assert!(list.remove_edge(2));
        assert!(!list.remove_edge(2));
        assert_eq!(list.len(), 4);
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec![(3, 0), (5, 1), (9, 3), (1, 4)]
        );

        let edges = list.take_edges();
        assert_eq!(edges.as_slice(), &[0, 1, 3, 4]);
        assert!(list.is_empty());
    }
}
