use super::*;

/// Disjoint-set forest over `0..n` with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<Node>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Creates `n` singleton sets
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
        }
    }

    /// Returns the representative of the set containing `x`
    pub fn find(&mut self, x: Node) -> Node {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut x = x;
        while self.parent[x as usize] != root {
            let next = self.parent[x as usize];
            self.parent[x as usize] = root;
            x = next;
        }

        root
    }

    /// Returns *true* if `x` and `y` belong to the same set
    pub fn same(&mut self, x: Node, y: Node) -> bool {
        self.find(x) == self.find(y)
    }

    /// Merges the sets containing `x` and `y` and returns the representative of the merged set
    pub fn union(&mut self, x: Node, y: Node) -> Node {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return rx;
        }

        let (low, high) = if self.rank[rx as usize] < self.rank[ry as usize] {
            (rx, ry)
        } else {
            (ry, rx)
        };

        self.parent[low as usize] = high;
        if self.rank[low as usize] == self.rank[high as usize] {
            self.rank[high as usize] += 1;
        }
        high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges() {
        let mut uf = UnionFind::new(6);
        assert!(!uf.same(0, 1));

        let r = uf.union(0, 1);
        assert!(r == 0 || r == 1);
        uf.union(2, 3);
        uf.union(1, 3);

        assert!(uf.same(0, 2));
        assert_eq!(uf.find(3), uf.find(0));
        assert!(!uf.same(4, 5));
        assert_eq!(uf.union(2, 0), uf.find(1));
    }
}
