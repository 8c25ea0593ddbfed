// Disjoint-set forest with path compression and union by rank.

/// Partition of `0..n` into disjoint classes.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// `n` singleton classes.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of the class containing `x`, compressing the path on the way.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Point every node on the path straight at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the classes of `a` and `b`. Returns false if already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// All classes, each sorted ascending, ordered by their smallest member.
    pub fn classes(&mut self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
        let mut classes: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            let root = self.find(i);
            match slot_of_root[root] {
                Some(slot) => classes[slot].push(i),
                None => {
                    slot_of_root[root] = Some(classes.len());
                    classes.push(vec![i]);
                }
            }
        }

        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_as_singletons() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.classes(), vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_union_is_transitive() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 3));
        assert!(uf.union(3, 4));
        assert!(!uf.union(0, 4));
        assert!(uf.connected(0, 4));
        assert!(!uf.connected(1, 2));
        assert_eq!(uf.classes(), vec![vec![0, 3, 4], vec![1], vec![2]]);
    }

    #[test]
    fn test_long_chain_compresses() {
        let mut uf = UnionFind::new(1000);
        for i in 1..1000 {
            uf.union(i - 1, i);
        }
        let root = uf.find(999);
        for i in 0..1000 {
            assert_eq!(uf.find(i), root);
        }
        assert_eq!(uf.classes().len(), 1);
    }

    #[test]
    fn test_empty() {
        let mut uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert!(uf.classes().is_empty());
    }
}
