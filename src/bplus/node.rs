// Node storage for the B+ tree.
//
// Nodes live in two arenas owned by the tree, one for leaves and one for
// internal nodes.  A parent refers to its children by index and is the only
// holder of that index; the `next` index of a leaf is a cross-reference used
// for in-order iteration and never implies ownership.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LeafId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InternalId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeRef {
    Internal(InternalId),
    Leaf(LeafId),
}

// Outcome of inserting into a subtree.  On a split, the caller must adopt the
// new right-hand sibling under the given separator.
pub(crate) enum InsertResult<K> {
    Absorbed,
    Split(K, NodeRef),
}

#[derive(Clone, Debug)]
pub(crate) struct Leaf<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) vals: Vec<V>,
    pub(crate) next: Option<LeafId>,
}

impl<K, V> Leaf<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            vals: Vec::new(),
            next: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    // Inserts at the lower bound, ie, before any entries with an equal key.
    pub(crate) fn insert(&mut self, key: K, val: V)
    where
        K: Ord,
    {
        let pos = self.keys.partition_point(|k| *k < key);
        self.keys.insert(pos, key);
        self.vals.insert(pos, val);
    }

    // Returns the value of the first entry whose key equals `key`.
    pub(crate) fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let pos = self.keys.partition_point(|k| k < key);
        match self.keys.get(pos) {
            Some(k) if k == key => self.vals.get(pos),
            _ => None,
        }
    }

    // Moves entries [mid, len) into a new leaf that will be stored at `at`,
    // and links it into the chain right after this leaf.
    pub(crate) fn split(&mut self, mid: usize, at: LeafId) -> Leaf<K, V> {
        assert!(0 < mid && mid < self.len());

        let rhs = Leaf {
            keys: self.keys.split_off(mid),
            vals: self.vals.split_off(mid),
            next: self.next.take(),
        };
        self.next = Some(at);
        rhs
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Internal<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) kids: Vec<NodeRef>,
}

impl<K> Internal<K> {
    pub(crate) fn new_root(sep: K, lhs: NodeRef, rhs: NodeRef) -> Self {
        Self {
            keys: vec![sep],
            kids: vec![lhs, rhs],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    // Index of the child covering `key`: the first routing key strictly
    // greater than `key`.  A key equal to a separator goes right, since the
    // separator is the least key of the right-hand subtree.
    pub(crate) fn route(&self, key: &K) -> usize
    where
        K: Ord,
    {
        self.keys.partition_point(|k| k <= key)
    }

    pub(crate) fn kid(&self, i: usize) -> NodeRef {
        self.kids[i]
    }

    // Adopts `kid` as the right sibling of the child at `i`.
    pub(crate) fn adopt(&mut self, i: usize, sep: K, kid: NodeRef) {
        self.keys.insert(i, sep);
        self.kids.insert(i + 1, kid);
    }

    // Splits around the key at `mid`, which is removed from both halves and
    // returned along with the new right-hand node.
    pub(crate) fn split(&mut self, mid: usize) -> (K, Internal<K>) {
        assert!(mid < self.len());

        let sep = self.keys.remove(mid);
        let rhs = Internal {
            keys: self.keys.split_off(mid),
            kids: self.kids.split_off(mid + 1),
        };

        (sep, rhs)
    }
}
