use log::{debug, trace};
use std::iter::FusedIterator;

use crate::error::TreeError;

mod iter;
mod node;

pub use iter::Iter;

use node::InsertResult::{self, *};
use node::{Internal, InternalId, Leaf, LeafId, NodeRef};

/// Smallest order accepted by [`BPlusTree::new`].
pub const MIN_ORDER: usize = 2;

/// Order used by [`Default`], [`FromIterator`] and deserialization.
pub const DEFAULT_ORDER: usize = 16;

// The first leaf never moves off the left edge: leaf splits only ever create
// right-hand siblings.
const HEAD: LeafId = LeafId(0);

/// An in-memory B+ tree index.
///
/// Values are stored only in the leaves, which are chained in key order.
/// Internal nodes hold routing keys.  A node splits as soon as it holds
/// `order` keys, so no node holds more than `order - 1` keys between calls.
///
/// Inserting a key that is already present does not replace the old entry.
/// Both entries are kept, and the newer one is placed in front of the older
/// one in its leaf, so [`search`](Self::search) sees it first unless a later
/// split has moved the run of equal keys across a leaf boundary.
#[derive(Clone)]
pub struct BPlusTree<K = i64, V = i64> {
    leaves: Vec<Leaf<K, V>>,
    internals: Vec<Internal<K>>,
    root: NodeRef,
    order: usize,
    len: usize,
    height: usize,
}

impl<K, V> BPlusTree<K, V> {
    /// Creates an empty tree whose nodes split when they reach `order` keys.
    ///
    /// Returns [`TreeError::OrderTooSmall`] if `order` is below
    /// [`MIN_ORDER`].
    pub fn new(order: usize) -> Result<Self, TreeError> {
        if order < MIN_ORDER {
            return Err(TreeError::OrderTooSmall { order });
        }

        debug!("new b+ tree of order {order}");
        Ok(Self::with_order(order))
    }

    fn with_order(order: usize) -> Self {
        Self {
            leaves: vec![Leaf::new()],
            internals: Vec::new(),
            root: NodeRef::Leaf(HEAD),
            order,
            len: 0,
            height: 1,
        }
    }

    /// The number of keys at which a node splits.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of entries, counting each duplicate key separately.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels in the tree; a tree holding a single leaf has height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Iterates over the entries in key order by walking the leaf chain.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.leaves, HEAD, self.len)
    }

    /// Iterates over the keys in order, repeating duplicates.
    pub fn keys(
        &self,
    ) -> impl Iterator<Item = &K> + ExactSizeIterator + FusedIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in key order.
    pub fn values(
        &self,
    ) -> impl Iterator<Item = &V> + ExactSizeIterator + FusedIterator + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Inserts `val` under `key`.
    ///
    /// An existing entry for `key` is kept; see the type-level docs.
    pub fn insert(&mut self, key: K, val: V) {
        if let Split(sep, rhs) = self.insert_into(self.root, key, val) {
            let lhs = self.root;
            let id = InternalId(self.internals.len());
            self.internals.push(Internal::new_root(sep, lhs, rhs));
            self.root = NodeRef::Internal(id);
            self.height += 1;
            trace!("root split, height is now {}", self.height);
        }

        self.len += 1;
    }

    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// If `key` was inserted more than once, the first matching entry in the
    /// leaf that covers `key` is returned.
    pub fn search(&self, key: &K) -> Option<&V> {
        let mut node = self.root;
        loop {
            match node {
                NodeRef::Internal(id) => {
                    let n = &self.internals[id.0];
                    node = n.kid(n.route(key));
                }

                NodeRef::Leaf(id) => return self.leaves[id.0].get(key),
            }
        }
    }

    /// Returns `true` if [`search`](Self::search) finds an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    fn insert_into(
        &mut self,
        node: NodeRef,
        key: K,
        val: V,
    ) -> InsertResult<K> {
        match node {
            NodeRef::Leaf(id) => self.insert_into_leaf(id, key, val),
            NodeRef::Internal(id) => self.insert_into_internal(id, key, val),
        }
    }

    fn insert_into_leaf(
        &mut self,
        id: LeafId,
        key: K,
        val: V,
    ) -> InsertResult<K> {
        let at = LeafId(self.leaves.len());
        let leaf = &mut self.leaves[id.0];
        leaf.insert(key, val);
        if leaf.len() < self.order {
            return Absorbed;
        }

        // the boundary key stays in the new leaf and is copied upward
        let rhs = leaf.split(self.order / 2, at);
        let sep = rhs.keys[0].clone();
        trace!("leaf {} split into {}", id.0, at.0);
        self.leaves.push(rhs);

        Split(sep, NodeRef::Leaf(at))
    }

    fn insert_into_internal(
        &mut self,
        id: InternalId,
        key: K,
        val: V,
    ) -> InsertResult<K> {
        let n = &self.internals[id.0];
        let i = n.route(&key);
        let kid = n.kid(i);

        let Split(sep, rhs) = self.insert_into(kid, key, val) else {
            return Absorbed;
        };

        let at = InternalId(self.internals.len());
        let n = &mut self.internals[id.0];
        n.adopt(i, sep, rhs);
        if n.len() < self.order {
            return Absorbed;
        }

        // unlike a leaf split, the separator leaves both halves
        let (sep, rhs) = n.split(self.order / 2);
        trace!("internal node {} split into {}", id.0, at.0);
        self.internals.push(rhs);

        Split(sep, NodeRef::Internal(at))
    }
}

impl<K, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::with_order(DEFAULT_ORDER)
    }
}

impl<K, V> std::fmt::Debug for BPlusTree<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a BPlusTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord + Clone, V> Extend<(K, V)> for BPlusTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for BPlusTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = BPlusTree::default();
        tree.extend(iter);
        tree
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::ser::Serialize for BPlusTree<K, V>
where
    K: serde::ser::Serialize,
    V: serde::ser::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Deserialize<'de> for BPlusTree<K, V>
where
    K: Clone + serde::de::Deserialize<'de> + Ord,
    V: serde::de::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_map(crate::serde::MapVisitor::new())
    }
}

#[cfg(test)]
impl<K: Ord, V> BPlusTree<K, V> {
    // Checks the structural invariants and returns the keys seen by walking
    // the tree top-down.
    fn chk(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        let mut leaves = Vec::new();
        let ht = self.chk_node(self.root, None, None, &mut keys, &mut leaves);
        assert_eq!(ht, self.height, "height mismatch");
        assert_eq!(keys.len(), self.len, "len mismatch");

        for w in keys.windows(2) {
            assert!(w[0] <= w[1], "order violation");
        }

        // the chain visits exactly the leaves of the tree, left to right
        assert_eq!(leaves.first(), Some(&HEAD), "head is not leftmost");
        let mut chain = Vec::new();
        let mut at = Some(HEAD);
        while let Some(id) = at {
            chain.push(id);
            at = self.leaves[id.0].next;
        }
        assert_eq!(chain, leaves, "broken leaf chain");

        keys
    }

    // Returns the height of the subtree at `node`.
    fn chk_node<'a>(
        &'a self,
        node: NodeRef,
        lo: Option<&K>,
        hi: Option<&K>,
        keys: &mut Vec<&'a K>,
        leaves: &mut Vec<LeafId>,
    ) -> usize {
        let in_bounds = |k: &K| {
            lo.map_or(true, |lo| lo <= k) && hi.map_or(true, |hi| k <= hi)
        };

        match node {
            NodeRef::Leaf(id) => {
                let leaf = &self.leaves[id.0];
                assert!(leaf.len() < self.order, "maximum occupancy violated");
                assert_eq!(leaf.keys.len(), leaf.vals.len());
                assert!(leaf.keys.iter().all(in_bounds), "routing violated");
                keys.extend(leaf.keys.iter());
                leaves.push(id);
                1
            }

            NodeRef::Internal(id) => {
                let n = &self.internals[id.0];
                assert!(n.len() < self.order, "maximum occupancy violated");
                assert_eq!(n.kids.len(), n.len() + 1, "child count");
                assert!(n.keys.iter().all(in_bounds), "routing violated");

                let mut ht = None;
                for (i, kid) in n.kids.iter().enumerate() {
                    let kid_lo = if i == 0 { lo } else { n.keys.get(i - 1) };
                    let kid_hi = n.keys.get(i).or(hi);
                    let h = self.chk_node(*kid, kid_lo, kid_hi, keys, leaves);
                    assert_eq!(*ht.get_or_insert(h), h, "uneven branches");
                }

                ht.unwrap_or(0) + 1
            }
        }
    }
}
