use std::iter::FusedIterator;

use super::node::{Leaf, LeafId};

/// An iterator over the entries of a [`BPlusTree`](crate::BPlusTree) in key
/// order.
///
/// The iterator follows the leaf chain, so it never revisits internal nodes.
pub struct Iter<'a, K, V> {
    leaves: &'a [Leaf<K, V>],
    leaf: Option<LeafId>,
    pos: usize,
    len: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        leaves: &'a [Leaf<K, V>],
        head: LeafId,
        len: usize,
    ) -> Self {
        Self {
            leaves,
            leaf: Some(head),
            pos: 0,
            len,
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            leaves: self.leaves,
            leaf: self.leaf,
            pos: self.pos,
            len: self.len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let leaves = self.leaves;
        while let Some(id) = self.leaf {
            let leaf = &leaves[id.0];
            if self.pos < leaf.len() {
                let i = self.pos;
                self.pos += 1;
                self.len -= 1;
                return Some((&leaf.keys[i], &leaf.vals[i]));
            }

            self.leaf = leaf.next;
            self.pos = 0;
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V> std::fmt::Debug for Iter<'a, K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
