use std::marker::PhantomData;

use ::serde::de::{Deserialize, MapAccess, Visitor};

use crate::BPlusTree;

// Builds a tree of the default order from a serialized map, inserting the
// entries in the order they are read.
pub(crate) struct MapVisitor<K, V> {
    marker: PhantomData<fn() -> BPlusTree<K, V>>,
}

impl<K, V> MapVisitor<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
where
    K: Clone + Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = BPlusTree<K, V>;

    fn expecting(
        &self,
        formatter: &mut std::fmt::Formatter,
    ) -> std::fmt::Result {
        formatter.write_str("bplus_index::BPlusTree")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut tree = BPlusTree::default();
        while let Some((k, v)) = access.next_entry()? {
            tree.insert(k, v);
        }
        Ok(tree)
    }
}
