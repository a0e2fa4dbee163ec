use proptest::prelude::*;
use std::collections::BTreeMap as StdMap;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

pub(super) type IntPairs = Vec<(i64, i64)>;

// Narrow key range so that duplicates show up regularly.
pub(super) fn small_int_pairs() -> impl Strategy<Value = IntPairs> {
    prop::collection::vec((0i64..1024, any::<i64>()), 0..512)
}

// Pairs with distinct keys, in arbitrary insertion order.
#[allow(dead_code)]
pub(super) fn distinct_int_pairs() -> impl Strategy<Value = IntPairs> {
    prop::collection::btree_map(any::<i64>(), any::<i64>(), 0..512)
        .prop_map(|m| m.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

#[allow(dead_code)]
pub(super) fn orders() -> impl Strategy<Value = usize> {
    prop_oneof![Just(2usize), Just(3), Just(4), 5usize..=64]
}

// The map a tree should agree with when each key is inserted at most once.
#[allow(dead_code)]
pub(super) fn std_map_of(v: &IntPairs) -> StdMap<i64, i64> {
    v.iter().copied().collect()
}
