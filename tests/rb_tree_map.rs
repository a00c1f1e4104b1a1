use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sumi_tree::rb_tree_map;
use sumi_tree::{AllocError, Greater, OrderBy, RBTreeMap};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates keys from a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    GetKeyValue(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
    EraseAtLowerBound(i64),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::GetKeyValue),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
        1 => key_strategy().prop_map(MapOp::EraseAtLowerBound),
    ]
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMap and
    /// BTreeMap. Insertion keeps the first value for a key, so the model
    /// inserts through `entry().or_insert()`.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let expected = !bt_map.contains_key(k);
                    bt_map.entry(*k).or_insert(*v);
                    let (at, inserted) = rb_map.insert(*k, *v);
                    prop_assert_eq!(inserted, expected, "insert({}, {})", k, v);
                    prop_assert_eq!(rb_map.get_at(at), bt_map.get_key_value(k), "cursor after insert({})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(rb_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(rb_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::GetKeyValue(k) => {
                    prop_assert_eq!(rb_map.get_key_value(k), bt_map.get_key_value(k), "get_key_value({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(rb_map.first_key_value(), bt_map.first_key_value());
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(rb_map.last_key_value(), bt_map.last_key_value());
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(rb_map.pop_first(), bt_map.pop_first());
                }
                MapOp::PopLast => {
                    prop_assert_eq!(rb_map.pop_last(), bt_map.pop_last());
                }
                MapOp::EraseAtLowerBound(k) => {
                    let cursor = rb_map.lower_bound(k);
                    let expected = bt_map.range(k..).next().map(|(&k, &v)| (k, v));
                    prop_assert_eq!(rb_map.get_at(cursor).map(|(&k, &v)| (k, v)), expected);
                    if let Some((key, _)) = expected {
                        let (removed, next) = rb_map.erase(cursor);
                        prop_assert_eq!(Some(removed), bt_map.remove_entry(&key));
                        prop_assert_eq!(rb_map.get_at(next), bt_map.range(key..).next());
                    }
                }
            }
            prop_assert_eq!(rb_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
        }
    }

    /// Tests that every iterator matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for (k, v) in &entries {
            rb_map.insert(*k, *v);
            bt_map.entry(*k).or_insert(*v);
        }

        // Forward iteration
        let rb_items: Vec<_> = rb_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&rb_items, &bt_items, "iter() mismatch");

        // Reverse iteration
        let rb_rev: Vec<_> = rb_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let bt_rev: Vec<_> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&rb_rev, &bt_rev, "iter().rev() mismatch");

        let rb_keys: Vec<_> = rb_map.keys().copied().collect();
        let bt_keys: Vec<_> = bt_map.keys().copied().collect();
        prop_assert_eq!(&rb_keys, &bt_keys, "keys() mismatch");

        let rb_vals: Vec<_> = rb_map.values().copied().collect();
        let bt_vals: Vec<_> = bt_map.values().copied().collect();
        prop_assert_eq!(&rb_vals, &bt_vals, "values() mismatch");

        let rb_into: Vec<_> = rb_map.clone().into_iter().collect();
        let bt_into: Vec<_> = bt_map.clone().into_iter().collect();
        prop_assert_eq!(&rb_into, &bt_into, "into_iter() mismatch");

        let rb_into_keys: Vec<_> = rb_map.clone().into_keys().collect();
        let bt_into_keys: Vec<_> = bt_map.clone().into_keys().collect();
        prop_assert_eq!(&rb_into_keys, &bt_into_keys, "into_keys() mismatch");

        let rb_into_vals: Vec<_> = rb_map.clone().into_values().collect();
        let bt_into_vals: Vec<_> = bt_map.clone().into_values().collect();
        prop_assert_eq!(&rb_into_vals, &bt_into_vals, "into_values() mismatch");
    }

    /// Tests ExactSizeIterator and DoubleEndedIterator behavior.
    #[test]
    fn iter_size_and_double_ended(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();

        let iter = rb_map.iter();
        prop_assert_eq!(iter.len(), rb_map.len(), "ExactSizeIterator len mismatch");

        // Alternating front/back should yield all elements exactly once
        let mut from_front = Vec::new();
        let mut from_back = Vec::new();
        let mut iter = rb_map.iter();
        let mut toggle = true;
        loop {
            if toggle {
                if let Some(item) = iter.next() {
                    from_front.push(item);
                } else {
                    break;
                }
            } else if let Some(item) = iter.next_back() {
                from_back.push(item);
            } else {
                break;
            }
            toggle = !toggle;
        }
        prop_assert_eq!(from_front.len() + from_back.len(), rb_map.len());
        from_back.reverse();
        from_front.extend(from_back);
        prop_assert!(from_front.iter().copied().eq(rb_map.iter()));
    }

    /// Tests cursor traversal in both directions against BTreeMap.
    #[test]
    fn cursor_walks_match_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().rev().copied().collect();

        let mut forward = Vec::new();
        let mut cursor = rb_map.begin();
        while let Some((&k, &v)) = rb_map.get_at(cursor) {
            forward.push((k, v));
            cursor = rb_map.next(cursor);
        }
        prop_assert!(cursor.is_end());
        prop_assert_eq!(&forward, &bt_map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>());

        let mut backward = Vec::new();
        let mut cursor = rb_map.prev(rb_map.end());
        while let Some((&k, _)) = rb_map.get_at(cursor) {
            backward.push(k);
            cursor = rb_map.prev(cursor);
        }
        prop_assert!(cursor.is_before_first());
        prop_assert_eq!(backward, bt_map.keys().rev().copied().collect::<Vec<_>>());
    }

    /// Tests lower/upper bounds against BTreeMap ranges.
    #[test]
    fn bounds_match_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        probes in proptest::collection::vec(key_strategy(), 100),
    ) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().rev().copied().collect();

        for probe in &probes {
            let lower = rb_map.get_at(rb_map.lower_bound(probe));
            prop_assert_eq!(lower, bt_map.range(probe..).next(), "lower_bound({})", probe);

            let upper = rb_map.get_at(rb_map.upper_bound(probe));
            let expected = bt_map.range((std::ops::Bound::Excluded(probe), std::ops::Bound::Unbounded)).next();
            prop_assert_eq!(upper, expected, "upper_bound({})", probe);

            prop_assert_eq!(rb_map.get_at(rb_map.find(probe)), bt_map.get_key_value(probe), "find({})", probe);
        }
    }

    /// Tests get_mut and get_at_mut write through to the stored value.
    #[test]
    fn get_mut_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        updates in proptest::collection::vec((key_strategy(), value_strategy()), 100),
    ) {
        let mut rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().rev().copied().collect();

        for (i, (k, v)) in updates.iter().enumerate() {
            if i % 2 == 0 {
                if let Some(value) = rb_map.get_mut(k) {
                    *value = *v;
                }
            } else {
                let cursor = rb_map.find(k);
                if let Some((_, value)) = rb_map.get_at_mut(cursor) {
                    *value = *v;
                }
            }
            if let Some(value) = bt_map.get_mut(k) {
                *value = *v;
            }
        }
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    /// Tests retain matches BTreeMap::retain.
    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().rev().copied().collect();

        rb_map.retain(|k, v| (k + *v % 7) % 3 != 0);
        bt_map.retain(|k, v| (k + *v % 7) % 3 != 0);
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
        prop_assert_eq!(rb_map.len(), bt_map.len());
    }

    /// Tests clear empties the map and it can be refilled.
    #[test]
    fn clear_empties_map(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        rb_map.clear();
        prop_assert!(rb_map.is_empty());
        prop_assert_eq!(rb_map.iter().next(), None);
        prop_assert!(rb_map.begin().is_end());

        rb_map.extend(entries.iter().copied());
        let bt_map: BTreeMap<i64, i64> = entries.iter().rev().copied().collect();
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    /// Tests clone, equality, and ordering against BTreeMap.
    #[test]
    fn clone_eq_ord_match_btreemap(
        a in proptest::collection::vec((key_strategy(), value_strategy()), 0..200),
        b in proptest::collection::vec((key_strategy(), value_strategy()), 0..200),
    ) {
        let rb_a: RBTreeMap<i64, i64> = a.iter().copied().collect();
        let rb_b: RBTreeMap<i64, i64> = b.iter().copied().collect();
        let bt_a: BTreeMap<i64, i64> = a.iter().rev().copied().collect();
        let bt_b: BTreeMap<i64, i64> = b.iter().rev().copied().collect();

        prop_assert_eq!(&rb_a.clone(), &rb_a);
        prop_assert_eq!(rb_a == rb_b, bt_a == bt_b);
        prop_assert_eq!(rb_a.cmp(&rb_b), bt_a.cmp(&bt_b));
        prop_assert_eq!(rb_a.partial_cmp(&rb_b), bt_a.partial_cmp(&bt_b));
    }

    /// Tests that equal maps produce equal hashes.
    #[test]
    fn hash_consistent_for_equal_maps(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let rb_map1: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let rb_map2: RBTreeMap<i64, i64> = entries.iter().copied().collect();

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        rb_map1.hash(&mut h1);
        rb_map2.hash(&mut h2);

        prop_assert_eq!(h1.finish(), h2.finish(), "equal maps should have equal hashes");
    }

    /// Tests that iter_mut and values_mut visit values in key order.
    #[test]
    fn iter_mut_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().rev().copied().collect();

        for ((rb_k, rb_v), (bt_k, bt_v)) in rb_map.iter_mut().zip(bt_map.iter_mut()) {
            prop_assert_eq!(rb_k, bt_k);
            *rb_v = rb_v.wrapping_add(*rb_k);
            *bt_v = bt_v.wrapping_add(*bt_k);
        }
        for (rb_v, bt_v) in rb_map.values_mut().rev().zip(bt_map.values_mut().rev()) {
            *rb_v = rb_v.wrapping_mul(3);
            *bt_v = bt_v.wrapping_mul(3);
        }
        for (k, v) in &mut rb_map {
            *v ^= *k;
        }
        for (k, v) in &mut bt_map {
            *v ^= *k;
        }
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }
}

// ─── Documented scenarios ────────────────────────────────────────────────────

fn scenario_a() -> RBTreeMap<i32, ()> {
    let mut map = RBTreeMap::new();
    for k in [10, 20, 5, 15, 25] {
        assert!(map.insert(k, ()).1);
    }
    map
}

#[test]
fn scenario_a_inserts_traverse_in_order() {
    let map = scenario_a();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![5, 10, 15, 20, 25]);
}

#[test]
fn scenario_b_erase_forgets_key() {
    let mut map = scenario_a();
    let (removed, next) = map.erase(map.find(&10));
    assert_eq!(removed, (10, ()));
    assert_eq!(map.get_at(next), Some((&15, &())));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![5, 15, 20, 25]);
    assert!(map.find(&10).is_end());
}

#[test]
fn scenario_d_duplicate_insert_reports_existing() {
    let mut map = RBTreeMap::new();
    let (first, inserted) = map.insert(7, "first");
    assert!(inserted);
    let (second, inserted) = map.insert(7, "second");
    assert!(!inserted);
    assert_eq!(first, second);
    assert_eq!(map.len(), 1);
    assert_eq!(map[&7], "first");
}

#[test]
fn insert_then_erase_round_trips() {
    let mut map = scenario_a();
    let (at, inserted) = map.insert(12, ());
    assert!(inserted);
    map.erase(at);
    assert!(map.find(&12).is_end());
    assert_eq!(map.len(), 5);
}

#[test]
fn descending_and_closure_comparators() {
    let mut desc = RBTreeMap::with_comparator(Greater);
    desc.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
    assert_eq!(desc.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(desc.first_key_value(), Some((&3, &'c')));

    // Keys ordered by absolute value: 2 and -2 are the same key.
    let mut by_abs = RBTreeMap::with_comparator(OrderBy(|a: &i32, b: &i32| a.abs() < b.abs()));
    by_abs.insert(2, "two");
    assert!(!by_abs.insert(-2, "minus two").1);
    assert_eq!(by_abs.get(&-2), Some(&"two"));
    assert_eq!(by_abs.get_key_value(&-2), Some((&2, &"two")));
}

#[test]
fn try_insert_succeeds_under_capacity() -> Result<(), AllocError> {
    let mut map = RBTreeMap::with_capacity(4);
    for k in 0..8 {
        assert!(map.try_insert(k, k * 2)?.1);
    }
    assert!(!map.try_insert(3, 0)?.1);
    assert_eq!(map[&3], 6);
    assert!(map.capacity() >= 8);
    Ok(())
}

#[test]
fn debug_formats_like_a_map() {
    let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    assert_eq!(format!("{:?}", map.keys()), "[1, 2]");
}

#[test]
fn default_into_iter_is_empty() {
    let iter: rb_tree_map::IntoIter<u8, u8> = Default::default();
    assert_eq!(iter.len(), 0);
}

#[test]
fn large_ascending_then_descending_teardown() {
    // Sorted input is the worst case for an unbalanced tree.
    let mut map: RBTreeMap<u32, u32> = (0..50_000).map(|k| (k, k)).collect();
    assert_eq!(map.len(), 50_000);
    assert_eq!(map.first_key_value(), Some((&0, &0)));
    assert_eq!(map.last_key_value(), Some((&49_999, &49_999)));
    for k in (0..50_000).rev().step_by(2) {
        assert_eq!(map.remove(&k), Some(k));
    }
    assert_eq!(map.len(), 25_000);
    drop(map);
}

// ─── Panic tests ─────────────────────────────────────────────────────────────

/// Tests that Index<&K> panics for a missing key.
#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map: RBTreeMap<i32, i32> = [(1, 1), (2, 2), (3, 3)].into_iter().collect();
    let _ = map[&999];
}

/// Tests that erasing the before-first position panics.
#[test]
#[should_panic(expected = "cannot erase at boundary cursor")]
fn erase_before_first_panics() {
    let mut map = RBTreeMap::from([(1, 1)]);
    let before = map.prev(map.begin());
    map.erase(before);
}
