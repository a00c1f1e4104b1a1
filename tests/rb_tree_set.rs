use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sumi_tree::rb_tree_set;
use sumi_tree::{Greater, OrderBy, RBTreeSet};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn value_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Take(i64),
    Contains(i64),
    Get(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        2 => value_strategy().prop_map(SetOp::Remove),
        1 => value_strategy().prop_map(SetOp::Take),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => value_strategy().prop_map(SetOp::Get),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
    ]
}

fn shuffled(n: i64) -> impl Strategy<Value = Vec<i64>> {
    Just((1..=n).collect::<Vec<_>>()).prop_shuffle()
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeSet and BTreeSet.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    let (at, inserted) = rb_set.insert(*v);
                    prop_assert_eq!(inserted, bt_set.insert(*v), "insert({})", v);
                    prop_assert_eq!(rb_set.get_at(at), Some(v));
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(rb_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(rb_set.take(v), bt_set.take(v), "take({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(rb_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::Get(v) => {
                    prop_assert_eq!(rb_set.get(v), bt_set.get(v), "get({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(rb_set.first(), bt_set.first());
                }
                SetOp::Last => {
                    prop_assert_eq!(rb_set.last(), bt_set.last());
                }
                SetOp::PopFirst => {
                    prop_assert_eq!(rb_set.pop_first(), bt_set.pop_first());
                }
                SetOp::PopLast => {
                    prop_assert_eq!(rb_set.pop_last(), bt_set.pop_last());
                }
            }
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
        }

        prop_assert!(rb_set.iter().eq(bt_set.iter()));
        prop_assert!(rb_set.iter().rev().eq(bt_set.iter().rev()));
    }

    /// In-order traversal yields the distinct inputs in increasing order.
    #[test]
    fn traversal_is_sorted_and_distinct(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        let items: Vec<_> = rb_set.iter().copied().collect();
        prop_assert!(items.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(items, bt_set.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(rb_set.into_iter().collect::<Vec<_>>(), bt_set.into_iter().collect::<Vec<_>>());
    }

    /// Inserting every key of 1..=1000 in one random order and erasing them
    /// in another keeps the set consistent after each step.
    #[test]
    fn shuffled_build_and_teardown(insert_order in shuffled(1_000), erase_order in shuffled(1_000)) {
        let mut rb_set = RBTreeSet::new();
        for (count, &v) in insert_order.iter().enumerate() {
            prop_assert!(rb_set.insert(v).1);
            prop_assert_eq!(rb_set.len(), count + 1);
        }
        prop_assert!(rb_set.iter().copied().eq(1..=1_000));

        let mut model: BTreeSet<i64> = (1..=1_000).collect();
        for &v in &erase_order {
            let cursor = rb_set.find(&v);
            let (removed, next) = rb_set.erase(cursor);
            prop_assert_eq!(removed, v);
            model.remove(&v);
            prop_assert_eq!(rb_set.get_at(next), model.range(v..).next());
            prop_assert_eq!(rb_set.first(), model.first());
            prop_assert_eq!(rb_set.last(), model.last());
            prop_assert_eq!(rb_set.len(), model.len());
        }
        prop_assert!(rb_set.is_empty());
        prop_assert!(rb_set.begin().is_end());
    }

    /// Tests retain matches BTreeSet::retain.
    #[test]
    fn retain_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let mut bt_set: BTreeSet<i64> = values.iter().copied().collect();
        rb_set.retain(|v| v.rem_euclid(3) != 1);
        bt_set.retain(|v| v.rem_euclid(3) != 1);
        prop_assert!(rb_set.iter().eq(bt_set.iter()));
    }

    /// Tests bound cursors against BTreeSet ranges.
    #[test]
    fn bounds_match_btreeset(
        values in proptest::collection::vec(value_strategy(), TEST_SIZE),
        probes in proptest::collection::vec(value_strategy(), 100),
    ) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        for probe in &probes {
            prop_assert_eq!(rb_set.get_at(rb_set.lower_bound(probe)), bt_set.range(probe..).next());
            let after = bt_set.range((std::ops::Bound::Excluded(probe), std::ops::Bound::Unbounded)).next();
            prop_assert_eq!(rb_set.get_at(rb_set.upper_bound(probe)), after);
        }
    }

    /// Tests that equal sets compare and hash equal.
    #[test]
    fn eq_and_hash_match(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let a: RBTreeSet<i64> = values.iter().copied().collect();
        let b: RBTreeSet<i64> = values.iter().rev().copied().collect();
        prop_assert_eq!(&a, &b);

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        a.hash(&mut h1);
        b.hash(&mut h2);
        prop_assert_eq!(h1.finish(), h2.finish());
    }
}

// ─── Documented scenarios ────────────────────────────────────────────────────

#[test]
fn scenario_a_and_b() {
    let mut set = RBTreeSet::new();
    for v in [10, 20, 5, 15, 25] {
        set.insert(v);
    }
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![5, 10, 15, 20, 25]);

    assert!(set.remove(&10));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![5, 15, 20, 25]);
    assert!(set.find(&10).is_end());
}

#[test]
fn duplicate_insert_is_idempotent() {
    let mut set = RBTreeSet::from([1, 2, 3]);
    let (first, _) = set.insert(2);
    let (second, inserted) = set.insert(2);
    assert!(!inserted);
    assert_eq!(first, second);
    assert_eq!(set.len(), 3);
}

#[test]
fn comparators_define_order_and_identity() {
    let desc: RBTreeSet<i32, Greater> = [4, 1, 3].into_iter().collect();
    assert_eq!(desc.iter().copied().collect::<Vec<_>>(), vec![4, 3, 1]);
    assert_eq!(desc.first(), Some(&4));

    let mut by_len = RBTreeSet::with_comparator(OrderBy(|a: &&str, b: &&str| a.len() < b.len()));
    by_len.extend(["pear", "fig", "plum", "kiwi", "apple"]);
    assert_eq!(by_len.iter().copied().collect::<Vec<_>>(), vec!["fig", "pear", "apple"]);
    assert_eq!(by_len.get(&"lime"), Some(&"pear"));
}

#[test]
fn extend_from_references() {
    let mut set: RBTreeSet<i32> = RBTreeSet::new();
    set.extend(&[3, 1, 2]);
    set.extend(vec![2, 4].iter());
    assert_eq!(set, RBTreeSet::from([1, 2, 3, 4]));
    assert_eq!(format!("{set:?}"), "{1, 2, 3, 4}");
}

#[test]
fn ordering_is_lexicographic() {
    let a = RBTreeSet::from([1, 2]);
    let b = RBTreeSet::from([1, 3]);
    assert!(a < b);
    assert_eq!(a.clone().cmp(&a), std::cmp::Ordering::Equal);
}

#[test]
fn default_into_iter_is_empty() {
    let iter: rb_tree_set::IntoIter<u8> = Default::default();
    assert_eq!(iter.len(), 0);
}
