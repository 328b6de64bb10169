use std::ops::Range;

use proptest::prelude::*;

use crate::model;
use crate::{AvlMap, BstMap};

fn avl_keys(map: &AvlMap<u32, u32>) -> Vec<u32> {
    map.iter().map(|(&k, _)| k).collect()
}

fn bst_keys(map: &BstMap<u32, u32>) -> Vec<u32> {
    map.iter().map(|(&k, _)| k).collect()
}

fn insert_find_all(keys: &[u32]) {
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    for &key in keys {
        map.insert(key, key);
        map.assert_invariants();
    }

    for key in keys {
        assert_eq!(map.get(key), Some(key), "key {key} not found");
    }
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn two_elems_find() {
    insert_find_all(&[0, 1]);
    insert_find_all(&[1, 0]);
}

#[test]
fn three_elems_find() {
    insert_find_all(&[0, 1, 2]);
    insert_find_all(&[0, 2, 1]);
    insert_find_all(&[1, 0, 2]);
    insert_find_all(&[1, 2, 0]);
    insert_find_all(&[2, 0, 1]);
    insert_find_all(&[2, 1, 0]);
}

#[test]
fn four_elems_find() {
    insert_find_all(&[0, 1, 2, 3]);
    insert_find_all(&[0, 1, 3, 2]);
    insert_find_all(&[0, 2, 1, 3]);
    insert_find_all(&[0, 2, 3, 1]);
    insert_find_all(&[0, 3, 1, 2]);
    insert_find_all(&[0, 3, 2, 1]);

    insert_find_all(&[1, 0, 2, 3]);
    insert_find_all(&[1, 0, 3, 2]);
    insert_find_all(&[1, 2, 0, 3]);
    insert_find_all(&[1, 2, 3, 0]);
    insert_find_all(&[1, 3, 0, 2]);
    insert_find_all(&[1, 3, 2, 0]);

    insert_find_all(&[2, 0, 1, 3]);
    insert_find_all(&[2, 0, 3, 1]);
    insert_find_all(&[2, 1, 0, 3]);
    insert_find_all(&[2, 1, 3, 0]);
    insert_find_all(&[2, 3, 0, 1]);
    insert_find_all(&[2, 3, 1, 0]);

    insert_find_all(&[3, 0, 1, 2]);
    insert_find_all(&[3, 0, 2, 1]);
    insert_find_all(&[3, 1, 0, 2]);
    insert_find_all(&[3, 1, 2, 0]);
    insert_find_all(&[3, 2, 0, 1]);
    insert_find_all(&[3, 2, 1, 0]);
}

fn insert_remove_all(keys: &[u32]) {
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    for &key in keys {
        map.insert(key, key);
        map.assert_invariants();
    }

    for key in keys {
        assert_eq!(map.remove(key), Some(*key));
        map.assert_invariants();
    }

    assert!(map.is_empty());

    for &key in keys {
        map.insert(key, key);
        map.assert_invariants();
    }

    for key in keys.iter().rev() {
        assert_eq!(map.remove(key), Some(*key));
        map.assert_invariants();
    }

    assert!(map.is_empty());
}

#[test]
fn remove_one() {
    insert_remove_all(&[0]);
}

#[test]
fn remove_two() {
    insert_remove_all(&[0, 1]);
    insert_remove_all(&[1, 0]);
}

#[test]
fn remove_three() {
    insert_remove_all(&[0, 1, 2]);
    insert_remove_all(&[0, 2, 1]);
    insert_remove_all(&[1, 0, 2]);
    insert_remove_all(&[1, 2, 0]);
    insert_remove_all(&[2, 0, 1]);
    insert_remove_all(&[2, 1, 0]);
}

#[test]
fn remove_four() {
    insert_remove_all(&[0, 1, 2, 3]);
    insert_remove_all(&[0, 1, 3, 2]);
    insert_remove_all(&[0, 2, 1, 3]);
    insert_remove_all(&[0, 2, 3, 1]);
    insert_remove_all(&[0, 3, 1, 2]);
    insert_remove_all(&[0, 3, 2, 1]);

    insert_remove_all(&[1, 0, 2, 3]);
    insert_remove_all(&[1, 0, 3, 2]);
    insert_remove_all(&[1, 2, 0, 3]);
    insert_remove_all(&[1, 2, 3, 0]);
    insert_remove_all(&[1, 3, 0, 2]);
    insert_remove_all(&[1, 3, 2, 0]);

    insert_remove_all(&[2, 0, 1, 3]);
    insert_remove_all(&[2, 0, 3, 1]);
    insert_remove_all(&[2, 1, 0, 3]);
    insert_remove_all(&[2, 1, 3, 0]);
    insert_remove_all(&[2, 3, 0, 1]);
    insert_remove_all(&[2, 3, 1, 0]);

    insert_remove_all(&[3, 0, 1, 2]);
    insert_remove_all(&[3, 0, 2, 1]);
    insert_remove_all(&[3, 1, 0, 2]);
    insert_remove_all(&[3, 1, 2, 0]);
    insert_remove_all(&[3, 2, 0, 1]);
    insert_remove_all(&[3, 2, 1, 0]);
}

#[test]
fn avl_scenario_with_removal() {
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    for key in [6, 3, 1, 4, 7, 9, 8, 10] {
        map.insert(key, key);
        map.assert_invariants();
    }

    map.remove(&7);
    map.assert_invariants();
    assert!(map.is_balanced());
    assert_eq!(avl_keys(&map), vec![1, 3, 4, 6, 8, 9, 10]);
}

#[test]
fn bst_removal_ladder() {
    let mut map: BstMap<u32, u32> = BstMap::new();
    let mut residual: Vec<u32> = Vec::new();

    for key in [5, 7, 6, 8, 2, 4, 3, 1] {
        map.insert(key, key * 10);
        residual.push(key);
    }
    residual.sort_unstable();

    // Repeated and already-removed keys must be no-ops.
    for key in [2, 1, 5, 4, 5, 6, 7, 8] {
        let expected = residual.iter().position(|&k| k == key).map(|idx| {
            residual.remove(idx);
            key * 10
        });

        assert_eq!(map.remove(&key), expected);
        map.assert_invariants();
        assert_eq!(bst_keys(&map), residual);
    }

    assert!(map.is_empty());
}

#[test]
fn ascending_inserts_stay_balanced() {
    // A sorted insertion order degenerates an unbalanced tree into a list
    // and forces both single- and double-rotation repairs in the AVL map.
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    for key in 1..=7 {
        map.insert(key, key);
        map.assert_invariants();
        assert!(map.is_balanced());
    }

    assert_eq!(avl_keys(&map), (1..=7).collect::<Vec<_>>());

    let mut bst: BstMap<u32, u32> = BstMap::new();
    for key in 1..=7 {
        bst.insert(key, key);
    }
    assert!(!bst.is_balanced());
}

#[test]
fn empty_tree_ops() {
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    assert_eq!(map.remove(&42), None);
    assert_eq!(map.get(&42), None);
    assert!(map.find(&42).next().is_none());
    assert_eq!(map.first_key_value(), None);
    assert_eq!(map.last_key_value(), None);
    assert_eq!(map.iter().count(), 0);

    map.clear();
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn overwrite_leaves_shape_alone() {
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    for key in [6, 3, 1, 4, 7, 9, 8, 10] {
        map.insert(key, key);
    }

    let shape = map.render();
    assert_eq!(map.insert(4, 400), Some(4));

    assert_eq!(map.render(), shape);
    assert_eq!(map.len(), 8);
    assert_eq!(map[&4], 400);
    map.assert_invariants();
}

#[test]
fn round_trip_leaves_empty() {
    let mut map: AvlMap<u32, u32> = AvlMap::new();
    let keys: Vec<u32> = (0..64).map(|i| (i * 37) % 101).collect();

    for &key in &keys {
        map.insert(key, key);
    }
    for &key in &keys {
        map.remove(&key);
    }

    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.iter().count(), 0);
    assert_eq!(map.render(), AvlMap::<u32, u32>::new().render());

    // The emptied map is fully reusable.
    map.insert(1, 1);
    map.assert_invariants();
    assert_eq!(map.get(&1), Some(&1));
}

#[test]
fn find_positions_an_iterator() {
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    for key in [2, 4, 6, 8] {
        map.insert(key, key * 10);
    }

    let mut it = map.find(&4);
    assert_eq!(it.next(), Some((&4, &40)));
    assert_eq!(it.next(), Some((&6, &60)));

    assert!(map.find(&5).next().is_none());
}

#[test]
fn first_and_last() {
    let mut map: AvlMap<u32, u32> = AvlMap::new();

    for key in [5, 1, 9, 3] {
        map.insert(key, key);
    }

    assert_eq!(map.first_key_value(), Some((&1, &1)));
    assert_eq!(map.last_key_value(), Some((&9, &9)));
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_key_panics() {
    let map: AvlMap<u32, u32> = AvlMap::new();
    let _ = map[&7];
}

#[test]
fn bst_preserves_insertion_shape() {
    // Without rebalancing, the root stays wherever the first insert put it.
    let mut map: BstMap<u32, u32> = BstMap::new();

    for key in [5, 7, 6, 8, 2, 4, 3, 1] {
        map.insert(key, key);
        map.assert_invariants();
    }

    assert_eq!(bst_keys(&map), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(map.first_key_value(), Some((&1, &1)));

    // 5 was inserted first; removing it exercises the predecessor swap at
    // the root.
    assert_eq!(map.remove(&5), Some(5));
    map.assert_invariants();
    assert_eq!(bst_keys(&map), vec![1, 2, 3, 4, 6, 7, 8]);
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn avl_btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_avl_equivalence(ops);
    }

    #[test]
    fn bst_btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_bst_equivalence(ops);
    }
}
