//! Differential-testing model: drives a map under test and
//! `std::collections::BTreeMap` with the same operation sequence and checks
//! that they agree after every step. Shared between the proptest suites and
//! the fuzz targets.

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{AvlMap, BstMap};

/// A key operand that may reference an existing key (by index into the
/// current sorted key set) or name an arbitrary one. Indexing keeps the
/// operation mix hitting present keys even as the key space thins out.
#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Get(ItemValue),
    Remove(ItemValue),
    First,
    Last,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len().max(1)]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Get(item) => FinalOp::Get(get_value(sorted, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(sorted, item)),
            Op::First => FinalOp::First,
            Op::Last => FinalOp::Last,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Get(u32),
    Remove(u32),
    First,
    Last,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Get),
        value_strategy().prop_map(Op::Remove),
        Just(Op::First),
        Just(Op::Last),
    ]
}

// The slice of the map API the model exercises, so one runner covers both
// map flavors.
trait ModelMap {
    fn insert(&mut self, key: u32, value: u32) -> Option<u32>;
    fn get(&self, key: &u32) -> Option<&u32>;
    fn remove(&mut self, key: &u32) -> Option<u32>;
    fn first_key_value(&self) -> Option<(&u32, &u32)>;
    fn last_key_value(&self) -> Option<(&u32, &u32)>;
    fn len(&self) -> usize;
    fn keys(&self) -> Vec<u32>;
    fn check(&self);
}

impl ModelMap for AvlMap<u32, u32> {
    fn insert(&mut self, key: u32, value: u32) -> Option<u32> {
        AvlMap::insert(self, key, value)
    }

    fn get(&self, key: &u32) -> Option<&u32> {
        AvlMap::get(self, key)
    }

    fn remove(&mut self, key: &u32) -> Option<u32> {
        AvlMap::remove(self, key)
    }

    fn first_key_value(&self) -> Option<(&u32, &u32)> {
        AvlMap::first_key_value(self)
    }

    fn last_key_value(&self) -> Option<(&u32, &u32)> {
        AvlMap::last_key_value(self)
    }

    fn len(&self) -> usize {
        AvlMap::len(self)
    }

    fn keys(&self) -> Vec<u32> {
        self.iter().map(|(&k, _)| k).collect()
    }

    fn check(&self) {
        self.assert_invariants();
        assert!(self.is_balanced());
    }
}

impl ModelMap for BstMap<u32, u32> {
    fn insert(&mut self, key: u32, value: u32) -> Option<u32> {
        BstMap::insert(self, key, value)
    }

    fn get(&self, key: &u32) -> Option<&u32> {
        BstMap::get(self, key)
    }

    fn remove(&mut self, key: &u32) -> Option<u32> {
        BstMap::remove(self, key)
    }

    fn first_key_value(&self) -> Option<(&u32, &u32)> {
        BstMap::first_key_value(self)
    }

    fn last_key_value(&self) -> Option<(&u32, &u32)> {
        BstMap::last_key_value(self)
    }

    fn len(&self) -> usize {
        BstMap::len(self)
    }

    fn keys(&self) -> Vec<u32> {
        self.iter().map(|(&k, _)| k).collect()
    }

    fn check(&self) {
        self.assert_invariants();
    }
}

pub fn run_avl_equivalence(ops: Vec<Op>) {
    run_equivalence(AvlMap::new(), ops);
}

pub fn run_bst_equivalence(ops: Vec<Op>) {
    run_equivalence(BstMap::new(), ops);
}

fn run_equivalence<M: ModelMap>(mut map: M, ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeMap::new();

    fn insert_sorted(v: &mut Vec<u32>, value: u32) {
        if let Err(idx) = v.binary_search(&value) {
            v.insert(idx, value);
        }
    }

    fn remove_sorted(v: &mut Vec<u32>, value: u32) {
        if let Ok(idx) = v.binary_search(&value) {
            v.remove(idx);
        }
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        // Use the op index as the inserted value so overwrites are visible.
        let payload = op_id as u32;

        match final_op {
            FinalOp::Insert(key) => {
                insert_sorted(&mut sorted_values, key);

                let from_btree = btree.insert(key, payload);
                let from_map = map.insert(key, payload);

                assert_eq!(from_btree, from_map, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Get(key) => {
                let from_btree = btree.get(&key);
                let from_map = map.get(&key);

                assert_eq!(from_btree, from_map, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Remove(key) => {
                remove_sorted(&mut sorted_values, key);

                let from_btree = btree.remove(&key);
                let from_map = map.remove(&key);

                assert_eq!(from_btree, from_map, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::First => {
                let from_btree = btree.first_key_value();
                let from_map = map.first_key_value();

                assert_eq!(from_btree, from_map, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Last => {
                let from_btree = btree.last_key_value();
                let from_map = map.last_key_value();

                assert_eq!(from_btree, from_map, "FinalOp #{op_id}: {op:?}");
            }
        }

        map.check();
        assert_eq!(btree.len(), map.len());
        assert!(btree.keys().copied().eq(map.keys()));
    }
}
