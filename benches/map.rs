use std::collections::BTreeMap;

use avl_arena::AvlMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand::seq::SliceRandom;
use rand::thread_rng;

const COUNT: u64 = 10_000;

fn shuffled_keys() -> Vec<u64> {
    let mut keys: Vec<u64> = (0..COUNT).collect();
    keys.shuffle(&mut thread_rng());
    keys
}

fn build_avl(keys: &[u64]) -> AvlMap<u64, u64> {
    let mut map = AvlMap::new();
    for &key in keys {
        map.insert(key, key);
    }
    map
}

fn bench_insert(c: &mut Criterion) {
    let keys = shuffled_keys();

    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("avl_insert_10000", |b| {
        b.iter(|| {
            let mut map = AvlMap::new();
            for &key in &keys {
                map.insert(black_box(key), key);
            }
            map
        })
    });

    group.bench_function("btree_insert_10000", |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &key in &keys {
                map.insert(black_box(key), key);
            }
            map
        })
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let keys = shuffled_keys();
    let avl = build_avl(&keys);
    let btree: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("avl_get_10000", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(avl.get(black_box(key)));
            }
        })
    });

    group.bench_function("btree_get_10000", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(btree.get(black_box(key)));
            }
        })
    });

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let keys = shuffled_keys();

    let mut group = c.benchmark_group("remove");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("avl_remove_10000", |b| {
        b.iter_batched(
            || build_avl(&keys),
            |mut map| {
                for key in &keys {
                    black_box(map.remove(black_box(key)));
                }
                map
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_remove);
criterion_main!(benches);
