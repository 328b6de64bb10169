use avl_arena::{AvlMap, BstMap};

fn main() {
    let mut bst: BstMap<i32, i32> = BstMap::new();

    for key in [5, 7, 6, 8, 2, 4, 3, 1] {
        bst.insert(key, key);
    }
    bst.assert_invariants();
    println!("unbalanced tree:");
    print!("{}", bst.render());

    for key in [2, 1, 5, 4, 5, 6, 7, 8] {
        bst.remove(&key);
        bst.assert_invariants();
        println!("after remove({key}):");
        print!("{}", bst.render());
    }

    let mut avl: AvlMap<i32, i32> = AvlMap::new();

    for key in [6, 3, 1, 4, 7, 9, 8, 10] {
        avl.insert(key, key);
        avl.assert_invariants();
    }
    println!("avl tree:");
    print!("{}", avl.render());

    avl.remove(&7);
    avl.assert_invariants();
    println!("after remove(7):");
    print!("{}", avl.render());

    let keys: Vec<i32> = avl.iter().map(|(&k, _)| k).collect();
    println!("in order: {keys:?}");
}
