use core::iter::FusedIterator;

use crate::node::Link;
use crate::tree::Tree;

/// A borrowing in-order iterator over a tree's entries.
///
/// Yields `(&K, &V)` pairs in strictly increasing key order. The iterator
/// borrows the map, so the tree cannot be structurally mutated while one is
/// live; independent iterators may coexist freely.
pub struct Iter<'a, K, V> {
    tree: &'a Tree<K, V>,
    cur: Link,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Starts at the smallest key.
    pub(crate) fn new(tree: &'a Tree<K, V>) -> Iter<'a, K, V> {
        Iter {
            tree,
            cur: tree.first(),
        }
    }

    /// Starts at `cur`; `None` is the end sentinel.
    pub(crate) fn at(tree: &'a Tree<K, V>, cur: Link) -> Iter<'a, K, V> {
        Iter { tree, cur }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cur?;
        self.cur = self.tree.successor(node);

        let node = &self.tree.arena[node];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cur {
            None => (0, Some(0)),
            Some(_) => (1, Some(self.tree.len())),
        }
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
