use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::iter::Iter;
use crate::tree::{Inserted, Tree};

/// An ordered map backed by an unbalanced binary search tree.
///
/// `BstMap` is the structural engine exposed standalone: the same descent,
/// splice and position-swap machinery as [`AvlMap`](crate::AvlMap), with no
/// rebalancing. Operations cost O(height), which degrades to O(n) for
/// adversarial insertion orders; use [`AvlMap`](crate::AvlMap) when a height
/// bound matters.
pub struct BstMap<K, V> {
    tree: Tree<K, V>,
}

impl<K, V> Default for BstMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BstMap<K, V>
where
    K: Ord,
{
    /// Creates a new, empty `BstMap`.
    pub const fn new() -> BstMap<K, V> {
        BstMap { tree: Tree::new() }
    }

    /// Returns the number of elements in the map.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns `true` if the map contains a value associated with `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns a reference to the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.tree.find(key)?;
        Some(&self.tree.arena[node].value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.tree.find(key)?;
        Some(&mut self.tree.arena[node].value)
    }

    /// Returns the first key-value pair in the map.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.tree.first()?;
        let node = &self.tree.arena[node];
        Some((&node.key, &node.value))
    }

    /// Returns the last key-value pair in the map.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.tree.last()?;
        let node = &self.tree.arena[node];
        Some((&node.key, &node.value))
    }

    /// An in-order iterator over the map's entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.tree)
    }

    /// An iterator positioned at `key`, or the exhausted iterator if the key
    /// is absent.
    pub fn find<Q>(&self, key: &Q) -> Iter<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Iter::at(&self.tree, self.tree.find(key))
    }

    /// Inserts a key-value pair, overwriting and returning the old value if
    /// the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.insert_node(key, value) {
            Inserted::Replaced(old) => Some(old),
            Inserted::Root | Inserted::Attached { .. } => None,
        }
    }

    /// Removes the value associated with `key` from the map.
    ///
    /// Returns `None` (and changes nothing) if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self.tree.remove_node(key)?;
        Some(removed.node.value)
    }

    /// Clears the map, removing all elements. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns `true` if every node's subtree heights differ by at most one.
    ///
    /// Nothing maintains this for a `BstMap`; whether it holds depends
    /// entirely on the insertion order.
    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_invariants(false);
    }

    pub(crate) fn tree(&self) -> &Tree<K, V> {
        &self.tree
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V>
where
    K: Ord,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, Q> Index<&Q> for BstMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value associated with `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K, V> fmt::Debug for BstMap<K, V>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
