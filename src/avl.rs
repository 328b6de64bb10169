use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::iter::Iter;
use crate::node::{Dir, NodeId};
use crate::tree::{Inserted, Tree};

/// An ordered map backed by an AVL tree over an index arena.
///
/// Every node carries a balance factor (`height(right) - height(left)`), and
/// each insert or remove is followed by a bottom-up fix-up walk that restores
/// `|balance| <= 1` everywhere with at most two rotations per level. Lookups,
/// inserts and removes all complete in _O(log n)_ time.
pub struct AvlMap<K, V> {
    tree: Tree<K, V>,
}

impl<K, V> Default for AvlMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> AvlMap<K, V>
where
    K: Ord,
{
    /// Creates a new, empty `AvlMap`.
    pub const fn new() -> AvlMap<K, V> {
        AvlMap { tree: Tree::new() }
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
    ///
    /// The returned key is the minimum key in the map.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.tree.first()?;
        let node = &self.tree.arena[node];
        Some((&node.key, &node.value))
    }

    /// Returns the last key-value pair in the map.
    ///
    /// The returned key is the maximum key in the map.
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

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is overwritten in place and
    /// the old value is returned; the tree shape and every balance factor
    /// stay untouched. This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.insert_node(key, value) {
            Inserted::Replaced(old) => Some(old),
            Inserted::Root => None,
            Inserted::Attached { node, parent, dir } => {
                // A parent that was +-1 had one taller side; the new leaf
                // filled the shorter one and its subtree height is unchanged.
                // A parent that was 0 just grew, so the change propagates.
                if self.tree.arena[parent].balance != 0 {
                    self.tree.arena[parent].balance = 0;
                } else {
                    self.tree.arena[parent].balance = dir.delta();
                    self.rebalance_inserted(parent, node);
                }
                None
            }
        }
    }

    /// Removes the value associated with `key` from the map.
    ///
    /// Returns `None` (and changes nothing) if the key is absent. This
    /// operation completes in _O(log(n))_ time.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self.tree.remove_node(key)?;

        if let Some(parent) = removed.parent {
            // Removal from the left side shortens it, pushing the balance
            // toward the right; and vice versa.
            let diff = match removed.dir {
                Some(Dir::Left) => 1,
                _ => -1,
            };
            self.rebalance_removed(parent, diff);
        }

        Some(removed.node.value)
    }

    /// Clears the map, removing all elements. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Independent height-recomputing balance probe; never consults the
    /// stored balance factors.
    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_invariants(true);
    }

    pub(crate) fn tree(&self) -> &Tree<K, V> {
        &self.tree
    }

    // Rebalancing =============================================================

    // Bottom-up fix-up after attaching a new leaf `node` under `parent`,
    // called only when the parent's subtree grew (its balance was 0 before
    // the attach). Ascends while each grandparent tips to +-1; a grandparent
    // that reaches 0 absorbed the growth, and one that reaches +-2 is
    // repaired by one or two rotations, after which the subtree has its
    // pre-insert height back and the walk stops.
    fn rebalance_inserted(&mut self, mut parent: NodeId, mut node: NodeId) {
        loop {
            let Some(grand) = self.tree.arena[parent].parent else {
                return;
            };

            let pdir = self.tree.which_child(grand, parent);
            let gb = self.tree.arena[grand].balance + pdir.delta();
            self.tree.arena[grand].balance = gb;

            match gb {
                0 => return,
                -1 | 1 => {
                    node = parent;
                    parent = grand;
                }
                _ => {
                    self.repair_overgrown(grand, parent, node, pdir);
                    return;
                }
            }
        }
    }

    // Resolves a +-2 imbalance at `grand` after an insert, where `parent` is
    // the heavy child on side `dir` and `node` the grandchild whose subtree
    // grew.
    fn repair_overgrown(&mut self, grand: NodeId, parent: NodeId, node: NodeId, dir: Dir) {
        if self.tree.which_child(parent, node) == dir {
            // Zig-zig: one rotation levels all three.
            self.rotate(grand, !dir);
            self.tree.arena[parent].balance = 0;
            self.tree.arena[grand].balance = 0;
        } else {
            // Zig-zag: rotate the middle node outward, then the grandparent
            // back. The displaced nodes' factors depend on which of the
            // promoted node's subtrees carried the new leaf.
            let nb = self.tree.arena[node].balance;
            self.rotate(parent, dir);
            self.rotate(grand, !dir);

            let d = dir.delta();
            let (pb, gb) = match nb {
                0 => (0, 0),
                b if b == d => (0, -d),
                _ => (d, 0),
            };
            self.tree.arena[parent].balance = pb;
            self.tree.arena[grand].balance = gb;
            self.tree.arena[node].balance = 0;
        }
    }

    // Bottom-up fix-up after splicing a node out from under `node`, with
    // `diff` the balance shift seen by `node` (+1 for a removal from its
    // left side, -1 from its right). The parent and the ascent direction are
    // captured before any rotation: a rotation replaces the subtree root,
    // but the replacement occupies the same child slot of the old parent.
    fn rebalance_removed(&mut self, node: NodeId, diff: i8) {
        let mut cur = Some(node);
        let mut diff = diff;

        while let Some(n) = cur {
            let parent = self.tree.arena[n].parent;
            let ndiff = parent.map(|p| match self.tree.which_child(p, n) {
                Dir::Left => 1,
                Dir::Right => -1,
            });

            let nb = self.tree.arena[n].balance + diff;

            if nb == -2 || nb == 2 {
                let heavy = if nb < 0 { Dir::Left } else { Dir::Right };
                let d = heavy.delta();
                let c = self.tree.arena[n]
                    .child(heavy)
                    .expect("imbalanced node must have a child on its heavy side");
                let cb = self.tree.arena[c].balance;

                if cb == d {
                    // Zig-zig: one rotation; the subtree shrank, keep going.
                    self.rotate(n, !heavy);
                    self.tree.arena[n].balance = 0;
                    self.tree.arena[c].balance = 0;
                } else if cb == 0 {
                    // The heavy child is even: rotating preserves the
                    // subtree height, so nothing above can have changed.
                    self.rotate(n, !heavy);
                    self.tree.arena[n].balance = d;
                    self.tree.arena[c].balance = -d;
                    return;
                } else {
                    // Zig-zag through the heavy child's inner grandchild.
                    let gc = self.tree.arena[c]
                        .child(!heavy)
                        .expect("zig-zag repair requires an inner grandchild");
                    let gb = self.tree.arena[gc].balance;
                    self.rotate(c, heavy);
                    self.rotate(n, !heavy);

                    let (nb2, cb2) = match gb {
                        0 => (0, 0),
                        b if b == -d => (0, d),
                        _ => (-d, 0),
                    };
                    self.tree.arena[n].balance = nb2;
                    self.tree.arena[c].balance = cb2;
                    self.tree.arena[gc].balance = 0;
                }
            } else if nb == 0 {
                // Was +-1, now even: this subtree got shorter, so the
                // removal is visible one level up.
                self.tree.arena[n].balance = 0;
            } else {
                // Was even, now +-1: the taller side still sets the subtree
                // height, so nothing above changed.
                self.tree.arena[n].balance = nb;
                return;
            }

            cur = parent;
            diff = ndiff.unwrap_or(0);
        }
    }

    // Single rotation moving `down` down in direction `dir` and promoting
    // its `!dir` child into its place. Balance factors are untouched; the
    // caller assigns them immediately afterwards.
    fn rotate(&mut self, down: NodeId, dir: Dir) {
        let up = self.tree.arena[down]
            .child(!dir)
            .expect("rotation requires a child to promote");
        let across = self.tree.arena[up].child(dir);

        self.tree.arena[down].set_child(!dir, across);
        if let Some(across) = across {
            self.tree.arena[across].parent = Some(down);
        }

        let parent = self.tree.arena[down].parent;
        self.tree.arena[up].set_child(dir, Some(down));
        self.tree.arena[down].parent = Some(up);
        self.tree.arena[up].parent = parent;

        self.tree.replace_child_or_set_root(parent, down, Some(up));
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V>
where
    K: Ord,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, Q> Index<&Q> for AvlMap<K, V>
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

impl<K, V> fmt::Debug for AvlMap<K, V>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
