//! The structural engine shared by [`BstMap`](crate::BstMap) and
//! [`AvlMap`](crate::AvlMap): order-guided descent, leaf attachment, splicing
//! and position-swaps over the node arena. Contains no rebalancing logic;
//! balance factors are only stored, copied and swapped here, never computed.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use crate::node::{Arena, Dir, Link, Node, NodeId};

pub(crate) struct Tree<K, V> {
    pub(crate) arena: Arena<K, V>,
    pub(crate) root: Link,
    pub(crate) len: usize,
}

/// Outcome of a structural insert.
pub(crate) enum Inserted<V> {
    /// The key was already present; the old value is returned and the tree
    /// shape is untouched.
    Replaced(V),
    /// The tree was empty; the new node is the root.
    Root,
    /// A new leaf was linked under `parent` on side `dir`.
    Attached {
        node: NodeId,
        parent: NodeId,
        dir: Dir,
    },
}

/// Outcome of a structural remove: the freed node plus the position it was
/// spliced out of, which the AVL layer feeds into its fix-up walk.
pub(crate) struct Removed<K, V> {
    pub(crate) node: Node<K, V>,
    pub(crate) parent: Link,
    pub(crate) dir: Option<Dir>,
}

impl<K, V> Tree<K, V> {
    pub(crate) const fn new() -> Tree<K, V> {
        Tree {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node and resets to empty. Child slots are the only
    /// ownership edges, so no unlink walk is needed.
    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            match key.cmp(self.arena[cur].key.borrow()) {
                Ordering::Less => opt_cur = self.arena[cur].left(),
                Ordering::Equal => return Some(cur),
                Ordering::Greater => opt_cur = self.arena[cur].right(),
            }
        }
    }

    /// Descends from the root and either overwrites the value of an equal
    /// key or links a fresh leaf into the first missing child slot.
    pub(crate) fn insert_node(&mut self, key: K, value: V) -> Inserted<V>
    where
        K: Ord,
    {
        let Some(root) = self.root else {
            let node = self.arena.alloc(Node::new(key, value, None));
            self.root = Some(node);
            self.len += 1;
            return Inserted::Root;
        };

        let mut cur = root;

        loop {
            let dir = match key.cmp(&self.arena[cur].key) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => {
                    let old = mem::replace(&mut self.arena[cur].value, value);
                    return Inserted::Replaced(old);
                }
            };

            match self.arena[cur].child(dir) {
                Some(child) => cur = child,
                None => {
                    let node = self.arena.alloc(Node::new(key, value, Some(cur)));
                    self.arena[cur].set_child(dir, Some(node));
                    self.len += 1;
                    return Inserted::Attached {
                        node,
                        parent: cur,
                        dir,
                    };
                }
            }
        }
    }

    pub(crate) fn remove_node<Q>(&mut self, key: &Q) -> Option<Removed<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find(key)?;
        Some(self.remove_at(node))
    }

    /// Removes `node` from the tree. A node with two children first swaps
    /// positions with its in-order predecessor, after which it has no right
    /// child and the 0/1-child splice applies.
    pub(crate) fn remove_at(&mut self, node: NodeId) -> Removed<K, V> {
        if self.arena[node].left().is_some() && self.arena[node].right().is_some() {
            let pred = self
                .predecessor(node)
                .expect("a node with two children has a predecessor");
            self.swap_positions(pred, node);
        }

        let parent = self.arena[node].parent;
        let dir = parent.map(|p| self.which_child(p, node));
        let freed = self.splice(node);

        Removed {
            node: freed,
            parent,
            dir,
        }
    }

    // Unlinks a node with at most one child, elevating that child into its
    // slot, and frees it.
    fn splice(&mut self, node: NodeId) -> Node<K, V> {
        debug_assert!(
            self.arena[node].left().is_none() || self.arena[node].right().is_none(),
            "cannot splice a node with two children"
        );

        let child = self.arena[node].left().or(self.arena[node].right());
        let parent = self.arena[node].parent;

        self.replace_child_or_set_root(parent, node, child);
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }

        self.len -= 1;
        self.arena.free(node)
    }

    // Replaces the child slot of `parent` pointing at `old_child` with
    // `new_child` (or the root pointer if `parent` is none). `new_child`'s
    // parent link is not updated.
    pub(crate) fn replace_child_or_set_root(&mut self, parent: Link, old_child: NodeId, new_child: Link) {
        match parent {
            Some(parent) => {
                let dir = self.which_child(parent, old_child);
                self.arena[parent].set_child(dir, new_child);
            }
            None => self.root = new_child,
        }
    }

    pub(crate) fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self.arena[parent].left() == Some(child) {
            Dir::Left
        } else {
            debug_assert_eq!(
                self.arena[parent].right(),
                Some(child),
                "node is not a child of its recorded parent"
            );
            Dir::Right
        }
    }

    /// Exchanges the structural positions of two nodes: parent/child links
    /// and balance factors move, keys and values stay with their nodes. This
    /// keeps balance factors attached to tree positions across the
    /// predecessor swap used by two-child removal.
    pub(crate) fn swap_positions(&mut self, n1: NodeId, n2: NodeId) {
        if n1 == n2 {
            return;
        }

        let n1p = self.arena[n1].parent;
        let n1l = self.arena[n1].left();
        let n1r = self.arena[n1].right();
        let n1_is_left = matches!(n1p, Some(p) if self.arena[p].left() == Some(n1));
        let n2p = self.arena[n2].parent;
        let n2l = self.arena[n2].left();
        let n2r = self.arena[n2].right();
        let n2_is_left = matches!(n2p, Some(p) if self.arena[p].left() == Some(n2));

        let n1b = self.arena[n1].balance;
        let n2b = self.arena[n2].balance;

        self.arena[n1].parent = n2p;
        self.arena[n1].set_child(Dir::Left, n2l);
        self.arena[n1].set_child(Dir::Right, n2r);
        self.arena[n1].balance = n2b;

        self.arena[n2].parent = n1p;
        self.arena[n2].set_child(Dir::Left, n1l);
        self.arena[n2].set_child(Dir::Right, n1r);
        self.arena[n2].balance = n1b;

        // One node may have been the other's direct child; the wholesale
        // exchange above then left a self-link to repair.
        if n1r == Some(n2) {
            self.arena[n2].set_child(Dir::Right, Some(n1));
            self.arena[n1].parent = Some(n2);
        } else if n2r == Some(n1) {
            self.arena[n1].set_child(Dir::Right, Some(n2));
            self.arena[n2].parent = Some(n1);
        } else if n1l == Some(n2) {
            self.arena[n2].set_child(Dir::Left, Some(n1));
            self.arena[n1].parent = Some(n2);
        } else if n2l == Some(n1) {
            self.arena[n1].set_child(Dir::Left, Some(n2));
            self.arena[n2].parent = Some(n1);
        }

        // Point the old neighbors at the exchanged nodes.
        if let Some(p) = n1p {
            if p != n2 {
                let dir = if n1_is_left { Dir::Left } else { Dir::Right };
                self.arena[p].set_child(dir, Some(n2));
            }
        }
        if let Some(r) = n1r {
            if r != n2 {
                self.arena[r].parent = Some(n2);
            }
        }
        if let Some(l) = n1l {
            if l != n2 {
                self.arena[l].parent = Some(n2);
            }
        }
        if let Some(p) = n2p {
            if p != n1 {
                let dir = if n2_is_left { Dir::Left } else { Dir::Right };
                self.arena[p].set_child(dir, Some(n1));
            }
        }
        if let Some(r) = n2r {
            if r != n1 {
                self.arena[r].parent = Some(n1);
            }
        }
        if let Some(l) = n2l {
            if l != n1 {
                self.arena[l].parent = Some(n1);
            }
        }

        if self.root == Some(n1) {
            self.root = Some(n2);
        } else if self.root == Some(n2) {
            self.root = Some(n1);
        }
    }

    pub(crate) fn leftmost(&self, from: NodeId) -> NodeId {
        let mut cur = from;
        while let Some(left) = self.arena[cur].left() {
            cur = left;
        }
        cur
    }

    pub(crate) fn rightmost(&self, from: NodeId) -> NodeId {
        let mut cur = from;
        while let Some(right) = self.arena[cur].right() {
            cur = right;
        }
        cur
    }

    /// The minimum node, i.e. the begin position of the in-order sequence.
    pub(crate) fn first(&self) -> Link {
        self.root.map(|root| self.leftmost(root))
    }

    /// The maximum node.
    pub(crate) fn last(&self) -> Link {
        self.root.map(|root| self.rightmost(root))
    }

    /// The in-order successor: leftmost of the right subtree if one exists,
    /// otherwise the first ancestor reached through a left link.
    pub(crate) fn successor(&self, node: NodeId) -> Link {
        if let Some(right) = self.arena[node].right() {
            return Some(self.leftmost(right));
        }

        let mut cur = node;
        loop {
            let parent = self.arena[cur].parent?;
            if self.which_child(parent, cur) == Dir::Left {
                return Some(parent);
            }
            cur = parent;
        }
    }

    /// The in-order predecessor: rightmost of the left subtree if one
    /// exists, otherwise the first ancestor reached through a right link.
    pub(crate) fn predecessor(&self, node: NodeId) -> Link {
        if let Some(left) = self.arena[node].left() {
            return Some(self.rightmost(left));
        }

        let mut cur = node;
        loop {
            let parent = self.arena[cur].parent?;
            if self.which_child(parent, cur) == Dir::Right {
                return Some(parent);
            }
            cur = parent;
        }
    }

    /// Height-recomputing balance probe, independent of the stored balance
    /// factors: every node's subtree heights differ by at most one.
    pub(crate) fn is_balanced(&self) -> bool {
        self.is_balanced_at(self.root)
    }

    fn is_balanced_at(&self, link: Link) -> bool {
        let Some(node) = link else {
            return true;
        };

        let left = self.arena[node].left();
        let right = self.arena[node].right();

        (self.height_below(left) - self.height_below(right)).abs() <= 1
            && self.is_balanced_at(left)
            && self.is_balanced_at(right)
    }

    fn height_below(&self, link: Link) -> i32 {
        match link {
            None => 0,
            Some(node) => {
                let left = self.height_below(self.arena[node].left());
                let right = self.height_below(self.arena[node].right());
                1 + left.max(right)
            }
        }
    }

    /// Checks every structural invariant: parent back-links, strict key
    /// order, the length counter, and the balance field. With `avl` set, the
    /// stored balance factor of every node must equal the recomputed height
    /// difference and lie in `{-1, 0, 1}`; otherwise it must be zero.
    pub(crate) fn assert_invariants(&self, avl: bool)
    where
        K: Ord,
    {
        let mut count = 0;

        if let Some(root) = self.root {
            assert_eq!(self.arena[root].parent, None, "root must have no parent");
            self.assert_invariants_at(root, avl, &mut count);
        }

        assert_eq!(count, self.len, "length counter out of sync");

        // In-order walk yields strictly increasing keys.
        let mut prev: Option<NodeId> = None;
        let mut cur = self.first();
        while let Some(node) = cur {
            if let Some(prev) = prev {
                assert!(
                    self.arena[prev].key < self.arena[node].key,
                    "in-order walk is not strictly increasing"
                );
            }
            prev = Some(node);
            cur = self.successor(node);
        }
    }

    fn assert_invariants_at(&self, node: NodeId, avl: bool, count: &mut usize) -> i32 {
        *count += 1;

        let mut heights = [0i32; 2];

        for dir in [Dir::Left, Dir::Right] {
            if let Some(child) = self.arena[node].child(dir) {
                assert_eq!(
                    self.arena[child].parent,
                    Some(node),
                    "child's parent link does not point at its parent"
                );
                heights[dir as usize] = self.assert_invariants_at(child, avl, count);
            }
        }

        let diff = heights[Dir::Right as usize] - heights[Dir::Left as usize];

        if avl {
            assert!(diff.abs() <= 1, "subtree heights differ by more than one");
            assert_eq!(
                i32::from(self.arena[node].balance),
                diff,
                "stored balance factor diverges from the height difference"
            );
        } else {
            assert_eq!(self.arena[node].balance, 0, "engine left a nonzero balance factor");
        }

        1 + heights[0].max(heights[1])
    }
}
