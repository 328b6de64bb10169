//! Ordered maps over an index arena: an AVL tree and its unbalanced core.

// Conventions used in comments:
// - The balance factor of a node `x` is denoted `b(x)`.
// - `b(x) = height(right(x)) - height(left(x))`, so negative is left-heavy
//   and positive is right-heavy.
// - A missing subtree has height 0.
//
// The fundamental invariants of the AVL map are:
// 1. BST order: every key in `left(x)` compares less than `x`'s key, every
//    key in `right(x)` compares greater.
// 2. `b(x)` is in {-1, 0, 1} for every node, and equals the actual height
//    difference of `x`'s subtrees.
//
// Corollaries:
// 3. The subtree of minimum size with height `h` has a root with `b` = +-1,
//    one child subtree of height `h - 1` and one of height `h - 2`; its size
//    satisfies the Fibonacci recurrence, so n >= F(h) and the tree height is
//    O(log n).
//
// 4. After attaching a leaf, at most one node needs rotation: the fix-up
//    walk stops at the first ancestor that absorbs the height change (its
//    balance reaches 0), and a rotation at a +-2 ancestor restores that
//    subtree's previous height, so nothing above it can have changed.
//
// The unbalanced engine maintains only (1); its balance factors are all 0.

mod avl;
mod bst;
mod debug;
mod iter;
mod node;
pub mod paths;
mod tree;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

pub use crate::avl::AvlMap;
pub use crate::bst::BstMap;
pub use crate::iter::Iter;
pub use crate::paths::{BinaryNode, equal_leaf_depths};
