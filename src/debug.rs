//! ASCII-art rendering of the tree shape, for debugging.
//!
//! The renderer only reads the node graph (structure, key, balance); it
//! holds no state of its own.

use core::fmt::{self, Write};

use crate::node::NodeId;
use crate::tree::Tree;
use crate::{AvlMap, BstMap};

const INDENT: usize = 4;

// Sideways rendering, one node per line: the right subtree is printed above
// its parent and the left subtree below, each one indent level deeper, so
// the page reads as the tree rotated a quarter turn counter-clockwise.
pub(crate) fn render_tree<K, V, W>(tree: &Tree<K, V>, w: &mut W) -> fmt::Result
where
    K: fmt::Debug,
    W: Write,
{
    match tree.root {
        None => writeln!(w, "(empty)"),
        Some(root) => render_at(tree, root, 0, w),
    }
}

fn render_at<K, V, W>(tree: &Tree<K, V>, node: NodeId, depth: usize, w: &mut W) -> fmt::Result
where
    K: fmt::Debug,
    W: Write,
{
    if let Some(right) = tree.arena[node].right() {
        render_at(tree, right, depth + 1, w)?;
    }

    writeln!(
        w,
        "{:indent$}{:?} ({:+})",
        "",
        tree.arena[node].key,
        tree.arena[node].balance,
        indent = depth * INDENT
    )?;

    if let Some(left) = tree.arena[node].left() {
        render_at(tree, left, depth + 1, w)?;
    }

    Ok(())
}

impl<K, V> AvlMap<K, V>
where
    K: Ord + fmt::Debug,
{
    /// Writes an ASCII rendering of the tree shape into `w`, one node per
    /// line with its balance factor.
    pub fn render_into<W: Write>(&self, w: &mut W) -> fmt::Result {
        render_tree(self.tree(), w)
    }

    /// Returns the ASCII rendering as a `String`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out)
            .expect("writing to a String cannot fail");
        out
    }
}

impl<K, V> BstMap<K, V>
where
    K: Ord + fmt::Debug,
{
    /// Writes an ASCII rendering of the tree shape into `w`.
    pub fn render_into<W: Write>(&self, w: &mut W) -> fmt::Result {
        render_tree(self.tree(), w)
    }

    /// Returns the ASCII rendering as a `String`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out)
            .expect("writing to a String cannot fail");
        out
    }
}
