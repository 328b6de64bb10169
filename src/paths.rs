//! Leaf-depth equality over a plain binary tree.
//!
//! This check is independent of the map types: it works on its own minimal
//! node (two owned children, no parent link, no balance factor) and shares
//! no state with the arena-backed trees.

/// A minimal binary tree vertex with owned children.
#[derive(Debug, Default)]
pub struct BinaryNode {
    pub left: Option<Box<BinaryNode>>,
    pub right: Option<Box<BinaryNode>>,
}

impl BinaryNode {
    /// A node with no children.
    pub fn leaf() -> BinaryNode {
        BinaryNode {
            left: None,
            right: None,
        }
    }

    pub fn with_children(left: Option<BinaryNode>, right: Option<BinaryNode>) -> BinaryNode {
        BinaryNode {
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }
}

/// Returns `true` if every leaf of the tree lies at the same depth.
///
/// The empty tree and the single-node tree are vacuously `true`.
pub fn equal_leaf_depths(root: Option<&BinaryNode>) -> bool {
    let mut expected = None;
    leaves_at(root, 0, &mut expected)
}

// Walks the tree carrying the depth of the first leaf encountered; every
// later leaf must match it.
fn leaves_at(node: Option<&BinaryNode>, depth: usize, expected: &mut Option<usize>) -> bool {
    let Some(node) = node else {
        return true;
    };

    if node.left.is_none() && node.right.is_none() {
        return match *expected {
            None => {
                *expected = Some(depth);
                true
            }
            Some(first) => first == depth,
        };
    }

    leaves_at(node.left.as_deref(), depth + 1, expected)
        && leaves_at(node.right.as_deref(), depth + 1, expected)
}
