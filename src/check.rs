//! Structure validation.
//!
//! Every container exposes a `validate` walk that re-derives its
//! structural invariants from scratch and reports the first violation
//! found. A violation indicates a bug in this crate, never a caller
//! mistake; no public operation can produce one.

use thiserror::Error;

/// A broken structural invariant, as reported by `validate`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// A node's cached subtree size disagrees with its children.
    #[error("cached node size {found} disagrees with recomputed size {expected}")]
    SizeMismatch {
        /// Size recomputed from the children.
        expected: usize,
        /// Size stored in the node.
        found: usize,
    },

    /// The weight-balance bound is broken between two sibling subtrees.
    #[error("weight balance broken: left subtree size {left}, right subtree size {right}")]
    WeightImbalance {
        /// Size of the left subtree.
        left: usize,
        /// Size of the right subtree.
        right: usize,
    },

    /// In-order traversal is not ordered by the tree's comparator.
    #[error("entries out of order")]
    OutOfOrder,

    /// A red node has a red child.
    #[error("red node has a red child")]
    RedRed,

    /// Root-to-leaf paths disagree on their black-node count.
    #[error("black height mismatch: {left} on the left vs {right} on the right")]
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// The root of a red-black tree is red.
    #[error("red-black root is red")]
    RedRoot,
}
