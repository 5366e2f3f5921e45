//! Persistent ordered containers
//!
//! This crate provides immutable collections built on weight-balanced
//! binary search trees (also known as Adams trees or bounded balance
//! trees): an ordered [`Map`] and an ordered [`Set`]. Every "mutation"
//! returns a new container value; the old value remains valid and
//! unchanged, and the two share every subtree the edit did not touch.
//!
//! Alongside the weight-balanced containers there are two lower-level
//! tree shapes:
//!
//! * [`TipBinTree`], a plain persistent binary tree, together with
//!   [`Zipper`], a cursor that descends into the tree and can rebuild
//!   the whole tree from any position without copying untouched
//!   subtrees.
//! * [`RbTree`], a red-black tree whose insertion runs as an explicit
//!   path-recording descent followed by a bottom-up recoloring/rotation
//!   fixup.
//!
//! Ordering is supplied as an explicit [`Comparator`] resolved when a
//! container is created; [`Natural`] (the element's `Ord` instance) is
//! the default.
//!
//! # Example
//!
//! ```
//! use ordtree::Map;
//!
//! let m = Map::empty()
//!     .insert(1, "one")
//!     .insert(2, "two")
//!     .insert(3, "three");
//!
//! assert_eq!(m.lookup(&2), Some(&"two"));
//! assert_eq!(m.size(), 3);
//!
//! // m is untouched by further edits
//! let m2 = m.delete(&2);
//! assert_eq!(m2.lookup(&2), None);
//! assert_eq!(m.lookup(&2), Some(&"two"));
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod map;
pub mod order;
pub mod rbtree;
pub mod set;
pub mod tipbin;
mod wbt;

pub use check::InvariantError;
pub use map::Map;
pub use order::{Comparator, Natural, Reversed};
pub use rbtree::RbTree;
pub use set::Set;
pub use tipbin::{TipBinTree, Zipper};
