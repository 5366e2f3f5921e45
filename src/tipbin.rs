//! Plain binary trees with zipper navigation
//!
//! [`TipBinTree`] is the bare recursive tree shape: a tree is either
//! `Tip` (empty) or `Bin` (a left subtree, a payload, a right subtree).
//! It carries no size or balance bookkeeping; it is the ground
//! representation other tree algorithms build on.
//!
//! [`Zipper`] is a cursor over such a tree. Descending records, per
//! level, the parent's payload and the sibling subtree not taken, so the
//! cursor can rebuild the whole tree from any position. Rebuilding
//! re-allocates only the nodes on the path from the root to the focus;
//! every sibling hangs off the new path by reference.
//!
//! # Example
//!
//! ```
//! use ordtree::{TipBinTree, Zipper};
//!
//! let t = TipBinTree::bin(TipBinTree::leaf(1), 2, TipBinTree::leaf(3));
//!
//! let mut z = Zipper::new(t.clone());
//! assert!(z.move_left());
//! z.set(TipBinTree::leaf(9));
//! let edited = z.reconstruct();
//!
//! assert_eq!(edited, TipBinTree::bin(TipBinTree::leaf(9), 2, TipBinTree::leaf(3)));
//! assert_eq!(t, TipBinTree::bin(TipBinTree::leaf(1), 2, TipBinTree::leaf(3)));
//! ```

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

/// A binary tree with payloads in internal nodes and empty terminals.
///
/// Cloning is cheap: non-empty trees are shared through `Rc`.
#[derive(Clone, PartialEq, Eq)]
pub enum TipBinTree<A> {
    /// The empty tree.
    Tip,
    /// A node: left subtree, payload, right subtree.
    Bin(Rc<BinNode<A>>),
}

/// The contents of a non-empty [`TipBinTree`] node.
#[derive(Clone, PartialEq, Eq)]
pub struct BinNode<A> {
    /// Left subtree.
    pub left: TipBinTree<A>,
    /// The node's payload.
    pub payload: A,
    /// Right subtree.
    pub right: TipBinTree<A>,
}

impl<A> TipBinTree<A> {
    /// The empty tree.
    #[inline]
    pub fn tip() -> Self {
        TipBinTree::Tip
    }

    /// A node with the given subtrees and payload.
    pub fn bin(left: Self, payload: A, right: Self) -> Self {
        TipBinTree::Bin(Rc::new(BinNode {
            left,
            payload,
            right,
        }))
    }

    /// A node with two empty subtrees.
    pub fn leaf(payload: A) -> Self {
        Self::bin(TipBinTree::Tip, payload, TipBinTree::Tip)
    }

    /// Is this the empty tree?
    #[inline]
    pub fn is_tip(&self) -> bool {
        matches!(self, TipBinTree::Tip)
    }

    /// The node contents, or `None` for the empty tree.
    pub fn as_bin(&self) -> Option<&BinNode<A>> {
        match self {
            TipBinTree::Tip => None,
            TipBinTree::Bin(n) => Some(n),
        }
    }

    /// Number of payloads in the tree.
    ///
    /// O(n) time.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Iterate over payloads in pre-order: a node's payload first, then
    /// its left subtree, then its right subtree.
    pub fn iter(&self) -> TreeIter<'_, A> {
        let mut stack = Vec::new();
        if let TipBinTree::Bin(n) = self {
            stack.push(&**n);
        }
        TreeIter { stack }
    }
}

/// Pre-order iterator over a [`TipBinTree`].
pub struct TreeIter<'a, A> {
    stack: Vec<&'a BinNode<A>>,
}

impl<'a, A> Iterator for TreeIter<'a, A> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        if let TipBinTree::Bin(r) = &n.right {
            self.stack.push(r);
        }
        if let TipBinTree::Bin(l) = &n.left {
            self.stack.push(l);
        }
        Some(&n.payload)
    }
}

impl<A: fmt::Debug> fmt::Debug for TipBinTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipBinTree::Tip => write!(f, "Tip"),
            TipBinTree::Bin(n) => {
                write!(f, "Bin({:?}, {:?}, {:?})", n.left, n.payload, n.right)
            }
        }
    }
}

/// One level of a zipper trail: the payload of the parent, which side
/// the focus descended to, and the sibling subtree left behind.
#[derive(Clone)]
struct Step<A> {
    payload: A,
    from_right: bool,
    sibling: TipBinTree<A>,
}

/// A cursor over a [`TipBinTree`].
///
/// The trail is a complete, losslessly invertible record of the path
/// from the root to the focus: [`Zipper::reconstruct`] rebuilds exactly
/// the tree the moves descended through, with the current focus spliced
/// in place of the subtree originally focused.
#[derive(Clone)]
pub struct Zipper<A> {
    focus: TipBinTree<A>,
    trail: SmallVec<[Step<A>; 8]>,
}

impl<A: Clone> Zipper<A> {
    /// A cursor focused on the root of `tree`.
    pub fn new(tree: TipBinTree<A>) -> Self {
        Zipper {
            focus: tree,
            trail: SmallVec::new(),
        }
    }

    /// The subtree currently under the cursor.
    pub fn focus(&self) -> &TipBinTree<A> {
        &self.focus
    }

    /// How many levels below the root the cursor sits.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Replace the focused subtree, leaving the trail untouched.
    pub fn set(&mut self, tree: TipBinTree<A>) {
        self.focus = tree;
    }

    /// Descend into the left subtree. Returns `false` without moving if
    /// the focus is empty.
    pub fn move_left(&mut self) -> bool {
        self.descend(false)
    }

    /// Descend into the right subtree. Returns `false` without moving if
    /// the focus is empty.
    pub fn move_right(&mut self) -> bool {
        self.descend(true)
    }

    fn descend(&mut self, to_right: bool) -> bool {
        let bin = match &self.focus {
            TipBinTree::Tip => return false,
            TipBinTree::Bin(n) => Rc::clone(n),
        };
        let (next, sibling) = if to_right {
            (bin.right.clone(), bin.left.clone())
        } else {
            (bin.left.clone(), bin.right.clone())
        };
        self.trail.push(Step {
            payload: bin.payload.clone(),
            from_right: to_right,
            sibling,
        });
        self.focus = next;
        true
    }

    /// Ascend one level, rebuilding the parent node around the focus.
    /// Returns `false` without moving if the cursor is at the root.
    pub fn move_back(&mut self) -> bool {
        let step = match self.trail.pop() {
            None => return false,
            Some(step) => step,
        };
        let focus = std::mem::replace(&mut self.focus, TipBinTree::Tip);
        self.focus = if step.from_right {
            TipBinTree::bin(step.sibling, step.payload, focus)
        } else {
            TipBinTree::bin(focus, step.payload, step.sibling)
        };
        true
    }

    /// Ascend all the way to the root and return the rebuilt tree.
    pub fn reconstruct(mut self) -> TipBinTree<A> {
        while self.move_back() {}
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn sample() -> TipBinTree<i32> {
        // 2 over (1, 3), with a 4 hanging right of 3
        TipBinTree::bin(
            TipBinTree::leaf(1),
            2,
            TipBinTree::bin(TipBinTree::Tip, 3, TipBinTree::leaf(4)),
        )
    }

    /// Balanced-ish tree from a slice, middle element at the root.
    fn build(xs: &[u32]) -> TipBinTree<u32> {
        if xs.is_empty() {
            return TipBinTree::Tip;
        }
        let mid = xs.len() / 2;
        TipBinTree::bin(build(&xs[..mid]), xs[mid], build(&xs[mid + 1..]))
    }

    #[test]
    fn leaf_shape() {
        let t = TipBinTree::leaf(7);
        let n = t.as_bin().unwrap();
        assert!(n.left.is_tip());
        assert!(n.right.is_tip());
        assert_eq!(n.payload, 7);
    }

    #[test]
    fn iter_is_preorder() {
        let got: Vec<i32> = sample().iter().copied().collect();
        assert_eq!(got, vec![2, 1, 3, 4]);
        assert_eq!(sample().size(), 4);
    }

    #[test]
    fn debug_renders_structure() {
        let t = TipBinTree::bin(TipBinTree::leaf(1), 2, TipBinTree::Tip);
        assert_eq!(format!("{:?}", t), "Bin(Bin(Tip, 1, Tip), 2, Tip)");
    }

    #[test]
    fn moves_fail_on_tip() {
        let mut z: Zipper<i32> = Zipper::new(TipBinTree::Tip);
        assert!(!z.move_left());
        assert!(!z.move_right());
        assert!(!z.move_back());
        assert_eq!(z.depth(), 0);
    }

    #[test]
    fn move_back_rebuilds_parent() {
        let mut z = Zipper::new(sample());
        assert!(z.move_right());
        assert!(z.move_right());
        assert_eq!(z.depth(), 2);
        assert!(z.move_back());
        assert_eq!(z.depth(), 1);
        assert_eq!(
            z.focus(),
            &TipBinTree::bin(TipBinTree::Tip, 3, TipBinTree::leaf(4))
        );
    }

    #[test]
    fn reconstruct_round_trips() {
        let t = sample();
        let mut z = Zipper::new(t.clone());
        z.move_right();
        z.move_left();
        assert_eq!(z.reconstruct(), t);
    }

    #[test]
    fn set_then_reconstruct_edits_path_only() {
        let t = sample();
        let mut z = Zipper::new(t.clone());
        assert!(z.move_left());
        z.set(TipBinTree::leaf(9));
        let edited = z.reconstruct();

        assert_eq!(
            edited,
            TipBinTree::bin(
                TipBinTree::leaf(9),
                2,
                TipBinTree::bin(TipBinTree::Tip, 3, TipBinTree::leaf(4)),
            )
        );
        // the untouched right subtree is shared, not copied
        let orig_right = match t.as_bin().unwrap().right.clone() {
            TipBinTree::Bin(n) => n,
            TipBinTree::Tip => unreachable!(),
        };
        let edited_right = match edited.as_bin().unwrap().right.clone() {
            TipBinTree::Bin(n) => n,
            TipBinTree::Tip => unreachable!(),
        };
        assert!(Rc::ptr_eq(&orig_right, &edited_right));
    }

    quickcheck! {
        fn qc_reconstruct_is_identity(xs: Vec<u32>, dirs: Vec<bool>) -> bool {
            let t = build(&xs);
            let mut z = Zipper::new(t.clone());
            for &d in &dirs {
                if d { z.move_right(); } else { z.move_left(); }
            }
            z.reconstruct() == t
        }

        fn qc_move_back_inverts_one_move(xs: Vec<u32>, right: bool) -> bool {
            let t = build(&xs);
            let mut z = Zipper::new(t.clone());
            let moved = if right { z.move_right() } else { z.move_left() };
            if moved {
                z.move_back();
            }
            *z.focus() == t
        }
    }
}
