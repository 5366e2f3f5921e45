//! Red-black trees with cursor-driven insertion
//!
//! A persistent red-black tree whose insertion runs in two explicit
//! phases rather than by recursive rebuilding: a descent that records a
//! path of steps (parent color, payload, direction taken, and the
//! sibling subtree left behind — the same trail idea as
//! [`Zipper`](crate::Zipper)), and a bottom-up fixup that walks the
//! recorded path rewriting colors and local shapes until the red-red
//! violation introduced at the leaf is resolved.
//!
//! Equal elements (as judged by the comparator) descend left, so the
//! tree admits duplicates; it is a multiset, not a set.
//!
//! # Example
//!
//! ```
//! use ordtree::RbTree;
//!
//! let t = RbTree::empty().insert(2).insert(1).insert(3);
//! assert!(t.member(&1));
//! assert_eq!(t.to_list(), vec![1, 2, 3]);
//! ```

use std::cmp::Ordering;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::check::InvariantError;
use crate::order::{Comparator, Natural};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Dir {
    Left,
    Right,
}

type RbLink<A> = Option<Rc<RbNode<A>>>;

struct RbNode<A> {
    color: Color,
    item: A,
    left: RbLink<A>,
    right: RbLink<A>,
}

/// One level of the recorded descent: the color and payload of the
/// parent, which side the descent took, and the sibling not taken.
struct PathStep<A> {
    color: Color,
    item: A,
    dir: Dir,
    sibling: RbLink<A>,
}

fn mk<A>(color: Color, item: A, left: RbLink<A>, right: RbLink<A>) -> Rc<RbNode<A>> {
    Rc::new(RbNode {
        color,
        item,
        left,
        right,
    })
}

/// An absent node counts as black.
fn color_of<A>(t: &RbLink<A>) -> Color {
    t.as_ref().map_or(Color::Black, |n| n.color)
}

fn set_black<A: Clone>(t: &RbLink<A>) -> RbLink<A> {
    match t {
        Some(n) if n.color == Color::Red => Some(mk(
            Color::Black,
            n.item.clone(),
            n.left.clone(),
            n.right.clone(),
        )),
        other => other.clone(),
    }
}

/// A persistent red-black tree ordered by the comparator `C`.
///
/// All edits return a new tree and leave the receiver untouched.
pub struct RbTree<A, C = Natural> {
    cmp: C,
    root: RbLink<A>,
}

impl<A, C: Clone> Clone for RbTree<A, C> {
    fn clone(&self) -> Self {
        RbTree {
            cmp: self.cmp.clone(),
            root: self.root.clone(),
        }
    }
}

impl<A: Ord> RbTree<A> {
    /// Create an empty tree over the element type's natural order.
    #[inline]
    pub fn empty() -> Self {
        RbTree {
            cmp: Natural,
            root: None,
        }
    }
}

impl<A: Ord + Clone> RbTree<A> {
    /// Create a tree from a list of elements.
    ///
    /// O(n log n) time.
    pub fn from_list(xs: impl IntoIterator<Item = A>) -> Self {
        let mut t = RbTree::empty();
        for x in xs {
            t = t.insert(x);
        }
        t
    }
}

impl<A, C> RbTree<A, C> {
    /// Check if the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of elements in the tree.
    ///
    /// O(n) time.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Iterate over elements in ascending order.
    pub fn iter(&self) -> RbIter<'_, A> {
        let mut iter = RbIter { stack: Vec::new() };
        iter.push_left(&self.root);
        iter
    }

    /// Convert to a list of elements in ascending order.
    ///
    /// O(n) time.
    pub fn to_list(&self) -> Vec<A>
    where
        A: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<A, C: Comparator<A>> RbTree<A, C> {
    /// Create an empty tree ordered by `cmp`.
    #[inline]
    pub fn empty_with(cmp: C) -> Self {
        RbTree { cmp, root: None }
    }

    /// Check if an element is in the tree.
    ///
    /// O(log n) time.
    pub fn member(&self, x: &A) -> bool {
        let mut current = &self.root;
        while let Some(n) = current {
            match self.cmp.compare(x, &n.item) {
                Ordering::Less => current = &n.left,
                Ordering::Greater => current = &n.right,
                Ordering::Equal => return true,
            }
        }
        false
    }

    /// Insert an element. Equal elements are kept; the new one lands to
    /// the left of those already present.
    ///
    /// O(log n) time.
    pub fn insert(&self, item: A) -> Self
    where
        A: Clone,
        C: Clone,
    {
        // Phase one: descend to an empty slot, recording the path.
        let mut path: SmallVec<[PathStep<A>; 16]> = SmallVec::new();
        let mut current = self.root.clone();
        while let Some(n) = current {
            if self.cmp.compare(&item, &n.item) == Ordering::Greater {
                path.push(PathStep {
                    color: n.color,
                    item: n.item.clone(),
                    dir: Dir::Right,
                    sibling: n.left.clone(),
                });
                current = n.right.clone();
            } else {
                path.push(PathStep {
                    color: n.color,
                    item: n.item.clone(),
                    dir: Dir::Left,
                    sibling: n.right.clone(),
                });
                current = n.left.clone();
            }
        }
        let mut focus = mk(Color::Red, item, None, None);

        // Phase two: walk back up resolving red-red violations.
        loop {
            let depth = path.len();
            if focus.color != Color::Red
                || depth < 2
                || path[depth - 1].color != Color::Red
                || path[depth - 2].color != Color::Black
            {
                break;
            }
            let parent = path.pop().unwrap();
            let grand = path.pop().unwrap();
            if color_of(&grand.sibling) == Color::Red {
                // Red uncle: push the blackness one level down and carry
                // the red grandparent upward; the violation may recur
                // there.
                let new_parent = match parent.dir {
                    Dir::Left => mk(Color::Black, parent.item, Some(focus), parent.sibling),
                    Dir::Right => mk(Color::Black, parent.item, parent.sibling, Some(focus)),
                };
                let new_uncle = set_black(&grand.sibling);
                focus = match grand.dir {
                    Dir::Left => mk(Color::Red, grand.item, Some(new_parent), new_uncle),
                    Dir::Right => mk(Color::Red, grand.item, new_uncle, Some(new_parent)),
                };
            } else {
                // Black uncle: one or two local rotations settle the
                // subtree under a black root, and nothing above can be
                // violated any further.
                focus = rotate_fixup(focus, parent, grand);
                break;
            }
        }

        // Rebuild the untouched remainder of the path and pin the root
        // black.
        let mut root = Some(focus);
        while let Some(step) = path.pop() {
            root = Some(match step.dir {
                Dir::Left => mk(step.color, step.item, root, step.sibling),
                Dir::Right => mk(step.color, step.item, step.sibling, root),
            });
        }
        RbTree {
            cmp: self.cmp.clone(),
            root: set_black(&root),
        }
    }

    /// Re-derive the red-black invariants (black root, no red-red edge,
    /// equal black count on every path, ordered traversal) and report
    /// the first violation.
    ///
    /// O(n) time.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if color_of(&self.root) == Color::Red {
            return Err(InvariantError::RedRoot);
        }
        let cmp = &self.cmp;
        check_node(&|a: &A, b: &A| cmp.compare(a, b), &self.root, None, None).map(|_| ())
    }
}

/// Resolve a red focus under a red parent and black grandparent with a
/// black uncle. Returns the black-rooted replacement for the
/// grandparent's subtree; parent/child direction agreement picks between
/// the single- and double-rotation shapes.
fn rotate_fixup<A: Clone>(
    focus: Rc<RbNode<A>>,
    parent: PathStep<A>,
    grand: PathStep<A>,
) -> Rc<RbNode<A>> {
    match (grand.dir, parent.dir) {
        (Dir::Left, Dir::Left) => {
            let g = mk(Color::Red, grand.item, parent.sibling, grand.sibling);
            mk(Color::Black, parent.item, Some(focus), Some(g))
        }
        (Dir::Left, Dir::Right) => {
            let p = mk(Color::Red, parent.item, parent.sibling, focus.left.clone());
            let g = mk(Color::Red, grand.item, focus.right.clone(), grand.sibling);
            mk(Color::Black, focus.item.clone(), Some(p), Some(g))
        }
        (Dir::Right, Dir::Right) => {
            let g = mk(Color::Red, grand.item, grand.sibling, parent.sibling);
            mk(Color::Black, parent.item, Some(g), Some(focus))
        }
        (Dir::Right, Dir::Left) => {
            let g = mk(Color::Red, grand.item, grand.sibling, focus.left.clone());
            let p = mk(Color::Red, parent.item, focus.right.clone(), parent.sibling);
            mk(Color::Black, focus.item.clone(), Some(g), Some(p))
        }
    }
}

/// Returns the black height; `None` links count one.
fn check_node<'a, A, F>(
    cmp: &F,
    t: &'a RbLink<A>,
    lo: Option<&'a A>,
    hi: Option<&'a A>,
) -> Result<usize, InvariantError>
where
    F: Fn(&A, &A) -> Ordering,
{
    let n = match t {
        None => return Ok(1),
        Some(n) => n,
    };
    if n.color == Color::Red
        && (color_of(&n.left) == Color::Red || color_of(&n.right) == Color::Red)
    {
        return Err(InvariantError::RedRed);
    }
    // duplicates descend left, so the order is non-decreasing
    if let Some(lo) = lo {
        if cmp(&n.item, lo) == Ordering::Less {
            return Err(InvariantError::OutOfOrder);
        }
    }
    if let Some(hi) = hi {
        if cmp(&n.item, hi) == Ordering::Greater {
            return Err(InvariantError::OutOfOrder);
        }
    }
    let left = check_node(cmp, &n.left, lo, Some(&n.item))?;
    let right = check_node(cmp, &n.right, Some(&n.item), hi)?;
    if left != right {
        return Err(InvariantError::BlackHeightMismatch { left, right });
    }
    Ok(left + usize::from(n.color == Color::Black))
}

/// Iterator over an [`RbTree`] in ascending order.
pub struct RbIter<'a, A> {
    stack: Vec<&'a RbNode<A>>,
}

impl<'a, A> RbIter<'a, A> {
    fn push_left(&mut self, mut t: &'a RbLink<A>) {
        while let Some(n) = t {
            self.stack.push(n);
            t = &n.left;
        }
    }
}

impl<'a, A> Iterator for RbIter<'a, A> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left(&n.right);
        Some(&n.item)
    }
}

impl<A: std::fmt::Debug, C> std::fmt::Debug for RbTree<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
