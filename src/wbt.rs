//! Weight-balanced tree core.
//!
//! The node shape and the rebalancing machinery shared by `Map` and
//! `Set`. Nodes are immutable once built and shared through `Rc`; every
//! structural edit returns a fresh root while reusing the subtrees off
//! the edited path.
//!
//! The core is payload-generic. Search-shaped operations take a probe
//! closure `Fn(&A) -> Ordering` — the partially-applied comparison of
//! the sought key against a stored payload — so the same machinery
//! serves pair payloads (maps) and bare payloads (sets). Operations that
//! relate two trees take a full two-argument comparison instead.
//!
//! Balance parameters follow Hirai & Yamamoto, "Balancing
//! weight-balanced trees" (JFP 2011): with weights counted as
//! `size + 1`, `<DELTA, GAMMA> = <3, 2>` is the feasible pair, and
//! every predicate below is stated in that weight form.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::check::InvariantError;

pub(crate) const DELTA: usize = 3;
pub(crate) const GAMMA: usize = 2;

pub(crate) type Link<A> = Option<Rc<Node<A>>>;

pub(crate) struct Node<A> {
    pub(crate) size: usize,
    pub(crate) item: A,
    pub(crate) left: Link<A>,
    pub(crate) right: Link<A>,
}

pub(crate) fn size<A>(t: &Link<A>) -> usize {
    t.as_ref().map_or(0, |n| n.size)
}

fn bin<A>(item: A, left: Link<A>, right: Link<A>) -> Rc<Node<A>> {
    let size = 1 + size(&left) + size(&right);
    Rc::new(Node {
        size,
        item,
        left,
        right,
    })
}

pub(crate) fn singleton<A>(item: A) -> Rc<Node<A>> {
    Rc::new(Node {
        size: 1,
        item,
        left: None,
        right: None,
    })
}

// ------------------------------------------------------------------
// Balancing
// ------------------------------------------------------------------

/// May `l` and `r` be siblings? Weight form: `DELTA·w(l) >= w(r)`.
fn is_balanced<A>(l: &Link<A>, r: &Link<A>) -> bool {
    DELTA * (size(l) + 1) >= size(r) + 1
}

/// Does a single rotation suffice for a heavy child whose children are
/// `inner` (toward the old root) and `outer`?
fn is_single<A>(inner: &Link<A>, outer: &Link<A>) -> bool {
    size(inner) + 1 < GAMMA * (size(outer) + 1)
}

/// The sole entry point for rebuilding a node after a structural edit.
///
/// Precondition: `left` and `right` were siblings of a balanced node and
/// one of them has since gained or lost at most one element.
pub(crate) fn balance<A: Clone>(item: A, left: Link<A>, right: Link<A>) -> Rc<Node<A>> {
    let ls = size(&left);
    let rs = size(&right);

    if ls + rs <= 1 {
        bin(item, left, right)
    } else if !is_balanced(&left, &right) {
        rotate_left(item, left, right.unwrap())
    } else if !is_balanced(&right, &left) {
        rotate_right(item, left.unwrap(), right)
    } else {
        bin(item, left, right)
    }
}

fn rotate_left<A: Clone>(item: A, left: Link<A>, right: Rc<Node<A>>) -> Rc<Node<A>> {
    if is_single(&right.left, &right.right) {
        single_left(item, left, right)
    } else {
        double_left(item, left, right)
    }
}

fn rotate_right<A: Clone>(item: A, left: Rc<Node<A>>, right: Link<A>) -> Rc<Node<A>> {
    if is_single(&left.right, &left.left) {
        single_right(item, left, right)
    } else {
        double_right(item, left, right)
    }
}

fn single_left<A: Clone>(item: A, left: Link<A>, right: Rc<Node<A>>) -> Rc<Node<A>> {
    let new_left = bin(item, left, right.left.clone());
    bin(right.item.clone(), Some(new_left), right.right.clone())
}

fn single_right<A: Clone>(item: A, left: Rc<Node<A>>, right: Link<A>) -> Rc<Node<A>> {
    let new_right = bin(item, left.right.clone(), right);
    bin(left.item.clone(), left.left.clone(), Some(new_right))
}

fn double_left<A: Clone>(item: A, left: Link<A>, right: Rc<Node<A>>) -> Rc<Node<A>> {
    match &right.left {
        Some(rl) => {
            let new_left = bin(item, left, rl.left.clone());
            let new_right = bin(right.item.clone(), rl.right.clone(), right.right.clone());
            bin(rl.item.clone(), Some(new_left), Some(new_right))
        }
        None => single_left(item, left, right),
    }
}

fn double_right<A: Clone>(item: A, left: Rc<Node<A>>, right: Link<A>) -> Rc<Node<A>> {
    match &left.right {
        Some(lr) => {
            let new_left = bin(left.item.clone(), left.left.clone(), lr.left.clone());
            let new_right = bin(item, lr.right.clone(), right);
            bin(lr.item.clone(), Some(new_left), Some(new_right))
        }
        None => single_right(item, left, right),
    }
}

// ------------------------------------------------------------------
// Search-shaped edits
// ------------------------------------------------------------------

pub(crate) fn lookup<'a, A, F>(probe: &F, t: &'a Link<A>) -> Option<&'a A>
where
    F: Fn(&A) -> Ordering,
{
    let mut current = t;
    while let Some(n) = current {
        match probe(&n.item) {
            Ordering::Less => current = &n.left,
            Ordering::Greater => current = &n.right,
            Ordering::Equal => return Some(&n.item),
        }
    }
    None
}

pub(crate) fn insert<A, F>(probe: &F, item: A, t: &Link<A>) -> Rc<Node<A>>
where
    A: Clone,
    F: Fn(&A) -> Ordering,
{
    match t {
        None => singleton(item),
        Some(n) => match probe(&n.item) {
            Ordering::Less => balance(
                n.item.clone(),
                Some(insert(probe, item, &n.left)),
                n.right.clone(),
            ),
            Ordering::Greater => balance(
                n.item.clone(),
                n.left.clone(),
                Some(insert(probe, item, &n.right)),
            ),
            // replace in place; the shape and size are unchanged
            Ordering::Equal => Rc::new(Node {
                size: n.size,
                item,
                left: n.left.clone(),
                right: n.right.clone(),
            }),
        },
    }
}

pub(crate) fn delete<A, F>(probe: &F, t: &Link<A>) -> Link<A>
where
    A: Clone,
    F: Fn(&A) -> Ordering,
{
    match t {
        None => None,
        Some(n) => match probe(&n.item) {
            Ordering::Less => Some(balance(
                n.item.clone(),
                delete(probe, &n.left),
                n.right.clone(),
            )),
            Ordering::Greater => Some(balance(
                n.item.clone(),
                n.left.clone(),
                delete(probe, &n.right),
            )),
            Ordering::Equal => glue(&n.left, &n.right),
        },
    }
}

/// The universal update: look up the probed position, transform the
/// optional payload found there, and insert/replace/delete accordingly,
/// all in one pass.
pub(crate) fn alter<A, F, G>(probe: &F, g: G, t: &Link<A>) -> Link<A>
where
    A: Clone,
    F: Fn(&A) -> Ordering,
    G: FnOnce(Option<&A>) -> Option<A>,
{
    match t {
        None => g(None).map(singleton),
        Some(n) => match probe(&n.item) {
            Ordering::Less => Some(balance(
                n.item.clone(),
                alter(probe, g, &n.left),
                n.right.clone(),
            )),
            Ordering::Greater => Some(balance(
                n.item.clone(),
                n.left.clone(),
                alter(probe, g, &n.right),
            )),
            Ordering::Equal => match g(Some(&n.item)) {
                Some(item) => Some(Rc::new(Node {
                    size: n.size,
                    item,
                    left: n.left.clone(),
                    right: n.right.clone(),
                })),
                None => glue(&n.left, &n.right),
            },
        },
    }
}

// ------------------------------------------------------------------
// Extremal extraction and glue
// ------------------------------------------------------------------

/// Remove and return the least payload. Panics on an empty tree: calling
/// this without a known-nonempty tree is a caller bug, not a recoverable
/// condition.
pub(crate) fn delete_find_min<A: Clone>(t: &Link<A>) -> (A, Link<A>) {
    match t {
        None => panic!("delete_find_min: no minimum in an empty tree"),
        Some(n) => match &n.left {
            None => (n.item.clone(), n.right.clone()),
            Some(_) => {
                let (min, rest) = delete_find_min(&n.left);
                (min, Some(balance(n.item.clone(), rest, n.right.clone())))
            }
        },
    }
}

/// Remove and return the greatest payload. Panics on an empty tree.
pub(crate) fn delete_find_max<A: Clone>(t: &Link<A>) -> (A, Link<A>) {
    match t {
        None => panic!("delete_find_max: no maximum in an empty tree"),
        Some(n) => match &n.right {
            None => (n.item.clone(), n.left.clone()),
            Some(_) => {
                let (max, rest) = delete_find_max(&n.right);
                (max, Some(balance(n.item.clone(), n.left.clone(), rest)))
            }
        },
    }
}

/// Merge the two subtrees left behind by a removed node. All of `left`
/// precedes all of `right`, and the two are balanced against each other.
/// The replacement root is pulled from the larger side.
pub(crate) fn glue<A: Clone>(left: &Link<A>, right: &Link<A>) -> Link<A> {
    match (left, right) {
        (None, r) => r.clone(),
        (l, None) => l.clone(),
        (Some(ln), Some(rn)) => {
            if ln.size > rn.size {
                let (item, rest) = delete_find_max(left);
                Some(balance(item, rest, right.clone()))
            } else {
                let (item, rest) = delete_find_min(right);
                Some(balance(item, left.clone(), rest))
            }
        }
    }
}

// ------------------------------------------------------------------
// Concatenation: join/merge, and the split/union family on top
// ------------------------------------------------------------------

/// Concatenate `l`, `item`, `r` (in order) into one balanced tree. The
/// sides may differ in size arbitrarily; the smaller is sunk into the
/// spine of the larger until the weights meet.
pub(crate) fn join<A: Clone>(item: A, l: &Link<A>, r: &Link<A>) -> Rc<Node<A>> {
    match (l, r) {
        (None, None) => singleton(item),
        (None, Some(rn)) => insert_min(item, rn),
        (Some(ln), None) => insert_max(item, ln),
        (Some(ln), Some(rn)) => {
            if !is_balanced(l, r) {
                balance(rn.item.clone(), Some(join(item, l, &rn.left)), rn.right.clone())
            } else if !is_balanced(r, l) {
                balance(ln.item.clone(), ln.left.clone(), Some(join(item, &ln.right, r)))
            } else {
                bin(item, l.clone(), r.clone())
            }
        }
    }
}

fn insert_min<A: Clone>(item: A, n: &Rc<Node<A>>) -> Rc<Node<A>> {
    match &n.left {
        None => bin(n.item.clone(), Some(singleton(item)), n.right.clone()),
        Some(ln) => balance(
            n.item.clone(),
            Some(insert_min(item, ln)),
            n.right.clone(),
        ),
    }
}

fn insert_max<A: Clone>(item: A, n: &Rc<Node<A>>) -> Rc<Node<A>> {
    match &n.right {
        None => bin(n.item.clone(), n.left.clone(), Some(singleton(item))),
        Some(rn) => balance(
            n.item.clone(),
            n.left.clone(),
            Some(insert_max(item, rn)),
        ),
    }
}

/// Concatenate two mutually-ordered trees of arbitrary relative size.
/// Like [`join`] without a middle payload.
pub(crate) fn merge<A: Clone>(l: &Link<A>, r: &Link<A>) -> Link<A> {
    match (l, r) {
        (None, _) => r.clone(),
        (_, None) => l.clone(),
        (Some(ln), Some(rn)) => {
            if !is_balanced(l, r) {
                Some(balance(rn.item.clone(), merge(l, &rn.left), rn.right.clone()))
            } else if !is_balanced(r, l) {
                Some(balance(ln.item.clone(), ln.left.clone(), merge(&ln.right, r)))
            } else {
                glue(l, r)
            }
        }
    }
}

pub(crate) fn split<A, F>(probe: &F, t: &Link<A>) -> (Link<A>, Link<A>)
where
    A: Clone,
    F: Fn(&A) -> Ordering,
{
    match t {
        None => (None, None),
        Some(n) => match probe(&n.item) {
            Ordering::Less => {
                let (lt, gt) = split(probe, &n.left);
                (lt, Some(join(n.item.clone(), &gt, &n.right)))
            }
            Ordering::Greater => {
                let (lt, gt) = split(probe, &n.right);
                (Some(join(n.item.clone(), &n.left, &lt)), gt)
            }
            Ordering::Equal => (n.left.clone(), n.right.clone()),
        },
    }
}

pub(crate) fn split_lookup<A, F>(probe: &F, t: &Link<A>) -> (Link<A>, Option<A>, Link<A>)
where
    A: Clone,
    F: Fn(&A) -> Ordering,
{
    match t {
        None => (None, None, None),
        Some(n) => match probe(&n.item) {
            Ordering::Less => {
                let (lt, found, gt) = split_lookup(probe, &n.left);
                (lt, found, Some(join(n.item.clone(), &gt, &n.right)))
            }
            Ordering::Greater => {
                let (lt, found, gt) = split_lookup(probe, &n.right);
                (Some(join(n.item.clone(), &n.left, &lt)), found, gt)
            }
            Ordering::Equal => (n.left.clone(), Some(n.item.clone()), n.right.clone()),
        },
    }
}

/// Left-biased union: where both trees hold an equal payload, the one
/// from `t1` survives.
pub(crate) fn union<A, F>(cmp: &F, t1: &Link<A>, t2: &Link<A>) -> Link<A>
where
    A: Clone,
    F: Fn(&A, &A) -> Ordering,
{
    match (t1, t2) {
        (None, _) => t2.clone(),
        (_, None) => t1.clone(),
        (Some(n1), Some(_)) => {
            let (lt, gt) = split(&|x: &A| cmp(&n1.item, x), t2);
            let left = union(cmp, &n1.left, &lt);
            let right = union(cmp, &n1.right, &gt);
            Some(join(n1.item.clone(), &left, &right))
        }
    }
}

pub(crate) fn intersection<A, F>(cmp: &F, t1: &Link<A>, t2: &Link<A>) -> Link<A>
where
    A: Clone,
    F: Fn(&A, &A) -> Ordering,
{
    match (t1, t2) {
        (None, _) | (_, None) => None,
        (Some(n1), Some(_)) => {
            let (lt, found, gt) = split_lookup(&|x: &A| cmp(&n1.item, x), t2);
            let left = intersection(cmp, &n1.left, &lt);
            let right = intersection(cmp, &n1.right, &gt);
            match found {
                Some(_) => Some(join(n1.item.clone(), &left, &right)),
                None => merge(&left, &right),
            }
        }
    }
}

pub(crate) fn difference<A, F>(cmp: &F, t1: &Link<A>, t2: &Link<A>) -> Link<A>
where
    A: Clone,
    F: Fn(&A, &A) -> Ordering,
{
    match (t1, t2) {
        (None, _) => None,
        (_, None) => t1.clone(),
        (Some(n1), Some(_)) => {
            let (lt, found, gt) = split_lookup(&|x: &A| cmp(&n1.item, x), t2);
            let left = difference(cmp, &n1.left, &lt);
            let right = difference(cmp, &n1.right, &gt);
            match found {
                Some(_) => merge(&left, &right),
                None => Some(join(n1.item.clone(), &left, &right)),
            }
        }
    }
}

// ------------------------------------------------------------------
// Whole-tree walks
// ------------------------------------------------------------------

pub(crate) fn filter<A, F>(keep: &F, t: &Link<A>) -> Link<A>
where
    A: Clone,
    F: Fn(&A) -> bool,
{
    match t {
        None => None,
        Some(n) => {
            let left = filter(keep, &n.left);
            let right = filter(keep, &n.right);
            if keep(&n.item) {
                Some(join(n.item.clone(), &left, &right))
            } else {
                merge(&left, &right)
            }
        }
    }
}

pub(crate) fn partition<A, F>(pred: &F, t: &Link<A>) -> (Link<A>, Link<A>)
where
    A: Clone,
    F: Fn(&A) -> bool,
{
    match t {
        None => (None, None),
        Some(n) => {
            let (l_in, l_out) = partition(pred, &n.left);
            let (r_in, r_out) = partition(pred, &n.right);
            if pred(&n.item) {
                (Some(join(n.item.clone(), &l_in, &r_in)), merge(&l_out, &r_out))
            } else {
                (merge(&l_in, &r_in), Some(join(n.item.clone(), &l_out, &r_out)))
            }
        }
    }
}

/// Rebuild the tree with every payload transformed, preserving shape
/// and sizes. Only valid for transforms that keep the ordering intact,
/// which the map façade guarantees by leaving keys untouched.
pub(crate) fn map_items<A, B, F>(f: &F, t: &Link<A>) -> Link<B>
where
    F: Fn(&A) -> B,
{
    t.as_ref().map(|n| {
        Rc::new(Node {
            size: n.size,
            item: f(&n.item),
            left: map_items(f, &n.left),
            right: map_items(f, &n.right),
        })
    })
}

pub(crate) fn foldr<A, B, F>(t: &Link<A>, f: &F, init: B) -> B
where
    F: Fn(&A, B) -> B,
{
    match t {
        None => init,
        Some(n) => {
            let acc = foldr(&n.right, f, init);
            let acc = f(&n.item, acc);
            foldr(&n.left, f, acc)
        }
    }
}

pub(crate) fn foldl<A, B, F>(t: &Link<A>, f: &F, init: B) -> B
where
    F: Fn(B, &A) -> B,
{
    match t {
        None => init,
        Some(n) => {
            let acc = foldl(&n.left, f, init);
            let acc = f(acc, &n.item);
            foldl(&n.right, f, acc)
        }
    }
}

pub(crate) fn min<A>(t: &Link<A>) -> Option<&A> {
    let n = t.as_ref()?;
    match &n.left {
        None => Some(&n.item),
        Some(_) => min(&n.left),
    }
}

pub(crate) fn max<A>(t: &Link<A>) -> Option<&A> {
    let n = t.as_ref()?;
    match &n.right {
        None => Some(&n.item),
        Some(_) => max(&n.right),
    }
}

pub(crate) fn to_vec<A: Clone>(t: &Link<A>, out: &mut Vec<A>) {
    if let Some(n) = t {
        to_vec(&n.left, out);
        out.push(n.item.clone());
        to_vec(&n.right, out);
    }
}

pub(crate) fn height<A>(t: &Link<A>) -> usize {
    match t {
        None => 0,
        Some(n) => 1 + height(&n.left).max(height(&n.right)),
    }
}

// ------------------------------------------------------------------
// Validation
// ------------------------------------------------------------------

/// Re-derive sizes, balance, and strict ordering over the whole tree.
pub(crate) fn check<A, F>(cmp: &F, t: &Link<A>) -> Result<(), InvariantError>
where
    F: Fn(&A, &A) -> Ordering,
{
    check_node(cmp, t, None, None).map(|_| ())
}

fn check_node<'a, A, F>(
    cmp: &F,
    t: &'a Link<A>,
    lo: Option<&'a A>,
    hi: Option<&'a A>,
) -> Result<usize, InvariantError>
where
    F: Fn(&A, &A) -> Ordering,
{
    let n = match t {
        None => return Ok(0),
        Some(n) => n,
    };
    if let Some(lo) = lo {
        if cmp(lo, &n.item) != Ordering::Less {
            return Err(InvariantError::OutOfOrder);
        }
    }
    if let Some(hi) = hi {
        if cmp(&n.item, hi) != Ordering::Less {
            return Err(InvariantError::OutOfOrder);
        }
    }
    let ls = check_node(cmp, &n.left, lo, Some(&n.item))?;
    let rs = check_node(cmp, &n.right, Some(&n.item), hi)?;
    if n.size != 1 + ls + rs {
        return Err(InvariantError::SizeMismatch {
            expected: 1 + ls + rs,
            found: n.size,
        });
    }
    if DELTA * (ls + 1) < rs + 1 || DELTA * (rs + 1) < ls + 1 {
        return Err(InvariantError::WeightImbalance { left: ls, right: rs });
    }
    Ok(n.size)
}

// ------------------------------------------------------------------
// Iteration
// ------------------------------------------------------------------

/// In-order iterator over payload references, driven by an explicit
/// left-spine stack.
pub(crate) struct Iter<'a, A> {
    stack: Vec<&'a Node<A>>,
}

impl<'a, A> Iter<'a, A> {
    pub(crate) fn new(t: &'a Link<A>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(t);
        iter
    }

    fn push_left(&mut self, mut t: &'a Link<A>) {
        while let Some(n) = t {
            self.stack.push(n);
            t = &n.left;
        }
    }
}

impl<'a, A> Iterator for Iter<'a, A> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left(&n.right);
        Some(&n.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nat(k: i32) -> impl Fn(&i32) -> Ordering {
        move |x: &i32| k.cmp(x)
    }

    fn cmp2(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn insert_all(keys: &[i32]) -> Link<i32> {
        let mut t: Link<i32> = None;
        for &k in keys {
            t = Some(insert(&nat(k), k, &t));
            check(&cmp2, &t).unwrap();
        }
        t
    }

    fn contents(t: &Link<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        to_vec(t, &mut out);
        out
    }

    #[test]
    fn insert_keeps_invariants() {
        let t = insert_all(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(size(&t), 7);
        assert_eq!(contents(&t), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn insert_equal_replaces_without_growth() {
        let t = insert_all(&[2, 1, 3]);
        let t2 = Some(insert(&nat(2), 2, &t));
        assert_eq!(size(&t2), 3);
        check(&cmp2, &t2).unwrap();
    }

    #[test]
    fn double_rotation_inner_heavy() {
        // After 10, 0, 5, 3 the root's left child is inner-heavy, so the
        // right rotation must go through the double case.
        let t = insert_all(&[10, 0, 5, 3]);
        assert_eq!(contents(&t), vec![0, 3, 5, 10]);
    }

    #[test]
    fn delete_missing_is_noop() {
        let t = insert_all(&[2, 1, 3]);
        let t2 = delete(&nat(9), &t);
        assert_eq!(contents(&t2), vec![1, 2, 3]);
    }

    #[test]
    fn delete_root_glues() {
        let t = insert_all(&[5, 3, 8, 1, 4, 7, 9]);
        let t2 = delete(&nat(5), &t);
        check(&cmp2, &t2).unwrap();
        assert_eq!(contents(&t2), vec![1, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn glue_prefers_larger_side() {
        let l = insert_all(&[1, 2, 3, 4]);
        let r = insert_all(&[10]);
        let g = glue(&l, &r);
        check(&cmp2, &g).unwrap();
        assert_eq!(contents(&g), vec![1, 2, 3, 4, 10]);
    }

    #[test]
    #[should_panic(expected = "no minimum in an empty tree")]
    fn delete_find_min_empty_panics() {
        let t: Link<i32> = None;
        delete_find_min(&t);
    }

    #[test]
    #[should_panic(expected = "no maximum in an empty tree")]
    fn delete_find_max_empty_panics() {
        let t: Link<i32> = None;
        delete_find_max(&t);
    }

    #[test]
    fn alter_covers_all_four_transitions() {
        // absent -> absent
        let t = insert_all(&[2, 4]);
        let t1 = alter(&nat(3), |cur| cur.copied(), &t);
        assert_eq!(contents(&t1), vec![2, 4]);
        // absent -> present
        let t2 = alter(&nat(3), |_| Some(3), &t);
        assert_eq!(contents(&t2), vec![2, 3, 4]);
        // present -> absent
        let t3 = alter(&nat(2), |_| None, &t);
        assert_eq!(contents(&t3), vec![4]);
        // present -> present
        let t4 = alter(&nat(2), |_| Some(2), &t);
        assert_eq!(contents(&t4), vec![2, 4]);
        for t in [&t1, &t2, &t3, &t4] {
            check(&cmp2, t).unwrap();
        }
    }

    #[test]
    fn join_balances_lopsided_sides() {
        let l = insert_all(&[1]);
        let r = insert_all(&(10..100).collect::<Vec<_>>());
        let j = Some(join(5, &l, &r));
        check(&cmp2, &j).unwrap();
        assert_eq!(size(&j), 92);
        assert_eq!(min(&j), Some(&1));
    }

    #[test]
    fn merge_balances_lopsided_sides() {
        let l = insert_all(&(0..50).collect::<Vec<_>>());
        let r = insert_all(&[100]);
        let m = merge(&l, &r);
        check(&cmp2, &m).unwrap();
        assert_eq!(size(&m), 51);
    }

    #[test]
    fn split_partitions_around_pivot() {
        let t = insert_all(&[1, 2, 3, 4, 5, 6, 7]);
        let (lt, gt) = split(&nat(4), &t);
        check(&cmp2, &lt).unwrap();
        check(&cmp2, &gt).unwrap();
        assert_eq!(contents(&lt), vec![1, 2, 3]);
        assert_eq!(contents(&gt), vec![5, 6, 7]);
    }

    #[test]
    fn union_intersection_difference() {
        let a = insert_all(&[1, 2, 3, 4]);
        let b = insert_all(&[3, 4, 5, 6]);
        let u = union(&cmp2, &a, &b);
        let i = intersection(&cmp2, &a, &b);
        let d = difference(&cmp2, &a, &b);
        for t in [&u, &i, &d] {
            check(&cmp2, t).unwrap();
        }
        assert_eq!(contents(&u), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(contents(&i), vec![3, 4]);
        assert_eq!(contents(&d), vec![1, 2]);
    }

    #[test]
    fn filter_rebalances_deep_shrinkage() {
        let t = insert_all(&(0..256).collect::<Vec<_>>());
        let f = filter(&|x: &i32| *x % 17 == 0, &t);
        check(&cmp2, &f).unwrap();
        assert_eq!(size(&f), 16);
    }

    #[test]
    fn iter_is_in_order_and_restartable() {
        let t = insert_all(&[4, 2, 6, 1, 3, 5, 7]);
        let first: Vec<i32> = Iter::new(&t).copied().collect();
        let second: Vec<i32> = Iter::new(&t).copied().collect();
        assert_eq!(first, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(first, second);
    }
}
