//! Immutable ordered sets
//!
//! An immutable set data structure based on weight-balanced binary
//! search trees. Unlike a map specialized to `()` values, the set
//! stores its elements directly as the tree payload.
//!
//! # Performance
//!
//! | Operation    | Complexity |
//! |--------------|------------|
//! | member       | O(log n)   |
//! | insert       | O(log n)   |
//! | delete       | O(log n)   |
//! | union        | O(m log(n/m + 1)), m <= n |
//!
//! # Example
//!
//! ```
//! use ordtree::Set;
//!
//! let s = Set::empty()
//!     .insert(1)
//!     .insert(2)
//!     .insert(3);
//!
//! assert!(s.member(&2));
//! assert_eq!(s.size(), 3);
//! ```

use std::fmt::{self, Debug};

use crate::check::InvariantError;
use crate::order::{Comparator, Natural};
use crate::wbt;

/// An immutable ordered set based on weight-balanced binary search trees.
///
/// Elements are ordered by the comparator `C`, chosen once at
/// construction; by default the element type's natural order. All edit
/// operations return a new set and leave the receiver untouched.
///
/// Operations that combine two sets require both sides to have been
/// built with the same comparator.
pub struct Set<T, C = Natural> {
    cmp: C,
    root: wbt::Link<T>,
}

impl<T, C: Clone> Clone for Set<T, C> {
    fn clone(&self) -> Self {
        Set {
            cmp: self.cmp.clone(),
            root: self.root.clone(),
        }
    }
}

impl<T: Ord> Set<T> {
    /// Create an empty set over the element type's natural order.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn empty() -> Self {
        Set {
            cmp: Natural,
            root: None,
        }
    }

    /// Create a set with a single element, over the natural order.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn singleton(x: T) -> Self {
        Set {
            cmp: Natural,
            root: Some(wbt::singleton(x)),
        }
    }
}

impl<T: Ord + Clone> Set<T> {
    /// Create a set from a list of elements.
    ///
    /// O(n log n) time.
    pub fn from_list(xs: impl IntoIterator<Item = T>) -> Self {
        let mut set = Set::empty();
        for x in xs {
            set = set.insert(x);
        }
        set
    }
}

impl<T, C> Set<T, C> {
    /// Check if the set is empty.
    ///
    /// O(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the number of elements in the set.
    ///
    /// O(1) time.
    #[inline]
    pub fn size(&self) -> usize {
        wbt::size(&self.root)
    }

    /// Get the least element.
    ///
    /// O(log n) time.
    pub fn min(&self) -> Option<&T> {
        wbt::min(&self.root)
    }

    /// Get the greatest element.
    ///
    /// O(log n) time.
    pub fn max(&self) -> Option<&T> {
        wbt::max(&self.root)
    }

    /// Iterate over elements in ascending order.
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            inner: wbt::Iter::new(&self.root),
        }
    }

    /// Convert to a list of elements in ascending order.
    ///
    /// O(n) time.
    pub fn to_list(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.size());
        wbt::to_vec(&self.root, &mut out);
        out
    }

    /// Right fold over the elements in ascending order.
    ///
    /// O(n) time.
    pub fn foldr<B, F>(&self, f: F, init: B) -> B
    where
        F: Fn(&T, B) -> B,
    {
        wbt::foldr(&self.root, &f, init)
    }

    /// Left fold over the elements in ascending order.
    ///
    /// O(n) time.
    pub fn foldl<B, F>(&self, f: F, init: B) -> B
    where
        F: Fn(B, &T) -> B,
    {
        wbt::foldl(&self.root, &f, init)
    }

    /// Keep the elements satisfying a predicate.
    ///
    /// O(n) time.
    pub fn filter<F>(&self, pred: F) -> Self
    where
        T: Clone,
        C: Clone,
        F: Fn(&T) -> bool,
    {
        Set {
            cmp: self.cmp.clone(),
            root: wbt::filter(&pred, &self.root),
        }
    }

    /// Split into the elements satisfying a predicate and those not.
    ///
    /// O(n) time.
    pub fn partition<F>(&self, pred: F) -> (Self, Self)
    where
        T: Clone,
        C: Clone,
        F: Fn(&T) -> bool,
    {
        let (yes, no) = wbt::partition(&pred, &self.root);
        (
            Set {
                cmp: self.cmp.clone(),
                root: yes,
            },
            Set {
                cmp: self.cmp.clone(),
                root: no,
            },
        )
    }

    /// Height of the underlying tree. Diagnostic; O(n) time.
    pub fn height(&self) -> usize {
        wbt::height(&self.root)
    }
}

impl<T, C: Comparator<T>> Set<T, C> {
    /// Create an empty set ordered by `cmp`.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn empty_with(cmp: C) -> Self {
        Set { cmp, root: None }
    }

    /// Create a set with a single element, ordered by `cmp`.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn singleton_with(cmp: C, x: T) -> Self {
        Set {
            cmp,
            root: Some(wbt::singleton(x)),
        }
    }

    /// Check if an element is in the set.
    ///
    /// O(log n) time.
    pub fn member(&self, x: &T) -> bool {
        wbt::lookup(&|y: &T| self.cmp.compare(x, y), &self.root).is_some()
    }

    /// Check if an element is not in the set.
    ///
    /// O(log n) time.
    #[inline]
    pub fn not_member(&self, x: &T) -> bool {
        !self.member(x)
    }

    /// Insert an element into the set. An element already present (as
    /// judged by the comparator) is replaced by the new one.
    ///
    /// O(log n) time.
    pub fn insert(&self, x: T) -> Self
    where
        T: Clone,
        C: Clone,
    {
        let probe = x.clone();
        let root = wbt::insert(&|y: &T| self.cmp.compare(&probe, y), x, &self.root);
        Set {
            cmp: self.cmp.clone(),
            root: Some(root),
        }
    }

    /// Delete an element from the set. Absent elements are a no-op.
    ///
    /// O(log n) time.
    pub fn delete(&self, x: &T) -> Self
    where
        T: Clone,
        C: Clone,
    {
        Set {
            cmp: self.cmp.clone(),
            root: wbt::delete(&|y: &T| self.cmp.compare(x, y), &self.root),
        }
    }

    /// Union of two sets; where both sides hold an equal element, the
    /// one from `self` survives. Both sets must be ordered by the same
    /// comparator.
    ///
    /// O(m log(n/m + 1)) time where m <= n.
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        let cmp = &self.cmp;
        Set {
            cmp: self.cmp.clone(),
            root: wbt::union(&|a: &T, b: &T| cmp.compare(a, b), &self.root, &other.root),
        }
    }

    /// Intersection of two sets, keeping `self`'s elements. Both sets
    /// must be ordered by the same comparator.
    ///
    /// O(m log(n/m + 1)) time.
    pub fn intersection(&self, other: &Self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        let cmp = &self.cmp;
        Set {
            cmp: self.cmp.clone(),
            root: wbt::intersection(&|a: &T, b: &T| cmp.compare(a, b), &self.root, &other.root),
        }
    }

    /// Difference of two sets (elements in `self` but not in `other`).
    /// Both sets must be ordered by the same comparator.
    ///
    /// O(m log(n/m + 1)) time.
    pub fn difference(&self, other: &Self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        let cmp = &self.cmp;
        Set {
            cmp: self.cmp.clone(),
            root: wbt::difference(&|a: &T, b: &T| cmp.compare(a, b), &self.root, &other.root),
        }
    }

    /// Check if this set is a subset of another.
    ///
    /// O(n log m) time.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.size() <= other.size() && self.iter().all(|x| other.member(x))
    }

    /// Check if two sets are disjoint.
    ///
    /// O(n log m) time.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().all(|x| !other.member(x))
    }

    /// Re-derive every structural invariant (sizes, weight balance,
    /// strict element order) and report the first violation.
    ///
    /// O(n) time.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let cmp = &self.cmp;
        wbt::check(&|a: &T, b: &T| cmp.compare(a, b), &self.root)
    }
}

/// Iterator over a [`Set`] in ascending order.
pub struct SetIter<'a, T> {
    inner: wbt::Iter<'a, T>,
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

// Trait implementations

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Set::empty()
    }
}

impl<T: Ord + Clone> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Set::from_list(iter)
    }
}

impl<T: Debug, C> Debug for Set<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for Set<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for Set<T, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Reversed;
    use quickcheck::quickcheck;

    #[test]
    fn test_empty() {
        let s: Set<i32> = Set::empty();
        assert!(s.is_empty());
        assert_eq!(s.size(), 0);
        assert!(!s.member(&1));
    }

    #[test]
    fn test_singleton() {
        let s = Set::singleton(42);
        assert!(!s.is_empty());
        assert_eq!(s.size(), 1);
        assert!(s.member(&42));
        assert!(!s.member(&1));
    }

    #[test]
    fn test_insert() {
        let s = Set::empty().insert(1).insert(2).insert(3);
        assert_eq!(s.size(), 3);
        assert!(s.member(&1));
        assert!(s.member(&2));
        assert!(s.member(&3));
        assert!(!s.member(&4));
    }

    #[test]
    fn test_insert_duplicate() {
        let s = Set::empty().insert(1).insert(1).insert(1);
        assert_eq!(s.size(), 1);
    }

    #[test]
    fn test_delete() {
        let s = Set::from_list(vec![1, 2, 3]);
        let s2 = s.delete(&2);

        assert_eq!(s2.size(), 2);
        assert!(!s2.member(&2));
        assert!(s2.member(&1));
        assert!(s2.member(&3));

        // Original unchanged
        assert_eq!(s.size(), 3);
        assert!(s.member(&2));
    }

    #[test]
    fn test_min_max() {
        let s = Set::from_list(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        assert_eq!(s.min(), Some(&1));
        assert_eq!(s.max(), Some(&9));

        let empty: Set<i32> = Set::empty();
        assert_eq!(empty.min(), None);
        assert_eq!(empty.max(), None);
    }

    #[test]
    fn test_to_list() {
        let s = Set::from_list(vec![3, 1, 2]);
        assert_eq!(s.to_list(), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter() {
        let s = Set::from_list(vec![1, 2, 3, 4, 5, 6]);
        let evens = s.filter(|x| x % 2 == 0);

        assert_eq!(evens.size(), 3);
        assert_eq!(evens.to_list(), vec![2, 4, 6]);
        evens.validate().unwrap();
    }

    #[test]
    fn test_partition() {
        let s = Set::from_list(vec![1, 2, 3, 4, 5, 6]);
        let (evens, odds) = s.partition(|x| x % 2 == 0);

        assert_eq!(evens.to_list(), vec![2, 4, 6]);
        assert_eq!(odds.to_list(), vec![1, 3, 5]);
        evens.validate().unwrap();
        odds.validate().unwrap();
    }

    #[test]
    fn test_union() {
        let s1 = Set::from_list(vec![1, 2, 3]);
        let s2 = Set::from_list(vec![2, 3, 4, 5]);

        let u = s1.union(&s2);
        assert_eq!(u.to_list(), vec![1, 2, 3, 4, 5]);
        u.validate().unwrap();
    }

    #[test]
    fn test_intersection() {
        let s1 = Set::from_list(vec![1, 2, 3, 4]);
        let s2 = Set::from_list(vec![2, 4, 6]);

        let i = s1.intersection(&s2);
        assert_eq!(i.to_list(), vec![2, 4]);
    }

    #[test]
    fn test_difference() {
        let s1 = Set::from_list(vec![1, 2, 3, 4]);
        let s2 = Set::from_list(vec![2, 4]);

        let d = s1.difference(&s2);
        assert_eq!(d.to_list(), vec![1, 3]);
    }

    #[test]
    fn test_subset_disjoint() {
        let s1 = Set::from_list(vec![1, 2]);
        let s2 = Set::from_list(vec![1, 2, 3]);
        let s3 = Set::from_list(vec![4, 5]);

        assert!(s1.is_subset_of(&s2));
        assert!(!s2.is_subset_of(&s1));
        assert!(s1.is_disjoint(&s3));
        assert!(!s1.is_disjoint(&s2));
    }

    #[test]
    fn test_foldr() {
        let s = Set::from_list(vec![1, 2, 3]);
        let sum = s.foldr(|x, acc| x + acc, 0);
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_iter() {
        let s = Set::from_list(vec![3, 1, 2]);
        let items: Vec<_> = s.iter().copied().collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_iter() {
        let s: Set<i32> = vec![3, 1, 2, 1].into_iter().collect();
        assert_eq!(s.size(), 3);
        assert_eq!(s.to_list(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reversed_comparator() {
        let s = Set::empty_with(Reversed(Natural))
            .insert(1)
            .insert(3)
            .insert(2);
        assert_eq!(s.to_list(), vec![3, 2, 1]);
        s.validate().unwrap();
    }

    quickcheck! {
        fn qc_member_matches_source(vs: Vec<u8>, probe: u8) -> bool {
            let s = Set::from_list(vs.clone());
            s.member(&probe) == vs.contains(&probe)
        }

        fn qc_invariants_after_edits(vs: Vec<i8>) -> () {
            let mut s = Set::empty();
            for &k in &vs {
                match k {
                    1..=i8::MAX => s = s.insert(k % 32),
                    0 | i8::MIN => (),
                    _ => s = s.delete(&(-k % 32)),
                }
                s.validate().unwrap();
            }
        }

        fn qc_union_is_set_union(v1: Vec<u8>, v2: Vec<u8>) -> bool {
            let u = Set::from_list(v1.clone()).union(&Set::from_list(v2.clone()));
            let mut expected: Vec<u8> = v1.into_iter().chain(v2).collect();
            expected.sort_unstable();
            expected.dedup();
            u.to_list() == expected
        }
    }
}
