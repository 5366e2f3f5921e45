//! Immutable ordered maps
//!
//! An immutable map data structure based on weight-balanced binary
//! search trees, ordered by an explicit [`Comparator`] fixed when the
//! map is created.
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | lookup    | O(log n)   |
//! | insert    | O(log n)   |
//! | delete    | O(log n)   |
//! | alter     | O(log n)   |
//! | union     | O(m log(n/m + 1)), m <= n |
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
//! ```

use std::fmt::{self, Debug};

use crate::check::InvariantError;
use crate::order::{Comparator, Natural};
use crate::wbt;

/// An immutable ordered map based on weight-balanced binary search trees.
///
/// Keys are ordered by the comparator `C`, chosen once at construction;
/// by default the key type's natural order. All edit operations return a
/// new map and leave the receiver untouched, sharing every subtree off
/// the edited path.
///
/// Operations that combine two maps (`union`, `intersection`,
/// `difference`) require both sides to have been built with the same
/// comparator; combining maps ordered differently is a precondition
/// violation with unspecified contents.
pub struct Map<K, V, C = Natural> {
    cmp: C,
    root: wbt::Link<(K, V)>,
}

impl<K, V, C: Clone> Clone for Map<K, V, C> {
    fn clone(&self) -> Self {
        Map {
            cmp: self.cmp.clone(),
            root: self.root.clone(),
        }
    }
}

impl<K: Ord, V> Map<K, V> {
    /// Create an empty map over the key type's natural order.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn empty() -> Self {
        Map {
            cmp: Natural,
            root: None,
        }
    }

    /// Create a map with a single entry, over the natural order.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn singleton(key: K, value: V) -> Self {
        Map {
            cmp: Natural,
            root: Some(wbt::singleton((key, value))),
        }
    }
}

impl<K: Ord + Clone, V: Clone> Map<K, V> {
    /// Create a map from a list of key-value pairs. Later pairs win.
    ///
    /// O(n log n) time.
    pub fn from_list(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut map = Map::empty();
        for (k, v) in pairs {
            map = map.insert(k, v);
        }
        map
    }
}

impl<K, V, C> Map<K, V, C> {
    /// Check if the map is empty.
    ///
    /// O(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the number of entries in the map.
    ///
    /// O(1) time.
    #[inline]
    pub fn size(&self) -> usize {
        wbt::size(&self.root)
    }

    /// Get the entry with the least key.
    ///
    /// O(log n) time.
    pub fn min(&self) -> Option<(&K, &V)> {
        wbt::min(&self.root).map(|p| (&p.0, &p.1))
    }

    /// Get the entry with the greatest key.
    ///
    /// O(log n) time.
    pub fn max(&self) -> Option<(&K, &V)> {
        wbt::max(&self.root).map(|p| (&p.0, &p.1))
    }

    /// Iterate over entries in ascending key order. A fresh traversal of
    /// the same map value always yields the same sequence.
    pub fn iter(&self) -> MapIter<'_, K, V> {
        MapIter {
            inner: wbt::Iter::new(&self.root),
        }
    }

    /// Convert to a list of key-value pairs in ascending key order.
    ///
    /// O(n) time.
    pub fn to_list(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.size());
        wbt::to_vec(&self.root, &mut out);
        out
    }

    /// All keys in ascending order.
    ///
    /// O(n) time.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// All values in ascending key order.
    ///
    /// O(n) time.
    pub fn elems(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Map a function over all values, preserving keys and shape.
    ///
    /// O(n) time.
    pub fn map<U, F>(&self, f: F) -> Map<K, U, C>
    where
        K: Clone,
        C: Clone,
        F: Fn(&V) -> U,
    {
        Map {
            cmp: self.cmp.clone(),
            root: wbt::map_items(&|p: &(K, V)| (p.0.clone(), f(&p.1)), &self.root),
        }
    }

    /// Map a function over all entries, preserving keys and shape.
    ///
    /// O(n) time.
    pub fn map_with_key<U, F>(&self, f: F) -> Map<K, U, C>
    where
        K: Clone,
        C: Clone,
        F: Fn(&K, &V) -> U,
    {
        Map {
            cmp: self.cmp.clone(),
            root: wbt::map_items(&|p: &(K, V)| (p.0.clone(), f(&p.0, &p.1)), &self.root),
        }
    }

    /// Right fold over the entries in ascending key order.
    ///
    /// O(n) time.
    pub fn foldr<B, F>(&self, f: F, init: B) -> B
    where
        F: Fn(&K, &V, B) -> B,
    {
        wbt::foldr(&self.root, &|p: &(K, V), acc| f(&p.0, &p.1, acc), init)
    }

    /// Left fold over the entries in ascending key order.
    ///
    /// O(n) time.
    pub fn foldl<B, F>(&self, f: F, init: B) -> B
    where
        F: Fn(B, &K, &V) -> B,
    {
        wbt::foldl(&self.root, &|acc, p: &(K, V)| f(acc, &p.0, &p.1), init)
    }

    /// Keep the entries satisfying a predicate.
    ///
    /// O(n) time.
    pub fn filter<F>(&self, pred: F) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        F: Fn(&K, &V) -> bool,
    {
        Map {
            cmp: self.cmp.clone(),
            root: wbt::filter(&|p: &(K, V)| pred(&p.0, &p.1), &self.root),
        }
    }

    /// Height of the underlying tree. Diagnostic; O(n) time.
    pub fn height(&self) -> usize {
        wbt::height(&self.root)
    }
}

impl<K, V, C: Comparator<K>> Map<K, V, C> {
    /// Create an empty map ordered by `cmp`.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn empty_with(cmp: C) -> Self {
        Map { cmp, root: None }
    }

    /// Create a map with a single entry, ordered by `cmp`.
    ///
    /// O(1) time and space.
    #[inline]
    pub fn singleton_with(cmp: C, key: K, value: V) -> Self {
        Map {
            cmp,
            root: Some(wbt::singleton((key, value))),
        }
    }

    /// Lookup a key in the map.
    ///
    /// O(log n) time.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        wbt::lookup(&|p: &(K, V)| self.cmp.compare(key, &p.0), &self.root).map(|p| &p.1)
    }

    /// Check if a key is in the map.
    ///
    /// O(log n) time.
    #[inline]
    pub fn member(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Insert a key-value pair into the map.
    /// If the key already exists, the value is replaced.
    ///
    /// O(log n) time.
    pub fn insert(&self, key: K, value: V) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let probe_key = key.clone();
        let root = wbt::insert(
            &|p: &(K, V)| self.cmp.compare(&probe_key, &p.0),
            (key, value),
            &self.root,
        );
        Map {
            cmp: self.cmp.clone(),
            root: Some(root),
        }
    }

    /// Insert with a combining function.
    /// If the key already exists, `f(new_value, old_value)` is stored.
    ///
    /// O(log n) time.
    pub fn insert_with<F>(&self, key: K, value: V, f: F) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        F: FnOnce(V, V) -> V,
    {
        self.alter(key, |old| {
            Some(match old {
                Some(old) => f(value, old.clone()),
                None => value,
            })
        })
    }

    /// Delete a key from the map. Absent keys are a no-op.
    ///
    /// O(log n) time.
    pub fn delete(&self, key: &K) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        Map {
            cmp: self.cmp.clone(),
            root: wbt::delete(&|p: &(K, V)| self.cmp.compare(key, &p.0), &self.root),
        }
    }

    /// The universal update primitive. Applies `f` to the value found at
    /// `key` (or `None` if absent) in a single pass:
    ///
    /// * `None -> None`: no change
    /// * `None -> Some(v)`: insert
    /// * `Some(_) -> None`: delete
    /// * `Some(_) -> Some(v)`: replace
    ///
    /// `alter(k, |_| Some(v))` is equivalent to `insert(k, v)`, and
    /// `alter(k, |_| None)` to `delete(&k)`.
    ///
    /// O(log n) time.
    pub fn alter<F>(&self, key: K, f: F) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        F: FnOnce(Option<&V>) -> Option<V>,
    {
        let probe_key = key.clone();
        let root = wbt::alter(
            &|p: &(K, V)| self.cmp.compare(&probe_key, &p.0),
            |cur: Option<&(K, V)>| f(cur.map(|p| &p.1)).map(|v| (key, v)),
            &self.root,
        );
        Map {
            cmp: self.cmp.clone(),
            root,
        }
    }

    /// Update a value at a specific key. Absent keys are a no-op.
    ///
    /// O(log n) time.
    pub fn adjust<F>(&self, key: &K, f: F) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        F: FnOnce(&V) -> V,
    {
        self.update(key, |v| Some(f(v)))
    }

    /// Lookup and update. If the function returns `None`, the entry is
    /// deleted; absent keys are a no-op.
    ///
    /// O(log n) time.
    pub fn update<F>(&self, key: &K, f: F) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        F: FnOnce(&V) -> Option<V>,
    {
        let root = wbt::alter(
            &|p: &(K, V)| self.cmp.compare(key, &p.0),
            |cur: Option<&(K, V)>| match cur {
                Some(p) => f(&p.1).map(|v| (p.0.clone(), v)),
                None => None,
            },
            &self.root,
        );
        Map {
            cmp: self.cmp.clone(),
            root,
        }
    }

    /// Union of two maps. If a key exists in both, the value from `self`
    /// is used. Both maps must be ordered by the same comparator.
    ///
    /// O(m log(n/m + 1)) time where m <= n.
    pub fn union(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let cmp = &self.cmp;
        Map {
            cmp: self.cmp.clone(),
            root: wbt::union(
                &|a: &(K, V), b: &(K, V)| cmp.compare(&a.0, &b.0),
                &self.root,
                &other.root,
            ),
        }
    }

    /// Intersection of two maps, keeping `self`'s values. Both maps must
    /// be ordered by the same comparator.
    ///
    /// O(m log(n/m + 1)) time.
    pub fn intersection(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let cmp = &self.cmp;
        Map {
            cmp: self.cmp.clone(),
            root: wbt::intersection(
                &|a: &(K, V), b: &(K, V)| cmp.compare(&a.0, &b.0),
                &self.root,
                &other.root,
            ),
        }
    }

    /// Difference of two maps (entries of `self` whose key is not in
    /// `other`). Both maps must be ordered by the same comparator.
    ///
    /// O(m log(n/m + 1)) time.
    pub fn difference(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let cmp = &self.cmp;
        Map {
            cmp: self.cmp.clone(),
            root: wbt::difference(
                &|a: &(K, V), b: &(K, V)| cmp.compare(&a.0, &b.0),
                &self.root,
                &other.root,
            ),
        }
    }

    /// Re-derive every structural invariant (sizes, weight balance,
    /// strict key order) and report the first violation.
    ///
    /// O(n) time.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let cmp = &self.cmp;
        wbt::check(&|a: &(K, V), b: &(K, V)| cmp.compare(&a.0, &b.0), &self.root)
    }
}

/// Iterator over a [`Map`] in ascending key order.
pub struct MapIter<'a, K, V> {
    inner: wbt::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for MapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (&p.0, &p.1))
    }
}

// Trait implementations

impl<K: Ord, V> Default for Map<K, V> {
    fn default() -> Self {
        Map::empty()
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map::from_list(iter)
    }
}

impl<K: Debug, V: Debug, C> Debug for Map<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for Map<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for Map<K, V, C> {}
