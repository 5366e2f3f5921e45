//! End-to-end scenarios for the ordered containers.

use ordtree::order::from_fn;
use ordtree::{Map, Natural, Reversed, Set};

#[test]
fn insert_iterate_delete_scenario() {
    let mut m = Map::empty();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        m = m.insert(k, k * 10);
    }

    assert_eq!(m.size(), 7);
    assert_eq!(m.keys(), vec![1, 3, 4, 5, 7, 8, 9]);

    let m2 = m.delete(&5);
    assert_eq!(m2.lookup(&5), None);
    assert_eq!(m2.lookup(&3), Some(&30));
    assert_eq!(m2.size(), 6);
}

#[test]
fn old_versions_stay_intact() {
    let v0: Map<i32, i32> = Map::empty();
    let v1 = v0.insert(1, 1);
    let v2 = v1.insert(2, 2);
    let v3 = v2.delete(&1);

    assert_eq!(v0.size(), 0);
    assert_eq!(v1.to_list(), vec![(1, 1)]);
    assert_eq!(v2.to_list(), vec![(1, 1), (2, 2)]);
    assert_eq!(v3.to_list(), vec![(2, 2)]);

    // every version is still a well-formed tree
    for m in [&v0, &v1, &v2, &v3] {
        m.validate().unwrap();
    }
}

#[test]
fn alter_agrees_with_direct_calls() {
    let m = Map::from_list(vec![(1, 10), (2, 20), (3, 30)]);

    assert_eq!(m.alter(4, |_| Some(40)), m.insert(4, 40));
    assert_eq!(m.alter(2, |_| Some(99)), m.insert(2, 99));
    assert_eq!(m.alter(2, |_| None), m.delete(&2));
    assert_eq!(m.alter(9, |v| v.copied()), m);
    assert_eq!(
        m.alter(1, |v| v.map(|x| x + 5)),
        m.insert(1, 15)
    );
}

#[test]
fn monotone_inserts_keep_logarithmic_height() {
    for n in [256usize, 1024, 4096] {
        let mut asc = Map::empty();
        let mut desc = Map::empty();
        for k in 0..n {
            asc = asc.insert(k, ());
            desc = desc.insert(n - k, ());
        }
        asc.validate().unwrap();
        desc.validate().unwrap();

        let bound = (2.5 * ((n + 1) as f64).log2() + 2.0) as usize;
        assert!(
            asc.height() <= bound,
            "ascending: height {} exceeds {} for n = {}",
            asc.height(),
            bound,
            n
        );
        assert!(
            desc.height() <= bound,
            "descending: height {} exceeds {} for n = {}",
            desc.height(),
            bound,
            n
        );
    }
}

#[test]
fn set_scenario() {
    let s = Set::from_list(vec![5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(s.size(), 7);
    assert_eq!(s.to_list(), vec![1, 3, 4, 5, 7, 8, 9]);

    let s2 = s.delete(&5);
    assert!(!s2.member(&5));
    assert!(s2.member(&3));
}

#[test]
fn comparator_is_fixed_at_construction() {
    let asc: Map<i32, &str> = Map::empty_with(Natural)
        .insert(1, "a")
        .insert(2, "b");
    let desc = Map::empty_with(Reversed(Natural))
        .insert(1, "a")
        .insert(2, "b");

    assert_eq!(asc.keys(), vec![1, 2]);
    assert_eq!(desc.keys(), vec![2, 1]);
    asc.validate().unwrap();
    desc.validate().unwrap();
}

#[test]
fn closure_comparator_set() {
    // order strings by length; equal lengths collide
    let by_len = from_fn(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    let s = Set::empty_with(by_len)
        .insert("apple")
        .insert("fig")
        .insert("cherry");
    assert_eq!(s.to_list(), vec!["fig", "apple", "cherry"]);
    assert!(s.member(&"xyz"));
    assert!(!s.member(&"dragonfruit"));
}
