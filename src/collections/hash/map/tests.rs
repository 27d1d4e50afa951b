#![cfg(test)]

use std::collections::{HashMap as StdHashMap, HashSet as StdHashSet};
use std::hash::BuildHasher;
use std::mem;

use proptest::prelude::*;

use super::*;
use super::capacity;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::hash::{IdentityState, ManualHash};
use crate::util::logger;
use crate::util::panic::assert_panics;

#[test]
fn test_rehash() {
    logger::init();

    let mut map: HashMap<i32, i32> = HashMap::new();
    for i in 0..54 {
        map.insert(i, i);
    }

    assert_eq!(map.len(), 54);
    assert_eq!(map.cap(), 97, "Crossing 9/10 of 53 buckets should grow to the next prime.");
    for i in 0..54 {
        assert_eq!(
            *map.get_or_insert_default(i), i,
            "Every entry should still be reachable after a rehash."
        );
    }
    assert_eq!(map.len(), 54, "Indexing existing keys shouldn't create entries.");
}

#[test]
fn test_load_factor_boundary() {
    assert!(
        !capacity::overloaded(9, 10),
        "A load factor of exactly 9/10 shouldn't trigger a rehash."
    );
    assert!(capacity::overloaded(10, 10));
    assert!(!capacity::overloaded(47, 53));
    assert!(capacity::overloaded(48, 53));

    let mut map: HashMap<usize, (), IdentityState> = HashMap::new();
    for i in 0..47 {
        map.insert(i, ());
    }
    assert_eq!(map.cap(), 53, "47 entries in 53 buckets is below the load factor.");
    assert!(map.load_factor() <= 0.9);

    map.insert(47, ());
    assert_eq!(map.cap(), 97, "The 48th entry should trigger a rehash.");
    assert!(map.load_factor() <= 0.9);

    map.insert(47, ());
    assert_eq!(map.cap(), 97, "Overwriting an entry should never rehash.");
}

#[test]
fn test_next_capacity() {
    assert_eq!(capacity::next(0), 53);
    assert_eq!(capacity::next(53), 97);
    assert_eq!(capacity::next(100), 193, "Capacities not in the table should still round up.");

    #[cfg(target_pointer_width = "64")]
    assert_eq!(
        capacity::next(1610612741),
        3221225482,
        "Past the last prime, capacity should double."
    );

    assert_panics!({
        capacity::next(usize::MAX)
    }, "Doubling usize::MAX should overflow.");
}

#[test]
fn test_insertions() {
    let mut map: HashMap<i32, String> = HashMap::new();

    assert_eq!(map.insert(1, "Chris".into()), None);
    assert_eq!(map.insert(120, "Bob".into()), None);
    assert_eq!(map.insert(53, "Anna".into()), None);
    assert_eq!(map.insert(200, "Alice".into()), None);
    assert_eq!(map.len(), 4);

    *map.get_or_insert_default(2) = "John".into();
    assert_eq!(map.len(), 5, "Indexing a missing key should insert it.");

    *map.get_or_insert_default(2) = "New John".into();
    assert_eq!(map.len(), 5, "Indexing an existing key shouldn't change the length.");
    assert_eq!(map.get(&2).map(String::as_str), Some("New John"));

    assert_eq!(
        map.insert(1, "Chris 2".into()).as_deref(),
        Some("Chris"),
        "Re-inserting a key should return the previous value."
    );
    assert_eq!(map.len(), 5, "Re-inserting a key shouldn't change the length.");
    assert_eq!(map.get(&1).map(String::as_str), Some("Chris 2"));
}

#[test]
fn test_lookups() {
    let mut map: HashMap<String, i32> = [("one".to_string(), 1), ("two".to_string(), 2)]
        .into_iter()
        .collect();

    assert_eq!(map.get("one"), Some(&1), "Lookups should accept borrowed keys.");
    assert_eq!(map.get_entry("two"), Some((&"two".to_string(), &2)));
    assert_eq!(map.try_get("three"), Err(NotFound));
    assert!(map.contains("two"));
    assert!(!map.contains("three"));

    *map.try_get_mut("one").expect("key is present") += 10;
    assert_eq!(map.try_get("one"), Ok(&11));
    assert_eq!(map.get_mut("three"), None);
    assert_eq!(map.len(), 2, "Pure lookups should never create entries.");
}

#[test]
fn test_removals() {
    let mut map: HashMap<i32, &str> = [(1, "Bob"), (2, "Alice")].into_iter().collect();

    assert_eq!(map.remove(&0), Err(NotFound), "Removing a missing key should fail.");
    assert_eq!(map.len(), 2, "A failed removal should leave the map unchanged.");

    assert_eq!(map.remove(&1), Ok("Bob"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), None);
    assert_eq!(map.remove_entry(&1), Err(NotFound));
    assert_eq!(map.remove_entry(&2), Ok((2, "Alice")));
    assert!(map.is_empty());

    let mut map: HashMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
    let cap = map.cap();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.cap(), cap, "Clearing should keep the capacity.");
    assert_eq!(map.begin(), map.end());
}

#[test]
fn test_find() {
    let map: HashMap<i32, &str> = [(1, "Bob"), (2, "Alice")].into_iter().collect();

    let found = map.find(&1);
    assert_eq!(found.read(), Some((&1, &"Bob")));
    assert_eq!(found.key(), Some(&1));
    assert_eq!(found.value(), Some(&"Bob"));
    assert!(!found.is_end());

    let not_found = map.find(&0);
    assert_eq!(not_found, map.end(), "Finding a missing key should return the end sentinel.");
    assert_eq!(not_found.read(), None);
}

#[test]
fn test_cursor_traversal() {
    let map: HashMap<i32, &str, IdentityState> = [(2, "Alice"), (1, "Bob")].into_iter().collect();

    let mut cursor = map.begin();
    assert_eq!(cursor.read(), Some((&1, &"Bob")), "Begin should be the first occupied bucket.");
    assert_eq!(cursor.position(), (1, 0));

    assert_eq!(cursor.move_next().read(), Some((&2, &"Alice")));
    assert!(cursor.move_next().is_end(), "Empty buckets should be skipped to reach the end.");
    assert_eq!(cursor, map.end());
    assert_eq!(cursor.position(), (52, 0));
    assert!(cursor.move_next().is_end(), "The end sentinel shouldn't move forwards.");

    assert_eq!(cursor.move_prev().read(), Some((&2, &"Alice")));
    assert_eq!(cursor.move_prev().read(), Some((&1, &"Bob")));
    assert_eq!(cursor.move_prev().read(), Some((&1, &"Bob")), "Begin shouldn't move backwards.");
    assert_eq!(cursor, map.begin());
    assert_eq!(cursor, map.find(&1));
    assert_ne!(cursor, map.find(&2));

    let other: HashMap<i32, &str, IdentityState> = [(2, "Alice"), (1, "Bob")].into_iter().collect();
    assert_ne!(
        map.begin(), other.begin(),
        "Cursors over different maps shouldn't be equal, even at the same position."
    );
}

#[test]
fn test_cursor_end_in_occupied_bucket() {
    let map: HashMap<usize, usize, IdentityState> = [(52, 0), (105, 1)].into_iter().collect();

    let mut cursor = map.end();
    assert_eq!(cursor.position(), (52, 2), "End should sit past the last bucket's entries.");
    assert_eq!(cursor.move_prev().read(), Some((&105, &1)));
    assert_eq!(cursor.move_prev().read(), Some((&52, &0)));
    assert_eq!(cursor, map.begin());
}

#[test]
fn test_hash_collisions() {
    let mut map = HashMap::<ManualHash<&str>, usize, IdentityState>::new();
    map.insert(ManualHash::new(0, "zero"), 0);
    map.insert(ManualHash::new(53, "one"), 1);
    map.insert(ManualHash::new(1, "two"), 2);
    map.insert(ManualHash::new(106, "three"), 3);

    assert_eq!(
        map.values().copied().collect::<Vec<_>>(),
        [0, 1, 3, 2],
        "Colliding entries should be chained in insertion order."
    );
    assert_eq!(map.iter().rev().map(|e| *e.1).collect::<Vec<_>>(), [2, 3, 1, 0]);

    assert_eq!(map.remove(&ManualHash::new(53, "one")), Ok(1));
    assert_eq!(
        map.values().copied().collect::<Vec<_>>(),
        [0, 3, 2],
        "Removing from a chain shouldn't lose the other entries."
    );
    assert_eq!(map.find(&ManualHash::new(106, "three")).position(), (0, 1));
    assert_eq!(
        map.remove(&ManualHash::new(0, "three")),
        Err(NotFound),
        "A key with a different hash should be a different key."
    );

    assert_eq!(
        map.into_keys().map(ManualHash::value).collect::<Vec<_>>(),
        ["zero", "three", "two"]
    );
}

#[test]
fn test_empty_map() {
    let map: HashMap<i32, i32> = HashMap::new();

    assert!(map.is_empty());
    assert_eq!(map.cap(), 53);
    assert_eq!(map.begin(), map.end(), "Begin should be the end sentinel for an empty map.");
    assert!(map.begin().is_end());
    assert_eq!(map.begin().read(), None);
    assert_eq!(map.iter().next(), None);
    assert_eq!(map.iter().next_back(), None);
}

#[test]
fn test_iteration() {
    let map: HashMap<i32, i32> = (0..500).map(|i| (i, i * 2)).collect();

    let keys = map.keys().copied().collect::<StdHashSet<_>>();
    assert_eq!(keys.len(), 500, "Iteration should visit every entry exactly once.");
    assert_eq!(map.iter().count(), map.len());
    assert_eq!(map.iter().len(), map.len());
    assert!(map.iter().all(|(k, v)| *v == k * 2));

    let forwards = map.iter().collect::<Vec<_>>();
    let mut backwards = map.iter().rev().collect::<Vec<_>>();
    backwards.reverse();
    assert_eq!(forwards, backwards, "Reverse iteration should mirror forward iteration.");
    assert_eq!(
        forwards,
        map.iter().collect::<Vec<_>>(),
        "Iterating an unmodified map twice should produce the same order."
    );
}

#[test]
fn test_double_ended_iteration() {
    let map: HashMap<usize, usize, IdentityState> = (0..10).map(|i| (i, i)).collect();

    let mut iter = map.iter();
    assert_eq!(iter.next().map(|e| *e.0), Some(0));
    assert_eq!(iter.next_back().map(|e| *e.0), Some(9));
    assert_eq!(iter.len(), 8);
    assert_eq!(
        iter.map(|e| *e.0).collect::<Vec<_>>(),
        (1..9).collect::<Vec<_>>(),
        "Iterating from both ends shouldn't repeat or skip entries."
    );
}

#[test]
fn test_mutable_iteration() {
    let mut map: HashMap<i32, i32> = (0..20).map(|i| (i, i)).collect();

    for value in map.values_mut() {
        *value *= 10;
    }
    for (key, value) in map.iter_mut() {
        *value += key;
    }
    for (key, value) in &mut map {
        *value += key;
    }

    assert!(map.iter().all(|(k, v)| *v == k * 12));

    let mut values = map.into_values().collect::<Vec<_>>();
    values.sort();
    assert_eq!(values, (0..20).map(|i| i * 12).collect::<Vec<_>>());
}

#[test]
fn test_equality() {
    let a: HashMap<i32, i32> = (0..100).map(|i| (i, i)).collect();

    let mut b: HashMap<i32, i32> = HashMap::new();
    for i in (0..200).rev() {
        b.insert(i, i);
    }
    for i in 100..200 {
        assert_eq!(b.remove(&i), Ok(i));
    }

    assert_ne!(a.cap(), b.cap());
    assert_eq!(a, b, "Maps with the same entries should be equal regardless of capacity.");

    let mut c = a.clone();
    assert_eq!(a, c);
    c.insert(50, -50);
    assert_ne!(a, c, "Maps with different values should not be equal.");
    c.insert(50, 50);
    c.insert(100, 100);
    assert_ne!(a, c, "Maps with different lengths should not be equal.");
}

#[test]
fn test_moves() {
    let mut map: HashMap<i32, String> = HashMap::new();
    for i in 0..11 {
        map.insert(i, format!("A{i}"));
    }

    let copy = map.clone();
    assert_eq!(copy.len(), 11);
    assert_eq!(copy, map);

    let mut moved = mem::take(&mut map);
    assert_eq!(moved.len(), 11);
    assert!(map.is_empty(), "A moved-from map should be empty.");
    assert_eq!(map.cap(), 53);

    assert_eq!(moved.get_or_insert_default(0), "A0");
    *moved.get_or_insert_default(100) = "A100".into();
    assert_eq!(moved.len(), 12);
    assert_eq!(moved.get(&100).map(String::as_str), Some("A100"));

    let mut other: HashMap<i32, String> = [(10, "John".to_string())].into_iter().collect();
    mem::swap(&mut moved, &mut other);
    assert_eq!(moved.len(), 1);
    assert_eq!(other.len(), 12);
}

#[test]
fn test_drops() {
    let counter = CountedDrop::counter();

    let mut map: HashMap<i32, CountedDrop> = HashMap::new();
    for i in 0..100 {
        map.insert(i, CountedDrop::new(&counter));
    }
    assert_eq!(counter.get(), 0, "Rehashing shouldn't drop any values.");

    drop(map.insert(5, CountedDrop::new(&counter)));
    assert_eq!(counter.get(), 1, "Overwriting should hand back the previous value.");

    for i in 0..10 {
        drop(map.remove(&i));
    }
    assert_eq!(counter.get(), 11);

    drop(map);
    assert_eq!(counter.get(), 101, "Every value should be dropped exactly once.");
}

#[test]
fn test_zst_support() {
    let mut map: HashMap<ZeroSizedType, ZeroSizedType> = HashMap::new();
    assert_eq!(map.insert(ZeroSizedType, ZeroSizedType), None);
    assert_eq!(map.insert(ZeroSizedType, ZeroSizedType), Some(ZeroSizedType));
    assert_eq!(map.len(), 1);
    assert_eq!(map.remove(&ZeroSizedType), Ok(ZeroSizedType));
    assert!(map.is_empty());
}

#[test]
fn test_formatting() {
    let map: HashMap<i32, &str, IdentityState> = [(1, "a"), (54, "b")].into_iter().collect();

    assert_eq!(format!("{map}"), r#"#{1: "a", 54: "b"}"#);
    assert!(format!("{map:?}").contains(r#"(1: "a") -> (54: "b")"#));
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, i32),
    Remove(u8),
    Index(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        any::<u8>().prop_map(Op::Remove),
        any::<u8>().prop_map(Op::Index),
    ]
}

proptest! {
    #[test]
    fn prop_matches_std_model(ops in proptest::collection::vec(op(), 1..400)) {
        let mut map: HashMap<u8, i32> = HashMap::new();
        let mut model: StdHashMap<u8, i32> = StdHashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                },
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k).ok(), model.remove(&k));
                },
                Op::Index(k) => {
                    prop_assert_eq!(*map.get_or_insert_default(k), *model.entry(k).or_default());
                },
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(!capacity::overloaded(map.len(), map.cap()));
        }

        for (index, bucket) in map.buckets.iter().enumerate() {
            for entry in bucket {
                prop_assert_eq!(map.bucket_index(map.hasher().hash_one(&entry.key)), index);
            }
        }

        prop_assert_eq!(map.iter().count(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }
}
