use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::{iter, mem};

use log::debug;

use super::capacity;
use super::{Cursor, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
#[doc(inline)]
pub use crate::util::error::NotFound;
use crate::util::fmt::DebugRaw;

/// A map of keys to values which relies on the keys implementing [`Hash`].
///
/// Entries are stored in buckets: one growable sequence per slot of the table, with colliding
/// keys appended to the same bucket. The table's capacity is always drawn from a fixed list of
/// primes starting at 53 and grows to the next one whenever an insertion would take the load
/// factor above 9/10. Past the last prime, the capacity doubles.
///
/// It is a logic error for keys in a HashMap to be manipulated in a way that changes their hash.
/// Because of this, HashMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the HashMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`**, `O(n)` |
/// | `get_or_insert_default` | `O(1)`**, `O(n)` |
/// | `get` | `O(1)`* |
/// | `find` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `begin` | `O(cap)` |
///
/// \* Every key in the same bucket is compared against, which is a single key for most buckets
/// while the load factor is kept below 9/10.
///
/// \** If the insertion requires a rehash, every entry is moved into the new table, taking `O(n)`.
/// Because the capacity roughly doubles each time, this is amortized to `O(1)`.
pub struct HashMap<K: Hash + Eq, V, B: BuildHasher = RandomState> {
    pub(crate) buckets: Vec<Bucket<K, V>>,
    pub(crate) len: usize,
    pub(crate) hasher: B,
}

pub(crate) type Bucket<K, V> = Vec<Entry<K, V>>;

/// A single key-value pair, stored alongside the key's hash so that rehashing never needs to call
/// back into [`Hash`] or [`BuildHasher`].
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub hash: u64,
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub const fn tuple(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> HashMap<K, V, B> {
    /// Creates a new HashMap with the default value for `B` and the initial capacity of 53
    /// buckets.
    pub fn new() -> HashMap<K, V, B> {
        HashMap::with_hasher(B::default())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, B> {
    /// Creates a new HashMap with the initial capacity and the provided `hasher`.
    pub fn with_hasher(hasher: B) -> HashMap<K, V, B> {
        HashMap {
            buckets: empty_table(capacity::INITIAL),
            len: 0,
            hasher,
        }
    }

    /// Returns the length of the HashMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current capacity of the HashMap, which is the number of buckets.
    pub fn cap(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of entries to buckets.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.cap() as f64
    }

    /// Returns a reference to the hasher used by the HashMap.
    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    /// Inserts the provided `key`-`value` pair into the HashMap, rehashing if the new entry would
    /// take the load factor above 9/10. If the key was already associated with a value, the value
    /// is replaced in place and the previous one is returned.
    ///
    /// As with the standard library, the key isn't changed if it already exists.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);

        match self.position(hash, &key) {
            Ok((bucket, slot)) => Some(mem::replace(&mut self.buckets[bucket][slot].value, value)),
            Err(NotFound) => {
                self.push_entry(Entry { hash, key, value });
                None
            },
        }
    }

    /// Returns a mutable reference to the value associated with `key`, inserting
    /// [`V::default()`](Default::default) first if there is no such value.
    ///
    /// This is the only way to index a HashMap that creates entries. For a pure lookup, see
    /// [`get_mut`](HashMap::get_mut) or [`try_get_mut`](HashMap::try_get_mut).
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let hash = self.hasher.hash_one(&key);

        let (bucket, slot) = match self.position(hash, &key) {
            Ok(position) => position,
            Err(NotFound) => self.push_entry(Entry {
                hash,
                key,
                value: V::default(),
            }),
        };

        &mut self.buckets[bucket][slot].value
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no entry.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        // We're introducing a new type parameter here, Q which represents a borrowed version of K
        // where equality and hashing carries over the borrow.
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (bucket, slot) = self.locate(key).ok()?;
        Some(self.buckets[bucket][slot].tuple())
    }

    /// Returns a reference to the value associated with the provided `key`, or [`NotFound`] if the
    /// map contains no value for `key`.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, NotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (bucket, slot) = self.locate(key)?;
        Ok(&self.buckets[bucket][slot].value)
    }

    /// Returns a mutable reference to the value associated with the provided `key`, or
    /// [`NotFound`] if the map contains no value for `key`.
    pub fn try_get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, NotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (bucket, slot) = self.locate(key)?;
        Ok(&mut self.buckets[bucket][slot].value)
    }

    /// Returns a reference to the value associated with the provided `key` or None if the map
    /// contains no values for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.try_get(key).ok()
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if the
    /// map contains no values for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.try_get_mut(key).ok()
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locate(key).is_ok()
    }

    /// Returns a [`Cursor`] positioned at the entry for `key`, or at the end sentinel if there is
    /// no such entry.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.locate(key) {
            Ok((bucket, slot)) => Cursor::at(&self.buckets, bucket, slot),
            Err(NotFound) => self.end(),
        }
    }

    /// Removes the entry associated with `key`, returning it. If the map has no such entry, it is
    /// left unchanged and [`NotFound`] is returned instead.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), NotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (bucket, slot) = self.locate(key)?;

        // Erase rather than swap, keeping the storage order of the rest of the bucket.
        let removed = self.buckets[bucket].remove(slot);
        self.len -= 1;

        Ok(removed.into_tuple())
    }

    /// Removes the entry associated with `key`, returning the value. If the map has no such entry,
    /// it is left unchanged and [`NotFound`] is returned instead.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, NotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes all entries from the HashMap, keeping its current capacity.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns a [`Cursor`] positioned at the first entry of the HashMap, or at the end sentinel if
    /// the map is empty.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::begin(&self.buckets)
    }

    /// Returns a [`Cursor`] positioned at the end sentinel, one past the last entry.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::end(&self.buckets)
    }

    /// Returns an iterator over all key-value pairs in the HashMap, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs in the HashMap, with mutable references to
    /// the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.into_iter()
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    /// Returns an iterator over all keys in the HashMap, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }

    /// Returns an iterator over all values in the HashMap, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }

    /// Returns an iterator over all values in the HashMap, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, B> {
    /// Calculates the bucket index for the provided `hash` under the current capacity.
    pub(crate) fn bucket_index(&self, hash: u64) -> usize {
        // The capacity is never 0, the table is allocated on construction.
        (hash % self.cap() as u64) as usize
    }

    /// Finds the bucket and slot of the entry for `key`, which has the already calculated `hash`.
    pub(crate) fn position<Q>(&self, hash: u64, key: &Q) -> Result<(usize, usize), NotFound>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let bucket = self.bucket_index(hash);

        // Comparing hashes first skips most calls to Eq within a crowded bucket.
        self.buckets[bucket]
            .iter()
            .position(|entry| entry.hash == hash && entry.key.borrow() == key)
            .map(|slot| (bucket, slot))
            .ok_or(NotFound)
    }

    /// Finds the bucket and slot of the entry for `key`.
    pub(crate) fn locate<Q>(&self, key: &Q) -> Result<(usize, usize), NotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.position(self.hasher.hash_one(key), key)
    }

    /// Appends a new `entry`, which must not share a key with any existing one, growing the table
    /// first if it would be overloaded. Returns the bucket and slot the entry ended up in.
    pub(crate) fn push_entry(&mut self, entry: Entry<K, V>) -> (usize, usize) {
        if capacity::overloaded(self.len + 1, self.cap()) {
            self.rehash();
        }

        let bucket = self.bucket_index(entry.hash);
        self.buckets[bucket].push(entry);
        self.len += 1;

        (bucket, self.buckets[bucket].len() - 1)
    }

    /// Grows the table to the next capacity and moves every entry into the bucket that its hash
    /// selects under that capacity. Old buckets are visited in index order and entries in storage
    /// order, so the resulting layout only depends on the previous one.
    ///
    /// The new table is allocated up front and only replaces the old one once it holds every
    /// entry.
    pub(crate) fn rehash(&mut self) {
        let new_cap = capacity::next(self.cap());
        debug!(
            "Rehashing HashMap with {} entries from {} to {} buckets",
            self.len,
            self.cap(),
            new_cap,
        );

        let mut table = empty_table(new_cap);

        for entry in self.buckets.iter_mut().flat_map(mem::take) {
            table[(entry.hash % new_cap as u64) as usize].push(entry);
        }

        self.buckets = table;
    }
}

fn empty_table<K, V>(cap: usize) -> Vec<Bucket<K, V>> {
    iter::repeat_with(Vec::new).take(cap).collect()
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> Default for HashMap<K, V, B> {
    fn default() -> Self {
        HashMap::new()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, B: BuildHasher + Clone> Clone for HashMap<K, V, B> {
    fn clone(&self) -> Self {
        HashMap {
            buckets: self.buckets.clone(),
            len: self.len,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K: Hash + Eq, V: PartialEq, B: BuildHasher> PartialEq for HashMap<K, V, B> {
    /// Two maps are equal if they contain the same key-value pairs, regardless of their capacity
    /// or the buckets that the entries are stored in.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq, B: BuildHasher> Eq for HashMap<K, V, B> {}

impl<K: Hash + Eq, V, B: BuildHasher + Default> FromIterator<(K, V)> for HashMap<K, V, B> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = HashMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Extend<(K, V)> for HashMap<K, V, B> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher + Debug> Debug for HashMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let buckets = self.buckets
            .iter()
            .map(|bucket| DebugRaw(if bucket.is_empty() {
                "-".into()
            } else {
                bucket.iter()
                    .map(|entry| format!("({:?}: {:?})", entry.key, entry.value))
                    .collect::<Vec<_>>()
                    .join(" -> ")
            }))
            .collect::<Vec<_>>();

        f.debug_struct("HashMap")
            .field("buckets", &buckets)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher> Display for HashMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map().entries(self.iter()).finish()
    }
}
