use std::fmt::{self, Debug, Formatter};
use std::ptr;

use super::hash_map::Bucket;
#[cfg(doc)]
use super::HashMap;

/// A type for bi-directional traversal of a [`HashMap`]'s entries. See [`HashMap::begin`],
/// [`HashMap::end`] and [`HashMap::find`] to create one.
///
/// A Cursor tracks two positions: the index of a bucket in the map's table and the slot of an
/// entry within that bucket. Moving skips over empty buckets entirely, so a Cursor is always either
/// positioned at an entry or at the end sentinel: the slot just past the last bucket's entries.
///
/// Two Cursors are equal if they borrow the same map and have the same position, which makes a
/// Cursor usable as a begin-end range over the map.
pub struct Cursor<'a, K, V> {
    pub(crate) table: &'a [Bucket<K, V>],
    pub(crate) bucket: usize,
    pub(crate) slot: usize,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn at(table: &'a [Bucket<K, V>], bucket: usize, slot: usize) -> Self {
        Cursor {
            table,
            bucket,
            slot,
        }
    }

    pub(crate) fn begin(table: &'a [Bucket<K, V>]) -> Self {
        match next_occupied(table, 0) {
            Some(bucket) => Cursor::at(table, bucket, 0),
            None => Cursor::end(table),
        }
    }

    pub(crate) fn end(table: &'a [Bucket<K, V>]) -> Self {
        // The table is never empty, so the last bucket always exists.
        let bucket = table.len() - 1;
        Cursor::at(table, bucket, table[bucket].len())
    }

    /// Returns the position of the Cursor as a pair of bucket index and slot within the bucket.
    pub const fn position(&self) -> (usize, usize) {
        (self.bucket, self.slot)
    }

    /// Returns true if the Cursor is at the end sentinel, in which case there is nothing to read.
    pub fn is_end(&self) -> bool {
        self.bucket == self.table.len() - 1 && self.slot == self.table[self.bucket].len()
    }

    /// Reads the entry that the Cursor is positioned at, returning None at the end sentinel.
    pub fn read(&self) -> Option<(&'a K, &'a V)> {
        self.table[self.bucket].get(self.slot).map(|entry| entry.tuple())
    }

    /// Reads the key of the entry that the Cursor is positioned at.
    pub fn key(&self) -> Option<&'a K> {
        self.read().map(|(key, _)| key)
    }

    /// Reads the value of the entry that the Cursor is positioned at.
    pub fn value(&self) -> Option<&'a V> {
        self.read().map(|(_, value)| value)
    }

    /// Moves the Cursor to the following entry, skipping empty buckets. If there is no following
    /// entry, the Cursor moves to the end sentinel, where it stays.
    pub fn move_next(&mut self) -> &mut Self {
        if self.is_end() {
            return self;
        }

        self.slot += 1;
        if self.slot < self.table[self.bucket].len() {
            return self;
        }

        *self = match next_occupied(self.table, self.bucket + 1) {
            Some(bucket) => Cursor::at(self.table, bucket, 0),
            None => Cursor::end(self.table),
        };
        self
    }

    /// Moves the Cursor to the preceding entry, skipping empty buckets. If the Cursor is already
    /// at the first entry (or the map is empty), it doesn't move.
    pub fn move_prev(&mut self) -> &mut Self {
        // This also covers the end sentinel when the last bucket has entries.
        if self.slot > 0 {
            self.slot -= 1;
            return self;
        }

        if let Some(bucket) = prev_occupied(self.table, self.bucket) {
            self.bucket = bucket;
            self.slot = self.table[bucket].len() - 1;
        }
        self
    }
}

/// Finds the first bucket at or after `from` which contains entries.
fn next_occupied<K, V>(table: &[Bucket<K, V>], from: usize) -> Option<usize> {
    (from..table.len()).find(|index| !table[*index].is_empty())
}

/// Finds the last bucket before `before` which contains entries.
fn prev_occupied<K, V>(table: &[Bucket<K, V>], before: usize) -> Option<usize> {
    (0..before).rev().find(|index| !table[*index].is_empty())
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.table, other.table) && self.position() == other.position()
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("bucket", &self.bucket)
            .field("slot", &self.slot)
            .field("entry", &self.read())
            .finish()
    }
}
