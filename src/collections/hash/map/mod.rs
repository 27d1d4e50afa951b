//! A module containing [`HashMap`] and associated types.
//!
//! The map chains colliding entries into per-bucket vectors and grows through a fixed table of
//! prime capacities. Besides the usual owned and borrowed iterators, a [`Cursor`] provides
//! bi-directional traversal over the two levels of buckets and entries.
//!
//! As a note, mutable iteration only ever hands out mutable references to values, because mutating
//! the keys of a HashMap in place would cause a logic error.
//!
//! [`HashMap`] is also re-exported under the parent module.

mod capacity;
mod cursor;
mod hash_map;
mod iter;
mod tests;

pub use cursor::*;
pub use hash_map::*;
pub use iter::*;
