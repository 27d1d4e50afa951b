//! Associative collection types.
//!
//! # Purpose
//! These types were written to learn about the data structures themselves, but also concepts such
//! as hashing, cursors, arenas and iterators.
//!
//! # Method
//! Each collection lives in its own module, alongside the iterators and other types it hands out.
//! Its main type is re-exported here one level up, so `hash::HashMap` and `tree::RedBlackTree` are
//! the usual paths.

#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "tree")]
pub mod tree;
