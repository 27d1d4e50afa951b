//! This crate contains two associative collections written from the ground up: a chained
//! [`HashMap`](collections::hash::HashMap) with prime-sized bucket tables, and a self-balancing
//! [`RedBlackTree`](collections::tree::RedBlackTree).
//!
//! # Purpose
//! This crate is a learning project, with no expectation for it to be used in production. Writing
//! these data structures is a way to understand them properly: how a hash table decides when to
//! grow, and how a red-black tree keeps itself balanced through recoloring and rotation.
//!
//! # Method
//! Both collections are written from an existing understanding of the data structures rather than
//! by following a guide. The APIs take a lot of inspiration from Rust's [`std`] collections, but
//! don't try to copy them. The HashMap exposes its bucket layout through a bi-directional
//! [`Cursor`](collections::hash::map::Cursor), and the RedBlackTree can be walked in pre-order as
//! well as sorted order.
//!
//! # Error Handling
//! Operations that can fail for reasons the caller should care about return a [`Result`] with a
//! small, strongly-typed error, such as [`NotFound`](collections::hash::map::NotFound) when
//! removing something that isn't there. Conditions that can only arise from a broken invariant or
//! an impossible capacity panic instead, because forcing every caller to handle a capacity overflow
//! on each insert isn't ergonomic.
//!
//! # Dependencies
//! Both collections store their data in [`Vec`]s, which are treated as an existing growable
//! sequence rather than something to reimplement here. The tree keeps its nodes in a
//! [`slotmap`] arena, so that parent links don't need shared ownership or raw pointers. This crate
//! also depends on some derive macros because they remove the need for some very repetitive
//! programming, and on [`log`] for tracing rehashes and rebalancing.
//!
//! # Features
//! - `hash`: The [`HashMap`](collections::hash::HashMap) and its cursor and iterators.
//! - `tree`: The [`RedBlackTree`](collections::tree::RedBlackTree) and its iterators.
//!
//! Both are enabled by default through `collections-all`.

#![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
