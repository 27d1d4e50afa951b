//! A module containing [`RedBlackTree`] and associated types.
//!
//! The tree keeps its nodes in an arena, linking them with keys rather than pointers. Parent links
//! are plain keys as well, so no node is ever owned twice. Alongside owned and borrowed iteration
//! in sorted order, the tree can be walked in pre-order (root first).
//!
//! [`RedBlackTree`] is also re-exported under the parent module.

mod iter;
mod node;
mod red_black_tree;

pub use iter::*;
pub(crate) use node::*;
pub use red_black_tree::*;
