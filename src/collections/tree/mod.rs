//! Tree-based collections.

pub mod red_black;

#[doc(inline)]
pub use red_black::RedBlackTree;
