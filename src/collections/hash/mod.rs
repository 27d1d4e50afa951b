//! Hash-based collections.

pub mod map;

#[doc(inline)]
pub use map::HashMap;
