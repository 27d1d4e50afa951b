#![warn(missing_docs)]

pub mod alloc;
pub mod error;
pub mod fmt;
pub mod hash;
pub mod logger;
#[cfg(feature = "tree")]
pub mod option;
pub mod panic;
#[cfg(feature = "hash")]
pub mod result;
