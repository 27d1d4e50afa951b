use derive_more::{Display, Error};

/// The error returned when a lookup or removal targets a key or value that isn't present in the
/// collection. Collections that return it are left unchanged.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[display("No matching entry found in the collection!")]
pub struct NotFound;

/// The error produced when a collection would need a capacity larger than `usize::MAX`.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Capacity overflow!")]
pub struct CapacityOverflow;
