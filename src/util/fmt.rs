use std::fmt::{self, Debug, Formatter};

/// A preformatted string which is written as-is by [`Debug`], without the quotes and escaping that
/// [`String`]'s implementation adds. Used to embed bucket chains and tree drawings in debug
/// structs.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
