#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

/// A zero-sized value, for checking that collections don't depend on the size of their elements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZeroSizedType;

/// A value which increments a shared counter when it is dropped, used to check that collections
/// drop every element exactly once.
#[derive(Debug)]
pub struct CountedDrop(Rc<Cell<usize>>);

impl CountedDrop {
    /// Creates a new counter starting at 0.
    pub fn counter() -> Rc<Cell<usize>> {
        Rc::new(Cell::new(0))
    }

    /// Creates a value reporting to the provided `counter`.
    pub fn new(counter: &Rc<Cell<usize>>) -> CountedDrop {
        CountedDrop(Rc::clone(counter))
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
