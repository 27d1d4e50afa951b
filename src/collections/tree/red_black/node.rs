use derive_more::IsVariant;
use slotmap::new_key_type;

new_key_type! {
    /// A handle to a [`Node`] within a tree's arena.
    pub(crate) struct NodeKey;
}

pub(crate) type Link = Option<NodeKey>;

/// The color of a node at rest. The double black state only exists while a removal is being
/// fixed up and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub(crate) enum Color {
    Red,
    Black,
}

/// One of a node's two children, or the direction that a rotation moves a node in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub value: T,
    pub color: Color,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
}

impl<T> Node<T> {
    /// Creates a new red leaf below `parent`.
    pub const fn new(value: T, parent: Link) -> Node<T> {
        Node {
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    pub const fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub const fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
