use std::iter::FusedIterator;

use slotmap::SlotMap;

use super::{Link, Node, NodeKey, RedBlackTree};

impl<T: Ord> IntoIterator for RedBlackTree<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let order = InOrder::new(&self.nodes, self.root).keys().collect::<Vec<_>>();

        IntoIter {
            nodes: self.nodes,
            order: order.into_iter(),
        }
    }
}

/// A type for owned iteration over a [`RedBlackTree`], producing values in ascending order.
pub struct IntoIter<T> {
    pub(crate) nodes: SlotMap<NodeKey, Node<T>>,
    pub(crate) order: std::vec::IntoIter<NodeKey>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.order.next()?;
        self.nodes.remove(key).map(|node| node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.order.next_back()?;
        self.nodes.remove(key).map(|node| node.value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T: Ord> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;

    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

/// A type for borrowed iteration over a [`RedBlackTree`] in ascending order. See
/// [`RedBlackTree::inorder`].
///
/// The traversal keeps an explicit stack of the nodes whose left subtrees are being visited, so it
/// never recurses and holds at most one node per level of the tree.
pub struct InOrder<'a, T> {
    pub(crate) nodes: &'a SlotMap<NodeKey, Node<T>>,
    pub(crate) stack: Vec<NodeKey>,
    pub(crate) len: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(nodes: &'a SlotMap<NodeKey, Node<T>>, root: Link) -> InOrder<'a, T> {
        let mut iter = InOrder {
            nodes,
            stack: Vec::new(),
            len: nodes.len(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(key) = link {
            self.stack.push(key);
            link = self.nodes[key].left;
        }
    }

    fn next_key(&mut self) -> Option<NodeKey> {
        let key = self.stack.pop()?;
        self.push_left_spine(self.nodes[key].right);
        self.len -= 1;
        Some(key)
    }

    /// Converts the traversal into one over node keys, for owned iteration.
    pub(crate) fn keys(mut self) -> impl Iterator<Item = NodeKey> {
        std::iter::from_fn(move || self.next_key())
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.next_key().map(|key| &nodes[key].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}

impl<T> FusedIterator for InOrder<'_, T> {}

impl<T> Clone for InOrder<'_, T> {
    fn clone(&self) -> Self {
        InOrder {
            nodes: self.nodes,
            stack: self.stack.clone(),
            len: self.len,
        }
    }
}

/// A type for borrowed iteration over a [`RedBlackTree`] in pre-order, visiting each node before
/// its left and then right subtrees. See [`RedBlackTree::preorder`].
pub struct PreOrder<'a, T> {
    pub(crate) nodes: &'a SlotMap<NodeKey, Node<T>>,
    pub(crate) stack: Vec<NodeKey>,
    pub(crate) len: usize,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(nodes: &'a SlotMap<NodeKey, Node<T>>, root: Link) -> PreOrder<'a, T> {
        PreOrder {
            nodes,
            stack: root.into_iter().collect(),
            len: nodes.len(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.stack.pop()?];

        // Right is pushed first so that the left subtree is visited first.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        self.len -= 1;

        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for PreOrder<'_, T> {}

impl<T> FusedIterator for PreOrder<'_, T> {}

impl<T> Clone for PreOrder<'_, T> {
    fn clone(&self) -> Self {
        PreOrder {
            nodes: self.nodes,
            stack: self.stack.clone(),
            len: self.len,
        }
    }
}
