use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;

use log::trace;
use slotmap::SlotMap;

use super::{Color, InOrder, Link, Node, NodeKey, PreOrder, Side};
#[doc(inline)]
pub use crate::util::error::NotFound;
use crate::util::fmt::DebugRaw;
use crate::util::option::OptionExtension;

/// An ordered set of values, kept balanced by coloring each node red or black.
///
/// The tree maintains the following invariants between operations:
/// - The root is black.
/// - A red node never has a red child.
/// - Every path from a node down to a missing child passes through the same number of black
///   nodes (its black-height), with missing children counting as black.
///
/// Together, these keep the height of the tree within `2 * log2(n + 1)`.
///
/// It is a logic error for a value to be modified in a way that changes its ordering while it is
/// in the tree.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of values in the RedBlackTree.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `search/contains` | `O(log n)` |
/// | `first/last` | `O(log n)` |
/// | `inorder/preorder` | `O(n)` (total) |
pub struct RedBlackTree<T: Ord> {
    pub(crate) nodes: SlotMap<NodeKey, Node<T>>,
    pub(crate) root: Link,
}

/// The black deficit that a removal leaves behind. It starts on the removed leaf and moves up the
/// tree until a recoloring or rotation absorbs it, or it reaches the root.
#[derive(Debug, Clone, Copy)]
enum Deficit {
    DoubleBlack(NodeKey),
    Absorbed,
}

impl<T: Ord> RedBlackTree<T> {
    /// Creates a new, empty RedBlackTree.
    pub fn new() -> RedBlackTree<T> {
        RedBlackTree {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Returns the number of values in the RedBlackTree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the RedBlackTree contains no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `value` into the tree, returning true if it was added. If an equal value is
    /// already present the tree is left unchanged and false is returned.
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(key) = current {
            let node = &self.nodes[key];
            side = match value.cmp(&node.value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return false,
            };
            parent = current;
            current = node.child(side);
        }

        let key = self.nodes.insert(Node::new(value, parent));
        match parent {
            Some(parent) => *self.nodes[parent].child_mut(side) = Some(key),
            None => self.root = Some(key),
        }

        self.fix_insert(key);
        true
    }

    /// Removes the value equal to `value` from the tree and returns it. If there is no such value,
    /// the tree is left unchanged and [`NotFound`] is returned.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<T, NotFound>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.find(value).ok_or(NotFound)?;

        // A node with two children is never removed directly. Its in-order successor has no left
        // child, so that node is unlinked instead and its value moved up into the target.
        let unlinked = match (self.nodes[target].left, self.nodes[target].right) {
            (Some(_), Some(right)) => self.extreme(right, Side::Left),
            _ => target,
        };

        self.unlink(unlinked);
        let node = self.nodes.remove(unlinked).unreachable();

        if unlinked == target {
            Ok(node.value)
        } else {
            Ok(mem::replace(&mut self.nodes[target].value, node.value))
        }
    }

    /// Returns true if the tree contains a value equal to `value`.
    pub fn search<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Returns true if the tree contains a value equal to `value`. An alias of
    /// [`search`](RedBlackTree::search), matching the naming of other collections.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(value)
    }

    /// Returns a reference to the value in the tree equal to `value`, if there is one.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(|key| &self.nodes[key].value)
    }

    /// Returns the smallest value in the tree.
    pub fn first(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.extreme(root, Side::Left)].value)
    }

    /// Returns the largest value in the tree.
    pub fn last(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.extreme(root, Side::Right)].value)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns an iterator over the tree's values in ascending order.
    pub fn inorder(&self) -> InOrder<'_, T> {
        InOrder::new(&self.nodes, self.root)
    }

    /// Returns an iterator over the tree's values in pre-order: each node before its left subtree,
    /// followed by its right subtree.
    pub fn preorder(&self) -> PreOrder<'_, T> {
        PreOrder::new(&self.nodes, self.root)
    }

    /// Returns an iterator over the tree's values in ascending order. See
    /// [`inorder`](RedBlackTree::inorder).
    pub fn iter(&self) -> InOrder<'_, T> {
        self.into_iter()
    }
}

impl<T: Ord> RedBlackTree<T> {
    /// Finds the node holding a value equal to `value`.
    pub(crate) fn find<Q>(&self, value: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;

        while let Some(key) = current {
            let node = &self.nodes[key];
            current = match value.cmp(node.value.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(key),
            };
        }

        None
    }

    /// Follows `side` children from `key` for as long as possible, finding the minimum (left) or
    /// maximum (right) of the subtree.
    pub(crate) fn extreme(&self, mut key: NodeKey, side: Side) -> NodeKey {
        while let Some(child) = self.nodes[key].child(side) {
            key = child;
        }
        key
    }

    /// Returns the color of `link`, treating missing nodes as black.
    pub(crate) fn color(&self, link: Link) -> Color {
        match link {
            Some(key) => self.nodes[key].color,
            None => Color::Black,
        }
    }

    pub(crate) fn is_red(&self, link: Link) -> bool {
        self.color(link).is_red()
    }

    /// Returns which child of `parent` the node `key` is.
    fn side_of(&self, key: NodeKey, parent: NodeKey) -> Side {
        if self.nodes[parent].left == Some(key) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whichever link referred to `old` (a child link of `parent`, or the root if there is
    /// no parent) at `new` instead. The parent link of `new` is left to the caller.
    fn replace_child(&mut self, parent: Link, old: NodeKey, new: Link) {
        match parent {
            Some(parent) => {
                let side = self.side_of(old, parent);
                *self.nodes[parent].child_mut(side) = new;
            },
            None => self.root = new,
        }
    }

    /// Rotates the subtree rooted at `key` so that `key` moves down towards `side`, and its child
    /// on the opposite side takes its place. `rotate(key, Side::Left)` is a left rotation.
    pub(crate) fn rotate(&mut self, key: NodeKey, side: Side) {
        let other = side.opposite();
        // UNREACHABLE: Rotations are only performed towards a node's missing side when the other
        // side is present.
        let pivot = self.nodes[key].child(other).unreachable();

        let inner = self.nodes[pivot].child(side);
        *self.nodes[key].child_mut(other) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(key);
        }

        let parent = self.nodes[key].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, key, Some(pivot));

        *self.nodes[pivot].child_mut(side) = Some(key);
        self.nodes[key].parent = Some(pivot);
    }

    /// Restores the invariants after `key` has been inserted as a red leaf. The only possible
    /// violation is a red node with a red parent, which is either pushed up the tree by
    /// recoloring or resolved with at most two rotations.
    fn fix_insert(&mut self, mut key: NodeKey) {
        while let Some(parent) = self.nodes[key].parent
            && self.nodes[key].color.is_red()
            && self.nodes[parent].color.is_red()
        {
            // UNREACHABLE: The root is black, so a red parent always has a parent of its own.
            let grandparent = self.nodes[parent].parent.unreachable();
            let side = self.side_of(parent, grandparent);
            let uncle = self.nodes[grandparent].child(side.opposite());

            if let Some(uncle) = uncle
                && self.nodes[uncle].color.is_red()
            {
                trace!("Insert fix-up: red uncle, recoloring and moving up");
                self.nodes[uncle].color = Color::Black;
                self.nodes[parent].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                key = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.side_of(key, parent) != side {
                trace!("Insert fix-up: inner child, rotating at parent");
                self.rotate(parent, side);
                // The old parent is now the lower of the two red nodes.
                key = parent;
                parent = self.nodes[key].parent.unreachable();
            }

            trace!("Insert fix-up: outer child, rotating at grandparent");
            self.rotate(grandparent, side.opposite());
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            break;
        }

        self.paint_root_black();
    }

    /// Detaches `key`, which has at most one child, from the tree and restores the invariants. The
    /// node itself stays in the arena for the caller to remove.
    fn unlink(&mut self, key: NodeKey) {
        let node = &self.nodes[key];
        let child = node.left.or(node.right);
        let parent = node.parent;

        if node.color.is_red() || self.is_red(child) {
            // Removing a red node doesn't change any black-heights, and a red child can replace a
            // black node by taking its color.
            self.replace_child(parent, key, child);
            if let Some(child) = child {
                self.nodes[child].parent = parent;
                self.nodes[child].color = Color::Black;
            }
        } else if parent.is_none() {
            // A black root without a red child is the only node in the tree.
            self.root = None;
        } else {
            // A black node with a single black child would have unequal black-heights, so this
            // node is a leaf. It stays in place while the deficit is fixed, then gets detached.
            self.fix_remove(key);
            // Rotations during the fix-up may have given the node a new parent.
            let parent = self.nodes[key].parent;
            self.replace_child(parent, key, None);
        }

        self.paint_root_black();
    }

    /// Moves the black deficit left by removing the black leaf `key` up the tree until it can be
    /// absorbed by recoloring and rotation.
    fn fix_remove(&mut self, key: NodeKey) {
        let mut deficit = Deficit::DoubleBlack(key);

        while let Deficit::DoubleBlack(key) = deficit
            && let Some(parent) = self.nodes[key].parent
        {
            let side = self.side_of(key, parent);
            // UNREACHABLE: The sibling's subtree has the same black-height as the double black
            // node's did before removal, which is at least one.
            let sibling = self.nodes[parent].child(side.opposite()).unreachable();

            if self.nodes[sibling].color.is_red() {
                trace!("Remove fix-up: red sibling, rotating at parent");
                self.nodes[sibling].color = Color::Black;
                self.nodes[parent].color = Color::Red;
                self.rotate(parent, side);
                // The node now has a black sibling, one of the old sibling's children.
                continue;
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                self.nodes[sibling].color = Color::Red;

                deficit = if self.nodes[parent].color.is_red() {
                    trace!("Remove fix-up: black nephews, red parent absorbs the deficit");
                    self.nodes[parent].color = Color::Black;
                    Deficit::Absorbed
                } else {
                    trace!("Remove fix-up: black nephews, moving the deficit up");
                    Deficit::DoubleBlack(parent)
                };
                continue;
            }

            let mut sibling = sibling;
            if !self.is_red(far) {
                trace!("Remove fix-up: red near nephew, rotating at sibling");
                // UNREACHABLE: One of the nephews is red and it isn't the far one.
                let near = near.unreachable();
                self.nodes[near].color = Color::Black;
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = near;
            }

            trace!("Remove fix-up: red far nephew, rotating at parent");
            self.nodes[sibling].color = self.nodes[parent].color;
            self.nodes[parent].color = Color::Black;
            if let Some(far) = self.nodes[sibling].child(side.opposite()) {
                self.nodes[far].color = Color::Black;
            }
            self.rotate(parent, side);
            deficit = Deficit::Absorbed;
        }
    }

    fn paint_root_black(&mut self) {
        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Clone for RedBlackTree<T> {
    fn clone(&self) -> Self {
        // Keys are preserved by cloning the arena, so every link stays valid.
        RedBlackTree {
            nodes: self.nodes.clone(),
            root: self.root,
        }
    }
}

impl<T: Ord> PartialEq for RedBlackTree<T> {
    /// Two trees are equal if they hold the same values, regardless of their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for RedBlackTree<T> {}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord + Debug> RedBlackTree<T> {
    fn fmt_branch(&self, link: Link) -> String {
        match link {
            Some(key) => {
                let node = &self.nodes[key];
                let color = match node.color {
                    Color::Red => 'R',
                    Color::Black => 'B',
                };

                format!(
                    "{}\n({:?} {})\n{}",
                    self.fmt_branch(node.left)
                        .lines()
                        .map(|l| String::from("┌    ") + l)
                        .collect::<Vec<_>>()
                        .join("\n"),
                    node.value,
                    color,
                    self.fmt_branch(node.right)
                        .lines()
                        .map(|l| String::from("└    ") + l)
                        .collect::<Vec<_>>()
                        .join("\n")
                )
            },
            None => "-".into(),
        }
    }
}

impl<T: Ord + Debug> Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("nodes", &DebugRaw(format!("\n{}\n", self.fmt_branch(self.root))))
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Ord + Debug> Display for RedBlackTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
