use std::fmt;

use generational_arena::Index;

use crate::tree::Tree;
use crate::util::Side;

/// The color of a node in a [`Tree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node. Never the root and never the parent of another red node.
    Red,
    /// A black node. Counted towards the black-height.
    Black,
}

impl Color {
    /// Whether this is [`Color::Red`].
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    /// Whether this is [`Color::Black`].
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("Red"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// A slot in the tree's arena. Every link points either at another node or at
/// the tree's sentinel, which is the only node without a key.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: Option<K>,
    pub(crate) color: Color,
    pub(crate) left: Index,
    pub(crate) right: Index,
    pub(crate) parent: Index,
}

impl<K> Node<K> {
    /// A fresh red leaf hanging off `parent`.
    pub(crate) fn new(key: K, parent: Index, nil: Index) -> Self {
        Self {
            key: Some(key),
            color: Color::Red,
            left: nil,
            right: nil,
            parent,
        }
    }

    /// The black, keyless node standing in for every absent child and for the
    /// root's parent. `nil` is its own index.
    pub(crate) fn sentinel(nil: Index) -> Self {
        Self {
            key: None,
            color: Color::Black,
            left: nil,
            right: nil,
            parent: nil,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Index {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Index {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A read-only view of one node in a [`Tree`], as returned by
/// [`Tree::search`] and [`Tree::root`]. It borrows the tree, so it cannot
/// outlive the next mutation.
pub struct NodeRef<'a, K> {
    tree: &'a Tree<K>,
    index: Index,
}

/// Manual implementations of `Clone` and `Copy` so we don't require `K: Clone` just to copy a
/// reference.
impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>, index: Index) -> Self {
        Self { tree, index }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        self.tree.key(self.index)
    }

    /// The color of this node.
    pub fn color(&self) -> Color {
        self.tree.arena[self.index].color
    }

    /// The left child, if there is one.
    pub fn left(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.arena[self.index].left)
    }

    /// The right child, if there is one.
    pub fn right(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.arena[self.index].right)
    }

    /// The parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.arena[self.index].parent)
    }
}

impl<K> PartialEq for NodeRef<'_, K> {
    /// Two references are equal when they point at the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<K> fmt::Debug for NodeRef<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
