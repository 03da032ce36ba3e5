//! The Red-Black Tree itself. Nodes live in an arena and refer to each other by
//! index, so a parent and its child can point at each other without any shared
//! ownership. Absent children (and the root's parent) all point at one sentinel
//! slot allocated alongside the tree.

use std::cmp::Ordering;
use std::fmt;

use generational_arena::{Arena, Index};
use log::{debug, trace};

use crate::node::{Color, Node, NodeRef};
use crate::util::Side;

/// A self-balancing Binary Search Tree (specifically, a Red-Black Tree) of keys.
/// This can be used for inserting, searching, and deleting keys and for walking
/// them in sorted order.
///
/// # Examples
///
/// ```
/// use redblack::Tree;
///
/// let mut tree = Tree::new();
///
/// // Nothing in here yet.
/// assert!(tree.search(&1).is_none());
///
/// tree.insert(1);
/// assert_eq!(tree.search(&1).map(|n| *n.key()), Some(1));
///
/// // Deleting tells you whether anything was there.
/// assert!(tree.delete(&1));
/// assert!(!tree.delete(&1));
/// assert!(tree.is_empty());
/// ```
#[derive(Clone)]
pub struct Tree<K> {
    pub(crate) arena: Arena<Node<K>>,
    pub(crate) root: Index,
    pub(crate) nil: Index,
    pub(crate) len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let nil = arena.insert_with(Node::sentinel);
        Self {
            arena,
            root: nil,
            nil,
            len: 0,
        }
    }

    /// How many keys are stored in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// The root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.node_ref(self.root)
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        (self.root != self.nil).then(|| self.key(self.extreme(self.root, Side::Left)))
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        (self.root != self.nil).then(|| self.key(self.extreme(self.root, Side::Right)))
    }

    /// The number of black nodes on every path from the root down to (but not
    /// including) the sentinel. Zero for an empty tree.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while current != self.nil {
            if self.color(current).is_black() {
                height += 1;
            }
            current = self.arena[current].left;
        }
        height
    }

    /// Iterates over the keys and their colors in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::{Color, Tree};
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// let walked: Vec<_> = tree.iter().collect();
    ///
    /// assert_eq!(
    ///     walked,
    ///     vec![(&1, Color::Red), (&2, Color::Black), (&3, Color::Red)]
    /// );
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// A sorted snapshot of every key and its color. Unlike [`Tree::iter`] the
    /// returned sequence is owned and unaffected by later mutations.
    pub fn inorder(&self) -> Vec<(K, Color)>
    where
        K: Clone,
    {
        self.iter().map(|(key, color)| (key.clone(), color)).collect()
    }

    /// Finds a node holding the given key. If several nodes hold equal keys, any
    /// one of them may be returned. Never modifies the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.search(&1).map(|n| *n.key()), Some(1));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>>
    where
        K: Ord,
    {
        self.find_node(key).map(|index| NodeRef::new(self, index))
    }

    /// Whether some node holds the given key.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find_node(key).is_some()
    }

    /// Inserts the key. Duplicate keys are kept, each in its own node.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let mut parent = self.nil;
        let mut side = Side::Left;
        let mut current = self.root;
        while current != self.nil {
            parent = current;
            // Ties go right so equal keys keep their insertion order.
            side = if key < *self.key(current) {
                Side::Left
            } else {
                Side::Right
            };
            current = self.arena[current].child(side);
        }

        let node = self.arena.insert(Node::new(key, parent, self.nil));
        if parent == self.nil {
            self.root = node;
        } else {
            *self.arena[parent].child_mut(side) = node;
        }
        self.len += 1;
        debug!("inserted node {:?}, len {}", node, self.len);

        self.insert_fixup(node);
    }

    /// Deletes one node holding the given key and returns whether there was
    /// one. Deleting an absent key leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.delete(&1));
    /// assert!(!tree.delete(&1));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let Some(z) = self.find_node(key) else {
            debug!("delete missed, len {}", self.len);
            return false;
        };

        let (z_left, z_right) = (self.arena[z].left, self.arena[z].right);
        // `y` is the node that physically leaves its position: `z` itself when it
        // has at most one child, otherwise its successor, which moves into `z`'s
        // slot. `x` is whatever moves into `y`'s old position.
        let mut removed_color = self.color(z);
        let x = if z_left == self.nil {
            self.transplant(z, z_right);
            z_right
        } else if z_right == self.nil {
            self.transplant(z, z_left);
            z_left
        } else {
            let y = self.extreme(z_right, Side::Left);
            removed_color = self.color(y);
            let x = self.arena[y].right;

            if self.arena[y].parent == z {
                // `x` may be the sentinel; the fixup below still needs its parent.
                self.arena[x].parent = y;
            } else {
                self.transplant(y, x);
                self.arena[y].right = z_right;
                self.arena[z_right].parent = y;
            }

            self.transplant(z, y);
            self.arena[y].left = z_left;
            self.arena[z_left].parent = y;
            self.arena[y].color = self.arena[z].color;
            x
        };

        self.arena.remove(z);
        self.len -= 1;
        debug!("deleted node {:?}, len {}", z, self.len);

        if removed_color.is_black() {
            self.delete_fixup(x);
        }
        true
    }

    /// Restores "no red node has a red child" after `z` was linked in as a red
    /// leaf. Walks up while `z` and its parent are both red.
    fn insert_fixup(&mut self, mut z: Index) {
        while self.color(self.parent(z)).is_red() {
            let parent = self.parent(z);
            // A red parent is never the root, so the grandparent is real.
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.arena[grandparent].child(side.opposite());

            if self.color(uncle).is_red() {
                trace!("insert fixup: uncle red, recoloring {:?}", grandparent);
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                z = grandparent;
                continue;
            }

            if z == self.arena[parent].child(side.opposite()) {
                trace!("insert fixup: inner child, rotating {:?}", parent);
                z = parent;
                self.rotate(z, side);
            }

            trace!("insert fixup: outer child, rotating {:?}", grandparent);
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            self.paint(parent, Color::Black);
            self.paint(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.paint(root, Color::Black);
        self.debug_assert_colors();
    }

    /// Restores black-height uniformity after a black node was removed from
    /// above `x`, which now carries an extra "black" it has to get rid of.
    fn delete_fixup(&mut self, mut x: Index) {
        while x != self.root && self.color(x).is_black() {
            let parent = self.parent(x);
            let side = if self.arena[parent].left == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();
            let mut sibling = self.arena[parent].child(far);

            if self.color(sibling).is_red() {
                trace!("delete fixup: sibling red, rotating {:?}", parent);
                self.paint(sibling, Color::Black);
                self.paint(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.arena[parent].child(far);
            }

            let near_nephew = self.arena[sibling].child(side);
            let far_nephew = self.arena[sibling].child(far);
            if self.color(near_nephew).is_black() && self.color(far_nephew).is_black() {
                trace!("delete fixup: nephews black, moving up to {:?}", parent);
                self.paint(sibling, Color::Red);
                x = parent;
                continue;
            }

            if self.color(far_nephew).is_black() {
                trace!("delete fixup: near nephew red, rotating {:?}", sibling);
                self.paint(near_nephew, Color::Black);
                self.paint(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.arena[parent].child(far);
            }

            trace!("delete fixup: far nephew red, rotating {:?}", parent);
            let parent_color = self.color(parent);
            let far_nephew = self.arena[sibling].child(far);
            self.paint(sibling, parent_color);
            self.paint(parent, Color::Black);
            self.paint(far_nephew, Color::Black);
            self.rotate(parent, side);
            x = self.root;
        }

        self.paint(x, Color::Black);
        self.debug_assert_colors();
    }

    /// Rotate `x` down towards `direction`, lifting its child on the opposite
    /// side into its place. Only used from the fixups, which restore the color
    /// invariants afterwards.
    ///
    /// ## Panics
    ///
    /// In debug builds, when `x` has no child on the side being lifted.
    ///
    /// # Diagram
    ///
    /// With `direction == Side::Left`:
    ///
    /// ```text
    ///    parent               parent
    ///      |                    |
    ///      x                  pivot
    ///     / \                 /   \
    ///    a  pivot   rotate ->  x    c
    ///       /   \            / \
    ///      b     c          a   b
    /// ```
    fn rotate(&mut self, x: Index, direction: Side) {
        let lifted = direction.opposite();
        let pivot = self.arena[x].child(lifted);
        debug_assert!(pivot != self.nil, "rotation needs a pivot child");

        let inner = self.arena[pivot].child(direction);
        *self.arena[x].child_mut(lifted) = inner;
        if inner != self.nil {
            self.arena[inner].parent = x;
        }

        let parent = self.parent(x);
        self.arena[pivot].parent = parent;
        self.replace_child(parent, x, pivot);

        *self.arena[pivot].child_mut(direction) = x;
        self.arena[x].parent = pivot;
    }

    /// Hangs `v` where `u` used to hang. `u`'s own links are left alone. `v`
    /// may be the sentinel, whose parent is then set so the delete fixup can
    /// climb from it.
    fn transplant(&mut self, u: Index, v: Index) {
        let parent = self.parent(u);
        self.replace_child(parent, u, v);
        self.arena[v].parent = parent;
    }

    /// Points whichever link of `parent` referenced `old` at `new` instead,
    /// treating the sentinel as the parent of the root.
    fn replace_child(&mut self, parent: Index, old: Index, new: Index) {
        if parent == self.nil {
            self.root = new;
        } else if self.arena[parent].left == old {
            self.arena[parent].left = new;
        } else {
            self.arena[parent].right = new;
        }
    }

    /// Which side of its parent `node` hangs on. `node` must not be the root.
    fn side_of(&self, node: Index) -> Side {
        if self.arena[self.parent(node)].left == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Follows `side` links from `node` until the next one is the sentinel.
    /// `node` must be real.
    fn extreme(&self, mut node: Index, side: Side) -> Index {
        loop {
            let next = self.arena[node].child(side);
            if next == self.nil {
                return node;
            }
            node = next;
        }
    }

    pub(crate) fn find_node(&self, key: &K) -> Option<Index>
    where
        K: Ord,
    {
        let mut current = self.root;
        while current != self.nil {
            current = match key.cmp(self.key(current)) {
                Ordering::Equal => return Some(current),
                Ordering::Less => self.arena[current].left,
                Ordering::Greater => self.arena[current].right,
            };
        }
        None
    }

    pub(crate) fn node_ref(&self, index: Index) -> Option<NodeRef<'_, K>> {
        (index != self.nil).then(|| NodeRef::new(self, index))
    }

    pub(crate) fn key(&self, index: Index) -> &K {
        self.arena[index]
            .key
            .as_ref()
            .expect("the sentinel has no key")
    }

    pub(crate) fn color(&self, index: Index) -> Color {
        self.arena[index].color
    }

    fn parent(&self, index: Index) -> Index {
        self.arena[index].parent
    }

    /// Sets a node's color. The sentinel stays black no matter what is asked.
    fn paint(&mut self, index: Index, color: Color) {
        if index == self.nil {
            debug_assert!(color.is_black(), "the sentinel must stay black");
            return;
        }
        self.arena[index].color = color;
    }

    fn debug_assert_colors(&self) {
        debug_assert!(self.color(self.root).is_black(), "root must be black");
        debug_assert!(self.color(self.nil).is_black(), "sentinel must be black");
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = (&'a K, Color);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`Tree`], created by [`Tree::iter`]. Keeps an
/// explicit stack of the nodes whose left subtree is being walked.
pub struct Iter<'a, K> {
    tree: &'a Tree<K>,
    stack: Vec<Index>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(tree: &'a Tree<K>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.len,
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Index) {
        while node != self.tree.nil {
            self.stack.push(node);
            node = self.tree.arena[node].left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(self.tree.arena[node].right);
        self.remaining = self.remaining.saturating_sub(1);
        Some((self.tree.key(node), self.tree.color(node)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
