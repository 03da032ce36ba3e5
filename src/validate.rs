use generational_arena::Index;
use thiserror::Error;

use crate::tree::Tree;
use crate::util::Side;

/// A broken structural invariant, as reported by [`Tree::validate`]. Seeing one
/// of these means the tree's own bookkeeping is wrong, not that it was misused.
///
/// Depths count edges from the root, which has depth 0.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The shared sentinel was painted red.
    #[error("the sentinel is not black")]
    SentinelNotBlack,
    /// The root was left red.
    #[error("the root is not black")]
    RootNotBlack,
    /// Two red nodes sit directly on top of each other.
    #[error("red node at depth {depth} has a red child")]
    RedRed {
        /// Depth of the red parent.
        depth: usize,
    },
    /// The two subtrees of a node contain different numbers of black nodes.
    #[error("black height differs below node at depth {depth}: {left} on the left, {right} on the right")]
    BlackHeight {
        /// Depth of the unbalanced node.
        depth: usize,
        /// Black nodes on any path through the left subtree.
        left: usize,
        /// Black nodes on any path through the right subtree.
        right: usize,
    },
    /// A child does not name its parent as its parent.
    #[error("node at depth {depth} does not point back at its parent")]
    BrokenParentLink {
        /// Depth of the child.
        depth: usize,
    },
    /// An in-order walk produced a key smaller than the one before it.
    #[error("key at in-order position {position} is smaller than its predecessor")]
    OutOfOrder {
        /// Zero-based position of the offending key in the in-order walk.
        position: usize,
    },
    /// The tree's length disagrees with the number of reachable nodes.
    #[error("tree records {expected} keys but {found} nodes are reachable")]
    LengthMismatch {
        /// The length the tree recorded.
        expected: usize,
        /// How many nodes were reachable from the root when checking stopped.
        found: usize,
    },
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Checks every structural invariant of the tree: ordering, the color
    /// rules, uniform black-height, parent links agreeing with child links, and
    /// the recorded length. Takes `O(N)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::Tree;
    ///
    /// let tree: Tree<_> = (0..100).collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.color(self.nil).is_red() {
            return Err(InvariantViolation::SentinelNotBlack);
        }
        if self.root != self.nil {
            if self.color(self.root).is_red() {
                return Err(InvariantViolation::RootNotBlack);
            }
            if self.arena[self.root].parent != self.nil {
                return Err(InvariantViolation::BrokenParentLink { depth: 0 });
            }
        }

        let mut found = 0;
        self.check_subtree(self.root, 0, &mut found)?;
        if found != self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found,
            });
        }

        // Only walk in order once the links are known to form a proper tree.
        let mut previous = None;
        for (position, (key, _)) in self.iter().enumerate() {
            if previous.map_or(false, |previous| key < previous) {
                return Err(InvariantViolation::OutOfOrder { position });
            }
            previous = Some(key);
        }

        Ok(())
    }

    /// Checks the color and link rules below `node` and returns the number of
    /// black nodes on every path from `node` down to the sentinel, counting
    /// `node` itself.
    fn check_subtree(
        &self,
        node: Index,
        depth: usize,
        found: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        if node == self.nil {
            return Ok(0);
        }

        *found += 1;
        // More nodes than recorded means a cycle or a lost length update. Stop
        // before a cycle recurses forever.
        if *found > self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found: *found,
            });
        }

        let color = self.color(node);
        for side in [Side::Left, Side::Right] {
            let child = self.arena[node].child(side);
            if child == self.nil {
                continue;
            }
            if self.arena[child].parent != node {
                return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 });
            }
            if color.is_red() && self.color(child).is_red() {
                return Err(InvariantViolation::RedRed { depth });
            }
        }

        let left = self.check_subtree(self.arena[node].left, depth + 1, found)?;
        let right = self.check_subtree(self.arena[node].right, depth + 1, found)?;
        if left != right {
            return Err(InvariantViolation::BlackHeight { depth, left, right });
        }

        Ok(left + usize::from(color.is_black()))
    }
}
