//! This crate exposes a Red-Black Tree, an ordered in-memory collection of keys
//! that keeps itself balanced on every insert and delete.
//!
//! ## Red-Black Tree
//!
//! A Red-Black Tree is a Binary Search Tree where every `Node` additionally
//! carries a color, red or black. The ordering invariant is the usual one:
//!
//! 1. For every `Node`, all the keys in its left subtree are no greater than
//!    its own key, and all the keys in its right subtree are no smaller.
//!
//! The colors are what keep the tree shallow:
//!
//! 2. The root is black, and every absent child (represented here by a single
//!    shared, always-black "sentinel" node) is black.
//! 3. A red `Node` never has a red child.
//! 4. Every path from a `Node` down to the sentinel passes through the same
//!    number of black `Node`s (the "black-height").
//!
//! Together 3 and 4 mean the longest root-to-leaf path is at most twice the
//! shortest, so searching, inserting, and deleting all take `O(lg N)`.
//!
//! Duplicate keys are accepted. They are inserted to the right of their equals,
//! and searching or deleting by such a key touches an arbitrary one of them.
//!
//! # Examples
//!
//! ```
//! use redblack::{Color, Tree};
//!
//! let mut tree = Tree::new();
//! for key in [10, 20, 30, 40, 50, 25] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.root().map(|root| *root.key()), Some(20));
//! assert_eq!(tree.search(&25).map(|n| n.color()), Some(Color::Red));
//! assert!(tree.delete(&25));
//! assert!(!tree.delete(&25));
//! assert!(tree.validate().is_ok());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod node;
mod tree;
mod util;
mod validate;

pub use node::{Color, NodeRef};
pub use tree::{Iter, Tree};
pub use validate::InvariantViolation;
