//! This crate exposes a plain, unbalanced Binary Search Tree (BST) whose nodes
//! know their parent, along with a diagnostic dump of its shape.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! ## Parent links
//!
//! Every node here also points back at its parent, which lets a caller hold on
//! to a node (through a [`NodeId`]) and later ask for its parent, its side, or
//! remove it directly without searching. Parent and child links are kept in
//! agreement by every operation: whenever a node has a parent, it is either
//! that parent's left or right child.
//!
//! Nothing is rebalanced. Inserting keys in sorted order produces a tree
//! that is really a linked list, and every operation is `O(height)`.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key);
//! }
//!
//! let seven = tree.find(&7).unwrap().unwrap();
//! assert_eq!(tree.get(seven).unwrap().parent().map(|p| *p.key()), Some(8));
//!
//! tree.remove(&8);
//! assert!(tree.contains(&9));
//! println!("{}", tree);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod dump;
mod error;
pub mod tree;

pub use dump::{Dump, DumpLine};
pub use error::Error;
pub use tree::{NodeId, NodeRef, Side, Tree};
