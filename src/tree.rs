//! A mutable BST whose nodes know their parent. Nodes live in an arena owned by the [`Tree`] and
//! are addressed through copyable [`NodeId`] handles, so a parent link is just another handle
//! instead of an aliasing pointer.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Side, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet, and searching an empty tree is an error.
//! assert_eq!(tree.find(&1), Err(Error::EmptyTree));
//!
//! let one = tree.insert(1);
//! let two = tree.insert(2);
//! assert_eq!(tree.find(&2), Ok(Some(two)));
//! assert_eq!(tree.get(two).and_then(|n| n.side()), Some(Side::Right));
//!
//! // Inserting an existing key hands back the node that already holds it.
//! assert_eq!(tree.insert(1), one);
//!
//! // Removing a key returns it.
//! assert_eq!(tree.remove(&2), Some(2));
//! assert_eq!(tree.find(&2), Ok(None));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::Error;

/// A handle to a node of a [`Tree`].
///
/// Handles are only meaningful for the tree that issued them. Once the node is removed the handle
/// stays dead: slots are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child slot of its parent a node occupies. The root has no side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The node is its parent's left child.
    Left,
    /// The node is its parent's right child.
    Right,
}

#[derive(Debug, Clone)]
struct Node<T> {
    key: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(key: T, parent: Option<NodeId>) -> Self {
        Self {
            key,
            parent,
            left: None,
            right: None,
        }
    }

    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Where a descent for some key stopped.
enum Descent {
    /// A node with an equal key.
    Found(NodeId),
    /// The empty child slot the key would go into.
    Vacant { parent: NodeId, side: Side },
}

/// An unbalanced Binary Search Tree of unique keys with parent links.
///
/// Nothing is ever rebalanced, so every operation is `O(depth)` and inserting keys in sorted order
/// degrades the tree into a list. All descents are loops, so a degenerate tree is slow but never
/// overflows the stack.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    root: Option<NodeId>,
    nodes: Vec<Option<Node<T>>>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Generate a new, empty `Tree` with room for `capacity` insertions before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            root: None,
            nodes: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// The root node, if the tree has any nodes.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of keys currently in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Looks at the node behind `id`. Returns `None` if it has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Side, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(5);
    /// let three = tree.insert(3);
    ///
    /// let node = tree.get(three).unwrap();
    /// assert_eq!(node.key(), &3);
    /// assert_eq!(node.side(), Some(Side::Left));
    /// assert_eq!(node.parent().map(|p| *p.key()), Some(5));
    ///
    /// tree.remove(&3);
    /// assert!(tree.get(three).is_none());
    /// ```
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        if self.is_live(id) {
            Some(NodeRef { tree: self, id })
        } else {
            None
        }
    }

    fn is_live(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.0]
            .as_ref()
            .expect("Linked node ids always refer to live nodes")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.0]
            .as_mut()
            .expect("Linked node ids always refer to live nodes")
    }

    /// The parent of `id` and the slot of the parent that holds it.
    fn slot(&self, id: NodeId) -> Option<(NodeId, Side)> {
        let parent = self.node(id).parent?;
        let side = if self.node(parent).left == Some(id) {
            Side::Left
        } else {
            Side::Right
        };
        Some((parent, side))
    }

    fn push(&mut self, key: T, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(Some(Node::new(key, parent)));
        self.len += 1;
        NodeId(self.nodes.len() - 1)
    }

    /// Drops the node out of the arena. Whatever linked to it must have been relinked already.
    fn free(&mut self, id: NodeId) -> T {
        let node = self.nodes[id.0]
            .take()
            .expect("Only live nodes are freed");
        self.len -= 1;
        node.key
    }

    /// Points whatever held `id` (its parent's slot, or the root) at `replacement` instead.
    fn replace_in_parent(&mut self, id: NodeId, replacement: Option<NodeId>) {
        match self.slot(id) {
            Some((parent, side)) => *self.node_mut(parent).child_mut(side) = replacement,
            None => self.root = replacement,
        }
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts `key` into the tree and returns the node holding it. If a node with an equal key
    /// already exists, that node is returned and the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(5);
    ///
    /// assert_eq!(tree.root(), Some(root));
    /// assert_eq!(tree.insert(5), root);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> NodeId {
        match self.root {
            Some(root) => self.insert_below(key, root),
            None => {
                let id = self.push(key, None);
                self.root = Some(id);
                trace!("inserted node {} as the root", id);
                id
            }
        }
    }

    /// Like [`insert`][Tree::insert] but descends from `start` instead of the root.
    ///
    /// Fails with [`Error::UnknownNode`] if `start` is not in the tree and with
    /// [`Error::OutOfSubtree`] if `key` cannot live below `start` without breaking the ordering
    /// (including when an ancestor of `start` already holds `key`).
    pub fn insert_from(&mut self, key: T, start: NodeId) -> Result<NodeId, Error> {
        if !self.is_live(start) {
            return Err(Error::UnknownNode(start));
        }
        if !self.fits_below(&key, start) {
            return Err(Error::OutOfSubtree(start));
        }

        Ok(self.insert_below(key, start))
    }

    /// Looks up the node holding `key`.
    ///
    /// Returns `Ok(None)` if no node has the key and [`Error::EmptyTree`] if there is nothing to
    /// search at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.find(&1), Err(Error::EmptyTree));
    ///
    /// let one = tree.insert(1);
    /// assert_eq!(tree.find(&1), Ok(Some(one)));
    /// assert_eq!(tree.find(&42), Ok(None));
    /// ```
    pub fn find(&self, key: &T) -> Result<Option<NodeId>, Error> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        Ok(self.lookup(key, root))
    }

    /// Like [`find`][Tree::find] but only searches the subtree rooted at `start`.
    pub fn find_from(&self, key: &T, start: NodeId) -> Result<Option<NodeId>, Error> {
        if !self.is_live(start) {
            return Err(Error::UnknownNode(start));
        }
        Ok(self.lookup(key, start))
    }

    /// Whether some node holds `key`. An empty tree contains nothing.
    pub fn contains(&self, key: &T) -> bool {
        matches!(self.find(key), Ok(Some(_)))
    }

    /// Removes the node holding `key` and returns the key. Does nothing if there is no such node.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let id = self.find(key).ok().flatten()?;
        self.remove_node(id)
    }

    /// Removes the node behind `id` and returns its key. Does nothing if `id` is not in the tree.
    ///
    /// A node with a single child is replaced by that child. A node with two children that hangs
    /// off a parent is replaced by its right child, and its left subtree is then re-inserted below
    /// that right child. The root keeps its identity instead: it takes over the key and both
    /// subtrees of its right child and then has its old left subtree re-inserted below itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(5);
    /// tree.insert(3);
    /// tree.insert(8);
    ///
    /// assert_eq!(tree.remove_node(root), Some(5));
    ///
    /// // The root node now holds the key of its old right child.
    /// assert_eq!(tree.root(), Some(root));
    /// assert_eq!(tree.get(root).map(|n| *n.key()), Some(8));
    /// assert_eq!(tree.get(root).and_then(|n| n.left()).map(|n| *n.key()), Some(3));
    /// ```
    pub fn remove_node(&mut self, id: NodeId) -> Option<T> {
        if !self.is_live(id) {
            trace!("node {} is not in the tree, nothing to remove", id);
            return None;
        }

        let node = self.node(id);
        let (parent, left, right) = (node.parent, node.left, node.right);
        let removed = match (left, right) {
            (None, None) => {
                debug!("removing leaf node {}", id);
                self.replace_in_parent(id, None);
                self.free(id)
            }
            (Some(child), None) | (None, Some(child)) => {
                debug!("splicing node {} into the place of node {}", child, id);
                self.replace_in_parent(id, Some(child));
                self.node_mut(child).parent = parent;
                self.free(id)
            }
            (Some(left), Some(right)) => match parent {
                Some(parent) => {
                    debug!(
                        "promoting node {} into the place of node {} and re-inserting node {}",
                        right, id, left
                    );
                    self.replace_in_parent(id, Some(right));
                    self.node_mut(right).parent = Some(parent);
                    self.attach(left, right);
                    self.free(id)
                }
                None => {
                    debug!(
                        "root {} takes over node {} and re-inserts node {}",
                        id, right, left
                    );
                    self.absorb_right_child(id, left, right)
                }
            },
        };

        self.assert_invariants();
        Some(removed)
    }

    /// The two-children case for the root: `root` keeps its place but takes the key and the
    /// subtrees of its right child, then the old left subtree is re-inserted below `root`.
    /// Returns the key `root` held before.
    fn absorb_right_child(&mut self, root: NodeId, left: NodeId, right: NodeId) -> T {
        let promoted = self.nodes[right.0]
            .take()
            .expect("Children of live nodes are live");
        self.len -= 1;

        let node = self.node_mut(root);
        let removed = mem::replace(&mut node.key, promoted.key);
        node.left = promoted.left;
        node.right = promoted.right;
        for child in promoted.left.into_iter().chain(promoted.right) {
            self.node_mut(child).parent = Some(root);
        }

        self.attach(left, root);
        removed
    }

    fn insert_below(&mut self, key: T, start: NodeId) -> NodeId {
        let descent = self.descend(&key, start);
        let id = match descent {
            Descent::Found(existing) => {
                trace!("key already held by node {}", existing);
                return existing;
            }
            Descent::Vacant { parent, side } => {
                let id = self.push(key, Some(parent));
                *self.node_mut(parent).child_mut(side) = Some(id);
                trace!("inserted node {} as the {:?} child of node {}", id, side, parent);
                id
            }
        };

        self.assert_invariants();
        id
    }

    /// Hangs the detached subtree rooted at `subtree` into the first vacant slot found by
    /// descending from `start` with the subtree root's key.
    fn attach(&mut self, subtree: NodeId, start: NodeId) {
        let descent = self.descend(&self.node(subtree).key, start);
        match descent {
            Descent::Vacant { parent, side } => {
                *self.node_mut(parent).child_mut(side) = Some(subtree);
                self.node_mut(subtree).parent = Some(parent);
            }
            Descent::Found(existing) => {
                unreachable!("Node {} duplicates the key of node {}", subtree, existing)
            }
        }
    }

    fn lookup(&self, key: &T, start: NodeId) -> Option<NodeId> {
        match self.descend(key, start) {
            Descent::Found(id) => Some(id),
            Descent::Vacant { .. } => None,
        }
    }

    fn descend(&self, key: &T, start: NodeId) -> Descent {
        let mut current = start;
        loop {
            let node = self.node(current);
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Descent::Found(current),
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(next) => current = next,
                None => return Descent::Vacant {
                    parent: current,
                    side,
                },
            }
        }
    }

    /// Whether every ancestor of `start` lets `key` into the subtree rooted at `start`.
    fn fits_below(&self, key: &T, start: NodeId) -> bool {
        let mut child = start;
        while let Some((parent, side)) = self.slot(child) {
            let bound = &self.node(parent).key;
            let fits = match side {
                Side::Left => key < bound,
                Side::Right => key > bound,
            };
            if !fits {
                return false;
            }
            child = parent;
        }
        true
    }

    /// In tests, after every mutation, assert that the links agree in both directions, that the
    /// keys are ordered and that exactly the reachable nodes are live.
    fn assert_invariants(&self) {
        if !cfg!(test) {
            return;
        }

        let mut reachable = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent, None);
            stack.push((root, None, None));
        }
        while let Some((id, lower, upper)) = stack.pop() {
            reachable += 1;
            let node = self.node(id);
            if let Some(lower) = lower {
                assert!(&node.key > lower);
            }
            if let Some(upper) = upper {
                assert!(&node.key < upper);
            }
            for side in [Side::Left, Side::Right] {
                if let Some(child) = node.child(side) {
                    assert_eq!(self.node(child).parent, Some(id));
                    match side {
                        Side::Left => stack.push((child, lower, Some(&node.key))),
                        Side::Right => stack.push((child, Some(&node.key), upper)),
                    }
                }
            }
        }
        assert_eq!(reachable, self.len);
        assert_eq!(self.nodes.iter().flatten().count(), self.len);
    }
}

/// A read-only view of one node of a [`Tree`].
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// The handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn key(&self) -> &'a T {
        &self.tree.node(self.id).key
    }

    /// The parent of this node, `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.link(self.tree.node(self.id).parent)
    }

    /// The left child of this node.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.link(self.tree.node(self.id).left)
    }

    /// The right child of this node.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.link(self.tree.node(self.id).right)
    }

    /// Which slot of its parent this node sits in, `None` for the root.
    pub fn side(&self) -> Option<Side> {
        self.tree.slot(self.id).map(|(_, side)| side)
    }

    fn link(&self, id: Option<NodeId>) -> Option<NodeRef<'a, T>> {
        id.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }
}
