use crate::tree::NodeId;

/// Everything that can go wrong when operating on a [`Tree`][crate::Tree].
///
/// Removing an absent key or node and inserting a duplicate key are not errors; those are no-ops.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The tree has no root and no start node was given to search from.
    #[error("tree is empty and no start node was given")]
    EmptyTree,
    /// The given handle does not refer to a node currently in the tree.
    #[error("node {0} is not part of this tree")]
    UnknownNode(NodeId),
    /// The key cannot be stored below the given start node without breaking the ordering.
    #[error("key does not belong in the subtree rooted at node {0}")]
    OutOfSubtree(NodeId),
}
