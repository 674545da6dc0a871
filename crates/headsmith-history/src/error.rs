//! Error types for history tree validation.
//!
//! Tree operations never fail; they degrade to no-ops. These errors only
//! come out of [`HistoryTree::validate`](crate::HistoryTree::validate), which
//! reports the first structural invariant that does not hold.

use thiserror::Error;

use crate::NodeId;

/// A broken structural invariant of the history tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The current pointer names a node that is not stored.
    #[error("current node {0:?} is not in the tree")]
    DanglingCurrent(NodeId),

    /// The tree has nodes but no current viewpoint.
    #[error("tree has {0} nodes but no current node")]
    MissingCurrent(usize),

    /// No node without a parent.
    #[error("tree has no root")]
    NoRoot,

    /// More than one node without a parent (a forest).
    #[error("tree has multiple roots: {0:?}")]
    MultipleRoots(Vec<NodeId>),

    /// A node's parent is not stored.
    #[error("node {node:?} points at missing parent {parent:?}")]
    MissingParent { node: NodeId, parent: NodeId },

    /// A child link points at a node that is not stored.
    #[error("node {parent:?} lists missing child {child:?}")]
    MissingChild { parent: NodeId, child: NodeId },

    /// A child link disagrees with the child's own parent pointer.
    #[error("node {child:?} is listed under {parent:?} but its parent is {actual:?}")]
    ParentMismatch {
        parent: NodeId,
        child: NodeId,
        actual: Option<NodeId>,
    },

    /// The redo preference names a node that is not one of the children.
    #[error("node {node:?} has active child {child:?} which is not among its children")]
    ActiveChildNotChild { node: NodeId, child: NodeId },

    /// A node was reached twice while walking down from the root.
    #[error("node {0:?} is reachable along more than one path")]
    DuplicateLink(NodeId),

    /// Nodes that cannot be reached from the root.
    #[error("nodes unreachable from the root: {0:?}")]
    Unreachable(Vec<NodeId>),
}
