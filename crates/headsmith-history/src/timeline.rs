//! Timeline rows computed from the history tree.
//!
//! The timeline view draws the tree recursively: each node as a thumbnail,
//! children stacked below in creation order, with connector lines that
//! depend on whether a node has siblings and whether it is the last one.
//! [`Timeline`] flattens that into depth-first rows carrying everything the
//! renderer needs, so a UI never walks the id links itself.

use std::collections::HashSet;

use serde::Serialize;

use crate::{HistoryNode, HistoryTree, NodeId};

/// One row of the timeline, in depth-first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    /// 0 for the root.
    pub depth: usize,
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    /// This row is the current viewpoint.
    pub is_current: bool,
    /// Last child of its parent (draws `└─` instead of `├─`).
    pub is_last: bool,
    /// Parent has more than one child.
    pub has_siblings: bool,
    pub child_count: usize,
    /// This row is its parent's active child (the branch redo would follow).
    pub is_active_branch: bool,
    pub created_at: u64,
}

/// Depth-first iterator over timeline rows.
///
/// Starts at the tree's root. Tracks visited nodes so a corrupted tree
/// cannot loop, and stops after as many rows as the tree has nodes.
pub struct Timeline<'a> {
    tree: &'a HistoryTree,
    stack: Vec<Pending>,
    visited: HashSet<NodeId>,
}

struct Pending {
    depth: usize,
    id: NodeId,
    is_last: bool,
    has_siblings: bool,
    is_active_branch: bool,
}

impl<'a> Timeline<'a> {
    pub(crate) fn new(tree: &'a HistoryTree) -> Self {
        let stack = tree
            .find_root()
            .map(|id| Pending {
                depth: 0,
                id,
                is_last: true,
                has_siblings: false,
                is_active_branch: false,
            })
            .into_iter()
            .collect();
        Self { tree, stack, visited: HashSet::new() }
    }

    fn push_children(&mut self, depth: usize, node: &HistoryNode) {
        let children = node.children();
        let has_siblings = children.len() > 1;
        // Push in reverse so the first child pops first
        for (index, child) in children.iter().enumerate().rev() {
            self.stack.push(Pending {
                depth: depth + 1,
                id: *child,
                is_last: index + 1 == children.len(),
                has_siblings,
                is_active_branch: node.active_child_id() == Some(*child),
            });
        }
    }
}

impl<'a> Iterator for Timeline<'a> {
    type Item = TimelineRow;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(pending) = self.stack.pop() {
            if !self.visited.insert(pending.id) {
                continue; // already visited (corrupted link)
            }
            if self.visited.len() > tree.len() {
                tracing::warn!("timeline visited more rows than nodes, stopping");
                return None;
            }
            if let Some(node) = tree.get(&pending.id) {
                self.push_children(pending.depth, node);
                return Some(TimelineRow {
                    depth: pending.depth,
                    id: pending.id,
                    parent_id: node.parent_id(),
                    is_current: tree.current_id() == Some(pending.id),
                    is_last: pending.is_last,
                    has_siblings: pending.has_siblings,
                    child_count: node.children().len(),
                    is_active_branch: pending.is_active_branch,
                    created_at: node.created_at(),
                });
            }
        }
        None
    }
}
