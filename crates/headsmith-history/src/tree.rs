//! The history tree manager.
//!
//! Nodes live in a flat map keyed by [`NodeId`]; parent, child, and redo
//! preference links are ids into that map. Ownership is presence in the map,
//! so pruning a subtree is just removing keys.

use std::collections::{HashMap, HashSet};

use crate::{HistoryError, HistoryNode, NodeId, Preview, Result, Snapshot, Timeline};

/// Outcome of a successful [`HistoryTree::prune`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruned {
    /// Every node that was removed, parents before their children.
    pub removed: Vec<NodeId>,
    /// True when the viewpoint was inside the removed subtree and was moved
    /// back to the pruned node.
    pub reanchored: bool,
}

/// Branching undo history.
///
/// Every mutation of the editing surface becomes a checkpoint node hanging
/// off the current node. Undo walks to the parent, redo follows each node's
/// remembered active child, and any node can be jumped to directly.
///
/// Every operation is total: stale or unknown ids and missing neighbours
/// turn the call into a no-op (reported as `None`/`false`) instead of an
/// error.
#[derive(Debug, Clone, Default)]
pub struct HistoryTree {
    /// All nodes indexed by ID.
    nodes: HashMap<NodeId, HistoryNode>,
    /// The node the canvas currently shows.
    current_id: Option<NodeId>,
}

impl HistoryTree {
    /// Create an empty tree. Nothing can be recorded until a root exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree holding a single root checkpoint.
    pub fn with_root(snapshot: Snapshot, preview: Preview) -> Self {
        let mut tree = Self::new();
        tree.reset_to_new_root(snapshot, preview);
        tree
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn current_id(&self) -> Option<NodeId> {
        self.current_id
    }

    pub fn current(&self) -> Option<&HistoryNode> {
        self.current_id.and_then(|id| self.nodes.get(&id))
    }

    pub fn get(&self, id: &NodeId) -> Option<&HistoryNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &HistoryNode> {
        self.nodes.values()
    }

    /// Depth-first rows for drawing the timeline, starting at the root.
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline::new(self)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Record a checkpoint as a new child of the current node.
    ///
    /// Returns the new node's id, or `None` when there is no current node or
    /// `snapshot` is identical to the current node's snapshot (a click that
    /// changed nothing must not spam the history).
    pub fn record_checkpoint(&mut self, snapshot: Snapshot, preview: Preview) -> Option<NodeId> {
        let parent_id = self.current_id?;
        let parent = self.nodes.get_mut(&parent_id)?;

        if *parent.snapshot() == snapshot {
            tracing::trace!(current = %parent_id, "checkpoint unchanged, skipping");
            return None;
        }

        let node = HistoryNode::new(Some(parent_id), snapshot, preview);
        let id = node.id();
        parent.push_active_child(id);
        self.nodes.insert(id, node);
        self.current_id = Some(id);

        tracing::debug!(node = %id, parent = %parent_id, nodes = self.nodes.len(), "checkpoint recorded");
        Some(id)
    }

    /// Move the viewpoint to `id` without touching any branch preference.
    ///
    /// Returns `false` if `id` is not in the tree.
    pub fn jump_to(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            tracing::debug!(node = %id, "jump target not in tree");
            return false;
        }
        self.current_id = Some(id);
        tracing::debug!(node = %id, "jumped");
        true
    }

    /// Step back to the parent of the current node.
    ///
    /// The parent's active child is left alone, so a following redo returns
    /// to where undo started. Returns the new current id, `None` at a root.
    pub fn undo(&mut self) -> Option<NodeId> {
        let parent_id = self.current()?.parent_id()?;
        if !self.nodes.contains_key(&parent_id) {
            tracing::warn!(parent = %parent_id, "undo target missing from tree");
            return None;
        }
        self.current_id = Some(parent_id);
        tracing::debug!(node = %parent_id, "undo");
        Some(parent_id)
    }

    /// Step forward along the remembered branch.
    ///
    /// Follows the current node's active child, falling back to its most
    /// recently created child. Returns the new current id, `None` at a leaf.
    pub fn redo(&mut self) -> Option<NodeId> {
        let target = self.redo_target()?;
        self.current_id = Some(target);
        tracing::debug!(node = %target, "redo");
        Some(target)
    }

    /// Discard every descendant of `id`, keeping `id` itself as a childless
    /// endpoint.
    ///
    /// If the viewpoint was inside the discarded subtree it moves to `id`.
    /// Returns `None` when `id` is unknown or already a leaf.
    pub fn prune(&mut self, id: NodeId) -> Option<Pruned> {
        if self.nodes.get(&id)?.is_leaf() {
            return None;
        }

        let removed = self.descendants(&id);
        for gone in &removed {
            self.nodes.remove(gone);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.clear_children();
        }

        let reanchored = match self.current_id {
            Some(current) if !self.nodes.contains_key(&current) => {
                self.current_id = Some(id);
                true
            }
            _ => false,
        };

        tracing::debug!(node = %id, removed = removed.len(), reanchored, "pruned subtree");
        Some(Pruned { removed, reanchored })
    }

    /// Replace the whole history with a single fresh root and make it current.
    ///
    /// Used when loading unrelated content: the new base has no edit
    /// relationship to anything recorded before.
    pub fn reset_to_new_root(&mut self, snapshot: Snapshot, preview: Preview) -> NodeId {
        let root = HistoryNode::new(None, snapshot, preview);
        let id = root.id();
        let discarded = self.nodes.len();

        self.nodes.clear();
        self.nodes.insert(id, root);
        self.current_id = Some(id);

        tracing::debug!(root = %id, discarded, "history reset to new root");
        id
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The unique node without a parent, `None` when the tree is empty.
    pub fn find_root(&self) -> Option<NodeId> {
        self.nodes.values().find(|n| n.is_root()).map(|n| n.id())
    }

    /// Whether `candidate` sits strictly below `ancestor`.
    ///
    /// A node is not its own descendant. Unknown ids are never descendants.
    pub fn is_descendant_of(&self, candidate: &NodeId, ancestor: &NodeId) -> bool {
        let mut walker = self.nodes.get(candidate).and_then(|n| n.parent_id());
        let mut steps = 0;

        while let Some(id) = walker {
            if id == *ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                tracing::warn!(node = %candidate, "parent walk exceeded tree size, stopping");
                return false;
            }
            walker = self.nodes.get(&id).and_then(|n| n.parent_id());
        }

        false
    }

    /// Whether pruning `id` would discard the current viewpoint.
    pub fn would_prune_current(&self, id: &NodeId) -> bool {
        self.current_id
            .is_some_and(|current| self.is_descendant_of(&current, id))
    }

    /// The node `redo()` would move to, without moving.
    pub fn redo_target(&self) -> Option<NodeId> {
        let current = self.current()?;
        current
            .active_child_id()
            .or_else(|| current.children().last().copied())
    }

    pub fn can_undo(&self) -> bool {
        self.current().is_some_and(|n| n.parent_id().is_some())
    }

    pub fn can_redo(&self) -> bool {
        self.redo_target().is_some()
    }

    /// Ancestors of `id`, from immediate parent up to the root.
    ///
    /// Bounded by the tree size so a corrupted parent chain cannot loop.
    pub fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut walker = self.nodes.get(id).and_then(|n| n.parent_id());

        while let Some(parent_id) = walker {
            if result.len() >= self.nodes.len() {
                tracing::warn!(node = %id, "ancestors() exceeded tree size, truncating");
                break;
            }
            let Some(parent) = self.nodes.get(&parent_id) else {
                break;
            };
            result.push(parent_id);
            walker = parent.parent_id();
        }

        result
    }

    /// Depth of `id` below the root (0 for the root and unknown ids).
    pub fn depth(&self, id: &NodeId) -> usize {
        self.ancestors(id).len()
    }

    /// Every strict descendant of `id`, depth-first in creation order.
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(id) {
            Some(node) => node.children().iter().rev().copied().collect(),
            None => return result,
        };

        while let Some(child) = stack.pop() {
            if !visited.insert(child) {
                tracing::warn!(node = %child, "node reached twice during descent, skipping");
                continue;
            }
            result.push(child);
            if let Some(node) = self.nodes.get(&child) {
                // Push children in reverse to keep creation order
                stack.extend(node.children().iter().rev().copied());
            }
        }

        result
    }

    /// Check the structural invariants, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return match self.current_id {
                Some(current) => Err(HistoryError::DanglingCurrent(current)),
                None => Ok(()),
            };
        }

        match self.current_id {
            None => return Err(HistoryError::MissingCurrent(self.nodes.len())),
            Some(current) if !self.nodes.contains_key(&current) => {
                return Err(HistoryError::DanglingCurrent(current));
            }
            Some(_) => {}
        }

        let mut roots: Vec<NodeId> = self.nodes.values().filter(|n| n.is_root()).map(|n| n.id()).collect();
        let root = match roots.len() {
            0 => return Err(HistoryError::NoRoot),
            1 => roots[0],
            _ => {
                roots.sort();
                return Err(HistoryError::MultipleRoots(roots));
            }
        };

        for node in self.nodes.values() {
            if let Some(parent) = node.parent_id()
                && !self.nodes.contains_key(&parent)
            {
                return Err(HistoryError::MissingParent { node: node.id(), parent });
            }
            if let Some(active) = node.active_child_id()
                && !node.children().contains(&active)
            {
                return Err(HistoryError::ActiveChildNotChild { node: node.id(), child: active });
            }
            for child_id in node.children() {
                let Some(child) = self.nodes.get(child_id) else {
                    return Err(HistoryError::MissingChild { parent: node.id(), child: *child_id });
                };
                if child.parent_id() != Some(node.id()) {
                    return Err(HistoryError::ParentMismatch {
                        parent: node.id(),
                        child: *child_id,
                        actual: child.parent_id(),
                    });
                }
            }
        }

        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(HistoryError::DuplicateLink(id));
            }
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children().iter().copied());
            }
        }

        if visited.len() != self.nodes.len() {
            let mut unreachable: Vec<NodeId> =
                self.nodes.keys().filter(|id| !visited.contains(*id)).copied().collect();
            unreachable.sort();
            return Err(HistoryError::Unreachable(unreachable));
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Option<&mut HistoryNode> {
        self.nodes.get_mut(id)
    }
}
