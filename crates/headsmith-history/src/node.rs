//! A single checkpoint in the edit history.

use serde::Serialize;

use crate::{NodeId, Preview, Snapshot};

/// One recorded checkpoint.
///
/// Identity, lineage, payloads, and timestamp are fixed at creation and only
/// readable from outside. The tree owns the two mutable link fields:
/// `children` grows by append and is cleared by prune, `active_child_id`
/// remembers which branch redo should follow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryNode {
    id: NodeId,
    parent_id: Option<NodeId>,
    snapshot: Snapshot,
    preview: Preview,
    created_at: u64,
    children: Vec<NodeId>,
    active_child_id: Option<NodeId>,
}

impl HistoryNode {
    pub(crate) fn new(parent_id: Option<NodeId>, snapshot: Snapshot, preview: Preview) -> Self {
        Self {
            id: NodeId::new(),
            parent_id,
            snapshot,
            preview,
            created_at: headsmith_types::now_millis(),
            children: Vec::new(),
            active_child_id: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent checkpoint, `None` for the root.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Creation time (Unix millis).
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Child ids in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The child redo prefers, if one was recorded.
    pub fn active_child_id(&self) -> Option<NodeId> {
        self.active_child_id
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    // =========================================================================
    // Link mutation (tree-internal)
    // =========================================================================

    /// Append a new branch and make it the redo preference.
    pub(crate) fn push_active_child(&mut self, child: NodeId) {
        self.children.push(child);
        self.active_child_id = Some(child);
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
        self.active_child_id = None;
    }

    #[cfg(test)]
    pub(crate) fn links_mut(&mut self) -> (&mut Vec<NodeId>, &mut Option<NodeId>) {
        (&mut self.children, &mut self.active_child_id)
    }
}
