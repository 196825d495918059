use outline_model::{BlockId, NodeKind, OutlineNode, OutlineTree, TreePath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Neighbouring index in this direction, `None` below zero
    pub fn offset(self, index: usize) -> Option<usize> {
        match self {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStrategy {
    /// Same container, new position
    Reorder,
    /// Different container of the same level
    Relocate,
}

/// Where a node goes: destination container and index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTarget {
    pub node_id: BlockId,
    pub kind: NodeKind,
    pub from: TreePath,
    pub to_container: TreePath,
    /// Final index for a reorder, insertion index for a relocation
    pub to_index: usize,
    pub strategy: MoveStrategy,
}

impl MoveTarget {
    pub(crate) fn reorder(node: &OutlineNode, from: TreePath, to_index: usize) -> Option<Self> {
        let to_container = from.parent()?;
        Some(Self {
            node_id: node.id.clone(),
            kind: node.kind,
            from,
            to_container,
            to_index,
            strategy: MoveStrategy::Reorder,
        })
    }

    pub(crate) fn relocate(node: &OutlineNode, from: TreePath, to_container: TreePath, to_index: usize) -> Self {
        Self {
            node_id: node.id.clone(),
            kind: node.kind,
            from,
            to_container,
            to_index,
            strategy: MoveStrategy::Relocate,
        }
    }

    pub fn from_container(&self) -> Option<TreePath> {
        self.from.parent()
    }

    pub fn from_index(&self) -> Option<usize> {
        self.from.index()
    }
}

/// A move applied to a tree, with everything needed to persist it
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    /// Tree after the move
    pub tree: OutlineTree,
    pub target: MoveTarget,
    /// Where the node ended up
    pub landed_at: TreePath,
    /// Container whose ordering must be submitted
    pub container_id: BlockId,
    /// Full child ordering of that container
    pub ordered_child_ids: Vec<BlockId>,
    /// Former container, when the node changed parent
    pub source_container_id: Option<BlockId>,
    /// Section now holding the node (none for section moves)
    pub section_id: Option<BlockId>,
    /// Section that held the node before the move (none for section moves)
    pub prev_section_id: Option<BlockId>,
}

impl MoveOutcome {
    /// Sections whose store copy changed, deduplicated
    pub fn affected_sections(&self) -> Vec<BlockId> {
        let mut sections = Vec::new();
        for id in [&self.section_id, &self.prev_section_id].into_iter().flatten() {
            if !sections.contains(id) {
                sections.push(id.clone());
            }
        }
        sections
    }
}
