//! # Outline Tree
//!
//! The course root and its ordered sections. Cloning an `OutlineTree` is a
//! snapshot: the clone shares every node with the original, and later
//! copy-on-write mutations on either side only copy the nodes on the
//! mutated path.

use crate::{BlockId, ModelError, ModelResult, NodeKind, OutlineNode, TreePath};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineTree {
    /// Course id; the container id used when sections are reordered
    pub id: BlockId,
    sections: Vec<Arc<OutlineNode>>,
}

/// Node totals per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineCounts {
    pub sections: usize,
    pub subsections: usize,
    pub units: usize,
}

impl OutlineTree {
    /// Build and validate a tree
    pub fn new(id: impl Into<BlockId>, sections: impl IntoIterator<Item = OutlineNode>) -> ModelResult<Self> {
        let tree = Self {
            id: id.into(),
            sections: sections.into_iter().map(Arc::new).collect(),
        };
        tree.validate()?;
        Ok(tree)
    }

    pub fn empty(id: impl Into<BlockId>) -> Self {
        Self {
            id: id.into(),
            sections: Vec::new(),
        }
    }

    pub fn sections(&self) -> &[Arc<OutlineNode>] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Node addressed by `path` (`None` for the root or a dangling path)
    pub fn node(&self, path: &TreePath) -> Option<&OutlineNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.sections.get(*first)?.as_ref();
        for &index in rest {
            node = node.children.get(index)?.as_ref();
        }
        Some(node)
    }

    /// Children of a container path; the root yields the sections
    pub fn children(&self, container: &TreePath) -> Option<&[Arc<OutlineNode>]> {
        if container.is_root() {
            return Some(&self.sections);
        }
        let node = self.node(container)?;
        node.kind.is_container().then_some(node.children.as_slice())
    }

    /// Mutable children of a container, copying every shared node on the way
    pub fn children_mut(&mut self, container: &TreePath) -> Option<&mut Vec<Arc<OutlineNode>>> {
        let Some((first, rest)) = container.indices().split_first() else {
            return Some(&mut self.sections);
        };
        let mut node = Arc::make_mut(self.sections.get_mut(*first)?);
        for &index in rest {
            node = Arc::make_mut(node.children.get_mut(index)?);
        }
        if !node.kind.is_container() {
            return None;
        }
        Some(&mut node.children)
    }

    pub fn set_children(&mut self, container: &TreePath, children: Vec<Arc<OutlineNode>>) -> ModelResult<()> {
        let container_id = self.container_id(container);
        match self.children_mut(container) {
            Some(slot) => {
                *slot = children;
                Ok(())
            }
            None => Err(ModelError::ContainerNotFound(
                container_id.unwrap_or_else(|| BlockId::new(container.to_string())),
            )),
        }
    }

    /// Locate a node by id
    pub fn find(&self, id: &BlockId) -> Option<TreePath> {
        fn search(children: &[Arc<OutlineNode>], id: &BlockId, path: &TreePath) -> Option<TreePath> {
            for (index, child) in children.iter().enumerate() {
                let child_path = path.child(index);
                if &child.id == id {
                    return Some(child_path);
                }
                if let Some(found) = search(&child.children, id, &child_path) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.sections, id, &TreePath::root())
    }

    pub fn get(&self, id: &BlockId) -> Option<(TreePath, &OutlineNode)> {
        let path = self.find(id)?;
        let node = self.node(&path)?;
        Some((path, node))
    }

    /// Resolve a container id (the course id or a section/subsection id)
    pub fn find_container(&self, id: &BlockId) -> Option<TreePath> {
        if id == &self.id {
            return Some(TreePath::root());
        }
        let path = self.find(id)?;
        self.node(&path)
            .filter(|node| node.kind.is_container())
            .map(|_| path)
    }

    pub fn container_id(&self, container: &TreePath) -> Option<BlockId> {
        if container.is_root() {
            return Some(self.id.clone());
        }
        self.node(container).map(|node| node.id.clone())
    }

    /// Child ids of a container in their current order
    pub fn ordered_child_ids(&self, container: &TreePath) -> Option<Vec<BlockId>> {
        self.children(container)
            .map(|children| children.iter().map(|c| c.id.clone()).collect())
    }

    /// Position of a node within its parent
    pub fn order_index(&self, id: &BlockId) -> Option<usize> {
        self.find(id)?.index()
    }

    /// Id of the section that contains `path`
    pub fn section_id_of(&self, path: &TreePath) -> Option<BlockId> {
        let section = path.section()?;
        self.node(&section).map(|node| node.id.clone())
    }

    /// Every node with its path, depth first in lesson order
    pub fn nodes(&self) -> Vec<(TreePath, &OutlineNode)> {
        fn walk<'a>(children: &'a [Arc<OutlineNode>], path: &TreePath, out: &mut Vec<(TreePath, &'a OutlineNode)>) {
            for (index, child) in children.iter().enumerate() {
                let child_path = path.child(index);
                out.push((child_path.clone(), child.as_ref()));
                walk(&child.children, &child_path, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.sections, &TreePath::root(), &mut out);
        out
    }

    pub fn counts(&self) -> OutlineCounts {
        let mut counts = OutlineCounts::default();
        for section in &self.sections {
            counts.sections += 1;
            for subsection in &section.children {
                counts.subsections += 1;
                counts.units += subsection.children.len();
            }
        }
        counts
    }

    /// Check id uniqueness and the fixed three-level hierarchy
    pub fn validate(&self) -> ModelResult<()> {
        fn check(
            children: &[Arc<OutlineNode>],
            depth: usize,
            parent_kind: &str,
            seen: &mut HashSet<BlockId>,
        ) -> ModelResult<()> {
            for child in children {
                if NodeKind::from_depth(depth) != Some(child.kind) {
                    return Err(ModelError::InvalidHierarchy {
                        child: child.id.clone(),
                        child_kind: child.kind,
                        parent_kind: parent_kind.to_string(),
                    });
                }
                if !seen.insert(child.id.clone()) {
                    return Err(ModelError::DuplicateId(child.id.clone()));
                }
                check(&child.children, depth + 1, &child.kind.to_string(), seen)?;
            }
            Ok(())
        }

        let mut seen = HashSet::new();
        seen.insert(self.id.clone());
        check(&self.sections, 1, "course", &mut seen)
    }

    /// Replace local sections with confirmed copies from the store
    ///
    /// Sections are matched by id; unknown ids are ignored. Returns how many
    /// sections were replaced.
    pub fn replace_sections(&mut self, sections: impl IntoIterator<Item = OutlineNode>) -> ModelResult<usize> {
        let mut incoming: HashMap<BlockId, OutlineNode> =
            sections.into_iter().map(|s| (s.id.clone(), s)).collect();
        let mut replaced = 0;

        let mut next = self.clone();
        for slot in next.sections.iter_mut() {
            if let Some(section) = incoming.remove(&slot.id) {
                *slot = Arc::new(section);
                replaced += 1;
            }
        }
        next.validate()?;

        *self = next;
        Ok(replaced)
    }

    /// Sort sections to follow `ids`; sections not listed keep their order at the end
    pub fn reorder_sections(&mut self, ids: &[BlockId]) {
        let position: HashMap<&BlockId, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        self.sections
            .sort_by_key(|section| position.get(&section.id).copied().unwrap_or(usize::MAX));
    }

    /// Apply a submitted ordering the way the content store does
    ///
    /// The container's children become exactly `ordered`, in that order.
    /// Listed nodes living under another container of the same level are
    /// moved here; unlisted former children are dropped.
    pub fn set_child_order(&mut self, container_id: &BlockId, ordered: &[BlockId]) -> ModelResult<()> {
        let container = self
            .find_container(container_id)
            .ok_or_else(|| ModelError::ContainerNotFound(container_id.clone()))?;
        let expected = NodeKind::from_depth(container.depth() + 1)
            .ok_or_else(|| ModelError::ContainerNotFound(container_id.clone()))?;

        let mut seen = HashSet::new();
        for id in ordered {
            if !seen.insert(id) {
                return Err(ModelError::DuplicateId(id.clone()));
            }
            let (_, node) = self.get(id).ok_or_else(|| ModelError::NodeNotFound(id.clone()))?;
            if node.kind != expected {
                return Err(ModelError::InvalidHierarchy {
                    child: id.clone(),
                    child_kind: node.kind,
                    parent_kind: container_id.to_string(),
                });
            }
        }

        let mut next = self.clone();
        let mut collected: HashMap<BlockId, Arc<OutlineNode>> = HashMap::new();
        for id in ordered {
            let path = next.find(id).ok_or_else(|| ModelError::NodeNotFound(id.clone()))?;
            let (parent, index) = match (path.parent(), path.index()) {
                (Some(parent), Some(index)) => (parent, index),
                _ => return Err(ModelError::NodeNotFound(id.clone())),
            };
            let siblings = next
                .children_mut(&parent)
                .ok_or_else(|| ModelError::NodeNotFound(id.clone()))?;
            collected.insert(id.clone(), siblings.remove(index));
        }

        let children = ordered
            .iter()
            .filter_map(|id| collected.remove(id))
            .collect();
        next.set_children(&container, children)?;

        *self = next;
        Ok(())
    }
}
