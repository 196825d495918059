use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque block identifier (usage key in the content store)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The three fixed outline levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Section,
    Subsection,
    Unit,
}

impl NodeKind {
    /// Depth below the course root (sections are 1)
    pub fn depth(self) -> usize {
        match self {
            NodeKind::Section => 1,
            NodeKind::Subsection => 2,
            NodeKind::Unit => 3,
        }
    }

    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(NodeKind::Section),
            2 => Some(NodeKind::Subsection),
            3 => Some(NodeKind::Unit),
            _ => None,
        }
    }

    /// Kind of the nodes this kind may contain
    pub fn child_kind(self) -> Option<Self> {
        Self::from_depth(self.depth() + 1)
    }

    /// Kind of the container holding this kind (`None` for the course root)
    pub fn parent_kind(self) -> Option<Self> {
        Self::from_depth(self.depth() - 1)
    }

    pub fn is_container(self) -> bool {
        self.child_kind().is_some()
    }

    /// Store category name ("chapter", "sequential", "vertical")
    pub fn category(self) -> &'static str {
        match self {
            NodeKind::Section => "chapter",
            NodeKind::Subsection => "sequential",
            NodeKind::Unit => "vertical",
        }
    }

    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "chapter" => Some(NodeKind::Section),
            "sequential" => Some(NodeKind::Subsection),
            "vertical" => Some(NodeKind::Unit),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Section => "section",
            NodeKind::Subsection => "subsection",
            NodeKind::Unit => "unit",
        };
        f.write_str(name)
    }
}

/// Capability flags supplied by the authoring permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actions {
    /// Node may be the source of a move
    #[serde(default = "default_true")]
    pub draggable: bool,

    /// Container may receive another child through a move
    #[serde(default = "default_true")]
    pub child_addable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Actions {
    fn default() -> Self {
        Self {
            draggable: true,
            child_addable: true,
        }
    }
}

/// A section, subsection or unit
///
/// Children are reference counted so that a cloned tree shares every subtree
/// it did not touch. Mutate through [`Arc::make_mut`] to copy only the path
/// being changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub id: BlockId,
    pub kind: NodeKind,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub actions: Actions,
    #[serde(default)]
    pub children: Vec<Arc<OutlineNode>>,
}

impl OutlineNode {
    pub fn new(kind: NodeKind, id: impl Into<BlockId>) -> Self {
        Self {
            id: id.into(),
            kind,
            display_name: String::new(),
            actions: Actions::default(),
            children: Vec::new(),
        }
    }

    pub fn section(id: impl Into<BlockId>) -> Self {
        Self::new(NodeKind::Section, id)
    }

    pub fn subsection(id: impl Into<BlockId>) -> Self {
        Self::new(NodeKind::Subsection, id)
    }

    pub fn unit(id: impl Into<BlockId>) -> Self {
        Self::new(NodeKind::Unit, id)
    }

    pub fn named(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.actions.draggable = draggable;
        self
    }

    pub fn child_addable(mut self, child_addable: bool) -> Self {
        self.actions.child_addable = child_addable;
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = OutlineNode>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    pub fn is_draggable(&self) -> bool {
        self.actions.draggable
    }

    pub fn is_child_addable(&self) -> bool {
        self.actions.child_addable
    }

    pub fn child_ids(&self) -> Vec<BlockId> {
        self.children.iter().map(|c| c.id.clone()).collect()
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }
}
