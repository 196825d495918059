//! # Store Payload
//!
//! Conversion between the content store's outline index JSON and
//! [`OutlineTree`]. The store nests children under `childInfo.children` and
//! names levels by category (`chapter`, `sequential`, `vertical`).

use crate::{Actions, BlockId, ModelError, ModelResult, NodeKind, OutlineNode, OutlineTree};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Top-level outline index response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineIndex {
    pub course_structure: XBlock,
}

/// A block as the store serializes it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XBlock {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub actions: Actions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_info: Option<ChildInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildInfo {
    #[serde(default)]
    pub children: Vec<XBlock>,
}

impl XBlock {
    fn children(&self) -> &[XBlock] {
        self.child_info.as_ref().map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    /// Convert into an outline node, checking the category of every block
    pub fn into_node(self) -> ModelResult<OutlineNode> {
        let kind = NodeKind::from_category(&self.category)
            .ok_or_else(|| ModelError::UnknownCategory(self.category.clone()))?;
        let children = self
            .child_info
            .map(|c| c.children)
            .unwrap_or_default()
            .into_iter()
            .map(|child| child.into_node().map(Arc::new))
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(OutlineNode {
            id: BlockId::new(self.id),
            kind,
            display_name: self.display_name,
            actions: self.actions,
            children,
        })
    }

    pub fn from_node(node: &OutlineNode) -> Self {
        let child_info = node.kind.is_container().then(|| ChildInfo {
            children: node.children.iter().map(|c| XBlock::from_node(c)).collect(),
        });
        Self {
            id: node.id.to_string(),
            display_name: node.display_name.clone(),
            category: node.kind.category().to_string(),
            actions: node.actions,
            child_info,
        }
    }
}

impl OutlineTree {
    /// Hydrate from the store's outline index JSON
    pub fn from_outline_index(json: &str) -> ModelResult<Self> {
        let index: OutlineIndex = serde_json::from_str(json)?;
        Self::from_course_block(index.course_structure)
    }

    /// Hydrate from a course block whose children are the sections
    pub fn from_course_block(course: XBlock) -> ModelResult<Self> {
        let sections = course
            .children()
            .iter()
            .cloned()
            .map(XBlock::into_node)
            .collect::<ModelResult<Vec<_>>>()?;
        OutlineTree::new(course.id, sections)
    }

    pub fn to_outline_index(&self) -> OutlineIndex {
        OutlineIndex {
            course_structure: XBlock {
                id: self.id.to_string(),
                display_name: String::new(),
                category: "course".to_string(),
                actions: Actions::default(),
                child_info: Some(ChildInfo {
                    children: self.sections().iter().map(|s| XBlock::from_node(s)).collect(),
                }),
            },
        }
    }

    pub fn to_outline_index_json(&self, pretty: bool) -> ModelResult<String> {
        let index = self.to_outline_index();
        let json = if pretty {
            serde_json::to_string_pretty(&index)?
        } else {
            serde_json::to_string(&index)?
        };
        Ok(json)
    }
}
