//! Shared fixtures for the editor integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use outline_editor::{GatewayError, PersistenceGateway};
use outline_model::{BlockId, OutlineNode, OutlineTree, TreePath};
use std::collections::HashSet;
use std::sync::Mutex;

/// ```text
/// section1
///   sub1: u1, u2
///   sub2: u3
/// section2
///   sub3: u4, u5
/// section3
/// ```
pub fn course() -> OutlineTree {
    OutlineTree::new(
        "course",
        [
            OutlineNode::section("section1").named("Introduction").with_children([
                OutlineNode::subsection("sub1").with_children([OutlineNode::unit("u1"), OutlineNode::unit("u2")]),
                OutlineNode::subsection("sub2").with_children([OutlineNode::unit("u3")]),
            ]),
            OutlineNode::section("section2").with_children([OutlineNode::subsection("sub3")
                .with_children([OutlineNode::unit("u4").named("Lab"), OutlineNode::unit("u5")])]),
            OutlineNode::section("section3"),
        ],
    )
    .unwrap()
}

pub fn id(name: &str) -> BlockId {
    BlockId::from(name)
}

pub fn ids(names: &[&str]) -> Vec<BlockId> {
    names.iter().map(|n| BlockId::from(*n)).collect()
}

/// Child ids of the container at `path`, as plain strings
pub fn children_of(tree: &OutlineTree, path: &[usize]) -> Vec<String> {
    tree.ordered_child_ids(&TreePath::from_indices(path.to_vec()))
        .unwrap()
        .into_iter()
        .map(|id| id.to_string())
        .collect()
}

/// Gateway that records every submission and rejects chosen containers
#[derive(Default)]
pub struct RecordingGateway {
    submitted: Mutex<Vec<(BlockId, Vec<BlockId>)>>,
    rejected: Mutex<HashSet<BlockId>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&self, container_id: &str) {
        self.rejected.lock().unwrap().insert(BlockId::from(container_id));
    }

    pub fn submitted(&self) -> Vec<(BlockId, Vec<BlockId>)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistenceGateway for RecordingGateway {
    async fn submit(&self, container_id: &BlockId, ordered_child_ids: &[BlockId]) -> Result<(), GatewayError> {
        self.submitted
            .lock()
            .unwrap()
            .push((container_id.clone(), ordered_child_ids.to_vec()));
        if self.rejected.lock().unwrap().contains(container_id) {
            return Err(GatewayError::Rejected(format!("{container_id} is locked")));
        }
        Ok(())
    }
}
