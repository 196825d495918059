//! # Rollback Controller
//!
//! Holds the pre-move tree for every write the store has not confirmed yet.
//!
//! ## Design
//!
//! - Each committed move records the tree as it was right before the move
//! - Confirmation drops the snapshot; the optimistic tree is already right
//! - Failure hands the snapshot back for restoration and marks every write
//!   issued after it as discarded
//! - A write that supersedes a queued one inherits the older snapshot

use crate::WriteId;
use outline_model::OutlineTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of the most recent persistence activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Pending,
    Successful,
    Failed,
}

/// Tree to return to if a write fails
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tree: OutlineTree,
    /// First write whose visual state this snapshot predates
    pub since: WriteId,
}

#[derive(Debug, Default)]
pub struct RollbackController {
    snapshots: BTreeMap<WriteId, Snapshot>,
    status: Option<SaveStatus>,
}

impl RollbackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `tree` as the state to restore if `id` fails
    pub fn record(&mut self, id: WriteId, tree: OutlineTree) {
        self.snapshots.insert(id, Snapshot { tree, since: id });
        self.status = Some(SaveStatus::Pending);
    }

    /// `by` replaces the queued write `superseded` and takes over its snapshot
    pub fn supersede(&mut self, superseded: WriteId, by: WriteId) {
        if let Some(snapshot) = self.snapshots.remove(&superseded) {
            self.snapshots.insert(by, snapshot);
        }
    }

    pub fn confirm(&mut self, id: WriteId) {
        self.snapshots.remove(&id);
        if self.snapshots.is_empty() && self.status != Some(SaveStatus::Failed) {
            self.status = Some(SaveStatus::Successful);
        }
    }

    /// Take the snapshot of a failed write
    ///
    /// Snapshots of writes issued after it are dropped; their trees were
    /// built on top of the state being undone.
    pub fn fail(&mut self, id: WriteId) -> Option<Snapshot> {
        let snapshot = self.snapshots.remove(&id)?;
        self.snapshots.retain(|&other, _| other < snapshot.since);
        self.status = Some(SaveStatus::Failed);
        Some(snapshot)
    }

    /// Forget a write without touching the status
    pub fn discard(&mut self, id: WriteId) {
        self.snapshots.remove(&id);
    }

    pub fn status(&self) -> Option<SaveStatus> {
        self.status
    }

    pub fn pending_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.status = None;
    }
}
