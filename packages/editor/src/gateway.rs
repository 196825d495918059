//! # Persistence Gateway
//!
//! The content store seen from the editor: one call that replaces a
//! container's child ordering. Everything else about the store (transport,
//! auth, refetching sections) belongs to the host.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use outline_model::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Sequence number of a write; later writes compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteId(u64);

impl WriteId {
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn seq(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write-{}", self.0)
    }
}

/// One ordering submission, ready for the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteRequest {
    pub id: WriteId,
    pub container_id: BlockId,
    /// Complete child list of the container, in order
    pub ordered_child_ids: Vec<BlockId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Store rejected the ordering: {0}")]
    Rejected(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Replace the children of `container_id` with `ordered_child_ids`
    async fn submit(&self, container_id: &BlockId, ordered_child_ids: &[BlockId]) -> Result<(), GatewayError>;
}
