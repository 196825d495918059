use crate::{BlockId, NodeKind};
use thiserror::Error;

/// Errors raised while building, validating or rewriting an outline tree
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Node not found: {0}")]
    NodeNotFound(BlockId),

    #[error("Container not found: {0}")]
    ContainerNotFound(BlockId),

    #[error("Duplicate block id: {0}")]
    DuplicateId(BlockId),

    #[error("Invalid hierarchy: {child} ({child_kind:?}) cannot live under a {parent_kind}")]
    InvalidHierarchy {
        child: BlockId,
        child_kind: NodeKind,
        parent_kind: String,
    },

    #[error("Unknown block category: {0}")]
    UnknownCategory(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the model crate
pub type ModelResult<T> = Result<T, ModelError>;
