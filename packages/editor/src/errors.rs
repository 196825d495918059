//! Error types for the editor

use crate::{DragPhase, WriteId};
use outline_model::{BlockId, ModelError};
use outline_planner::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    /// The gesture pipeline received an event its current phase cannot take
    #[error("Cannot handle {event} while {phase}")]
    InvalidTransition { phase: DragPhase, event: &'static str },

    #[error("Unknown write: {0}")]
    UnknownWrite(WriteId),

    #[error("Node not found: {0}")]
    NodeNotFound(BlockId),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),
}
