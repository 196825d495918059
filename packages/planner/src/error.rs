use outline_model::{BlockId, ModelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// The target was computed against a different tree
    #[error("Move target for {0} no longer matches the tree")]
    StaleTarget(BlockId),

    #[error("Invalid move target: {0}")]
    InvalidTarget(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
