//! # Move Planner
//!
//! Decides whether and where an outline node may move, and applies the move
//! to a copy of the tree.
//!
//! Two front-ends share the same primitives:
//!
//! - [`compute_step_move`] for discrete one-position moves (keyboard, menu)
//! - [`compute_drop_move`] for a continuous drag resolved against the item
//!   under the pointer
//!
//! Both only return a [`MoveTarget`]; [`apply_move`] turns it into a new tree
//! and the ordering that must be persisted. An illegal move is `None`, never
//! an error.

mod apply;
mod drop;
pub mod eligibility;
mod error;
mod reorder;
mod step;
mod target;

pub use apply::apply_move;
pub use drop::{accepts_droppable, compute_drop_move};
pub use error::PlanError;
pub use reorder::{array_move, move_across_parents, move_within_parent};
pub use step::{can_move, compute_step_move};
pub use target::{Direction, MoveOutcome, MoveStrategy, MoveTarget};
