//! # Outline Model
//!
//! The three-level course outline: sections contain subsections, subsections
//! contain units. Child order is the lesson sequence.
//!
//! ## Structure
//!
//! ```text
//! OutlineTree (course id)
//!  └─ Section        draggable, childAddable
//!      └─ Subsection draggable, childAddable
//!          └─ Unit   draggable
//! ```
//!
//! Nodes are shared through `Arc`, so a cloned tree is a cheap snapshot and
//! edits copy only the path they touch.

mod error;
mod hydrate;
mod node;
mod path;
mod tree;

pub use error::{ModelError, ModelResult};
pub use hydrate::{ChildInfo, OutlineIndex, XBlock};
pub use node::{Actions, BlockId, NodeKind, OutlineNode};
pub use path::TreePath;
pub use tree::{OutlineCounts, OutlineTree};
