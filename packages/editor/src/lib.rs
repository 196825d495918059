//! # Outline Editor
//!
//! Interactive reordering on top of the move planner.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: pointer / keyboard events, rendering  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: OutlineEditor                       │
//! │  - Drag lifecycle (DragPhase)               │
//! │  - Optimistic tree + snapshots              │
//! │  - Per-container write queue                │
//! │  - Rollback on rejected writes              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ PersistenceGateway: content store           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Optimistic tree**: moves show up before the store answers
//! 2. **Snapshots are values**: rolling back means putting an old tree back
//! 3. **Server authority**: a rejected write wins over every later local move
//!
//! ## Usage
//!
//! ```rust,ignore
//! use outline_editor::OutlineEditor;
//! use outline_planner::Direction;
//!
//! let mut editor = OutlineEditor::new(tree);
//!
//! // Keyboard move, persisted through the gateway
//! editor.step_move(&"unit-1".into(), Direction::Up)?;
//! editor.flush(&gateway).await?;
//!
//! // Pointer drag
//! editor.drag_start(&"unit-1".into())?;
//! editor.drag_over(&"unit-7".into(), true)?;
//! editor.drag_end()?;
//! ```

mod drag;
mod errors;
mod gateway;
mod queue;
mod rollback;
mod session;

pub use drag::{ActiveDrag, DragEvent, DragGhost, DragPhase};
pub use errors::EditorError;
pub use gateway::{GatewayError, PersistenceGateway, WriteId, WriteRequest};
pub use queue::{Enqueued, QueuedWrite, WriteQueue};
pub use rollback::{RollbackController, SaveStatus, Snapshot};
pub use session::{OutlineEditor, WriteResolution};
