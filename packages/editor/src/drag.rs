//! # Drag Session
//!
//! Gesture lifecycle for one drag at a time.
//!
//! ```text
//! Idle ──Start──────▶ Dragging ──End────▶ Dropping ───Settle──▶ Idle
//!                      │   ▲
//!                      └───┘ Over
//!                      │
//!                      └──Cancel──▶ Cancelling ──Settle──▶ Idle
//!
//! Idle ──KeyboardMove──▶ Dropping
//! ```
//!
//! Pairs missing from [`DragPhase::next`] are rejected, so a stray pointer
//! event can never leave the session half-way between two gestures.

use crate::EditorError;
use outline_model::{BlockId, NodeKind, OutlineNode, OutlineTree};
use outline_planner::MoveTarget;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Dropping,
    Cancelling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragEvent {
    Start,
    Over,
    End,
    Cancel,
    KeyboardMove,
    Settle,
}

impl DragEvent {
    pub fn name(self) -> &'static str {
        match self {
            DragEvent::Start => "drag start",
            DragEvent::Over => "drag over",
            DragEvent::End => "drag end",
            DragEvent::Cancel => "drag cancel",
            DragEvent::KeyboardMove => "keyboard move",
            DragEvent::Settle => "settle",
        }
    }
}

impl DragPhase {
    pub fn next(self, event: DragEvent) -> Result<DragPhase, EditorError> {
        use DragEvent::*;
        use DragPhase::*;

        match (self, event) {
            (Idle, Start) => Ok(Dragging),
            (Idle, KeyboardMove) => Ok(Dropping),
            (Dragging, Over) => Ok(Dragging),
            (Dragging, End) => Ok(Dropping),
            (Dragging, Cancel) => Ok(Cancelling),
            (Dropping, Settle) | (Cancelling, Settle) => Ok(Idle),
            (phase, event) => Err(EditorError::InvalidTransition {
                phase,
                event: event.name(),
            }),
        }
    }

    pub fn is_idle(self) -> bool {
        self == DragPhase::Idle
    }
}

impl fmt::Display for DragPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DragPhase::Idle => "idle",
            DragPhase::Dragging => "dragging",
            DragPhase::Dropping => "dropping",
            DragPhase::Cancelling => "cancelling",
        };
        f.write_str(name)
    }
}

/// What follows the pointer while dragging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragGhost {
    pub id: BlockId,
    pub kind: NodeKind,
    pub display_name: String,
}

impl From<&OutlineNode> for DragGhost {
    fn from(node: &OutlineNode) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            display_name: node.display_name.clone(),
        }
    }
}

/// State of the drag in progress
#[derive(Debug, Clone)]
pub struct ActiveDrag {
    pub active_id: BlockId,
    pub ghost: DragGhost,
    /// Tree as it was when the drag started
    pub snapshot: OutlineTree,
    /// Container currently marked as the drop destination
    pub highlight: Option<BlockId>,
    /// Reorder chosen by the last over event, applied on drop
    ///
    /// Relocations are previewed on the tree as they happen and leave this empty.
    pub pending: Option<MoveTarget>,
}

impl ActiveDrag {
    pub fn new(node: &OutlineNode, snapshot: OutlineTree) -> Self {
        Self {
            active_id: node.id.clone(),
            ghost: DragGhost::from(node),
            snapshot,
            highlight: None,
            pending: None,
        }
    }
}
