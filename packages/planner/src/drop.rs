//! Drop targets for free dragging.

use crate::MoveTarget;
use outline_model::{BlockId, OutlineTree};

/// Resolve a drag of `dragged_id` over `over_id`
///
/// - over a sibling in the same container: reorder to over's index
/// - over an item in another container: insert before it, or after it when
///   the pointer is below its midpoint; the container must accept children
/// - over a container of the parent level: append to it
///
/// Everything else, including drops onto the node itself or its own
/// subtree, yields `None`.
pub fn compute_drop_move(
    tree: &OutlineTree,
    dragged_id: &BlockId,
    over_id: &BlockId,
    below_midpoint: bool,
) -> Option<MoveTarget> {
    if dragged_id == over_id {
        return None;
    }
    let (from, dragged) = tree.get(dragged_id)?;
    if !dragged.is_draggable() {
        return None;
    }
    let (over_path, over) = tree.get(over_id)?;
    if from.is_ancestor_of(&over_path) {
        return None;
    }
    let source = from.parent()?;

    if over.kind == dragged.kind {
        let over_container = over_path.parent()?;
        let over_index = over_path.index()?;
        if over_container == source {
            return MoveTarget::reorder(dragged, from, over_index);
        }
        if !tree.node(&over_container)?.is_child_addable() {
            return None;
        }
        let to_index = over_index + usize::from(below_midpoint);
        return Some(MoveTarget::relocate(dragged, from, over_container, to_index));
    }

    if Some(over.kind) == dragged.kind.parent_kind() {
        if over_path == source || !over.is_child_addable() {
            return None;
        }
        let to_index = over.children.len();
        return Some(MoveTarget::relocate(dragged, from, over_path, to_index));
    }

    None
}

/// Collision filter: may `candidate_id` be considered as a drop target for `active_id`
pub fn accepts_droppable(tree: &OutlineTree, active_id: &BlockId, candidate_id: &BlockId) -> bool {
    let (Some((_, active)), Some((_, candidate))) = (tree.get(active_id), tree.get(candidate_id)) else {
        return false;
    };
    candidate.kind == active.kind
        || (Some(candidate.kind) == active.kind.parent_kind() && candidate.is_child_addable())
}
