//! Step-by-one moves (arrow keys and the "move up / move down" menu).

use crate::eligibility::find_landing;
use crate::{Direction, MoveTarget};
use outline_model::{BlockId, OutlineTree};

/// Compute the move of `id` one step in `direction`
///
/// Inside its container the node swaps with its neighbour. At the container
/// edge it crosses into the nearest container that accepts children,
/// climbing one level when the current level has none. `None` means the
/// move is not allowed.
pub fn compute_step_move(tree: &OutlineTree, id: &BlockId, direction: Direction) -> Option<MoveTarget> {
    let (path, node) = tree.get(id)?;
    if !node.is_draggable() {
        return None;
    }

    let container = path.parent()?;
    let index = path.index()?;
    let siblings = tree.children(&container)?;

    if let Some(next) = direction.offset(index).filter(|&i| i < siblings.len()) {
        // sections never jump over a pinned section
        if container.is_root() && !siblings[next].is_draggable() {
            return None;
        }
        return MoveTarget::reorder(node, path, next);
    }

    let landing = find_landing(tree, &container, direction)?;
    let to_index = match direction {
        Direction::Up => tree.children(&landing)?.len(),
        Direction::Down => 0,
    };
    Some(MoveTarget::relocate(node, path, landing, to_index))
}

/// Whether the "move up/down" affordance for `id` is enabled
pub fn can_move(tree: &OutlineTree, id: &BlockId, direction: Direction) -> bool {
    compute_step_move(tree, id, direction).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveStrategy;
    use outline_model::{OutlineNode, TreePath};

    #[test]
    fn test_sections_swap_with_draggable_neighbours_only() {
        let tree = OutlineTree::new(
            "course",
            [
                OutlineNode::section("s1"),
                OutlineNode::section("s2"),
                OutlineNode::section("s3").draggable(false),
            ],
        )
        .unwrap();

        let up = compute_step_move(&tree, &"s2".into(), Direction::Up).unwrap();
        assert_eq!(up.strategy, MoveStrategy::Reorder);
        assert_eq!(up.to_container, TreePath::root());
        assert_eq!(up.to_index, 0);

        assert!(compute_step_move(&tree, &"s2".into(), Direction::Down).is_none());
        assert!(compute_step_move(&tree, &"s1".into(), Direction::Up).is_none());
        assert!(compute_step_move(&tree, &"s3".into(), Direction::Up).is_none());
    }

    #[test]
    fn test_unknown_id_has_no_move() {
        let tree = OutlineTree::empty("course");
        assert!(!can_move(&tree, &"missing".into(), Direction::Down));
    }
}
