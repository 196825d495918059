use crate::reorder::{move_across_parents, move_within_parent};
use crate::{MoveOutcome, MoveStrategy, MoveTarget, PlanError};
use outline_model::{NodeKind, OutlineTree};

/// Apply `target` to a copy of `tree`
///
/// The input tree is left untouched; the outcome's tree shares every node
/// outside the touched containers.
pub fn apply_move(tree: &OutlineTree, target: &MoveTarget) -> Result<MoveOutcome, PlanError> {
    let stale = || PlanError::StaleTarget(target.node_id.clone());

    let node = tree.node(&target.from).ok_or_else(stale)?;
    if node.id != target.node_id || node.kind != target.kind {
        return Err(stale());
    }
    let source = target.from_container().ok_or_else(stale)?;
    let from_index = target.from_index().ok_or_else(stale)?;

    let mut next = tree.clone();
    let landed_at = match target.strategy {
        MoveStrategy::Reorder => {
            if source != target.to_container {
                return Err(PlanError::InvalidTarget(format!(
                    "reorder of {} leaves its container {}",
                    target.node_id, source
                )));
            }
            let children = tree.children(&source).ok_or_else(stale)?;
            let moved = move_within_parent(children, from_index, target.to_index).ok_or_else(|| {
                PlanError::InvalidTarget(format!("cannot reorder {} to {}", target.node_id, target.to_index))
            })?;
            next.set_children(&source, moved)?;
            source.child(target.to_index)
        }
        MoveStrategy::Relocate => {
            if source == target.to_container || source.depth() != target.to_container.depth() {
                return Err(PlanError::InvalidTarget(format!(
                    "{} cannot be relocated from {} to {}",
                    target.node_id, source, target.to_container
                )));
            }
            let dest_node = tree.node(&target.to_container).ok_or_else(stale)?;
            if !dest_node.is_child_addable() {
                return Err(PlanError::InvalidTarget(format!(
                    "{} does not accept new children",
                    dest_node.id
                )));
            }
            let source_children = tree.children(&source).ok_or_else(stale)?;
            let (new_source, new_dest) = move_across_parents(
                source_children,
                from_index,
                &dest_node.children,
                target.to_index,
            )
            .ok_or_else(|| PlanError::InvalidTarget(format!("{} is not draggable", target.node_id)))?;

            let landed_index = target.to_index.min(new_dest.len() - 1);
            next.set_children(&source, new_source)?;
            next.set_children(&target.to_container, new_dest)?;
            target.to_container.child(landed_index)
        }
    };

    let container_id = next.container_id(&target.to_container).ok_or_else(stale)?;
    let ordered_child_ids = next.ordered_child_ids(&target.to_container).ok_or_else(stale)?;
    let source_container_id = match target.strategy {
        MoveStrategy::Relocate => tree.container_id(&source),
        MoveStrategy::Reorder => None,
    };
    let (section_id, prev_section_id) = match target.kind {
        NodeKind::Section => (None, None),
        _ => (next.section_id_of(&landed_at), tree.section_id_of(&target.from)),
    };

    Ok(MoveOutcome {
        tree: next,
        target: target.clone(),
        landed_at,
        container_id,
        ordered_child_ids,
        source_container_id,
        section_id,
        prev_section_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_drop_move, compute_step_move, Direction};
    use outline_model::{BlockId, OutlineNode, TreePath};
    use std::sync::Arc;

    fn sample() -> OutlineTree {
        OutlineTree::new(
            "course",
            [
                OutlineNode::section("s1").with_children([
                    OutlineNode::subsection("ss1").with_children([OutlineNode::unit("u1"), OutlineNode::unit("u2")]),
                ]),
                OutlineNode::section("s2").with_children([
                    OutlineNode::subsection("ss2").with_children([OutlineNode::unit("u3")]),
                ]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_reorder_shares_untouched_sections() {
        let tree = sample();
        let target = compute_step_move(&tree, &"u1".into(), Direction::Down).unwrap();
        let outcome = apply_move(&tree, &target).unwrap();

        assert_eq!(outcome.container_id, BlockId::from("ss1"));
        assert_eq!(outcome.ordered_child_ids, vec![BlockId::from("u2"), BlockId::from("u1")]);
        assert_eq!(outcome.source_container_id, None);
        assert_eq!(outcome.landed_at, TreePath::from_indices([0, 0, 1]));
        assert!(Arc::ptr_eq(&tree.sections()[1], &outcome.tree.sections()[1]));
        assert_eq!(tree.order_index(&"u1".into()), Some(0));
    }

    #[test]
    fn test_relocate_reports_both_sections() {
        let tree = sample();
        let target = compute_drop_move(&tree, &"u3".into(), &"ss1".into(), false).unwrap();
        let outcome = apply_move(&tree, &target).unwrap();

        assert_eq!(outcome.container_id, BlockId::from("ss1"));
        assert_eq!(outcome.source_container_id, Some(BlockId::from("ss2")));
        assert_eq!(
            outcome.affected_sections(),
            vec![BlockId::from("s1"), BlockId::from("s2")]
        );
        assert!(outcome.tree.children(&TreePath::from_indices([1, 0])).unwrap().is_empty());
    }

    #[test]
    fn test_stale_target_is_rejected() {
        let tree = sample();
        let target = compute_step_move(&tree, &"u1".into(), Direction::Down).unwrap();
        let moved = apply_move(&tree, &target).unwrap().tree;

        assert!(matches!(
            apply_move(&moved, &target),
            Err(PlanError::StaleTarget(id)) if id.as_str() == "u1"
        ));
    }
}
