//! # Eligibility Index
//!
//! Finds the nearest container that accepts new children, skipping the ones
//! whose `childAddable` flag is off.
//!
//! The boundary-crossing search is written against [`ContainerGraph`] rather
//! than the concrete tree: it only needs to walk up to a parent and list a
//! container's child containers, which holds for any depth.

use crate::Direction;
use outline_model::{OutlineNode, OutlineTree, TreePath};
use std::sync::Arc;

/// Anything that can say whether it takes new children
pub trait Eligible {
    fn accepts_children(&self) -> bool;
}

impl Eligible for OutlineNode {
    fn accepts_children(&self) -> bool {
        self.kind.is_container() && self.actions.child_addable
    }
}

impl<T: Eligible + ?Sized> Eligible for Arc<T> {
    fn accepts_children(&self) -> bool {
        T::accepts_children(self)
    }
}

impl Eligible for bool {
    fn accepts_children(&self) -> bool {
        *self
    }
}

/// Nearest eligible container strictly after (`Down`) or before (`Up`) `from_index`
pub fn find_eligible<T: Eligible>(containers: &[T], from_index: usize, direction: Direction) -> Option<usize> {
    let mut index = direction.offset(from_index)?;
    while index < containers.len() {
        if containers[index].accepts_children() {
            return Some(index);
        }
        index = direction.offset(index)?;
    }
    None
}

pub fn first_eligible<T: Eligible>(containers: &[T]) -> Option<usize> {
    containers.iter().position(T::accepts_children)
}

pub fn last_eligible<T: Eligible>(containers: &[T]) -> Option<usize> {
    containers.iter().rposition(T::accepts_children)
}

/// The eligible container a node entering from `direction` reaches first:
/// the last one when moving up, the first one when moving down
pub fn edge_eligible<T: Eligible>(containers: &[T], direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up => last_eligible(containers),
        Direction::Down => first_eligible(containers),
    }
}

/// Container hierarchy the landing search walks
pub trait ContainerGraph {
    type Node: Eligible;

    /// Parent container and position of `container` within it
    fn parent_of(&self, container: &TreePath) -> Option<(TreePath, usize)>;

    /// Child containers of `container`
    fn child_containers(&self, container: &TreePath) -> Option<&[Self::Node]>;

    fn child_path(&self, container: &TreePath, index: usize) -> TreePath {
        container.child(index)
    }
}

impl ContainerGraph for OutlineTree {
    type Node = Arc<OutlineNode>;

    fn parent_of(&self, container: &TreePath) -> Option<(TreePath, usize)> {
        Some((container.parent()?, container.index()?))
    }

    fn child_containers(&self, container: &TreePath) -> Option<&[Self::Node]> {
        let children = self.children(container)?;
        children
            .first()
            .map_or(true, |child| child.kind.is_container())
            .then_some(children)
    }
}

/// Container a node leaving `container` through its `direction` edge lands in
///
/// Looks at the siblings of `container` first. When none accepts children it
/// climbs one level, finds the nearest eligible container there, and descends
/// into that container's edge-most eligible child. Returns `None` once the
/// search passes the root.
pub fn find_landing<G>(graph: &G, container: &TreePath, direction: Direction) -> Option<TreePath>
where
    G: ContainerGraph + ?Sized,
{
    let (parent, index) = graph.parent_of(container)?;
    let siblings = graph.child_containers(&parent)?;
    if let Some(found) = find_eligible(siblings, index, direction) {
        return Some(graph.child_path(&parent, found));
    }

    let parent_landing = find_landing(graph, &parent, direction)?;
    let cousins = graph.child_containers(&parent_landing)?;
    let edge = edge_eligible(cousins, direction)?;
    Some(graph.child_path(&parent_landing, edge))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_eligible_skips_blocked_containers() {
        let flags = [true, false, false, true];
        assert_eq!(find_eligible(&flags, 0, Direction::Down), Some(3));
        assert_eq!(find_eligible(&flags, 3, Direction::Up), Some(0));
        assert_eq!(find_eligible(&flags, 3, Direction::Down), None);
        assert_eq!(find_eligible(&flags, 0, Direction::Up), None);
        assert_eq!(find_eligible(&[false, false], 0, Direction::Down), None);
    }

    #[test]
    fn test_edge_eligible() {
        let flags = [false, true, true, false];
        assert_eq!(edge_eligible(&flags, Direction::Up), Some(2));
        assert_eq!(edge_eligible(&flags, Direction::Down), Some(1));
        assert_eq!(edge_eligible::<bool>(&[], Direction::Down), None);
    }

    #[test]
    fn test_units_are_never_eligible() {
        let unit = Arc::new(OutlineNode::unit("u"));
        assert!(!unit.accepts_children());
        assert!(Arc::new(OutlineNode::subsection("s")).accepts_children());
    }

    #[test]
    fn test_landing_climbs_a_level() {
        let tree = OutlineTree::new(
            "course",
            [
                OutlineNode::section("s1").with_children([
                    OutlineNode::subsection("a"),
                    OutlineNode::subsection("b").child_addable(false),
                ]),
                OutlineNode::section("s2").child_addable(false),
                OutlineNode::section("s3").with_children([OutlineNode::subsection("c")]),
            ],
        )
        .unwrap();

        let from_c = TreePath::from_indices([2, 0]);
        assert_eq!(
            find_landing(&tree, &from_c, Direction::Up),
            Some(TreePath::from_indices([0, 0]))
        );

        let from_a = TreePath::from_indices([0, 0]);
        assert_eq!(
            find_landing(&tree, &from_a, Direction::Down),
            Some(TreePath::from_indices([2, 0]))
        );

        assert_eq!(find_landing(&tree, &TreePath::from_indices([0]), Direction::Up), None);
        assert_eq!(find_landing(&tree, &TreePath::root(), Direction::Down), None);
    }
}
