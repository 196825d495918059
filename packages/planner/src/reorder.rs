//! Splicing primitives on ordered child lists.

use outline_model::OutlineNode;
use std::sync::Arc;

/// Move `items[from]` to position `to`; every other item keeps its relative order
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from >= items.len() || to >= items.len() {
        return None;
    }
    let mut result = items.to_vec();
    let item = result.remove(from);
    result.insert(to, item);
    Some(result)
}

/// Reorder within one container
///
/// `None` when the node at `from` is not draggable or an index is out of range.
pub fn move_within_parent(
    children: &[Arc<OutlineNode>],
    from: usize,
    to: usize,
) -> Option<Vec<Arc<OutlineNode>>> {
    if !children.get(from)?.is_draggable() {
        return None;
    }
    array_move(children, from, to)
}

/// Take the node at `source_index` out of `source` and insert it into `dest`
///
/// `dest_index` past the end appends.
pub fn move_across_parents(
    source: &[Arc<OutlineNode>],
    source_index: usize,
    dest: &[Arc<OutlineNode>],
    dest_index: usize,
) -> Option<(Vec<Arc<OutlineNode>>, Vec<Arc<OutlineNode>>)> {
    if !source.get(source_index)?.is_draggable() {
        return None;
    }
    let mut new_source = source.to_vec();
    let moved = new_source.remove(source_index);

    let mut new_dest = dest.to_vec();
    let insert_at = dest_index.min(new_dest.len());
    new_dest.insert(insert_at, moved);

    Some((new_source, new_dest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(ids: &[&str]) -> Vec<Arc<OutlineNode>> {
        ids.iter().map(|id| Arc::new(OutlineNode::unit(*id))).collect()
    }

    fn ids(children: &[Arc<OutlineNode>]) -> Vec<&str> {
        children.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_move_within_parent_is_a_permutation() {
        let children = units(&["a", "b", "c", "d", "e"]);

        for from in 0..children.len() {
            for to in 0..children.len() {
                let moved = move_within_parent(&children, from, to).unwrap();
                assert_eq!(moved.len(), children.len());
                assert!(Arc::ptr_eq(&moved[to], &children[from]));

                let mut rest_before: Vec<_> = children.iter().collect();
                rest_before.remove(from);
                let mut rest_after: Vec<_> = moved.iter().collect();
                rest_after.remove(to);
                for (a, b) in rest_before.iter().zip(rest_after.iter()) {
                    assert!(Arc::ptr_eq(a, b));
                }
            }
        }
    }

    #[test]
    fn test_move_to_same_index_is_identity() {
        let children = units(&["a", "b", "c"]);
        for i in 0..children.len() {
            assert_eq!(move_within_parent(&children, i, i).unwrap(), children);
        }
    }

    #[test]
    fn test_move_within_parent_requires_draggable() {
        let mut children = units(&["a", "b"]);
        children[0] = Arc::new(OutlineNode::unit("a").draggable(false));
        assert!(move_within_parent(&children, 0, 1).is_none());
        assert!(move_within_parent(&children, 1, 0).is_some());
        assert!(move_within_parent(&children, 2, 0).is_none());
    }

    #[test]
    fn test_move_across_parents() {
        let source = units(&["a", "b", "c"]);
        let dest = units(&["x", "y"]);

        let (new_source, new_dest) = move_across_parents(&source, 1, &dest, 1).unwrap();
        assert_eq!(ids(&new_source), vec!["a", "c"]);
        assert_eq!(ids(&new_dest), vec!["x", "b", "y"]);

        let (_, appended) = move_across_parents(&source, 0, &dest, 99).unwrap();
        assert_eq!(ids(&appended), vec!["x", "y", "a"]);

        let (emptied, into_empty) = move_across_parents(&units(&["solo"]), 0, &[], 0).unwrap();
        assert!(emptied.is_empty());
        assert_eq!(ids(&into_empty), vec!["solo"]);
    }
}
