//! Container locks, coalescing and failure handling without a gateway

mod common;

use common::{children_of, course, id, ids};
use outline_editor::{EditorError, GatewayError, OutlineEditor, SaveStatus, WriteId, WriteResolution};
use outline_model::OutlineNode;
use outline_planner::Direction;

#[test]
fn test_second_write_waits_for_container() {
    let mut editor = OutlineEditor::new(course());

    let first = editor.step_move(&id("u1"), Direction::Down).unwrap().unwrap();
    let ready = editor.take_ready_writes();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, first);

    let second = editor.step_move(&id("u1"), Direction::Up).unwrap().unwrap();
    assert!(editor.take_ready_writes().is_empty());
    assert_eq!(editor.pending_count(), 2);

    editor.resolve_write(first, Ok(())).unwrap();
    let ready = editor.take_ready_writes();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, second);
    assert_eq!(ready[0].ordered_child_ids, ids(&["u1", "u2"]));
}

#[test]
fn test_move_back_waits_for_the_move_out() {
    let mut editor = OutlineEditor::new(course());

    let out = editor.step_move(&id("u2"), Direction::Down).unwrap().unwrap();
    let ready = editor.take_ready_writes();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].container_id, id("sub2"));
    assert_eq!(ready[0].ordered_child_ids, ids(&["u2", "u3"]));

    // sub1 lost u2 in the store through the first write
    let back = editor.step_move(&id("u2"), Direction::Up).unwrap().unwrap();
    assert!(editor.take_ready_writes().is_empty());

    editor.resolve_write(out, Ok(())).unwrap();
    let ready = editor.take_ready_writes();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, back);
    assert_eq!(ready[0].container_id, id("sub1"));
    assert_eq!(ready[0].ordered_child_ids, ids(&["u1", "u2"]));
}

#[test]
fn test_drag_relocation_locks_the_container_it_left() {
    let mut editor = OutlineEditor::new(course());

    editor.drag_start(&id("u1")).unwrap();
    editor.drag_over(&id("u4"), false).unwrap();
    let moved = editor.drag_end().unwrap().unwrap();
    let ready = editor.take_ready_writes();
    assert_eq!(ready[0].container_id, id("sub3"));

    let next = editor.step_move(&id("u2"), Direction::Down).unwrap().unwrap();
    assert!(editor.take_ready_writes().is_empty());

    editor.resolve_write(moved, Ok(())).unwrap();
    let ready = editor.take_ready_writes();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, next);
    assert_eq!(ready[0].container_id, id("sub2"));
}

#[test]
fn test_refresh_waits_until_section_is_quiet() {
    let mut editor = OutlineEditor::new(course());

    let first = editor.step_move(&id("u1"), Direction::Down).unwrap().unwrap();
    editor.take_ready_writes();
    let second = editor.step_move(&id("u1"), Direction::Up).unwrap().unwrap();

    assert_eq!(
        editor.resolve_write(first, Ok(())).unwrap(),
        WriteResolution::Confirmed { refresh_sections: vec![] }
    );

    // what the store holds after the first write only
    let stored = OutlineNode::section("section1").with_children([
        OutlineNode::subsection("sub1").with_children([OutlineNode::unit("u2"), OutlineNode::unit("u1")]),
        OutlineNode::subsection("sub2").with_children([OutlineNode::unit("u3")]),
    ]);
    assert_eq!(editor.replace_sections([stored]).unwrap(), 0);
    assert_eq!(children_of(editor.tree(), &[0, 0]), vec!["u1", "u2"]);

    let ready = editor.take_ready_writes();
    assert_eq!(ready[0].id, second);
    assert_eq!(
        editor.resolve_write(second, Ok(())).unwrap(),
        WriteResolution::Confirmed {
            refresh_sections: ids(&["section1"])
        }
    );
}

#[test]
fn test_other_containers_are_not_blocked() {
    let mut editor = OutlineEditor::new(course());

    editor.step_move(&id("u1"), Direction::Down).unwrap();
    editor.take_ready_writes();
    editor.step_move(&id("u4"), Direction::Down).unwrap();

    let ready = editor.take_ready_writes();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].container_id, id("sub3"));
}

#[test]
fn test_waiting_writes_coalesce_and_keep_oldest_snapshot() {
    let mut editor = OutlineEditor::new(course());

    let first = editor.step_move(&id("u1"), Direction::Down).unwrap().unwrap();
    editor.take_ready_writes();
    let after_first = editor.tree().clone();

    editor.step_move(&id("u1"), Direction::Up).unwrap();
    let last = editor.step_move(&id("u1"), Direction::Down).unwrap().unwrap();
    assert_eq!(editor.pending_count(), 2);

    editor.resolve_write(first, Ok(())).unwrap();
    let ready = editor.take_ready_writes();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, last);
    assert_eq!(ready[0].ordered_child_ids, ids(&["u2", "u1"]));

    let resolution = editor
        .resolve_write(last, Err(GatewayError::Rejected("conflict".into())))
        .unwrap();
    assert_eq!(resolution, WriteResolution::RolledBack { discarded: vec![] });
    assert_eq!(editor.tree(), &after_first);
}

#[test]
fn test_failure_discards_later_writes() {
    let original = course();
    let mut editor = OutlineEditor::new(original.clone());

    let failed = editor.step_move(&id("u1"), Direction::Down).unwrap().unwrap();
    editor.take_ready_writes();
    let later = editor.step_move(&id("u2"), Direction::Down).unwrap().unwrap();

    let resolution = editor
        .resolve_write(failed, Err(GatewayError::Unavailable("timeout".into())))
        .unwrap();
    assert_eq!(resolution, WriteResolution::RolledBack { discarded: vec![later] });
    assert_eq!(editor.tree(), &original);
    assert_eq!(children_of(editor.tree(), &[0, 0]), vec!["u1", "u2"]);
    assert!(editor.take_ready_writes().is_empty());
    assert_eq!(editor.pending_count(), 0);
    assert_eq!(editor.save_status(), Some(SaveStatus::Failed));
}

#[test]
fn test_in_flight_write_after_failure_is_ignored() {
    let mut editor = OutlineEditor::new(course());

    let failed = editor.step_move(&id("u1"), Direction::Down).unwrap().unwrap();
    let other = editor.step_move(&id("u4"), Direction::Down).unwrap().unwrap();
    assert_eq!(editor.take_ready_writes().len(), 2);

    editor
        .resolve_write(failed, Err(GatewayError::Rejected("no".into())))
        .unwrap();
    assert_eq!(editor.tree(), &course());
    assert_eq!(
        editor.resolve_write(other, Ok(())).unwrap(),
        WriteResolution::Ignored
    );
}

#[test]
fn test_unknown_write_is_an_error() {
    let mut editor = OutlineEditor::new(course());
    assert!(matches!(
        editor.resolve_write(WriteId::new(42), Ok(())),
        Err(EditorError::UnknownWrite(_))
    ));
}
