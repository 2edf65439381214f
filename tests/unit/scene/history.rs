use super::*;

#[test]
fn undo_redo_round_trip() {
    let mut h = SnapshotHistory::new(10);
    let mut state = vec![1];
    h.push(state.clone());
    state.push(2);

    state = h.undo(state).unwrap();
    assert_eq!(state, vec![1]);
    assert!(h.can_redo());

    state = h.redo(state).unwrap();
    assert_eq!(state, vec![1, 2]);
    assert!(!h.can_redo());
    assert!(h.can_undo());
}

#[test]
fn push_clears_redo() {
    let mut h = SnapshotHistory::new(10);
    h.push(0);
    let cur = h.undo(1).unwrap();
    assert_eq!(cur, 0);
    h.push(cur);
    assert!(!h.can_redo());
}

#[test]
fn empty_stacks_return_none() {
    let mut h: SnapshotHistory<u8> = SnapshotHistory::default();
    assert_eq!(h.undo(3), None);
    assert_eq!(h.redo(3), None);
}

#[test]
fn limit_drops_oldest() {
    let mut h = SnapshotHistory::new(2);
    h.push(1);
    h.push(2);
    h.push(3);
    assert_eq!(h.undo_len(), 2);
    assert_eq!(h.undo(4), Some(3));
    assert_eq!(h.undo(3), Some(2));
    assert_eq!(h.undo(2), None);
}
