use super::*;
use crate::foundation::core::Pose;
use crate::scene::item::ItemKind;

fn snap(x: f64) -> PoseMap {
    [("a".to_owned(), Pose::new(x, x, 0.0))].into()
}

fn items(x: f64) -> Vec<Item> {
    vec![Item::new("a", ItemKind::Player, x, x)]
}

#[test]
fn confirm_walks_start_then_end() {
    let mut steps = vec![Step::new("s", "Step 1", 2.0)];
    let mut ed = EditSession::for_new_step(0, 50);
    assert!(ed.discards_step_on_cancel());

    assert_eq!(ed.confirm(&mut steps, snap(10.0)), Some(Confirmed::Start));
    assert_eq!(ed.phase(), EditPhase::EditingEnd);
    assert!(!ed.discards_step_on_cancel());
    assert!(steps[0].end.is_none());

    assert_eq!(ed.confirm(&mut steps, snap(90.0)), Some(Confirmed::End));
    assert_eq!(steps[0].start, Some(snap(10.0)));
    assert_eq!(steps[0].end, Some(snap(90.0)));
}

#[test]
fn end_phase_never_leaves_start_unset() {
    let mut steps = vec![Step::new("s", "Step 1", 2.0)];
    let mut ed = EditSession::begin(0, EditPhase::EditingEnd, 50);
    ed.confirm(&mut steps, snap(40.0));
    assert_eq!(steps[0].start, Some(snap(40.0)));
}

#[test]
fn confirm_on_missing_step_is_none() {
    let mut steps: Vec<Step> = Vec::new();
    let mut ed = EditSession::begin(3, EditPhase::EditingStart, 50);
    assert!(ed.confirm(&mut steps, snap(1.0)).is_none());
}

#[test]
fn gesture_undo_redo_round_trips() {
    let mut ed = EditSession::begin(0, EditPhase::EditingStart, 50);
    ed.record_gesture(items(10.0));
    assert!(ed.can_undo());
    let restored = ed.undo(items(30.0)).unwrap();
    assert_eq!(restored, items(10.0));
    assert!(ed.can_redo());
    assert_eq!(ed.redo(restored).unwrap(), items(30.0));
}

#[test]
fn confirming_start_clears_phase_history() {
    let mut steps = vec![Step::new("s", "Step 1", 2.0)];
    let mut ed = EditSession::begin(0, EditPhase::EditingStart, 50);
    ed.record_gesture(items(10.0));
    ed.confirm(&mut steps, snap(10.0));
    assert!(!ed.can_undo());
}

#[test]
fn reset_target_only_while_editing_end() {
    let mut steps = vec![Step::new("s", "Step 1", 2.0)];
    let mut ed = EditSession::begin(0, EditPhase::EditingStart, 50);
    assert!(ed.reset_target(&steps).is_none());
    ed.confirm(&mut steps, snap(20.0));
    assert_eq!(ed.reset_target(&steps), Some(&snap(20.0)));
}

#[test]
fn retarget_keeps_step_and_discard_flag() {
    let mut fresh = EditSession::for_new_step(2, 10);
    fresh.record_gesture(items(1.0));
    let again = fresh.retarget(EditPhase::EditingEnd, 10);
    assert_eq!(again.step_index(), 2);
    assert_eq!(again.phase(), EditPhase::EditingEnd);
    assert!(again.discards_step_on_cancel());
    assert!(!again.can_undo());

    let plain = EditSession::begin(0, EditPhase::EditingEnd, 10).retarget(EditPhase::EditingStart, 10);
    assert!(!plain.discards_step_on_cancel());
}
