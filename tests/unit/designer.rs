use super::*;
use crate::design::document::{MemoryDesignStore, NoticeKind};
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Fps, Pose};
use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
use crate::scene::item::ItemKind;

const RECT: SurfaceRect = SurfaceRect {
    left: 0.0,
    top: 0.0,
    width: 800.0,
    height: 500.0,
};

fn pose_of(d: &Designer, id: &str) -> (f64, f64) {
    let it = d.item(id).unwrap();
    (it.x, it.y)
}

fn approx(a: (f64, f64), b: (f64, f64)) {
    assert!(
        (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6,
        "{a:?} != {b:?}"
    );
}

/// Drag `id` by a percent delta on an 800x500 surface.
fn drag_by(d: &mut Designer, id: &str, dx: f64, dy: f64) {
    assert!(d.pointer_down(id, 100.0, 100.0));
    d.pointer_move(RECT, 100.0 + dx * 8.0, 100.0 + dy * 5.0);
    d.pointer_up();
}

/// One player authored to run from (10,10) to (90,90) over a single 2s step.
fn authored() -> Designer {
    let mut d = Designer::default();
    d.add_item(Item::new("p", ItemKind::Player, 10.0, 10.0));
    d.add_step();
    assert_eq!(d.confirm_phase(), Some(Confirmed::Start));
    drag_by(&mut d, "p", 80.0, 80.0);
    assert_eq!(d.confirm_phase(), Some(Confirmed::End));
    d
}

#[test]
fn authored_step_interpolates_between_anchors() {
    let mut d = authored();
    assert!(!d.is_editing());
    assert_eq!(d.duration(), DEFAULT_STEP_DURATION);
    assert!(d.steps()[0].is_complete());

    d.seek(0.0);
    approx(pose_of(&d, "p"), (10.0, 10.0));
    d.seek(1.0);
    approx(pose_of(&d, "p"), (50.0, 50.0));
    d.seek(99.0);
    approx(pose_of(&d, "p"), (90.0, 90.0));
    assert_eq!(d.time(), 2.0);
}

#[test]
fn playback_advances_with_host_clock_and_stops_at_end() {
    let mut d = authored();
    d.seek(0.0);
    d.play(100.0);
    assert!(d.scheduler().is_playing());
    let t = d.tick(100.5);
    assert!((t - 0.5).abs() < 1e-9);
    approx(pose_of(&d, "p"), (30.0, 30.0));

    d.tick(110.0);
    assert!(!d.scheduler().is_playing());
    approx(pose_of(&d, "p"), (90.0, 90.0));

    // Playing again from the end restarts.
    d.play(200.0);
    assert_eq!(d.time(), 0.0);
}

#[test]
fn play_is_ignored_while_editing() {
    let mut d = authored();
    assert!(d.begin_edit(0, EditPhase::EditingEnd));
    d.play(0.0);
    assert!(!d.scheduler().is_playing());
}

#[test]
fn cancelling_a_new_step_before_its_start_removes_it() {
    let mut d = Designer::default();
    d.add_item(Item::new("p", ItemKind::Player, 10.0, 10.0));
    d.add_step();
    assert_eq!(d.steps().len(), 1);
    assert_eq!(d.edit_phase(), Some(EditPhase::EditingStart));
    d.cancel_editing();
    assert!(d.steps().is_empty());
    assert!(!d.is_editing());
    assert_eq!(d.duration(), 0.0);
}

#[test]
fn cancelling_after_start_confirmed_keeps_the_step() {
    let mut d = Designer::default();
    d.add_item(Item::new("p", ItemKind::Player, 10.0, 10.0));
    d.add_step();
    d.confirm_phase();
    d.cancel_editing();
    assert_eq!(d.steps().len(), 1);
    assert!(d.steps()[0].start.is_some());
    assert!(d.steps()[0].end.is_none());
}

#[test]
fn edit_undo_is_scoped_to_the_phase() {
    let mut d = Designer::default();
    d.add_item(Item::new("p", ItemKind::Player, 10.0, 10.0));
    d.add_step();
    // Nothing recorded in the fresh phase yet, even though the session has history.
    assert!(!d.can_undo());

    drag_by(&mut d, "p", 10.0, 0.0);
    approx(pose_of(&d, "p"), (20.0, 10.0));
    assert!(d.undo());
    approx(pose_of(&d, "p"), (10.0, 10.0));
    assert!(d.redo());
    approx(pose_of(&d, "p"), (20.0, 10.0));

    // Confirming the start begins a new, empty phase history.
    d.confirm_phase();
    assert!(!d.can_undo());
    assert!(!d.can_redo());
}

#[test]
fn reset_restores_confirmed_start_while_editing_end() {
    let mut d = Designer::default();
    d.add_item(Item::new("p", ItemKind::Player, 10.0, 10.0));
    d.add_step();
    assert!(!d.reset_to_step_start());
    d.confirm_phase();
    drag_by(&mut d, "p", 30.0, 30.0);
    assert!(d.reset_to_step_start());
    approx(pose_of(&d, "p"), (10.0, 10.0));
}

#[test]
fn session_undo_covers_item_edits() {
    let mut d = Designer::default();
    let id = d.add_item(Item::new("p", ItemKind::Player, 10.0, 10.0));
    assert!(d.nudge(&id, NUDGE_STEP_LARGE, 0.0));
    approx(pose_of(&d, &id), (12.0, 10.0));
    assert!(d.delete(&id));
    assert!(d.item(&id).is_none());

    assert!(d.undo());
    approx(pose_of(&d, &id), (12.0, 10.0));
    assert!(d.undo());
    approx(pose_of(&d, &id), (10.0, 10.0));
    assert!(d.undo());
    assert!(d.items().is_empty());
    assert!(!d.undo());
    assert!(d.redo());
    assert_eq!(d.items().len(), 1);
}

#[test]
fn unknown_ids_are_no_ops() {
    let mut d = Designer::default();
    assert!(!d.move_item("nope", 1.0, 1.0));
    assert!(!d.nudge("nope", 1.0, 1.0));
    assert!(!d.delete("nope"));
    assert!(d.duplicate("nope").is_none());
    assert!(!d.pointer_down("nope", 0.0, 0.0));
    assert!(!d.can_undo());
    assert!(d.apply_template("no-such-template", "#fff").is_empty());
    assert!(!d.begin_edit(0, EditPhase::EditingStart));
    assert!(!d.remove_step(3));
}

#[test]
fn nudge_clamps_to_pitch() {
    let mut d = Designer::default();
    let id = d.add_item(Item::new("p", ItemKind::Player, 99.8, 0.2));
    d.nudge(&id, NUDGE_STEP, -NUDGE_STEP);
    approx(pose_of(&d, &id), (100.0, 0.0));
}

#[test]
fn palette_drop_lands_under_pointer_and_selects() {
    let mut d = Designer::default();
    let id = d.drop_from_palette("cone", RECT, 200.0, 250.0).unwrap();
    approx(pose_of(&d, &id), (25.0, 50.0));
    assert_eq!(d.selected(), Some(id.as_str()));
    assert!(d.drop_from_palette("no-such-entry", RECT, 0.0, 0.0).is_none());
}

#[test]
fn deleting_selected_item_clears_selection() {
    let mut d = Designer::default();
    let id = d.add_item(Item::new("p", ItemKind::Player, 10.0, 10.0));
    d.select(Some(&id));
    assert_eq!(d.selected(), Some("p"));
    d.delete(&id);
    assert_eq!(d.selected(), None);
}

#[test]
fn step_list_management() {
    let mut d = authored();
    let copy = d.duplicate_step(0).unwrap();
    assert_eq!(copy, 1);
    assert_eq!(d.steps()[1].name, "Step 1 copy");
    assert_ne!(d.steps()[1].id, d.steps()[0].id);
    assert_eq!(d.duration(), 4.0);

    assert!(d.set_step_duration(1, 0.01));
    assert_eq!(d.steps()[1].duration, 0.2);
    assert!((d.duration() - 2.2).abs() < 1e-9);

    assert!(d.move_step(1, -1));
    assert_eq!(d.steps()[0].name, "Step 1 copy");
    assert!(!d.move_step(0, -1));

    assert!(d.rename_step(0, "Overlap"));
    assert_eq!(d.step_start_time(1), 0.2);
    assert!(d.remove_step(0));
    assert_eq!(d.steps().len(), 1);
    assert_eq!(d.duration(), 2.0);
}

#[test]
fn go_to_step_end_applies_end_anchor() {
    let mut d = authored();
    d.go_to_step_start(0);
    approx(pose_of(&d, "p"), (10.0, 10.0));
    d.go_to_step_end(5);
    approx(pose_of(&d, "p"), (90.0, 90.0));
    assert_eq!(d.current_step(), 0);
}

#[test]
fn save_then_load_restores_the_board() {
    let mut d = authored();
    d.set_name("Overlap run");
    d.set_notes("left side");
    d.set_pitch("futsal");
    let mut store = MemoryDesignStore::new();
    let mut surface =
        CpuSurface::new(CpuSurfaceOpts::default().with_size(SurfaceSize::new(64, 40))).unwrap();
    let notice = d.save(&mut store, Some(&mut surface));
    assert_eq!(notice.kind, NoticeKind::Success);
    assert!(store.thumbnail(d.id()).is_some());

    let mut other = Designer::default();
    let notice = other.load(&mut store, d.id());
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(other.name(), "Overlap run");
    assert_eq!(other.notes(), "left side");
    assert_eq!(other.pitch().id, "futsal");
    assert_eq!(other.steps(), d.steps());
    assert_eq!(other.duration(), 2.0);
    assert_eq!(
        other.timeline().sample("p", 1.0),
        Some(Pose::new(50.0, 50.0, 0.0))
    );
}

#[test]
fn failed_load_leaves_the_board_alone() {
    let mut d = authored();
    let before = d.id().to_owned();
    let notice = d.load(&mut MemoryDesignStore::new(), "missing");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(d.id(), before);
    assert_eq!(d.steps().len(), 1);
}

#[test]
fn video_export_restores_playhead() {
    let mut d = authored();
    d.seek(0.5);
    let mut surface =
        CpuSurface::new(CpuSurfaceOpts::default().with_size(SurfaceSize::new(32, 20))).unwrap();
    let mut sink = InMemorySink::new();
    let opts = ExportOpts::default().with_fps(Fps::new(12, 1).unwrap());
    let frames = d.export_video(opts, &mut surface, &mut sink).unwrap();
    assert_eq!(frames, 25);
    assert_eq!(sink.frames().len(), 25);
    assert!(sink.is_finished());
    assert_eq!(d.time(), 0.5);
    approx(pose_of(&d, "p"), (30.0, 30.0));
}

#[test]
fn new_design_is_undoable_for_items() {
    let mut d = authored();
    let old_id = d.id().to_owned();
    d.new_design();
    assert!(d.items().is_empty());
    assert!(d.steps().is_empty());
    assert_ne!(d.id(), old_id);
    assert!(d.undo());
    assert_eq!(d.items().len(), 1);
}

#[test]
fn reopening_a_just_added_step_keeps_it() {
    let mut d = authored();
    let idx = d.add_step();
    assert_eq!(idx, 1);
    assert!(d.begin_edit(idx, EditPhase::EditingStart));
    assert_eq!(d.steps().len(), 2);
    assert_eq!(d.editing_step(), Some(1));

    drag_by(&mut d, "p", -40.0, -40.0);
    assert_eq!(d.confirm_phase(), Some(Confirmed::Start));
    drag_by(&mut d, "p", 0.0, 10.0);
    assert_eq!(d.confirm_phase(), Some(Confirmed::End));
    assert!(d.steps()[1].is_complete());
    assert_eq!(d.steps()[1].start.as_ref().unwrap()["p"], Pose::new(50.0, 50.0, 0.0));
    assert_eq!(d.steps()[1].end.as_ref().unwrap()["p"], Pose::new(50.0, 60.0, 0.0));

    // Still discarded by a cancel once reopened, as long as its start is unconfirmed.
    let idx = d.add_step();
    assert!(d.begin_edit(idx, EditPhase::EditingEnd));
    d.cancel_editing();
    assert_eq!(d.steps().len(), 2);
}

#[test]
fn editing_another_step_resolves_index_after_discard() {
    let mut d = authored();
    d.add_step();
    assert_eq!(d.steps().len(), 2);
    // Cancelling the fresh step shrinks the list before the index is clamped.
    assert!(d.begin_edit(5, EditPhase::EditingEnd));
    assert_eq!(d.steps().len(), 1);
    assert_eq!(d.editing_step(), Some(0));
    approx(pose_of(&d, "p"), (90.0, 90.0));
    assert_eq!(d.confirm_phase(), Some(Confirmed::End));
}

#[test]
fn step_list_ops_on_a_discarded_step_are_no_ops() {
    let mut d = authored();
    let idx = d.add_step();
    assert!(d.duplicate_step(idx).is_none());
    assert_eq!(d.steps().len(), 1);

    let idx = d.add_step();
    assert!(!d.move_step(0, 1));
    assert_eq!(d.steps().len(), 1);
    assert!(!d.is_editing());
    assert!(d.duplicate_step(idx - 1).is_some());
}

#[test]
fn session_undo_after_editing_restores_items_not_anchors() {
    let mut d = authored();
    approx(pose_of(&d, "p"), (90.0, 90.0));
    assert!(d.begin_edit(0, EditPhase::EditingEnd));
    drag_by(&mut d, "p", -20.0, 0.0);
    assert_eq!(d.confirm_phase(), Some(Confirmed::End));
    assert_eq!(d.steps()[0].end.as_ref().unwrap()["p"], Pose::new(70.0, 90.0, 0.0));

    assert!(d.undo());
    approx(pose_of(&d, "p"), (90.0, 90.0));
    assert_eq!(d.steps()[0].end.as_ref().unwrap()["p"], Pose::new(70.0, 90.0, 0.0));
}
