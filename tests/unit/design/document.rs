use super::*;
use serde_json::json;

use crate::scene::item::ItemKind;

#[test]
fn garbage_degrades_to_empty_scene() {
    let d = Design::from_json_str("{not json");
    assert!(d.items.is_empty() && d.steps.is_empty());
    assert_eq!(d.name, UNTITLED);
    assert_eq!(d.pitch_id, "full");

    let d = Design::from_value(&json!([1, 2, 3]));
    assert!(d.items.is_empty());
}

#[test]
fn reads_nested_legacy_rows() {
    let row = json!({
        "uuid": "abc",
        "title": "Rondo",
        "data": {
            "pitch": "7v7",
            "items": [{"id": "p1", "type": "pole", "x": 140, "y": "12"}],
            "meta": {"notes": "warm-up"},
            "timeline": 3
        }
    });
    let d = Design::from_value(&row);
    assert_eq!(d.id, "abc");
    assert_eq!(d.name, "Rondo");
    assert_eq!(d.pitch_id, "7v7");
    assert_eq!(d.notes, "warm-up");
    assert_eq!(d.timeline, 3.0);
    assert_eq!(d.items[0].kind, ItemKind::Slalom);
    assert_eq!((d.items[0].x, d.items[0].y), (100.0, 12.0));
}

#[test]
fn reads_data_stored_as_a_string() {
    let inner = json!({"items": [{"id": "b", "type": "ball", "x": 5, "y": 6}]}).to_string();
    let d = Design::from_value(&json!({"id": "s", "data": inner}));
    assert_eq!(d.items.len(), 1);
    assert_eq!(d.items[0].id, "b");
}

#[test]
fn malformed_entries_are_dropped_individually() {
    let d = Design::from_value(&json!({
        "id": "x",
        "items": [{"id": "ok", "type": "cone"}, {"type": "cone"}, 7],
        "steps": [{"id": "s1", "duration": 1}, "nope"],
        "keyframesById": {"ok": [{"t": 0, "x": 1, "y": 1}], "bad": "x"}
    }));
    assert_eq!(d.items.len(), 1);
    assert_eq!(d.steps.len(), 1);
    assert_eq!(d.tracks.len(), 1);
}

#[test]
fn legacy_keyframes_become_steps_only_without_steps() {
    let row = json!({
        "id": "k",
        "keyframesById": {
            "p": [{"t": 0, "x": 10, "y": 10}, {"t": 2, "x": 30, "y": 10}]
        }
    });
    let d = Design::from_value(&row);
    let steps = d.resolved_steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].duration, 2.0);

    let mut with_steps = row.clone();
    with_steps["steps"] = json!([{"id": "mine", "name": "Mine", "duration": 1}]);
    let steps = Design::from_value(&with_steps).resolved_steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].id, "mine");
}

#[test]
fn save_payload_uses_legacy_field_names() {
    let payload = SavePayload {
        id: "d".into(),
        name: "N".into(),
        pitch: "full".into(),
        items: vec![],
        keyframes_by_id: BTreeMap::new(),
        timeline: 0.0,
        steps: vec![],
        notes: String::new(),
    };
    let v = serde_json::to_value(&payload).unwrap();
    assert!(v.get("keyframesById").is_some());
    assert!(v.get("pitch").is_some());
}

#[test]
fn memory_store_round_trips_and_reports_missing() {
    let mut store = MemoryDesignStore::new();
    let payload = SavePayload {
        id: "d1".into(),
        name: "Press".into(),
        pitch: "9v9".into(),
        items: vec![Item::new("a", ItemKind::Player, 20.0, 30.0)],
        keyframes_by_id: BTreeMap::new(),
        timeline: 0.0,
        steps: vec![],
        notes: "n".into(),
    };
    store.save(&payload, Some(&[1, 2, 3])).unwrap();
    assert_eq!(store.thumbnail("d1"), Some(&[1u8, 2, 3][..]));

    let d = load_design(&mut store, "d1").unwrap();
    assert_eq!(d.name, "Press");
    assert_eq!(d.pitch_id, "9v9");
    assert_eq!(d.items, payload.items);

    let err = load_design(&mut store, "missing").unwrap_err();
    assert!(err.is_retryable());
}
