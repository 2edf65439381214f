use super::*;
use serde_json::json;

#[test]
fn kind_aliases_normalise() {
    assert_eq!(ItemKind::parse("pole"), ItemKind::Slalom);
    assert_eq!(ItemKind::parse("arrow"), ItemKind::Arrow);
    assert_eq!(ItemKind::parse("S-Curve"), ItemKind::SCurve);
    assert_eq!(ItemKind::parse("arrow-twohead").as_str(), "shape-arrow-2head");
    assert_eq!(
        ItemKind::parse("mannequin"),
        ItemKind::Other("mannequin".to_owned())
    );
}

#[test]
fn kind_shape_and_dash_flags() {
    assert!(ItemKind::Curve.is_shape());
    assert!(!ItemKind::Player.is_shape());
    assert!(ItemKind::DashedArrow.is_dashed());
    assert!(!ItemKind::Arrow.is_dashed());
}

#[test]
fn deserializes_flat_legacy_item() {
    let it: Item = serde_json::from_value(json!({
        "id": "p1",
        "type": "player",
        "x": 12.5,
        "y": "40",
        "z": 11.0,
        "color": "#ff5252",
        "size": 36,
        "label": "10"
    }))
    .unwrap();
    assert_eq!(it.kind, ItemKind::Player);
    assert_eq!(it.x, 12.5);
    assert_eq!(it.y, 40.0);
    assert_eq!(it.z, 11);
    assert_eq!(it.rot, 0.0);
    assert_eq!(it.style.label.as_deref(), Some("10"));
}

#[test]
fn out_of_range_or_missing_coordinates_are_recovered() {
    let it: Item = serde_json::from_value(json!({
        "id": "a",
        "type": "cone",
        "x": 250,
        "y": null
    }))
    .unwrap();
    assert_eq!(it.x, 100.0);
    assert_eq!(it.y, 50.0);

    let it: Item = serde_json::from_value(json!({"id": "b", "type": "ball"})).unwrap();
    assert_eq!((it.x, it.y), (50.0, 50.0));
}

#[test]
fn serializes_camel_case_style_and_type_string() {
    let it = Item::new("s", ItemKind::DashedArrow, 10.0, 20.0).with_style(ItemStyle {
        stroke_width: Some(3.0),
        length_pct: Some(14.0),
        ..ItemStyle::default()
    });
    let v = serde_json::to_value(&it).unwrap();
    assert_eq!(v["type"], "shape-arrow-dashed");
    assert_eq!(v["strokeWidth"], 3.0);
    assert_eq!(v["lengthPct"], 14.0);
    assert!(v.get("fill").is_none());
}

#[test]
fn patch_only_touches_given_fields() {
    let mut it = Item::new("p", ItemKind::Player, 10.0, 10.0).with_style(ItemStyle {
        color: Some("#4aa3ff".to_owned()),
        label: Some("8".to_owned()),
        ..ItemStyle::default()
    });
    it.apply_patch(&StylePatch::color("#ff0000"));
    assert_eq!(it.style.color.as_deref(), Some("#ff0000"));
    assert_eq!(it.style.label.as_deref(), Some("8"));

    it.apply_patch(&StylePatch::rotation(45.0));
    assert_eq!(it.rot, 45.0);
    assert_eq!((it.x, it.y), (10.0, 10.0));
}

#[test]
fn set_pose_clamps() {
    let mut it = Item::new("p", ItemKind::Ball, 0.0, 0.0);
    it.set_pose(Pose {
        x: -3.0,
        y: 120.0,
        rot: 5.0,
    });
    assert_eq!(it.pose(), Pose::new(0.0, 100.0, 5.0));
}
