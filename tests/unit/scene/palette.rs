use super::*;

#[test]
fn palette_ids_are_unique_and_resolvable() {
    let all = palette();
    let ids: std::collections::BTreeSet<_> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), all.len());
    assert_eq!(entry("cone").unwrap().kind, ItemKind::Cone);
    assert!(entry("nope").is_none());
}

#[test]
fn spawn_rotates_offsets_and_clamps() {
    let cone = entry("cone").unwrap();
    let a = spawn(&cone, "a", None, 0, 10);
    let b = spawn(&cone, "b", None, 1, 11);
    assert_eq!((a.x, a.y), (50.0, 50.0));
    assert_eq!((b.x, b.y), (56.0, 50.0));

    let edge = spawn(&cone, "c", Some((98.0, 1.0)), 5, 12);
    assert_eq!((edge.x, edge.y), (100.0, 7.0));
    assert_eq!(edge.z, 12);
}

#[test]
fn shapes_get_stroke_defaults_kit_gets_colour() {
    let arrow = spawn(&entry("shape-arrow").unwrap(), "a", None, 0, 0);
    assert_eq!(arrow.style.stroke.as_deref(), Some("#ffffff"));
    assert_eq!(arrow.style.stroke_width, Some(3.0));
    assert_eq!(arrow.style.length_pct, Some(14.0));
    assert_eq!(arrow.style.dashed, Some(false));

    let ball = spawn(&entry("ball").unwrap(), "b", None, 0, 0);
    assert_eq!(ball.style.color.as_deref(), Some("#ffffff"));
    assert_eq!(ball.style.size, Some(16.0));
}
