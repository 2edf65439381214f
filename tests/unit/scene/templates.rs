use super::*;

fn counter() -> impl FnMut() -> String {
    let mut n = 0;
    move || {
        n += 1;
        format!("t{n}")
    }
}

#[test]
fn every_listed_template_builds() {
    for t in TEMPLATES {
        let mut ids = counter();
        let items = build(t.id, "#ef4444", &mut ids).unwrap();
        assert!(!items.is_empty(), "{} produced no items", t.id);
        assert!(items.iter().all(|it| (0.0..=100.0).contains(&it.x)));
        assert!(items.iter().all(|it| (0.0..=100.0).contains(&it.y)));
    }
}

#[test]
fn kickoff_has_eleven_players_and_a_ball() {
    let mut ids = counter();
    let items = build("kickoff", "#ef4444", &mut ids).unwrap();
    let players = items.iter().filter(|it| it.kind == ItemKind::Player).count();
    let balls = items.iter().filter(|it| it.kind == ItemKind::Ball).count();
    assert_eq!(players, 11);
    assert_eq!(balls, 1);
    let ids: std::collections::BTreeSet<_> = items.iter().map(|it| it.id.clone()).collect();
    assert_eq!(ids.len(), items.len());
}

#[test]
fn free_kick_wall_uses_opponent_colour() {
    let mut ids = counter();
    let items = build("free-kick-wall", "#ef4444", &mut ids).unwrap();
    let wall = items
        .iter()
        .filter(|it| it.style.label.as_deref() == Some("W"))
        .count();
    assert_eq!(wall, 5);
    assert!(items
        .iter()
        .any(|it| it.style.color.as_deref() == Some(OPPONENT)));
}

#[test]
fn unknown_template_is_none() {
    let mut ids = counter();
    assert!(build("diamond", "#fff", &mut ids).is_none());
}
