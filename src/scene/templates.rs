//! Set-piece starting layouts.

use crate::foundation::math::clamp_pct;
use crate::scene::item::{Item, ItemKind, ItemStyle};

/// Colour used for the opposing side in templates that need one.
const OPPONENT: &str = "#3b82f6";

/// A named formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Template {
    /// Stable id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// Built-in templates.
pub const TEMPLATES: [Template; 4] = [
    Template {
        id: "kickoff",
        name: "Kick-off (4-3-3)",
    },
    Template {
        id: "corner-left",
        name: "Corner - left",
    },
    Template {
        id: "free-kick-wall",
        name: "Free-kick + wall",
    },
    Template {
        id: "goal-kick",
        name: "Goal-kick build",
    },
];

struct Builder<'a> {
    next_id: &'a mut dyn FnMut() -> String,
    out: Vec<Item>,
}

impl Builder<'_> {
    fn player(&mut self, color: &str, x: f64, y: f64, label: &str) {
        let it = Item::new((self.next_id)(), ItemKind::Player, x, y).with_style(ItemStyle {
            color: Some(color.to_owned()),
            size: Some(46.0),
            label: Some(label.to_owned()),
            ..ItemStyle::default()
        });
        self.out.push(it);
    }

    fn ball(&mut self, x: f64, y: f64) {
        let it = Item::new((self.next_id)(), ItemKind::Ball, x, y).with_style(ItemStyle {
            color: Some("#ffffff".to_owned()),
            size: Some(28.0),
            ..ItemStyle::default()
        });
        self.out.push(it);
    }

    fn arrow(&mut self, x: f64, y: f64, length_pct: f64) {
        let it = Item::new((self.next_id)(), ItemKind::Arrow, x, y).with_style(ItemStyle {
            stroke: Some("#ffffff".to_owned()),
            stroke_width: Some(3.0),
            dashed: Some(false),
            length_pct: Some(length_pct),
            ..ItemStyle::default()
        });
        self.out.push(it);
    }

    fn ring(&mut self, cx: f64, cy: f64, color: &str, labels: &[&str]) {
        const R: f64 = 12.0;
        let n = labels.len() as f64;
        for (i, label) in labels.iter().enumerate() {
            let t = (i as f64 / n) * std::f64::consts::TAU;
            self.player(color, cx + R * t.cos(), cy + R * t.sin(), label);
        }
    }
}

/// Build the items for template `id` in `color`, using `next_id` for fresh ids.
///
/// Returns `None` for an unknown template id.
pub fn build(id: &str, color: &str, next_id: &mut dyn FnMut() -> String) -> Option<Vec<Item>> {
    let mut b = Builder {
        next_id,
        out: Vec::new(),
    };
    match id {
        "kickoff" => {
            b.ring(
                50.0,
                65.0,
                color,
                &["9", "10", "11", "7", "8", "6", "3", "4", "5", "2", "1"],
            );
            b.ball(50.0, 50.0);
        }
        "corner-left" => {
            for (x, y, l) in [
                (8.0, 8.0, "11"),
                (16.0, 10.0, "9"),
                (20.0, 16.0, "10"),
                (24.0, 20.0, "8"),
                (12.0, 16.0, "7"),
                (28.0, 24.0, "6"),
                (34.0, 30.0, "5"),
                (30.0, 20.0, "4"),
                (26.0, 30.0, "3"),
                (40.0, 42.0, "2"),
                (15.0, 55.0, "1"),
            ] {
                b.player(color, x, y, l);
            }
            b.ball(4.0, 4.0);
        }
        "free-kick-wall" => {
            b.player(color, 65.0, 60.0, "10");
            b.player(color, 60.0, 58.0, "8");
            for i in 0..5 {
                b.player(OPPONENT, 76.0 + f64::from(i) * 2.0, 40.0, "W");
            }
            b.player(OPPONENT, 96.0, 36.0, "GK");
            b.ball(64.0, 55.0);
            b.arrow(64.0, 55.0, 24.0);
        }
        "goal-kick" => {
            for (x, y, l) in [
                (8.0, 36.0, "3"),
                (8.0, 64.0, "2"),
                (16.0, 22.0, "6"),
                (18.0, 50.0, "5"),
                (16.0, 78.0, "4"),
                (28.0, 30.0, "8"),
                (28.0, 50.0, "10"),
                (28.0, 70.0, "7"),
                (40.0, 40.0, "9"),
                (40.0, 60.0, "11"),
                (6.0, 50.0, "1"),
            ] {
                b.player(color, x, y, l);
            }
            b.ball(6.0, 50.0);
            b.arrow(6.0, 50.0, 20.0);
        }
        _ => return None,
    }
    for it in &mut b.out {
        it.x = clamp_pct(it.x);
        it.y = clamp_pct(it.y);
    }
    Some(b.out)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/templates.rs"]
mod tests;
