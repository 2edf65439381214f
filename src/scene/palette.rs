//! Catalogue of placeable items and their defaults.

use crate::foundation::math::clamp_pct;
use crate::scene::item::{Item, ItemKind, ItemStyle};

/// One palette button.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteEntry {
    /// Stable palette id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Kind of item spawned.
    pub kind: ItemKind,
    /// Style applied to new items.
    pub defaults: ItemStyle,
}

const SPAWN_OFFSETS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (6.0, 0.0),
    (-6.0, 0.0),
    (0.0, 6.0),
    (0.0, -6.0),
    (8.0, 6.0),
];

fn kit(color: Option<&str>, size: f64, label: Option<&str>) -> ItemStyle {
    ItemStyle {
        color: color.map(str::to_owned),
        size: Some(size),
        label: label.map(str::to_owned),
        ..ItemStyle::default()
    }
}

fn stroke(width: f64) -> ItemStyle {
    ItemStyle {
        stroke: Some("#ffffff".to_owned()),
        stroke_width: Some(width),
        ..ItemStyle::default()
    }
}

fn zone(extra: ItemStyle) -> ItemStyle {
    ItemStyle {
        fill: Some("#ffffff".to_owned()),
        fill_alpha: Some(0.12),
        ..extra
    }
}

/// The built-in palette.
pub fn palette() -> Vec<PaletteEntry> {
    let e = |id, name, kind, defaults| PaletteEntry {
        id,
        name,
        kind,
        defaults,
    };
    vec![
        e("player-blue", "Player (Blue)", ItemKind::Player, kit(Some("#4aa3ff"), 36.0, Some("8"))),
        e("player-red", "Player (Red)", ItemKind::Player, kit(Some("#ff5252"), 36.0, Some("10"))),
        e("player-keeper", "Goalkeeper", ItemKind::Player, kit(Some("#ffd84a"), 36.0, Some("1"))),
        e("ball", "Ball", ItemKind::Ball, kit(None, 16.0, None)),
        e("cone", "Cone", ItemKind::Cone, kit(Some("#ff8a34"), 22.0, None)),
        e("marker", "Marker", ItemKind::Marker, kit(Some("#f4c430"), 14.0, None)),
        e("goal", "Goal", ItemKind::Goal, kit(None, 64.0, None)),
        e("slalom", "Agility Pole", ItemKind::Slalom, kit(Some("#ffb703"), 56.0, None)),
        e("hurdle", "Hurdle", ItemKind::Hurdle, kit(Some("#e5e7eb"), 72.0, None)),
        e("shape-line", "Line", ItemKind::Line, ItemStyle { length_pct: Some(14.0), ..stroke(3.0) }),
        e(
            "shape-line-dashed",
            "Dashed Line",
            ItemKind::DashedLine,
            ItemStyle { length_pct: Some(14.0), ..stroke(3.0) },
        ),
        e(
            "shape-rect",
            "Box (Filled)",
            ItemKind::Rect,
            zone(ItemStyle { width_pct: Some(18.0), height_pct: Some(10.0), ..stroke(2.0) }),
        ),
        e(
            "shape-rect-outline",
            "Box (Outline)",
            ItemKind::RectOutline,
            ItemStyle { width_pct: Some(18.0), height_pct: Some(10.0), ..stroke(2.0) },
        ),
        e(
            "shape-circle",
            "Circle",
            ItemKind::Circle,
            zone(ItemStyle { size_pct: Some(10.0), ..stroke(2.0) }),
        ),
        e(
            "shape-triangle",
            "Triangle",
            ItemKind::Triangle,
            zone(ItemStyle { size_pct: Some(10.0), ..stroke(2.0) }),
        ),
        e("shape-arrow", "Arrow", ItemKind::Arrow, ItemStyle { length_pct: Some(14.0), ..stroke(3.0) }),
        e(
            "shape-arrow-dashed",
            "Arrow (Dashed)",
            ItemKind::DashedArrow,
            ItemStyle { length_pct: Some(14.0), ..stroke(3.0) },
        ),
        e(
            "shape-arrow-2head",
            "Arrow (Two-head)",
            ItemKind::TwoHeadArrow,
            ItemStyle { length_pct: Some(14.0), ..stroke(3.0) },
        ),
        e("shape-curve", "Curve", ItemKind::Curve, ItemStyle { length_pct: Some(18.0), ..stroke(3.0) }),
        e("shape-curve2", "S-Curve", ItemKind::SCurve, ItemStyle { length_pct: Some(18.0), ..stroke(3.0) }),
    ]
}

/// Look up a palette entry by id.
pub fn entry(id: &str) -> Option<PaletteEntry> {
    palette().into_iter().find(|e| e.id == id)
}

/// Build a new item from a palette entry.
///
/// `at` is the drop point in percent (centre when absent); `spawn_index` rotates through a
/// small offset table so repeated clicks don't stack items exactly.
pub fn spawn(
    entry: &PaletteEntry,
    id: impl Into<String>,
    at: Option<(f64, f64)>,
    spawn_index: usize,
    z: i64,
) -> Item {
    let (ax, ay) = at.unwrap_or((50.0, 50.0));
    let (dx, dy) = SPAWN_OFFSETS[spawn_index % SPAWN_OFFSETS.len()];
    let d = &entry.defaults;
    let style = if entry.kind.is_shape() {
        ItemStyle {
            stroke: Some(d.stroke.clone().unwrap_or_else(|| "#ffffff".to_owned())),
            stroke_width: Some(d.stroke_width.unwrap_or(2.0)),
            fill: Some(d.fill.clone().unwrap_or_else(|| "#ffffff".to_owned())),
            fill_alpha: Some(d.fill_alpha.unwrap_or(0.2)),
            dashed: Some(d.dashed.unwrap_or(false)),
            ..d.clone()
        }
    } else {
        ItemStyle {
            size: Some(d.size.unwrap_or(40.0)),
            color: Some(d.color.clone().unwrap_or_else(|| "#ffffff".to_owned())),
            label: Some(d.label.clone().unwrap_or_default()),
            ..d.clone()
        }
    };
    Item::new(id, entry.kind.clone(), clamp_pct(ax + dx), clamp_pct(ay + dy))
        .with_z(z)
        .with_style(style)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/palette.rs"]
mod tests;
