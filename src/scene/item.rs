//! Placed items and their style bag.

use crate::foundation::core::Pose;
use crate::foundation::math::clamp_pct;

/// Variant tag of a placed item.
///
/// Serialized as the legacy type string (`"player"`, `"shape-arrow-dashed"`, ...). Older alias
/// spellings are normalised on load; anything unrecognised is kept verbatim in [`ItemKind::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    /// Numbered player disc.
    Player,
    /// Football.
    Ball,
    /// Training cone.
    Cone,
    /// Flat marker disc.
    Marker,
    /// Goal frame.
    Goal,
    /// Agility pole.
    Slalom,
    /// Hurdle.
    Hurdle,
    /// Straight line.
    Line,
    /// Dashed straight line.
    DashedLine,
    /// Filled box.
    Rect,
    /// Outline-only box.
    RectOutline,
    /// Circle zone.
    Circle,
    /// Triangle zone.
    Triangle,
    /// Single-headed arrow.
    Arrow,
    /// Dashed single-headed arrow.
    DashedArrow,
    /// Two-headed arrow.
    TwoHeadArrow,
    /// Curved arrow.
    Curve,
    /// S-shaped curved arrow.
    SCurve,
    /// Unknown type string, preserved for round-tripping.
    Other(String),
}

impl ItemKind {
    /// Parse a type string, accepting legacy aliases.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" => Self::Player,
            "ball" => Self::Ball,
            "cone" => Self::Cone,
            "marker" => Self::Marker,
            "goal" => Self::Goal,
            "slalom" | "pole" | "agility" | "agility-pole" => Self::Slalom,
            "hurdle" | "hurdles" => Self::Hurdle,
            "shape-line" | "line" => Self::Line,
            "shape-line-dashed" | "line-dashed" => Self::DashedLine,
            "shape-rect" | "rect" => Self::Rect,
            "shape-rect-outline" | "rect-outline" => Self::RectOutline,
            "shape-circle" | "circle" => Self::Circle,
            "shape-triangle" | "triangle" => Self::Triangle,
            "shape-arrow" | "arrow" => Self::Arrow,
            "shape-arrow-dashed" | "arrow-dashed" => Self::DashedArrow,
            "shape-arrow-2head" | "arrow-2head" | "arrow-twohead" => Self::TwoHeadArrow,
            "shape-curve" | "curve" | "curve-arrow" => Self::Curve,
            "shape-curve2" | "curve2" | "s-curve" | "s-curve-arrow" => Self::SCurve,
            _ => Self::Other(s.to_owned()),
        }
    }

    /// Canonical type string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Player => "player",
            Self::Ball => "ball",
            Self::Cone => "cone",
            Self::Marker => "marker",
            Self::Goal => "goal",
            Self::Slalom => "slalom",
            Self::Hurdle => "hurdle",
            Self::Line => "shape-line",
            Self::DashedLine => "shape-line-dashed",
            Self::Rect => "shape-rect",
            Self::RectOutline => "shape-rect-outline",
            Self::Circle => "shape-circle",
            Self::Triangle => "shape-triangle",
            Self::Arrow => "shape-arrow",
            Self::DashedArrow => "shape-arrow-dashed",
            Self::TwoHeadArrow => "shape-arrow-2head",
            Self::Curve => "shape-curve",
            Self::SCurve => "shape-curve2",
            Self::Other(s) => s,
        }
    }

    /// Lines, arrows and zones; these carry stroke/fill styling instead of colour/size.
    pub fn is_shape(&self) -> bool {
        self.as_str().starts_with("shape-")
    }

    /// Kinds whose type alone implies a dashed stroke.
    pub fn is_dashed(&self) -> bool {
        matches!(self, Self::DashedLine | Self::DashedArrow)
    }
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ItemKind> for String {
    fn from(k: ItemKind) -> Self {
        k.as_str().to_owned()
    }
}

/// Type-specific visual attributes. Every field is optional; renderers apply per-kind defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    /// Fill colour for kit items (`#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Kit item diameter in reference pixels (800px-wide stage).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Player label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Stroke colour for shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in reference pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Fill colour for zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Fill opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_alpha: Option<f64>,
    /// Dashed stroke flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashed: Option<bool>,
    /// Box width, percent of pitch width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_pct: Option<f64>,
    /// Box height, percent of pitch width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_pct: Option<f64>,
    /// Circle radius, percent of pitch width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_pct: Option<f64>,
    /// Circle/triangle size, percent of pitch width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_pct: Option<f64>,
    /// Line/arrow length, percent of pitch width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_pct: Option<f64>,
    /// Opaque per-item metadata carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Partial update for an item. `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StylePatch {
    /// New rotation in degrees.
    pub rot: Option<f64>,
    /// New style values; only `Some` fields are applied.
    pub style: ItemStyle,
}

impl StylePatch {
    /// Patch that only sets rotation.
    pub fn rotation(deg: f64) -> Self {
        Self {
            rot: Some(deg),
            ..Self::default()
        }
    }

    /// Patch that only sets colour.
    pub fn color(hex: impl Into<String>) -> Self {
        Self {
            style: ItemStyle {
                color: Some(hex.into()),
                ..ItemStyle::default()
            },
            ..Self::default()
        }
    }
}

/// One placed object on the pitch.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Item {
    /// Stable identity.
    pub id: String,
    /// Variant tag.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Horizontal percent position, always in `[0, 100]`.
    #[serde(default = "centre", deserialize_with = "de::lenient_pct")]
    pub x: f64,
    /// Vertical percent position, always in `[0, 100]`.
    #[serde(default = "centre", deserialize_with = "de::lenient_pct")]
    pub y: f64,
    /// Rotation in degrees.
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub rot: f64,
    /// Paint order; ties resolve by insertion order.
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub z: i64,
    /// Type-specific style bag.
    #[serde(flatten)]
    pub style: ItemStyle,
}

fn centre() -> f64 {
    50.0
}

impl Item {
    /// Create an item with an empty style bag.
    pub fn new(id: impl Into<String>, kind: ItemKind, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            x: clamp_pct(x),
            y: clamp_pct(y),
            rot: 0.0,
            z: 0,
            style: ItemStyle::default(),
        }
    }

    /// Builder: set the style bag.
    pub fn with_style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: set z.
    pub fn with_z(mut self, z: i64) -> Self {
        self.z = z;
        self
    }

    /// Builder: set rotation.
    pub fn with_rot(mut self, rot: f64) -> Self {
        self.rot = rot;
        self
    }

    /// Current animatable pose.
    pub fn pose(&self) -> Pose {
        Pose {
            x: self.x,
            y: self.y,
            rot: self.rot,
        }
    }

    /// Overwrite the animatable pose, clamping into the pitch.
    pub fn set_pose(&mut self, pose: Pose) {
        let p = pose.clamped();
        self.x = p.x;
        self.y = p.y;
        self.rot = p.rot;
    }

    /// Dashed either by flag or by kind.
    pub fn is_dashed(&self) -> bool {
        self.style.dashed.unwrap_or(false) || self.kind.is_dashed()
    }

    /// Apply a partial update.
    pub fn apply_patch(&mut self, patch: &StylePatch) {
        if let Some(rot) = patch.rot.filter(|r| r.is_finite()) {
            self.rot = rot;
        }
        let s = &patch.style;
        let d = &mut self.style;
        macro_rules! take {
            ($($f:ident),*) => {
                $(if let Some(v) = &s.$f { d.$f = Some(v.clone()); })*
            };
        }
        take!(
            color,
            size,
            label,
            stroke,
            stroke_width,
            fill,
            fill_alpha,
            dashed,
            width_pct,
            height_pct,
            radius_pct,
            size_pct,
            length_pct,
            meta
        );
        if let Some(a) = d.fill_alpha {
            d.fill_alpha = Some(if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.2 });
        }
    }

    /// Clamp coordinates and replace non-finite numbers; used on freshly loaded data.
    pub(crate) fn sanitize(&mut self) {
        self.x = clamp_pct(self.x);
        self.y = clamp_pct(self.y);
        if !self.rot.is_finite() {
            self.rot = 0.0;
        }
    }
}

mod de {
    use serde::Deserialize as _;

    fn number(v: &serde_json::Value) -> Option<f64> {
        match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|n: &f64| n.is_finite())
    }

    pub(super) fn lenient_pct<'de, D>(d: D) -> Result<f64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(d)?;
        Ok(number(&v).map_or(50.0, |n| n.clamp(0.0, 100.0)))
    }

    pub(super) fn lenient_f64<'de, D>(d: D) -> Result<f64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(d)?;
        Ok(number(&v).unwrap_or(0.0))
    }

    pub(super) fn lenient_i64<'de, D>(d: D) -> Result<i64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(d)?;
        Ok(number(&v).map_or(0, |n| n.trunc() as i64))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/item.rs"]
mod tests;
