//! Pitch layout catalogue.
//!
//! Items live in percent space so a design survives a pitch change; the layout only supplies
//! the physical size needed to talk about metres and to size a surface with the right aspect.

use crate::foundation::core::SurfaceSize;

/// Which family of markings a layout uses. Drawing the markings is the host's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Markings {
    /// Penalty areas, goal areas, centre circle, spots and arcs.
    Standard,
    /// Futsal boxes and centre circle.
    Futsal,
    /// No markings.
    Blank,
}

/// Physical dimensions (metres) for one pitch id.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchLayout {
    /// Catalogue id this layout was resolved for.
    pub id: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// Touchline length.
    pub length: f64,
    /// Goal-line width.
    pub width: f64,
    /// Penalty spot distance from the goal line.
    pub spot: Option<f64>,
    /// Penalty area depth.
    pub penalty_depth: Option<f64>,
    /// Penalty area width.
    pub penalty_width: Option<f64>,
    /// Goal area depth.
    pub goal_area_depth: Option<f64>,
    /// Goal area width.
    pub goal_area_width: Option<f64>,
    /// Centre circle radius.
    pub circle_radius: Option<f64>,
    /// Marking family.
    pub markings: Markings,
}

/// Id of the layout used when an id is unknown.
pub const DEFAULT_PITCH_ID: &str = "full";

const LAYOUTS: [PitchLayout; 5] = [
    PitchLayout {
        id: "full",
        name: "Full Pitch (11v11)",
        length: 105.0,
        width: 68.0,
        spot: Some(11.0),
        penalty_depth: Some(16.5),
        penalty_width: Some(40.32),
        goal_area_depth: Some(5.5),
        goal_area_width: Some(18.32),
        circle_radius: Some(9.15),
        markings: Markings::Standard,
    },
    PitchLayout {
        id: "9v9",
        name: "9v9",
        length: 73.0,
        width: 46.0,
        spot: Some(8.23),
        penalty_depth: Some(11.88),
        penalty_width: Some(29.26),
        goal_area_depth: Some(4.57),
        goal_area_width: Some(10.97),
        circle_radius: Some(7.5),
        markings: Markings::Standard,
    },
    PitchLayout {
        id: "7v7",
        name: "7v7",
        length: 55.0,
        width: 37.0,
        spot: Some(7.32),
        penalty_depth: Some(9.14),
        penalty_width: Some(16.46),
        goal_area_depth: Some(4.57),
        goal_area_width: Some(10.97),
        circle_radius: Some(6.0),
        markings: Markings::Standard,
    },
    PitchLayout {
        id: "futsal",
        name: "Futsal",
        length: 40.0,
        width: 20.0,
        spot: None,
        penalty_depth: None,
        penalty_width: None,
        goal_area_depth: None,
        goal_area_width: None,
        circle_radius: Some(6.0),
        markings: Markings::Futsal,
    },
    PitchLayout {
        id: "blank",
        name: "Blank Area",
        length: 60.0,
        width: 40.0,
        spot: None,
        penalty_depth: None,
        penalty_width: None,
        goal_area_depth: None,
        goal_area_width: None,
        circle_radius: None,
        markings: Markings::Blank,
    },
];

/// Resolve a pitch id to its layout.
///
/// Total: unknown ids fall back to the full pitch so a renamed or missing layout never blocks
/// editing.
pub fn resolve(pitch_id: &str) -> PitchLayout {
    match LAYOUTS.iter().find(|l| l.id == pitch_id) {
        Some(layout) => *layout,
        None => {
            tracing::warn!(pitch_id, "unknown pitch id, using full pitch layout");
            LAYOUTS[0]
        }
    }
}

/// All known layouts in catalogue order.
pub fn catalogue() -> &'static [PitchLayout] {
    &LAYOUTS
}

impl PitchLayout {
    /// Length over width; the surface aspect for a landscape pitch.
    pub fn aspect_ratio(&self) -> f64 {
        self.length / self.width
    }

    /// Convert a percent position to metres from the top-left corner.
    pub fn pct_to_metres(&self, x_pct: f64, y_pct: f64) -> (f64, f64) {
        (x_pct / 100.0 * self.length, y_pct / 100.0 * self.width)
    }

    /// Convert metres from the top-left corner to a percent position (unclamped).
    pub fn metres_to_pct(&self, x_m: f64, y_m: f64) -> (f64, f64) {
        (x_m / self.length * 100.0, y_m / self.width * 100.0)
    }

    /// Largest surface with this pitch's aspect that fits in `bounds`.
    pub fn fit_surface(&self, bounds: SurfaceSize) -> SurfaceSize {
        bounds.fit_aspect(self.aspect_ratio())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pitch/layout.rs"]
mod tests;
