//! Best-effort recovery of a step list from legacy keyframe-only designs.
//!
//! Every distinct key time across all tracks becomes a step boundary, and each item's pose at
//! a boundary is the track sampled there. This is not an inverse of
//! [`compile_steps`](crate::animation::compile::compile_steps): holds and seams are flattened.

use std::collections::BTreeMap;

use crate::animation::step::{Step, clamp_duration};
use crate::animation::track::Track;
use crate::foundation::core::Pose;
use crate::scene::store::PoseMap;

/// Boundaries closer than this are merged.
const MIN_GAP: f64 = 1e-6;

/// Rebuild steps from `tracks`. Fewer than two distinct key times yields no steps.
pub fn reconstruct_steps_from_tracks(
    tracks: &BTreeMap<String, Track>,
    next_id: &mut dyn FnMut() -> String,
) -> Vec<Step> {
    let mut times: Vec<f64> = tracks
        .values()
        .flat_map(|tr| tr.keys().iter().map(|k| k.t))
        .filter(|t| t.is_finite() && *t >= 0.0)
        .collect();
    times.sort_by(f64::total_cmp);
    times.dedup();
    if times.len() < 2 {
        return Vec::new();
    }

    let at = |t: f64| -> PoseMap {
        tracks
            .iter()
            .map(|(id, tr)| {
                let p = tr.sample(t).unwrap_or(Pose::new(50.0, 50.0, 0.0));
                (id.clone(), p)
            })
            .collect()
    };

    let mut out: Vec<Step> = Vec::new();
    for w in times.windows(2) {
        let (t0, t1) = (w[0], w[1]);
        if t1 - t0 <= MIN_GAP {
            continue;
        }
        let mut step = Step::new(next_id(), format!("Step {}", out.len() + 1), clamp_duration(t1 - t0));
        step.start = Some(at(t0));
        step.end = Some(at(t1));
        out.push(step);
    }
    out
}

/// Keep `steps` when present; otherwise reconstruct them from legacy `tracks`.
///
/// Data that already carries steps is never migrated.
pub fn steps_or_migrate(
    steps: Vec<Step>,
    tracks: &BTreeMap<String, Track>,
    next_id: &mut dyn FnMut() -> String,
) -> Vec<Step> {
    if !steps.is_empty() || tracks.is_empty() {
        return steps;
    }
    let rebuilt = reconstruct_steps_from_tracks(tracks, next_id);
    tracing::warn!(
        tracks = tracks.len(),
        steps = rebuilt.len(),
        "design has keyframes but no steps; reconstructed steps from keyframes"
    );
    rebuilt
}

#[cfg(test)]
#[path = "../../tests/unit/animation/migrate.rs"]
mod tests;
