//! Authored transitions between two pose snapshots.

use crate::foundation::core::Pose;
use crate::scene::store::PoseMap;

/// Shortest playable step, in seconds.
pub const MIN_STEP_DURATION: f64 = 0.2;
/// Duration given to a freshly added step.
pub const DEFAULT_STEP_DURATION: f64 = 2.0;

/// One authored transition: where everything starts, where it ends, and how long it takes.
///
/// `start`/`end` stay `None` until the matching edit phase is confirmed; `end` is never
/// confirmed before `start`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_duration", deserialize_with = "de::duration")]
    pub duration: f64,
    #[serde(default)]
    pub start: Option<PoseMap>,
    #[serde(default)]
    pub end: Option<PoseMap>,
}

fn default_duration() -> f64 {
    DEFAULT_STEP_DURATION
}

impl Step {
    /// Unconfirmed step with the given duration (clamped).
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: clamp_duration(duration),
            start: None,
            end: None,
        }
    }

    /// Duration used for timing; never below [`MIN_STEP_DURATION`].
    pub fn effective_duration(&self) -> f64 {
        clamp_duration(self.duration)
    }

    /// Whether both anchors have been captured.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub(crate) fn sanitize(&mut self) {
        self.duration = clamp_duration(self.duration);
        for map in [self.start.as_mut(), self.end.as_mut()].into_iter().flatten() {
            for pose in map.values_mut() {
                *pose = pose.clamped();
            }
        }
    }
}

/// Clamp a raw duration: non-finite or too-short values become [`MIN_STEP_DURATION`].
pub fn clamp_duration(d: f64) -> f64 {
    if d.is_finite() {
        d.max(MIN_STEP_DURATION)
    } else {
        MIN_STEP_DURATION
    }
}

/// Timeline position where step `i` begins.
pub fn step_start_time(steps: &[Step], i: usize) -> f64 {
    steps.iter().take(i).map(Step::effective_duration).sum()
}

/// Timeline position where step `i` ends. Past the last step this is the total length.
pub fn step_end_time(steps: &[Step], i: usize) -> f64 {
    step_start_time(steps, i) + steps.get(i).map_or(0.0, Step::effective_duration)
}

/// Total length of the timeline.
pub fn total_duration(steps: &[Step]) -> f64 {
    steps.iter().map(Step::effective_duration).sum()
}

/// Index of the step playing at time `t`, if any.
pub fn step_at(steps: &[Step], t: f64) -> Option<usize> {
    let mut acc = 0.0;
    for (i, s) in steps.iter().enumerate() {
        acc += s.effective_duration();
        if t < acc {
            return Some(i);
        }
    }
    steps.len().checked_sub(1)
}

/// Pose of `id` in an optional snapshot.
pub(crate) fn snapshot_pose(map: Option<&PoseMap>, id: &str) -> Option<Pose> {
    map.and_then(|m| m.get(id)).copied()
}

mod de {
    use serde::Deserialize;

    pub(super) fn duration<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let v = serde_json::Value::deserialize(d)?;
        let n = match &v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(super::clamp_duration(n.unwrap_or(super::MIN_STEP_DURATION)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/step.rs"]
mod tests;
