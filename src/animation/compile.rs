//! Step list to per-item keyframe tracks.
//!
//! Compilation is a pure function of `steps` and the current item poses, rebuilt in full on
//! every step change; nothing is patched incrementally.
//!
//! Tracks are built only for ids that some step's start or end snapshot names. Items no step
//! mentions are left out of [`CompiledTimeline::tracks`] (and so of a saved `keyframesById`)
//! rather than given a flat track; sampling leaves them at their static pose.

use std::collections::{BTreeMap, BTreeSet};

use crate::animation::step::{Step, snapshot_pose};
use crate::animation::track::{Keyframe, Track};
use crate::foundation::core::Pose;
use crate::scene::item::Item;
use crate::scene::store::{ItemStore, PoseMap};

/// Two keys closer than this count as "already present" for the hold sample.
const HOLD_EPS: f64 = 1e-6;

/// Output of [`compile_steps`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CompiledTimeline {
    pub tracks: BTreeMap<String, Track>,
    /// Total length in seconds.
    pub duration: f64,
}

impl CompiledTimeline {
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Pose of `id` at `t`, or `None` when the item has no track.
    pub fn sample(&self, id: &str, t: f64) -> Option<Pose> {
        self.tracks.get(id)?.sample(t)
    }

    /// Sample every tracked item at `t`.
    pub fn sample_all(&self, t: f64) -> PoseMap {
        self.tracks
            .iter()
            .filter_map(|(id, tr)| Some((id.clone(), tr.sample(t)?)))
            .collect()
    }

    /// Write sampled poses into `store`. Items without a track keep their pose.
    pub fn apply(&self, store: &mut ItemStore, t: f64) {
        store.apply_poses(&self.sample_all(t));
    }
}

/// Compile `steps` into one track per animated item.
///
/// Items that no step mentions get no track and keep their static pose.
#[tracing::instrument(skip(steps, items), fields(steps = steps.len(), items = items.len()))]
pub fn compile_steps(steps: &[Step], items: &[Item]) -> CompiledTimeline {
    let mut ids: BTreeSet<&str> = BTreeSet::new();
    for st in steps {
        for map in [st.start.as_ref(), st.end.as_ref()].into_iter().flatten() {
            ids.extend(map.keys().map(String::as_str));
        }
    }
    if ids.is_empty() {
        return CompiledTimeline {
            tracks: BTreeMap::new(),
            duration: crate::animation::step::total_duration(steps),
        };
    }

    let first_start = steps.first().and_then(|s| s.start.as_ref());
    let current: BTreeMap<&str, Pose> = items.iter().map(|it| (it.id.as_str(), it.pose())).collect();

    let mut raw: BTreeMap<&str, Vec<Keyframe>> = ids
        .iter()
        .map(|&id| {
            let initial = snapshot_pose(first_start, id)
                .or_else(|| current.get(id).copied())
                .unwrap_or(Pose::new(50.0, 50.0, 0.0));
            (id, vec![Keyframe::at(0.0, initial)])
        })
        .collect();

    let mut t_accum = 0.0;
    for st in steps {
        let d = st.effective_duration();
        let t_start = t_accum;
        let t_end = t_start + d;
        for (&id, keys) in raw.iter_mut() {
            let Some(last) = keys.last().map(Keyframe::pose) else {
                continue;
            };
            let start = snapshot_pose(st.start.as_ref(), id).unwrap_or(last);
            let end = snapshot_pose(st.end.as_ref(), id).unwrap_or(start);

            if !keys.iter().any(|k| (k.t - t_start).abs() < HOLD_EPS) {
                keys.push(Keyframe::at(t_start, last));
            }
            keys.push(Keyframe::at(t_start, start));
            keys.push(Keyframe::at(t_end, end));
        }
        t_accum = t_end;
    }

    let tracks: BTreeMap<String, Track> = raw
        .into_iter()
        .map(|(id, keys)| (id.to_owned(), Track::from_keys(keys)))
        .collect();
    tracing::debug!(tracks = tracks.len(), duration = t_accum, "compiled steps");

    CompiledTimeline {
        tracks,
        duration: t_accum.max(0.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/compile.rs"]
mod tests;
