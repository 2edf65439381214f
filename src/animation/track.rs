use crate::foundation::core::Pose;

/// Keys closer than this are treated as the same instant.
pub(crate) const TIME_EPS: f64 = 1e-9;

/// One compiled sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rot: f64,
}

impl Keyframe {
    pub fn at(t: f64, pose: Pose) -> Self {
        Self {
            t,
            x: pose.x,
            y: pose.y,
            rot: pose.rot,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.rot)
    }
}

/// Ascending keyframes for one item.
///
/// Construction sorts stably by time and drops keys with a non-finite time. Keys sharing an
/// instant collapse to at most two: the first inserted (the pose arriving) and the last (the
/// pose leaving). Two keys at one instant encode a jump; sampling exactly there returns the
/// leaving pose.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct Track {
    keys: Vec<Keyframe>,
}

impl From<Vec<Keyframe>> for Track {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<Track> for Vec<Keyframe> {
    fn from(track: Track) -> Self {
        track.keys
    }
}

impl Track {
    pub fn from_keys(mut keys: Vec<Keyframe>) -> Self {
        keys.retain(|k| k.t.is_finite());
        keys.sort_by(|a, b| a.t.total_cmp(&b.t));

        let mut out: Vec<Keyframe> = Vec::with_capacity(keys.len());
        let mut i = 0;
        while i < keys.len() {
            let first = keys[i];
            let mut j = i + 1;
            while j < keys.len() && keys[j].t - first.t <= TIME_EPS {
                j += 1;
            }
            let last = keys[j - 1];
            out.push(first);
            if last.pose() != first.pose() {
                out.push(Keyframe { t: first.t, ..last });
            }
            i = j;
        }
        Self { keys: out }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Time of the last key, or 0 for an empty track.
    pub fn end_time(&self) -> f64 {
        self.keys.last().map_or(0.0, |k| k.t)
    }

    /// Pose at time `t`; clamps to the first/last key outside the keyed range.
    pub fn sample(&self, t: f64) -> Option<Pose> {
        let first = self.keys.first()?;
        let t = if t.is_finite() { t } else { first.t };

        let idx = self.keys.partition_point(|k| k.t <= t);
        if idx == 0 {
            return Some(first.pose());
        }
        if idx >= self.keys.len() {
            return Some(self.keys[self.keys.len() - 1].pose());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let f = (t - a.t) / (b.t - a.t).max(TIME_EPS);
        Some(Pose::lerp(&a.pose(), &b.pose(), f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
