use crate::foundation::error::{BoardError, BoardResult};
use crate::foundation::math::{clamp_pct, lerp};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// The animatable subset of an item: position in pitch percent plus rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// Horizontal position, percent of pitch width, in `[0, 100]`.
    pub x: f64,
    /// Vertical position, percent of pitch height, in `[0, 100]`.
    pub y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rot: f64,
}

impl Pose {
    /// Create a pose with `x`/`y` clamped into the pitch.
    pub fn new(x: f64, y: f64, rot: f64) -> Self {
        Self {
            x: clamp_pct(x),
            y: clamp_pct(y),
            rot: if rot.is_finite() { rot } else { 0.0 },
        }
    }

    /// Return the same pose with coordinates clamped into `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y, self.rot)
    }

    /// Linear interpolation of all three components.
    pub fn lerp(a: &Self, b: &Self, f: f64) -> Self {
        Self {
            x: clamp_pct(lerp(a.x, b.x, f)),
            y: clamp_pct(lerp(a.y, b.y, f)),
            rot: lerp(a.rot, b.rot, f),
        }
    }
}

/// Absolute 0-based index of an exported frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> BoardResult<Self> {
        if den == 0 {
            return Err(BoardError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BoardError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Number of frame intervals needed to cover `secs`, rounding up.
    ///
    /// A tiny tolerance absorbs float noise from accumulated step durations, so `4.0s @ 12`
    /// is exactly 48 intervals.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        (secs * self.as_f64() - 1e-9).ceil().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 12, den: 1 }
    }
}

/// Pixel dimensions of a rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest size with the given aspect ratio (`width / height`) fitting inside `self`.
    pub fn fit_aspect(self, ratio: f64) -> Self {
        if !ratio.is_finite() || ratio <= 0.0 || self.height == 0 {
            return self;
        }
        let w = f64::from(self.width);
        let h = w / ratio;
        if h <= f64::from(self.height) {
            Self::new(self.width, h.round().max(1.0) as u32)
        } else {
            let h = f64::from(self.height);
            Self::new((h * ratio).round().max(1.0) as u32, self.height)
        }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(800, 518)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
