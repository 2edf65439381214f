//! Virtual playback clock.
//!
//! The host drives the clock by calling [`Scheduler::tick`] once per animation frame with its
//! own monotonic time in seconds. Every tick and every seek re-samples the compiled tracks into
//! the item store.

use crate::animation::compile::CompiledTimeline;
use crate::scene::store::ItemStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scheduler {
    state: PlaybackState,
    time: f64,
    rate: f64,
    looping: bool,
    /// Host time of the previous tick while playing.
    last_wall: Option<f64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Stopped,
            time: 0.0,
            rate: 1.0,
            looping: false,
            last_wall: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current timeline position in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Start the clock at host time `now`, resuming from the current position.
    ///
    /// A non-looping clock parked at the end restarts from zero.
    pub fn play(&mut self, now: f64, duration: f64) {
        if self.is_playing() {
            return;
        }
        if !self.looping && self.time >= duration {
            self.time = 0.0;
        }
        self.state = PlaybackState::Playing;
        self.last_wall = Some(now);
        tracing::debug!(time = self.time, rate = self.rate, "playback started");
    }

    /// Stop the clock, keeping the current position.
    pub fn pause(&mut self) {
        if self.is_playing() {
            tracing::debug!(time = self.time, "playback paused");
        }
        self.state = PlaybackState::Stopped;
        self.last_wall = None;
    }

    /// Set the speed multiplier, effective from the next tick.
    /// Non-finite or non-positive rates are ignored.
    pub fn set_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            tracing::warn!(rate, "ignoring invalid playback rate");
            return;
        }
        self.rate = rate;
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Move to `t` (clamped to the timeline) and re-sample immediately, playing or not.
    pub fn seek(&mut self, t: f64, timeline: &CompiledTimeline, store: &mut ItemStore) {
        self.time = clamp_time(t, timeline.duration);
        timeline.apply(store, self.time);
    }

    /// Advance the clock to host time `now` and write sampled poses into `store`.
    ///
    /// Returns the new timeline position. A non-looping clock stops itself at the end.
    pub fn tick(&mut self, now: f64, timeline: &CompiledTimeline, store: &mut ItemStore) -> f64 {
        if let Some(wall) = self.last_wall {
            let duration = timeline.duration;
            let raw = self.time + (now - wall).max(0.0) * self.rate;
            if self.looping {
                self.time = if duration > 0.0 { raw.rem_euclid(duration) } else { 0.0 };
                self.last_wall = Some(now);
            } else if raw >= duration {
                self.time = duration.max(0.0);
                self.state = PlaybackState::Stopped;
                self.last_wall = None;
                tracing::debug!(time = self.time, "playback reached end");
            } else {
                self.time = raw;
                self.last_wall = Some(now);
            }
        }
        timeline.apply(store, self.time);
        self.time
    }
}

fn clamp_time(t: f64, duration: f64) -> f64 {
    if t.is_finite() { t.clamp(0.0, duration.max(0.0)) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
