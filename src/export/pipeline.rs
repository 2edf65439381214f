//! Frame-accurate still and video export.
//!
//! Video export is an explicit state machine: [`VideoExport::advance`] seeks, renders and
//! pushes exactly one frame, so the host can interleave other work and cancel between frames.
//! Frames are never skipped or rendered out of order.

use crate::animation::compile::CompiledTimeline;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BoardError, BoardResult};
use crate::playback::scheduler::Scheduler;
use crate::render::backend::{FrameRGBA, RenderSurface};
use crate::scene::store::ItemStore;

/// Video export settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOpts {
    pub fps: Fps,
}

impl ExportOpts {
    pub fn with_fps(mut self, fps: Fps) -> Self {
        self.fps = fps;
        self
    }
}

/// Which frames an export produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportPlan {
    pub fps: Fps,
    /// Timeline length in seconds.
    pub duration: f64,
    /// Frames covering `[0, duration]` inclusive of both ends.
    pub frame_count: u64,
}

impl ExportPlan {
    pub fn new(duration: f64, fps: Fps) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            fps,
            duration,
            frame_count: fps.secs_to_frames_ceil(duration) + 1,
        }
    }

    /// Timeline position of frame `idx`, capped at the end.
    pub fn time_of(&self, idx: u64) -> f64 {
        let t = (idx as f64) * f64::from(self.fps.den) / f64::from(self.fps.num);
        t.min(self.duration)
    }
}

/// Mutable view over the pieces an export drives.
pub struct Playhead<'a> {
    pub scheduler: &'a mut Scheduler,
    pub timeline: &'a CompiledTimeline,
    pub store: &'a mut ItemStore,
}

impl Playhead<'_> {
    fn seek(&mut self, t: f64) {
        self.scheduler.seek(t, self.timeline, self.store);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportState {
    Running,
    Finished,
    Cancelled,
    Failed,
}

/// Result of one [`VideoExport::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportProgress {
    /// Frame `index` was captured; `total` frames overall.
    Frame { index: u64, total: u64 },
    /// The last frame was captured and the sink finalized.
    Finished { total: u64 },
}

/// In-flight video export.
#[derive(Debug)]
pub struct VideoExport {
    plan: ExportPlan,
    next: u64,
    restore_time: f64,
    state: ExportState,
}

impl VideoExport {
    /// Pause playback, remember the playhead, and open the sink.
    #[tracing::instrument(skip_all, fields(frames = plan.frame_count, duration = plan.duration))]
    pub fn begin(
        plan: ExportPlan,
        ph: &mut Playhead<'_>,
        surface: &dyn RenderSurface,
        sink: &mut dyn FrameSink,
    ) -> BoardResult<Self> {
        if plan.fps.num == 0 || plan.fps.den == 0 {
            return Err(BoardError::validation("fps must be non-zero"));
        }
        ph.scheduler.pause();
        let restore_time = ph.scheduler.time();
        let size = surface.size();
        sink.begin(SinkConfig {
            width: size.width,
            height: size.height,
            fps: plan.fps,
            frame_count: plan.frame_count,
        })?;
        Ok(Self {
            plan,
            next: 0,
            restore_time,
            state: ExportState::Running,
        })
    }

    pub fn plan(&self) -> &ExportPlan {
        &self.plan
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Frames captured so far.
    pub fn frames_done(&self) -> u64 {
        self.next
    }

    /// Capture exactly one frame.
    ///
    /// On any failure the sink is aborted, the playhead restored, and the export moves to
    /// [`ExportState::Failed`]; the board stays fully usable.
    pub fn advance(
        &mut self,
        ph: &mut Playhead<'_>,
        surface: &mut dyn RenderSurface,
        sink: &mut dyn FrameSink,
    ) -> BoardResult<ExportProgress> {
        if self.state != ExportState::Running {
            return Err(BoardError::validation(format!(
                "export is not running ({:?})",
                self.state
            )));
        }

        let idx = self.next;
        ph.seek(self.plan.time_of(idx));
        let pushed = surface
            .render_store(ph.store)
            .and_then(|frame| sink.push_frame(FrameIndex(idx), &frame));
        if let Err(e) = pushed {
            self.fail(ph, sink, &e);
            return Err(e);
        }
        self.next += 1;

        if self.next < self.plan.frame_count {
            return Ok(ExportProgress::Frame {
                index: idx,
                total: self.plan.frame_count,
            });
        }

        if let Err(e) = sink.end() {
            self.state = ExportState::Failed;
            tracing::warn!(error = %e, "export sink failed to finalize");
            ph.seek(self.restore_time);
            return Err(e);
        }
        self.state = ExportState::Finished;
        ph.seek(self.restore_time);
        tracing::debug!(frames = self.next, "video export finished");
        Ok(ExportProgress::Finished { total: self.next })
    }

    /// Stop between frames, discarding sink output.
    pub fn cancel(&mut self, ph: &mut Playhead<'_>, sink: &mut dyn FrameSink) {
        if self.state != ExportState::Running {
            return;
        }
        sink.abort();
        self.state = ExportState::Cancelled;
        ph.seek(self.restore_time);
        tracing::debug!(frames = self.next, "video export cancelled");
    }

    fn fail(&mut self, ph: &mut Playhead<'_>, sink: &mut dyn FrameSink, e: &BoardError) {
        tracing::warn!(error = %e, frame = self.next, "video export failed");
        sink.abort();
        self.state = ExportState::Failed;
        ph.seek(self.restore_time);
    }
}

/// Drive a whole export to completion. Returns the number of frames written.
pub fn export_video(
    plan: ExportPlan,
    ph: &mut Playhead<'_>,
    surface: &mut dyn RenderSurface,
    sink: &mut dyn FrameSink,
) -> BoardResult<u64> {
    let mut export = VideoExport::begin(plan, ph, surface, sink)?;
    loop {
        if let ExportProgress::Finished { total } = export.advance(ph, surface, sink)? {
            return Ok(total);
        }
    }
}

/// Render the store's current state.
pub fn export_still(store: &ItemStore, surface: &mut dyn RenderSurface) -> BoardResult<FrameRGBA> {
    surface.render_store(store)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
