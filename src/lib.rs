//! Pitchboard is the core of a tactical scene designer.
//!
//! Items (players, balls, equipment, shapes) are placed on a pitch in percent coordinates and
//! animated by authoring an ordered list of steps, each with a confirmed start and end pose
//! snapshot. Steps compile into per-item keyframe tracks that drive playback and export.
//!
//! - Open or build a board with a [`Designer`]
//! - Author steps with [`Designer::add_step`] and [`Designer::confirm_phase`]
//! - Play it back with a host clock, or export stills and MP4 through a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

/// Step authoring, compilation and keyframe tracks.
pub mod animation;
/// Persisted designs and the storage boundary.
pub mod design;
/// The board facade.
pub mod designer;
/// Edit-mode sessions.
pub mod edit;
/// Frame sinks and image encoding.
pub mod encode;
/// Still and video export.
pub mod export;
/// Pointer gestures.
pub mod interaction;
/// Pitch catalogue.
pub mod pitch;
/// Playback clock.
pub mod playback;
/// Rendering surfaces.
pub mod render;
/// Items, the item store, palette, templates and undo history.
pub mod scene;

pub use crate::foundation::core::{Fps, FrameIndex, Pose, SurfaceSize};
pub use crate::foundation::error::{BoardError, BoardResult};

pub use crate::animation::compile::{CompiledTimeline, compile_steps};
pub use crate::animation::step::Step;
pub use crate::animation::track::{Keyframe, Track};
pub use crate::design::document::{
    Design, DesignStore, MemoryDesignStore, Notice, NoticeKind, SavePayload,
};
pub use crate::designer::{Designer, DesignerOpts};
pub use crate::edit::session::{Confirmed, EditPhase};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::export::pipeline::{ExportOpts, ExportPlan, ExportProgress, ExportState, VideoExport};
pub use crate::interaction::drag::SurfaceRect;
pub use crate::pitch::layout::PitchLayout;
pub use crate::playback::scheduler::{PlaybackState, Scheduler};
pub use crate::render::backend::{FrameRGBA, RenderSurface};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::scene::item::{Item, ItemKind, ItemStyle, StylePatch};
pub use crate::scene::store::{ItemStore, PoseMap, ZOrder};
