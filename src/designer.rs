//! The board as a whole: items, steps, playback, authoring, and export behind one owner.
//!
//! All editing calls are synchronous and total. Unknown ids and out-of-range step indices are
//! no-ops. Only export, load, and save touch the outside world, and their failures never leave
//! the board half-modified.

use std::collections::BTreeSet;

use crate::animation::compile::{CompiledTimeline, compile_steps};
use crate::animation::step::{self, DEFAULT_STEP_DURATION, Step, clamp_duration};
use crate::design::document::{
    Design, DesignStore, Notice, SavePayload, UNTITLED, load_design, new_id,
};
use crate::edit::session::{Confirmed, EditPhase, EditSession};
use crate::encode::png::{THUMBNAIL_MAX_EDGE, encode_png, encode_thumbnail_png};
use crate::encode::sink::FrameSink;
use crate::export::pipeline::{ExportOpts, ExportPlan, ExportProgress, Playhead, VideoExport};
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::BoardResult;
use crate::interaction::drag::{DragController, SurfaceRect};
use crate::pitch::layout::{self, DEFAULT_PITCH_ID, PitchLayout};
use crate::playback::scheduler::Scheduler;
use crate::render::backend::{FrameRGBA, RenderSurface};
use crate::scene::history::{DEFAULT_HISTORY_LIMIT, SnapshotHistory};
use crate::scene::item::{Item, StylePatch};
use crate::scene::palette::{self, PaletteEntry};
use crate::scene::store::{ItemStore, PoseMap, ZOrder};
use crate::scene::templates;

/// Arrow-key nudge, percent.
pub const NUDGE_STEP: f64 = 0.5;
/// Shift+arrow nudge, percent.
pub const NUDGE_STEP_LARGE: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DesignerOpts {
    /// Undo depth for both the session and the edit-phase history.
    pub history_limit: usize,
    /// Duration of a newly added step, seconds.
    pub default_step_duration: f64,
    /// Bounds the rendering surface is fitted into.
    pub surface: SurfaceSize,
}

impl Default for DesignerOpts {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_step_duration: DEFAULT_STEP_DURATION,
            surface: SurfaceSize::default(),
        }
    }
}

impl DesignerOpts {
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_default_step_duration(mut self, secs: f64) -> Self {
        self.default_step_duration = secs;
        self
    }

    pub fn with_surface(mut self, surface: SurfaceSize) -> Self {
        self.surface = surface;
        self
    }
}

pub struct Designer {
    opts: DesignerOpts,

    id: String,
    name: String,
    pitch_id: String,
    pitch: PitchLayout,
    notes: String,

    store: ItemStore,
    steps: Vec<Step>,
    timeline: CompiledTimeline,
    compiled_ids: BTreeSet<String>,

    scheduler: Scheduler,
    current_step: usize,
    edit: Option<EditSession>,
    history: SnapshotHistory<Vec<Item>>,
    drag: DragController,
    selected: Option<String>,
    spawn_count: usize,
}

impl Default for Designer {
    fn default() -> Self {
        Self::new(DesignerOpts::default())
    }
}

impl Designer {
    pub fn new(opts: DesignerOpts) -> Self {
        Self::from_design(Design::empty(), opts)
    }

    /// Open a loaded design. Legacy keyframe-only designs get their steps reconstructed.
    pub fn from_design(design: Design, opts: DesignerOpts) -> Self {
        let steps = design.resolved_steps();
        let history = SnapshotHistory::new(opts.history_limit);
        let mut d = Self {
            id: design.id,
            name: design.name,
            pitch: layout::resolve(&design.pitch_id),
            pitch_id: design.pitch_id,
            notes: design.notes,
            store: ItemStore::from_items(design.items),
            steps,
            timeline: CompiledTimeline::default(),
            compiled_ids: BTreeSet::new(),
            scheduler: Scheduler::new(),
            current_step: 0,
            edit: None,
            history,
            drag: DragController::new(),
            selected: None,
            spawn_count: 0,
            opts,
        };
        d.recompile();
        d
    }

    pub fn opts(&self) -> &DesignerOpts {
        &self.opts
    }

    // -- identity and metadata ------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = if name.trim().is_empty() {
            UNTITLED.to_owned()
        } else {
            name
        };
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn pitch(&self) -> &PitchLayout {
        &self.pitch
    }

    /// Switch layout. Items keep their percent positions.
    pub fn set_pitch(&mut self, pitch_id: &str) {
        self.pitch = layout::resolve(pitch_id);
        self.pitch_id = pitch_id.to_owned();
    }

    /// Surface size for the current pitch inside the configured bounds.
    pub fn surface_size(&self) -> SurfaceSize {
        self.pitch.fit_surface(self.opts.surface)
    }

    /// Start over: no items, no steps, fresh identity. Undoable at the session level.
    pub fn new_design(&mut self) {
        self.cancel_editing();
        self.drag.abort();
        self.history.push(self.store.snapshot());
        self.store.clear();
        self.steps.clear();
        self.id = new_id();
        self.name = UNTITLED.to_owned();
        self.notes.clear();
        self.set_pitch(DEFAULT_PITCH_ID);
        self.selected = None;
        self.current_step = 0;
        self.scheduler = Scheduler::new();
        self.recompile();
    }

    // -- items -----------------------------------------------------------------------------

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.store.get(id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select an item; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.store.contains(id)).map(str::to_owned);
    }

    fn checkpoint(&mut self) {
        self.record(self.store.snapshot());
    }

    /// Push `before` as one undo step in whichever history is active.
    fn record(&mut self, before: Vec<Item>) {
        match self.edit.as_mut() {
            Some(ed) => ed.record_gesture(before),
            None => self.history.push(before),
        }
    }

    /// Add an item as-is. Returns its id.
    pub fn add_item(&mut self, item: Item) -> String {
        self.checkpoint();
        let id = item.id.clone();
        self.store.add(item);
        self.sync_item_set();
        id
    }

    /// Spawn a palette entry at `at` (percent; centre when `None`). Returns the new id.
    pub fn add_from_palette(&mut self, entry: &PaletteEntry, at: Option<(f64, f64)>) -> String {
        self.checkpoint();
        let z = self.store.next_z();
        let item = palette::spawn(entry, new_id(), at, self.spawn_count, z);
        self.spawn_count += 1;
        let id = item.id.clone();
        self.store.add(item);
        self.selected = Some(id.clone());
        self.sync_item_set();
        id
    }

    /// Spawn the palette entry `entry_id` where it was dropped on the surface.
    pub fn drop_from_palette(
        &mut self,
        entry_id: &str,
        rect: SurfaceRect,
        client_x: f64,
        client_y: f64,
    ) -> Option<String> {
        let entry = palette::entry(entry_id)?;
        let at = rect.to_pct(client_x, client_y);
        Some(self.add_from_palette(&entry, at))
    }

    /// Add a formation template in `color`. Returns the new ids; empty for an unknown template.
    pub fn apply_template(&mut self, template_id: &str, color: &str) -> Vec<String> {
        let mut next = new_id;
        let Some(items) = templates::build(template_id, color, &mut next) else {
            tracing::warn!(template_id, "unknown template");
            return Vec::new();
        };
        self.checkpoint();
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let z = self.store.next_z();
            ids.push(item.id.clone());
            self.store.add(item.with_z(z));
        }
        self.sync_item_set();
        ids
    }

    pub fn move_item(&mut self, id: &str, x: f64, y: f64) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.checkpoint();
        self.store.move_to(id, x, y)
    }

    /// Keyboard nudge by a percent delta; see [`NUDGE_STEP`] and [`NUDGE_STEP_LARGE`].
    pub fn nudge(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.checkpoint();
        self.store.nudge(id, dx, dy)
    }

    pub fn patch(&mut self, id: &str, patch: &StylePatch) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.checkpoint();
        self.store.patch(id, patch)
    }

    pub fn reorder(&mut self, id: &str, order: ZOrder) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.checkpoint();
        self.store.reorder(id, order)
    }

    /// Copy an item (+2%/+2%, one layer up). Returns the copy's id.
    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        if !self.store.contains(id) {
            return None;
        }
        self.checkpoint();
        let new = self.store.duplicate(id, new_id())?.id.clone();
        self.selected = Some(new.clone());
        self.sync_item_set();
        Some(new)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.checkpoint();
        self.store.remove(id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.sync_item_set();
        true
    }

    // -- undo ------------------------------------------------------------------------------

    /// Undo in whichever history is active: the edit-phase one while editing, else the
    /// session one.
    pub fn undo(&mut self) -> bool {
        let current = self.store.snapshot();
        let restored = match self.edit.as_mut() {
            Some(ed) => ed.undo(current),
            None => self.history.undo(current),
        };
        self.restore(restored)
    }

    pub fn redo(&mut self) -> bool {
        let current = self.store.snapshot();
        let restored = match self.edit.as_mut() {
            Some(ed) => ed.redo(current),
            None => self.history.redo(current),
        };
        self.restore(restored)
    }

    pub fn can_undo(&self) -> bool {
        match &self.edit {
            Some(ed) => ed.can_undo(),
            None => self.history.can_undo(),
        }
    }

    pub fn can_redo(&self) -> bool {
        match &self.edit {
            Some(ed) => ed.can_redo(),
            None => self.history.can_redo(),
        }
    }

    fn restore(&mut self, snapshot: Option<Vec<Item>>) -> bool {
        let Some(items) = snapshot else {
            return false;
        };
        self.drag.abort();
        self.store.restore(items);
        if let Some(sel) = self.selected.as_deref()
            && !self.store.contains(sel)
        {
            self.selected = None;
        }
        self.sync_item_set();
        true
    }

    // -- compilation -----------------------------------------------------------------------

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn timeline(&self) -> &CompiledTimeline {
        &self.timeline
    }

    /// Total timeline length, seconds.
    pub fn duration(&self) -> f64 {
        self.timeline.duration
    }

    fn recompile(&mut self) {
        self.timeline = compile_steps(&self.steps, self.store.items());
        self.compiled_ids = self.store.items().iter().map(|it| it.id.clone()).collect();
    }

    /// Recompile when items were added or removed since the last compile.
    fn sync_item_set(&mut self) {
        let same = self.compiled_ids.len() == self.store.len()
            && self.store.items().iter().all(|it| self.compiled_ids.contains(&it.id));
        if !same {
            self.recompile();
        }
    }

    // -- steps -----------------------------------------------------------------------------

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_start_time(&self, i: usize) -> f64 {
        step::step_start_time(&self.steps, i)
    }

    pub fn step_end_time(&self, i: usize) -> f64 {
        step::step_end_time(&self.steps, i)
    }

    fn clamp_step(&self, i: usize) -> Option<usize> {
        self.steps.len().checked_sub(1).map(|last| i.min(last))
    }

    fn apply_snapshot(&mut self, snap: Option<PoseMap>) {
        if let Some(snap) = snap {
            self.store.apply_poses(&snap);
        }
    }

    /// Pause and show the start of step `i`, applying its confirmed start anchor if any.
    pub fn go_to_step_start(&mut self, i: usize) {
        let Some(j) = self.clamp_step(i) else {
            return;
        };
        self.scheduler.pause();
        let t = self.step_start_time(j);
        self.scheduler.seek(t, &self.timeline, &mut self.store);
        self.apply_snapshot(self.steps[j].start.clone());
        self.current_step = j;
    }

    /// Pause and show the end of step `i`, applying its confirmed end anchor if any.
    pub fn go_to_step_end(&mut self, i: usize) {
        let Some(j) = self.clamp_step(i) else {
            return;
        };
        self.scheduler.pause();
        let t = self.step_end_time(j);
        self.scheduler.seek(t, &self.timeline, &mut self.store);
        self.apply_snapshot(self.steps[j].end.clone());
        self.current_step = j;
    }

    /// Append an unconfirmed step named `Step N` and start authoring its start anchor.
    pub fn add_step(&mut self) -> usize {
        self.cancel_editing();
        let name = format!("Step {}", self.steps.len() + 1);
        self.steps
            .push(Step::new(new_id(), name, self.opts.default_step_duration));
        self.recompile();
        let idx = self.steps.len() - 1;
        self.enter_edit(EditSession::for_new_step(idx, self.opts.history_limit));
        idx
    }

    /// Start authoring one anchor of step `i`. Returns `false` when there are no steps.
    ///
    /// Re-opening the step already being authored keeps it, even one just added whose start
    /// is still unconfirmed. Any other edit is cancelled first, and `i` is resolved against
    /// the step list as it stands afterwards.
    pub fn begin_edit(&mut self, i: usize, phase: EditPhase) -> bool {
        if let Some(ed) = self.edit.take_if(|ed| ed.step_index() == i) {
            self.checkpoint();
            self.enter_edit(ed.retarget(phase, self.opts.history_limit));
            return true;
        }
        self.cancel_editing();
        let Some(j) = self.clamp_step(i) else {
            return false;
        };
        self.checkpoint();
        self.enter_edit(EditSession::begin(j, phase, self.opts.history_limit));
        true
    }

    fn enter_edit(&mut self, session: EditSession) {
        let j = session.step_index();
        let phase = session.phase();
        self.drag.abort();
        self.edit = Some(session);
        match phase {
            EditPhase::EditingStart => self.go_to_step_start(j),
            EditPhase::EditingEnd => self.go_to_step_end(j),
        }
    }

    pub fn edit_phase(&self) -> Option<EditPhase> {
        self.edit.as_ref().map(EditSession::phase)
    }

    pub fn editing_step(&self) -> Option<usize> {
        self.edit.as_ref().map(EditSession::step_index)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Capture the current poses into the anchor being authored.
    ///
    /// Confirming a start moves on to the end anchor; confirming an end finishes editing and
    /// shows the step's end.
    pub fn confirm_phase(&mut self) -> Option<Confirmed> {
        let ed = self.edit.as_mut()?;
        let poses = self.store.poses();
        let j = ed.step_index();
        let outcome = ed.confirm(&mut self.steps, poses);
        match outcome {
            Some(Confirmed::Start) => self.recompile(),
            Some(Confirmed::End) => {
                self.edit = None;
                self.recompile();
                self.go_to_step_end(j);
            }
            None => {
                tracing::warn!(step_index = j, "edited step no longer exists; leaving edit mode");
                self.edit = None;
            }
        }
        outcome
    }

    /// Leave edit mode without capturing anything.
    ///
    /// A step created by [`Designer::add_step`] whose start was never confirmed is removed
    /// again, so cancelling an add leaves the step list as it was.
    pub fn cancel_editing(&mut self) {
        let Some(ed) = self.edit.take() else {
            return;
        };
        self.drag.abort();
        let j = ed.step_index();
        if ed.discards_step_on_cancel() && self.steps.get(j).is_some_and(|s| s.start.is_none()) {
            self.steps.remove(j);
            self.current_step = self.current_step.min(self.steps.len().saturating_sub(1));
            self.recompile();
            tracing::debug!(step_index = j, "discarded unconfirmed new step");
        }
    }

    /// While authoring an end anchor, put everything back on the confirmed start anchor.
    pub fn reset_to_step_start(&mut self) -> bool {
        let Some(snap) = self
            .edit
            .as_ref()
            .and_then(|ed| ed.reset_target(&self.steps))
            .cloned()
        else {
            return false;
        };
        self.store.apply_poses(&snap);
        true
    }

    pub fn remove_step(&mut self, i: usize) -> bool {
        if i >= self.steps.len() {
            return false;
        }
        self.cancel_editing();
        if i >= self.steps.len() {
            return false;
        }
        self.steps.remove(i);
        self.current_step = self.current_step.min(self.steps.len().saturating_sub(1));
        self.recompile();
        true
    }

    /// Insert a copy of step `i` right after it, named `"<name> copy"`.
    ///
    /// Returns `None` for an unknown index, and for a just-added step that the implied cancel
    /// discards.
    pub fn duplicate_step(&mut self, i: usize) -> Option<usize> {
        self.steps.get(i)?;
        self.cancel_editing();
        let mut copy = self.steps.get(i)?.clone();
        copy.id = new_id();
        copy.name = format!("{} copy", copy.name);
        let at = (i + 1).min(self.steps.len());
        self.steps.insert(at, copy);
        self.recompile();
        Some(at)
    }

    /// Swap step `i` with its neighbour `delta` places away (typically ±1).
    pub fn move_step(&mut self, i: usize, delta: isize) -> bool {
        if i >= self.steps.len() || delta == 0 {
            return false;
        }
        self.cancel_editing();
        let len = self.steps.len();
        let Some(j) = i.checked_add_signed(delta).filter(|j| *j < len) else {
            return false;
        };
        if i >= len {
            return false;
        }
        self.steps.swap(i, j);
        self.recompile();
        true
    }

    pub fn rename_step(&mut self, i: usize, name: impl Into<String>) -> bool {
        let Some(s) = self.steps.get_mut(i) else {
            return false;
        };
        s.name = name.into();
        true
    }

    /// Set a step's duration, clamped to at least 0.2s.
    pub fn set_step_duration(&mut self, i: usize, secs: f64) -> bool {
        let Some(s) = self.steps.get_mut(i) else {
            return false;
        };
        s.duration = clamp_duration(secs);
        self.recompile();
        true
    }

    // -- playback --------------------------------------------------------------------------

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Current timeline position, seconds.
    pub fn time(&self) -> f64 {
        self.scheduler.time()
    }

    /// Start playback at host time `now` (seconds). Ignored while editing.
    pub fn play(&mut self, now: f64) {
        if self.is_editing() {
            tracing::debug!("play ignored while editing a step");
            return;
        }
        self.drag.abort();
        self.scheduler.play(now, self.timeline.duration);
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn seek(&mut self, t: f64) {
        self.scheduler.seek(t, &self.timeline, &mut self.store);
        if let Some(i) = step::step_at(&self.steps, self.scheduler.time()) {
            self.current_step = i;
        }
    }

    /// Advance playback to host time `now`. Returns the timeline position.
    pub fn tick(&mut self, now: f64) -> f64 {
        if !self.scheduler.is_playing() {
            return self.scheduler.time();
        }
        let t = self.scheduler.tick(now, &self.timeline, &mut self.store);
        if let Some(i) = step::step_at(&self.steps, t) {
            self.current_step = i;
        }
        t
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.scheduler.set_rate(rate);
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.scheduler.set_loop(looping);
    }

    // -- pointer ---------------------------------------------------------------------------

    /// Press on item `id`. Selects it, pauses playback and starts a drag.
    pub fn pointer_down(&mut self, id: &str, client_x: f64, client_y: f64) -> bool {
        if !self.drag.pointer_down(&self.store, id, client_x, client_y) {
            return false;
        }
        self.scheduler.pause();
        self.selected = Some(id.to_owned());
        true
    }

    pub fn pointer_move(&mut self, rect: SurfaceRect, client_x: f64, client_y: f64) -> bool {
        self.drag
            .pointer_move(&mut self.store, rect, client_x, client_y)
    }

    /// Release the pointer (or lose focus). Records one undo step for a gesture that moved
    /// something: in the edit-phase history while editing, else in the session history.
    pub fn pointer_up(&mut self) -> bool {
        let Some(before) = self.drag.pointer_up(&self.store) else {
            return false;
        };
        self.record(before);
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // -- export ----------------------------------------------------------------------------

    /// Borrow the pieces an export drives.
    pub fn playhead(&mut self) -> Playhead<'_> {
        Playhead {
            scheduler: &mut self.scheduler,
            timeline: &self.timeline,
            store: &mut self.store,
        }
    }

    pub fn export_plan(&self, opts: ExportOpts) -> ExportPlan {
        ExportPlan::new(self.timeline.duration, opts.fps)
    }

    pub fn render_still(&self, surface: &mut dyn RenderSurface) -> BoardResult<FrameRGBA> {
        surface.render_store(&self.store)
    }

    pub fn still_png(&self, surface: &mut dyn RenderSurface) -> BoardResult<Vec<u8>> {
        encode_png(&self.render_still(surface)?)
    }

    pub fn thumbnail_png(&self, surface: &mut dyn RenderSurface) -> BoardResult<Vec<u8>> {
        encode_thumbnail_png(&self.render_still(surface)?, THUMBNAIL_MAX_EDGE)
    }

    /// Start a frame-by-frame export. Leaves edit mode and pauses playback.
    pub fn begin_video_export(
        &mut self,
        opts: ExportOpts,
        surface: &dyn RenderSurface,
        sink: &mut dyn FrameSink,
    ) -> BoardResult<VideoExport> {
        self.cancel_editing();
        self.drag.abort();
        let plan = self.export_plan(opts);
        VideoExport::begin(plan, &mut self.playhead(), surface, sink)
    }

    pub fn advance_video_export(
        &mut self,
        export: &mut VideoExport,
        surface: &mut dyn RenderSurface,
        sink: &mut dyn FrameSink,
    ) -> BoardResult<ExportProgress> {
        export.advance(&mut self.playhead(), surface, sink)
    }

    pub fn cancel_video_export(&mut self, export: &mut VideoExport, sink: &mut dyn FrameSink) {
        export.cancel(&mut self.playhead(), sink);
    }

    /// Export the whole timeline. Returns the number of frames written.
    pub fn export_video(
        &mut self,
        opts: ExportOpts,
        surface: &mut dyn RenderSurface,
        sink: &mut dyn FrameSink,
    ) -> BoardResult<u64> {
        let mut export = self.begin_video_export(opts, surface, sink)?;
        loop {
            if let ExportProgress::Finished { total } =
                self.advance_video_export(&mut export, surface, sink)?
            {
                return Ok(total);
            }
        }
    }

    // -- persistence -----------------------------------------------------------------------

    /// Outbound payload for the current state.
    pub fn to_payload(&self) -> SavePayload {
        SavePayload {
            id: self.id.clone(),
            name: self.name.clone(),
            pitch: self.pitch_id.clone(),
            items: self.store.snapshot(),
            keyframes_by_id: self.timeline.tracks.clone(),
            timeline: self.timeline.duration,
            steps: self.steps.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Hand the design to `store`. Failures are reported as a notice; the board is untouched.
    pub fn save(
        &mut self,
        store: &mut dyn DesignStore,
        surface: Option<&mut dyn RenderSurface>,
    ) -> Notice {
        let payload = self.to_payload();
        let thumb = surface.and_then(|s| match self.thumbnail_png(s) {
            Ok(png) => Some(png),
            Err(e) => {
                tracing::warn!(error = %e, "thumbnail failed; saving without one");
                None
            }
        });
        match store.save(&payload, thumb.as_deref()) {
            Ok(()) => Notice::success("Saved"),
            Err(e) => {
                tracing::warn!(error = %e, id = %payload.id, "save failed");
                Notice::error(format!("Save failed: {e}"))
            }
        }
    }

    /// Replace the board with design `id` from `store`. On failure nothing changes.
    pub fn load(&mut self, store: &mut dyn DesignStore, id: &str) -> Notice {
        match load_design(store, id) {
            Ok(design) => {
                let opts = self.opts.clone();
                *self = Self::from_design(design, opts);
                Notice::info(format!("Loaded \"{}\"", self.name))
            }
            Err(e) => {
                tracing::warn!(error = %e, id, "load failed");
                Notice::error(format!("Could not load that design: {e}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/designer.rs"]
mod tests;
