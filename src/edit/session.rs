//! Two-phase authoring of one step's start and end anchors.
//!
//! An [`EditSession`] exists only between `begin` and confirm/cancel. It owns its own undo
//! history, separate from the session-level one, so an undo while editing can never reach
//! anchors confirmed on other steps.

use crate::animation::step::Step;
use crate::scene::history::SnapshotHistory;
use crate::scene::item::Item;
use crate::scene::store::PoseMap;

/// Which anchor is being authored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditPhase {
    EditingStart,
    EditingEnd,
}

/// What [`EditSession::confirm`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmed {
    /// Start captured; the session moved on to the end anchor.
    Start,
    /// End captured; the session is finished.
    End,
}

#[derive(Clone, Debug)]
pub struct EditSession {
    step_index: usize,
    phase: EditPhase,
    /// The step was appended by this session and has never had a start confirmed.
    fresh: bool,
    history: SnapshotHistory<Vec<Item>>,
}

impl EditSession {
    pub fn begin(step_index: usize, phase: EditPhase, history_limit: usize) -> Self {
        tracing::debug!(step_index, ?phase, "edit session started");
        Self {
            step_index,
            phase,
            fresh: false,
            history: SnapshotHistory::new(history_limit),
        }
    }

    /// Session for a step that was just appended.
    pub fn for_new_step(step_index: usize, history_limit: usize) -> Self {
        Self {
            fresh: true,
            ..Self::begin(step_index, EditPhase::EditingStart, history_limit)
        }
    }

    /// Same step in `phase` with a fresh history. A step still awaiting its first start
    /// confirmation stays discardable.
    pub fn retarget(&self, phase: EditPhase, history_limit: usize) -> Self {
        Self {
            fresh: self.fresh,
            ..Self::begin(self.step_index, phase, history_limit)
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    /// Whether cancelling should drop the step this session created.
    pub fn discards_step_on_cancel(&self) -> bool {
        self.fresh
    }

    /// Record the item array as it was before a committed drag gesture.
    pub fn record_gesture(&mut self, before: Vec<Item>) {
        self.history.push(before);
    }

    pub fn undo(&mut self, current: Vec<Item>) -> Option<Vec<Item>> {
        self.history.undo(current)
    }

    pub fn redo(&mut self, current: Vec<Item>) -> Option<Vec<Item>> {
        self.history.redo(current)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Write `poses` into the anchor for the current phase.
    ///
    /// Confirming the start moves to [`EditPhase::EditingEnd`] with a fresh undo history;
    /// confirming the end finishes the session. Returns `None` if the step no longer exists.
    pub fn confirm(&mut self, steps: &mut [Step], poses: PoseMap) -> Option<Confirmed> {
        let step = steps.get_mut(self.step_index)?;
        match self.phase {
            EditPhase::EditingStart => {
                step.start = Some(poses);
                self.phase = EditPhase::EditingEnd;
                self.fresh = false;
                self.history.clear();
                tracing::debug!(step_index = self.step_index, "start anchor confirmed");
                Some(Confirmed::Start)
            }
            EditPhase::EditingEnd => {
                if step.start.is_none() {
                    // An end must not be finalized before its start; capture both.
                    step.start = Some(poses.clone());
                }
                step.end = Some(poses);
                tracing::debug!(step_index = self.step_index, "end anchor confirmed");
                Some(Confirmed::End)
            }
        }
    }

    /// Confirmed start snapshot to re-apply while authoring the end anchor.
    pub fn reset_target<'s>(&self, steps: &'s [Step]) -> Option<&'s PoseMap> {
        if self.phase != EditPhase::EditingEnd {
            return None;
        }
        steps.get(self.step_index)?.start.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/session.rs"]
mod tests;
