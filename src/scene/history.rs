/// Linear undo/redo over full snapshots.
///
/// Two independent instances exist at runtime: the session-level history and the
/// edit-phase history. Restoring a snapshot is a plain replace, so there is no diff to get
/// wrong.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotHistory<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    limit: usize,
}

/// Default number of snapshots kept per stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

impl<T: Clone> SnapshotHistory<T> {
    /// Empty history keeping at most `limit` undo entries (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state from before a change. Clears the redo stack.
    pub fn push(&mut self, before: T) {
        self.undo_stack.push(before);
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Step back: returns the state to restore, given the current one.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward: returns the state to restore, given the current one.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Whether [`SnapshotHistory::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether [`SnapshotHistory::redo`] would do anything.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Undo depth.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}

impl<T: Clone> Default for SnapshotHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/history.rs"]
mod tests;
