/// Snapshot-based undo/redo for one collection.
///
/// Each commit records the collection as it was before the change; undo swaps
/// the current value with the most recent snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotHistory<T> {
    /// Snapshots that can be restored by undo
    undo_stack: Vec<T>,
    /// Snapshots that can be restored by redo
    redo_stack: Vec<T>,
}

impl<T> Default for SnapshotHistory<T> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<T: Clone> SnapshotHistory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` before it is mutated. Clears the redo stack.
    pub fn record(&mut self, current: &T) {
        self.undo_stack.push(current.clone());
        self.redo_stack.clear();
    }

    /// Restore the most recent snapshot into `current`. No-op on underflow.
    pub fn undo(&mut self, current: &mut T) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(std::mem::replace(current, previous));
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, current: &mut T) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(std::mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Drops redo snapshots without recording, for commits that touch a
    /// sibling collection only.
    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
