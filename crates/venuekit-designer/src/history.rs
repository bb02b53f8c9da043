//! Bounded snapshot history for undo and redo.

use crate::model::LayoutSnapshot;

/// Linear history of committed snapshots with a cursor.
///
/// Recording after an undo drops the redo tail. When the depth limit is
/// exceeded the oldest entries are discarded.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<LayoutSnapshot>,
    cursor: usize,
    max_depth: usize,
}

impl History {
    pub fn new(initial: LayoutSnapshot, max_depth: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &LayoutSnapshot {
        &self.entries[self.cursor]
    }

    pub fn record(&mut self, snapshot: LayoutSnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor += 1;
        while self.entries.len() > self.max_depth + 1 {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Steps back; `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&LayoutSnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Steps forward; `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&LayoutSnapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    /// Drops all entries and starts over from `initial`.
    pub fn reset(&mut self, initial: LayoutSnapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        while self.entries.len() > self.max_depth + 1 && self.cursor > 0 {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }
}
