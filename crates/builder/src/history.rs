//! Linear undo/redo history
//!
//! History is a list of snapshots of the component list plus a cursor at the
//! snapshot currently shown. Snapshots hold `Arc<Component>`, so consecutive
//! entries share every component an edit did not touch.

use pagesmith_ir::Component;
use std::sync::Arc;

/// One state of the component list
pub type Snapshot = Vec<Arc<Component>>;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Snapshot history with a cursor
///
/// Invariant: `cursor < entries.len()` whenever `entries` is non-empty.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    /// Maximum number of snapshots kept, `0` for unbounded
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create history with the default limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create history keeping at most `limit` snapshots (`0` = unbounded)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit,
        }
    }

    /// Replace all entries with a single snapshot
    pub fn seed(&mut self, snapshot: Snapshot) {
        self.entries = vec![snapshot];
        self.cursor = 0;
    }

    /// Append a snapshot after the cursor, discarding the redo branch
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.is_empty() {
            self.seed(snapshot);
            return;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        // Drop the oldest snapshots past the limit
        if self.limit > 0 && self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
            self.cursor -= excess;
        }
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, `None` when empty
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

// ============================================================================
// Tests
// ============================================================================
