//! Bounded snapshot history with undo/redo.
//!
//! [`History`] records whole-buffer snapshots rather than edit deltas. The
//! owner calls [`History::before_change`] right before mutating and
//! [`History::after_change`] right after; the pair commits the pre-change
//! snapshot when the mutation produced a different state.
//!
//! # Examples
//!
//! ```
//! use quillspan::History;
//!
//! let mut doc = String::from("Hello");
//! let mut history = History::new(true, 10);
//!
//! history.before_change(&doc);
//! doc.push_str(" World");
//! history.after_change(&doc);
//!
//! assert!(history.undo(&mut doc));
//! assert_eq!(doc, "Hello");
//! assert!(history.redo(&mut doc));
//! assert_eq!(doc, "Hello World");
//! ```

use std::collections::VecDeque;

/// Default number of snapshots retained.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Where the history is in its capture cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryState {
    #[default]
    Idle,
    /// Between `before_change` and `after_change` of one mutation.
    Capturing,
    /// A snapshot is being written back; change hooks are ignored.
    Replaying,
}

/// Snapshot history for undo/redo with bounded memory usage.
///
/// Snapshots are evicted oldest-first once `capacity` is reached. The state
/// produced by the most recent mutation is kept apart from the list and
/// serves as the redo target past the newest snapshot.
#[derive(Clone, Debug)]
pub struct History<S> {
    snapshots: VecDeque<S>,
    cursor: usize,
    capacity: usize,
    enabled: bool,
    state: HistoryState,
    pending_before: Option<S>,
    last_after: Option<S>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: 0,
            capacity: DEFAULT_HISTORY_SIZE,
            enabled: true,
            state: HistoryState::Idle,
            pending_before: None,
            last_after: None,
        }
    }
}

impl<S: Clone + PartialEq> History<S> {
    /// Create a history retaining at most `capacity` snapshots.
    ///
    /// A disabled history ignores every hook and never offers undo or redo.
    #[must_use]
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            capacity,
            enabled,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn state(&self) -> HistoryState {
        self.state
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Position of the next redo within the snapshot list.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Record the state about to be mutated.
    ///
    /// Ignored while disabled, replaying, or already capturing (the outermost
    /// mutation owns the capture).
    pub fn before_change(&mut self, current: &S) {
        if !self.enabled || self.state != HistoryState::Idle {
            return;
        }
        self.pending_before = Some(current.clone());
        self.state = HistoryState::Capturing;
    }

    /// Finish a capture started by [`before_change`](Self::before_change).
    ///
    /// Commits the pre-change snapshot unless `current` equals it.
    pub fn after_change(&mut self, current: &S) {
        self.after_change_by(current, |before, after| before == after);
    }

    /// Like [`after_change`](Self::after_change), but `unchanged` decides
    /// whether the mutation is worth a snapshot.
    ///
    /// The latest state is remembered as the redo target either way.
    pub fn after_change_by<F>(&mut self, current: &S, unchanged: F)
    where
        F: FnOnce(&S, &S) -> bool,
    {
        if self.state != HistoryState::Capturing {
            return;
        }
        self.state = HistoryState::Idle;
        let Some(before) = self.pending_before.take() else {
            return;
        };

        self.last_after = Some(current.clone());
        if unchanged(&before, current) {
            tracing::trace!("history: no change, capture discarded");
            return;
        }

        if self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
            tracing::debug!(capacity = self.capacity, "history: evicted oldest snapshot");
        }
        self.snapshots.push_back(before);
        self.cursor = self.snapshots.len();
        tracing::debug!(len = self.snapshots.len(), "history: snapshot committed");
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.enabled
            && self.state != HistoryState::Replaying
            && self.cursor > 0
            && self.cursor <= self.snapshots.len()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        if !self.enabled || self.state == HistoryState::Replaying || self.snapshots.is_empty() {
            return false;
        }
        self.cursor + 1 < self.snapshots.len() || self.last_after.is_some()
    }

    /// Step back one snapshot, writing it into `target`.
    ///
    /// Returns `false` (leaving `target` alone) when there is nothing to undo.
    pub fn undo(&mut self, target: &mut S) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(snapshot) = self.snapshots.get(self.cursor - 1) else {
            return false;
        };

        self.state = HistoryState::Replaying;
        target.clone_from(snapshot);
        self.cursor -= 1;
        self.state = HistoryState::Idle;
        tracing::debug!(cursor = self.cursor, "history: undo");
        true
    }

    /// Step forward one snapshot, writing it into `target`.
    ///
    /// At the newest snapshot this restores the state left by the latest
    /// mutation. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, target: &mut S) -> bool {
        if !self.can_redo() {
            return false;
        }

        self.state = HistoryState::Replaying;
        let restored = if self.cursor + 1 >= self.snapshots.len() {
            self.cursor = self.snapshots.len();
            self.last_after.as_ref()
        } else {
            self.cursor += 1;
            self.snapshots.get(self.cursor)
        };
        if let Some(snapshot) = restored {
            target.clone_from(snapshot);
        }
        self.state = HistoryState::Idle;
        tracing::debug!(cursor = self.cursor, "history: redo");
        true
    }

    /// Drop every retained snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        tracing::debug!("history: cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(history: &mut History<String>, doc: &mut String, text: &str) {
        history.before_change(doc);
        doc.push_str(text);
        history.after_change(doc);
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut doc = String::new();
        let mut history = History::new(true, 10);
        edit(&mut history, &mut doc, "Hello");
        edit(&mut history, &mut doc, " World");
        assert_eq!(doc, "Hello World");

        assert!(history.undo(&mut doc));
        assert_eq!(doc, "Hello");
        assert!(history.undo(&mut doc));
        assert_eq!(doc, "");
        assert!(!history.undo(&mut doc));

        assert!(history.redo(&mut doc));
        assert_eq!(doc, "Hello");
        assert!(history.redo(&mut doc));
        assert_eq!(doc, "Hello World");
    }

    #[test]
    fn test_history_depth_limit() {
        let mut doc = String::new();
        let mut history = History::new(true, 3);

        for i in 0..5 {
            edit(&mut history, &mut doc, &format!("{i}"));
        }
        assert_eq!(doc, "01234");
        assert_eq!(history.len(), 3);

        assert!(history.undo(&mut doc)); // "0123"
        assert!(history.undo(&mut doc)); // "012"
        assert!(history.undo(&mut doc)); // "01"
        assert!(!history.undo(&mut doc));
        assert_eq!(doc, "01");
    }

    #[test]
    fn test_unchanged_mutation_is_discarded() {
        let mut doc = String::from("abc");
        let mut history = History::new(true, 10);
        history.before_change(&doc);
        history.after_change(&doc);
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert_eq!(history.state(), HistoryState::Idle);
    }

    #[test]
    fn test_custom_change_test_skips_snapshot() {
        let mut doc = String::from("abc");
        let mut history = History::new(true, 10);
        history.before_change(&doc);
        doc.make_ascii_uppercase();
        history.after_change_by(&doc, |a, b| a.eq_ignore_ascii_case(b));
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert_eq!(history.state(), HistoryState::Idle);

        edit(&mut history, &mut doc, "d");
        assert!(history.undo(&mut doc));
        assert_eq!(doc, "ABC");
        assert!(history.redo(&mut doc));
        assert_eq!(doc, "ABCd");
    }

    #[test]
    fn test_state_transitions() {
        let doc = String::from("a");
        let mut history: History<String> = History::new(true, 10);
        assert_eq!(history.state(), HistoryState::Idle);
        history.before_change(&doc);
        assert_eq!(history.state(), HistoryState::Capturing);
        history.after_change(&"ab".to_string());
        assert_eq!(history.state(), HistoryState::Idle);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_nested_capture_keeps_outermost_snapshot() {
        let mut doc = String::from("a");
        let mut history = History::new(true, 10);
        history.before_change(&doc);
        doc.push('b');
        history.before_change(&doc);
        doc.push('c');
        history.after_change(&doc);
        history.after_change(&doc);

        assert_eq!(history.len(), 1);
        assert!(history.undo(&mut doc));
        assert_eq!(doc, "a");
    }

    #[test]
    fn test_redo_at_tip_restores_latest_state() {
        let mut doc = String::new();
        let mut history = History::new(true, 10);
        edit(&mut history, &mut doc, "x");
        assert!(history.can_redo());

        doc.push_str("unrecorded");
        assert!(history.redo(&mut doc));
        assert_eq!(doc, "x");
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_disabled_history_records_nothing() {
        let mut doc = String::new();
        let mut history = History::new(false, 10);
        edit(&mut history, &mut doc, "abc");
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo(&mut doc));
        assert_eq!(doc, "abc");
    }

    #[test]
    fn test_clear_history() {
        let mut doc = String::new();
        let mut history = History::new(true, 10);
        edit(&mut history, &mut doc, "a");
        edit(&mut history, &mut doc, "b");
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo(&mut doc));
        assert_eq!(doc, "ab");

        edit(&mut history, &mut doc, "c");
        assert!(history.undo(&mut doc));
        assert_eq!(doc, "ab");
    }
}
