//! Snapshot-based undo/redo history.
//!
//! The history is a bounded, linear list of full copies of the shape list
//! plus a cursor. Saving while the cursor is behind the tail discards the
//! redo branch. Saves are either immediate or debounced: a debounced save
//! is held as a pending record and committed by [`HistoryManager::poll`]
//! once its quiet period has elapsed, unless a later save replaces it.

use crate::shapes::Shape;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default maximum number of snapshots to keep.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
/// Default quiet period before a debounced save is committed.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// An immutable copy of the shape list at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    shapes: Vec<Shape>,
    created_at: Instant,
}

impl Snapshot {
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

/// A debounced save waiting for its quiet period to elapse.
#[derive(Debug, Clone)]
struct PendingSave {
    shapes: Vec<Shape>,
    due: Instant,
}

/// Owns the snapshot sequence and the cursor into it.
#[derive(Debug)]
pub struct HistoryManager {
    entries: Vec<Snapshot>,
    /// Index of the current snapshot; None when empty.
    cursor: Option<usize>,
    pending: Option<PendingSave>,
    capacity: usize,
    debounce: Duration,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(
            DEFAULT_HISTORY_CAPACITY,
            Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        )
    }
}

impl HistoryManager {
    /// Create an empty history. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize, debounce: Duration) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            pending: None,
            capacity: capacity.max(1),
            debounce,
        }
    }

    /// Record `shapes`, either now or after the debounce window.
    ///
    /// Any pending debounced save is cancelled first.
    pub fn save_state(&mut self, shapes: Vec<Shape>, immediate: bool) {
        let now = Instant::now();
        if self.pending.take().is_some() {
            log::trace!("history: pending save superseded");
        }
        if immediate {
            self.commit(shapes, now);
        } else {
            self.pending = Some(PendingSave {
                shapes,
                due: now + self.debounce,
            });
        }
    }

    /// Commit the pending debounced save if its quiet period has elapsed by `now`.
    /// Returns true if a snapshot was recorded.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if now >= pending.due => {
                self.commit(pending.shapes, now);
                true
            }
            Some(pending) => {
                self.pending = Some(pending);
                false
            }
            None => false,
        }
    }

    /// Commit the pending debounced save right away, if any.
    pub fn flush_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.commit(pending.shapes, Instant::now());
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, shapes: Vec<Shape>, now: Instant) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(Snapshot {
            shapes,
            created_at: now,
        });
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!(
            "history: saved snapshot {}/{}",
            self.entries.len(),
            self.capacity
        );
    }

    /// Step back one snapshot and return a copy of it.
    pub fn undo(&mut self) -> Option<Vec<Shape>> {
        self.flush_pending();
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        log::debug!("history: undo to {}", cursor);
        Some(self.entries[cursor].shapes.clone())
    }

    /// Step forward one snapshot and return a copy of it.
    pub fn redo(&mut self) -> Option<Vec<Shape>> {
        self.flush_pending();
        let cursor = self.cursor.filter(|&c| c + 1 < self.entries.len())? + 1;
        self.cursor = Some(cursor);
        log::debug!("history: redo to {}", cursor);
        Some(self.entries[cursor].shapes.clone())
    }

    /// Whether `undo` would restore an earlier snapshot.
    pub fn can_undo(&self) -> bool {
        match self.cursor {
            // Committing the pending save lands the cursor past 0 unless capacity is 1.
            Some(_) if self.pending.is_some() => self.capacity > 1,
            Some(cursor) => cursor > 0,
            None => false,
        }
    }

    /// Whether `redo` would restore a later snapshot.
    pub fn can_redo(&self) -> bool {
        self.pending.is_none()
            && self
                .cursor
                .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    /// Cancel any pending save and drop every snapshot.
    pub fn clear(&mut self) {
        self.pending = None;
        self.entries.clear();
        self.cursor = None;
        log::debug!("history: cleared");
    }

    /// Clear, then record `shapes` as the first undo floor.
    pub fn init(&mut self, shapes: Vec<Shape>) {
        self.clear();
        self.save_state(shapes, true);
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.map(|cursor| &self.entries[cursor])
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn has_pending_save(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeColor, ShapeKind};

    fn shapes(n: usize) -> Vec<Shape> {
        (0..n)
            .map(|i| Shape::new(ShapeKind::Circle, i as f64, 0.0, i as i64, ShapeColor::black()))
            .collect()
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryManager::default();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_init_sets_floor() {
        let mut history = HistoryManager::default();
        history.init(shapes(1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_undo_redo_walks_cursor() {
        let mut history = HistoryManager::default();
        let states: Vec<_> = (0..4).map(shapes).collect();
        for s in &states {
            history.save_state(s.clone(), true);
        }
        assert_eq!(history.undo(), Some(states[2].clone()));
        assert_eq!(history.undo(), Some(states[1].clone()));
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(states[2].clone()));
        assert_eq!(history.redo(), Some(states[3].clone()));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_save_after_undo_truncates_redo_branch() {
        let mut history = HistoryManager::default();
        history.save_state(shapes(0), true);
        history.save_state(shapes(1), true);
        history.save_state(shapes(2), true);
        history.undo();
        history.undo();
        history.save_state(shapes(5), true);

        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo().map(|s| s.len()), Some(0));
        assert!(history.redo().is_some_and(|s| s.len() == 5));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryManager::new(50, Duration::from_millis(300));
        for n in 0..60 {
            history.save_state(shapes(n % 7), true);
            assert!(history.len() <= 50);
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.cursor(), Some(49));

        // Oldest surviving snapshot is save #10.
        let mut steps = 0;
        let mut last = None;
        while let Some(state) = history.undo() {
            steps += 1;
            last = Some(state);
        }
        assert_eq!(steps, 49);
        assert_eq!(last.map(|s| s.len()), Some(10 % 7));
    }

    #[test]
    fn test_debounced_save_waits_for_quiet_period() {
        let mut history = HistoryManager::default();
        history.init(Vec::new());
        history.save_state(shapes(1), false);
        assert!(history.has_pending_save());
        assert_eq!(history.len(), 1);

        assert!(!history.poll(Instant::now()));
        assert_eq!(history.len(), 1);

        assert!(history.poll(Instant::now() + history.debounce()));
        assert!(!history.has_pending_save());
        assert_eq!(history.len(), 2);
        assert!(!history.poll(Instant::now() + history.debounce() * 10));
    }

    #[test]
    fn test_later_save_supersedes_pending() {
        let mut history = HistoryManager::default();
        history.init(Vec::new());
        for n in 1..=5 {
            history.save_state(shapes(n), false);
        }
        assert!(history.poll(Instant::now() + history.debounce()));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().map(|s| s.shapes().len()), Some(5));
    }

    #[test]
    fn test_immediate_save_cancels_pending() {
        let mut history = HistoryManager::default();
        history.init(Vec::new());
        history.save_state(shapes(1), false);
        history.save_state(shapes(2), true);
        assert!(!history.has_pending_save());
        assert!(!history.poll(Instant::now() + history.debounce()));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_undo_commits_pending_first() {
        let mut history = HistoryManager::default();
        history.init(Vec::new());
        history.save_state(shapes(3), false);
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert_eq!(history.undo(), Some(Vec::new()));
        assert_eq!(history.redo().map(|s| s.len()), Some(3));
    }

    #[test]
    fn test_clear_cancels_pending() {
        let mut history = HistoryManager::default();
        history.init(shapes(1));
        history.save_state(shapes(2), false);
        history.clear();
        assert!(!history.has_pending_save());
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(!history.poll(Instant::now() + history.debounce()));
        assert!(history.is_empty());
    }

    #[test]
    fn test_snapshots_are_independent_copies() {
        let mut history = HistoryManager::default();
        let mut live = shapes(2);
        history.save_state(live.clone(), true);
        live[0].x = 999.0;
        history.save_state(live.clone(), true);

        let restored = history.undo().unwrap();
        assert_eq!(restored[0].x, 0.0);
    }
}
