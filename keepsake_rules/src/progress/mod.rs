//! Progress flags - the only state that outlives a page view.
//!
//! All reads and writes go through [`ProgressTracker`], which owns the store and
//! keeps `quiz_completed => puzzle_completed` true at every point.

mod store;

pub use store::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key for the puzzle flag.
pub const PUZZLE_COMPLETED_KEY: &str = "anniversary-puzzle-completed";

/// Storage key for the quiz flag.
pub const QUIZ_COMPLETED_KEY: &str = "anniversary-quiz-completed";

const TRUE_VALUE: &str = "true";

/// Errors raised while updating progress.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("the quiz cannot be completed before the puzzle")]
    QuizBeforePuzzle,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Snapshot of the two persisted booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressFlags {
    pub puzzle_completed: bool,
    pub quiz_completed: bool,
}

impl ProgressFlags {
    pub fn new(puzzle_completed: bool, quiz_completed: bool) -> Self {
        Self {
            puzzle_completed,
            quiz_completed,
        }
    }
}

/// Owner of the progress flags, injected into every component that reads them.
#[derive(Debug)]
pub struct ProgressTracker<S> {
    store: S,
    flags: ProgressFlags,
}

impl<S: ProgressStore> ProgressTracker<S> {
    /// Load flags from the store. Anything but `"true"` reads as unset.
    ///
    /// A stored quiz flag without the puzzle flag is discarded.
    pub fn load(store: S) -> Result<Self, ProgressError> {
        let puzzle_completed = read_flag(&store, PUZZLE_COMPLETED_KEY)?;
        let mut quiz_completed = read_flag(&store, QUIZ_COMPLETED_KEY)?;

        if quiz_completed && !puzzle_completed {
            warn!("stored quiz flag without puzzle flag, ignoring it");
            quiz_completed = false;
        }

        Ok(Self {
            store,
            flags: ProgressFlags::new(puzzle_completed, quiz_completed),
        })
    }

    /// Current flags.
    pub fn flags(&self) -> ProgressFlags {
        self.flags
    }

    /// Mark the puzzle solved. Returns whether the flag changed.
    pub fn set_puzzle_completed(&mut self) -> Result<bool, ProgressError> {
        if self.flags.puzzle_completed {
            return Ok(false);
        }
        self.store.set(PUZZLE_COMPLETED_KEY, TRUE_VALUE)?;
        self.flags.puzzle_completed = true;
        debug!("puzzle_completed set");
        Ok(true)
    }

    /// Mark the quiz passed. Returns whether the flag changed.
    pub fn set_quiz_completed(&mut self) -> Result<bool, ProgressError> {
        if !self.flags.puzzle_completed {
            return Err(ProgressError::QuizBeforePuzzle);
        }
        if self.flags.quiz_completed {
            return Ok(false);
        }
        self.store.set(QUIZ_COMPLETED_KEY, TRUE_VALUE)?;
        self.flags.quiz_completed = true;
        debug!("quiz_completed set");
        Ok(true)
    }

    /// Forget both flags.
    pub fn reset(&mut self) -> Result<(), ProgressError> {
        self.store.remove(QUIZ_COMPLETED_KEY)?;
        self.store.remove(PUZZLE_COMPLETED_KEY)?;
        self.flags = ProgressFlags::default();
        debug!("progress reset");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn read_flag<S: ProgressStore>(store: &S, key: &str) -> Result<bool, StoreError> {
    Ok(store.get(key)?.as_deref() == Some(TRUE_VALUE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_is_unset() {
        let tracker = ProgressTracker::load(MemoryStore::new()).unwrap();
        assert_eq!(tracker.flags(), ProgressFlags::default());
    }

    #[test]
    fn test_only_true_string_counts() {
        let mut store = MemoryStore::new();
        store.set(PUZZLE_COMPLETED_KEY, "false").unwrap();
        let tracker = ProgressTracker::load(store).unwrap();
        assert!(!tracker.flags().puzzle_completed);
    }

    #[test]
    fn test_quiz_requires_puzzle() {
        let mut tracker = ProgressTracker::load(MemoryStore::new()).unwrap();

        let result = tracker.set_quiz_completed();
        assert!(matches!(result, Err(ProgressError::QuizBeforePuzzle)));
        assert!(!tracker.flags().quiz_completed);
        assert!(tracker.store().get(QUIZ_COMPLETED_KEY).unwrap().is_none());

        assert!(tracker.set_puzzle_completed().unwrap());
        assert!(tracker.set_quiz_completed().unwrap());
        assert_eq!(tracker.flags(), ProgressFlags::new(true, true));
    }

    #[test]
    fn test_setters_are_idempotent() {
        let mut tracker = ProgressTracker::load(MemoryStore::new()).unwrap();
        assert!(tracker.set_puzzle_completed().unwrap());
        assert!(!tracker.set_puzzle_completed().unwrap());
    }

    #[test]
    fn test_flags_persist_through_store() {
        let mut tracker = ProgressTracker::load(MemoryStore::new()).unwrap();
        tracker.set_puzzle_completed().unwrap();
        tracker.set_quiz_completed().unwrap();

        let reloaded = ProgressTracker::load(tracker.into_store()).unwrap();
        assert_eq!(reloaded.flags(), ProgressFlags::new(true, true));
    }

    #[test]
    fn test_orphan_quiz_flag_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(QUIZ_COMPLETED_KEY, "true").unwrap();

        let tracker = ProgressTracker::load(store).unwrap();
        assert!(!tracker.flags().quiz_completed);
    }

    #[test]
    fn test_reset() {
        let mut tracker = ProgressTracker::load(MemoryStore::new()).unwrap();
        tracker.set_puzzle_completed().unwrap();
        tracker.reset().unwrap();

        assert_eq!(tracker.flags(), ProgressFlags::default());
        assert!(tracker.store().is_empty());
    }
}
