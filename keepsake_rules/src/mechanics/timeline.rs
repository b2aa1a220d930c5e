//! Deferred actions keyed to a game-state generation.
//!
//! Engines schedule follow-up steps (flip back, hide a panel) instead of
//! mutating state from timers. Bumping the engine's generation makes every
//! action scheduled under the old one inert.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SessionTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled<A> {
    due: SessionTime,
    generation: u64,
    seq: u64,
    action: A,
}

/// Queue of pending deferred actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline<A> {
    entries: Vec<Scheduled<A>>,
    next_seq: u64,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire at `due` under `generation`.
    pub fn schedule(&mut self, due: SessionTime, generation: u64, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled {
            due,
            generation,
            seq,
            action,
        });
    }

    /// Remove and return the earliest action due at or before `now`.
    ///
    /// Actions from other generations are discarded on the way.
    pub fn pop_due(&mut self, now: SessionTime, generation: u64) -> Option<(SessionTime, A)> {
        loop {
            let index = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due <= now)
                .min_by_key(|(_, e)| (e.due, e.seq))
                .map(|(i, _)| i)?;

            let entry = self.entries.remove(index);
            if entry.generation == generation {
                return Some((entry.due, entry.action));
            }
            debug!(
                stale = entry.generation,
                current = generation,
                "dropping stale deferred action"
            );
        }
    }

    /// Drop everything.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Number of actions still waiting.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the next action is due, if any.
    pub fn next_due(&self) -> Option<SessionTime> {
        self.entries.iter().map(|e| e.due).min()
    }
}
