//! Puzzle engine - a 4x4 board cut from one photo.
//!
//! Tiles may be swapped freely (no adjacency rule). The board is solved when
//! every slot holds the tile cut from that position; from then on it is
//! terminal and ignores further swaps.

use keepsake_rules::{format_clock, shuffle, MediaRef, SessionTime};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Tiles per row and column.
pub const GRID_SIZE: usize = 4;

/// Total tiles on the board.
pub const TILE_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Rendered edge length of one tile.
pub const TILE_SIZE_PX: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("arrangement must be a permutation of 0..{TILE_COUNT}")]
    NotAPermutation,
}

/// One piece of the photo, tagged with the slot it belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub correct_index: usize,
}

impl Tile {
    pub fn row(&self) -> usize {
        self.correct_index / GRID_SIZE
    }

    pub fn col(&self) -> usize {
        self.correct_index % GRID_SIZE
    }

    /// Background offset into the full image, in pixels.
    pub fn background_offset(&self) -> (u32, u32) {
        (self.col() as u32 * TILE_SIZE_PX, self.row() as u32 * TILE_SIZE_PX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Nothing happened: bad slot or board already solved.
    Ignored,
    Moved,
    /// This swap completed the board.
    Solved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleBoard {
    image: MediaRef,
    /// Slot index -> tile currently shown there.
    slots: Vec<Tile>,
    started_at: Option<SessionTime>,
    solved_at: Option<SessionTime>,
}

impl PuzzleBoard {
    /// Cut `image` into tiles and shuffle them.
    ///
    /// An arrangement that happens to come out solved is shuffled again.
    pub fn new<R: Rng + ?Sized>(image: MediaRef, rng: &mut R) -> Self {
        let mut slots: Vec<Tile> = (0..TILE_COUNT)
            .map(|correct_index| Tile { correct_index })
            .collect();

        loop {
            shuffle(&mut slots, rng);
            if !is_solved_arrangement(&slots) {
                break;
            }
            debug!("shuffle produced a solved board, reshuffling");
        }

        Self {
            image,
            slots,
            started_at: None,
            solved_at: None,
        }
    }

    /// Board with an explicit arrangement (`order[slot] = correct_index`).
    pub fn from_arrangement(image: MediaRef, order: &[usize]) -> Result<Self, PuzzleError> {
        let mut seen = [false; TILE_COUNT];
        if order.len() != TILE_COUNT {
            return Err(PuzzleError::NotAPermutation);
        }
        for &index in order {
            if index >= TILE_COUNT || seen[index] {
                return Err(PuzzleError::NotAPermutation);
            }
            seen[index] = true;
        }

        Ok(Self {
            image,
            slots: order
                .iter()
                .map(|&correct_index| Tile { correct_index })
                .collect(),
            started_at: None,
            solved_at: None,
        })
    }

    /// Board restored in its solved state, e.g. from a previous visit.
    pub fn solved(image: MediaRef) -> Self {
        Self {
            image,
            slots: (0..TILE_COUNT)
                .map(|correct_index| Tile { correct_index })
                .collect(),
            started_at: Some(SessionTime::START),
            solved_at: Some(SessionTime::START),
        }
    }

    pub fn image(&self) -> &MediaRef {
        &self.image
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.slots
    }

    /// Correct index of the tile in each slot.
    pub fn arrangement(&self) -> Vec<usize> {
        self.slots.iter().map(|t| t.correct_index).collect()
    }

    /// Exchange the tiles in slots `a` and `b`, then re-check completion.
    pub fn swap(&mut self, a: usize, b: usize, now: SessionTime) -> SwapOutcome {
        if self.is_solved() || a >= TILE_COUNT || b >= TILE_COUNT {
            return SwapOutcome::Ignored;
        }

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.slots.swap(a, b);

        if self.check_complete() {
            self.solved_at = Some(now);
            info!(elapsed = %self.timer_display(now), "puzzle solved");
            SwapOutcome::Solved
        } else {
            SwapOutcome::Moved
        }
    }

    /// True iff every slot holds the tile cut from that slot.
    pub fn check_complete(&self) -> bool {
        is_solved_arrangement(&self.slots)
    }

    pub fn is_solved(&self) -> bool {
        self.solved_at.is_some()
    }

    /// Number of tiles not in their own slot.
    pub fn misplaced(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter(|(slot, tile)| tile.correct_index != *slot)
            .count()
    }

    /// Milliseconds on the timer: starts with the first swap, stops on completion.
    pub fn elapsed_ms(&self, now: SessionTime) -> u64 {
        match (self.started_at, self.solved_at) {
            (Some(start), Some(end)) => end.elapsed_since(start),
            (Some(start), None) => now.elapsed_since(start),
            _ => 0,
        }
    }

    pub fn timer_display(&self, now: SessionTime) -> String {
        format_clock(self.elapsed_ms(now))
    }
}

fn is_solved_arrangement(slots: &[Tile]) -> bool {
    slots
        .iter()
        .enumerate()
        .all(|(slot, tile)| tile.correct_index == slot)
}
