//! Card match engine - 16 face-down cards, 8 pairs.
//!
//! Flow per turn:
//! 1. **Reveal**: up to two cards turn face-up
//! 2. **Check**: 600 ms after the second reveal the pair is compared; the
//!    `checking` flag blocks further reveals until it resolves
//! 3. **Resolve**: a match is marked after 1000 ms, a miss flips back after 1500 ms
//!
//! All delays are deferred actions tagged with the table generation, so a
//! [`CardTable::reset`] can never be touched by callbacks from the old game.

use keepsake_rules::{shuffle, MediaRef, SessionTime, Timeline};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Distinct photos on the table.
pub const PAIR_COUNT: usize = 8;

/// Delay from the second reveal to the match check.
pub const CHECK_DELAY_MS: u64 = 600;

/// Delay from a successful check to the pair being marked matched.
pub const MATCH_DELAY_MS: u64 = 1000;

/// Delay from a failed check to both cards flipping back.
pub const FLIP_BACK_DELAY_MS: u64 = 1500;

/// Delay from the last match to the completion banner.
pub const BANNER_DELAY_MS: u64 = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("the card game needs exactly {PAIR_COUNT} photos, got {0}")]
    PhotoCount(usize),

    #[error("photo '{0}' appears more than once")]
    DuplicatePhoto(String),
}

/// Why a reveal was refused. The table is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RevealRejected {
    #[error("a match check is pending")]
    CheckPending,

    #[error("two cards are already face-up")]
    PairShowing,

    #[error("card {0} is already face-up")]
    AlreadyFaceUp(usize),

    #[error("card {0} is already matched")]
    AlreadyMatched(usize),

    #[error("no card at index {0}")]
    NoSuchCard(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub photo: MediaRef,
    pub face_up: bool,
    pub matched: bool,
}

/// Result of a successful reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// First card of a pair is showing.
    First,
    /// Second card is showing; a match check is scheduled.
    Second,
}

/// Something that happened while deferred actions fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    PairMatched { pairs: usize },
    PairMissed,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardAction {
    CheckMatch,
    MarkMatched,
    FlipBack,
    ShowBanner,
}

#[derive(Debug, Clone)]
pub struct CardTable {
    photos: Vec<MediaRef>,
    cards: Vec<Card>,
    revealed: Vec<usize>,
    matched_pairs: usize,
    checking: bool,
    banner_visible: bool,
    generation: u64,
    timeline: Timeline<CardAction>,
}

impl CardTable {
    /// Deal a shuffled table from 8 distinct photos.
    pub fn new<R: Rng + ?Sized>(photos: Vec<MediaRef>, rng: &mut R) -> Result<Self, CardError> {
        if photos.len() != PAIR_COUNT {
            return Err(CardError::PhotoCount(photos.len()));
        }
        let mut seen = HashSet::new();
        for photo in &photos {
            if !seen.insert(photo) {
                return Err(CardError::DuplicatePhoto(photo.to_string()));
            }
        }

        let mut table = Self {
            photos,
            cards: Vec::new(),
            revealed: Vec::with_capacity(2),
            matched_pairs: 0,
            checking: false,
            banner_visible: false,
            generation: 0,
            timeline: Timeline::new(),
        };
        table.deal(rng);
        Ok(table)
    }

    fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut faces: Vec<MediaRef> = self
            .photos
            .iter()
            .chain(self.photos.iter())
            .cloned()
            .collect();
        shuffle(&mut faces, rng);

        self.cards = faces
            .into_iter()
            .map(|photo| Card {
                photo,
                face_up: false,
                matched: false,
            })
            .collect();
    }

    /// Throw the current game away and deal a fresh one from the same photos.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generation += 1;
        self.timeline.cancel_all();
        self.revealed.clear();
        self.matched_pairs = 0;
        self.checking = false;
        self.banner_visible = false;
        self.deal(rng);
        debug!(generation = self.generation, "card table reset");
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    /// Indices of unmatched cards currently face-up.
    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == PAIR_COUNT
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    pub fn pairs_found_label(&self) -> String {
        format!("{}/{} pairs found", self.matched_pairs, PAIR_COUNT)
    }

    /// Turn card `index` face-up.
    pub fn reveal(&mut self, index: usize, now: SessionTime) -> Result<RevealOutcome, RevealRejected> {
        if self.checking {
            return Err(RevealRejected::CheckPending);
        }
        if self.revealed.len() >= 2 {
            return Err(RevealRejected::PairShowing);
        }
        let card = self
            .cards
            .get_mut(index)
            .ok_or(RevealRejected::NoSuchCard(index))?;
        if card.matched {
            return Err(RevealRejected::AlreadyMatched(index));
        }
        if card.face_up {
            return Err(RevealRejected::AlreadyFaceUp(index));
        }

        card.face_up = true;
        self.revealed.push(index);

        if self.revealed.len() == 2 {
            self.timeline.schedule(
                now.plus(CHECK_DELAY_MS),
                self.generation,
                CardAction::CheckMatch,
            );
            Ok(RevealOutcome::Second)
        } else {
            Ok(RevealOutcome::First)
        }
    }

    /// Fire every deferred action due by `now`, in order.
    pub fn advance(&mut self, now: SessionTime) -> Vec<CardEvent> {
        let mut events = Vec::new();
        while let Some((at, action)) = self.timeline.pop_due(now, self.generation) {
            self.apply(action, at, &mut events);
        }
        events
    }

    fn apply(&mut self, action: CardAction, at: SessionTime, events: &mut Vec<CardEvent>) {
        match action {
            CardAction::CheckMatch => {
                let [first, second] = match self.revealed[..] {
                    [a, b] => [a, b],
                    _ => return,
                };
                self.checking = true;

                let follow_up = if self.cards[first].photo == self.cards[second].photo {
                    (MATCH_DELAY_MS, CardAction::MarkMatched)
                } else {
                    (FLIP_BACK_DELAY_MS, CardAction::FlipBack)
                };
                self.timeline
                    .schedule(at.plus(follow_up.0), self.generation, follow_up.1);
            }
            CardAction::MarkMatched => {
                for &index in &self.revealed {
                    self.cards[index].matched = true;
                }
                self.revealed.clear();
                self.matched_pairs += 1;
                self.checking = false;
                events.push(CardEvent::PairMatched {
                    pairs: self.matched_pairs,
                });

                if self.is_complete() {
                    info!("all card pairs matched");
                    self.timeline
                        .schedule(at.plus(BANNER_DELAY_MS), self.generation, CardAction::ShowBanner);
                }
            }
            CardAction::FlipBack => {
                for &index in &self.revealed {
                    self.cards[index].face_up = false;
                }
                self.revealed.clear();
                self.checking = false;
                events.push(CardEvent::PairMissed);
            }
            CardAction::ShowBanner => {
                self.banner_visible = true;
                events.push(CardEvent::Completed);
            }
        }
    }
}
