//! Events emitted by a journey for the front end to react to.

use keepsake_rules::PaperId;
use serde::{Deserialize, Serialize};

/// Something that changed during a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JourneyEvent {
    GateUnlocked,
    PuzzleSolved { elapsed_ms: u64 },
    /// The bottle section lost its lock overlay.
    BottleUnlocked,
    QuizOpened,
    /// Both answers right; `unlocked` lists the sections that opened.
    QuizPassed { unlocked: Vec<String> },
    /// Quiz panel and puzzle banner hidden.
    QuizDismissed,
    PairMatched { pairs: usize },
    PairMissed,
    CardsCompleted,
    PaperCollected { paper: PaperId, collected: usize },
    BottleCompleted,
}

impl JourneyEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            JourneyEvent::GateUnlocked => "gate_unlocked",
            JourneyEvent::PuzzleSolved { .. } => "puzzle_solved",
            JourneyEvent::BottleUnlocked => "bottle_unlocked",
            JourneyEvent::QuizOpened => "quiz_opened",
            JourneyEvent::QuizPassed { .. } => "quiz_passed",
            JourneyEvent::QuizDismissed => "quiz_dismissed",
            JourneyEvent::PairMatched { .. } => "pair_matched",
            JourneyEvent::PairMissed => "pair_missed",
            JourneyEvent::CardsCompleted => "cards_completed",
            JourneyEvent::PaperCollected { .. } => "paper_collected",
            JourneyEvent::BottleCompleted => "bottle_completed",
        }
    }
}
