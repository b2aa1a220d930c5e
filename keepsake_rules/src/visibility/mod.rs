//! Section visibility - which sections sit behind a lock overlay.
//!
//! Every decision goes through [`visibility`], driven by the per-kind
//! [`LockPolicy`]. Renderers never branch on kinds themselves.

use serde::{Deserialize, Serialize};

use crate::content::{Section, SectionKind, SiteContent};
use crate::progress::ProgressFlags;

/// How a section kind unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockPolicy {
    /// Always visible.
    Never,
    /// Locked until the puzzle is solved, wherever it sits.
    RequiresPuzzle,
    /// Locked until the quiz is passed, but only when placed after the puzzle.
    RequiresQuizAfterPuzzle,
}

impl LockPolicy {
    /// Policy for a section kind.
    ///
    /// Photo galleries are quiz-gated like every other content kind once they
    /// sit after the puzzle; only the puzzle itself and the bottle differ.
    pub fn for_kind(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Puzzle => LockPolicy::Never,
            SectionKind::Bottle => LockPolicy::RequiresPuzzle,
            SectionKind::Plain | SectionKind::Gallery | SectionKind::Cards | SectionKind::Video => {
                LockPolicy::RequiresQuizAfterPuzzle
            }
        }
    }
}

/// Why a section is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockReason {
    QuizPending,
    PuzzlePending,
}

impl LockReason {
    /// Text shown on the lock overlay.
    pub fn overlay_text(&self) -> &'static str {
        match self {
            LockReason::QuizPending => "🔒 Complete the quest to unlock",
            LockReason::PuzzlePending => "🔒 Complete the puzzle first to unlock this section",
        }
    }
}

/// Lock state of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub locked: bool,
    pub reason: Option<LockReason>,
}

impl Visibility {
    pub const OPEN: Visibility = Visibility {
        locked: false,
        reason: None,
    };

    fn locked(reason: LockReason) -> Self {
        Self {
            locked: true,
            reason: Some(reason),
        }
    }
}

/// Decide whether `section` is locked.
///
/// `puzzle_order` is the order of the puzzle section, or `None` when the store
/// has no puzzle (nothing is then quiz-gated).
pub fn visibility(section: &Section, puzzle_order: Option<u32>, flags: ProgressFlags) -> Visibility {
    match LockPolicy::for_kind(section.kind) {
        LockPolicy::Never => Visibility::OPEN,
        LockPolicy::RequiresPuzzle if !flags.puzzle_completed => {
            Visibility::locked(LockReason::PuzzlePending)
        }
        LockPolicy::RequiresPuzzle => Visibility::OPEN,
        LockPolicy::RequiresQuizAfterPuzzle => {
            let after_puzzle = puzzle_order.is_some_and(|puzzle| section.order > puzzle);
            if after_puzzle && !flags.quiz_completed {
                Visibility::locked(LockReason::QuizPending)
            } else {
                Visibility::OPEN
            }
        }
    }
}

/// Render model of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub id: String,
    pub kind: SectionKind,
    pub order: u32,
    pub title: String,
    pub visibility: Visibility,
}

impl SectionView {
    pub fn is_locked(&self) -> bool {
        self.visibility.locked
    }

    /// Overlay text, if the section is locked.
    pub fn lock_message(&self) -> Option<&'static str> {
        self.visibility.reason.map(|r| r.overlay_text())
    }
}

/// Paint every section from the current flags.
pub fn render_sections(content: &SiteContent, flags: ProgressFlags) -> Vec<SectionView> {
    let puzzle_order = content.puzzle_section().map(|s| s.order);

    content
        .sections
        .iter()
        .map(|section| SectionView {
            id: section.id.clone(),
            kind: section.kind,
            order: section.order,
            title: section.title.clone(),
            visibility: visibility(section, puzzle_order, flags),
        })
        .collect()
}
