//! Journey - one visitor's pass through the page.
//!
//! The journey owns every engine plus the progress tracker and routes input
//! through the unlock chain:
//! 1. **Gate**: nothing is rendered until the code is accepted
//! 2. **Puzzle**: solving it sets `puzzle_completed`, unlocks the bottle and opens the quiz
//! 3. **Quiz**: passing it sets `quiz_completed` and unlocks everything after the puzzle
//! 4. **Cards / Bottle**: independent games, playable once their sections are open
//!
//! Time only moves through [`Journey::advance`].

mod error;
mod events;

pub use error::*;
pub use events::*;

use keepsake_rules::{
    render_sections, visibility, MediaRef, Paper, PaperId, ProgressFlags, ProgressStore,
    ProgressTracker, SectionKind, SectionView, SessionTime, SiteContent,
};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Span};
use uuid::Uuid;

use crate::bottle::{Bottle, Collected};
use crate::cards::{CardEvent, CardTable, RevealOutcome};
use crate::gate::{Gate, GateOutcome};
use crate::puzzle::{PuzzleBoard, SwapOutcome};
use crate::quiz::{QuizAnswer, QuizPanel, QuizReport};

/// Image used when the puzzle section names none.
pub const DEFAULT_PUZZLE_IMAGE: &str = "images/puzzle-photo.jpeg";

/// Unique identifier for a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct Journey<S> {
    session: SessionId,
    span: Span,
    now: SessionTime,
    rng: ChaCha8Rng,
    content: SiteContent,
    progress: ProgressTracker<S>,
    gate: Gate,
    puzzle: Option<PuzzleBoard>,
    quiz: QuizPanel,
    cards: Option<CardTable>,
    bottle: Option<Bottle>,
    /// "Puzzle complete" banner, shown from the solve until the quiz closes.
    puzzle_banner: bool,
    events: Vec<JourneyEvent>,
}

impl<S: ProgressStore> Journey<S> {
    /// Build the engines for the sections `content` has.
    ///
    /// Flags stored by an earlier visit are honoured: a completed puzzle comes
    /// back solved and an outstanding quiz comes back open.
    pub fn start(
        content: SiteContent,
        progress: ProgressTracker<S>,
        mut rng: ChaCha8Rng,
    ) -> Result<Self, JourneyError> {
        let session = SessionId::new();
        let span = info_span!("journey", session = %session);
        let flags = progress.flags();

        let puzzle = content.puzzle_section().map(|section| {
            let image = section
                .image
                .clone()
                .unwrap_or_else(|| MediaRef::new(DEFAULT_PUZZLE_IMAGE));
            if flags.puzzle_completed {
                PuzzleBoard::solved(image)
            } else {
                PuzzleBoard::new(image, &mut rng)
            }
        });

        let cards = content
            .cards_section()
            .map(|section| CardTable::new(section.card_photos.clone(), &mut rng))
            .transpose()?;

        let bottle = content
            .bottle_section()
            .map(|section| Bottle::new(section.papers.clone(), &mut rng))
            .transpose()?;

        let mut quiz = QuizPanel::default();
        let quiz_pending = flags.puzzle_completed && !flags.quiz_completed;
        if quiz_pending {
            quiz.open();
        }

        info!(
            parent: &span,
            sections = content.sections.len(),
            puzzle_completed = flags.puzzle_completed,
            quiz_completed = flags.quiz_completed,
            "journey started"
        );

        Ok(Self {
            session,
            span,
            now: SessionTime::START,
            rng,
            content,
            progress,
            gate: Gate::new(),
            puzzle,
            quiz,
            cards,
            bottle,
            puzzle_banner: quiz_pending,
            events: Vec::new(),
        })
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn now(&self) -> SessionTime {
        self.now
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn flags(&self) -> ProgressFlags {
        self.progress.flags()
    }

    pub fn progress(&self) -> &ProgressTracker<S> {
        &self.progress
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn puzzle(&self) -> Option<&PuzzleBoard> {
        self.puzzle.as_ref()
    }

    pub fn quiz(&self) -> &QuizPanel {
        &self.quiz
    }

    pub fn cards(&self) -> Option<&CardTable> {
        self.cards.as_ref()
    }

    pub fn bottle(&self) -> Option<&Bottle> {
        self.bottle.as_ref()
    }

    pub fn puzzle_banner_visible(&self) -> bool {
        self.puzzle_banner
    }

    /// Drain events raised since the last call.
    pub fn take_events(&mut self) -> Vec<JourneyEvent> {
        std::mem::take(&mut self.events)
    }

    // === Gate ===

    pub fn enter_digit(&mut self, c: char) -> GateOutcome {
        let outcome = self.gate.press_digit(c);
        self.after_gate_input(outcome)
    }

    pub fn erase_digit(&mut self) -> GateOutcome {
        let outcome = self.gate.backspace();
        self.after_gate_input(outcome)
    }

    pub fn paste_code(&mut self, text: &str) -> GateOutcome {
        let outcome = self.gate.paste(text);
        self.after_gate_input(outcome)
    }

    pub fn rotate_dial(&mut self, index: usize) -> GateOutcome {
        let outcome = self.gate.rotate_dial(index);
        self.after_gate_input(outcome)
    }

    pub fn check_dials(&mut self) -> GateOutcome {
        let outcome = self.gate.try_dials();
        self.after_gate_input(outcome)
    }

    fn after_gate_input(&mut self, outcome: GateOutcome) -> GateOutcome {
        if outcome == GateOutcome::Unlocked {
            self.emit(JourneyEvent::GateUnlocked);
        }
        outcome
    }

    fn ensure_gate_open(&self) -> Result<(), JourneyError> {
        if self.gate.is_unlocked() {
            Ok(())
        } else {
            Err(JourneyError::GateLocked)
        }
    }

    /// Fail with `SectionLocked` unless the first section of `kind` is visible.
    fn ensure_section_open(&self, kind: SectionKind, name: &'static str) -> Result<(), JourneyError> {
        self.ensure_gate_open()?;
        let section = self
            .content
            .first_of(kind)
            .ok_or(JourneyError::NoSuchSection(name))?;
        let puzzle_order = self.content.puzzle_section().map(|s| s.order);

        if visibility(section, puzzle_order, self.progress.flags()).locked {
            return Err(JourneyError::SectionLocked(section.id.clone()));
        }
        Ok(())
    }

    // === Sections ===

    /// Section views for the current flags.
    pub fn render(&self) -> Result<Vec<SectionView>, JourneyError> {
        self.ensure_gate_open()?;
        Ok(render_sections(&self.content, self.progress.flags()))
    }

    // === Puzzle ===

    /// Swap two tiles. If the board was solved but saving the flag failed,
    /// the swap is skipped and the save is retried instead.
    pub fn swap_tiles(&mut self, a: usize, b: usize) -> Result<SwapOutcome, JourneyError> {
        self.ensure_gate_open()?;
        let now = self.now;
        let board = self
            .puzzle
            .as_mut()
            .ok_or(JourneyError::NoSuchSection("puzzle"))?;

        if board.is_solved() && !self.progress.flags().puzzle_completed {
            let elapsed_ms = board.elapsed_ms(now);
            self.on_puzzle_solved(elapsed_ms)?;
            return Ok(SwapOutcome::Solved);
        }

        let outcome = board.swap(a, b, now);
        if outcome == SwapOutcome::Solved {
            let elapsed_ms = board.elapsed_ms(now);
            self.on_puzzle_solved(elapsed_ms)?;
        }
        Ok(outcome)
    }

    /// Nothing changes unless the flag is saved.
    fn on_puzzle_solved(&mut self, elapsed_ms: u64) -> Result<(), JourneyError> {
        let newly_set = self.progress.set_puzzle_completed()?;
        self.puzzle_banner = true;
        self.emit(JourneyEvent::PuzzleSolved { elapsed_ms });

        if newly_set && self.content.bottle_section().is_some() {
            self.emit(JourneyEvent::BottleUnlocked);
        }
        if !self.progress.flags().quiz_completed && self.quiz.open() {
            self.emit(JourneyEvent::QuizOpened);
        }
        Ok(())
    }

    // === Quiz ===

    /// Show the quiz panel again, e.g. after scrolling back to it.
    pub fn open_quiz(&mut self) -> Result<(), JourneyError> {
        self.ensure_gate_open()?;
        let flags = self.progress.flags();
        if !flags.puzzle_completed || flags.quiz_completed || !self.quiz.open() {
            return Err(JourneyError::QuizUnavailable);
        }
        Ok(())
    }

    pub fn submit_quiz(&mut self, answer: &QuizAnswer) -> Result<QuizReport, JourneyError> {
        self.ensure_gate_open()?;
        let flags = self.progress.flags();
        if !flags.puzzle_completed || flags.quiz_completed {
            return Err(JourneyError::QuizUnavailable);
        }

        let report = self.quiz.submit(answer, self.now)?;
        if report.passed() {
            let before = render_sections(&self.content, flags);
            if let Err(e) = self.progress.set_quiz_completed() {
                self.quiz.reopen();
                return Err(e.into());
            }
            let after = render_sections(&self.content, self.progress.flags());

            let unlocked: Vec<String> = before
                .iter()
                .zip(&after)
                .filter(|(was, now)| was.is_locked() && !now.is_locked())
                .map(|(_, now)| now.id.clone())
                .collect();
            info!(parent: &self.span, unlocked = unlocked.len(), "quiz passed");
            self.emit(JourneyEvent::QuizPassed { unlocked });
        }
        Ok(report)
    }

    // === Cards ===

    pub fn reveal_card(&mut self, index: usize) -> Result<RevealOutcome, JourneyError> {
        self.ensure_section_open(SectionKind::Cards, "cards")?;
        let table = self
            .cards
            .as_mut()
            .ok_or(JourneyError::NoSuchSection("cards"))?;
        Ok(table.reveal(index, self.now)?)
    }

    /// Deal a new card game; callbacks from the old one are dropped.
    pub fn reset_cards(&mut self) -> Result<(), JourneyError> {
        self.ensure_section_open(SectionKind::Cards, "cards")?;
        let table = self
            .cards
            .as_mut()
            .ok_or(JourneyError::NoSuchSection("cards"))?;
        table.reset(&mut self.rng);
        Ok(())
    }

    // === Bottle ===

    fn bottle_mut(&mut self) -> Result<&mut Bottle, JourneyError> {
        self.ensure_section_open(SectionKind::Bottle, "bottle")?;
        self.bottle
            .as_mut()
            .ok_or(JourneyError::NoSuchSection("bottle"))
    }

    pub fn open_paper(&mut self, id: PaperId) -> Result<&Paper, JourneyError> {
        Ok(self.bottle_mut()?.open(id)?)
    }

    /// Move the open paper to the collection box.
    pub fn collect_paper(&mut self) -> Result<Option<Collected>, JourneyError> {
        let collected = self.bottle_mut()?.collect();

        if let Some(collected) = collected {
            self.emit(JourneyEvent::PaperCollected {
                paper: collected.paper,
                collected: collected.collected,
            });
            if collected.complete {
                self.emit(JourneyEvent::BottleCompleted);
            }
        }
        Ok(collected)
    }

    pub fn close_paper(&mut self) -> Result<bool, JourneyError> {
        Ok(self.bottle_mut()?.close())
    }

    pub fn shake_bottle(&mut self) -> Result<(), JourneyError> {
        self.ensure_section_open(SectionKind::Bottle, "bottle")?;
        if let Some(bottle) = self.bottle.as_mut() {
            bottle.shake(&mut self.rng);
        }
        Ok(())
    }

    // === Time ===

    /// Move the clock forward and fire every deferred action now due.
    pub fn advance(&mut self, ms: u64) {
        self.now.advance(ms);
        let now = self.now;

        if self.quiz.advance(now) {
            self.puzzle_banner = false;
            self.emit(JourneyEvent::QuizDismissed);
        }

        let card_events = match self.cards.as_mut() {
            Some(table) => table.advance(now),
            None => Vec::new(),
        };
        for event in card_events {
            self.emit(match event {
                CardEvent::PairMatched { pairs } => JourneyEvent::PairMatched { pairs },
                CardEvent::PairMissed => JourneyEvent::PairMissed,
                CardEvent::Completed => JourneyEvent::CardsCompleted,
            });
        }
    }

    /// Forget stored progress and hand the tracker back for a fresh start.
    pub fn reset_progress(mut self) -> Result<ProgressTracker<S>, JourneyError> {
        self.progress.reset()?;
        info!(parent: &self.span, "progress reset");
        Ok(self.progress)
    }

    /// End the journey, returning the tracker so a later visit can reuse it.
    pub fn into_progress(self) -> ProgressTracker<S> {
        self.progress
    }

    fn emit(&mut self, event: JourneyEvent) {
        debug!(parent: &self.span, event = event.name(), at = self.now.as_millis(), "journey event");
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::PAIR_COUNT;
    use crate::puzzle::TILE_COUNT;
    use crate::quiz::{Month, QuizPhase, DISMISS_DELAY_MS};
    use keepsake_rules::{
        LockReason, MemoryStore, Section, StoreError, PUZZLE_COMPLETED_KEY, QUIZ_COMPLETED_KEY,
    };
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    fn journey_with(store: MemoryStore) -> Journey<MemoryStore> {
        Journey::start(
            SiteContent::builtin().unwrap(),
            ProgressTracker::load(store).unwrap(),
            ChaCha8Rng::seed_from_u64(42),
        )
        .unwrap()
    }

    fn unlocked_journey() -> Journey<MemoryStore> {
        let mut journey = journey_with(MemoryStore::new());
        assert_eq!(journey.paste_code("2110"), GateOutcome::Unlocked);
        journey.take_events();
        journey
    }

    /// Put every tile in place; returns the result of the last swap made.
    fn try_solve<S: ProgressStore>(journey: &mut Journey<S>) -> Result<SwapOutcome, JourneyError> {
        let mut last = Ok(SwapOutcome::Ignored);
        for slot in 0..TILE_COUNT {
            let order = journey.puzzle().unwrap().arrangement();
            let from = order.iter().position(|&i| i == slot).unwrap();
            if from != slot {
                last = journey.swap_tiles(slot, from);
            }
        }
        last
    }

    fn solve<S: ProgressStore>(journey: &mut Journey<S>) {
        assert_eq!(try_solve(journey).unwrap(), SwapOutcome::Solved);
    }

    /// Store whose writes fail while `failing` is set.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: Rc<Cell<bool>>,
    }

    impl FlakyStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.failing.get() {
                return Err(StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk full")));
            }
            Ok(())
        }
    }

    impl ProgressStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.check()?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.check()?;
            self.inner.remove(key)
        }
    }

    fn flaky_journey() -> (Journey<FlakyStore>, Rc<Cell<bool>>) {
        let store = FlakyStore::default();
        let failing = store.failing.clone();
        let mut journey = Journey::start(
            SiteContent::builtin().unwrap(),
            ProgressTracker::load(store).unwrap(),
            ChaCha8Rng::seed_from_u64(42),
        )
        .unwrap();
        journey.paste_code("2110");
        journey.take_events();
        (journey, failing)
    }

    fn right_answer() -> QuizAnswer {
        QuizAnswer::new("Dog Ministry").with_date(22, Month::January, 2024)
    }

    fn locked_ids(journey: &Journey<MemoryStore>) -> Vec<String> {
        journey
            .render()
            .unwrap()
            .into_iter()
            .filter(|v| v.is_locked())
            .map(|v| v.id)
            .collect()
    }

    #[test]
    fn test_content_hidden_behind_gate() {
        let mut journey = journey_with(MemoryStore::new());
        assert!(matches!(journey.render(), Err(JourneyError::GateLocked)));
        assert!(matches!(journey.swap_tiles(0, 1), Err(JourneyError::GateLocked)));
        assert!(matches!(journey.reveal_card(0), Err(JourneyError::GateLocked)));

        for c in "2110".chars() {
            journey.enter_digit(c);
        }
        assert_eq!(journey.take_events(), vec![JourneyEvent::GateUnlocked]);
        assert_eq!(journey.render().unwrap().len(), 7);
    }

    #[test]
    fn test_dials_open_gate() {
        let mut journey = journey_with(MemoryStore::new());
        for (index, turns) in [2, 1, 1, 0].into_iter().enumerate() {
            for _ in 0..turns {
                journey.rotate_dial(index);
            }
        }
        assert!(journey.gate().is_unlocked());
        assert_eq!(journey.take_events(), vec![JourneyEvent::GateUnlocked]);
    }

    #[test]
    fn test_fresh_visit_locks() {
        let journey = unlocked_journey();
        let views = journey.render().unwrap();
        assert_eq!(views[2].kind, SectionKind::Puzzle);
        assert_eq!(views[2].order, 2);

        let bottle = views.iter().find(|v| v.id == "bottle").unwrap();
        assert_eq!(bottle.visibility.reason, Some(LockReason::PuzzlePending));
        assert_eq!(
            locked_ids(&journey),
            vec!["bottle", "memory-cards", "anniversary-video", "future"]
        );
    }

    #[test]
    fn test_solving_puzzle_unlocks_bottle_only() {
        let mut journey = unlocked_journey();
        solve(&mut journey);

        let events = journey.take_events();
        assert!(matches!(events[0], JourneyEvent::PuzzleSolved { .. }));
        assert_eq!(events[1..], [JourneyEvent::BottleUnlocked, JourneyEvent::QuizOpened]);
        assert!(journey.flags().puzzle_completed);
        assert!(journey.puzzle_banner_visible());

        assert_eq!(
            locked_ids(&journey),
            vec!["memory-cards", "anniversary-video", "future"]
        );
        assert!(journey.open_paper(PaperId(1)).is_ok());
        assert_eq!(journey.swap_tiles(0, 1).unwrap(), SwapOutcome::Ignored);
    }

    #[test]
    fn test_locked_sections_reject_play() {
        let mut journey = unlocked_journey();
        assert!(matches!(
            journey.open_paper(PaperId(1)),
            Err(JourneyError::SectionLocked(id)) if id == "bottle"
        ));
        assert!(matches!(
            journey.reveal_card(0),
            Err(JourneyError::SectionLocked(id)) if id == "memory-cards"
        ));
        assert!(matches!(
            journey.submit_quiz(&right_answer()),
            Err(JourneyError::QuizUnavailable)
        ));
    }

    #[test]
    fn test_quiz_unlocks_after_puzzle() {
        let mut journey = unlocked_journey();
        solve(&mut journey);
        journey.take_events();

        let report = journey
            .submit_quiz(&QuizAnswer::new("Dog Ministry").with_date(21, Month::January, 2024))
            .unwrap();
        assert!(!report.passed());
        assert!(!journey.flags().quiz_completed);

        assert!(journey.submit_quiz(&right_answer()).unwrap().passed());
        assert_eq!(
            journey.take_events(),
            vec![JourneyEvent::QuizPassed {
                unlocked: vec![
                    "memory-cards".to_string(),
                    "anniversary-video".to_string(),
                    "future".to_string()
                ]
            }]
        );
        assert!(locked_ids(&journey).is_empty());

        journey.advance(DISMISS_DELAY_MS);
        assert_eq!(journey.take_events(), vec![JourneyEvent::QuizDismissed]);
        assert!(!journey.puzzle_banner_visible());
        assert!(matches!(journey.open_quiz(), Err(JourneyError::QuizUnavailable)));
    }

    #[test]
    fn test_failed_quiz_save_leaves_quiz_open() {
        let (mut journey, failing) = flaky_journey();
        solve(&mut journey);
        journey.take_events();

        failing.set(true);
        assert!(matches!(
            journey.submit_quiz(&right_answer()),
            Err(JourneyError::Progress(_))
        ));
        assert_eq!(journey.quiz().phase(), QuizPhase::Open);
        assert!(!journey.flags().quiz_completed);

        journey.advance(DISMISS_DELAY_MS);
        assert!(journey.take_events().is_empty());
        assert!(journey.puzzle_banner_visible());

        failing.set(false);
        assert!(journey.submit_quiz(&right_answer()).unwrap().passed());
        assert!(journey.flags().quiz_completed);
    }

    #[test]
    fn test_failed_puzzle_save_retried_on_next_swap() {
        let (mut journey, failing) = flaky_journey();

        failing.set(true);
        assert!(matches!(try_solve(&mut journey), Err(JourneyError::Progress(_))));
        assert!(journey.puzzle().unwrap().is_solved());
        assert!(!journey.flags().puzzle_completed);
        assert!(journey.take_events().is_empty());
        assert!(matches!(journey.open_quiz(), Err(JourneyError::QuizUnavailable)));

        failing.set(false);
        assert_eq!(journey.swap_tiles(0, 1).unwrap(), SwapOutcome::Solved);
        assert!(journey.flags().puzzle_completed);
        assert!(journey.puzzle().unwrap().check_complete());

        let events = journey.take_events();
        assert!(matches!(events[0], JourneyEvent::PuzzleSolved { .. }));
        assert_eq!(events[1..], [JourneyEvent::BottleUnlocked, JourneyEvent::QuizOpened]);
        assert_eq!(journey.swap_tiles(0, 1).unwrap(), SwapOutcome::Ignored);
    }

    #[test]
    fn test_stored_progress_honoured() {
        let mut store = MemoryStore::new();
        store.set(PUZZLE_COMPLETED_KEY, "true").unwrap();
        store.set(QUIZ_COMPLETED_KEY, "true").unwrap();

        let mut journey = journey_with(store);
        journey.paste_code("2110");
        assert!(locked_ids(&journey).is_empty());
        assert!(journey.puzzle().unwrap().is_solved());
        assert!(!journey.puzzle_banner_visible());
    }

    #[test]
    fn test_stored_puzzle_reopens_quiz() {
        let mut store = MemoryStore::new();
        store.set(PUZZLE_COMPLETED_KEY, "true").unwrap();

        let mut journey = journey_with(store);
        journey.paste_code("2110");
        assert!(journey.puzzle_banner_visible());
        assert!(journey.submit_quiz(&right_answer()).unwrap().passed());
    }

    #[test]
    fn test_card_events_flow_through_advance() {
        let mut store = MemoryStore::new();
        store.set(PUZZLE_COMPLETED_KEY, "true").unwrap();
        store.set(QUIZ_COMPLETED_KEY, "true").unwrap();
        let mut journey = journey_with(store);
        journey.paste_code("2110");
        journey.take_events();

        for _ in 0..PAIR_COUNT {
            let cards = journey.cards().unwrap().cards();
            let a = cards.iter().position(|c| !c.matched).unwrap();
            let b = (a + 1..cards.len())
                .find(|&j| cards[j].photo == cards[a].photo)
                .unwrap();
            journey.reveal_card(a).unwrap();
            journey.reveal_card(b).unwrap();
            journey.advance(1_600);
        }
        journey.advance(500);

        let events = journey.take_events();
        assert_eq!(events.last(), Some(&JourneyEvent::CardsCompleted));
        assert_eq!(events[events.len() - 2], JourneyEvent::PairMatched { pairs: PAIR_COUNT });
    }

    #[test]
    fn test_collect_all_papers() {
        let mut journey = unlocked_journey();
        solve(&mut journey);
        journey.take_events();

        for n in 1..=6 {
            journey.open_paper(PaperId(n)).unwrap();
            journey.collect_paper().unwrap();
        }
        let events = journey.take_events();
        assert_eq!(events.len(), 7);
        assert_eq!(events.last(), Some(&JourneyEvent::BottleCompleted));
        assert!(journey.bottle().unwrap().is_complete());
    }

    #[test]
    fn test_bad_card_photos_fail_start() {
        let content = SiteContent::new(
            "t",
            "s",
            vec![Section::new("cards", SectionKind::Cards, "Cards").with_card_photos(["a.jpg"])],
        )
        .unwrap();
        let result = Journey::start(
            content,
            ProgressTracker::load(MemoryStore::new()).unwrap(),
            ChaCha8Rng::seed_from_u64(0),
        );

        let error = result.err().unwrap();
        assert_eq!(ErrorScreen::from(&error).heading, "Sorry, something went wrong");
    }

    #[test]
    fn test_reset_progress() {
        let mut journey = unlocked_journey();
        solve(&mut journey);

        let tracker = journey.reset_progress().unwrap();
        assert_eq!(tracker.flags(), ProgressFlags::default());
        assert!(tracker.store().is_empty());
    }
}
